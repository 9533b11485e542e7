use crate::device::{DeviceConfigProfile, DeviceConfigRepository};
use crate::event::{NewSensorEvent, SensorEvent, SensorEventRepository};
use crate::result::DomainResult;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of `DeviceConfigRepository` using a `HashMap`.
///
/// Used by the standalone binary and by tests; production deployments
/// inject a repository backed by the admin service's store.
pub struct InMemoryDeviceConfigRepository {
    profiles: RwLock<HashMap<String, DeviceConfigProfile>>,
}

impl InMemoryDeviceConfigRepository {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert_profile(&self, device_id: impl Into<String>, profile: DeviceConfigProfile) {
        let mut profiles = self.profiles.write().await;
        profiles.insert(device_id.into(), profile);
    }
}

impl Default for InMemoryDeviceConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceConfigRepository for InMemoryDeviceConfigRepository {
    async fn resolve_device_config(
        &self,
        device_id: &str,
    ) -> DomainResult<Option<DeviceConfigProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(device_id).cloned())
    }
}

/// In-memory implementation of `SensorEventRepository`.
pub struct InMemorySensorEventStore {
    events: RwLock<Vec<SensorEvent>>,
}

impl InMemorySensorEventStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of the appended events, in append order.
    pub async fn events(&self) -> Vec<SensorEvent> {
        let events = self.events.read().await;
        events.clone()
    }

    pub async fn len(&self) -> usize {
        let events = self.events.read().await;
        events.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemorySensorEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SensorEventRepository for InMemorySensorEventStore {
    async fn append_sensor_event(&self, event: NewSensorEvent) -> DomainResult<SensorEvent> {
        let stored = SensorEvent {
            device_id: event.device_id,
            in_count: event.in_count,
            out_count: event.out_count,
            rec_type: event.rec_type,
            battery_level: event.battery_level,
            batterytx_level: event.batterytx_level,
            warn_status: event.warn_status,
            signal_status: event.signal_status,
            time: Utc::now(),
        };
        let mut events = self.events.write().await;
        events.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> DeviceConfigProfile {
        DeviceConfigProfile {
            upload_interval: "00:05".to_string(),
            data_start_time: "08:00".to_string(),
            data_end_time: "20:00".to_string(),
            ret: 0,
        }
    }

    #[tokio::test]
    async fn resolves_inserted_profile() {
        let repo = InMemoryDeviceConfigRepository::new();
        repo.insert_profile("A1B2C3D4E5F6A", profile()).await;

        let resolved = repo.resolve_device_config("A1B2C3D4E5F6A").await.unwrap();
        assert_eq!(resolved, Some(profile()));
    }

    #[tokio::test]
    async fn unknown_device_resolves_to_none() {
        let repo = InMemoryDeviceConfigRepository::new();
        let resolved = repo.resolve_device_config("missing").await.unwrap();
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn appends_event_with_timestamp() {
        let store = InMemorySensorEventStore::new();
        let stored = store
            .append_sensor_event(NewSensorEvent {
                device_id: "A1B2C3D4E5F6A".to_string(),
                in_count: 3,
                out_count: 1,
                rec_type: "0".to_string(),
                battery_level: "90".to_string(),
                batterytx_level: "80".to_string(),
                warn_status: "0".to_string(),
                signal_status: "1".to_string(),
            })
            .await
            .unwrap();

        let events = store.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], stored);
        assert_eq!(events[0].in_count, 3);
    }
}
