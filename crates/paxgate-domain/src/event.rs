use crate::result::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One accepted people-counting report from a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorEvent {
    pub device_id: String,
    pub in_count: i64,
    pub out_count: i64,
    pub rec_type: String,
    pub battery_level: String,
    pub batterytx_level: String,
    pub warn_status: String,
    pub signal_status: String,
    /// Stamped by the store at append time.
    pub time: DateTime<Utc>,
}

/// Input for appending a sensor event (no timestamp yet).
///
/// Counts are parsed integers; the remaining status fields stay as the raw
/// tag values the firmware sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSensorEvent {
    pub device_id: String,
    pub in_count: i64,
    pub out_count: i64,
    pub rec_type: String,
    pub battery_level: String,
    pub batterytx_level: String,
    pub warn_status: String,
    pub signal_status: String,
}

/// Append-only persistence for sensor events.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SensorEventRepository: Send + Sync {
    /// Append one event; returns the stored record with its timestamp.
    async fn append_sensor_event(&self, event: NewSensorEvent) -> DomainResult<SensorEvent>;
}
