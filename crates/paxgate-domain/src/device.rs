use crate::result::DomainResult;
use async_trait::async_trait;

/// Server-held reporting configuration for one counting device.
///
/// `upload_interval`, `data_start_time` and `data_end_time` are `HH:MM`
/// strings as the admin service stores them; the protocol layer reformats
/// them for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfigProfile {
    pub upload_interval: String,
    pub data_start_time: String,
    pub data_end_time: String,
    /// Result code echoed back to the device in time-sync responses.
    pub ret: i32,
}

/// Read-only lookup of a device's configuration profile.
///
/// The admin service owns device registration and profile assignment; the
/// gateway only resolves profiles by device identifier.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DeviceConfigRepository: Send + Sync {
    /// Resolve the configuration profile for a device, `None` when the
    /// device is not registered.
    async fn resolve_device_config(
        &self,
        device_id: &str,
    ) -> DomainResult<Option<DeviceConfigProfile>>;
}
