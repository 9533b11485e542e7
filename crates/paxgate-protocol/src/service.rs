use crate::encoder::encode_response;
use crate::error::{ProtocolError, ProtocolResult};
use crate::frame::wrap_payload;
use crate::message::{MessageKind, TIME_SYNC_RESPONSE_ROOT};
use crate::tag::tag_value;
use chrono::Local;
use paxgate_domain::{DeviceConfigRepository, NewSensorEvent, SensorEventRepository};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Wall-clock format the firmware expects in the `time` tag, always 14
/// digits.
const TIME_TAG_FORMAT: &str = "%Y%m%d%H%M%S";

/// Domain service handling one decoded frame payload end to end:
/// classification, tag parsing, and the per-kind handler.
///
/// Count reports are fire-and-forget appends through
/// `SensorEventRepository`; time-sync requests resolve the device's
/// configuration profile and produce the framed response bytes. Both
/// collaborators are injected, so the service is unit-testable without a
/// live store.
pub struct SensorMessageService {
    device_configs: Arc<dyn DeviceConfigRepository>,
    sensor_events: Arc<dyn SensorEventRepository>,
}

impl SensorMessageService {
    pub fn new(
        device_configs: Arc<dyn DeviceConfigRepository>,
        sensor_events: Arc<dyn SensorEventRepository>,
    ) -> Self {
        Self {
            device_configs,
            sensor_events,
        }
    }

    /// Handle one payload; returns framed response bytes when the message
    /// kind calls for a reply.
    #[instrument(skip_all, fields(payload_len = payload.len()))]
    pub async fn handle_payload(&self, payload: &str) -> ProtocolResult<Option<Vec<u8>>> {
        match MessageKind::classify(payload) {
            MessageKind::SensorDataReport => {
                self.handle_sensor_data(payload).await?;
                Ok(None)
            }
            MessageKind::TimeSyncRequest => Ok(Some(self.handle_time_sync(payload).await?)),
            MessageKind::Unknown => Err(ProtocolError::UnrecognizedMessageKind),
        }
    }

    async fn handle_sensor_data(&self, payload: &str) -> ProtocolResult<()> {
        let device_id = required_tag(payload, "uuid")?;
        let in_count = required_count(payload, "in")?;
        let out_count = required_count(payload, "out")?;
        let battery_level = required_tag(payload, "battery_level")?;
        let rec_type = required_tag(payload, "rec_type")?;
        // The deployed firmware sends warn/signal swapped relative to the
        // stored field names. Preserved as wired until firmware docs settle
        // which side is authoritative.
        let signal_status = required_tag(payload, "warn_status")?;
        let batterytx_level = required_tag(payload, "batterytx_level")?;
        let warn_status = required_tag(payload, "signal_status")?;

        if in_count == 0 && out_count == 0 {
            debug!(device_id, "zero-count report, nothing to persist");
            return Ok(());
        }

        self.sensor_events
            .append_sensor_event(NewSensorEvent {
                device_id: device_id.to_string(),
                in_count,
                out_count,
                rec_type: rec_type.to_string(),
                battery_level: battery_level.to_string(),
                batterytx_level: batterytx_level.to_string(),
                warn_status: warn_status.to_string(),
                signal_status: signal_status.to_string(),
            })
            .await?;

        debug!(device_id, in_count, out_count, "appended sensor event");
        Ok(())
    }

    async fn handle_time_sync(&self, payload: &str) -> ProtocolResult<Vec<u8>> {
        let device_id = tag_value(payload, "uuid")?;

        let profile = self
            .device_configs
            .resolve_device_config(device_id)
            .await?
            .ok_or_else(|| ProtocolError::UnknownDevice(device_id.to_string()))?;

        let ret = profile.ret.to_string();
        let time = Local::now().format(TIME_TAG_FORMAT).to_string();
        let response = encode_response(
            TIME_SYNC_RESPONSE_ROOT,
            &[
                ("uuid", device_id),
                ("ret", &ret),
                ("time", &time),
                ("uploadInterval", &military_time(&profile.upload_interval)),
                ("dataStartTime", &military_time(&profile.data_start_time)),
                ("dataEndTime", &military_time(&profile.data_end_time)),
            ],
        );

        debug!(device_id, "time sync response ready");
        Ok(wrap_payload(&response))
    }
}

/// `HH:MM` → `HHMM`, the military-time form the firmware expects.
fn military_time(value: &str) -> String {
    value.replace(':', "")
}

fn required_tag<'a>(payload: &'a str, name: &str) -> ProtocolResult<&'a str> {
    tag_value(payload, name)
        .map_err(|_| ProtocolError::MalformedSensorReport(format!("missing tag {name}")))
}

fn required_count(payload: &str, name: &str) -> ProtocolResult<i64> {
    let raw = required_tag(payload, name)?;
    raw.trim().parse().map_err(|_| {
        ProtocolError::MalformedSensorReport(format!("non-numeric {name} count: {raw:?}"))
    })
}
