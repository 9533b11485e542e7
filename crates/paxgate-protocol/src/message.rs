/// Keyword the firmware embeds in count-report payloads.
pub const SENSOR_DATA_KEYWORD: &str = "UP_SENSOR_DATA_REQ";
/// Keyword for time-sync requests. `SYSNC` is the firmware's spelling; it
/// is a wire constant, not a typo to correct.
pub const TIME_SYNC_KEYWORD: &str = "TIME_SYSNC_REQ";
/// Root element wrapping time-sync response payloads.
pub const TIME_SYNC_RESPONSE_ROOT: &str = "TIME_SYSNC_RES";

/// Semantic type of an inbound message, decided by a keyword substring
/// anywhere in the payload rather than by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    SensorDataReport,
    TimeSyncRequest,
    Unknown,
}

impl MessageKind {
    pub fn classify(payload: &str) -> Self {
        if payload.contains(SENSOR_DATA_KEYWORD) {
            MessageKind::SensorDataReport
        } else if payload.contains(TIME_SYNC_KEYWORD) {
            MessageKind::TimeSyncRequest
        } else {
            MessageKind::Unknown
        }
    }
}
