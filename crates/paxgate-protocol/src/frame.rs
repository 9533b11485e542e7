use crate::error::{ProtocolError, ProtocolResult};

/// Marker bytes delimiting every frame on the wire.
pub const HEAD_MARKER: [u8; 3] = [0xFA, 0xF5, 0xF6];
pub const FOOT_MARKER: [u8; 3] = [0xFA, 0xF6, 0xF5];

/// Smallest valid frame: head marker + foot marker, empty payload.
pub const MIN_FRAME_LEN: usize = HEAD_MARKER.len() + FOOT_MARKER.len();

/// Extract the text payload from a complete frame.
///
/// The head marker occupies the first 3 bytes and the foot marker the last
/// 3; everything between is the payload. Marker scanning and
/// resynchronization live in [`crate::FrameDecoder`], which hands complete
/// frames to this function.
pub fn extract_payload(frame: &[u8]) -> ProtocolResult<&str> {
    if frame.len() < MIN_FRAME_LEN {
        return Err(ProtocolError::FrameTooShort {
            expected: MIN_FRAME_LEN,
            actual: frame.len(),
        });
    }
    let payload = &frame[HEAD_MARKER.len()..frame.len() - FOOT_MARKER.len()];
    Ok(std::str::from_utf8(payload)?)
}

/// Wrap a payload with the head and foot markers.
pub fn wrap_payload(payload: &str) -> Vec<u8> {
    let mut frame = Vec::with_capacity(MIN_FRAME_LEN + payload.len());
    frame.extend_from_slice(&HEAD_MARKER);
    frame.extend_from_slice(payload.as_bytes());
    frame.extend_from_slice(&FOOT_MARKER);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_round_trips_wrap() {
        let payload = "<TIME_SYSNC_REQ><uuid>A1B2C3D4E5F6A</uuid></TIME_SYSNC_REQ>";
        let frame = wrap_payload(payload);
        assert_eq!(extract_payload(&frame).unwrap(), payload);
    }

    #[test]
    fn minimum_frame_has_empty_payload() {
        let frame = wrap_payload("");
        assert_eq!(frame.len(), MIN_FRAME_LEN);
        assert_eq!(extract_payload(&frame).unwrap(), "");
    }

    #[test]
    fn short_frame_is_rejected() {
        let err = extract_payload(&[0xFA, 0xF5, 0xF6, 0xFA, 0xF6]).unwrap_err();
        match err {
            ProtocolError::FrameTooShort { expected, actual } => {
                assert_eq!(expected, MIN_FRAME_LEN);
                assert_eq!(actual, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_utf8_payload_is_rejected() {
        let mut frame = Vec::new();
        frame.extend_from_slice(&HEAD_MARKER);
        frame.extend_from_slice(&[0xFF, 0xFE]);
        frame.extend_from_slice(&FOOT_MARKER);
        assert!(matches!(
            extract_payload(&frame),
            Err(ProtocolError::InvalidEncoding(_))
        ));
    }
}
