use crate::error::{ProtocolError, ProtocolResult};
use crate::frame::{FOOT_MARKER, HEAD_MARKER};
use bytes::{Buf, BytesMut};

pub const DEFAULT_MAX_FRAME_BYTES: usize = 8192;

/// Incremental frame scanner over a continuous byte stream.
///
/// Reads are not frame-aligned: one read may carry a partial frame or
/// several frames at once. The decoder discards bytes preceding a head
/// marker, accumulates until the foot marker arrives, and yields complete
/// frames (markers included). Buffer growth is bounded by
/// `max_frame_bytes`; an oversized frame clears the buffer so scanning can
/// resume with the next marker.
#[derive(Debug)]
pub struct FrameDecoder {
    buf: BytesMut,
    max_frame_bytes: usize,
}

impl FrameDecoder {
    pub fn new(max_frame_bytes: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            max_frame_bytes,
        }
    }

    /// Feed freshly read bytes into the scanner.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pop the next complete frame, if one is buffered.
    ///
    /// Call repeatedly after each [`extend`](Self::extend) until it returns
    /// `Ok(None)`. `FrameTooLarge` discards the buffered bytes; the decoder
    /// stays usable.
    pub fn next_frame(&mut self) -> ProtocolResult<Option<Vec<u8>>> {
        match find(&self.buf, &HEAD_MARKER) {
            Some(start) if start > 0 => self.buf.advance(start),
            Some(_) => {}
            None => {
                // No head marker yet; keep only a possible marker prefix at
                // the tail so garbage cannot accumulate.
                let keep = HEAD_MARKER.len() - 1;
                if self.buf.len() > keep {
                    let discard = self.buf.len() - keep;
                    self.buf.advance(discard);
                }
                return Ok(None);
            }
        }

        let search_from = HEAD_MARKER.len();
        match find(&self.buf[search_from..], &FOOT_MARKER) {
            Some(offset) => {
                let end = search_from + offset + FOOT_MARKER.len();
                let frame = self.buf.split_to(end);
                Ok(Some(frame.to_vec()))
            }
            None if self.buf.len() > self.max_frame_bytes => {
                self.buf.clear();
                Err(ProtocolError::FrameTooLarge {
                    max: self.max_frame_bytes,
                })
            }
            None => Ok(None),
        }
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_BYTES)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
