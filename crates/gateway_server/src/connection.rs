use crate::config::ServiceConfig;
use paxgate_protocol::{extract_payload, FrameDecoder, ProtocolError, SensorMessageService};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Legacy greeting written on every accept. Deployed firmware has only
/// ever connected to a server that sends it, so it stays.
const CONNECT_BANNER: &[u8] = b"Echo server\r\n";

/// Per-connection knobs, derived from `ServiceConfig`.
#[derive(Debug, Clone)]
pub struct ConnectionLimits {
    pub read_buffer_bytes: usize,
    pub max_frame_bytes: usize,
    pub idle_timeout: Duration,
    pub handler_timeout: Duration,
    pub write_timeout: Duration,
    pub send_banner: bool,
}

impl From<&ServiceConfig> for ConnectionLimits {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            read_buffer_bytes: config.read_buffer_bytes,
            max_frame_bytes: config.max_frame_bytes,
            idle_timeout: Duration::from_secs(config.idle_timeout_secs),
            handler_timeout: Duration::from_secs(config.handler_timeout_secs),
            write_timeout: Duration::from_secs(config.write_timeout_secs),
            send_banner: config.send_banner,
        }
    }
}

/// Run one sensor connection to completion.
///
/// Read loop → frame decode → handler dispatch → optional write-back.
/// Protocol errors are logged and the connection stays open; transport
/// errors, idle timeouts and write timeouts close it. Frames are handled
/// strictly in arrival order, one at a time.
#[instrument(skip_all, fields(peer = %peer))]
pub async fn run_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    service: Arc<SensorMessageService>,
    limits: ConnectionLimits,
    shutdown: CancellationToken,
) {
    debug!("connection opened");

    if limits.send_banner
        && let Err(e) = write_with_timeout(&mut stream, CONNECT_BANNER, limits.write_timeout).await
    {
        warn!(error = %e, "failed to send banner");
        return;
    }

    let mut decoder = FrameDecoder::new(limits.max_frame_bytes);
    let mut buf = vec![0u8; limits.read_buffer_bytes];

    loop {
        let read = tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("shutdown requested, closing connection");
                break;
            }
            read = timeout(limits.idle_timeout, stream.read(&mut buf)) => read,
        };

        let n = match read {
            Err(_) => {
                info!("idle timeout, closing connection");
                break;
            }
            Ok(Err(e)) => {
                warn!(error = %e, "read failed, closing connection");
                break;
            }
            Ok(Ok(0)) => {
                debug!("peer closed connection");
                break;
            }
            Ok(Ok(n)) => n,
        };

        decoder.extend(&buf[..n]);
        if !drain_frames(&mut stream, &mut decoder, &service, &limits).await {
            break;
        }
    }

    debug!("connection closed");
}

/// Handle every complete frame currently buffered. Returns `false` when the
/// connection must be torn down.
async fn drain_frames(
    stream: &mut TcpStream,
    decoder: &mut FrameDecoder,
    service: &SensorMessageService,
    limits: &ConnectionLimits,
) -> bool {
    loop {
        let frame = match decoder.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return true,
            Err(e) => {
                // Decoder discarded its buffer; scanning resumes with the
                // next read.
                warn!(error = %e, "frame decoding failed");
                continue;
            }
        };

        let payload = match extract_payload(&frame) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "dropping undecodable frame");
                continue;
            }
        };

        let handled = match timeout(limits.handler_timeout, service.handle_payload(payload)).await
        {
            Err(_) => {
                warn!("handler timed out, dropping frame");
                continue;
            }
            Ok(result) => result,
        };

        match handled {
            Ok(Some(response)) => {
                if let Err(e) = write_with_timeout(stream, &response, limits.write_timeout).await {
                    warn!(error = %e, "write failed, closing connection");
                    return false;
                }
            }
            Ok(None) => {}
            Err(ProtocolError::UnrecognizedMessageKind) => {
                debug!("unrecognized message kind, dropping frame");
            }
            Err(e) => {
                warn!(error = %e, "message handling failed");
            }
        }
    }
}

async fn write_with_timeout(
    stream: &mut TcpStream,
    bytes: &[u8],
    write_timeout: Duration,
) -> std::io::Result<()> {
    match timeout(write_timeout, stream.write_all(bytes)).await {
        Ok(result) => result,
        Err(_) => Err(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "write timed out",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_derive_from_config() {
        let config = ServiceConfig {
            log_level: "info".to_string(),
            listen_addr: "127.0.0.1:0".to_string(),
            read_buffer_bytes: 1024,
            max_frame_bytes: 2048,
            idle_timeout_secs: 30,
            handler_timeout_secs: 3,
            write_timeout_secs: 2,
            send_banner: false,
        };

        let limits = ConnectionLimits::from(&config);
        assert_eq!(limits.read_buffer_bytes, 1024);
        assert_eq!(limits.max_frame_bytes, 2048);
        assert_eq!(limits.idle_timeout, Duration::from_secs(30));
        assert_eq!(limits.handler_timeout, Duration::from_secs(3));
        assert_eq!(limits.write_timeout, Duration::from_secs(2));
        assert!(!limits.send_banner);
    }
}
