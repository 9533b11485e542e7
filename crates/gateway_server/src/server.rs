use crate::config::ServiceConfig;
use crate::connection::{run_connection, ConnectionLimits};
use anyhow::Context;
use paxgate_protocol::SensorMessageService;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// TCP front door for sensor connections.
///
/// Accept loop spawning one task per connection; connections share nothing
/// but the message service. Cancelling the shutdown token stops accepting
/// and lets in-flight connections drain.
pub struct GatewayServer {
    listener: TcpListener,
    service: Arc<SensorMessageService>,
    limits: ConnectionLimits,
}

impl GatewayServer {
    pub async fn bind(
        config: &ServiceConfig,
        service: Arc<SensorMessageService>,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)
            .await
            .with_context(|| format!("failed to bind {}", config.listen_addr))?;
        info!(addr = %listener.local_addr()?, "sensor gateway listening");

        Ok(Self {
            listener,
            service,
            limits: ConnectionLimits::from(config),
        })
    }

    /// Actual bound address; useful when configured with port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn run(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let mut connections = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("shutdown requested, stopping accept loop");
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            connections.spawn(run_connection(
                                stream,
                                peer,
                                Arc::clone(&self.service),
                                self.limits.clone(),
                                shutdown.child_token(),
                            ));
                        }
                        Err(e) => {
                            warn!(error = %e, "accept failed");
                        }
                    }
                }
            }

            // Reap finished connection tasks without blocking the accept loop.
            while let Some(result) = connections.try_join_next() {
                if let Err(e) = result {
                    warn!(error = %e, "connection task panicked");
                }
            }
        }

        // Child tokens are cancelled with the shutdown token; wait for
        // in-flight connections to finish their current frame.
        while let Some(result) = connections.join_next().await {
            if let Err(e) = result {
                warn!(error = %e, "connection task panicked");
            }
        }

        Ok(())
    }
}
