use gateway_server::{init_telemetry, GatewayServer, ServiceConfig};
use paxgate_domain::{InMemoryDeviceConfigRepository, InMemorySensorEventStore};
use paxgate_protocol::SensorMessageService;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_telemetry(&config.log_level);
    info!(listen_addr = %config.listen_addr, "starting paxgate gateway");

    // The admin service owns durable persistence and device registration;
    // both collaborators are injected. The in-memory implementations make
    // the gateway runnable standalone.
    let device_configs = Arc::new(InMemoryDeviceConfigRepository::new());
    let sensor_events = Arc::new(InMemorySensorEventStore::new());
    let service = Arc::new(SensorMessageService::new(device_configs, sensor_events));

    let shutdown = CancellationToken::new();

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received shutdown signal");
                signal_token.cancel();
            }
            Err(err) => {
                error!("error setting up signal handler: {err}");
            }
        }
    });

    #[cfg(unix)]
    {
        let sigterm_token = shutdown.clone();
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                    info!("received SIGTERM signal");
                    sigterm_token.cancel();
                }
                Err(err) => {
                    error!("error setting up SIGTERM handler: {err}");
                }
            }
        });
    }

    let server = match GatewayServer::bind(&config, service).await {
        Ok(server) => server,
        Err(e) => {
            error!("failed to start gateway: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run(shutdown).await {
        error!("gateway error: {e:#}");
        std::process::exit(1);
    }

    info!("gateway stopped");
}
