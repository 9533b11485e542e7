use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// TCP listen address for sensor connections
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Size of the per-connection read buffer in bytes
    #[serde(default = "default_read_buffer_bytes")]
    pub read_buffer_bytes: usize,

    /// Upper bound on a single frame; bounds decoder buffer growth
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    /// Close a connection after this many seconds without inbound data
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Bound on device lookup / event append per message, in seconds
    #[serde(default = "default_handler_timeout_secs")]
    pub handler_timeout_secs: u64,

    /// Bound on socket writes, in seconds
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,

    /// Emit the legacy connect banner the deployed firmware has always seen
    #[serde(default = "default_send_banner")]
    pub send_banner: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:7070".to_string()
}

fn default_read_buffer_bytes() -> usize {
    4096
}

fn default_max_frame_bytes() -> usize {
    8192
}

fn default_idle_timeout_secs() -> u64 {
    300
}

fn default_handler_timeout_secs() -> u64 {
    10
}

fn default_write_timeout_secs() -> u64 {
    5
}

fn default_send_banner() -> bool {
    true
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("PAXGATE"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure tests run serially and don't interfere with each other
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let _lock = TEST_LOCK.lock().unwrap();

        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::remove_var("PAXGATE_LISTEN_ADDR");
        }

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.listen_addr, "0.0.0.0:7070");
        assert_eq!(config.max_frame_bytes, 8192);
        assert!(config.send_banner);
    }

    #[test]
    fn test_env_override() {
        let _lock = TEST_LOCK.lock().unwrap();

        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::set_var("PAXGATE_LISTEN_ADDR", "127.0.0.1:9999");
        }

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:9999");

        // Clean up
        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::remove_var("PAXGATE_LISTEN_ADDR");
        }
    }
}
