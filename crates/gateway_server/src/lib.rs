pub mod config;
pub mod connection;
pub mod server;
pub mod telemetry;

// `self::` keeps the module from colliding with the `config` crate.
pub use self::config::*;
pub use connection::*;
pub use server::*;
pub use telemetry::*;
