use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Device config store error: {0}")]
    DeviceConfigStore(String),

    #[error("Sensor event store error: {0}")]
    SensorEventStore(String),
}
