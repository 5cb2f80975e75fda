use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Invalid time range: {0}")]
    InvalidRange(String),
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("Invalid antenna pointing: {0}")]
    InvalidPointing(String),
    #[error("Propagation error: {0}")]
    Propagation(String),
    #[error("No satellite entered the antenna cone during the observation window")]
    EmptyResult,
}
