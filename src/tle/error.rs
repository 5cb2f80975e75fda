use thiserror::Error;

use crate::solver::SolverError;

#[derive(Debug, Error)]
pub enum TleError {
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Invalid TLE record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}

impl From<TleError> for SolverError {
    fn from(err: TleError) -> Self {
        SolverError::Propagation(err.to_string())
    }
}
