// netpulse-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum NetpulseError {
    // --- DOMAIN (contract violations, arithmetic edge cases) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (DuckDB, IO, config) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),

    #[error("Unsafe path traversal detected: {0}")]
    UnsafePath(String),
}

impl From<std::io::Error> for NetpulseError {
    fn from(err: std::io::Error) -> Self {
        NetpulseError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for NetpulseError {
    fn from(err: duckdb::Error) -> Self {
        NetpulseError::Infrastructure(err.into())
    }
}
