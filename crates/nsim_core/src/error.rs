//! Error types shared by the simulation crates

use thiserror::Error;

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised at the boundaries of the simulation core.
///
/// All of these are precondition failures: the core never retries and
/// never recovers from them internally.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid mass: {0} (must be finite and > 0)")]
    InvalidMass(f64),

    #[error("Non-finite {field}: [{}, {}]", .value[0], .value[1])]
    NonFiniteVector { field: &'static str, value: [f64; 2] },

    #[error("Invalid retention depth: {0} (must be >= 1)")]
    InvalidRetentionDepth(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
