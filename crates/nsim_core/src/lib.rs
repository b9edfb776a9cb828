pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{DisplayConfig, IntegratorKind, Scenario, SimConfig};
pub use constants::*;
pub use error::{SimError, SimResult};
pub use types::*;
