pub mod pipeline;
pub mod simulation;

pub use pipeline::{SimulationDriver, SimulationPlugin};
pub use simulation::Simulation;
