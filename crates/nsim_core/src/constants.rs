// Simulation units are abstract: one length unit renders as one pixel at
// zoom 1.0, one time unit is one simulated frame.

/// Gravitational constant in simulation units
pub const G: f64 = 10.0;

/// Softening length added in quadrature to every pair distance
pub const SOFTENING: f64 = 5.0;

/// Number of snapshots kept in the history ring
pub const HISTORY_DEPTH: usize = 100;

/// Time step per simulated frame
pub const DT: f64 = 1.0;

/// Mass given to particles spawned from the viewer
pub const SPAWN_MASS: f64 = 10.0;

/// Default seed for scenario generation
pub const DEFAULT_SEED: u64 = 42;

/// Window defaults
pub const WINDOW_TITLE: &str = "nsim";
pub const WINDOW_WIDTH: u32 = 1600;
pub const WINDOW_HEIGHT: u32 = 900;
pub const WINDOW_REFRESH_RATE: u32 = 60;
