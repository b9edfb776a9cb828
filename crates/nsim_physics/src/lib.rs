pub mod diagnostics;
pub mod forces;
pub mod integrator;
pub mod scenario;

pub use diagnostics::Diagnostics;
pub use forces::{AllPairs, ForceModel};
pub use integrator::{Euler, Integrator, Leapfrog};
pub use scenario::Spawn;
