use nsim_core::{Particle, Snapshot};

/// Computes the instantaneous acceleration of one particle against a
/// particle set. Implementations must skip the target by id.
pub trait ForceModel: Send + Sync {
    fn acceleration(&self, target: &Particle, particles: &Snapshot) -> [f64; 2];
}

/// Direct O(n²) summation of softened Newtonian gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllPairs {
    pub gravitational_constant: f64,
    pub softening_length: f64,
}

impl AllPairs {
    pub fn new(gravitational_constant: f64, softening_length: f64) -> Self {
        Self {
            gravitational_constant,
            softening_length,
        }
    }

    /// Softened distance between two positions
    pub fn softened_distance(&self, pos_i: [f64; 2], pos_j: [f64; 2]) -> f64 {
        let dx = pos_j[0] - pos_i[0];
        let dy = pos_j[1] - pos_i[1];
        (dx * dx + dy * dy + self.softening_length * self.softening_length).sqrt()
    }

    /// Acceleration on a body at `pos_i` due to mass `mass_j` at `pos_j`
    pub fn pairwise(&self, pos_i: [f64; 2], pos_j: [f64; 2], mass_j: f64) -> [f64; 2] {
        let dx = pos_j[0] - pos_i[0];
        let dy = pos_j[1] - pos_i[1];

        // Softening goes in before the division so the direction stays
        // well defined when the pair coincides.
        let dist = self.softened_distance(pos_i, pos_j);
        let accel = self.gravitational_constant * mass_j / (dist * dist);

        [accel * dx / dist, accel * dy / dist]
    }
}

impl ForceModel for AllPairs {
    fn acceleration(&self, target: &Particle, particles: &Snapshot) -> [f64; 2] {
        let mut sum = [0.0f64; 2];

        for other in particles {
            if other.id == target.id {
                continue;
            }
            let a = self.pairwise(target.position, other.position, other.mass);
            sum[0] += a[0];
            sum[1] += a[1];
        }

        sum
    }
}
