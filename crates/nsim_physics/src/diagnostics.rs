use nsim_core::Snapshot;

use crate::forces::AllPairs;

/// Aggregate quantities of one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Diagnostics {
    pub particle_count: usize,
    pub total_mass: f64,
    pub center_of_mass: [f64; 2],
    pub momentum: [f64; 2],
    pub kinetic_energy: f64,
    pub potential_energy: f64,
}

impl Diagnostics {
    pub fn measure(snapshot: &Snapshot, model: &AllPairs) -> Self {
        Self {
            particle_count: snapshot.len(),
            total_mass: snapshot.total_mass(),
            center_of_mass: center_of_mass(snapshot),
            momentum: total_momentum(snapshot),
            kinetic_energy: kinetic_energy(snapshot),
            potential_energy: potential_energy(snapshot, model),
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }

    pub fn momentum_magnitude(&self) -> f64 {
        (self.momentum[0] * self.momentum[0] + self.momentum[1] * self.momentum[1]).sqrt()
    }
}

/// Mass-weighted mean position. Returns the origin for an empty snapshot.
pub fn center_of_mass(snapshot: &Snapshot) -> [f64; 2] {
    let mut mass_sum = 0.0f64;
    let mut position_sum = [0.0f64; 2];

    for p in snapshot {
        mass_sum += p.mass;
        position_sum[0] += p.position[0] * p.mass;
        position_sum[1] += p.position[1] * p.mass;
    }

    if mass_sum <= 0.0 {
        return [0.0, 0.0];
    }

    [position_sum[0] / mass_sum, position_sum[1] / mass_sum]
}

pub fn total_momentum(snapshot: &Snapshot) -> [f64; 2] {
    snapshot.iter().fold([0.0, 0.0], |acc, p| {
        let m = p.momentum();
        [acc[0] + m[0], acc[1] + m[1]]
    })
}

pub fn kinetic_energy(snapshot: &Snapshot) -> f64 {
    snapshot
        .iter()
        .map(|p| {
            let v2 = p.velocity[0] * p.velocity[0] + p.velocity[1] * p.velocity[1];
            0.5 * p.mass * v2
        })
        .sum()
}

/// Softened pairwise potential, -G m_i m_j / sqrt(r² + s²), each pair once
pub fn potential_energy(snapshot: &Snapshot, model: &AllPairs) -> f64 {
    let particles: Vec<_> = snapshot.iter().collect();
    let mut energy = 0.0f64;

    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            let dist = model.softened_distance(a.position, b.position);
            energy -= model.gravitational_constant * a.mass * b.mass / dist;
        }
    }

    energy
}
