use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// Stable particle handle. Assigned once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub u64);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point mass at one timestep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: ParticleId,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    /// Always finite and > 0
    pub mass: f64,
    /// Acceleration from the last integration, None before the first one
    pub acceleration: Option<[f64; 2]>,
}

impl Particle {
    pub fn new(id: ParticleId, position: [f64; 2], velocity: [f64; 2], mass: f64) -> Self {
        Self {
            id,
            position,
            velocity,
            mass,
            acceleration: None,
        }
    }

    pub fn momentum(&self) -> [f64; 2] {
        [self.mass * self.velocity[0], self.mass * self.velocity[1]]
    }

    pub fn speed(&self) -> f64 {
        (self.velocity[0] * self.velocity[0] + self.velocity[1] * self.velocity[1]).sqrt()
    }
}

/// Complete simulated state at one timestep, keyed by particle id.
/// Iteration is in ascending id order, which is also creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    particles: BTreeMap<ParticleId, Particle>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a particle under its own id, returning any particle it replaced
    pub fn insert(&mut self, particle: Particle) -> Option<Particle> {
        self.particles.insert(particle.id, particle)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(&id)
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.particles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.particles.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Values<'_, ParticleId, Particle> {
        self.particles.values()
    }

    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, ParticleId, Particle> {
        self.particles.values_mut()
    }

    pub fn total_mass(&self) -> f64 {
        self.iter().map(|p| p.mass).sum()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Particle;
    type IntoIter = btree_map::Values<'a, ParticleId, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
