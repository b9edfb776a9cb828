use bevy::log::{debug, info};
use bevy::prelude::Resource;
use nsim_core::{Particle, ParticleId, SimConfig, SimError, SimResult, Snapshot};
use nsim_physics::diagnostics;
use nsim_physics::integrator::Integrator;
use nsim_physics::scenario::{self, Spawn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Simulation state with a bounded history of snapshots.
///
/// The last snapshot in the history is the current timestep: new particles
/// go there and `advance` clones it forward. Older snapshots are never
/// touched again and are dropped from the front once the history is full.
#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    /// Oldest first, newest last. Never empty.
    history: VecDeque<Snapshot>,
    retention_depth: usize,
    /// Next id to hand out. Never decreases, survives `reset`.
    next_id: u64,
    center_of_mass: [f64; 2],
    /// Number of completed `advance` calls since creation or reset
    step: u64,
}

impl Simulation {
    /// Empty simulation holding at most `retention_depth` snapshots
    pub fn new(retention_depth: usize) -> SimResult<Self> {
        if retention_depth < 1 {
            return Err(SimError::InvalidRetentionDepth(retention_depth));
        }

        let mut history = VecDeque::with_capacity(retention_depth + 1);
        history.push_back(Snapshot::new());

        Ok(Self {
            history,
            retention_depth,
            next_id: 0,
            center_of_mass: [0.0, 0.0],
            step: 0,
        })
    }

    /// Validate the config and seed the configured scenario
    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut sim = Self::new(config.retention_depth)?;
        sim.seed_scenario(config)?;
        Ok(sim)
    }

    /// Add the configured scenario's particles to the current snapshot
    pub fn seed_scenario(&mut self, config: &SimConfig) -> SimResult<Vec<ParticleId>> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let spawns = scenario::generate(&config.scenario, config.gravitational_constant, &mut rng);
        let ids = self.populate(&spawns)?;
        info!(
            "Seeded scenario '{}' with {} particles (seed {})",
            config.scenario.name(),
            ids.len(),
            config.seed
        );
        Ok(ids)
    }

    /// Add several particles. Stops at the first invalid one.
    pub fn populate(&mut self, spawns: &[Spawn]) -> SimResult<Vec<ParticleId>> {
        spawns
            .iter()
            .map(|s| self.add_particle(s.position, s.velocity, s.mass))
            .collect()
    }

    /// Create a particle in the current snapshot only.
    ///
    /// This is the spawn boundary: mass must be finite and strictly
    /// positive, position and velocity finite. Earlier snapshots are not
    /// touched, so the particle's trail starts here.
    pub fn add_particle(
        &mut self,
        position: [f64; 2],
        velocity: [f64; 2],
        mass: f64,
    ) -> SimResult<ParticleId> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass(mass));
        }
        check_finite("position", position)?;
        check_finite("velocity", velocity)?;

        let id = ParticleId(self.next_id);
        self.next_id += 1;

        self.current_mut()
            .insert(Particle::new(id, position, velocity, mass));
        self.update_center_of_mass();

        debug!(
            "Spawned particle {} at ({:.1}, {:.1}) with mass {}",
            id, position[0], position[1], mass
        );
        Ok(id)
    }

    /// Derive the next timestep from the current one.
    ///
    /// The current snapshot is cloned and the clone appended before the
    /// integrator runs, so the previous snapshot stays as it was.
    pub fn advance<I: Integrator + ?Sized>(&mut self, integrator: &I, timestep: f64) {
        let next = self.current_snapshot().clone();
        self.history.push_back(next);

        if self.history.len() > self.retention_depth {
            self.history.pop_front();
        }

        integrator.integrate(self.current_mut(), timestep);

        self.step += 1;
        self.update_center_of_mass();

        debug_assert!(!self.history.is_empty() && self.history.len() <= self.retention_depth);
    }

    /// Drop every particle and all history. Ids keep counting up.
    pub fn reset(&mut self) {
        self.history.clear();
        self.history.push_back(Snapshot::new());
        self.center_of_mass = [0.0, 0.0];
        self.step = 0;
        info!("Simulation reset (next id {})", self.next_id);
    }

    pub fn current_snapshot(&self) -> &Snapshot {
        // The history always holds at least one snapshot
        &self.history[self.history.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Snapshot {
        let last = self.history.len() - 1;
        &mut self.history[last]
    }

    /// Retained snapshots, oldest to newest
    pub fn history(&self) -> &VecDeque<Snapshot> {
        &self.history
    }

    /// Mass-weighted mean position of the current snapshot,
    /// or the origin when there are no particles
    pub fn center_of_mass(&self) -> [f64; 2] {
        self.center_of_mass
    }

    fn update_center_of_mass(&mut self) {
        self.center_of_mass = diagnostics::center_of_mass(self.current_snapshot());
    }

    /// Positions of one particle, newest first, back to the oldest
    /// retained snapshot or the particle's creation, whichever is later
    pub fn trail(&self, id: ParticleId) -> Vec<[f64; 2]> {
        self.history
            .iter()
            .rev()
            .map_while(|snapshot| snapshot.get(id).map(|p| p.position))
            .collect()
    }

    pub fn particle_count(&self) -> usize {
        self.current_snapshot().len()
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn retention_depth(&self) -> usize {
        self.retention_depth
    }

    pub fn next_id(&self) -> ParticleId {
        ParticleId(self.next_id)
    }
}

fn check_finite(field: &'static str, value: [f64; 2]) -> SimResult<()> {
    if value[0].is_finite() && value[1].is_finite() {
        Ok(())
    } else {
        Err(SimError::NonFiniteVector { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsim_physics::forces::AllPairs;
    use nsim_physics::integrator::{Euler, Leapfrog};

    fn euler() -> Euler<AllPairs> {
        Euler::new(AllPairs::new(10.0, 5.0))
    }

    #[test]
    fn test_new_has_one_empty_snapshot() {
        let sim = Simulation::new(100).unwrap();
        assert_eq!(sim.history().len(), 1);
        assert!(sim.current_snapshot().is_empty());
        assert_eq!(sim.center_of_mass(), [0.0, 0.0]);
        assert_eq!(sim.step(), 0);
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(matches!(
            Simulation::new(0),
            Err(SimError::InvalidRetentionDepth(0))
        ));
    }

    #[test]
    fn test_invalid_spawns_rejected() {
        let mut sim = Simulation::new(10).unwrap();
        assert!(matches!(
            sim.add_particle([0.0, 0.0], [0.0, 0.0], 0.0),
            Err(SimError::InvalidMass(_))
        ));
        assert!(sim.add_particle([0.0, 0.0], [0.0, 0.0], -3.0).is_err());
        assert!(sim.add_particle([0.0, 0.0], [0.0, 0.0], f64::NAN).is_err());
        assert!(matches!(
            sim.add_particle([f64::INFINITY, 0.0], [0.0, 0.0], 1.0),
            Err(SimError::NonFiniteVector { field: "position", .. })
        ));
        assert!(matches!(
            sim.add_particle([0.0, 0.0], [0.0, f64::NAN], 1.0),
            Err(SimError::NonFiniteVector { field: "velocity", .. })
        ));
        // Rejected spawns do not consume ids
        assert_eq!(sim.next_id(), ParticleId(0));
        assert_eq!(sim.particle_count(), 0);
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut sim = Simulation::new(10).unwrap();
        let a = sim.add_particle([0.0, 0.0], [0.0, 0.0], 1.0).unwrap();
        let b = sim.add_particle([1.0, 0.0], [0.0, 0.0], 1.0).unwrap();
        assert_eq!(a, ParticleId(0));
        assert_eq!(b, ParticleId(1));
    }

    #[test]
    fn test_add_only_touches_current_snapshot() {
        let mut sim = Simulation::new(10).unwrap();
        sim.add_particle([0.0, 0.0], [0.0, 0.0], 10.0).unwrap();
        sim.advance(&euler(), 1.0);
        sim.advance(&euler(), 1.0);
        let before: Vec<Snapshot> = sim.history().iter().take(2).cloned().collect();

        let id = sim.add_particle([50.0, 0.0], [0.0, 0.0], 10.0).unwrap();

        assert_eq!(sim.history().len(), 3);
        assert!(sim.current_snapshot().contains(id));
        for (old, kept) in before.iter().zip(sim.history().iter()) {
            assert_eq!(old, kept);
            assert!(!kept.contains(id));
        }
    }

    #[test]
    fn test_advance_leaves_previous_snapshot_untouched() {
        let mut sim = Simulation::new(10).unwrap();
        sim.add_particle([0.0, 0.0], [0.0, 0.0], 100.0).unwrap();
        sim.add_particle([-200.0, 0.0], [0.0, -2.3], 10.0).unwrap();
        let before = sim.current_snapshot().clone();

        sim.advance(&euler(), 1.0);

        assert_eq!(sim.history().len(), 2);
        assert_eq!(sim.history()[0], before);
        assert_ne!(sim.history()[1], before);
        assert!(sim.history()[0].iter().all(|p| p.acceleration.is_none()));
    }

    #[test]
    fn test_history_is_bounded() {
        let depth = 5;
        let mut sim = Simulation::new(depth).unwrap();
        sim.add_particle([0.0, 0.0], [1.0, 0.0], 1.0).unwrap();

        for step in 1..=20 {
            sim.advance(&euler(), 1.0);
            assert!(sim.history().len() >= 1 && sim.history().len() <= depth);
            assert_eq!(sim.history().len(), (step + 1).min(depth));
        }
        // Oldest retained snapshot is depth - 1 steps behind
        let oldest = sim.history()[0].get(ParticleId(0)).unwrap().position;
        let newest = sim.current_snapshot().get(ParticleId(0)).unwrap().position;
        assert!((newest[0] - oldest[0] - (depth as f64 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_depth_one_keeps_only_current() {
        let mut sim = Simulation::new(1).unwrap();
        let id = sim.add_particle([0.0, 0.0], [2.0, 0.0], 1.0).unwrap();
        sim.advance(&euler(), 1.0);
        sim.advance(&euler(), 1.0);
        assert_eq!(sim.history().len(), 1);
        assert_eq!(sim.current_snapshot().get(id).unwrap().position, [4.0, 0.0]);
        assert_eq!(sim.trail(id), vec![[4.0, 0.0]]);
    }

    #[test]
    fn test_trail_stops_at_birth() {
        let mut sim = Simulation::new(50).unwrap();
        let old = sim.add_particle([0.0, 0.0], [1.0, 0.0], 1.0).unwrap();
        for _ in 0..3 {
            sim.advance(&euler(), 1.0);
        }
        let young = sim.add_particle([0.0, 100.0], [0.0, 0.0], 1.0).unwrap();
        sim.advance(&euler(), 1.0);

        assert_eq!(sim.trail(old).len(), 5);
        assert_eq!(sim.trail(young).len(), 2);
        assert_eq!(sim.trail(young)[1], [0.0, 100.0]);
        assert!(sim.trail(ParticleId(99)).is_empty());
    }

    #[test]
    fn test_center_of_mass_tracks_spawns() {
        let mut sim = Simulation::new(10).unwrap();
        sim.add_particle([10.0, 0.0], [0.0, 0.0], 1.0).unwrap();
        assert_eq!(sim.center_of_mass(), [10.0, 0.0]);
        sim.add_particle([-10.0, 20.0], [0.0, 0.0], 1.0).unwrap();
        assert_eq!(sim.center_of_mass(), [0.0, 10.0]);
    }

    #[test]
    fn test_symmetric_pair_center_stays_at_origin() {
        let mut sim = Simulation::new(30).unwrap();
        sim.add_particle([-100.0, 0.0], [0.0, 1.0], 50.0).unwrap();
        sim.add_particle([100.0, 0.0], [0.0, -1.0], 50.0).unwrap();

        let leapfrog = Leapfrog::new(AllPairs::new(10.0, 5.0));
        for _ in 0..200 {
            sim.advance(&leapfrog, 1.0);
            let com = sim.center_of_mass();
            assert!(com[0].abs() < 1e-9 && com[1].abs() < 1e-9, "{com:?}");
        }
    }

    #[test]
    fn test_reset_keeps_ids_monotonic() {
        let mut sim = Simulation::new(10).unwrap();
        sim.add_particle([0.0, 0.0], [0.0, 0.0], 1.0).unwrap();
        sim.advance(&euler(), 1.0);
        sim.reset();

        assert_eq!(sim.history().len(), 1);
        assert_eq!(sim.particle_count(), 0);
        assert_eq!(sim.step(), 0);
        assert_eq!(sim.center_of_mass(), [0.0, 0.0]);
        let id = sim.add_particle([0.0, 0.0], [0.0, 0.0], 1.0).unwrap();
        assert_eq!(id, ParticleId(1));
    }

    #[test]
    fn test_from_config_seeds_scenario() {
        let sim = Simulation::from_config(&SimConfig::default()).unwrap();
        assert_eq!(sim.particle_count(), 2);
        assert_eq!(sim.retention_depth(), 100);

        let bad = SimConfig {
            retention_depth: 0,
            ..SimConfig::default()
        };
        assert!(Simulation::from_config(&bad).is_err());
    }

    #[test]
    fn test_empty_advance() {
        let mut sim = Simulation::new(3).unwrap();
        sim.advance(&euler(), 1.0);
        assert_eq!(sim.history().len(), 2);
        assert_eq!(sim.center_of_mass(), [0.0, 0.0]);
        assert_eq!(sim.step(), 1);
    }
}
