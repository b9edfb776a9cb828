use bevy::prelude::*;
use nsim_core::{SimConfig, SimResult};
use nsim_physics::forces::AllPairs;
use nsim_physics::integrator::{self, Integrator};

use super::simulation::Simulation;

/// Step settings and the integration strategy, tracked as a Bevy Resource
#[derive(Resource)]
pub struct SimulationDriver {
    pub integrator: Box<dyn Integrator>,
    /// Force model the integrator was built around (also used for energy)
    pub force: AllPairs,
    pub timestep: f64,
    pub paused: bool,
    /// Config the simulation was seeded from, kept for resets
    pub config: SimConfig,
}

impl SimulationDriver {
    pub fn new(config: SimConfig) -> Self {
        let force = AllPairs::new(config.gravitational_constant, config.softening_length);
        Self {
            integrator: integrator::build(config.integrator, force),
            force,
            timestep: config.timestep,
            paused: false,
            config,
        }
    }

    /// Advance one frame unless paused
    pub fn step(&self, sim: &mut Simulation) {
        if self.paused {
            return;
        }
        sim.advance(self.integrator.as_ref(), self.timestep);
    }

    /// Clear the simulation and seed the configured scenario again
    pub fn reset(&self, sim: &mut Simulation) -> SimResult<()> {
        sim.reset();
        sim.seed_scenario(&self.config)?;
        Ok(())
    }
}

/// Bevy plugin running one simulation step per fixed frame
pub struct SimulationPlugin {
    /// Simulated frames per real second
    pub refresh_rate: u32,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(self.refresh_rate as f64))
            .add_systems(FixedUpdate, simulation_tick);
    }
}

/// Main simulation tick: one `advance` per fixed frame
fn simulation_tick(mut sim: ResMut<Simulation>, driver: Res<SimulationDriver>) {
    driver.step(&mut sim);
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsim_core::IntegratorKind;

    #[test]
    fn test_paused_driver_does_not_step() {
        let config = SimConfig::default();
        let mut sim = Simulation::from_config(&config).unwrap();
        let mut driver = SimulationDriver::new(config);

        driver.paused = true;
        driver.step(&mut sim);
        assert_eq!(sim.step(), 0);

        driver.paused = false;
        driver.step(&mut sim);
        assert_eq!(sim.step(), 1);
        assert_eq!(sim.history().len(), 2);
    }

    #[test]
    fn test_reset_reseeds() {
        let config = SimConfig {
            integrator: IntegratorKind::Leapfrog,
            ..SimConfig::default()
        };
        let mut sim = Simulation::from_config(&config).unwrap();
        let driver = SimulationDriver::new(config);
        for _ in 0..10 {
            driver.step(&mut sim);
        }
        sim.add_particle([5.0, 5.0], [0.0, 0.0], 10.0).unwrap();

        driver.reset(&mut sim).unwrap();
        assert_eq!(sim.particle_count(), 2);
        assert_eq!(sim.history().len(), 1);
        // Fresh ids after the reset
        assert!(sim.current_snapshot().ids().all(|id| id.0 >= 3));
    }

    #[test]
    fn test_fixed_tick_advances_simulation() {
        let config = SimConfig::default();
        let mut app = App::new();
        app.insert_resource(Simulation::from_config(&config).unwrap())
            .insert_resource(SimulationDriver::new(config))
            .add_systems(Update, simulation_tick);

        app.update();
        app.update();

        let sim = app.world().resource::<Simulation>();
        assert_eq!(sim.step(), 2);
    }
}
