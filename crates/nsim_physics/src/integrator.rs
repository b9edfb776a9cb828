//! Fixed-step integrators.
//!
//! Both schemes are driven by a [`ForceModel`] and mutate a snapshot in
//! place. They differ in when accelerations are read:
//! - [`Euler`] updates particles one at a time in id order, so later
//!   particles see the already-moved positions of earlier ones.
//! - [`Leapfrog`] computes every acceleration from the same state before
//!   applying any of them.

use nsim_core::{IntegratorKind, ParticleId, Snapshot};

use crate::forces::ForceModel;

/// Advances every particle of a snapshot by one timestep
pub trait Integrator: Send + Sync {
    fn integrate(&self, snapshot: &mut Snapshot, timestep: f64);
}

/// Semi-implicit Euler with Gauss–Seidel ordering
#[derive(Debug, Clone)]
pub struct Euler<F> {
    pub force: F,
}

impl<F: ForceModel> Euler<F> {
    pub fn new(force: F) -> Self {
        Self { force }
    }
}

impl<F: ForceModel> Integrator for Euler<F> {
    fn integrate(&self, snapshot: &mut Snapshot, timestep: f64) {
        let ids: Vec<ParticleId> = snapshot.ids().collect();

        for id in ids {
            let Some(particle) = snapshot.get(id) else {
                continue;
            };
            let a = self.force.acceleration(particle, snapshot);

            let Some(p) = snapshot.get_mut(id) else {
                continue;
            };
            p.acceleration = Some(a);

            p.velocity[0] += a[0] * timestep;
            p.velocity[1] += a[1] * timestep;

            p.position[0] += p.velocity[0] * timestep;
            p.position[1] += p.velocity[1] * timestep;
        }
    }
}

/// Kick-drift-kick velocity Verlet. Two force evaluations per step.
#[derive(Debug, Clone)]
pub struct Leapfrog<F> {
    pub force: F,
}

impl<F: ForceModel> Leapfrog<F> {
    pub fn new(force: F) -> Self {
        Self { force }
    }

    fn accelerations(&self, snapshot: &Snapshot) -> Vec<[f64; 2]> {
        snapshot
            .iter()
            .map(|p| self.force.acceleration(p, snapshot))
            .collect()
    }
}

impl<F: ForceModel> Integrator for Leapfrog<F> {
    fn integrate(&self, snapshot: &mut Snapshot, timestep: f64) {
        if snapshot.is_empty() {
            return;
        }
        let half_dt = 0.5 * timestep;

        // Kick: v_n+1/2 = v_n + dt/2 * a_n
        let a_old = self.accelerations(snapshot);
        for (p, a) in snapshot.iter_mut().zip(a_old.iter()) {
            p.velocity[0] += half_dt * a[0];
            p.velocity[1] += half_dt * a[1];
        }

        // Drift: x_n+1 = x_n + dt * v_n+1/2
        for p in snapshot.iter_mut() {
            p.position[0] += timestep * p.velocity[0];
            p.position[1] += timestep * p.velocity[1];
        }

        // Kick: v_n+1 = v_n+1/2 + dt/2 * a_n+1
        let a_new = self.accelerations(snapshot);
        for (p, a) in snapshot.iter_mut().zip(a_new.into_iter()) {
            p.velocity[0] += half_dt * a[0];
            p.velocity[1] += half_dt * a[1];
            p.acceleration = Some(a);
        }
    }
}

/// Build the configured integrator around a force model
pub fn build<F: ForceModel + 'static>(kind: IntegratorKind, force: F) -> Box<dyn Integrator> {
    match kind {
        IntegratorKind::Euler => Box::new(Euler::new(force)),
        IntegratorKind::Leapfrog => Box::new(Leapfrog::new(force)),
    }
}
