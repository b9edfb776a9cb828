use nsim_core::Scenario;
use rand::Rng;

/// Initial state of one particle, before it is given an id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub mass: f64,
}

impl Spawn {
    pub fn new(position: [f64; 2], velocity: [f64; 2], mass: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
        }
    }
}

/// Generate the initial particle set for a scenario
pub fn generate(scenario: &Scenario, gravitational_constant: f64, rng: &mut impl Rng) -> Vec<Spawn> {
    match *scenario {
        Scenario::Empty => Vec::new(),
        Scenario::OrbitingPair => orbiting_pair(),
        Scenario::Disk {
            count,
            radius,
            central_mass,
            particle_mass,
        } => disk(
            count as usize,
            radius,
            central_mass,
            particle_mass,
            gravitational_constant,
            rng,
        ),
    }
}

/// Heavy body at the origin with a light companion to its left
pub fn orbiting_pair() -> Vec<Spawn> {
    vec![
        Spawn::new([0.0, 0.0], [0.0, 0.0], 100.0),
        Spawn::new([-200.0, 0.0], [0.0, -2.3], 10.0),
    ]
}

fn disk(
    count: usize,
    radius: f64,
    central_mass: f64,
    particle_mass: f64,
    gravitational_constant: f64,
    rng: &mut impl Rng,
) -> Vec<Spawn> {
    let mut spawns = Vec::with_capacity(count + 1);
    spawns.push(Spawn::new([0.0, 0.0], [0.0, 0.0], central_mass));

    // Keep the inner edge well outside the central body
    let inner = radius * 0.1;

    for _ in 0..count {
        let theta = rng.gen_range(0.0..std::f64::consts::TAU);
        // sqrt keeps the areal density uniform
        let r = inner + (radius - inner) * rng.gen_range(0.0..1.0f64).sqrt();

        let position = [r * theta.cos(), r * theta.sin()];

        // Circular speed around the center only
        let speed = (gravitational_constant * central_mass / r).sqrt();
        let velocity = [-speed * theta.sin(), speed * theta.cos()];

        let mass = particle_mass * rng.gen_range(0.5..1.5f64);
        spawns.push(Spawn::new(position, velocity, mass));
    }

    spawns
}
