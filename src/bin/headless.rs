//! Run the configured scenario without a window and report how well the
//! integrator held the conserved quantities.
//!
//! Usage: headless [steps] [config.json]

use nsim_core::SimConfig;
use nsim_physics::diagnostics::Diagnostics;
use nsim_sim::pipeline::SimulationDriver;
use nsim_sim::simulation::Simulation;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

const DEFAULT_STEPS: u64 = 1000;

fn report(label: &str, d: &Diagnostics) {
    println!("{label}:");
    println!("  particles       {}", d.particle_count);
    println!("  total mass      {:.3}", d.total_mass);
    println!(
        "  center of mass  ({:.4}, {:.4})",
        d.center_of_mass[0], d.center_of_mass[1]
    );
    println!("  momentum        ({:.6}, {:.6})", d.momentum[0], d.momentum[1]);
    println!(
        "  energy          {:.6} (K {:.6}, U {:.6})",
        d.total_energy(),
        d.kinetic_energy,
        d.potential_energy
    );
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);

    let steps = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("Invalid step count: {e}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_STEPS,
    };

    let config = match args.next().map(PathBuf::from) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    let mut sim = match Simulation::from_config(&config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    let driver = SimulationDriver::new(config);

    eprintln!(
        "Running '{}' for {} steps ({}, dt={}, G={}, softening={})...",
        driver.config.scenario.name(),
        steps,
        driver.config.integrator.name(),
        driver.timestep,
        driver.config.gravitational_constant,
        driver.config.softening_length,
    );

    let initial = Diagnostics::measure(sim.current_snapshot(), &driver.force);
    let started = Instant::now();

    for step in 1..=steps {
        driver.step(&mut sim);
        if step % 100 == 0 {
            eprint!("  {}/{}...\r", step, steps);
        }
    }

    let elapsed = started.elapsed();
    let last = Diagnostics::measure(sim.current_snapshot(), &driver.force);
    eprintln!("Done in {:.2?}.", elapsed);

    println!();
    report("Initial", &initial);
    println!();
    report(&format!("After {} steps", sim.step()), &last);
    println!();

    let dp = [
        last.momentum[0] - initial.momentum[0],
        last.momentum[1] - initial.momentum[1],
    ];
    println!(
        "Momentum drift: {:.6e}",
        (dp[0] * dp[0] + dp[1] * dp[1]).sqrt()
    );
    let e0 = initial.total_energy();
    let de = last.total_energy() - e0;
    if e0.abs() > 0.0 {
        println!("Energy drift:   {:.6e} ({:+.3}%)", de, de / e0.abs() * 100.0);
    } else {
        println!("Energy drift:   {:.6e}", de);
    }
    println!(
        "History:        {}/{} snapshots",
        sim.history().len(),
        sim.retention_depth()
    );

    ExitCode::SUCCESS
}
