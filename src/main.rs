use bevy::prelude::*;
use nsim_core::SimConfig;
use nsim_render::NsimRenderPlugin;
use nsim_sim::pipeline::{SimulationDriver, SimulationPlugin};
use nsim_sim::simulation::Simulation;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Optional JSON config path as the first argument
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    let simulation = match Simulation::from_config(&config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let display = config.display.clone();

    let exit = App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: display.title.clone(),
                resolution: (display.width as f32, display.height as f32).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(32, 32, 32)))
        .insert_resource(simulation)
        .insert_resource(SimulationDriver::new(config))
        .add_plugins(SimulationPlugin {
            refresh_rate: display.refresh_rate,
        })
        .add_plugins(NsimRenderPlugin { display })
        .run();

    match exit {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(_) => ExitCode::FAILURE,
    }
}
