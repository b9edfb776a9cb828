use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use nsim_physics::diagnostics::Diagnostics;
use nsim_sim::pipeline::SimulationDriver;
use nsim_sim::simulation::Simulation;

use super::camera::ViewCamera;
use super::plugin::ViewerSettings;

/// Marker for the HUD text
#[derive(Component)]
pub struct HudText;

/// HUD frame counter for throttling
#[derive(Resource, Default)]
pub struct HudThrottle {
    pub frame: u32,
}

/// Spawn the HUD overlay
pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("nsim"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgba(0.9, 0.9, 0.9, 0.85)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

/// HUD body for the current state
pub fn hud_text(sim: &Simulation, driver: &SimulationDriver, stats: &Diagnostics, view: &ViewCamera) -> String {
    let paused = if driver.paused { " [PAUSED]" } else { "" };
    let tracking = if view.tracking { "on" } else { "off" };

    format!(
        "Step: {} | {} dt={}{}\n\
         Particles: {} | Mass: {:.1}\n\
         Center of mass: ({:.1}, {:.1})\n\
         Momentum: ({:.3}, {:.3})\n\
         Energy: {:.3} (K {:.3}, U {:.3})\n\
         History: {}/{} | Zoom: {:.2}x | Tracking: {}\n\
         \n\
         [LMB drag / WASD] Pan  [Wheel] Zoom  [Shift] Fast zoom\n\
         [RMB] Spawn  [C] Track  [Space] Pause  [R] Reset",
        sim.step(),
        driver.config.integrator.name(),
        driver.timestep,
        paused,
        stats.particle_count,
        stats.total_mass,
        stats.center_of_mass[0],
        stats.center_of_mass[1],
        stats.momentum[0],
        stats.momentum[1],
        stats.total_energy(),
        stats.kinetic_energy,
        stats.potential_energy,
        sim.history().len(),
        sim.retention_depth(),
        view.zoom_factor,
        tracking,
    )
}

/// Update HUD text every 10th frame (the energy sum is O(n²))
pub fn update_hud(
    sim: Res<Simulation>,
    driver: Res<SimulationDriver>,
    view: Res<ViewCamera>,
    mut throttle: ResMut<HudThrottle>,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    throttle.frame = throttle.frame.wrapping_add(1);
    if throttle.frame % 10 != 0 {
        return;
    }
    let Ok(mut text) = hud_query.get_single_mut() else {
        return;
    };
    let stats = Diagnostics::measure(sim.current_snapshot(), &driver.force);
    **text = hud_text(&sim, &driver, &stats, &view);
}

/// Frame time in the window title
pub fn window_title_system(
    time: Res<Time>,
    settings: Res<ViewerSettings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    window.title = format!(
        "{} - {:.0} ms frame time",
        settings.display.title,
        time.delta_secs() * 1000.0
    );
}

/// Handle keyboard input for time controls
pub fn time_control_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut driver: ResMut<SimulationDriver>,
    mut sim: ResMut<Simulation>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        driver.paused = !driver.paused;
        info!("Simulation {}", if driver.paused { "paused" } else { "resumed" });
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        if let Err(e) = driver.reset(&mut sim) {
            error!("Reset failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsim_core::SimConfig;

    #[test]
    fn test_hud_text_reports_state() {
        let config = SimConfig::default();
        let mut sim = Simulation::from_config(&config).unwrap();
        let mut driver = SimulationDriver::new(config);
        driver.step(&mut sim);
        driver.paused = true;

        let view = ViewCamera::centered_on_origin(Vec2::new(1600.0, 900.0), true);
        let stats = Diagnostics::measure(sim.current_snapshot(), &driver.force);
        let text = hud_text(&sim, &driver, &stats, &view);

        assert!(text.starts_with("Step: 1 | Euler dt=1 [PAUSED]"));
        assert!(text.contains("Particles: 2 | Mass: 110.0"));
        assert!(text.contains("History: 2/100"));
        assert!(text.contains("Tracking: on"));
    }
}
