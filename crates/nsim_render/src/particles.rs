use bevy::math::{DVec2, Isometry2d};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use nsim_sim::simulation::Simulation;

use super::camera::{ViewCamera, is_circle_on_screen, is_point_on_screen, to_render};

const PARTICLE_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);
const PARTICLE_TRAIL_COLOR: Color = Color::srgb(0.25, 0.25, 0.25);
const CROSSHAIR_COLOR: Color = Color::srgb(1.0, 0.125, 0.0);

/// Trail width in pixels
const PARTICLE_TRAIL_WIDTH: f32 = 3.0;

/// Crosshair half-length in pixels
const CROSSHAIR_SIZE: f32 = 15.0;

/// Gizmo line width for trails
pub fn configure_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line_width = PARTICLE_TRAIL_WIDTH;
}

/// Draw every particle's trail through the retained history.
/// Segments with both ends off screen are skipped.
pub fn draw_trails(
    sim: Res<Simulation>,
    view: Res<ViewCamera>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut gizmos: Gizmos,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let screen_size = Vec2::new(window.width(), window.height());

    for id in sim.current_snapshot().ids() {
        let trail = sim.trail(id);
        for segment in trail.windows(2) {
            let newer = DVec2::new(segment[0][0], segment[0][1]);
            let older = DVec2::new(segment[1][0], segment[1][1]);
            if !is_point_on_screen(view.world_to_screen(newer), screen_size)
                && !is_point_on_screen(view.world_to_screen(older), screen_size)
            {
                continue;
            }
            gizmos.line_2d(to_render(older), to_render(newer), PARTICLE_TRAIL_COLOR);
        }
    }
}

/// Draw particles as circles with radius equal to their mass
pub fn draw_particles(
    sim: Res<Simulation>,
    view: Res<ViewCamera>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut gizmos: Gizmos,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let screen_size = Vec2::new(window.width(), window.height());

    for p in sim.current_snapshot() {
        let world = DVec2::new(p.position[0], p.position[1]);
        let radius_px = (p.mass * view.zoom_factor).ceil() as f32;
        if !is_circle_on_screen(view.world_to_screen(world), radius_px, screen_size) {
            continue;
        }
        gizmos.circle_2d(
            Isometry2d::from_translation(to_render(world)),
            p.mass as f32,
            PARTICLE_COLOR,
        );
    }
}

/// Crosshair at the window center while the camera tracks the center of mass
pub fn draw_tracking_crosshair(
    view: Res<ViewCamera>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut gizmos: Gizmos,
) {
    if !view.tracking {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let center = to_render(view.center(Vec2::new(window.width(), window.height())));
    let half = CROSSHAIR_SIZE / view.zoom_factor as f32;

    gizmos.line_2d(center - Vec2::X * half, center + Vec2::X * half, CROSSHAIR_COLOR);
    gizmos.line_2d(center - Vec2::Y * half, center + Vec2::Y * half, CROSSHAIR_COLOR);
}
