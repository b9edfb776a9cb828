use bevy::prelude::*;
use nsim_core::DisplayConfig;

use super::camera;
use super::particles;
use super::ui;

/// Viewer settings, tracked as a Bevy Resource
#[derive(Resource, Debug, Clone)]
pub struct ViewerSettings {
    pub display: DisplayConfig,
}

/// Main render plugin for the nsim viewer
pub struct NsimRenderPlugin {
    pub display: DisplayConfig,
}

impl Plugin for NsimRenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ViewerSettings {
            display: self.display.clone(),
        })
        .init_resource::<ui::HudThrottle>()
        .add_systems(
            Startup,
            (
                camera::spawn_camera,
                ui::spawn_hud,
                particles::configure_gizmos,
            ),
        )
        .add_systems(
            Update,
            (
                ui::time_control_system,
                camera::tracking_toggle_system,
                camera::zoom_system,
                camera::pan_system,
                camera::spawn_particle_system,
                camera::tracking_system,
                camera::sync_camera_system,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                particles::draw_trails,
                particles::draw_particles,
                particles::draw_tracking_crosshair,
                ui::update_hud,
                ui::window_title_system,
            )
                .after(camera::sync_camera_system),
        );
    }
}
