use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use nsim_sim::simulation::Simulation;

use super::plugin::ViewerSettings;

/// Keyboard pan speed in screen pixels per frame
const KEYS_SCROLL_AMOUNT: f64 = 15.0;

/// Zoom change per wheel notch, and with left shift held
const ZOOM_STEP: f64 = 1.1;
const ZOOM_STEP_FAST: f64 = 2.0;

/// Pixel-unit wheel deltas (touchpads) per notch
const PIXELS_PER_NOTCH: f32 = 40.0;

/// 2D view state in screen convention: `position` is the world point
/// shown at the window's top-left corner, screen y grows downward, and
/// one world unit spans `zoom_factor` pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewCamera {
    pub position: DVec2,
    pub zoom_factor: f64,
    /// Re-center on the center of mass every frame
    pub tracking: bool,
}

impl ViewCamera {
    /// Camera with the world origin in the middle of the window
    pub fn centered_on_origin(screen_size: Vec2, tracking: bool) -> Self {
        Self {
            position: -screen_size.as_dvec2() / 2.0,
            zoom_factor: 1.0,
            tracking,
        }
    }

    pub fn world_to_screen(&self, world: DVec2) -> Vec2 {
        ((world - self.position) * self.zoom_factor).as_vec2()
    }

    pub fn screen_to_world(&self, screen: Vec2) -> DVec2 {
        self.position + screen.as_dvec2() / self.zoom_factor
    }

    /// World point at the center of the window
    pub fn center(&self, screen_size: Vec2) -> DVec2 {
        self.screen_to_world(screen_size / 2.0)
    }

    /// Place `world` at the center of the window
    pub fn center_on(&mut self, world: DVec2, screen_size: Vec2) {
        self.position = world - screen_size.as_dvec2() / 2.0 / self.zoom_factor;
    }

    /// Move the view by a screen-space offset (drag direction)
    pub fn pan_screen(&mut self, delta: Vec2) {
        self.position -= delta.as_dvec2() / self.zoom_factor;
    }

    /// Zoom by `factor` per notch, keeping the world point under the
    /// cursor where it is on screen
    pub fn zoom_around_cursor(&mut self, cursor: Vec2, notches: i32, factor: f64) {
        if notches == 0 {
            return;
        }
        let anchor = self.screen_to_world(cursor);
        self.zoom_factor *= factor.powi(notches);
        let drifted = self.screen_to_world(cursor);
        self.position += anchor - drifted;
    }
}

/// Whether a circle in screen space overlaps the window
pub fn is_circle_on_screen(center: Vec2, radius: f32, screen_size: Vec2) -> bool {
    !(center.x + radius < 0.0
        || center.x - radius > screen_size.x
        || center.y + radius < 0.0
        || center.y - radius > screen_size.y)
}

/// Whether a point in screen space lies inside the window
pub fn is_point_on_screen(point: Vec2, screen_size: Vec2) -> bool {
    point.x >= 0.0 && point.x <= screen_size.x && point.y >= 0.0 && point.y <= screen_size.y
}

/// Simulation coordinates to Bevy world coordinates (y up)
pub fn to_render(world: DVec2) -> Vec2 {
    Vec2::new(world.x as f32, -world.y as f32)
}

/// Marker for the 2D render camera
#[derive(Component)]
pub struct MainCamera;

/// Spawn the 2D camera and the view state centered on the origin
pub fn spawn_camera(mut commands: Commands, settings: Res<ViewerSettings>) {
    let screen_size = Vec2::new(settings.display.width as f32, settings.display.height as f32);
    let view = ViewCamera::centered_on_origin(screen_size, settings.display.track_center_of_mass);

    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
        MainCamera,
    ));
    commands.insert_resource(view);

    info!(
        "Camera spawned at ({:.0}, {:.0}), tracking: {}",
        view.position.x, view.position.y, view.tracking
    );
}

/// Mouse wheel zoom anchored at the cursor
pub fn zoom_system(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut view: ResMut<ViewCamera>,
) {
    let notches = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y.round() as i32,
        MouseScrollUnit::Pixel => (mouse_scroll.delta.y / PIXELS_PER_NOTCH).round() as i32,
    };
    if notches == 0 {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let cursor = window
        .cursor_position()
        .unwrap_or_else(|| Vec2::new(window.width(), window.height()) / 2.0);

    let factor = if keyboard.pressed(KeyCode::ShiftLeft) {
        ZOOM_STEP_FAST
    } else {
        ZOOM_STEP
    };
    view.zoom_around_cursor(cursor, notches, factor);
}

/// Left-drag and WASD/arrow panning. Manual panning stops tracking.
pub fn pan_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut view: ResMut<ViewCamera>,
) {
    if let Ok(mut window) = windows.get_single_mut() {
        if mouse_button.just_pressed(MouseButton::Left) {
            window.cursor_options.visible = false;
        }
        if mouse_button.just_released(MouseButton::Left) {
            window.cursor_options.visible = true;
        }
    }

    let mut delta = Vec2::ZERO;
    if mouse_button.pressed(MouseButton::Left) {
        delta += mouse_motion.delta;
    }

    let step = KEYS_SCROLL_AMOUNT as f32;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        delta.y += step;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        delta.y -= step;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        delta.x += step;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        delta.x -= step;
    }

    if delta != Vec2::ZERO {
        view.pan_screen(delta);
        if view.tracking {
            view.tracking = false;
            info!("Center-of-mass tracking off");
        }
    }
}

/// Right click spawns a resting particle under the cursor
pub fn spawn_particle_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<ViewerSettings>,
    view: Res<ViewCamera>,
    mut sim: ResMut<Simulation>,
) {
    if !mouse_button.just_pressed(MouseButton::Right) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let world = view.screen_to_world(cursor);
    if let Err(e) = sim.add_particle([world.x, world.y], [0.0, 0.0], settings.display.spawn_mass) {
        warn!("Spawn rejected: {}", e);
    }
}

/// C toggles center-of-mass tracking
pub fn tracking_toggle_system(keyboard: Res<ButtonInput<KeyCode>>, mut view: ResMut<ViewCamera>) {
    if keyboard.just_pressed(KeyCode::KeyC) {
        view.tracking = !view.tracking;
        info!(
            "Center-of-mass tracking {}",
            if view.tracking { "on" } else { "off" }
        );
    }
}

/// Keep the center of mass in the middle of the window while tracking
pub fn tracking_system(
    sim: Res<Simulation>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut view: ResMut<ViewCamera>,
) {
    if !view.tracking {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let com = sim.center_of_mass();
    view.center_on(
        DVec2::new(com[0], com[1]),
        Vec2::new(window.width(), window.height()),
    );
}

/// Copy the view state onto the Bevy camera
pub fn sync_camera_system(
    view: Res<ViewCamera>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut query: Query<(&mut Transform, &mut OrthographicProjection), With<MainCamera>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((mut transform, mut projection)) = query.get_single_mut() else {
        return;
    };

    let center = to_render(view.center(Vec2::new(window.width(), window.height())));
    transform.translation.x = center.x;
    transform.translation.y = center.y;
    projection.scale = (1.0 / view.zoom_factor) as f32;
}
