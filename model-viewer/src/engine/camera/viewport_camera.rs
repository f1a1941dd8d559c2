use crate::constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_POSITION, MAX_CAMERA_DISTANCE,
    MAX_POLAR_ANGLE, MIN_CAMERA_DISTANCE, MIN_POLAR_ANGLE, NATIVE_WINDOW_SIZE,
    PIXELS_PER_SCROLL_LINE, ZOOM_SCALE_PER_LINE,
};
use crate::rig::state::RigState;
use bevy::input::mouse::MouseScrollUnit;
use bevy::input::touch::Touches;
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
    window::PrimaryWindow,
};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Orbit state of the viewport camera in spherical coordinates around `focus_point`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    /// Azimuth around +Y; zero places the camera on +Z.
    pub yaw: f32,
    /// Angle between the view offset and +Y.
    pub polar: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Left button went down off the model and is still held.
    pub is_orbiting: bool,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::looking_at(CAMERA_START_POSITION, Vec3::ZERO)
    }
}

impl ViewportCamera {
    pub fn looking_at(position: Vec3, focus_point: Vec3) -> Self {
        let offset = position - focus_point;
        let distance = offset.length();
        let polar = if distance > f32::EPSILON {
            (offset.y / distance).clamp(-1.0, 1.0).acos()
        } else {
            FRAC_PI_2
        };

        Self {
            focus_point,
            distance,
            yaw: offset.x.atan2(offset.z),
            polar: polar.clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE),
            min_polar: MIN_POLAR_ANGLE,
            max_polar: MAX_POLAR_ANGLE,
            min_distance: MIN_CAMERA_DISTANCE,
            max_distance: MAX_CAMERA_DISTANCE,
            is_orbiting: false,
        }
    }

    /// Rotate by a pointer drag; a drag spanning the viewport height is one full turn.
    pub fn orbit(&mut self, pixel_delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let radians_per_pixel = TAU / viewport_height;
        self.yaw -= pixel_delta.x * radians_per_pixel;
        self.polar = (self.polar - pixel_delta.y * radians_per_pixel)
            .clamp(self.min_polar, self.max_polar);
    }

    /// Positive lines move towards the focus point.
    pub fn dolly(&mut self, lines: f32) {
        self.distance = (self.distance * ZOOM_SCALE_PER_LINE.powf(lines))
            .clamp(self.min_distance, self.max_distance);
    }

    /// Two-finger pinch: spreading the fingers moves towards the focus point
    /// by the ratio of the spans.
    pub fn pinch(&mut self, previous_span: f32, current_span: f32) {
        if previous_span <= f32::EPSILON || current_span <= f32::EPSILON {
            return;
        }
        self.distance = (self.distance * previous_span / current_span)
            .clamp(self.min_distance, self.max_distance);
    }

    /// Place the camera at an exact distance, as computed by auto-framing.
    pub fn set_distance(&mut self, distance: f32) {
        if distance.is_finite() && distance > 0.0 {
            self.distance = distance;
        } else {
            warn!("Ignoring camera distance {}", distance);
        }
    }

    pub fn offset(&self) -> Vec3 {
        let ring = self.polar.sin();
        Vec3::new(ring * self.yaw.sin(), self.polar.cos(), ring * self.yaw.cos()) * self.distance
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.focus_point + self.offset())
            .looking_at(self.focus_point, Vec3::Y)
    }
}

pub fn viewport_projection() -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: CAMERA_FOV_DEGREES.to_radians(),
        near: CAMERA_NEAR,
        far: CAMERA_FAR,
        ..default()
    })
}

pub fn spawn_viewport_camera(commands: &mut Commands, viewport: &ViewportCamera) {
    commands.spawn((
        Name::new("viewport_camera"),
        Camera3d::default(),
        viewport_projection(),
        viewport.transform(),
    ));
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    rigs: Query<&RigState>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let rig_dragging = rigs.iter().any(|rig| rig.dragging);

    if mouse_button.just_pressed(MouseButton::Left) {
        // Presses that land on the model drive the rig instead.
        viewport.is_orbiting = !rig_dragging;
    } else if viewport.is_orbiting && !mouse_button.pressed(MouseButton::Left) {
        viewport.is_orbiting = false;
    }

    let viewport_height = || {
        windows
            .single()
            .map(|window| window.height())
            .unwrap_or(NATIVE_WINDOW_SIZE.1)
    };

    if viewport.is_orbiting && mouse_delta != Vec2::ZERO {
        viewport.orbit(mouse_delta, viewport_height());
    }

    let active: Vec<_> = touches.iter().collect();
    match active.as_slice() {
        // A finger resting on the model is a rig drag, not an orbit.
        [touch] if !rig_dragging && touch.delta() != Vec2::ZERO => {
            viewport.orbit(touch.delta(), viewport_height());
        }
        [first, second] => {
            let previous = first.previous_position().distance(second.previous_position());
            let current = first.position().distance(second.position());
            if (current - previous).abs() > f32::EPSILON {
                viewport.pinch(previous, current);
            }
        }
        _ => {}
    }

    let scroll_lines: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_SCROLL_LINE,
        })
        .sum();
    if scroll_lines.abs() > f32::EPSILON {
        viewport.dolly(scroll_lines);
    }

    if !viewport.is_changed() {
        return;
    }

    if let Ok(mut camera_transform) = camera_query.single_mut() {
        *camera_transform = viewport.transform();
    }
}
