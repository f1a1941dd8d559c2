use crate::constants::interaction::{DRAG_SENSITIVITY, FRAMING_FACTOR, VELOCITY_DECAY};
use bevy::prelude::*;

/// Tuning for drag rotation, inertia and auto-framing.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RigSettings {
    /// Radians per pixel of pointer drag.
    pub sensitivity: f32,
    /// Fraction of angular velocity kept per frame.
    pub decay: f32,
    /// Multiplier applied to the framed half-extent when placing the camera.
    pub framing_factor: f32,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            sensitivity: DRAG_SENSITIVITY,
            decay: VELOCITY_DECAY,
            framing_factor: FRAMING_FACTOR,
        }
    }
}

/// Pointer input delivered to a rig. Positions are viewport pixels,
/// times are seconds on a monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RigInput {
    PointerDown {
        position: Vec2,
        time: f64,
    },
    PointerMove {
        position: Vec2,
        camera_rotation: Quat,
        time: f64,
    },
    /// Pointer released or left the object.
    PointerUp,
}

/// Orientation and interaction state of one rigged model.
///
/// Only two things ever rotate the model: pointer moves while `dragging`,
/// and the residual `angular_velocity` on frames where `dragging` is false.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct RigState {
    /// Euler angles in XYZ order, radians.
    pub orientation: Vec3,
    /// Radians per second per axis.
    pub angular_velocity: Vec3,
    pub dragging: bool,
    pub last_pointer: Vec2,
    /// Start of the current velocity sample window.
    sample_time: Option<f64>,
    /// Rotation applied since `sample_time` that has not yet been turned into velocity.
    pending_rotation: Vec3,
}

impl RigState {
    /// Apply one pointer input and return the resulting state.
    pub fn apply(mut self, input: RigInput, sensitivity: f32) -> Self {
        match input {
            RigInput::PointerDown { position, time } => {
                self.dragging = true;
                self.last_pointer = position;
                self.sample_time = Some(time);
                self.pending_rotation = Vec3::ZERO;
            }
            RigInput::PointerMove {
                position,
                camera_rotation,
                time,
            } => {
                if !self.dragging {
                    return self;
                }

                let delta = drag_rotation(position - self.last_pointer, camera_rotation, sensitivity);
                self.orientation += delta;
                self.pending_rotation += delta;
                self.last_pointer = position;

                match self.sample_time {
                    Some(start) if time > start => {
                        self.angular_velocity = self.pending_rotation / (time - start) as f32;
                        self.pending_rotation = Vec3::ZERO;
                        self.sample_time = Some(time);
                    }
                    // Same timestamp as the last sample: fold into the next one.
                    Some(_) => {}
                    None => self.sample_time = Some(time),
                }
            }
            RigInput::PointerUp => {
                self.dragging = false;
            }
        }
        self
    }

    /// Advance one frame: coast on inertia when idle, then decay velocity.
    pub fn advance(mut self, delta_secs: f32, decay: f32) -> Self {
        if !self.dragging {
            self.orientation += self.angular_velocity * delta_secs;
        }
        self.angular_velocity *= decay;
        self
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.orientation.x,
            self.orientation.y,
            self.orientation.z,
        )
    }

    /// Zero orientation and velocity and drop any drag in progress.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Convert a pixel drag into an angular delta expressed relative to the camera,
/// so dragging right always spins the model right on screen.
pub fn drag_rotation(pixel_delta: Vec2, camera_rotation: Quat, sensitivity: f32) -> Vec3 {
    let screen_delta = Vec3::new(pixel_delta.y * sensitivity, pixel_delta.x * sensitivity, 0.0);
    camera_rotation.inverse() * screen_delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn settings() -> RigSettings {
        RigSettings::default()
    }

    fn press(x: f32, y: f32, time: f64) -> RigInput {
        RigInput::PointerDown {
            position: Vec2::new(x, y),
            time,
        }
    }

    fn drag_to(x: f32, y: f32, time: f64) -> RigInput {
        RigInput::PointerMove {
            position: Vec2::new(x, y),
            camera_rotation: Quat::IDENTITY,
            time,
        }
    }

    #[test]
    fn horizontal_drag_rotates_about_y() {
        let delta = drag_rotation(Vec2::new(10.0, 0.0), Quat::IDENTITY, DRAG_SENSITIVITY);
        assert_relative_eq!(delta.x, 0.0);
        assert_relative_eq!(delta.y, 0.1, epsilon = 1e-6);
        assert_relative_eq!(delta.z, 0.0);
    }

    #[test]
    fn vertical_drag_rotates_about_x() {
        let delta = drag_rotation(Vec2::new(0.0, -20.0), Quat::IDENTITY, DRAG_SENSITIVITY);
        assert_relative_eq!(delta.x, -0.2, epsilon = 1e-6);
        assert_relative_eq!(delta.y, 0.0);
    }

    #[test]
    fn drag_follows_camera_orientation() {
        // Camera orbited a quarter turn around the model: screen-vertical drag
        // now tips the model about its Z axis.
        let camera = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let delta = drag_rotation(Vec2::new(0.0, 10.0), camera, DRAG_SENSITIVITY);
        assert!(delta.abs_diff_eq(Vec3::new(0.0, 0.0, 0.1), 1e-6), "{delta:?}");
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let state = RigState::default().apply(drag_to(50.0, 50.0, 1.0), DRAG_SENSITIVITY);
        assert_eq!(state, RigState::default());
    }

    #[test]
    fn drag_accumulates_orientation_and_estimates_velocity() {
        let state = RigState::default()
            .apply(press(100.0, 100.0, 0.0), DRAG_SENSITIVITY)
            .apply(drag_to(110.0, 100.0, 0.1), DRAG_SENSITIVITY)
            .apply(drag_to(130.0, 100.0, 0.2), DRAG_SENSITIVITY);

        assert!(state.dragging);
        assert_relative_eq!(state.orientation.y, 0.3, epsilon = 1e-5);
        // Last sample: 0.2 rad over 0.1 s.
        assert_relative_eq!(state.angular_velocity.y, 2.0, epsilon = 1e-4);
        assert_eq!(state.last_pointer, Vec2::new(130.0, 100.0));
    }

    #[test]
    fn same_timestamp_moves_fold_into_next_sample() {
        let state = RigState::default()
            .apply(press(0.0, 0.0, 0.0), DRAG_SENSITIVITY)
            .apply(drag_to(10.0, 0.0, 0.1), DRAG_SENSITIVITY)
            .apply(drag_to(20.0, 0.0, 0.1), DRAG_SENSITIVITY);

        assert_relative_eq!(state.orientation.y, 0.2, epsilon = 1e-6);
        assert!(state.angular_velocity.is_finite());
        assert_relative_eq!(state.angular_velocity.y, 1.0, epsilon = 1e-4);

        let state = state.apply(drag_to(30.0, 0.0, 0.2), DRAG_SENSITIVITY);
        assert_relative_eq!(state.angular_velocity.y, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn first_move_at_press_time_has_finite_velocity() {
        let state = RigState::default()
            .apply(press(0.0, 0.0, 3.0), DRAG_SENSITIVITY)
            .apply(drag_to(5.0, 5.0, 3.0), DRAG_SENSITIVITY);
        assert!(state.angular_velocity.is_finite());
        assert_eq!(state.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn inertia_is_not_applied_while_dragging() {
        let mut state = RigState {
            angular_velocity: Vec3::new(1.0, 2.0, 0.0),
            ..default()
        }
        .apply(press(0.0, 0.0, 0.0), DRAG_SENSITIVITY);

        for _ in 0..10 {
            state = state.advance(1.0 / 60.0, VELOCITY_DECAY);
        }

        assert_eq!(state.orientation, Vec3::ZERO);
        assert_relative_eq!(state.angular_velocity.y, 2.0 * VELOCITY_DECAY.powi(10), epsilon = 1e-6);
    }

    #[test]
    fn release_keeps_velocity_as_inertia() {
        let state = RigState::default()
            .apply(press(0.0, 0.0, 0.0), DRAG_SENSITIVITY)
            .apply(drag_to(0.0, 10.0, 0.05), DRAG_SENSITIVITY)
            .apply(RigInput::PointerUp, DRAG_SENSITIVITY);

        assert!(!state.dragging);
        assert_relative_eq!(state.angular_velocity.x, 2.0, epsilon = 1e-4);

        let before = state.orientation;
        let after = state.advance(0.5, VELOCITY_DECAY);
        assert_relative_eq!(after.orientation.x, before.x + 1.0, epsilon = 1e-4);
        assert_relative_eq!(after.angular_velocity.x, 2.0 * VELOCITY_DECAY, epsilon = 1e-4);
    }

    #[test]
    fn velocity_decays_geometrically_per_axis() {
        let mut state = RigState {
            angular_velocity: Vec3::new(3.0, -1.5, 0.25),
            ..default()
        };

        for _ in 0..200 {
            let previous = state.angular_velocity;
            state = state.advance(1.0 / 60.0, VELOCITY_DECAY);
            for axis in 0..3 {
                assert_relative_eq!(
                    state.angular_velocity[axis].abs(),
                    VELOCITY_DECAY * previous[axis].abs(),
                    epsilon = 1e-7
                );
            }
        }
        assert!(state.angular_velocity.x > 0.0);
    }

    #[test]
    fn replaying_a_recording_is_deterministic() {
        let recording = [
            press(10.0, 10.0, 0.0),
            drag_to(14.0, 12.0, 0.016),
            drag_to(25.0, 9.0, 0.033),
            drag_to(40.0, 3.0, 0.050),
            RigInput::PointerUp,
        ];

        let replay = || {
            let settings = settings();
            let mut state = RigState::default();
            for input in recording {
                state = state
                    .apply(input, settings.sensitivity)
                    .advance(1.0 / 60.0, settings.decay);
            }
            for _ in 0..30 {
                state = state.advance(1.0 / 60.0, settings.decay);
            }
            state
        };

        assert_eq!(replay(), replay());
    }

    #[test]
    fn drag_orientation_is_sum_of_deltas() {
        let camera = Quat::from_euler(EulerRot::XYZ, -0.3, 0.8, 0.0);
        let positions = [Vec2::new(4.0, 7.0), Vec2::new(9.0, 2.0), Vec2::new(-3.0, 15.0)];

        let mut state = RigState::default().apply(press(0.0, 0.0, 0.0), DRAG_SENSITIVITY);
        let mut expected = Vec3::ZERO;
        let mut last = Vec2::ZERO;
        for (i, position) in positions.into_iter().enumerate() {
            state = state.apply(
                RigInput::PointerMove {
                    position,
                    camera_rotation: camera,
                    time: (i + 1) as f64 * 0.02,
                },
                DRAG_SENSITIVITY,
            );
            expected += drag_rotation(position - last, camera, DRAG_SENSITIVITY);
            last = position;
        }

        assert!(state.orientation.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn reset_clears_motion() {
        let mut state = RigState::default()
            .apply(press(0.0, 0.0, 0.0), DRAG_SENSITIVITY)
            .apply(drag_to(30.0, 0.0, 0.1), DRAG_SENSITIVITY);
        state.reset();
        assert_eq!(state, RigState::default());
        assert_eq!(state.rotation(), Quat::IDENTITY);
    }
}
