use bevy::prelude::*;

/// Vertical field of view of the viewport camera, in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 50.0;

pub const CAMERA_START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);
pub const CAMERA_NEAR: f32 = 0.01;
pub const CAMERA_FAR: f32 = 1000.0;

/// Orbit polar angle limits, measured from the vertical axis.
pub const MIN_POLAR_ANGLE: f32 = std::f32::consts::FRAC_PI_6;
pub const MAX_POLAR_ANGLE: f32 = std::f32::consts::FRAC_PI_2;

/// Per wheel-line dolly scale, matching the usual orbit-control feel.
pub const ZOOM_SCALE_PER_LINE: f32 = 0.95;
/// Pixel scroll units are converted to lines with this divisor.
pub const PIXELS_PER_SCROLL_LINE: f32 = 100.0;
pub const MIN_CAMERA_DISTANCE: f32 = 0.05;
pub const MAX_CAMERA_DISTANCE: f32 = 500.0;

pub const STUDIO_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const STUDIO_LIGHT_INTENSITY: f32 = 2_000_000.0;
pub const STUDIO_LIGHT_RANGE: f32 = 100.0;
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

pub const CLEAR_COLOUR: Color = Color::srgb(0.95, 0.95, 0.96);

/// Native window size; on the web the canvas follows its parent element.
pub const NATIVE_WINDOW_SIZE: (f32, f32) = (800.0, 400.0);
pub const CANVAS_SELECTOR: &str = "#bevy";

pub const LOG_FILTER: &str = "wgpu=error,naga=warn,bevy_render=info,model_viewer=debug";
