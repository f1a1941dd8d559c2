/// Radians of rotation per pixel of pointer drag, on both axes.
pub const DRAG_SENSITIVITY: f32 = 0.01;

/// Fraction of angular velocity kept after each frame.
pub const VELOCITY_DECAY: f32 = 0.95;

/// Camera distance multiplier applied to the framed half-extent.
pub const FRAMING_FACTOR: f32 = 2.5;

/// Seconds between FPS notifications pushed to the host page.
pub const FPS_NOTIFY_INTERVAL: f32 = 0.5;
