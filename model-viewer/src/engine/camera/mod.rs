//! Viewport camera for inspecting the active model.
//!
//! Orbit and dolly controls around the origin with a clamped polar angle,
//! no panning, and a distance that auto-framing overrides on every load.

/// Viewport camera resource, spawn helper and controller system.
pub mod viewport_camera;
