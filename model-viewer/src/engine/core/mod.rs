//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with picking, glTF loading, the catalogue manifest
/// loader, the object rig and the RPC bridge.
pub mod app_setup;

/// Application states from catalogue loading to interactive viewing.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds the primary window to the page canvas on the web, fixed size natively.
pub mod window_config;
