//! Catalogue resolution and model scene spawning.
//!
//! The manifest resolves once during `AppState::Loading`; afterwards the
//! model loader keeps exactly one rig in the world, matching the selection.

/// Catalogue manifest loading with fallback to the built-in presets.
///
/// Inserts `Catalogue` and the initial `Selection`, then enters `AppState::Running`.
pub mod manifest_loader;

/// Rig spawning for the selected model.
pub mod model_loader;
