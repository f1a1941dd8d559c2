/// Camera, lighting and log settings for the viewport.
pub mod render_settings;

/// Pointer sensitivity, inertia and framing factors for the object rig.
pub mod interaction;

/// Asset paths resolved by the asset server.
pub mod path;
