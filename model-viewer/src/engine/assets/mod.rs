//! Asset descriptions for the viewer.
//!
//! Holds the catalogue manifest with its model and tint presets, and the
//! bounding frame derived from a loaded scene's mesh bounds.

/// Bounding frame of a loaded scene and the camera distance derived from it.
pub mod bounds;

/// Catalogue manifest asset plus model and tint preset lookups.
pub mod catalogue;
