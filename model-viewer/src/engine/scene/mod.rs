//! Scene setup shared by every model.

/// Ambient fill plus a single point light above and in front of the model.
pub mod lighting;
