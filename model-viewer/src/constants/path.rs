/// Catalogue manifest listing the preset models and tint palette.
pub const CATALOGUE_MANIFEST_PATH: &str = "catalogue.viewer.json";

/// Extension registered with the JSON asset loader for the manifest.
pub const CATALOGUE_MANIFEST_EXTENSION: &str = "viewer.json";
