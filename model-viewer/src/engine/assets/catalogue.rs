use crate::error::{SelectionError, SelectionResult};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A selectable 3D asset. `path` is relative to the asset root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPreset {
    pub id: String,
    pub name: String,
    pub path: String,
}

/// Palette entry as written in the manifest, `value` being a hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TintPreset {
    pub name: String,
    pub value: String,
}

/// Catalogue manifest as a Bevy asset. Mirrors the JSON file exactly.
#[derive(Asset, Debug, Clone, Default, Serialize, Deserialize, TypePath)]
pub struct ViewerManifest {
    #[serde(default)]
    pub models: Vec<ModelPreset>,
    #[serde(default)]
    pub tints: Vec<TintPreset>,
}

/// A resolved tint colour. `name` is set when the colour is a palette entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Tint {
    pub name: Option<String>,
    /// Normalised `#RRGGBB` or `#RRGGBBAA`, upper case.
    pub value: String,
    pub color: Color,
}

impl Tint {
    /// Parse a `#RRGGBB` / `#RRGGBBAA` hex string (leading `#` optional).
    pub fn from_hex(input: &str) -> SelectionResult<Self> {
        let digits = input.trim().trim_start_matches('#');
        let well_formed =
            matches!(digits.len(), 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit());
        if !well_formed {
            return Err(SelectionError::InvalidTint(input.to_string()));
        }

        let srgba =
            Srgba::hex(digits).map_err(|_| SelectionError::InvalidTint(input.to_string()))?;

        Ok(Self {
            name: None,
            value: format!("#{}", digits.to_ascii_uppercase()),
            color: Color::Srgba(srgba),
        })
    }

    fn named(name: &str, value: &str) -> SelectionResult<Self> {
        Ok(Self {
            name: Some(name.to_string()),
            ..Self::from_hex(value)?
        })
    }

    pub fn to_json(&self) -> Value {
        json!({ "name": self.name, "value": self.value })
    }
}

/// Built-in presets used when the manifest is missing or unusable.
const BUILTIN_MODELS: [(&str, &str, &str); 4] = [
    ("magic_potion", "Magic Potion", "models/magic_potion.glb"),
    ("tiger", "Tiger", "models/tiger_model.glb"),
    ("octopus", "Octopus", "models/octopus.glb"),
    ("arch", "Arch", "models/arch.glb"),
];

const BUILTIN_TINTS: [(&str, &str, [u8; 3]); 4] = [
    ("Pink", "#FF69B4", [0xFF, 0x69, 0xB4]),
    ("Yellow", "#FFD700", [0xFF, 0xD7, 0x00]),
    ("Blue", "#1E90FF", [0x1E, 0x90, 0xFF]),
    ("Green", "#32CD32", [0x32, 0xCD, 0x32]),
];

/// Ordered model and tint presets offered to the host page.
/// The first entry of each list is the default selection.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Catalogue {
    models: Vec<ModelPreset>,
    tints: Vec<Tint>,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalogue {
    pub fn builtin() -> Self {
        Self {
            models: BUILTIN_MODELS
                .iter()
                .map(|(id, name, path)| ModelPreset {
                    id: id.to_string(),
                    name: name.to_string(),
                    path: path.to_string(),
                })
                .collect(),
            tints: BUILTIN_TINTS
                .iter()
                .map(|(name, value, [r, g, b])| Tint {
                    name: Some(name.to_string()),
                    value: value.to_string(),
                    color: Color::srgb_u8(*r, *g, *b),
                })
                .collect(),
        }
    }

    /// Validate a loaded manifest. Both lists must be non-empty and every
    /// palette value must parse.
    pub fn from_manifest(manifest: &ViewerManifest) -> SelectionResult<Self> {
        if manifest.models.is_empty() {
            return Err(SelectionError::EmptyCatalogue("models"));
        }
        if manifest.tints.is_empty() {
            return Err(SelectionError::EmptyCatalogue("tints"));
        }

        let tints = manifest
            .tints
            .iter()
            .map(|preset| Tint::named(&preset.name, &preset.value))
            .collect::<SelectionResult<Vec<_>>>()?;

        Ok(Self {
            models: manifest.models.clone(),
            tints,
        })
    }

    pub fn models(&self) -> &[ModelPreset] {
        &self.models
    }

    pub fn tints(&self) -> &[Tint] {
        &self.tints
    }

    pub fn default_model(&self) -> SelectionResult<&ModelPreset> {
        self.models
            .first()
            .ok_or(SelectionError::EmptyCatalogue("models"))
    }

    pub fn default_tint(&self) -> SelectionResult<&Tint> {
        self.tints.first().ok_or(SelectionError::EmptyCatalogue("tints"))
    }

    pub fn model_by_id(&self, id: &str) -> Option<&ModelPreset> {
        self.models.iter().find(|model| model.id == id)
    }

    pub fn model_at(&self, index: usize) -> Option<&ModelPreset> {
        self.models.get(index)
    }

    /// Find a model by id, display name (case-insensitive) or asset path.
    pub fn find_model(&self, query: &str) -> SelectionResult<&ModelPreset> {
        let query = query.trim();
        self.models
            .iter()
            .find(|model| {
                model.id == query
                    || model.name.eq_ignore_ascii_case(query)
                    || model.path == query
                    || model.path == query.trim_start_matches('/')
            })
            .ok_or_else(|| SelectionError::UnknownModel(query.to_string()))
    }

    /// Resolve a palette name (case-insensitive) or an arbitrary hex colour.
    /// Hex values equal to a palette entry pick up its name.
    pub fn resolve_tint(&self, query: &str) -> SelectionResult<Tint> {
        let query = query.trim();
        if let Some(preset) = self
            .tints
            .iter()
            .find(|tint| tint.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(query)))
        {
            return Ok(preset.clone());
        }

        let parsed = Tint::from_hex(query)?;
        Ok(self
            .tints
            .iter()
            .find(|tint| tint.value == parsed.value)
            .cloned()
            .unwrap_or(parsed))
    }

    /// The palette entry after `current`, wrapping around. Custom colours
    /// restart at the first entry.
    pub fn next_tint(&self, current: &Tint) -> Option<&Tint> {
        let next = self
            .tints
            .iter()
            .position(|tint| tint.value == current.value)
            .map_or(0, |index| (index + 1) % self.tints.len());
        self.tints.get(next)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "models": self.models,
            "tints": self.tints.iter().map(Tint::to_json).collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> ViewerManifest {
        serde_json::from_str(
            r##"{
                "models": [
                    { "id": "crate", "name": "Wooden Crate", "path": "models/crate.glb" },
                    { "id": "lamp", "name": "Lamp", "path": "models/lamp.glb" }
                ],
                "tints": [
                    { "name": "Red", "value": "#ff0000" },
                    { "name": "Teal", "value": "#008080" }
                ]
            }"##,
        )
        .expect("manifest json")
    }

    #[test]
    fn builtin_catalogue_matches_shipped_presets() {
        let catalogue = Catalogue::builtin();
        let ids: Vec<_> = catalogue.models().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["magic_potion", "tiger", "octopus", "arch"]);
        assert_eq!(catalogue.default_model().map(|m| m.name.as_str()), Ok("Magic Potion"));

        for tint in catalogue.tints() {
            let parsed = Tint::from_hex(&tint.value).expect("builtin hex");
            assert_eq!(parsed.color, tint.color, "{}", tint.value);
        }
    }

    #[test]
    fn shipped_manifest_matches_builtin() {
        let manifest: ViewerManifest =
            serde_json::from_str(include_str!("../../../assets/catalogue.viewer.json"))
                .expect("shipped manifest");
        assert_eq!(Catalogue::from_manifest(&manifest), Ok(Catalogue::builtin()));
    }

    #[test]
    fn manifest_normalises_palette_values() {
        let catalogue = Catalogue::from_manifest(&manifest()).expect("valid manifest");
        assert_eq!(catalogue.default_tint().map(|t| t.value.as_str()), Ok("#FF0000"));
        assert_eq!(catalogue.tints()[1].name.as_deref(), Some("Teal"));
    }

    #[test]
    fn empty_manifest_is_rejected() {
        assert_eq!(
            Catalogue::from_manifest(&ViewerManifest::default()),
            Err(SelectionError::EmptyCatalogue("models"))
        );

        let mut no_tints = manifest();
        no_tints.tints.clear();
        assert_eq!(
            Catalogue::from_manifest(&no_tints),
            Err(SelectionError::EmptyCatalogue("tints"))
        );
    }

    #[test]
    fn bad_palette_value_is_rejected() {
        let mut broken = manifest();
        broken.tints[0].value = "crimson".into();
        assert_eq!(
            Catalogue::from_manifest(&broken),
            Err(SelectionError::InvalidTint("crimson".into()))
        );
    }

    #[test]
    fn models_resolve_by_id_name_or_path() {
        let catalogue = Catalogue::from_manifest(&manifest()).expect("valid manifest");
        for query in ["lamp", "LAMP", "models/lamp.glb", "/models/lamp.glb"] {
            assert_eq!(catalogue.find_model(query).map(|m| m.id.as_str()), Ok("lamp"), "{query}");
        }
        assert_eq!(
            catalogue.find_model("wooden crate").map(|m| m.id.as_str()),
            Ok("crate")
        );
        assert_eq!(
            catalogue.find_model("teapot"),
            Err(SelectionError::UnknownModel("teapot".into()))
        );
    }

    #[test]
    fn tints_resolve_by_name_or_hex() {
        let catalogue = Catalogue::builtin();

        let blue = catalogue.resolve_tint("blue").expect("palette name");
        assert_eq!(blue.value, "#1E90FF");

        let named_by_hex = catalogue.resolve_tint("#32cd32").expect("palette hex");
        assert_eq!(named_by_hex.name.as_deref(), Some("Green"));

        let custom = catalogue.resolve_tint("#12345680").expect("custom hex");
        assert_eq!(custom.name, None);
        assert_eq!(custom.value, "#12345680");
        let srgba = custom.color.to_srgba();
        assert!((srgba.alpha - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn malformed_hex_is_rejected() {
        let catalogue = Catalogue::builtin();
        for query in ["", "#FFF", "#GG0000", "#1234567", "purple"] {
            assert_eq!(
                catalogue.resolve_tint(query),
                Err(SelectionError::InvalidTint(query.to_string())),
                "{query:?}"
            );
        }
    }

    #[test]
    fn next_tint_cycles_and_restarts_after_custom() {
        let catalogue = Catalogue::builtin();
        let names = |tint: Option<&Tint>| tint.and_then(|t| t.name.clone());

        let pink = catalogue.tints()[0].clone();
        let green = catalogue.tints()[3].clone();
        assert_eq!(names(catalogue.next_tint(&pink)), Some("Yellow".into()));
        assert_eq!(names(catalogue.next_tint(&green)), Some("Pink".into()));

        let custom = Tint::from_hex("#010203").expect("custom hex");
        assert_eq!(names(catalogue.next_tint(&custom)), Some("Pink".into()));
    }

    #[test]
    fn catalogue_json_lists_models_and_tints() {
        let json = Catalogue::builtin().to_json();
        assert_eq!(json["models"][1]["path"], "models/tiger_model.glb");
        assert_eq!(json["tints"][2], json!({ "name": "Blue", "value": "#1E90FF" }));
    }
}
