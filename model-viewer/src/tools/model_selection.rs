use crate::engine::assets::catalogue::{Catalogue, Tint};
use crate::error::SelectionResult;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use serde_json::{Value, json};

/// Model and tint currently shown. Read by the rig systems every frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Selection {
    pub model_id: String,
    pub tint: Tint,
}

impl Selection {
    /// First model and first tint of the catalogue.
    pub fn initial(catalogue: &Catalogue) -> SelectionResult<Self> {
        Ok(Self {
            model_id: catalogue.default_model()?.id.clone(),
            tint: catalogue.default_tint()?.clone(),
        })
    }

    /// Selection with the model swapped. `self` is untouched on error.
    pub fn with_model(&self, catalogue: &Catalogue, query: &str) -> SelectionResult<Self> {
        let model = catalogue.find_model(query)?;
        Ok(Self {
            model_id: model.id.clone(),
            ..self.clone()
        })
    }

    /// Selection with the tint swapped. `self` is untouched on error.
    pub fn with_tint(&self, catalogue: &Catalogue, query: &str) -> SelectionResult<Self> {
        Ok(Self {
            tint: catalogue.resolve_tint(query)?,
            ..self.clone()
        })
    }

    pub fn to_json(&self) -> Value {
        json!({
            "model": self.model_id,
            "tint": self.tint.to_json(),
        })
    }
}

/// Push `selection_changed` whenever the selection is modified after startup.
pub fn notify_selection_changes(
    selection: Res<Selection>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !selection.is_changed() || selection.is_added() {
        return;
    }

    info!(
        "Selection changed: model={} tint={}",
        selection.model_id, selection.tint.value
    );
    rpc_interface.send_notification("selection_changed", selection.to_json());
}

#[cfg(not(target_arch = "wasm32"))]
const MODEL_SHORTCUTS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Digit keys pick the n-th catalogue model, `T` steps through the palette.
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_selection_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    catalogue: Res<Catalogue>,
    mut selection: ResMut<Selection>,
) {
    let mut next = selection.clone();

    for (index, key) in MODEL_SHORTCUTS.iter().enumerate() {
        if !keyboard.just_pressed(*key) {
            continue;
        }
        match catalogue.model_at(index) {
            Some(model) => next.model_id = model.id.clone(),
            None => debug!("No model bound to shortcut {}", index + 1),
        }
    }

    if keyboard.just_pressed(KeyCode::KeyT) {
        if let Some(tint) = catalogue.next_tint(&next.tint) {
            next.tint = tint.clone();
        }
    }

    selection.set_if_neq(next);
}

/// No keyboard shortcuts on the web: the host page drives selection over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_selection_shortcuts() {}
