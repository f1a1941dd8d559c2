use crate::engine::assets::catalogue::Catalogue;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::model_selection::Selection;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the catalogue manifest to resolve.
    #[default]
    Loading,
    Running,
}

/// Native-only FPS overlay text.
#[derive(Component)]
pub struct FpsText;

/// Tell the host page the viewer is interactive and what it can show.
pub fn announce_viewer_ready(
    catalogue: Res<Catalogue>,
    selection: Res<Selection>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    info!(
        "→ Viewer ready: {} models, {} tints, showing '{}'",
        catalogue.models().len(),
        catalogue.tints().len(),
        selection.model_id
    );

    rpc_interface.send_notification(
        "viewer_ready",
        serde_json::json!({
            "catalogue": catalogue.to_json(),
            "selection": selection.to_json(),
        }),
    );
}
