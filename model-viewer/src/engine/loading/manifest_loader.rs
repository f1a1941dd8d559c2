use crate::constants::path::CATALOGUE_MANIFEST_PATH;
use crate::engine::assets::catalogue::{Catalogue, ViewerManifest};
use crate::engine::core::app_state::AppState;
use crate::tools::model_selection::Selection;
use bevy::asset::LoadState;
use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<ViewerManifest>>,
}

/// Outcome of polling the manifest asset.
#[derive(Debug)]
pub enum ManifestStatus<'a> {
    Pending,
    Loaded(&'a ViewerManifest),
    Failed(String),
}

pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading catalogue from: {}", CATALOGUE_MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(CATALOGUE_MANIFEST_PATH));
}

/// Catalogue to run with, or `None` while the manifest is still in flight.
/// Unreadable or invalid manifests fall back to the built-in presets.
pub fn catalogue_for(status: ManifestStatus) -> Option<Catalogue> {
    match status {
        ManifestStatus::Pending => None,
        ManifestStatus::Loaded(manifest) => match Catalogue::from_manifest(manifest) {
            Ok(catalogue) => Some(catalogue),
            Err(e) => {
                warn!("Invalid catalogue manifest ({}), using built-in presets", e);
                Some(Catalogue::builtin())
            }
        },
        ManifestStatus::Failed(reason) => {
            warn!(
                "Catalogue manifest failed to load ({}), using built-in presets",
                reason
            );
            Some(Catalogue::builtin())
        }
    }
}

pub fn resolve_catalogue(
    mut commands: Commands,
    manifest_loader: Res<ManifestLoader>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<ViewerManifest>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    let status = match (manifests.get(handle), asset_server.load_state(handle.id())) {
        (Some(manifest), _) => ManifestStatus::Loaded(manifest),
        (None, LoadState::Failed(e)) => ManifestStatus::Failed(e.to_string()),
        (None, _) => ManifestStatus::Pending,
    };

    let Some(catalogue) = catalogue_for(status) else {
        return;
    };

    let selection = match Selection::initial(&catalogue) {
        Ok(selection) => selection,
        Err(e) => {
            error!("Cannot start viewer: {}", e);
            return;
        }
    };

    info!(
        "✓ Catalogue resolved: {} models, {} tints",
        catalogue.models().len(),
        catalogue.tints().len()
    );
    commands.insert_resource(catalogue);
    commands.insert_resource(selection);
    next_state.set(AppState::Running);
}
