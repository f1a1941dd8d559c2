//! Interactive object rig wrapping the loaded glTF scene.
//!
//! A rig is a root entity carrying `RigState` with the glTF `SceneRoot` as its
//! only child. Pointer observers on the root turn drags into rotation, a per
//! frame system coasts on the residual velocity, and once the scene reports
//! ready it is recentred, framed by the camera and tinted.
//!
//! ## Lifecycle
//!
//! ```text
//! sync_model_selection()           spawn root + SceneRoot child
//!   └─> SceneInstanceReady         insert SceneReady + PendingFraming
//!       ├─> frame_pending_models() recentre scene, set camera distance,
//!       │                          reset RigState, notify model_loaded
//!       ├─> classify_rig_surfaces() SurfaceMaterial per mesh, once
//!       └─> apply_selected_tint()  repaint whenever the selected tint differs
//! ```
//!
//! Switching models despawns the whole rig; nothing carries over.

use crate::engine::core::app_state::AppState;
use bevy::prelude::*;
use bevy::render::view::VisibilitySystems;
use bevy::transform::TransformSystem;

/// Auto-framing of freshly loaded scenes.
pub mod framing;

/// Pointer observers translating picking events into rig input.
pub mod pointer;

/// Orientation state and its pure update functions.
pub mod state;

/// Surface classification and tint painting.
pub mod tint;

use framing::frame_pending_models;
use state::{RigSettings, RigState};
use tint::{apply_selected_tint, classify_rig_surfaces};

/// Root of a model rig. `model_id` refers to a catalogue preset.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct ModelRig {
    pub model_id: String,
    pub path: String,
}

/// The `SceneRoot` child holding the glTF instance.
#[derive(Component, Debug, Clone, Copy)]
pub struct RigScene(pub Entity);

/// The scene instance has spawned all its entities.
#[derive(Component, Debug, Default)]
pub struct SceneReady;

/// Waiting for mesh bounds so the scene can be framed.
#[derive(Component, Debug, Default)]
pub struct PendingFraming;

pub struct RigPlugin;

impl Plugin for RigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RigSettings>()
            .add_systems(
                Update,
                (
                    advance_rigs,
                    (classify_rig_surfaces, apply_selected_tint).chain(),
                )
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                PostUpdate,
                frame_pending_models
                    .after(VisibilitySystems::CalculateBounds)
                    .after(TransformSystem::TransformPropagate),
            );
    }
}

/// Coast every rig on its residual velocity and publish the orientation.
pub fn advance_rigs(
    time: Res<Time>,
    settings: Res<RigSettings>,
    mut rigs: Query<(&mut RigState, &mut Transform), With<ModelRig>>,
) {
    let delta_secs = time.delta_secs();
    for (mut state, mut transform) in &mut rigs {
        *state = state.advance(delta_secs, settings.decay);
        transform.rotation = state.rotation();
    }
}
