use crate::engine::assets::catalogue::{Catalogue, ModelPreset};
use crate::rig::pointer::observe_pointer;
use crate::rig::state::RigState;
use crate::rig::{ModelRig, PendingFraming, RigScene, SceneReady};
use crate::tools::model_selection::Selection;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

/// Spawn a rig root holding `preset`'s glTF scene as its only child.
/// The rig starts at rest and is marked for framing once the scene is ready.
pub fn spawn_model_rig(
    commands: &mut Commands,
    asset_server: &AssetServer,
    preset: &ModelPreset,
) -> Entity {
    let mut rig = commands.spawn((
        Name::new(format!("rig:{}", preset.id)),
        ModelRig {
            model_id: preset.id.clone(),
            path: preset.path.clone(),
        },
        RigState::default(),
        Transform::default(),
        Visibility::default(),
    ));
    observe_pointer(&mut rig);
    let rig = rig.id();

    let scene = commands
        .spawn((
            Name::new(preset.name.clone()),
            SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(preset.path.clone()))),
            Transform::default(),
            ChildOf(rig),
        ))
        .observe(
            move |_trigger: Trigger<SceneInstanceReady>, mut commands: Commands| {
                // The rig may have been replaced while the scene was loading.
                commands.entity(rig).try_insert((SceneReady, PendingFraming));
            },
        )
        .id();

    commands.entity(rig).insert(RigScene(scene));
    rig
}

/// Keep exactly one rig in the world, showing the selected model.
pub fn sync_model_selection(
    mut commands: Commands,
    selection: Res<Selection>,
    catalogue: Res<Catalogue>,
    asset_server: Res<AssetServer>,
    rigs: Query<(Entity, &ModelRig)>,
) {
    if rigs.iter().any(|(_, rig)| rig.model_id == selection.model_id) {
        return;
    }

    let Some(preset) = catalogue.model_by_id(&selection.model_id) else {
        warn!("Selected model '{}' is not in the catalogue", selection.model_id);
        return;
    };

    for (entity, rig) in &rigs {
        debug!("Despawning rig for '{}'", rig.model_id);
        commands.entity(entity).despawn();
    }

    info!("Loading model '{}' from {}", preset.id, preset.path);
    spawn_model_rig(&mut commands, &asset_server, preset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::state::RigSettings;

    fn loader_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Scene>()
            .init_resource::<RigSettings>()
            .add_systems(Update, sync_model_selection);

        let catalogue = Catalogue::builtin();
        app.insert_resource(Selection::initial(&catalogue).expect("builtin selection"))
            .insert_resource(catalogue);
        app
    }

    fn rig_models(app: &mut App) -> Vec<String> {
        let mut query = app.world_mut().query::<&ModelRig>();
        query
            .iter(app.world())
            .map(|rig| rig.model_id.clone())
            .collect()
    }

    #[test]
    fn first_frame_spawns_selected_model() {
        let mut app = loader_app();
        app.update();

        assert_eq!(rig_models(&mut app), vec!["magic_potion".to_string()]);

        let mut query = app.world_mut().query::<(&RigState, &RigScene)>();
        let (state, scene) = query.single(app.world()).expect("one rig");
        assert_eq!(*state, RigState::default());
        assert!(app.world().get::<SceneRoot>(scene.0).is_some());
    }

    #[test]
    fn unchanged_selection_keeps_rig() {
        let mut app = loader_app();
        app.update();
        let mut query = app.world_mut().query_filtered::<Entity, With<ModelRig>>();
        let first = query.single(app.world()).expect("one rig");

        app.update();
        let mut query = app.world_mut().query_filtered::<Entity, With<ModelRig>>();
        assert_eq!(query.single(app.world()).ok(), Some(first));
    }

    #[test]
    fn switching_model_replaces_rig_and_scene() {
        let mut app = loader_app();
        app.update();
        let mut query = app.world_mut().query::<(Entity, &RigScene)>();
        let (old_rig, old_scene) = query
            .single(app.world())
            .map(|(entity, scene)| (entity, scene.0))
            .expect("one rig");

        app.world_mut().resource_mut::<Selection>().model_id = "arch".into();
        app.update();

        assert_eq!(rig_models(&mut app), vec!["arch".to_string()]);
        assert!(app.world().get_entity(old_rig).is_err());
        assert!(app.world().get_entity(old_scene).is_err());
    }

    #[test]
    fn unknown_model_keeps_current_rig() {
        let mut app = loader_app();
        app.update();

        app.world_mut().resource_mut::<Selection>().model_id = "teapot".into();
        app.update();

        assert_eq!(rig_models(&mut app), vec!["magic_potion".to_string()]);
    }
}
