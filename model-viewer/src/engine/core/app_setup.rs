use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
// Crate engine modules
use crate::constants::path::CATALOGUE_MANIFEST_EXTENSION;
use crate::constants::render_settings::{CLEAR_COLOUR, LOG_FILTER};
use crate::engine::assets::catalogue::ViewerManifest;
use crate::engine::camera::viewport_camera::{
    ViewportCamera, camera_controller, spawn_viewport_camera,
};
use crate::engine::core::app_state::{AppState, announce_viewer_ready};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{ManifestLoader, resolve_catalogue, start_loading};
use crate::engine::loading::model_loader::sync_model_selection;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::systems::fps_tracking::fps_notification_system;
// Rig, tools and Web RPC
use crate::rig::RigPlugin;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::model_selection::{handle_selection_shortcuts, notify_selection_changes};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(MeshPickingPlugin)
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers ViewerManifest as a loadable asset type from `.viewer.json` files.
        .add_plugins(JsonAssetPlugin::<ViewerManifest>::new(&[
            CATALOGUE_MANIFEST_EXTENSION,
        ]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(RigPlugin);

    app.insert_resource(ClearColor(CLEAR_COLOUR))
        .init_resource::<ViewportCamera>()
        .init_resource::<ManifestLoader>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            resolve_catalogue.run_if(in_state(AppState::Loading)),
        )
        .add_systems(OnEnter(AppState::Running), announce_viewer_ready);

    let runtime_systems = (
        sync_model_selection,
        camera_controller,
        fps_notification_system,
        notify_selection_changes,
        handle_selection_shortcuts, // Native shortcuts or no-op for WASM
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        level: Level::INFO,
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}

fn setup(mut commands: Commands, viewport: Res<ViewportCamera>) {
    info!("=== MODEL VIEWER ===");

    spawn_lighting(&mut commands);
    spawn_viewport_camera(&mut commands, &viewport);

    #[cfg(not(target_arch = "wasm32"))]
    create_native_overlays(&mut commands);
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            // The overlay must not swallow pointer hits meant for the model.
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.2, 0.2, 0.2)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                Pickable::IGNORE,
                FpsText,
            ));
        });
}
