use crate::engine::assets::bounds::{BoundingFrame, camera_distance};
use crate::engine::camera::viewport_camera::ViewportCamera;
use crate::rig::state::{RigSettings, RigState};
use crate::rig::{ModelRig, PendingFraming, RigScene};
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::math::Affine3A;
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;
use bevy::render::primitives::Aabb;

/// Mesh bounds of every descendant of `root`, in `root`'s local space.
///
/// Meshes without an `Aabb` component (culling disabled) are bounded from
/// their loaded asset; meshes with no positions are skipped. `None` while
/// any mesh asset is still loading.
fn collect_mesh_bounds(
    root: Entity,
    root_transform: &GlobalTransform,
    children: &Query<&Children>,
    meshes: &Query<(&Mesh3d, Option<&Aabb>, &GlobalTransform)>,
    mesh_assets: &Assets<Mesh>,
) -> Option<Vec<(Aabb, Affine3A)>> {
    let to_local = root_transform.affine().inverse();
    let mut bounds = Vec::new();

    for descendant in children.iter_descendants(root) {
        let Ok((mesh, aabb, mesh_transform)) = meshes.get(descendant) else {
            continue;
        };
        let aabb = match aabb {
            Some(aabb) => *aabb,
            None => match mesh_assets.get(&mesh.0)?.compute_aabb() {
                Some(aabb) => aabb,
                None => {
                    debug!("Skipping mesh {} without positions", descendant);
                    continue;
                }
            },
        };
        bounds.push((aabb, to_local * mesh_transform.affine()));
    }

    Some(bounds)
}

/// Recentre each newly spawned scene on its rig, place the camera so the
/// whole model is in view and restart the rig from rest.
pub fn frame_pending_models(
    mut commands: Commands,
    mut rigs: Query<
        (
            Entity,
            &ModelRig,
            &RigScene,
            &GlobalTransform,
            &mut RigState,
            &mut Transform,
        ),
        With<PendingFraming>,
    >,
    children: Query<&Children>,
    meshes: Query<(&Mesh3d, Option<&Aabb>, &GlobalTransform)>,
    mesh_assets: Res<Assets<Mesh>>,
    mut scene_transforms: Query<&mut Transform, (Without<ModelRig>, Without<Camera3d>)>,
    cameras: Query<&Projection, With<Camera3d>>,
    mut viewport: ResMut<ViewportCamera>,
    settings: Res<RigSettings>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for (entity, rig, scene, rig_global, mut state, mut rig_transform) in &mut rigs {
        let Some(bounds) = collect_mesh_bounds(entity, rig_global, &children, &meshes, &mesh_assets)
        else {
            // Mesh assets still loading; try again next frame.
            continue;
        };

        commands.entity(entity).remove::<PendingFraming>();
        state.reset();
        rig_transform.rotation = Quat::IDENTITY;

        let Some(frame) = BoundingFrame::from_mesh_bounds(bounds.iter().map(|(aabb, t)| (aabb, *t)))
        else {
            warn!("Model '{}' has no mesh bounds, leaving it unframed", rig.model_id);
            continue;
        };

        if let Ok(mut scene_transform) = scene_transforms.get_mut(scene.0) {
            scene_transform.translation -= frame.center();
        }

        let distance = match cameras.single() {
            Ok(projection) => {
                let distance = camera_distance(frame.extent(), projection, settings.framing_factor);
                viewport.set_distance(distance);
                distance
            }
            Err(e) => {
                warn!("No viewport camera to frame '{}': {}", rig.model_id, e);
                viewport.distance
            }
        };

        info!(
            "Framed '{}' ({}): center {:?}, extent {:?}, camera distance {:.3}",
            rig.model_id,
            rig.path,
            frame.center(),
            frame.extent(),
            distance
        );

        rpc_interface.send_notification(
            "model_loaded",
            serde_json::json!({
                "model": rig.model_id,
                "center": frame.center().to_array(),
                "extent": frame.extent().to_array(),
                "camera_distance": distance,
            }),
        );

        commands.entity(entity).insert(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::viewport_camera::viewport_projection;
    use crate::rig::state::RigInput;
    use approx::assert_relative_eq;
    use bevy::asset::RenderAssetUsages;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::render::mesh::PrimitiveTopology;

    struct Scene {
        world: World,
        rig: Entity,
        scene: Entity,
    }

    /// A rig whose scene holds two unit cubes at x = 2 and x = 4, with a
    /// drag in progress and some leftover spin.
    fn loaded_scene() -> Scene {
        let mut world = World::new();
        world.init_resource::<ViewportCamera>();
        world.init_resource::<RigSettings>();
        world.init_resource::<WebRpcInterface>();
        world.init_resource::<Assets<Mesh>>();
        world.spawn((Camera3d::default(), viewport_projection()));

        let mut state = RigState::default().apply(
            RigInput::PointerDown {
                position: Vec2::ZERO,
                time: 0.0,
            },
            0.01,
        );
        state.orientation = Vec3::new(0.3, 1.2, 0.0);
        state.angular_velocity = Vec3::splat(4.0);

        let rig = world
            .spawn((
                ModelRig {
                    model_id: "arch".into(),
                    path: "models/arch.glb".into(),
                },
                state,
                Transform::from_rotation(Quat::from_rotation_y(1.2)),
                GlobalTransform::default(),
                PendingFraming,
            ))
            .id();
        let scene = world
            .spawn((Transform::default(), GlobalTransform::default(), ChildOf(rig)))
            .id();
        world.entity_mut(rig).insert(RigScene(scene));

        let unit = Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5));
        for x in [2.0, 4.0] {
            world.spawn((
                Mesh3d(Handle::default()),
                unit,
                GlobalTransform::from_translation(Vec3::new(x, 1.0, 0.0)),
                ChildOf(scene),
            ));
        }

        Scene { world, rig, scene }
    }

    #[test]
    fn scene_is_recentred_and_camera_framed() {
        let Scene {
            mut world,
            rig,
            scene,
        } = loaded_scene();

        let _ = world.run_system_once(frame_pending_models);

        let offset = world.get::<Transform>(scene).map(|t| t.translation);
        assert_eq!(offset, Some(Vec3::new(-3.0, -1.0, 0.0)));

        let frame = world.get::<BoundingFrame>(rig).copied().expect("frame inserted");
        assert!(frame.extent().abs_diff_eq(Vec3::new(3.0, 1.0, 1.0), 1e-6));

        let expected = 1.5 * 25f32.to_radians().tan() * 2.5;
        assert_relative_eq!(world.resource::<ViewportCamera>().distance, expected, epsilon = 1e-5);
        assert!(world.get::<PendingFraming>(rig).is_none());
    }

    #[test]
    fn framing_resets_orientation_and_velocity() {
        let Scene { mut world, rig, .. } = loaded_scene();

        let _ = world.run_system_once(frame_pending_models);

        assert_eq!(world.get::<RigState>(rig).copied(), Some(RigState::default()));
        assert_eq!(
            world.get::<Transform>(rig).map(|t| t.rotation),
            Some(Quat::IDENTITY)
        );
    }

    #[test]
    fn model_loaded_is_announced() {
        let Scene { mut world, .. } = loaded_scene();

        let _ = world.run_system_once(frame_pending_models);

        let rpc = world.resource::<WebRpcInterface>();
        assert_eq!(rpc.outgoing_notifications.len(), 1);
        let params = rpc.outgoing_notifications[0].params.clone().unwrap_or_default();
        assert_eq!(params["model"], "arch");
        assert_eq!(params["center"], serde_json::json!([3.0, 1.0, 0.0]));
    }

    #[test]
    fn waits_for_missing_bounds() {
        let Scene {
            mut world, scene, ..
        } = loaded_scene();
        world.spawn((
            Mesh3d(Handle::default()),
            GlobalTransform::default(),
            ChildOf(scene),
        ));

        let _ = world.run_system_once(frame_pending_models);

        let mut pending = world.query_filtered::<Entity, With<PendingFraming>>();
        assert_eq!(pending.iter(&world).count(), 1);
        assert_relative_eq!(world.resource::<ViewportCamera>().distance, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn scene_without_meshes_is_left_unframed() {
        let mut world = World::new();
        world.init_resource::<ViewportCamera>();
        world.init_resource::<RigSettings>();
        world.init_resource::<WebRpcInterface>();
        world.init_resource::<Assets<Mesh>>();

        let rig = world
            .spawn((
                ModelRig {
                    model_id: "empty".into(),
                    path: "models/empty.glb".into(),
                },
                RigState::default(),
                Transform::default(),
                GlobalTransform::default(),
                PendingFraming,
            ))
            .id();
        let scene = world.spawn((Transform::default(), ChildOf(rig))).id();
        world.entity_mut(rig).insert(RigScene(scene));

        let _ = world.run_system_once(frame_pending_models);

        assert!(world.get::<PendingFraming>(rig).is_none());
        assert!(world.get::<BoundingFrame>(rig).is_none());
        assert_relative_eq!(world.resource::<ViewportCamera>().distance, 10.0, epsilon = 1e-4);
        assert!(world.resource::<WebRpcInterface>().outgoing_notifications.is_empty());
    }

    fn add_mesh(world: &mut World, mesh: Mesh) -> Handle<Mesh> {
        world.resource_mut::<Assets<Mesh>>().add(mesh)
    }

    #[test]
    fn loaded_mesh_without_aabb_is_bounded_from_its_asset() {
        let Scene {
            mut world,
            rig,
            scene,
        } = loaded_scene();
        let cube = add_mesh(&mut world, Mesh::from(Cuboid::default()));
        world.spawn((
            Mesh3d(cube),
            GlobalTransform::from_translation(Vec3::new(6.0, 1.0, 0.0)),
            ChildOf(scene),
        ));

        let _ = world.run_system_once(frame_pending_models);

        let frame = world.get::<BoundingFrame>(rig).copied().expect("frame inserted");
        assert!(frame.center().abs_diff_eq(Vec3::new(4.0, 1.0, 0.0), 1e-6));
        assert!(frame.extent().abs_diff_eq(Vec3::new(5.0, 1.0, 1.0), 1e-6));
    }

    #[test]
    fn mesh_without_positions_is_skipped() {
        let Scene {
            mut world,
            rig,
            scene,
        } = loaded_scene();
        let empty = add_mesh(
            &mut world,
            Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default()),
        );
        world.spawn((
            Mesh3d(empty),
            GlobalTransform::from_translation(Vec3::new(100.0, 0.0, 0.0)),
            ChildOf(scene),
        ));

        let _ = world.run_system_once(frame_pending_models);

        assert!(world.get::<PendingFraming>(rig).is_none());
        let frame = world.get::<BoundingFrame>(rig).copied().expect("frame inserted");
        assert!(frame.center().abs_diff_eq(Vec3::new(3.0, 1.0, 0.0), 1e-6));
        assert_eq!(
            world.resource::<WebRpcInterface>().outgoing_notifications.len(),
            1
        );
    }
}
