use crate::rig::state::{RigInput, RigSettings, RigState};
use bevy::picking::events::{Move, Out, Pointer, Pressed, Released};
use bevy::picking::hover::HoverMap;
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;

/// Attach the drag observers to a rig root. Picking events bubble up from
/// the hit mesh, so the scene's own entities need no observers.
pub fn observe_pointer(rig: &mut EntityCommands) {
    rig.observe(on_pointer_pressed)
        .observe(on_pointer_moved)
        .observe(on_pointer_released)
        .observe(on_pointer_out);
}

pub fn on_pointer_pressed(
    trigger: Trigger<Pointer<Pressed>>,
    time: Res<Time<Real>>,
    settings: Res<RigSettings>,
    mut rigs: Query<&mut RigState>,
) {
    if trigger.event().button != PointerButton::Primary {
        return;
    }
    let Ok(mut state) = rigs.get_mut(trigger.target()) else {
        return;
    };

    *state = state.apply(
        RigInput::PointerDown {
            position: trigger.event().pointer_location.position,
            time: time.elapsed_secs_f64(),
        },
        settings.sensitivity,
    );
}

pub fn on_pointer_moved(
    trigger: Trigger<Pointer<Move>>,
    time: Res<Time<Real>>,
    settings: Res<RigSettings>,
    cameras: Query<&GlobalTransform, With<Camera3d>>,
    mut rigs: Query<&mut RigState>,
) {
    let Ok(mut state) = rigs.get_mut(trigger.target()) else {
        return;
    };
    if !state.dragging {
        return;
    }

    let camera_rotation = cameras
        .single()
        .map(|camera| camera.compute_transform().rotation)
        .unwrap_or(Quat::IDENTITY);

    *state = state.apply(
        RigInput::PointerMove {
            position: trigger.event().pointer_location.position,
            camera_rotation,
            time: time.elapsed_secs_f64(),
        },
        settings.sensitivity,
    );
}

pub fn on_pointer_released(
    trigger: Trigger<Pointer<Released>>,
    settings: Res<RigSettings>,
    rigs: Query<&mut RigState>,
) {
    if trigger.event().button != PointerButton::Primary {
        return;
    }
    release(trigger.target(), &settings, rigs);
}

/// Leaving the model ends the drag exactly like a release. Crossing from one
/// of its meshes onto another is not leaving.
pub fn on_pointer_out(
    trigger: Trigger<Pointer<Out>>,
    hover_map: Res<HoverMap>,
    parents: Query<&ChildOf>,
    settings: Res<RigSettings>,
    rigs: Query<&mut RigState>,
) {
    let rig = trigger.target();
    let still_over_rig = hover_map
        .get(&trigger.event().pointer_id)
        .is_some_and(|hovered| {
            hovered
                .keys()
                .any(|&hit| hit == rig || parents.iter_ancestors(hit).any(|a| a == rig))
        });
    if still_over_rig {
        return;
    }
    release(rig, &settings, rigs);
}

fn release(entity: Entity, settings: &RigSettings, mut rigs: Query<&mut RigState>) {
    let Ok(mut state) = rigs.get_mut(entity) else {
        return;
    };
    if state.dragging {
        *state = state.apply(RigInput::PointerUp, settings.sensitivity);
    }
}
