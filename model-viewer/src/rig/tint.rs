use crate::rig::{ModelRig, SceneReady};
use crate::tools::model_selection::Selection;
use bevy::prelude::*;

/// How a mesh surface can be painted.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceMaterial {
    /// PBR material whose base colour is replaced by the tint.
    Standard(Handle<StandardMaterial>),
    /// Any other material; left as authored.
    Other,
}

/// Surfaces of a rig's scene, classified once when the scene is ready.
#[derive(Component, Debug, Clone, Default)]
pub struct RigSurfaces(pub Vec<SurfaceMaterial>);

impl RigSurfaces {
    pub fn paintable(&self) -> usize {
        self.0
            .iter()
            .filter(|surface| matches!(surface, SurfaceMaterial::Standard(_)))
            .count()
    }
}

/// Colour last painted onto a rig's surfaces.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AppliedTint(pub Color);

/// Replace the base colour of every standard surface. Returns how many
/// materials were painted.
pub fn paint_surfaces(
    surfaces: &[SurfaceMaterial],
    color: Color,
    materials: &mut Assets<StandardMaterial>,
) -> usize {
    let mut painted = 0;
    for surface in surfaces {
        let SurfaceMaterial::Standard(handle) = surface else {
            continue;
        };
        if let Some(material) = materials.get_mut(handle) {
            material.base_color = color;
            painted += 1;
        }
    }
    painted
}

pub fn classify_rig_surfaces(
    mut commands: Commands,
    rigs: Query<(Entity, &ModelRig), (With<SceneReady>, Without<RigSurfaces>)>,
    children: Query<&Children>,
    meshes: Query<Option<&MeshMaterial3d<StandardMaterial>>, With<Mesh3d>>,
) {
    for (entity, rig) in &rigs {
        let surfaces: Vec<SurfaceMaterial> = children
            .iter_descendants(entity)
            .filter_map(|descendant| meshes.get(descendant).ok())
            .map(|material| match material {
                Some(standard) => SurfaceMaterial::Standard(standard.0.clone()),
                None => SurfaceMaterial::Other,
            })
            .collect();

        let surfaces = RigSurfaces(surfaces);
        debug!(
            "Model '{}': {} surfaces, {} paintable",
            rig.model_id,
            surfaces.0.len(),
            surfaces.paintable()
        );
        commands.entity(entity).insert(surfaces);
    }
}

/// Repaint any rig whose surfaces do not show the selected tint yet.
pub fn apply_selected_tint(
    mut commands: Commands,
    selection: Option<Res<Selection>>,
    rigs: Query<(Entity, &RigSurfaces, Option<&AppliedTint>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(selection) = selection else {
        return;
    };
    let color = selection.tint.color;

    for (entity, surfaces, applied) in &rigs {
        if applied.is_some_and(|applied| applied.0 == color) {
            continue;
        }

        let painted = paint_surfaces(&surfaces.0, color, &mut materials);
        debug!("Painted {} materials with {}", painted, selection.tint.value);
        commands.entity(entity).insert(AppliedTint(color));
    }
}
