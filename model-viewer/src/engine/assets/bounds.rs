use bevy::math::Affine3A;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;

/// Axis-aligned bounds of a loaded scene, expressed in rig-local space.
/// Used once per load to recentre the scene and place the camera.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BoundingFrame {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingFrame {
    /// Smallest box containing every point, or `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |frame, point| {
            Some(match frame {
                None => Self {
                    min: point,
                    max: point,
                },
                Some(Self { min, max }) => Self {
                    min: min.min(point),
                    max: max.max(point),
                },
            })
        })
    }

    /// Union of mesh bounds, each carried into the frame's space by its affine.
    /// All eight corners are transformed so rotated meshes stay enclosed.
    pub fn from_mesh_bounds<'a>(
        bounds: impl IntoIterator<Item = (&'a Aabb, Affine3A)>,
    ) -> Option<Self> {
        Self::from_points(bounds.into_iter().flat_map(|(aabb, to_frame)| {
            let (min, max) = (Vec3::from(aabb.min()), Vec3::from(aabb.max()));
            (0..8).map(move |corner| {
                let local = Vec3::new(
                    if corner & 1 == 0 { min.x } else { max.x },
                    if corner & 2 == 0 { min.y } else { max.y },
                    if corner & 4 == 0 { min.z } else { max.z },
                );
                to_frame.transform_point3(local)
            })
        }))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Distance from the focus point that frames an object of the given extent.
///
/// Perspective: `|max_extent / 2 * tan(fov / 2)| * factor`.
/// Any other projection falls back to `max_extent * factor`.
pub fn camera_distance(extent: Vec3, projection: &Projection, factor: f32) -> f32 {
    let max_extent = extent.max_element();
    match projection {
        Projection::Perspective(perspective) => {
            (max_extent / 2.0 * (perspective.fov / 2.0).tan()).abs() * factor
        }
        _ => max_extent * factor,
    }
}
