use crate::constants::render_settings::{
    AMBIENT_BRIGHTNESS, STUDIO_LIGHT_INTENSITY, STUDIO_LIGHT_POSITION, STUDIO_LIGHT_RANGE,
};
use bevy::prelude::*;

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        Name::new("studio_light"),
        PointLight {
            intensity: STUDIO_LIGHT_INTENSITY,
            range: STUDIO_LIGHT_RANGE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(STUDIO_LIGHT_POSITION),
    ));
}
