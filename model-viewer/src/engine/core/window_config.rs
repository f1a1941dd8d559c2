use bevy::prelude::*;
use bevy::window::PresentMode;

#[cfg(not(target_arch = "wasm32"))]
use crate::constants::render_settings::NATIVE_WINDOW_SIZE;
#[cfg(not(target_arch = "wasm32"))]
use bevy::window::WindowResolution;

#[cfg(target_arch = "wasm32")]
use crate::constants::render_settings::CANVAS_SELECTOR;

/// Primary window bound to the host page's canvas; its parent element sets the size.
#[cfg(target_arch = "wasm32")]
pub fn create_window_config() -> Window {
    Window {
        title: "Model Viewer".to_string(),
        canvas: Some(CANVAS_SELECTOR.to_string()),
        fit_canvas_to_parent: true,
        prevent_default_event_handling: false,
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn create_window_config() -> Window {
    let (width, height) = NATIVE_WINDOW_SIZE;
    Window {
        title: "Model Viewer".to_string(),
        resolution: WindowResolution::new(width, height),
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}
