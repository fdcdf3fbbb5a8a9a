//! Мост GameCamera (simulation) → Camera2d (bevy render)
//!
//! Camera-constraint логика целиком живёт в симуляции; клиент только
//! вешает Camera2d на ту же entity, кормит ViewSize из окна и
//! синхронизирует orthographic projection scale.

use bevy::prelude::*;
use slingshot_simulation::{GameCamera, ViewSize};

pub struct CameraBridgePlugin;

impl Plugin for CameraBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (attach_camera2d, sync_view_size, sync_projection).chain(),
        );
    }
}

/// Вешает Camera2d на entity симуляционной камеры (однократно)
fn attach_camera2d(
    mut commands: Commands,
    query: Query<Entity, (With<GameCamera>, Without<Camera>)>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert(Camera2d);
    }
}

/// ViewSize из реального окна (clamp-математика зависит от него)
fn sync_view_size(mut view: ResMut<ViewSize>, windows: Query<&Window>) {
    let Ok(window) = windows.single() else {
        return;
    };
    view.size = Vec2::new(window.width(), window.height());
}

/// GameCamera.scale → orthographic projection scale
fn sync_projection(mut query: Query<(&GameCamera, &mut Projection)>) {
    for (camera, mut projection) in query.iter_mut() {
        if let Projection::Orthographic(ortho) = projection.as_mut() {
            ortho.scale = camera.scale;
        }
    }
}
