//! Camera constraint логика
//!
//! Framing-правила раунда:
//! - edge clamp: камера не показывает мир за пределами уровня
//!   (inset = min(scaled_view/2, level/2) по каждой оси)
//! - follow: за летящей птицей (distance-0 constraint)
//! - pan/pinch: ручное управление с клампом scale и позиции
//! - return glide: eased возврат домой после завершения раунда
//!
//! Порядок систем важен: сначала input/glide/follow двигают камеру,
//! clamp_camera идёт последним и приводит позицию к допустимой.

use bevy::prelude::*;

use crate::components::{CameraFollow, CameraReturn, GameCamera, LevelMap, ViewSize};
use crate::input::events::{PanGesture, PanSuspended, PinchGesture};
use crate::logger;

/// Камера доехала домой — round может спавнить следующую птицу
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraReturned;

pub struct CameraConstraintPlugin;

impl Plugin for CameraConstraintPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraFollow>()
            .init_resource::<ViewSize>()
            .add_event::<CameraReturned>()
            .add_systems(Startup, spawn_game_camera)
            .add_systems(
                Update,
                (
                    apply_pan,
                    apply_pinch,
                    update_camera_return,
                    follow_target,
                    clamp_camera,
                )
                    .chain(),
            );
    }
}

/// Камера в домашней позиции (центр viewport), max_scale от ширины уровня
fn spawn_game_camera(mut commands: Commands, level: Res<LevelMap>, view: Res<ViewSize>) {
    let camera = GameCamera {
        max_scale: level.max_camera_scale(view.size.x),
        ..default()
    };
    commands.spawn((camera, Transform::from_translation(view.half().extend(0.0))));
}

/// Pan: screen delta × scale, если pan не заблокирован
fn apply_pan(
    mut pans: EventReader<PanGesture>,
    suspended: Res<PanSuspended>,
    mut camera: Query<(&GameCamera, &mut Transform), With<GameCamera>>,
) {
    let Ok((camera, mut transform)) = camera.single_mut() else {
        return;
    };

    if suspended.0 {
        pans.clear();
        return;
    }

    for pan in pans.read() {
        // Drag двигает мир за пальцем → камера в противоположную сторону
        transform.translation.x -= pan.delta.x * camera.scale;
        transform.translation.y -= pan.delta.y * camera.scale;
    }
}

/// Pinch: scale с клампом, world-точка под focus остаётся на месте
fn apply_pinch(
    mut pinches: EventReader<PinchGesture>,
    level: Res<LevelMap>,
    view: Res<ViewSize>,
    mut camera: Query<(&mut GameCamera, &mut Transform), With<GameCamera>>,
) {
    let Ok((mut camera, mut transform)) = camera.single_mut() else {
        return;
    };

    // max_scale зависит от живого ViewSize: клиент мог ресайзнуть окно
    // после Startup
    let max_scale = level.max_camera_scale(view.size.x);
    if camera.max_scale != max_scale {
        camera.max_scale = max_scale;
        let clamped = camera.clamped_scale(camera.scale);
        camera.scale = clamped;
    }

    for pinch in pinches.read() {
        if pinch.factor <= 0.0 {
            continue;
        }

        let old_scale = camera.scale;
        let new_scale = camera.clamped_scale(old_scale / pinch.factor);
        if (new_scale - old_scale).abs() < f32::EPSILON {
            continue;
        }
        camera.scale = new_scale;

        let adjusted = zoom_about(
            transform.translation.truncate(),
            pinch.focus,
            old_scale,
            new_scale,
        );
        transform.translation.x = adjusted.x;
        transform.translation.y = adjusted.y;
    }
}

/// Eased glide домой; по завершении снимает компонент и шлёт CameraReturned
fn update_camera_return(
    mut commands: Commands,
    time: Res<Time>,
    mut returned: EventWriter<CameraReturned>,
    mut camera: Query<(Entity, &mut CameraReturn, &mut Transform), With<GameCamera>>,
) {
    let Ok((entity, mut glide, mut transform)) = camera.single_mut() else {
        return;
    };

    glide.elapsed += time.delta_secs();
    let position = glide.sample();
    transform.translation.x = position.x;
    transform.translation.y = position.y;

    if glide.is_done() {
        commands.entity(entity).remove::<CameraReturn>();
        returned.write(CameraReturned);
        logger::log("camera returned home");
    }
}

/// Follow: позиция камеры = позиция цели (clamp сделает остальное)
fn follow_target(
    follow: Res<CameraFollow>,
    targets: Query<&Transform, Without<GameCamera>>,
    mut camera: Query<&mut Transform, With<GameCamera>>,
) {
    let Some(target) = follow.0 else {
        return;
    };
    let Ok(target_transform) = targets.get(target) else {
        return;
    };
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };

    transform.translation.x = target_transform.translation.x;
    transform.translation.y = target_transform.translation.y;
}

/// Edge clamp — всегда последним
fn clamp_camera(
    level: Res<LevelMap>,
    view: Res<ViewSize>,
    mut camera: Query<(&GameCamera, &mut Transform), With<GameCamera>>,
) {
    let Ok((camera, mut transform)) = camera.single_mut() else {
        return;
    };

    let clamped = clamp_to_level(
        transform.translation.truncate(),
        view.size,
        camera.scale,
        level.world_rect(),
    );
    transform.translation.x = clamped.x;
    transform.translation.y = clamped.y;
}

// ============================================================================
// Чистая математика (unit-тестируется без App)
// ============================================================================

/// Допустимый диапазон позиции камеры по одной оси
///
/// inset = min(scaled_view/2, level/2). Уровень меньше viewport'а
/// вырождает диапазон в центр уровня.
pub fn constraint_range(view_extent: f32, scale: f32, level_min: f32, level_max: f32) -> (f32, f32) {
    let half_view = view_extent * scale * 0.5;
    let half_level = (level_max - level_min) * 0.5;
    let inset = half_view.min(half_level);
    (level_min + inset, level_max - inset)
}

/// Кламп позиции камеры к level rect
pub fn clamp_to_level(position: Vec2, view: Vec2, scale: f32, level: Rect) -> Vec2 {
    let (min_x, max_x) = constraint_range(view.x, scale, level.min.x, level.max.x);
    let (min_y, max_y) = constraint_range(view.y, scale, level.min.y, level.max.y);
    Vec2::new(position.x.clamp(min_x, max_x), position.y.clamp(min_y, max_y))
}

/// Компенсация позиции при zoom: world-точка под screen focus неподвижна
///
/// world_under_focus = camera + focus × scale, приравниваем до/после.
pub fn zoom_about(camera_pos: Vec2, focus_offset: Vec2, old_scale: f32, new_scale: f32) -> Vec2 {
    camera_pos + focus_offset * (old_scale - new_scale)
}
