//! Сырой mouse input → gesture события симуляции
//!
//! Жесты:
//! - ЛКМ down → TouchBegan (world-space); если курсор над птицей, drag
//!   идёт как Touch*, иначе как Pan
//! - ЛКМ drag: TouchMoved (по птице) или PanGesture (мимо)
//! - ЛКМ up → TouchEnded
//! - Колесо мыши → PinchGesture (focus = курсор)
//!
//! Симуляция сама решает что делать с событиями (round FSM, camera);
//! здесь только трансляция координат.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use slingshot_simulation::{
    ActiveBird, Bird, GameCamera, PanGesture, PinchGesture, TouchBegan, TouchEnded, TouchMoved,
};

/// Во что превратился текущий ЛКМ-drag
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    #[default]
    None,
    Bird,
    Pan,
}

/// Шаг zoom'а на один щелчок колеса
const WHEEL_ZOOM_STEP: f32 = 1.1;

pub struct GesturePlugin;

impl Plugin for GesturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragMode>()
            .add_systems(Update, (emit_touch_and_pan, emit_pinch));
    }
}

fn emit_touch_and_pan(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<GameCamera>>,
    birds: Query<(&Bird, &Transform), With<ActiveBird>>,
    mut mode: ResMut<DragMode>,
    mut touch_began: EventWriter<TouchBegan>,
    mut touch_moved: EventWriter<TouchMoved>,
    mut touch_ended: EventWriter<TouchEnded>,
    mut pan: EventWriter<PanGesture>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let cursor_world = window
        .cursor_position()
        .and_then(|screen| camera.viewport_to_world_2d(camera_transform, screen).ok());

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(world) = cursor_world {
            let over_bird = birds
                .single()
                .map(|(bird, transform)| bird.contains(transform.translation.truncate(), world))
                .unwrap_or(false);
            *mode = if over_bird { DragMode::Bird } else { DragMode::Pan };
            touch_began.write(TouchBegan { position: world });
        }
    }

    if buttons.pressed(MouseButton::Left) {
        match *mode {
            DragMode::Bird => {
                motion.clear();
                if let Some(world) = cursor_world {
                    touch_moved.write(TouchMoved { position: world });
                }
            }
            DragMode::Pan => {
                let delta: Vec2 = motion.read().map(|m| m.delta).sum();
                if delta != Vec2::ZERO {
                    // Screen y-down → world y-up
                    pan.write(PanGesture {
                        delta: Vec2::new(delta.x, -delta.y),
                    });
                }
            }
            DragMode::None => motion.clear(),
        }
    } else {
        motion.clear();
    }

    if buttons.just_released(MouseButton::Left) {
        if *mode == DragMode::Bird {
            touch_ended.write(TouchEnded {
                position: cursor_world.unwrap_or_default(),
            });
        }
        *mode = DragMode::None;
    }
}

fn emit_pinch(
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window>,
    mut pinches: EventWriter<PinchGesture>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    for event in wheel.read() {
        if event.y == 0.0 {
            continue;
        }
        let factor = if event.y > 0.0 {
            WHEEL_ZOOM_STEP
        } else {
            1.0 / WHEEL_ZOOM_STEP
        };

        // Focus: offset курсора от центра окна, оси world-ориентированы
        let focus = window
            .cursor_position()
            .map(|cursor| {
                Vec2::new(
                    cursor.x - window.width() * 0.5,
                    window.height() * 0.5 - cursor.y,
                )
            })
            .unwrap_or(Vec2::ZERO);

        pinches.write(PinchGesture { factor, focus });
    }
}
