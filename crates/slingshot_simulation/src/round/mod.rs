//! Round FSM — координация input, физики и камеры (THE CORE)
//!
//! Жизненный цикл раунда:
//! 1. Ready: птица kinematic на рогатке; TouchBegan по птице → Grabbed
//! 2. Drag: TouchMoved двигает птицу в радиусе 3 × size вокруг anchor'а
//! 3. Launch: TouchEnded → Dynamic body + импульс (anchor - позиция),
//!    камера следует за птицей, state = Flying
//! 4. Rest: Rapier сообщил покой (Sleeping или пороги скорости N тиков
//!    подряд) → птицу despawn, камера отвязана, state = Finished
//! 5. Tap в Finished → Animating: камера едет домой 2 s; по CameraReturned
//!    спавним следующую птицу из очереди (или логируем "no more birds")

use bevy::prelude::*;
use bevy_rapier2d::plugin::PhysicsSet;
use bevy_rapier2d::prelude::{ExternalImpulse, RigidBody, Sleeping, Velocity};

use crate::camera::CameraReturned;
use crate::components::{
    ActiveBird, Bird, BirdQueue, CameraFollow, CameraReturn, GameCamera, Grabbed, LevelMap,
    RoundState, ViewSize,
};
use crate::input::events::{PanSuspended, TouchBegan, TouchEnded, TouchMoved};
use crate::logger;
use crate::physics;

/// Счётчик fixed-тиков ниже rest-порогов (вешается на птицу при запуске)
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct RestCounter(pub u32);

pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoundState>()
            .init_resource::<BirdQueue>()
            .add_systems(
                Update,
                (
                    handle_touch_began,
                    handle_touch_moved,
                    handle_touch_ended,
                    advance_round_after_return,
                )
                    .chain(),
            )
            // Rest-детекция после шага физики (читаем writeback Rapier)
            .add_systems(FixedUpdate, detect_bird_rest.after(PhysicsSet::Writeback));
    }
}

/// TouchBegan: grab птицы (Ready) или запуск возврата камеры (Finished)
fn handle_touch_began(
    mut commands: Commands,
    mut touches: EventReader<TouchBegan>,
    mut state: ResMut<RoundState>,
    mut pan: ResMut<PanSuspended>,
    view: Res<ViewSize>,
    mut bird_query: Query<(Entity, &Bird, &mut Transform), (With<ActiveBird>, Without<GameCamera>)>,
    camera_query: Query<(Entity, &Transform), With<GameCamera>>,
) {
    for touch in touches.read() {
        match *state {
            RoundState::Ready => {
                let Ok((entity, bird, mut transform)) = bird_query.single_mut() else {
                    continue;
                };
                if bird.contains(transform.translation.truncate(), touch.position) {
                    commands.entity(entity).insert(Grabbed);
                    transform.translation.x = touch.position.x;
                    transform.translation.y = touch.position.y;
                    pan.0 = true;
                }
            }
            RoundState::Finished => {
                let Ok((camera, camera_transform)) = camera_query.single() else {
                    continue;
                };
                commands.entity(camera).insert(CameraReturn::new(
                    camera_transform.translation.truncate(),
                    view.half(),
                ));
                pan.0 = true;
                *state = RoundState::Animating;
            }
            // Полёт и glide tap'ы игнорируют
            RoundState::Flying | RoundState::Animating => {}
        }
    }
}

/// TouchMoved: drag схваченной птицы с клампом к anchor-радиусу
fn handle_touch_moved(
    mut moves: EventReader<TouchMoved>,
    level: Res<LevelMap>,
    mut grabbed: Query<(&Bird, &mut Transform), With<Grabbed>>,
) {
    let Ok((bird, mut transform)) = grabbed.single_mut() else {
        moves.clear();
        return;
    };

    let anchor = level.anchor_position();
    for touch in moves.read() {
        let clamped = clamp_to_anchor(touch.position, anchor, bird.drag_radius());
        transform.translation.x = clamped.x;
        transform.translation.y = clamped.y;
    }
}

/// TouchEnded: запуск
///
/// Импульс пропорционален оттяжке (anchor - позиция птицы). Release ровно
/// на anchor'е даёт нулевой импульс — rest-детектор закончит раунд сам.
fn handle_touch_ended(
    mut commands: Commands,
    mut ends: EventReader<TouchEnded>,
    mut state: ResMut<RoundState>,
    mut pan: ResMut<PanSuspended>,
    mut follow: ResMut<CameraFollow>,
    level: Res<LevelMap>,
    grabbed: Query<(Entity, &Transform), (With<Grabbed>, With<ActiveBird>)>,
) {
    if ends.is_empty() {
        return;
    }
    ends.clear();

    // TouchEnded без grab'а — no-op
    let Ok((entity, transform)) = grabbed.single() else {
        return;
    };

    let draw = level.anchor_position() - transform.translation.truncate();
    commands
        .entity(entity)
        .remove::<Grabbed>()
        .insert(RigidBody::Dynamic)
        .insert(RestCounter::default())
        .insert(ExternalImpulse {
            impulse: draw * physics::LAUNCH_IMPULSE_PER_PX,
            torque_impulse: 0.0,
        });

    follow.0 = Some(entity);
    pan.0 = false;
    *state = RoundState::Flying;
    logger::log(&format!("launch: draw {:.1} px", draw.length()));
}

/// Rest-детекция: Sleeping-флаг Rapier или скорости ниже порогов
/// REST_TICKS тиков подряд
fn detect_bird_rest(
    mut commands: Commands,
    mut state: ResMut<RoundState>,
    mut follow: ResMut<CameraFollow>,
    mut birds: Query<(Entity, &Velocity, Option<&Sleeping>, &mut RestCounter), With<ActiveBird>>,
) {
    if *state != RoundState::Flying {
        return;
    }
    let Ok((entity, velocity, sleeping, mut counter)) = birds.single_mut() else {
        return;
    };

    let engine_asleep = sleeping.map(|s| s.sleeping).unwrap_or(false);
    let below_thresholds = velocity.linvel.length() < physics::REST_LINVEL_THRESHOLD
        && velocity.angvel.abs() < physics::REST_ANGVEL_THRESHOLD;
    counter.0 = if below_thresholds { counter.0 + 1 } else { 0 };

    if engine_asleep || counter.0 >= physics::REST_TICKS {
        commands.entity(entity).despawn();
        follow.0 = None;
        *state = RoundState::Finished;
        logger::log("bird at rest: round finished");
    }
}

/// Камера доехала домой → следующая птица из очереди
fn advance_round_after_return(
    mut commands: Commands,
    mut returned: EventReader<CameraReturned>,
    mut state: ResMut<RoundState>,
    mut pan: ResMut<PanSuspended>,
    mut queue: ResMut<BirdQueue>,
    level: Res<LevelMap>,
) {
    if returned.is_empty() {
        return;
    }
    returned.clear();

    if *state != RoundState::Animating {
        return;
    }
    pan.0 = false;

    match queue.pop_next() {
        Some(kind) => {
            physics::spawn_bird(&mut commands, kind, level.anchor_position());
            *state = RoundState::Ready;
            logger::log(&format!("next bird: {:?}", kind));
        }
        None => {
            *state = RoundState::Finished;
            logger::log_info("no more birds");
        }
    }
}

/// Drag-ограничение: позиция в радиусе radius вокруг anchor'а
pub fn clamp_to_anchor(position: Vec2, anchor: Vec2, radius: f32) -> Vec2 {
    let offset = position - anchor;
    if offset.length_squared() <= radius * radius {
        position
    } else {
        anchor + offset.normalize() * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_radius_unchanged() {
        let anchor = Vec2::new(480.0, 240.0);
        let position = Vec2::new(500.0, 250.0);
        assert_eq!(clamp_to_anchor(position, anchor, 120.0), position);
    }

    #[test]
    fn test_clamp_outside_radius() {
        let anchor = Vec2::new(480.0, 240.0);
        let position = Vec2::new(480.0 - 300.0, 240.0);
        let clamped = clamp_to_anchor(position, anchor, 120.0);
        assert_eq!(clamped, Vec2::new(360.0, 240.0));
        assert!(((clamped - anchor).length() - 120.0).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_at_anchor_is_fixed_point() {
        let anchor = Vec2::new(480.0, 240.0);
        assert_eq!(clamp_to_anchor(anchor, anchor, 120.0), anchor);
    }

    #[test]
    fn test_rest_counter_resets_on_motion() {
        // Логика счётчика напрямую (без App)
        let mut counter = 0u32;
        for below in [true, true, true, false, true, true] {
            counter = if below { counter + 1 } else { 0 };
        }
        assert_eq!(counter, 2);
    }

    #[test]
    fn test_launch_impulse_points_at_anchor() {
        let anchor = Vec2::new(480.0, 240.0);
        let bird_pos = Vec2::new(400.0, 200.0);
        let draw = anchor - bird_pos;
        let impulse = draw * physics::LAUNCH_IMPULSE_PER_PX;

        // Направление к anchor'у, модуль пропорционален оттяжке
        assert!(impulse.x > 0.0 && impulse.y > 0.0);
        assert_eq!(impulse, Vec2::new(640.0, 320.0));
    }
}
