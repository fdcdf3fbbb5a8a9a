//! Конфигурация physics engine (Rapier 2D)
//!
//! Симуляция Rapier НЕ пишет — только конфигурирует (collision groups,
//! коллайдеры, body types) и слушает результат (Velocity, Sleeping).
//!
//! Collision groups — centralised constants для всего проекта
//! (категории: edge / bird / block).

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::components::{ActiveBird, Bird, BirdKind, Block, GroundRun, GroundTile, LevelMap};

/// Length unit Rapier: один тайл = один метр
pub const PIXELS_PER_METER: f32 = crate::components::level::TILE_SIZE;

// ============================================================================
// Collision groups (membership)
// ============================================================================

/// Граница уровня (edge loop)
pub const GROUP_EDGE: Group = Group::GROUP_1;
/// Птицы
pub const GROUP_BIRD: Group = Group::GROUP_2;
/// Блоки и ground-тайлы
pub const GROUP_BLOCK: Group = Group::GROUP_3;

/// Edge loop коллайдит со всем
pub fn edge_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_EDGE, Group::ALL)
}

/// Птица коллайдит с блоками и границей
pub fn bird_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_BIRD, GROUP_BLOCK | GROUP_EDGE)
}

/// Блоки коллайдят со всем
pub fn block_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_BLOCK, Group::ALL)
}

// ============================================================================
// Tuning
// ============================================================================

/// Порог rest-детекции: linear velocity (px/s)
pub const REST_LINVEL_THRESHOLD: f32 = 4.0;
/// Порог rest-детекции: angular velocity (rad/s)
pub const REST_ANGVEL_THRESHOLD: f32 = 0.5;
/// Сколько fixed-тиков подряд держим пороги до объявления rest
pub const REST_TICKS: u32 = 30;

/// Масштаб импульса запуска: Δv px/s на px оттяжки (масса птицы = 1.0)
pub const LAUNCH_IMPULSE_PER_PX: f32 = 8.0;

/// Масса птицы (фиксированная, чтобы импульс запуска был предсказуем)
pub const BIRD_MASS: f32 = 1.0;

/// Максимальный стартовый наклон блока (rad); наклон берётся из
/// DeterministicRng, стопки оседают чуть по-разному от сида к сиду
pub const BLOCK_TILT_JITTER: f32 = 0.01;

// ============================================================================
// Spawn helpers
// ============================================================================

/// Spawn птицы на рогатке
///
/// Kinematic пока не запущена: drag двигает transform напрямую, физика
/// тело не трогает. round::handle_touch_ended переключает в Dynamic.
pub fn spawn_bird(commands: &mut Commands, kind: BirdKind, anchor: Vec2) -> Entity {
    let bird = Bird::new(kind);
    let half = bird.size * 0.5;

    commands
        .spawn((
            Transform::from_translation(anchor.extend(0.0)),
            bird,
            ActiveBird,
            // Rapier
            RigidBody::KinematicPositionBased,
            Collider::cuboid(half, half),
            ColliderMassProperties::Mass(BIRD_MASS),
            Velocity::zero(),
            Sleeping::default(),
            Restitution::coefficient(0.3),
            Friction::coefficient(0.8),
            bird_groups(),
        ))
        .id()
}

/// Spawn разрушаемого блока (dynamic body, чуть меньше тайла
/// для стабильных стопок); tilt — стартовый наклон в радианах
pub fn spawn_block(commands: &mut Commands, center: Vec2, tile_size: f32, tilt: f32) -> Entity {
    let size = tile_size * 0.9;
    let half = size * 0.5;

    commands
        .spawn((
            Transform::from_translation(center.extend(0.0))
                .with_rotation(Quat::from_rotation_z(tilt)),
            Block { size },
            RigidBody::Dynamic,
            Collider::cuboid(half, half),
            Velocity::zero(),
            Sleeping::default(),
            Friction::coefficient(0.9),
            block_groups(),
        ))
        .id()
}

/// Spawn merged run ground-тайлов (один fixed cuboid на run)
pub fn spawn_ground_run(commands: &mut Commands, level: &LevelMap, run: GroundRun) -> Entity {
    let tiles = (run.col_end - run.col_start + 1) as f32;
    let size = Vec2::new(tiles * level.tile_size, level.tile_size);
    let left = level.tile_center(run.col_start, run.row);
    let center = Vec2::new(left.x + (size.x - level.tile_size) * 0.5, left.y);

    commands
        .spawn((
            Transform::from_translation(center.extend(0.0)),
            GroundTile { size },
            RigidBody::Fixed,
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
            block_groups(),
        ))
        .id()
}

/// Spawn edge loop вокруг playfield rect
///
/// Замкнутый polyline: ничего не вылетает за уровень. Contact events
/// включены — удары о границу интересны для будущего scoring'а.
pub fn spawn_edge_loop(commands: &mut Commands, rect: Rect) -> Entity {
    let vertices = vec![
        rect.min,
        Vec2::new(rect.max.x, rect.min.y),
        rect.max,
        Vec2::new(rect.min.x, rect.max.y),
        rect.min,
    ];

    commands
        .spawn((
            Transform::default(),
            RigidBody::Fixed,
            Collider::polyline(vertices, None),
            edge_groups(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bird_filter_excludes_birds() {
        let groups = bird_groups();
        assert!(groups.filters.contains(GROUP_BLOCK));
        assert!(groups.filters.contains(GROUP_EDGE));
        assert!(!groups.filters.contains(GROUP_BIRD));
    }

    #[test]
    fn test_memberships_disjoint() {
        assert!((GROUP_EDGE & GROUP_BIRD).is_empty());
        assert!((GROUP_BIRD & GROUP_BLOCK).is_empty());
    }
}
