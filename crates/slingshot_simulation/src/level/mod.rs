//! Построение уровня: edge loop, грунт, блоки, anchor, первая птица

use bevy::prelude::*;
use rand::Rng;

use crate::components::{BirdQueue, LevelMap, SlingAnchor};
use crate::logger;
use crate::physics;
use crate::DeterministicRng;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelMap>()
            .add_systems(Startup, setup_level);
    }
}

/// Собирает статическую часть уровня и сажает первую птицу на рогатку
fn setup_level(
    mut commands: Commands,
    level: Res<LevelMap>,
    mut queue: ResMut<BirdQueue>,
    mut rng: ResMut<DeterministicRng>,
) {
    // Edge loop вокруг playfield (нижний tile-ряд исключён)
    physics::spawn_edge_loop(&mut commands, level.playfield_rect());

    // Грунт: один fixed collider на merged run
    for run in level.ground_runs() {
        physics::spawn_ground_run(&mut commands, &level, run);
    }

    // Разрушаемые блоки; крошечный seeded наклон, чтобы стопки оседали
    // живо, а не идеально ровно
    for (col, row) in level.block_cells() {
        let tilt = rng
            .rng
            .gen_range(-physics::BLOCK_TILT_JITTER..=physics::BLOCK_TILT_JITTER);
        physics::spawn_block(&mut commands, level.tile_center(col, row), level.tile_size, tilt);
    }

    // Anchor рогатки
    commands.spawn((
        SlingAnchor,
        Transform::from_translation(level.anchor_position().extend(0.0)),
    ));

    // Первая птица
    match queue.pop_next() {
        Some(kind) => {
            physics::spawn_bird(&mut commands, kind, level.anchor_position());
            logger::log(&format!("level ready: first bird {:?}", kind));
        }
        None => logger::log_warning("level has an empty bird queue"),
    }
}
