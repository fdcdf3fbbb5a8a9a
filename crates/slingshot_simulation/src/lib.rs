//! SLINGSHOT Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: round FSM, очередь птиц, camera constraints.
//! Вся «тяжёлая» работа (rigid-body dynamics, collision detection,
//! constraint solving) делегирована Rapier (bevy_rapier2d, fixed schedule).
//!
//! Слои:
//! - ECS = game rules (grab → drag → launch → rest → next bird)
//! - Rapier = physics engine (мы его только конфигурируем и слушаем)
//! - Клиент (slingshot_client) = rendering + сырой input → gesture события

use bevy::prelude::*;
use bevy_rapier2d::prelude::{NoUserData, RapierPhysicsPlugin};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod camera;
pub mod components;
pub mod input;
pub mod level;
pub mod logger;
pub mod physics;
pub mod round;

// Re-export базовых типов для удобства
pub use camera::{clamp_to_level, constraint_range, zoom_about, CameraConstraintPlugin, CameraReturned};
pub use components::*;
pub use input::events::*;
pub use input::InputPlugin;
pub use level::LevelPlugin;
pub use physics::{spawn_bird, spawn_block, spawn_edge_loop, spawn_ground_run};
pub use round::{clamp_to_anchor, RestCounter, RoundPlugin};

/// Сид RNG по умолчанию
pub const DEFAULT_SEED: u64 = 42;

/// Главный plugin игры (объединяет все подсистемы + Rapier)
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        logger::init();

        // Сид из create_headless_app не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Physics engine: Rapier в fixed schedule, тайл = метр
            .add_plugins(
                RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(physics::PIXELS_PER_METER)
                    .in_fixed_schedule(),
            )
            // Подсистемы (game rules layer)
            .add_plugins((InputPlugin, LevelPlugin, RoundPlugin, CameraConstraintPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый update — ровно один тик виртуального времени (1/60 s), без
/// wall clock: иначе FixedUpdate в быстром тестовом цикле не тикает
/// и прогоны невоспроизводимы.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init();
    app.add_plugins(MinimalPlugins)
        // Rapier читает GlobalTransform
        .add_plugins(bevy::transform::TransformPlugin)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            std::time::Duration::from_secs_f64(1.0 / 60.0),
        ))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Собирает все entity с компонентом T в детерминированном порядке
/// (сортировка по Entity ID) и сериализует через Debug.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
