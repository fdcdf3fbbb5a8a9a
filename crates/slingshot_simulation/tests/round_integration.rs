//! Round flow integration test
//!
//! Полный жизненный цикл раунда headless:
//! grab → drag (с клампом) → launch → физика Rapier → rest → Finished →
//! tap → возврат камеры → следующая птица.
//!
//! Проверяем:
//! - Переходы RoundState в правильном порядке
//! - Инварианты (Grabbed ⇒ Ready, очередь pop'ается только при spawn'е)
//! - Camera constraints (clamp к уровню, возврат домой)

use bevy::prelude::*;
use slingshot_simulation::*;

/// Helper: создать полный game App (GamePlugin включает Rapier)
fn create_game_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(GamePlugin);
    // Первый update прогоняет Startup (уровень + первая птица)
    app.update();
    app
}

/// Helper: entity текущей активной птицы
fn active_bird(app: &mut App) -> Entity {
    let mut query = app.world_mut().query_filtered::<Entity, With<ActiveBird>>();
    query
        .single(app.world())
        .expect("active bird must exist")
}

/// Helper: entity камеры
fn game_camera(app: &mut App) -> Entity {
    let mut query = app.world_mut().query_filtered::<Entity, With<GameCamera>>();
    query
        .single(app.world())
        .expect("game camera must exist")
}

#[test]
fn test_full_round_flow() {
    let mut app = create_game_app(42);
    let anchor = app.world().resource::<LevelMap>().anchor_position();

    // --- Setup: Ready, птица на рогатке, очередь 3-1=2 ---
    assert_eq!(*app.world().resource::<RoundState>(), RoundState::Ready);
    let bird = active_bird(&mut app);
    let position = app.world().get::<Transform>(bird).unwrap().translation;
    assert_eq!(position.truncate(), anchor);
    assert_eq!(app.world().resource::<BirdQueue>().len(), 2);

    // --- Grab: touch по птице ---
    app.world_mut().send_event(TouchBegan { position: anchor });
    app.update();
    assert!(app.world().get::<Grabbed>(bird).is_some());
    assert!(app.world().resource::<PanSuspended>().0, "pan должен быть заблокирован при grab'е");

    // --- Drag: оттяжка за радиус клампится к 3 × size = 120 ---
    app.world_mut().send_event(TouchMoved {
        position: anchor - Vec2::new(300.0, 0.0),
    });
    app.update();
    let dragged = app.world().get::<Transform>(bird).unwrap().translation.truncate();
    assert_eq!(dragged, anchor - Vec2::new(120.0, 0.0));

    // --- Launch ---
    app.world_mut().send_event(TouchEnded { position: dragged });
    app.update();
    assert_eq!(*app.world().resource::<RoundState>(), RoundState::Flying);
    assert_eq!(
        *app.world().get::<bevy_rapier2d::prelude::RigidBody>(bird).unwrap(),
        bevy_rapier2d::prelude::RigidBody::Dynamic
    );
    assert_eq!(app.world().resource::<CameraFollow>().0, Some(bird));
    assert!(!app.world().resource::<PanSuspended>().0);

    // --- Полёт до rest (физика Rapier, 60Hz) ---
    let mut finished_at = None;
    for tick in 0..3000 {
        app.update();
        if *app.world().resource::<RoundState>() == RoundState::Finished {
            finished_at = Some(tick);
            break;
        }
    }
    let finished_at = finished_at.expect("bird never came to rest");
    assert!(finished_at > 10, "rest слишком рано (tick {})", finished_at);
    assert!(app.world().get::<Bird>(bird).is_none(), "птица должна быть despawn'ута");
    assert_eq!(app.world().resource::<CameraFollow>().0, None);

    // --- Tap в Finished → Animating + glide домой ---
    app.world_mut().send_event(TouchBegan {
        position: Vec2::new(999.0, 999.0),
    });
    app.update();
    assert_eq!(*app.world().resource::<RoundState>(), RoundState::Animating);
    let camera = game_camera(&mut app);
    assert!(app.world().get::<CameraReturn>(camera).is_some());
    assert!(app.world().resource::<PanSuspended>().0);

    // Touch'и в Animating игнорируются
    app.world_mut().send_event(TouchBegan { position: anchor });
    app.update();
    assert_eq!(*app.world().resource::<RoundState>(), RoundState::Animating);

    // --- Glide 2 s (120 тиков) + запас → Ready со следующей птицей ---
    for _ in 0..130 {
        app.update();
    }
    assert_eq!(*app.world().resource::<RoundState>(), RoundState::Ready);
    assert!(app.world().get::<CameraReturn>(camera).is_none());
    assert!(!app.world().resource::<PanSuspended>().0);
    assert_eq!(app.world().resource::<BirdQueue>().len(), 1);

    let next_bird = active_bird(&mut app);
    assert_ne!(next_bird, bird);
    let next_position = app.world().get::<Transform>(next_bird).unwrap().translation;
    assert_eq!(next_position.truncate(), anchor);

    // Камера дома (view/2)
    let home = app.world().resource::<ViewSize>().half();
    let camera_position = app.world().get::<Transform>(camera).unwrap().translation;
    assert_eq!(camera_position.truncate(), home);
}

#[test]
fn test_zero_impulse_release_at_anchor() {
    let mut app = create_game_app(42);
    let anchor = app.world().resource::<LevelMap>().anchor_position();
    let bird = active_bird(&mut app);

    // Grab и release ровно на anchor'е: оттяжка нулевая
    app.world_mut().send_event(TouchBegan { position: anchor });
    app.update();
    app.world_mut().send_event(TouchEnded { position: anchor });
    app.update();

    // Запуск без импульса легален — тело уже Dynamic, раунд в полёте
    assert_eq!(*app.world().resource::<RoundState>(), RoundState::Flying);

    // Птица падает с рогатки и оседает; rest-детектор закрывает раунд сам
    let mut finished = false;
    for _ in 0..3000 {
        app.update();
        if *app.world().resource::<RoundState>() == RoundState::Finished {
            finished = true;
            break;
        }
    }
    assert!(finished, "zero-draw round never finished");
    assert!(app.world().get::<Bird>(bird).is_none());
}

#[test]
fn test_touches_ignored_in_flight() {
    let mut app = create_game_app(42);
    let anchor = app.world().resource::<LevelMap>().anchor_position();

    // Launch с оттяжкой влево
    app.world_mut().send_event(TouchBegan { position: anchor });
    app.update();
    app.world_mut().send_event(TouchMoved {
        position: anchor - Vec2::new(100.0, 0.0),
    });
    app.update();
    app.world_mut().send_event(TouchEnded {
        position: anchor - Vec2::new(100.0, 0.0),
    });
    app.update();
    assert_eq!(*app.world().resource::<RoundState>(), RoundState::Flying);

    // Несколько тиков полёта, потом tap — состояние не меняется и grab'а нет
    for _ in 0..5 {
        app.update();
    }
    app.world_mut().send_event(TouchBegan { position: anchor });
    app.update();

    assert_eq!(*app.world().resource::<RoundState>(), RoundState::Flying);
    let mut grabbed = app.world_mut().query_filtered::<Entity, With<Grabbed>>();
    assert_eq!(grabbed.iter(app.world()).count(), 0);
}

#[test]
fn test_touch_ended_without_grab_is_noop() {
    let mut app = create_game_app(42);

    app.world_mut().send_event(TouchEnded {
        position: Vec2::new(100.0, 100.0),
    });
    app.update();

    assert_eq!(*app.world().resource::<RoundState>(), RoundState::Ready);
    let bird = active_bird(&mut app);
    assert!(app.world().get::<Grabbed>(bird).is_none());
}

#[test]
fn test_touch_outside_bird_does_not_grab() {
    let mut app = create_game_app(42);
    let anchor = app.world().resource::<LevelMap>().anchor_position();

    app.world_mut().send_event(TouchBegan {
        position: anchor + Vec2::new(500.0, 0.0),
    });
    app.update();

    let bird = active_bird(&mut app);
    assert!(app.world().get::<Grabbed>(bird).is_none());
    assert!(!app.world().resource::<PanSuspended>().0);
}

#[test]
fn test_empty_queue_stays_finished() {
    let mut app = create_game_app(42);

    // Очередь кончилась, камера доехала домой
    *app.world_mut().resource_mut::<BirdQueue>() = BirdQueue::new([]);
    *app.world_mut().resource_mut::<RoundState>() = RoundState::Animating;
    app.world_mut().send_event(CameraReturned);
    app.update();

    assert_eq!(*app.world().resource::<RoundState>(), RoundState::Finished);
}

#[test]
fn test_pan_suspended_blocks_camera() {
    let mut app = create_game_app(42);
    let camera = game_camera(&mut app);
    let before = app.world().get::<Transform>(camera).unwrap().translation;

    app.world_mut().resource_mut::<PanSuspended>().0 = true;
    app.world_mut().send_event(PanGesture {
        delta: Vec2::new(100.0, 0.0),
    });
    app.update();
    let after = app.world().get::<Transform>(camera).unwrap().translation;
    assert_eq!(before, after);

    // Разблокировали — pan двигает (delta против направления drag'а)
    app.world_mut().resource_mut::<PanSuspended>().0 = false;
    app.world_mut().send_event(PanGesture {
        delta: Vec2::new(-100.0, 0.0),
    });
    app.update();
    let after = app.world().get::<Transform>(camera).unwrap().translation;
    assert_eq!(after.x, before.x + 100.0);
}

#[test]
fn test_pinch_scale_clamped() {
    let mut app = create_game_app(42);
    let camera = game_camera(&mut app);

    // Сильный zoom in → min_scale 0.5
    app.world_mut().send_event(PinchGesture {
        factor: 10.0,
        focus: Vec2::ZERO,
    });
    app.update();
    assert_eq!(app.world().get::<GameCamera>(camera).unwrap().scale, 0.5);

    // Сильный zoom out → max_scale = 1920/1280 = 1.5
    app.world_mut().send_event(PinchGesture {
        factor: 0.01,
        focus: Vec2::ZERO,
    });
    app.update();
    assert_eq!(app.world().get::<GameCamera>(camera).unwrap().scale, 1.5);
}

#[test]
fn test_pinch_max_scale_tracks_view_size() {
    let mut app = create_game_app(42);
    let camera = game_camera(&mut app);

    // Окно ужали вдвое: max_scale = 1920 / 960 = 2.0, а не стартовые 1.5
    app.world_mut().resource_mut::<ViewSize>().size = Vec2::new(960.0, 540.0);
    app.world_mut().send_event(PinchGesture {
        factor: 0.01,
        focus: Vec2::ZERO,
    });
    app.update();

    let game_camera = app.world().get::<GameCamera>(camera).unwrap();
    assert_eq!(game_camera.max_scale, 2.0);
    assert_eq!(game_camera.scale, 2.0);
}

#[test]
fn test_camera_follow_clamps_to_level() {
    let mut app = create_game_app(42);
    let camera = game_camera(&mut app);

    // Цель в левом нижнем углу — камера прижимается к inset-границе
    let target = app
        .world_mut()
        .spawn(Transform::from_xyz(10.0, 10.0, 0.0))
        .id();
    app.world_mut().resource_mut::<CameraFollow>().0 = Some(target);
    app.update();

    let position = app.world().get::<Transform>(camera).unwrap().translation;
    assert_eq!(position.truncate(), Vec2::new(640.0, 360.0));
}
