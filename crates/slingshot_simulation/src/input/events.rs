//! Gesture события
//!
//! Генерируются клиентом из сырого input (mouse/touch) и обрабатываются
//! ECS-системами симуляции (round FSM, camera). Симуляция никогда не
//! трогает устройства ввода напрямую.
//!
//! # Координаты
//! - Touch*: world-space позиция (клиент уже сконвертировал через камеру)
//! - PanGesture.delta: screen px, оси world-ориентированы (y вверх)
//! - PinchGesture.focus: screen-offset курсора от центра окна, оси
//!   world-ориентированы

use bevy::prelude::{Event, Resource, Vec2};

/// Касание началось
#[derive(Event, Debug, Clone, Copy)]
pub struct TouchBegan {
    pub position: Vec2,
}

/// Касание двигается
#[derive(Event, Debug, Clone, Copy)]
pub struct TouchMoved {
    pub position: Vec2,
}

/// Касание закончилось
#[derive(Event, Debug, Clone, Copy)]
pub struct TouchEnded {
    pub position: Vec2,
}

/// Pan-жест (drag мимо птицы)
#[derive(Event, Debug, Clone, Copy)]
pub struct PanGesture {
    pub delta: Vec2,
}

/// Pinch-жест: factor > 1.0 = zoom in (scale уменьшается)
#[derive(Event, Debug, Clone, Copy)]
pub struct PinchGesture {
    pub factor: f32,
    pub focus: Vec2,
}

/// Pan заблокирован (grab в процессе или камера едет домой)
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PanSuspended(pub bool);
