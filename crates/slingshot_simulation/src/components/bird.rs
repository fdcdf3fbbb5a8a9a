//! Компоненты снаряда: Bird, BirdKind, маркеры состояния

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Тип птицы (палитра placeholder-спрайтов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum BirdKind {
    Red,
    Blue,
    Yellow,
    Gray,
}

impl BirdKind {
    /// Цвет placeholder-спрайта (текстур пока нет)
    pub fn color(&self) -> Color {
        match self {
            BirdKind::Red => Color::srgb(0.9, 0.2, 0.2),
            BirdKind::Blue => Color::srgb(0.2, 0.3, 0.9),
            BirdKind::Yellow => Color::srgb(0.9, 0.85, 0.2),
            BirdKind::Gray => Color::srgb(0.7, 0.7, 0.7),
        }
    }
}

/// Снаряд — квадратное тело size × size
///
/// Пока птица ждёт на рогатке — kinematic body (двигаем transform напрямую
/// при drag). После запуска round::handle_touch_ended переключает тело
/// в Dynamic и применяет импульс.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Bird {
    pub kind: BirdKind,
    /// Сторона квадратного тела (px)
    pub size: f32,
}

impl Bird {
    pub const DEFAULT_SIZE: f32 = 40.0;

    pub fn new(kind: BirdKind) -> Self {
        Self {
            kind,
            size: Self::DEFAULT_SIZE,
        }
    }

    /// Радиус drag-ограничения вокруг anchor (3 × size)
    pub fn drag_radius(&self) -> f32 {
        self.size * 3.0
    }

    /// Попадает ли точка в тело птицы (простой AABB hit-test)
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let half = self.size * 0.5;
        (point.x - center.x).abs() <= half && (point.y - center.y).abs() <= half
    }
}

/// Маркер: текущая играемая птица
///
/// Инвариант: максимум одна entity несёт ActiveBird.
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct ActiveBird;

/// Маркер: птица схвачена игроком (drag в процессе)
///
/// Инвариант: Grabbed ⇒ ActiveBird + RoundState::Ready
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct Grabbed;
