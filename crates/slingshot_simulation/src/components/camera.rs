//! Camera framing: GameCamera, follow target, return glide
//!
//! Данные камеры живут в симуляции (clamp/follow логика — это THE CORE),
//! клиент только вешает Camera2d на ту же entity и синхронизирует projection.

use bevy::prelude::*;

/// Игровая 2D-камера
///
/// `scale` — world units per screen px (1.0 = нативный масштаб).
/// Меньше scale = ближе zoom.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GameCamera {
    pub scale: f32,
    pub min_scale: f32,
    /// Верхняя граница zoom-out: level_width / view_width
    /// (дальше отъезжать бессмысленно — виден весь уровень)
    pub max_scale: f32,
}

impl Default for GameCamera {
    fn default() -> Self {
        Self {
            scale: 1.0,
            min_scale: 0.5,
            max_scale: 1.5,
        }
    }
}

impl GameCamera {
    pub fn clamped_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// За кем летит камера (жёсткий follow без сглаживания)
///
/// Some(bird) пока птица в полёте, None в остальных состояниях.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CameraFollow(pub Option<Entity>);

/// Логический размер viewport (px)
///
/// Headless default 1280×720; клиент обновляет из окна каждый кадр.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ViewSize {
    pub size: Vec2,
}

impl Default for ViewSize {
    fn default() -> Self {
        Self {
            size: Vec2::new(1280.0, 720.0),
        }
    }
}

impl ViewSize {
    /// Домашняя позиция камеры (центр viewport в world-координатах)
    pub fn half(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// Eased glide камеры домой после завершения раунда
///
/// Позиция: lerp(start, target, ease_in_out_cubic(elapsed / duration)).
/// По завершении камера ровно в target и компонент снимается.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CameraReturn {
    pub start: Vec2,
    pub target: Vec2,
    pub elapsed: f32,
    pub duration: f32,
}

impl CameraReturn {
    /// Длительность возврата (секунды)
    pub const DURATION: f32 = 2.0;

    pub fn new(start: Vec2, target: Vec2) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration: Self::DURATION,
        }
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Текущая позиция на eased-траектории
    pub fn sample(&self) -> Vec2 {
        self.start.lerp(self.target, ease_in_out_cubic(self.progress()))
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Helper: ease-in-out cubic
///
/// Плавный разгон и торможение:
/// - t=0.0 → 0.0
/// - t=0.5 → 0.5
/// - t=1.0 → 1.0
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_cubic() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);

        // Монотонность на сетке
        let mut prev = 0.0;
        for i in 1..=10 {
            let v = ease_in_out_cubic(i as f32 / 10.0);
            assert!(v >= prev, "ease не монотонен в t={}", i as f32 / 10.0);
            prev = v;
        }
    }

    #[test]
    fn test_camera_return_endpoints() {
        let mut glide = CameraReturn::new(Vec2::new(1000.0, 500.0), Vec2::new(640.0, 360.0));
        assert_eq!(glide.sample(), Vec2::new(1000.0, 500.0));
        assert!(!glide.is_done());

        glide.elapsed = glide.duration;
        assert_eq!(glide.sample(), Vec2::new(640.0, 360.0));
        assert!(glide.is_done());

        // Перебор времени не уводит за target
        glide.elapsed = glide.duration * 2.0;
        assert_eq!(glide.sample(), Vec2::new(640.0, 360.0));
    }

    #[test]
    fn test_clamped_scale() {
        let camera = GameCamera::default();
        assert_eq!(camera.clamped_scale(0.1), 0.5);
        assert_eq!(camera.clamped_scale(1.0), 1.0);
        assert_eq!(camera.clamped_scale(99.0), 1.5);
    }
}
