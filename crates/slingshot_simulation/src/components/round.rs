//! Round FSM и очередь птиц

use bevy::prelude::*;
use std::collections::VecDeque;

use super::bird::BirdKind;

/// Состояние раунда (глобальный конечный автомат)
///
/// Ready → Flying → Finished → Animating → Ready (или Finished при пустой
/// очереди).
///
/// Переходы:
/// - Ready → Flying: игрок отпустил схваченную птицу (launch)
/// - Flying → Finished: физика сообщила что птица в покое
/// - Finished → Animating: tap, камера едет домой (2 s eased glide)
/// - Animating → Ready: glide завершён, следующая птица на рогатке
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Resource)]
pub enum RoundState {
    /// Птица на рогатке, ждём grab
    #[default]
    Ready,
    /// Птица в полёте, ждём rest-сигнал от физики
    Flying,
    /// Раунд завершён, tap запускает возврат камеры
    Finished,
    /// Камера едет домой, input игнорируется
    Animating,
}

impl RoundState {
    /// Можно ли хватать птицу в этом состоянии
    pub fn accepts_grab(&self) -> bool {
        matches!(self, RoundState::Ready)
    }
}

/// Очередь птиц уровня (FIFO)
///
/// Pop происходит ТОЛЬКО при spawn следующей птицы (level setup или
/// advance после возврата камеры).
#[derive(Resource, Debug, Clone)]
pub struct BirdQueue {
    birds: VecDeque<BirdKind>,
}

impl Default for BirdQueue {
    fn default() -> Self {
        // Стартовая очередь туториального уровня
        Self::new([BirdKind::Blue, BirdKind::Red, BirdKind::Yellow])
    }
}

impl BirdQueue {
    pub fn new(birds: impl IntoIterator<Item = BirdKind>) -> Self {
        Self {
            birds: birds.into_iter().collect(),
        }
    }

    pub fn pop_next(&mut self) -> Option<BirdKind> {
        self.birds.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.birds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.birds.len()
    }
}
