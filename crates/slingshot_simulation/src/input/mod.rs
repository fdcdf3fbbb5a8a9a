//! Input: регистрация gesture-событий
//!
//! Сами события эмитит клиент (слой сырого input'а), симуляция их только
//! потребляет — см. round и camera.

use bevy::prelude::*;

pub mod events;

pub use events::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanSuspended>()
            .add_event::<TouchBegan>()
            .add_event::<TouchMoved>()
            .add_event::<TouchEnded>()
            .add_event::<PanGesture>()
            .add_event::<PinchGesture>();
    }
}
