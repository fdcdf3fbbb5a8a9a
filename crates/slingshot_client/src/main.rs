use bevy::prelude::*;
use slingshot_simulation::GamePlugin;

mod camera;
mod input;
mod rendering;

use camera::CameraBridgePlugin;
use input::GesturePlugin;
use rendering::RenderingSyncPlugin;

fn main() {
    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "SLINGSHOT".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Simulation (headless ECS logic + Rapier)
        .add_plugins(GamePlugin)
        // Sprite sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        // GameCamera → Camera2d bridge
        .add_plugins(CameraBridgePlugin)
        // Mouse → gesture события
        .add_plugins(GesturePlugin)
        .run();
}
