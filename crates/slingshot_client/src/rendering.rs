//! Sprite sync: simulation entities → цветные placeholder-спрайты
//!
//! Текстур нет — птицы рисуются цветом своего BirdKind, блоки коричневым,
//! грунт тёмно-зелёным, anchor маленьким маркером. Спрайт вешается прямо
//! на simulation entity: в 2D transform уже общий, отдельная visual entity
//! не нужна.

use bevy::prelude::*;
use slingshot_simulation::{Bird, Block, GroundTile, SlingAnchor};

const BLOCK_COLOR: Color = Color::srgb(0.55, 0.35, 0.2);
const GROUND_COLOR: Color = Color::srgb(0.25, 0.45, 0.2);
const ANCHOR_COLOR: Color = Color::srgb(0.15, 0.1, 0.08);

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_bird_sprites,
                attach_block_sprites,
                attach_ground_sprites,
                attach_anchor_sprites,
            ),
        );
    }
}

fn attach_bird_sprites(mut commands: Commands, query: Query<(Entity, &Bird), Added<Bird>>) {
    for (entity, bird) in query.iter() {
        commands
            .entity(entity)
            .insert(Sprite::from_color(bird.kind.color(), Vec2::splat(bird.size)));
    }
}

fn attach_block_sprites(mut commands: Commands, query: Query<(Entity, &Block), Added<Block>>) {
    for (entity, block) in query.iter() {
        commands
            .entity(entity)
            .insert(Sprite::from_color(BLOCK_COLOR, Vec2::splat(block.size)));
    }
}

fn attach_ground_sprites(
    mut commands: Commands,
    query: Query<(Entity, &GroundTile), Added<GroundTile>>,
) {
    for (entity, tile) in query.iter() {
        commands
            .entity(entity)
            .insert(Sprite::from_color(GROUND_COLOR, tile.size));
    }
}

fn attach_anchor_sprites(
    mut commands: Commands,
    query: Query<Entity, Added<SlingAnchor>>,
) {
    for entity in query.iter() {
        commands
            .entity(entity)
            .insert(Sprite::from_color(ANCHOR_COLOR, Vec2::splat(8.0)));
    }
}
