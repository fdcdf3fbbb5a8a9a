//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - bird: снаряды (Bird, BirdKind, ActiveBird, Grabbed)
//! - round: round FSM и очередь птиц (RoundState, BirdQueue)
//! - camera: framing (GameCamera, CameraFollow, CameraReturn, ViewSize)
//! - level: tile map (LevelMap, Block, GroundTile, SlingAnchor)

pub mod bird;
pub mod camera;
pub mod level;
pub mod round;

// Re-exports для удобного импорта
pub use bird::*;
pub use camera::*;
pub use level::*;
pub use round::*;
