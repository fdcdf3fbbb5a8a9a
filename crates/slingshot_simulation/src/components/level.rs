//! Tile map уровня
//!
//! Уровень описывается ASCII-layout'ом (строки сверху вниз):
//! - `#` — ground tile (fixed collider)
//! - `B` — разрушаемый блок (dynamic body)
//! - `.` — пусто
//!
//! Вся геометрия производная от layout'а: world rect, playfield rect
//! (граница физики), позиция anchor'а рогатки, максимальный camera scale.

use bevy::prelude::*;

/// Сторона тайла (px). Она же length unit для Rapier (pixels per meter).
pub const TILE_SIZE: f32 = 64.0;

/// Туториальный уровень: 30 × 15 тайлов, грунт снизу, две башни блоков
const DEFAULT_LAYOUT: [&str; 15] = [
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "..............................",
    "......................B.B.....",
    "......................B.B.....",
    "......................B.B.....",
    "##############################",
];

/// Горизонтальный run ground-тайлов (один merged collider на run)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundRun {
    pub row: usize,
    pub col_start: usize,
    pub col_end: usize, // inclusive
}

/// Tile map уровня
#[derive(Resource, Debug, Clone)]
pub struct LevelMap {
    pub columns: usize,
    pub rows: usize,
    pub tile_size: f32,
    layout: Vec<String>,
}

impl Default for LevelMap {
    fn default() -> Self {
        Self::from_layout(&DEFAULT_LAYOUT, TILE_SIZE)
    }
}

impl LevelMap {
    /// Строит map из ASCII-layout'а (строки одинаковой длины, сверху вниз)
    pub fn from_layout(layout: &[&str], tile_size: f32) -> Self {
        let rows = layout.len();
        let columns = layout.first().map(|row| row.len()).unwrap_or(0);
        debug_assert!(
            layout.iter().all(|row| row.len() == columns),
            "layout rows have unequal widths"
        );

        Self {
            columns,
            rows,
            tile_size,
            layout: layout.iter().map(|row| row.to_string()).collect(),
        }
    }

    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Полный прямоугольник уровня в world-координатах (origin снизу слева)
    pub fn world_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width(), self.height())
    }

    /// Граница физики: уровень без нижнего tile-ряда
    /// (edge loop проходит по верху грунта)
    pub fn playfield_rect(&self) -> Rect {
        Rect::new(0.0, self.tile_size, self.width(), self.height())
    }

    /// Позиция anchor'а рогатки: четверть уровня по обеим осям
    pub fn anchor_position(&self) -> Vec2 {
        Vec2::new(self.width() / 4.0, self.height() / 4.0)
    }

    /// Максимальный camera scale: дальше zoom-out виден мир за уровнем
    pub fn max_camera_scale(&self, view_width: f32) -> f32 {
        self.width() / view_width
    }

    /// Центр тайла (col слева направо, row сверху вниз)
    pub fn tile_center(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.tile_size,
            (self.rows - 1 - row) as f32 * self.tile_size + self.tile_size * 0.5,
        )
    }

    /// Merged runs ground-тайлов (меньше коллайдеров, чем по одному на тайл)
    pub fn ground_runs(&self) -> Vec<GroundRun> {
        let mut runs = Vec::new();
        for (row, line) in self.layout.iter().enumerate() {
            let mut start: Option<usize> = None;
            for (col, cell) in line.chars().enumerate() {
                match (cell == '#', start) {
                    (true, None) => start = Some(col),
                    (false, Some(col_start)) => {
                        runs.push(GroundRun {
                            row,
                            col_start,
                            col_end: col - 1,
                        });
                        start = None;
                    }
                    _ => {}
                }
            }
            if let Some(col_start) = start {
                runs.push(GroundRun {
                    row,
                    col_start,
                    col_end: self.columns - 1,
                });
            }
        }
        runs
    }

    /// Клетки с разрушаемыми блоками
    pub fn block_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for (row, line) in self.layout.iter().enumerate() {
            for (col, cell) in line.chars().enumerate() {
                if cell == 'B' {
                    cells.push((col, row));
                }
            }
        }
        cells
    }
}

/// Разрушаемый блок (dynamic body)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Block {
    /// Сторона квадратного тела (px), чуть меньше тайла для стабильных стопок
    pub size: f32,
}

/// Ground tile run (fixed collider + спрайт у клиента)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GroundTile {
    pub size: Vec2,
}

/// Anchor рогатки
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct SlingAnchor;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let level = LevelMap::default();
        assert_eq!(level.columns, 30);
        assert_eq!(level.rows, 15);
        assert_eq!(level.width(), 1920.0);
        assert_eq!(level.height(), 960.0);
    }

    #[test]
    fn test_anchor_at_quarter_point() {
        let level = LevelMap::default();
        assert_eq!(level.anchor_position(), Vec2::new(480.0, 240.0));
    }

    #[test]
    fn test_playfield_excludes_bottom_tile_row() {
        let level = LevelMap::default();
        let playfield = level.playfield_rect();
        assert_eq!(playfield.min, Vec2::new(0.0, 64.0));
        assert_eq!(playfield.max, Vec2::new(1920.0, 960.0));
    }

    #[test]
    fn test_max_camera_scale() {
        let level = LevelMap::default();
        assert_eq!(level.max_camera_scale(1280.0), 1.5);
    }

    #[test]
    fn test_ground_runs_merged() {
        let level = LevelMap::from_layout(&["..#..", "#####"], 10.0);
        let runs = level.ground_runs();
        assert_eq!(
            runs,
            vec![
                GroundRun { row: 0, col_start: 2, col_end: 2 },
                GroundRun { row: 1, col_start: 0, col_end: 4 },
            ]
        );
    }

    #[test]
    fn test_tile_center_bottom_left() {
        let level = LevelMap::default();
        // Нижний левый тайл: row = rows-1, col = 0
        assert_eq!(level.tile_center(0, 14), Vec2::new(32.0, 32.0));
        // Верхний левый тайл
        assert_eq!(level.tile_center(0, 0), Vec2::new(32.0, 928.0));
    }

    #[test]
    fn test_block_cells_towers() {
        let level = LevelMap::default();
        let cells = level.block_cells();
        assert_eq!(cells.len(), 6); // Две башни по 3 блока
        assert!(cells.contains(&(22, 11)));
        assert!(cells.contains(&(24, 13)));
    }
}
