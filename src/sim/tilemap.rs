//! Tile map for the climbing shaft
//!
//! Owns the cosmetic tile grid, the playable bounds every mover is contained
//! in, the platform block rows and the drain exit. The whole map is rebuilt
//! on each regeneration; the only incremental edit is block removal.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::blob::Blob;
use super::block::{Block, BlockRow};
use super::exit::ExitZone;
use super::platform::{self, PlatformLayout};
use super::rect::Rect;
use crate::consts::TILE_ROWS_PER_FLOOR;
use crate::settings::Settings;

/// Empty cell in the tile grid
pub const EMPTY_TILE: i32 = -1;

/// Column count of the row templates
pub const TEMPLATE_WIDTH: usize = 16;

/// Column of the drain tile in the bottom row
pub const DRAIN_COLUMN: usize = 7;

// Tile indices refer to the tile sheet; the core never interprets them.
const EMPTY_ROW: [i32; TEMPLATE_WIDTH] = [-1, 6, 8, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, 6, 8, -1];
const PIPE_ROW: [i32; TEMPLATE_WIDTH] = [-1, 6, 15, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, 16, 8, -1];
const BOTTOM_ROW: [i32; TEMPLATE_WIDTH] = [-1, 6, 9, 1, 1, 1, 1, 5, 1, 1, 1, 1, 1, 10, 8, -1];
const SUB_ROW: [i32; TEMPLATE_WIDTH] = [-1, 6, 7, 7, 7, 7, 8, -1, 6, 7, 7, 7, 7, 7, 8, -1];

/// Row-major grid of tile indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileGrid {
    indices: Vec<i32>,
    width: usize,
}

impl TileGrid {
    pub fn new(width: usize) -> Self {
        Self {
            indices: Vec::new(),
            width,
        }
    }

    /// Append one full row
    pub fn push_row(&mut self, row: &[i32]) {
        debug_assert_eq!(row.len(), self.width);
        self.indices.extend_from_slice(row);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    pub fn row_count(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.indices.len() / self.width
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> {
        self.indices.chunks(self.width.max(1))
    }

    pub fn get(&self, col: usize, row: usize) -> Option<i32> {
        if col >= self.width {
            return None;
        }
        self.indices.get(row * self.width + col).copied()
    }
}

/// The shaft: tiles, bounds, platforms and drain
#[derive(Debug)]
pub struct Tilemap {
    grid: TileGrid,
    bounds: Rect,
    x_offset: f32,
    rows: Vec<BlockRow>,
    exit: ExitZone,
    floor_count: usize,
    subfloor_count: usize,
}

impl Tilemap {
    /// Build a fully generated map
    pub fn new(settings: &Settings, floor_count: usize, subfloor_count: usize, rng: &mut Pcg32) -> Self {
        let (x_offset, bounds) = Self::compute_bounds(settings, subfloor_count);
        let mut map = Self {
            grid: TileGrid::new(TEMPLATE_WIDTH),
            bounds,
            x_offset,
            rows: Vec::new(),
            exit: ExitZone::new(settings, bounds, x_offset),
            floor_count,
            subfloor_count,
        };
        map.regenerate_map(settings, floor_count, subfloor_count, rng);
        map
    }

    /// Rebuild tiles, bounds, exit and platforms from scratch
    pub fn regenerate_map(
        &mut self,
        settings: &Settings,
        floor_count: usize,
        subfloor_count: usize,
        rng: &mut Pcg32,
    ) {
        self.grid = Self::build_grid(floor_count, subfloor_count);
        let (x_offset, bounds) = Self::compute_bounds(settings, subfloor_count);
        self.x_offset = x_offset;
        self.bounds = bounds;
        self.exit = ExitZone::new(settings, bounds, x_offset);
        self.floor_count = floor_count;
        self.subfloor_count = subfloor_count;

        let layout = PlatformLayout {
            bounds,
            floor_count,
            playable_width: settings.map_playable_width,
            tile_width: settings.tile_width,
            tile_height: settings.tile_height,
        };
        let mut next_id = 1;
        self.rows = platform::generate(&layout, rng, &mut next_id);

        log::info!(
            "Map regenerated: {} floors, {} subfloors, {} tile rows, {} blocks",
            floor_count,
            subfloor_count,
            self.grid.row_count(),
            self.block_count()
        );
    }

    fn build_grid(floor_count: usize, subfloor_count: usize) -> TileGrid {
        let mut grid = TileGrid::new(TEMPLATE_WIDTH);
        for _ in 0..floor_count.saturating_sub(1) {
            grid.push_row(&EMPTY_ROW);
            grid.push_row(&PIPE_ROW);
            grid.push_row(&EMPTY_ROW);
        }
        // Bottom floor: no pipes
        grid.push_row(&EMPTY_ROW);
        grid.push_row(&EMPTY_ROW);
        grid.push_row(&BOTTOM_ROW);
        for _ in 0..subfloor_count {
            grid.push_row(&SUB_ROW);
        }
        grid
    }

    /// Horizontal centering offset and playable bounds for a map layout
    pub fn compute_bounds(settings: &Settings, subfloor_count: usize) -> (f32, Rect) {
        let map_px = settings.map_width as f32 * settings.tile_width;
        let x_offset = ((settings.screen_width - map_px) / 2.0).floor();
        let side_cols = (settings.map_width - settings.map_playable_width) as f32 / 2.0;
        let bounds = Rect::new(
            x_offset + settings.tile_width * side_cols,
            0.0,
            settings.map_playable_width as f32 * settings.tile_width,
            settings.screen_height - (subfloor_count + 1) as f32 * settings.tile_height,
        );
        (x_offset, bounds)
    }

    /// Gib enemies that reached the drain; returns how many were removed
    pub fn update(&mut self, enemies: &mut Vec<Blob>, settings: &Settings, rng: &mut Pcg32) -> usize {
        self.exit.update(enemies, settings, rng)
    }

    pub fn playable_bounds(&self) -> Rect {
        self.bounds
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    /// Top-left of the tile grid so that its bottom meets the screen bottom
    pub fn draw_offset(&self, settings: &Settings) -> Vec2 {
        let map_height = self.grid.row_count() as f32 * settings.tile_height;
        Vec2::new(self.x_offset, settings.screen_height - map_height)
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.grid
    }

    /// Screen rect of every non-empty tile, in draw order
    pub fn tile_rects<'a>(&'a self, settings: &'a Settings) -> impl Iterator<Item = (i32, Rect)> + 'a {
        let origin = self.draw_offset(settings);
        let width = self.grid.width().max(1);
        self.grid
            .indices()
            .iter()
            .enumerate()
            .filter(|(_, index)| **index != EMPTY_TILE)
            .map(move |(i, index)| {
                let col = (i % width) as f32;
                let row = (i / width) as f32;
                (
                    *index,
                    Rect::new(
                        origin.x + col * settings.tile_width,
                        origin.y + row * settings.tile_height,
                        settings.tile_width,
                        settings.tile_height,
                    ),
                )
            })
    }

    pub fn rows(&self) -> &[BlockRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [BlockRow] {
        &mut self.rows
    }

    /// Every block across all rows
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.rows.iter().flat_map(|row| row.blocks().iter())
    }

    pub fn block_count(&self) -> usize {
        self.rows.iter().map(BlockRow::len).sum()
    }

    pub fn exit_zone(&self) -> &ExitZone {
        &self.exit
    }

    pub fn exit_zone_mut(&mut self) -> &mut ExitZone {
        &mut self.exit
    }

    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    pub fn subfloor_count(&self) -> usize {
        self.subfloor_count
    }

    /// Bottom edge a mover stands on when entering from a tier's pipe
    pub fn tier_floor_y(&self, tier: usize, settings: &Settings) -> f32 {
        self.bounds.top + ((tier * TILE_ROWS_PER_FLOOR) as f32 + 2.0) * settings.tile_height
    }
}
