//! Procedural platform rows
//!
//! Every tier except the bottom (landing) floor gets one row of blocks on its
//! second tile-row. Each tile cell is split into four quadrant blocks; the two
//! top quadrants are always placed so no column is ever fully open, the bottom
//! two are independent coin flips:
//!
//! ```text
//! TT TT TT TT
//! .. B. .B BB
//! ```

use rand::Rng;
use rand_pcg::Pcg32;

use super::block::{Block, BlockRow, Quadrant};
use super::rect::Rect;
use crate::consts::TILE_ROWS_PER_FLOOR;

/// Tile-row within a tier that carries the blocks
const BLOCK_SUB_ROW: usize = 2;

/// Geometry inputs for one generation pass
#[derive(Debug, Clone, Copy)]
pub struct PlatformLayout {
    pub bounds: Rect,
    pub floor_count: usize,
    pub playable_width: usize,
    pub tile_width: f32,
    pub tile_height: f32,
}

/// Build all platform rows, ordered top to bottom
pub fn generate(layout: &PlatformLayout, rng: &mut Pcg32, next_id: &mut u32) -> Vec<BlockRow> {
    let tiers = layout.floor_count.saturating_sub(1);
    let block_w = layout.tile_width / 2.0;
    let block_h = layout.tile_height / 2.0;
    let mut rows = Vec::with_capacity(tiers);

    for tier in 0..tiers {
        let top = layout.bounds.top
            + (tier * TILE_ROWS_PER_FLOOR + BLOCK_SUB_ROW) as f32 * layout.tile_height;
        if top + layout.tile_height > layout.bounds.bottom() {
            log::warn!(
                "Tier {} at y={} does not fit in playable bounds (bottom {}), skipping",
                tier,
                top,
                layout.bounds.bottom()
            );
            break;
        }

        let mut row = BlockRow::new(tier);
        for col in 0..layout.playable_width {
            let left = layout.bounds.left + col as f32 * layout.tile_width;
            let bottom_left = rng.random_bool(0.5);
            let bottom_right = rng.random_bool(0.5);

            let mut place = |quadrant: Quadrant, x: f32, y: f32| {
                row.push(Block {
                    id: *next_id,
                    rect: Rect::new(x, y, block_w, block_h),
                    quadrant,
                });
                *next_id += 1;
            };

            place(Quadrant::TopLeft, left, top);
            place(Quadrant::TopRight, left + block_w, top);
            if bottom_left {
                place(Quadrant::BottomLeft, left, top + block_h);
            }
            if bottom_right {
                place(Quadrant::BottomRight, left + block_w, top + block_h);
            }
        }
        rows.push(row);
    }

    log::debug!(
        "Generated {} platform rows ({} blocks)",
        rows.len(),
        rows.iter().map(BlockRow::len).sum::<usize>()
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn layout(floor_count: usize) -> PlatformLayout {
        PlatformLayout {
            bounds: Rect::new(280.0, 0.0, 240.0, 552.0),
            floor_count,
            playable_width: 10,
            tile_width: 24.0,
            tile_height: 24.0,
        }
    }

    #[test]
    fn test_single_floor_has_no_rows() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut next_id = 1;
        assert!(generate(&layout(1), &mut rng, &mut next_id).is_empty());
        assert!(generate(&layout(0), &mut rng, &mut next_id).is_empty());
        assert_eq!(next_id, 1);
    }

    #[test]
    fn test_row_anchors_and_order() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut next_id = 1;
        let rows = generate(&layout(8), &mut rng, &mut next_id);
        assert_eq!(rows.len(), 7);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.tier, i);
            let anchor = (i * 3 + 2) as f32 * 24.0;
            for block in row.blocks() {
                let expected = if block.quadrant.is_top() {
                    anchor
                } else {
                    anchor + 12.0
                };
                assert_eq!(block.rect.top, expected);
            }
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut next_id = 100;
        let rows = generate(&layout(8), &mut rng, &mut next_id);
        let mut ids: Vec<u32> = rows.iter().flat_map(|r| r.blocks().iter().map(|b| b.id)).collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(next_id, 100 + count as u32);
    }

    #[test]
    fn test_oversize_floor_count_stays_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut next_id = 1;
        let rows = generate(&layout(20), &mut rng, &mut next_id);
        // 552px of bounds fits tiers whose block cell ends by y=552
        assert_eq!(rows.len(), 7);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        let (mut ia, mut ib) = (1, 1);
        let rows_a = generate(&layout(8), &mut a, &mut ia);
        let rows_b = generate(&layout(8), &mut b, &mut ib);
        for (ra, rb) in rows_a.iter().zip(&rows_b) {
            assert_eq!(ra.blocks(), rb.blocks());
        }
    }

    proptest! {
        #[test]
        fn prop_blocks_inside_bounds(seed in any::<u64>(), floors in 1usize..12) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut next_id = 1;
            let l = layout(floors);
            for row in generate(&l, &mut rng, &mut next_id) {
                for block in row.blocks() {
                    prop_assert!(l.bounds.contains_rect(&block.rect));
                }
            }
        }

        #[test]
        fn prop_top_quadrants_always_present(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut next_id = 1;
            let l = layout(8);
            for row in generate(&l, &mut rng, &mut next_id) {
                for col in 0..l.playable_width {
                    let left = l.bounds.left + col as f32 * l.tile_width;
                    let has = |q: Quadrant, x: f32| {
                        row.blocks().iter().any(|b| b.quadrant == q && b.rect.left == x)
                    };
                    prop_assert!(has(Quadrant::TopLeft, left));
                    prop_assert!(has(Quadrant::TopRight, left + 12.0));
                }
            }
        }
    }
}
