//! Block collision resolution for movers
//!
//! Rows are scanned top to bottom and only the first row with an overlap is
//! resolved each frame. Within that row the first overlapping block decides
//! the response, checked in this order:
//!
//! 1. falling (`dy > 0`): land on the block
//! 2. rising (`dy < 0`) with the feet below the block: head bump, which
//!    breaks every overlapping block in the row
//! 3. walking right into the block's side
//! 4. walking left into the block's side

use super::block::{Block, BlockRow};
use super::mover::Body;

/// What a collision pass did to the body
#[derive(Debug, Clone, PartialEq)]
pub enum Collision {
    /// No block overlapped the hitbox
    None,
    /// Overlap found but no rule applied (e.g. rising past a block's edge)
    Overlapping,
    /// Snapped onto the top of `block`
    Landed { block: Block },
    /// Struck blocks from below; they were removed from row `tier`
    HeadBump { tier: usize, removed: Vec<Block> },
    /// Horizontal motion stopped by the side of `block`
    SideBlocked { block: Block },
}

/// Resolve `body` against the platform rows
pub fn resolve_block_collisions(body: &mut Body, rows: &mut [BlockRow]) -> Collision {
    let hitbox = body.hitbox();
    for row in rows.iter_mut() {
        let hits = row.intersecting(&hitbox);
        if hits.is_empty() {
            continue;
        }
        return resolve_row(body, row, hits);
    }
    Collision::None
}

fn resolve_row(body: &mut Body, row: &mut BlockRow, hits: Vec<Block>) -> Collision {
    let block = hits[0];
    let side_collision =
        body.rect.right() > block.rect.right() || body.rect.left < block.rect.left;

    if body.dy > 0.0 {
        body.land();
        body.rect.set_bottom(block.rect.top);
        return Collision::Landed { block };
    }

    if body.dy < 0.0 {
        if body.rect.bottom() > block.rect.bottom() {
            body.dy = 0.0;
            body.rect.set_top(block.rect.bottom() - body.margins.top);
            let ids: Vec<u32> = hits.iter().map(|b| b.id).collect();
            row.remove_all(&ids);
            log::debug!("Head bump broke {} block(s) in tier {}", hits.len(), row.tier);
            return Collision::HeadBump {
                tier: row.tier,
                removed: hits,
            };
        }
        return Collision::Overlapping;
    }

    if body.dx > 0.0 && side_collision {
        body.dx = 0.0;
        body.rect.set_right(block.rect.left + body.margins.horz);
        return Collision::SideBlocked { block };
    }

    if body.dx < 0.0 && side_collision {
        body.dx = 0.0;
        body.rect.set_left(block.rect.right() - body.margins.horz);
        return Collision::SideBlocked { block };
    }

    Collision::Overlapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::animation::{AnimationKey, Animator};
    use crate::sim::block::Quadrant;
    use crate::sim::mover::Margins;
    use crate::sim::rect::Rect;

    fn block(id: u32, left: f32, top: f32) -> Block {
        Block {
            id,
            rect: Rect::new(left, top, 12.0, 12.0),
            quadrant: Quadrant::TopLeft,
        }
    }

    fn row(tier: usize, blocks: &[Block]) -> BlockRow {
        let mut row = BlockRow::new(tier);
        for b in blocks {
            row.push(*b);
        }
        row
    }

    fn body(left: f32, bottom: f32) -> Body {
        let mut rect = Rect::new(left, 0.0, 24.0, 32.0);
        rect.set_bottom(bottom);
        Body::new(rect, Margins { horz: 3.0, top: 9.0 }, Animator::new(AnimationKey::IdleLeft))
    }

    #[test]
    fn test_falling_body_lands() {
        let mut rows = vec![row(0, &[block(1, 300.0, 100.0)])];
        let mut b = body(290.0, 102.0);
        b.dy = 5.0;
        b.falling = true;
        b.air_jumps = 1;

        let result = resolve_block_collisions(&mut b, &mut rows);
        assert!(matches!(result, Collision::Landed { block } if block.id == 1));
        assert_eq!(b.dy, 0.0);
        assert_eq!(b.air_jumps, 0);
        assert!(!b.falling);
        assert_eq!(b.rect.bottom(), 100.0);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn test_head_bump_breaks_block() {
        let mut rows = vec![row(0, &[block(1, 300.0, 100.0), block(2, 312.0, 100.0)])];
        // feet 3px below the block's bottom edge
        let mut b = body(290.0, 115.0);
        b.dy = -15.0;

        let result = resolve_block_collisions(&mut b, &mut rows);
        match result {
            Collision::HeadBump { tier, removed } => {
                assert_eq!(tier, 0);
                assert_eq!(removed.len(), 1);
                assert_eq!(removed[0].id, 1);
            }
            other => panic!("expected head bump, got {other:?}"),
        }
        assert_eq!(b.dy, 0.0);
        assert_eq!(b.rect.top, 112.0 - 9.0);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].blocks()[0].id, 2);
    }

    #[test]
    fn test_head_bump_breaks_every_overlapping_block() {
        let mut rows = vec![row(0, &[block(1, 300.0, 100.0), block(2, 312.0, 100.0)])];
        let mut b = body(300.0, 115.0);
        b.dy = -8.0;
        let result = resolve_block_collisions(&mut b, &mut rows);
        assert!(matches!(result, Collision::HeadBump { ref removed, .. } if removed.len() == 2));
        assert!(rows[0].is_empty());
    }

    #[test]
    fn test_rising_past_block_edge_changes_nothing() {
        let mut rows = vec![row(0, &[block(1, 300.0, 100.0)])];
        let mut b = body(290.0, 110.0);
        b.dy = -4.0;
        let before = b.rect;
        assert_eq!(resolve_block_collisions(&mut b, &mut rows), Collision::Overlapping);
        assert_eq!(b.rect, before);
        assert_eq!(b.dy, -4.0);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn test_walking_right_into_block_side() {
        let mut rows = vec![row(0, &[block(1, 300.0, 100.0)])];
        let mut b = body(289.0, 112.0);
        b.dx = 2.0;
        let result = resolve_block_collisions(&mut b, &mut rows);
        assert!(matches!(result, Collision::SideBlocked { .. }));
        assert_eq!(b.dx, 0.0);
        assert_eq!(b.rect.right(), 303.0);
    }

    #[test]
    fn test_walking_left_into_block_side() {
        let mut rows = vec![row(0, &[block(1, 300.0, 100.0)])];
        let mut b = body(299.0, 112.0);
        b.dx = -2.0;
        let result = resolve_block_collisions(&mut b, &mut rows);
        assert!(matches!(result, Collision::SideBlocked { .. }));
        assert_eq!(b.dx, 0.0);
        assert_eq!(b.rect.left, 309.0);
    }

    #[test]
    fn test_only_first_overlapping_row_is_resolved() {
        let mut rows = vec![
            row(0, &[block(1, 300.0, 100.0)]),
            row(1, &[block(2, 300.0, 90.0)]),
        ];
        let mut b = body(290.0, 115.0);
        b.dy = -15.0;
        let result = resolve_block_collisions(&mut b, &mut rows);
        assert!(matches!(result, Collision::HeadBump { tier: 0, .. }));
        assert!(rows[0].is_empty());
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn test_no_overlap() {
        let mut rows = vec![row(0, &[block(1, 400.0, 100.0)])];
        let mut b = body(290.0, 115.0);
        b.dy = 3.0;
        assert_eq!(resolve_block_collisions(&mut b, &mut rows), Collision::None);
        assert_eq!(b.dy, 3.0);
    }
}
