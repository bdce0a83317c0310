//! Platform blocks and the per-tier rows that group them

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Which quarter of a tile cell a block covers (also its visual handle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub fn is_top(&self) -> bool {
        matches!(self, Quadrant::TopLeft | Quadrant::TopRight)
    }
}

/// A static, breakable platform block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub rect: Rect,
    pub quadrant: Quadrant,
}

/// All blocks of one structural tier; an independent collision group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockRow {
    /// Tier index, 0 = topmost generated tier
    pub tier: usize,
    blocks: Vec<Block>,
}

impl BlockRow {
    pub fn new(tier: usize) -> Self {
        Self {
            tier,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks overlapping `hitbox`, in row order
    pub fn intersecting(&self, hitbox: &Rect) -> Vec<Block> {
        self.blocks
            .iter()
            .filter(|b| hitbox.intersects(&b.rect))
            .copied()
            .collect()
    }

    /// Remove one block; returns it if it was in this row
    pub fn remove(&mut self, id: u32) -> Option<Block> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        Some(self.blocks.remove(index))
    }

    /// Remove every listed block, returning how many were present
    pub fn remove_all(&mut self, ids: &[u32]) -> usize {
        let before = self.blocks.len();
        self.blocks.retain(|b| !ids.contains(&b.id));
        before - self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(n: u32) -> BlockRow {
        let mut row = BlockRow::new(0);
        for i in 0..n {
            row.push(Block {
                id: i,
                rect: Rect::new(i as f32 * 12.0, 48.0, 12.0, 12.0),
                quadrant: if i % 2 == 0 {
                    Quadrant::TopLeft
                } else {
                    Quadrant::TopRight
                },
            });
        }
        row
    }

    #[test]
    fn test_remove_by_id() {
        let mut row = row_of(4);
        assert_eq!(row.remove(2).map(|b| b.id), Some(2));
        assert_eq!(row.remove(2), None);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_remove_all_ignores_foreign_ids() {
        let mut row = row_of(4);
        assert_eq!(row.remove_all(&[0, 3, 99]), 2);
        let ids: Vec<u32> = row.blocks().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_intersecting_keeps_row_order() {
        let row = row_of(4);
        let hits = row.intersecting(&Rect::new(10.0, 50.0, 16.0, 4.0));
        let ids: Vec<u32> = hits.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
