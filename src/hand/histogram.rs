use crate::tiles::{Suit, Tile};

const BITS_PER_RANK: u32 = 3;
const RANK_MASK: u32 = 0b111;

/// Rank counts of a single suit, packed three bits per rank.
///
/// Counts range over 0..=4, so the whole suit fits in 27 bits and the packed
/// value can key the decomposition cache directly. The histogram carries no
/// suit: identical shapes in different suits share one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SuitHistogram(u32);

impl SuitHistogram {
    pub fn from_counts(counts: &[u8; 9]) -> Self {
        let mut packed = 0u32;
        for (offset, &count) in counts.iter().enumerate() {
            packed |= (count as u32 & RANK_MASK) << (offset as u32 * BITS_PER_RANK);
        }
        Self(packed)
    }

    pub fn count(&self, rank: u8) -> u8 {
        ((self.0 >> Self::shift(rank)) & RANK_MASK) as u8
    }

    pub fn total(&self) -> u32 {
        (Tile::MIN_RANK..=Tile::MAX_RANK)
            .map(|rank| self.count(rank) as u32)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn lowest_rank(&self) -> Option<u8> {
        (Tile::MIN_RANK..=Tile::MAX_RANK).find(|&rank| self.count(rank) > 0)
    }

    pub fn without_triplet(&self, rank: u8) -> Option<Self> {
        if self.count(rank) < 3 {
            return None;
        }
        Some(Self(self.0 - (3 << Self::shift(rank))))
    }

    pub fn without_run(&self, start: u8) -> Option<Self> {
        if start + 2 > Tile::MAX_RANK {
            return None;
        }
        if (start..start + 3).any(|rank| self.count(rank) == 0) {
            return None;
        }
        let mut packed = self.0;
        for rank in start..start + 3 {
            packed -= 1 << Self::shift(rank);
        }
        Some(Self(packed))
    }

    fn shift(rank: u8) -> u32 {
        (rank - 1) as u32 * BITS_PER_RANK
    }
}

/// Per-kind tile counts of a whole hand, indexed by [`Tile::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCounts([u8; Tile::KINDS]);

impl TileCounts {
    pub fn from_tiles(tiles: &[Tile]) -> Self {
        let mut counts = [0u8; Tile::KINDS];
        for tile in tiles {
            counts[tile.index()] = counts[tile.index()].saturating_add(1);
        }
        Self(counts)
    }

    pub fn get(&self, tile: Tile) -> u8 {
        self.0[tile.index()]
    }

    /// Tiles present in the hand with their counts, in (suit, rank) order.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .filter_map(|(index, &count)| Tile::from_index(index).map(|tile| (tile, count)))
    }

    pub fn remove(&mut self, tile: Tile, n: u8) {
        let slot = &mut self.0[tile.index()];
        *slot = slot.saturating_sub(n);
    }

    pub fn histogram(&self, suit: Suit) -> SuitHistogram {
        let start = suit.index() * 9;
        let mut counts = [0u8; 9];
        counts.copy_from_slice(&self.0[start..start + 9]);
        SuitHistogram::from_counts(&counts)
    }
}
