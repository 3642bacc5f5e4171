use serde::{Deserialize, Serialize};

use crate::tiles::{Suit, Tile};

/// A set of three tiles: either three identical tiles or three consecutive ranks of one suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Meld {
    Triplet { tile: Tile },
    Run { suit: Suit, start: u8 },
}

impl Meld {
    pub fn triplet(tile: Tile) -> Self {
        Meld::Triplet { tile }
    }

    /// Returns `None` when the run would extend past rank 9.
    pub fn run(suit: Suit, start: u8) -> Option<Self> {
        if start < Tile::MIN_RANK || start + 2 > Tile::MAX_RANK {
            return None;
        }
        Some(Meld::Run { suit, start })
    }

    pub fn tiles(&self) -> [Tile; 3] {
        match *self {
            Meld::Triplet { tile } => [tile; 3],
            Meld::Run { suit, start } => [
                Tile { suit, rank: start },
                Tile {
                    suit,
                    rank: start + 1,
                },
                Tile {
                    suit,
                    rank: start + 2,
                },
            ],
        }
    }

    pub fn suit(&self) -> Suit {
        match self {
            Meld::Triplet { tile } => tile.suit,
            Meld::Run { suit, .. } => *suit,
        }
    }

    pub fn is_triplet(&self) -> bool {
        matches!(self, Meld::Triplet { .. })
    }
}

/// Two identical tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub tile: Tile,
}

impl Pair {
    pub fn new(tile: Tile) -> Self {
        Self { tile }
    }

    pub fn tiles(&self) -> [Tile; 2] {
        [self.tile; 2]
    }
}

/// A winning hand split into four melds and one pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    pub melds: [Meld; 4],
    pub pair: Pair,
}

impl Decomposition {
    /// Every tile of the decomposition, sorted.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles: Vec<Tile> = self
            .melds
            .iter()
            .flat_map(|meld| meld.tiles())
            .chain(self.pair.tiles())
            .collect();
        tiles.sort();
        tiles
    }

    pub fn all_triplets(&self) -> bool {
        self.melds.iter().all(Meld::is_triplet)
    }
}
