use serde::{Deserialize, Serialize};

use super::basic::{Suit, Tile};

/// Display metadata for a single tile kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    pub id: String,
    pub suit: Suit,
    pub rank: u8,
    pub name_cn: String,
    pub name_en: String,
    pub image_url: String,
}

impl From<Tile> for TileInfo {
    fn from(tile: Tile) -> Self {
        let id = tile.id();
        Self {
            name_cn: format!("{}{}", tile.rank, tile.suit.name_cn()),
            name_en: format!("{} {}", tile.rank, tile.suit.name_en()),
            image_url: format!("/tiles/{}.jpg", id),
            id,
            suit: tile.suit,
            rank: tile.rank,
        }
    }
}

/// All 27 tile kinds in (suit, rank) order.
pub fn all_tiles() -> Vec<TileInfo> {
    Tile::all_kinds().into_iter().map(TileInfo::from).collect()
}
