use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("Unknown tile id: {0}")]
    UnknownTile(String),
    #[error("Rank out of range: {0}")]
    RankOutOfRange(u8),
}

/// The three numbered suits played in Sichuan Mahjong.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Suit {
    /// Characters (万)
    Wan = 0,
    /// Dots (筒)
    Tong = 1,
    /// Bamboo (条)
    Tiao = 2,
}

impl Suit {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name_cn(self) -> &'static str {
        match self {
            Suit::Wan => "万",
            Suit::Tong => "筒",
            Suit::Tiao => "条",
        }
    }

    pub fn name_en(self) -> &'static str {
        match self {
            Suit::Wan => "Characters",
            Suit::Tong => "Dots",
            Suit::Tiao => "Bamboo",
        }
    }
}

/// A tile identity. Two tiles with the same suit and rank are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tile {
    pub suit: Suit,
    pub rank: u8,
}

impl Tile {
    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 9;
    /// Copies of each identity in a full set.
    pub const COPIES: u8 = 4;
    /// Number of distinct identities (3 suits x 9 ranks).
    pub const KINDS: usize = 27;

    pub fn new(suit: Suit, rank: u8) -> Result<Self, TileError> {
        if !(Self::MIN_RANK..=Self::MAX_RANK).contains(&rank) {
            return Err(TileError::RankOutOfRange(rank));
        }
        Ok(Self { suit, rank })
    }

    /// Parses ids of the form `{rank}{suit}`, e.g. `5wan`, `1tong`, `9tiao`.
    pub fn from_id(id: &str) -> Result<Self, TileError> {
        let unknown = || TileError::UnknownTile(id.to_string());

        let split = id.find(|c: char| !c.is_ascii_digit()).ok_or_else(unknown)?;
        let (rank, suit) = id.split_at(split);
        let rank: u8 = rank.parse().map_err(|_| unknown())?;
        let suit = Suit::from_str(suit).map_err(|_| unknown())?;

        Self::new(suit, rank).map_err(|_| unknown())
    }

    pub fn id(&self) -> String {
        self.to_string()
    }

    /// Dense index in `0..27`, ordered by (suit, rank).
    pub fn index(&self) -> usize {
        self.suit.index() * 9 + (self.rank - 1) as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= Self::KINDS {
            return None;
        }
        let suit = Suit::iter().nth(index / 9)?;
        Some(Self {
            suit,
            rank: (index % 9) as u8 + 1,
        })
    }

    pub fn all_kinds() -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(Self::KINDS);
        for suit in Suit::iter() {
            for rank in Self::MIN_RANK..=Self::MAX_RANK {
                tiles.push(Tile { suit, rank });
            }
        }
        tiles
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            other => other,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Tile {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s)
    }
}

impl TryFrom<String> for Tile {
    type Error = TileError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_id(&s)
    }
}

impl From<Tile> for String {
    fn from(tile: Tile) -> Self {
        tile.id()
    }
}
