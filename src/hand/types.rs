use serde::{Deserialize, Serialize};

use super::melds::Decomposition;

/// Request payload for checking a hand
#[derive(Debug, Deserialize)]
pub struct CheckHandRequest {
    pub tiles: Vec<String>,
}

/// Tile ids of a decomposition, grouped the way they are displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandDetail {
    pub melds: Vec<[String; 3]>,
    pub pair: [String; 2],
}

impl From<&Decomposition> for HandDetail {
    fn from(decomposition: &Decomposition) -> Self {
        Self {
            melds: decomposition
                .melds
                .iter()
                .map(|meld| meld.tiles().map(|tile| tile.id()))
                .collect(),
            pair: decomposition.pair.tiles().map(|tile| tile.id()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckHandResponse {
    pub is_win: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<HandDetail>,
}
