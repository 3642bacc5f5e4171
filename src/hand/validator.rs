use std::collections::HashMap;

use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, error, instrument};

use super::histogram::{SuitHistogram, TileCounts};
use super::melds::{Decomposition, Meld, Pair};
use crate::tiles::{Suit, Tile};

/// Tiles in a completed hand: four melds plus the pair.
pub const HAND_SIZE: usize = 14;
const MELDS_PER_HAND: usize = 4;

/// Upper bound on uncached search expansions for a single `validate` call.
pub const DEFAULT_STEP_LIMIT: usize = 20_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("Invalid hand size: expected {expected} tiles, got {actual}")]
    InvalidHandSize { expected: usize, actual: usize },
    #[error("Unknown tile id: {0}")]
    UnknownTile(String),
    #[error("Tile {tile} appears {count} times, at most 4 copies exist")]
    TooManyCopies { tile: String, count: u8 },
    #[error("Decomposition search exceeded {limit} steps")]
    InternalLimitExceeded { limit: usize },
}

impl HandError {
    /// Caller mistakes, as opposed to a failure of the search itself.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, HandError::InternalLimitExceeded { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_win: bool,
    pub decomposition: Option<Decomposition>,
}

impl ValidationResult {
    fn win(decomposition: Decomposition) -> Self {
        Self {
            is_win: true,
            decomposition: Some(decomposition),
        }
    }

    fn no_win() -> Self {
        Self {
            is_win: false,
            decomposition: None,
        }
    }
}

/// Decides whether 14 tiles split into four melds and a pair.
///
/// The search removes each candidate pair in ascending (suit, rank) order and
/// then asks, per suit, whether the remaining rank histogram can be consumed
/// entirely by triplets and runs. Per-suit answers are cached by histogram,
/// so work is shared between pair candidates and between suits.
#[derive(Debug, Clone)]
pub struct HandValidator {
    step_limit: usize,
}

impl Default for HandValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl HandValidator {
    pub fn new() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    pub fn with_step_limit(step_limit: usize) -> Self {
        Self { step_limit }
    }

    #[instrument(level = "debug", skip(self, tiles), fields(tile_count = tiles.len()))]
    pub fn validate(&self, tiles: &[Tile]) -> Result<ValidationResult, HandError> {
        if tiles.len() != HAND_SIZE {
            return Err(HandError::InvalidHandSize {
                expected: HAND_SIZE,
                actual: tiles.len(),
            });
        }

        let counts = TileCounts::from_tiles(tiles);
        if let Some((tile, count)) = counts.iter().find(|(_, count)| *count > Tile::COPIES) {
            return Err(HandError::TooManyCopies {
                tile: tile.id(),
                count,
            });
        }

        let mut search = MeldSearch::new(self.step_limit);
        let result = search.run(&counts);
        if let Err(HandError::InternalLimitExceeded { limit }) = &result {
            error!(limit, "Hand decomposition exceeded its step limit");
        }
        result
    }

    /// Parses tile ids and validates the resulting hand.
    pub fn validate_ids<S: AsRef<str>>(&self, ids: &[S]) -> Result<ValidationResult, HandError> {
        let tiles = ids
            .iter()
            .map(|id| {
                Tile::from_id(id.as_ref()).map_err(|_| HandError::UnknownTile(id.as_ref().into()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.validate(&tiles)
    }
}

/// Per-call search state. The cache maps a suit histogram to whether it can be
/// fully consumed by melds.
struct MeldSearch {
    cache: HashMap<SuitHistogram, bool>,
    steps: usize,
    step_limit: usize,
}

impl MeldSearch {
    fn new(step_limit: usize) -> Self {
        Self {
            cache: HashMap::new(),
            steps: 0,
            step_limit,
        }
    }

    fn run(&mut self, counts: &TileCounts) -> Result<ValidationResult, HandError> {
        let pair_candidates: Vec<Tile> = counts
            .iter()
            .filter(|(_, count)| *count >= 2)
            .map(|(tile, _)| tile)
            .collect();

        for pair_tile in pair_candidates {
            let mut remaining = counts.clone();
            remaining.remove(pair_tile, 2);

            let histograms: Vec<(Suit, SuitHistogram)> = Suit::iter()
                .map(|suit| (suit, remaining.histogram(suit)))
                .collect();

            if histograms.iter().any(|(_, h)| h.total() % 3 != 0) {
                continue;
            }

            let mut all_decomposable = true;
            for (_, histogram) in &histograms {
                if !self.decomposable(*histogram)? {
                    all_decomposable = false;
                    break;
                }
            }
            if !all_decomposable {
                continue;
            }

            let mut melds = Vec::with_capacity(MELDS_PER_HAND);
            for (suit, histogram) in &histograms {
                self.collect_melds(*suit, *histogram, &mut melds)?;
            }

            debug!(pair = %pair_tile, meld_count = melds.len(), "Found decomposition");
            return match <[Meld; MELDS_PER_HAND]>::try_from(melds) {
                Ok(melds) => Ok(ValidationResult::win(Decomposition {
                    melds,
                    pair: Pair::new(pair_tile),
                })),
                Err(_) => Ok(ValidationResult::no_win()),
            };
        }

        Ok(ValidationResult::no_win())
    }

    /// Whether the histogram can be consumed by triplets and runs. The lowest
    /// remaining rank must start either a triplet or a run, so trying both at
    /// that rank covers every decomposition.
    fn decomposable(&mut self, histogram: SuitHistogram) -> Result<bool, HandError> {
        let Some(rank) = histogram.lowest_rank() else {
            return Ok(true);
        };
        if let Some(&known) = self.cache.get(&histogram) {
            return Ok(known);
        }
        self.tick()?;

        let mut result = false;
        if let Some(next) = histogram.without_triplet(rank) {
            result = self.decomposable(next)?;
        }
        if !result {
            if let Some(next) = histogram.without_run(rank) {
                result = self.decomposable(next)?;
            }
        }

        self.cache.insert(histogram, result);
        Ok(result)
    }

    /// Replays the cached answers to emit melds, preferring a triplet at each step.
    fn collect_melds(
        &mut self,
        suit: Suit,
        mut histogram: SuitHistogram,
        melds: &mut Vec<Meld>,
    ) -> Result<(), HandError> {
        while let Some(rank) = histogram.lowest_rank() {
            let triplet = match histogram.without_triplet(rank) {
                Some(next) if self.decomposable(next)? => Some(next),
                _ => None,
            };

            if let Some(next) = triplet {
                melds.push(Meld::triplet(Tile { suit, rank }));
                histogram = next;
                continue;
            }

            match (histogram.without_run(rank), Meld::run(suit, rank)) {
                (Some(next), Some(run)) => {
                    melds.push(run);
                    histogram = next;
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<(), HandError> {
        self.steps += 1;
        if self.steps > self.step_limit {
            return Err(HandError::InternalLimitExceeded {
                limit: self.step_limit,
            });
        }
        Ok(())
    }
}
