use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use sichuan_hu::{Suit, Tile};

// ============================================================================
// Tile Creation Macro
// ============================================================================

/// `tiles![1 wan, 2 wan, 3 tong]` builds a `Vec<Tile>`.
#[macro_export]
macro_rules! tiles {
    ($($rank:literal $suit:ident),* $(,)?) => {
        vec![$(::sichuan_hu::Tile::from_id(&format!("{}{}", $rank, stringify!($suit))).unwrap()),*]
    };
}

// ============================================================================
// Random Hand Generation
// ============================================================================

/// Builds a shuffled 14-tile hand from four random melds and a pair, never
/// using more than four copies of a tile.
pub fn random_winning_hand(rng: &mut StdRng) -> Vec<Tile> {
    loop {
        let mut counts = [0u8; 27];
        let mut hand = Vec::with_capacity(14);

        for _ in 0..4 {
            let suit = random_suit(rng);
            let meld: Vec<Tile> = if rng.random_bool(0.5) {
                let rank = rng.random_range(1..=9);
                vec![Tile::new(suit, rank).unwrap(); 3]
            } else {
                let start = rng.random_range(1..=7);
                (start..start + 3)
                    .map(|rank| Tile::new(suit, rank).unwrap())
                    .collect()
            };
            hand.extend(meld);
        }
        let pair = Tile::new(random_suit(rng), rng.random_range(1..=9)).unwrap();
        hand.extend([pair, pair]);

        for tile in &hand {
            counts[tile.index()] += 1;
        }
        if counts.iter().all(|&count| count <= 4) {
            hand.shuffle(rng);
            return hand;
        }
    }
}

fn random_suit(rng: &mut StdRng) -> Suit {
    match rng.random_range(0..3) {
        0 => Suit::Wan,
        1 => Suit::Tong,
        _ => Suit::Tiao,
    }
}
