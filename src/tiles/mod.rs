pub mod basic;
pub mod catalog;
mod handlers;

pub use basic::{Suit, Tile, TileError};
pub use catalog::{all_tiles, TileInfo};
pub use handlers::list_tiles;
