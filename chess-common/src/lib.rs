//! Common types for ChessTTY
//!
//! This crate provides the canonical color, piece-kind and coordinate types
//! shared by the rules engine and the `chesstty` driver.

pub mod square;
pub mod types;

// Re-export commonly used items
pub use square::Square;
pub use types::{PieceColor, PieceKind};
