//! Errors reported by the search engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("board size must be positive, got {0}")]
    NonPositiveBoard(i64),

    #[error("board size {size} exceeds the supported maximum of {max}")]
    BoardTooLarge { size: i64, max: u32 },

    #[error("solution sink failed: {0}")]
    Sink(#[from] std::io::Error),
}
