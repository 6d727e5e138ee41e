//! N-Queens Solver
//!
//! This library enumerates, counts or samples placements of N non-attacking
//! queens using a bitmask backtracking search with mirror-symmetry reduction.

pub mod config;
pub mod board;
pub mod search;
pub mod utils;

pub use config::Settings;
pub use board::Solution;
pub use search::{QueensProblem, SearchEngine, SearchError};

use config::SearchConfig;
use search::MemorySink;

/// Find every solution for a board of `board_size` with the default search settings.
///
/// Returns the solution count and the solutions in discovery order. Boards
/// with no solution return `(0, [])`.
pub fn search(board_size: i64) -> Result<(u64, Vec<Solution>), SearchError> {
    let engine = SearchEngine::new(SearchConfig::default());
    let mut sink = MemorySink::new();
    let outcome = engine.run(board_size, &mut sink)?;
    Ok((outcome.solutions, sink.into_solutions()))
}
