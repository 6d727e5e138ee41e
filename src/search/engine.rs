//! Bitmask backtracking search for N-Queens placements
//!
//! Each row's state is three `u64` masks: occupied columns, and the columns
//! attacked along each diagonal direction. Moving to the next row shifts the
//! diagonal masks one position, so the free columns for a row are
//! `!(columns | left | right) & full_mask`. Columns are tried from the least
//! significant bit upward, which makes discovery order deterministic.
//!
//! Boards below the symmetry threshold only branch on the left half of the
//! first row and emit every solution together with its mirror image. The
//! middle column of an odd board has no mirror partner and is searched
//! separately. Larger boards run the plain search, bounded by the optional
//! solution cap.

use super::error::SearchError;
use super::sink::SolutionSink;
use crate::board::{classify, BoardClass, BoardSize};
use crate::config::SearchConfig;
use serde::Serialize;
use std::time::{Duration, Instant};

/// How a search run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// The board size has no solution under the active policy; nothing was searched
    Unsolvable,
    /// Every placement was explored
    Exhausted,
    /// The solution cap stopped the search early
    Capped,
}

/// Result and statistics of one search run
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub board_size: i64,
    pub status: SearchStatus,
    pub solutions: u64,
    /// Recursive calls made
    pub nodes: u64,
    pub used_symmetry: bool,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl SearchOutcome {
    fn unsolvable(board_size: i64, elapsed: Duration) -> Self {
        Self {
            board_size,
            status: SearchStatus::Unsolvable,
            solutions: 0,
            nodes: 0,
            used_symmetry: false,
            elapsed,
        }
    }

    pub fn is_unsolvable(&self) -> bool {
        self.status == SearchStatus::Unsolvable
    }

    pub fn was_capped(&self) -> bool {
        self.status == SearchStatus::Capped
    }
}

/// Runs searches with a fixed configuration
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Whether a board of this size takes the mirror-symmetry path
    pub fn uses_symmetry(&self, board: BoardSize) -> bool {
        board.get() < self.config.symmetry_threshold
    }

    /// Search a board of `board_size`, reporting each solution to `sink` as it is found.
    ///
    /// Rejected sizes return an error before any searching. Sizes the policy
    /// marks unsolvable return [`SearchStatus::Unsolvable`] without touching the sink.
    pub fn run<S: SolutionSink>(&self, board_size: i64, sink: &mut S) -> Result<SearchOutcome, SearchError> {
        let start_time = Instant::now();

        let board = match classify(board_size, self.config.unsolvable_policy)? {
            BoardClass::Solvable(board) => board,
            BoardClass::Unsolvable => {
                return Ok(SearchOutcome::unsolvable(board_size, start_time.elapsed()));
            }
        };

        let used_symmetry = self.uses_symmetry(board);
        let limit = if used_symmetry { None } else { self.config.solution_cap };

        let mut run = SearchRun::new(board, limit, sink);
        if used_symmetry {
            run.solve_with_symmetry()?;
        } else {
            run.backtrack(0, 0, 0)?;
        }

        Ok(SearchOutcome {
            board_size,
            status: if run.stopped { SearchStatus::Capped } else { SearchStatus::Exhausted },
            solutions: run.solutions,
            nodes: run.nodes,
            used_symmetry,
            elapsed: start_time.elapsed(),
        })
    }
}

/// State owned by a single search run
struct SearchRun<'a, S: SolutionSink> {
    board: BoardSize,
    full_mask: u64,
    /// Columns placed so far, one per filled row
    placement: Vec<u32>,
    /// Scratch space for mirrored solutions
    mirror: Vec<u32>,
    solutions: u64,
    nodes: u64,
    limit: Option<u64>,
    stopped: bool,
    sink: &'a mut S,
}

impl<'a, S: SolutionSink> SearchRun<'a, S> {
    fn new(board: BoardSize, limit: Option<u64>, sink: &'a mut S) -> Self {
        let size = board.get() as usize;
        Self {
            board,
            full_mask: board.full_mask(),
            placement: Vec::with_capacity(size),
            mirror: Vec::with_capacity(size),
            solutions: 0,
            nodes: 0,
            limit,
            stopped: false,
            sink,
        }
    }

    /// Place a queen at `column` for the next row, run `descend`, then take it back.
    /// The queen is removed even when `descend` fails.
    fn with_queen<F>(&mut self, column: u32, descend: F) -> Result<(), SearchError>
    where
        F: FnOnce(&mut Self) -> Result<(), SearchError>,
    {
        self.placement.push(column);
        let result = descend(self);
        self.placement.pop();
        result
    }

    fn solve_with_symmetry(&mut self) -> Result<(), SearchError> {
        let size = self.board.get();

        for column in 0..size / 2 {
            let bit = 1u64 << column;
            self.with_queen(column + 1, |run| run.mirrored_backtrack(bit, bit << 1, bit >> 1))?;
        }

        if self.board.is_odd() {
            let middle = size / 2;
            let bit = 1u64 << middle;
            self.with_queen(middle + 1, |run| run.backtrack(bit, bit << 1, bit >> 1))?;
        }

        Ok(())
    }

    /// Plain search: every completed placement is emitted once
    fn backtrack(&mut self, columns: u64, left: u64, right: u64) -> Result<(), SearchError> {
        if self.stopped {
            return Ok(());
        }
        self.nodes += 1;

        if columns == self.full_mask {
            return self.emit();
        }

        let mut available = !(columns | left | right) & self.full_mask;
        while available != 0 {
            if self.stopped {
                return Ok(());
            }

            let bit = available & available.wrapping_neg();
            available ^= bit;

            self.with_queen(bit.trailing_zeros() + 1, |run| {
                run.backtrack(columns | bit, (left | bit) << 1, (right | bit) >> 1)
            })?;
        }

        Ok(())
    }

    /// Search below a left-half first-row queen: every completed placement is
    /// emitted together with its mirror
    fn mirrored_backtrack(&mut self, columns: u64, left: u64, right: u64) -> Result<(), SearchError> {
        self.nodes += 1;

        if columns == self.full_mask {
            return self.emit_with_mirror();
        }

        let mut available = !(columns | left | right) & self.full_mask;
        while available != 0 {
            let bit = available & available.wrapping_neg();
            available ^= bit;

            self.with_queen(bit.trailing_zeros() + 1, |run| {
                run.mirrored_backtrack(columns | bit, (left | bit) << 1, (right | bit) >> 1)
            })?;
        }

        Ok(())
    }

    fn emit(&mut self) -> Result<(), SearchError> {
        self.sink.record(&self.placement)?;
        self.solutions += 1;

        if let Some(limit) = self.limit {
            if self.solutions >= limit {
                self.stopped = true;
            }
        }
        Ok(())
    }

    fn emit_with_mirror(&mut self) -> Result<(), SearchError> {
        self.sink.record(&self.placement)?;
        self.solutions += 1;

        let board = self.board;
        self.mirror.clear();
        self.mirror.extend(self.placement.iter().map(|&column| board.mirror_column(column)));
        self.sink.record(&self.mirror)?;
        self.solutions += 1;

        Ok(())
    }
}
