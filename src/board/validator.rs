//! Placement and summary-file validation

use super::io::NO_SOLUTION;
use super::Solution;
use anyhow::{Context, Result};
use itertools::Itertools;
use rayon::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Why a placement is not a valid N-Queens solution. Rows are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementViolation {
    #[error("expected {expected} columns, found {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("column {column} in row {row} is outside 1..={board_size}")]
    OutOfRange { row: usize, column: u32, board_size: u32 },
    #[error("rows {first} and {second} share column {column}")]
    SharedColumn { first: usize, second: usize, column: u32 },
    #[error("rows {first} and {second} share a diagonal")]
    SharedDiagonal { first: usize, second: usize },
}

/// Check that `columns` places `board_size` non-attacking queens
pub fn check_placement(board_size: u32, columns: &[u32]) -> Result<(), PlacementViolation> {
    if columns.len() != board_size as usize {
        return Err(PlacementViolation::WrongLength {
            expected: board_size as usize,
            found: columns.len(),
        });
    }

    if let Some((row, &column)) = columns
        .iter()
        .enumerate()
        .find(|(_, column)| **column == 0 || **column > board_size)
    {
        return Err(PlacementViolation::OutOfRange { row: row + 1, column, board_size });
    }

    for ((i, &a), (j, &b)) in columns.iter().enumerate().tuple_combinations() {
        if a == b {
            return Err(PlacementViolation::SharedColumn { first: i + 1, second: j + 1, column: a });
        }
        if a.abs_diff(b) as usize == j - i {
            return Err(PlacementViolation::SharedDiagonal { first: i + 1, second: j + 1 });
        }
    }

    Ok(())
}

/// A record in a summary file that failed validation
#[derive(Debug, Clone)]
pub struct InvalidRecord {
    /// 1-indexed line number within the summary file
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// Result of validating a summary file
#[derive(Debug, Clone)]
pub struct SummaryValidation {
    pub is_valid: bool,
    pub no_solution: bool,
    pub board_size: Option<u32>,
    pub declared_solutions: u64,
    pub records_found: u64,
    pub invalid_records: Vec<InvalidRecord>,
}

/// Validates summary files written by the solver
pub struct SolutionValidator;

impl SolutionValidator {
    /// Validate a summary file on disk
    pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<SummaryValidation> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read summary: {}", path.as_ref().display()))?;
        Self::validate_summary(&content)
    }

    /// Validate the contents of a summary file.
    ///
    /// Fails only when the header itself cannot be parsed; bad records are
    /// collected into the result.
    pub fn validate_summary(content: &str) -> Result<SummaryValidation> {
        if content.trim() == NO_SOLUTION {
            return Ok(SummaryValidation {
                is_valid: true,
                no_solution: true,
                board_size: None,
                declared_solutions: 0,
                records_found: 0,
                invalid_records: Vec::new(),
            });
        }

        let mut lines = content.lines();
        let board_size: u32 = lines
            .next()
            .map(str::trim)
            .context("Summary is empty")?
            .parse()
            .context("First line must be the board size")?;
        let declared_solutions: u64 = lines
            .next()
            .map(str::trim)
            .context("Summary is missing the solution count")?
            .parse()
            .context("Second line must be the solution count")?;

        let records: Vec<&str> = lines.filter(|line| !line.trim().is_empty()).collect();

        let invalid_records: Vec<InvalidRecord> = records
            .par_iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let reason = match Solution::parse_record(line) {
                    None => "record is not a list of column numbers".to_string(),
                    Some(solution) => check_placement(board_size, solution.columns()).err()?.to_string(),
                };
                Some(InvalidRecord { line: i + 3, content: line.to_string(), reason })
            })
            .collect();

        let records_found = records.len() as u64;

        Ok(SummaryValidation {
            is_valid: invalid_records.is_empty() && records_found == declared_solutions,
            no_solution: false,
            board_size: Some(board_size),
            declared_solutions,
            records_found,
            invalid_records,
        })
    }
}

impl std::fmt::Display for SummaryValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Validation Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;

        if self.no_solution {
            return writeln!(f, "Summary reports no solution");
        }

        if let Some(board_size) = self.board_size {
            writeln!(f, "Board size: {}", board_size)?;
        }
        writeln!(f, "Declared solutions: {}", self.declared_solutions)?;
        writeln!(f, "Records found: {}", self.records_found)?;
        writeln!(f, "Invalid records: {}", self.invalid_records.len())?;

        for record in self.invalid_records.iter().take(3) {
            writeln!(f, "  line {}: '{}' ({})", record.line, record.content, record.reason)?;
        }
        if self.invalid_records.len() > 3 {
            writeln!(f, "  ... and {} more", self.invalid_records.len() - 3)?;
        }

        Ok(())
    }
}
