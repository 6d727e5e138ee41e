//! Solution representation for N-Queens placements

use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete placement: one 1-indexed column per row, top row first
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Solution {
    columns: Vec<u32>,
}

impl Solution {
    pub fn new(columns: Vec<u32>) -> Self {
        Self { columns }
    }

    pub fn board_size(&self) -> u32 {
        self.columns.len() as u32
    }

    pub fn columns(&self) -> &[u32] {
        &self.columns
    }

    /// The left-right reflection of this placement
    pub fn mirrored(&self) -> Solution {
        let flip = self.board_size() + 1;
        Solution {
            columns: self.columns.iter().map(|&column| flip - column).collect(),
        }
    }

    /// Parse a record line such as `2 4 1 3`
    pub fn parse_record(line: &str) -> Option<Solution> {
        line.split_whitespace()
            .map(|token| token.parse::<u32>().ok())
            .collect::<Option<Vec<_>>>()
            .filter(|columns| !columns.is_empty())
            .map(Solution::new)
    }
}

/// Formats as a record line without the trailing newline
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", column)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored() {
        let solution = Solution::new(vec![2, 4, 1, 3]);
        assert_eq!(solution.mirrored(), Solution::new(vec![3, 1, 4, 2]));
        assert_eq!(solution.mirrored().mirrored(), solution);
    }

    #[test]
    fn test_display_matches_record_format() {
        let solution = Solution::new(vec![1, 5, 8, 6, 3, 7, 2, 4]);
        assert_eq!(solution.to_string(), "1 5 8 6 3 7 2 4");
        assert_eq!(Solution::new(vec![1]).to_string(), "1");
    }

    #[test]
    fn test_parse_record() {
        assert_eq!(Solution::parse_record("3 1 4 2"), Some(Solution::new(vec![3, 1, 4, 2])));
        assert_eq!(Solution::parse_record("  1  "), Some(Solution::new(vec![1])));
        assert_eq!(Solution::parse_record("3 x 4"), None);
        assert_eq!(Solution::parse_record(""), None);
    }
}
