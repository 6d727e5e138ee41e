//! Board size handling and the unsolvable-size policy

use crate::config::{UnsolvablePolicy, MAX_BOARD_SIZE};
use crate::search::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A board size the bitmask search can handle (1..=64)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardSize(u32);

/// Result of checking a requested size against the unsolvable policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardClass {
    Solvable(BoardSize),
    Unsolvable,
}

impl BoardSize {
    pub fn new(size: u32) -> Result<Self, SearchError> {
        if size == 0 {
            return Err(SearchError::NonPositiveBoard(0));
        }
        if size > MAX_BOARD_SIZE {
            return Err(SearchError::BoardTooLarge { size: size as i64, max: MAX_BOARD_SIZE });
        }
        Ok(Self(size))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Mask with the lowest N bits set
    #[inline]
    pub fn full_mask(self) -> u64 {
        u64::MAX >> (64 - self.0)
    }

    #[inline]
    pub fn is_odd(self) -> bool {
        self.0 % 2 == 1
    }

    /// Column index reflected through the vertical axis (1-indexed)
    #[inline]
    pub fn mirror_column(self, column: u32) -> u32 {
        self.0 + 1 - column
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classify a raw requested size.
///
/// Sizes the policy declares unsolvable come back as `Ok(BoardClass::Unsolvable)`,
/// which is distinct from a rejected size.
pub fn classify(size: i64, policy: UnsolvablePolicy) -> Result<BoardClass, SearchError> {
    let unsolvable = match policy {
        UnsolvablePolicy::TwoAndThree => {
            if size <= 0 {
                return Err(SearchError::NonPositiveBoard(size));
            }
            size == 2 || size == 3
        }
        UnsolvablePolicy::BelowFour => size < 4 && size != 1,
    };

    if unsolvable {
        return Ok(BoardClass::Unsolvable);
    }

    if size > MAX_BOARD_SIZE as i64 {
        return Err(SearchError::BoardTooLarge { size, max: MAX_BOARD_SIZE });
    }

    Ok(BoardClass::Solvable(BoardSize(size as u32)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_mask() {
        assert_eq!(BoardSize::new(1).unwrap().full_mask(), 0b1);
        assert_eq!(BoardSize::new(4).unwrap().full_mask(), 0b1111);
        assert_eq!(BoardSize::new(64).unwrap().full_mask(), u64::MAX);
    }

    #[test]
    fn test_mirror_column() {
        let board = BoardSize::new(8).unwrap();
        assert_eq!(board.mirror_column(1), 8);
        assert_eq!(board.mirror_column(8), 1);
        assert_eq!(board.mirror_column(4), 5);
    }

    #[test]
    fn test_two_and_three_policy() {
        let policy = UnsolvablePolicy::TwoAndThree;
        assert_eq!(classify(1, policy).unwrap(), BoardClass::Solvable(BoardSize(1)));
        assert_eq!(classify(2, policy).unwrap(), BoardClass::Unsolvable);
        assert_eq!(classify(3, policy).unwrap(), BoardClass::Unsolvable);
        assert_eq!(classify(4, policy).unwrap(), BoardClass::Solvable(BoardSize(4)));
        assert!(matches!(classify(0, policy), Err(SearchError::NonPositiveBoard(0))));
        assert!(matches!(classify(-5, policy), Err(SearchError::NonPositiveBoard(-5))));
    }

    #[test]
    fn test_below_four_policy() {
        let policy = UnsolvablePolicy::BelowFour;
        assert_eq!(classify(1, policy).unwrap(), BoardClass::Solvable(BoardSize(1)));
        assert_eq!(classify(0, policy).unwrap(), BoardClass::Unsolvable);
        assert_eq!(classify(-2, policy).unwrap(), BoardClass::Unsolvable);
        assert_eq!(classify(3, policy).unwrap(), BoardClass::Unsolvable);
    }

    #[test]
    fn test_oversized_board_rejected() {
        assert!(matches!(
            classify(65, UnsolvablePolicy::TwoAndThree),
            Err(SearchError::BoardTooLarge { size: 65, .. })
        ));
        assert!(BoardSize::new(65).is_err());
        assert!(BoardSize::new(0).is_err());
    }
}
