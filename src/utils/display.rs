//! Display and output formatting utilities

use crate::board::Solution;
use crate::search::{SearchOutcome, SearchStatus};
use std::time::Duration;

/// Format solutions and run results for the console
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Draw a solution as an N x N board, top row first
    pub fn format_board(solution: &Solution) -> String {
        let size = solution.board_size() as usize;
        let mut output = String::with_capacity(size * (size * 2 + 1));

        for &column in solution.columns() {
            for x in 1..=size {
                output.push(if x == column as usize { '♛' } else { '·' });
                if x < size {
                    output.push(' ');
                }
            }
            output.push('\n');
        }

        output
    }

    /// Console summary in the `N = / Solutions = / Time =` layout.
    /// `elapsed` is the wall time of the whole run, not just the search
    pub fn format_outcome(outcome: &SearchOutcome, elapsed: Duration) -> String {
        format!(
            "N = {}\nSolutions = {}\nTime = {} ms\n",
            outcome.board_size,
            outcome.solutions,
            elapsed.as_millis()
        )
    }

    /// Search statistics shown in verbose mode
    pub fn format_statistics(outcome: &SearchOutcome) -> String {
        let status = match outcome.status {
            SearchStatus::Unsolvable => "no solution (not searched)",
            SearchStatus::Exhausted => "exhausted",
            SearchStatus::Capped => "stopped at solution cap",
        };

        let mut output = String::new();
        output.push_str("Search Statistics:\n");
        output.push_str(&format!("  Status: {}\n", status));
        output.push_str(&format!("  Nodes visited: {}\n", outcome.nodes));
        output.push_str(&format!("  Search time: {} ms\n", outcome.elapsed.as_millis()));
        output.push_str(&format!(
            "  Symmetry reduction: {}\n",
            if outcome.used_symmetry { "yes" } else { "no" }
        ));
        if outcome.nodes > 0 {
            output.push_str(&format!(
                "  Solutions per 1000 nodes: {:.2}\n",
                outcome.solutions as f64 * 1000.0 / outcome.nodes as f64
            ));
        }
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_formatting() {
        let board = SolutionFormatter::format_board(&Solution::new(vec![2, 4, 1, 3]));
        assert_eq!(board, "· ♛ · ·\n· · · ♛\n♛ · · ·\n· · ♛ ·\n");
    }

    #[test]
    fn test_outcome_formatting() {
        let outcome = SearchOutcome {
            board_size: 8,
            status: SearchStatus::Exhausted,
            solutions: 92,
            nodes: 1000,
            used_symmetry: true,
            elapsed: Duration::from_millis(3),
        };

        assert_eq!(
            SolutionFormatter::format_outcome(&outcome, Duration::from_millis(7)),
            "N = 8\nSolutions = 92\nTime = 7 ms\n"
        );

        let stats = SolutionFormatter::format_statistics(&outcome);
        assert!(stats.contains("Nodes visited: 1000"));
        assert!(stats.contains("Search time: 3 ms"));
        assert!(stats.contains("Symmetry reduction: yes"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
