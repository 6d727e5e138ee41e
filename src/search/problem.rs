//! A single N-Queens solve: input, search, and summary output

use super::engine::{SearchEngine, SearchOutcome, SearchStatus};
use super::sink::{BufferedFileSink, CountingSink, SolutionSink};
use crate::board::io::write_json_report;
use crate::board::{
    derive_output_path, derive_report_path, read_board_size, write_no_solution, write_summary,
};
use crate::config::Settings;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// An N-Queens problem bound to its settings and output locations
pub struct QueensProblem {
    settings: Settings,
    board_size: i64,
    output_path: PathBuf,
    report_path: PathBuf,
    /// Taken before the input is read, so run timings cover the whole solve
    started: Instant,
}

/// What a solve produced and where it was written
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub outcome: SearchOutcome,
    pub output_path: PathBuf,
    pub report_path: Option<PathBuf>,
    /// Input parsing, search and summary output together
    pub elapsed: Duration,
}

/// JSON report written alongside the summary file
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub board_size: i64,
    pub status: SearchStatus,
    pub total_solutions: u64,
    pub nodes: u64,
    pub used_symmetry: bool,
    pub symmetry_threshold: u32,
    pub solution_cap: Option<u64>,
    pub count_only: bool,
    pub search_ms: u64,
    pub elapsed_ms: u64,
    pub summary_file: PathBuf,
}

impl QueensProblem {
    /// Create a problem by reading the board size from the configured input file
    pub fn new(settings: Settings) -> Result<Self> {
        let started = Instant::now();
        let input_file = settings.input.input_file.clone();
        let board_size = read_board_size(&input_file)
            .context("Failed to load board size")?;

        let output_path = settings
            .output
            .output_file
            .clone()
            .unwrap_or_else(|| derive_output_path(&input_file));
        let report_path = derive_report_path(&input_file);

        Ok(Self { settings, board_size, output_path, report_path, started })
    }

    /// Create a problem for an explicit board size
    pub fn with_board_size(settings: Settings, board_size: i64) -> Self {
        let started = Instant::now();
        let output_directory = &settings.output.output_directory;
        let output_path = settings
            .output
            .output_file
            .clone()
            .unwrap_or_else(|| output_directory.join(format!("n{}_output.txt", board_size)));
        let report_path = output_directory.join(format!("n{}_report.json", board_size));

        Self { settings, board_size, output_path, report_path, started }
    }

    pub fn board_size(&self) -> i64 {
        self.board_size
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the search and write the summary file (and the JSON report if enabled)
    pub fn solve(&self) -> Result<SolveReport> {
        if self.settings.output.write_report && self.report_path == self.output_path {
            anyhow::bail!(
                "Report path {} would overwrite the summary; choose a different output file",
                self.report_path.display()
            );
        }

        let engine = SearchEngine::new(self.settings.search.clone());

        let outcome = if self.settings.output.count_only {
            self.run_with_sink(&engine, CountingSink::new())?
        } else {
            let sink = BufferedFileSink::new(self.settings.output.buffer_capacity)
                .context("Failed to create scratch storage for solutions")?;
            self.run_with_sink(&engine, sink)?
        };

        let elapsed = self.started.elapsed();

        let report_path = if self.settings.output.write_report {
            write_json_report(&self.report_path, &self.run_report(&outcome, elapsed))?;
            Some(self.report_path.clone())
        } else {
            None
        };

        Ok(SolveReport {
            outcome,
            output_path: self.output_path.clone(),
            report_path,
            elapsed,
        })
    }

    fn run_with_sink<S: SolutionSink>(&self, engine: &SearchEngine, mut sink: S) -> Result<SearchOutcome> {
        let outcome = engine
            .run(self.board_size, &mut sink)
            .with_context(|| format!("Search failed for board size {}", self.board_size))?;

        if outcome.is_unsolvable() {
            write_no_solution(&self.output_path)?;
            return Ok(outcome);
        }

        let finalized = sink.finalize().context("Failed to finalize solution records")?;
        if finalized.total != outcome.solutions {
            anyhow::bail!(
                "Sink recorded {} solutions but the search counted {}",
                finalized.total,
                outcome.solutions
            );
        }

        // Solvable outcomes always come from a size in 1..=64
        write_summary(&self.output_path, self.board_size as u32, outcome.solutions, finalized.records)?;

        Ok(outcome)
    }

    fn run_report(&self, outcome: &SearchOutcome, elapsed: Duration) -> RunReport {
        RunReport {
            board_size: outcome.board_size,
            status: outcome.status,
            total_solutions: outcome.solutions,
            nodes: outcome.nodes,
            used_symmetry: outcome.used_symmetry,
            symmetry_threshold: self.settings.search.symmetry_threshold,
            solution_cap: self.settings.search.solution_cap,
            count_only: self.settings.output.count_only,
            search_ms: outcome.elapsed.as_millis() as u64,
            elapsed_ms: elapsed.as_millis() as u64,
            summary_file: self.output_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SolutionValidator;
    use tempfile::tempdir;

    fn settings_for(dir: &Path, size: i64) -> Settings {
        let input = dir.join(format!("n{}.txt", size));
        std::fs::write(&input, format!("{}\n", size)).unwrap();

        let mut settings = Settings::default();
        settings.input.input_file = input;
        settings
    }

    #[test]
    fn test_solve_writes_summary_next_to_input() {
        let temp_dir = tempdir().unwrap();
        let problem = QueensProblem::new(settings_for(temp_dir.path(), 4)).unwrap();
        let report = problem.solve().unwrap();

        assert_eq!(report.output_path, temp_dir.path().join("n4_output.txt"));
        assert_eq!(report.outcome.solutions, 2);

        let content = std::fs::read_to_string(&report.output_path).unwrap();
        assert_eq!(content, "4\n2\n2 4 1 3\n3 1 4 2\n");
    }

    #[test]
    fn test_single_queen_summary() {
        let temp_dir = tempdir().unwrap();
        let report = QueensProblem::new(settings_for(temp_dir.path(), 1)).unwrap().solve().unwrap();
        let content = std::fs::read_to_string(&report.output_path).unwrap();
        assert_eq!(content, "1\n1\n1\n");
    }

    #[test]
    fn test_unsolvable_summary() {
        let temp_dir = tempdir().unwrap();
        let report = QueensProblem::new(settings_for(temp_dir.path(), 3)).unwrap().solve().unwrap();
        assert!(report.outcome.is_unsolvable());
        assert_eq!(std::fs::read_to_string(&report.output_path).unwrap(), "No Solution");
    }

    #[test]
    fn test_invalid_size_fails_without_output() {
        let temp_dir = tempdir().unwrap();
        let problem = QueensProblem::new(settings_for(temp_dir.path(), 0)).unwrap();
        assert!(problem.solve().is_err());
        assert!(!problem.output_path().exists());
    }

    #[test]
    fn test_unparseable_input() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("bad.txt");
        std::fs::write(&input, "queens").unwrap();

        let mut settings = Settings::default();
        settings.input.input_file = input;
        assert!(QueensProblem::new(settings).is_err());
    }

    #[test]
    fn test_eight_queens_summary_validates() {
        let temp_dir = tempdir().unwrap();
        let mut settings = settings_for(temp_dir.path(), 8);
        settings.output.buffer_capacity = 100;
        let report = QueensProblem::new(settings).unwrap().solve().unwrap();

        let validation = SolutionValidator::validate_file(&report.output_path).unwrap();
        assert!(validation.is_valid);
        assert_eq!(validation.records_found, 92);
    }

    #[test]
    fn test_count_only_with_report() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.output.count_only = true;
        settings.output.write_report = true;
        settings.output.output_directory = temp_dir.path().to_path_buf();

        let problem = QueensProblem::with_board_size(settings, 8);
        let report = problem.solve().unwrap();

        assert_eq!(report.output_path, temp_dir.path().join("n8_output.txt"));
        assert_eq!(std::fs::read_to_string(&report.output_path).unwrap(), "8\n92\n");

        let report_path = report.report_path.unwrap();
        assert_eq!(report_path, temp_dir.path().join("n8_report.json"));
        assert!(report.elapsed >= report.outcome.elapsed);
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(report_path).unwrap()).unwrap();
        assert_eq!(json["total_solutions"], 92);
        assert_eq!(json["status"], "exhausted");
        assert_eq!(json["used_symmetry"], true);
    }

    #[test]
    fn test_explicit_output_file() {
        let temp_dir = tempdir().unwrap();
        let mut settings = settings_for(temp_dir.path(), 6);
        let target = temp_dir.path().join("results/six.txt");
        settings.output.output_file = Some(target.clone());

        let report = QueensProblem::new(settings).unwrap().solve().unwrap();
        assert_eq!(report.output_path, target);
        assert!(std::fs::read_to_string(target).unwrap().starts_with("6\n4\n"));
    }

    #[test]
    fn test_report_named_after_input_stem() {
        let temp_dir = tempdir().unwrap();
        let mut settings = settings_for(temp_dir.path(), 4);
        settings.output.write_report = true;

        let report = QueensProblem::new(settings).unwrap().solve().unwrap();
        assert_eq!(report.report_path, Some(temp_dir.path().join("n4_report.json")));

        let summary = std::fs::read_to_string(&report.output_path).unwrap();
        assert!(summary.starts_with("4\n2\n"));
    }

    #[test]
    fn test_json_output_file_keeps_summary() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.output.write_report = true;
        settings.output.output_directory = temp_dir.path().to_path_buf();
        settings.output.output_file = Some(temp_dir.path().join("n4.json"));

        let report = QueensProblem::with_board_size(settings, 4).solve().unwrap();
        let report_path = report.report_path.unwrap();
        assert_ne!(report_path, report.output_path);

        let summary = std::fs::read_to_string(&report.output_path).unwrap();
        assert!(summary.starts_with("4\n2\n"));
        assert!(std::fs::read_to_string(report_path).unwrap().contains("\"board_size\": 4"));
    }

    #[test]
    fn test_report_colliding_with_summary_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.output.write_report = true;
        settings.output.output_directory = temp_dir.path().to_path_buf();
        settings.output.output_file = Some(temp_dir.path().join("n4_report.json"));

        let problem = QueensProblem::with_board_size(settings, 4);
        assert!(problem.solve().is_err());
        assert!(!problem.output_path().exists());
    }
}
