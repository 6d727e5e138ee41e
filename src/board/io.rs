//! File I/O for board-size inputs and solution summaries

use super::Solution;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Contents of the summary file for a board with no solution
pub const NO_SOLUTION: &str = "No Solution";

/// Read the board size from an input file.
/// Format: the first whitespace-separated token is the size; anything after it is ignored
pub fn read_board_size<P: AsRef<Path>>(path: P) -> Result<i64> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read input file: {}", path.as_ref().display()))?;

    parse_board_size(&content)
        .with_context(|| format!("Invalid input file: {}", path.as_ref().display()))
}

/// Parse a board size from the text of an input file
pub fn parse_board_size(content: &str) -> Result<i64> {
    let token = content
        .split_whitespace()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Input is empty, expected a board size"))?;

    token
        .parse::<i64>()
        .with_context(|| format!("'{}' is not an integer board size", token))
}

/// `boards/n8.txt` -> `boards/n8_output.txt`
pub fn derive_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    input.with_file_name(format!("{}_output.txt", stem))
}

/// `boards/n8.txt` -> `boards/n8_report.json`
pub fn derive_report_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    input.with_file_name(format!("{}_report.json", stem))
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Write the summary: board size, solution count, then every record copied from `records`
pub fn write_summary<P: AsRef<Path>, R: Read>(
    path: P,
    board_size: u32,
    total_solutions: u64,
    mut records: R,
) -> Result<()> {
    let path = path.as_ref();
    create_parent_dir(path)?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", board_size)?;
    writeln!(writer, "{}", total_solutions)?;
    std::io::copy(&mut records, &mut writer)
        .with_context(|| format!("Failed to copy solution records to {}", path.display()))?;
    writer.flush()
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    Ok(())
}

/// Write the summary for a board with no solution
pub fn write_no_solution<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    create_parent_dir(path)?;

    std::fs::write(path, NO_SOLUTION)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    Ok(())
}

/// Write any serializable report as pretty JSON
pub fn write_json_report<P: AsRef<Path>, T: Serialize>(path: P, report: &T) -> Result<()> {
    let path = path.as_ref();
    create_parent_dir(path)?;

    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    Ok(())
}

/// Read up to `limit` solutions from a summary file, skipping the two header lines
pub fn read_solutions<P: AsRef<Path>>(path: P, limit: usize) -> Result<Vec<Solution>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open summary: {}", path.as_ref().display()))?;

    let mut solutions = Vec::new();
    for line in BufReader::new(file).lines().skip(2).take(limit) {
        let line = line.context("Failed to read summary line")?;
        match Solution::parse_record(&line) {
            Some(solution) => solutions.push(solution),
            None => anyhow::bail!("Malformed solution record: '{}'", line),
        }
    }

    Ok(solutions)
}

/// Create example input files
pub fn create_example_inputs<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for size in [1, 3, 4, 8, 12] {
        let name = format!("n{}.txt", size);
        std::fs::write(dir.join(&name), format!("{}\n", size))
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
