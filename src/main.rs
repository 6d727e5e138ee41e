//! Main CLI application for the N-Queens solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use n_queens::{
    board::{create_example_inputs, read_solutions, SolutionValidator},
    config::{CliOverrides, Settings, UnsolvablePolicy},
    utils::{ColorOutput, SolutionFormatter},
    QueensProblem,
};
use std::path::PathBuf;

/// Largest board drawn by `--show`
const MAX_SHOWN_BOARD: i64 = 16;

#[derive(Parser)]
#[command(name = "n_queens")]
#[command(about = "N-Queens solver with symmetry reduction")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate solutions for a board
    Solve {
        /// Input file whose first token is the board size (overrides config)
        input: Option<PathBuf>,

        /// Board size given directly instead of an input file
        #[arg(short, long, allow_negative_numbers = true, conflicts_with = "input")]
        size: Option<i64>,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Summary file (default: derived from the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum solutions for boards on the plain search path
        #[arg(long, conflicts_with = "no_cap")]
        cap: Option<u64>,

        /// Disable the solution cap
        #[arg(long)]
        no_cap: bool,

        /// Boards smaller than this use symmetry reduction
        #[arg(long)]
        symmetry_threshold: Option<u32>,

        /// Which board sizes are reported as having no solution
        #[arg(long, value_enum)]
        policy: Option<UnsolvablePolicy>,

        /// Count solutions without writing records
        #[arg(long)]
        count_only: bool,

        /// Also write a JSON run report next to the summary
        #[arg(long)]
        report: bool,

        /// Draw the first few solutions
        #[arg(long)]
        show: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check every record in a summary file
    Validate {
        /// Summary file written by `solve`
        summary: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            input, size, config, output, cap, no_cap, symmetry_threshold,
            policy, count_only, report, show, verbose
        } => {
            let overrides = CliOverrides {
                input_file: input,
                output_file: output,
                solution_cap: cap,
                no_cap,
                symmetry_threshold,
                unsolvable_policy: policy,
                count_only,
                write_report: report,
            };
            solve_command(config, size, overrides, show, verbose)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
        Commands::Validate { summary } => {
            validate_command(summary)
        }
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    size: Option<i64>,
    overrides: CliOverrides,
    show: bool,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate()
        .context("Configuration validation failed")?;

    let problem = match size {
        Some(size) => QueensProblem::with_board_size(settings, size),
        None => QueensProblem::new(settings)
            .context("Failed to create N-Queens problem")?,
    };

    if verbose {
        let settings = problem.settings();
        println!("Configuration:");
        println!("  Board size: {}", problem.board_size());
        println!("  Symmetry threshold: {}", settings.search.symmetry_threshold);
        match settings.search.solution_cap {
            Some(cap) => println!("  Solution cap: {}", cap),
            None => println!("  Solution cap: none"),
        }
        println!("  Unsolvable policy: {:?}", settings.search.unsolvable_policy);
        println!("  Output file: {}", problem.output_path().display());
        println!();
    }

    println!("{}", ColorOutput::info(&format!(
        "♛ Solving {}-Queens...", problem.board_size()
    )));
    let report = problem.solve()
        .context("Failed to solve N-Queens problem")?;
    let outcome = &report.outcome;

    if outcome.is_unsolvable() {
        println!("{}", ColorOutput::warning("No Solution"));
        return Ok(());
    }

    print!("{}", SolutionFormatter::format_outcome(outcome, report.elapsed));

    if outcome.was_capped() {
        println!("{}", ColorOutput::warning(
            "Search stopped at the solution cap; the true count may be larger"
        ));
    }

    if verbose {
        println!("\n{}", SolutionFormatter::format_statistics(outcome));
    }

    if show && !problem.settings().output.count_only && outcome.board_size <= MAX_SHOWN_BOARD {
        let solutions = read_solutions(&report.output_path, 3)?;
        for (i, solution) in solutions.iter().enumerate() {
            println!("\n{}", ColorOutput::info(&format!("Solution {}: {}", i + 1, solution)));
            print!("{}", SolutionFormatter::format_board(solution));
        }
    }

    println!("\n{}", ColorOutput::success(&format!(
        "Summary saved to {}", report.output_path.display()
    )));
    if let Some(report_path) = &report.report_path {
        println!("{}", ColorOutput::success(&format!(
            "Report saved to {}", report_path.display()
        )));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/boards");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_inputs(&input_dir)
        .context("Failed to create example inputs")?;
    println!("Created example boards in: {}", input_dir.display());

    // Uncapped variant for exhaustive runs on large boards
    let examples_dir = config_dir.join("examples");
    let mut exhaustive = Settings::default();
    exhaustive.search.solution_cap = None;
    exhaustive.output.count_only = true;
    exhaustive.to_file(&examples_dir.join("exhaustive.yaml"))?;
    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- solve {}", input_dir.join("n8.txt").display());

    Ok(())
}

fn validate_command(summary_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating summary..."));

    let result = SolutionValidator::validate_file(&summary_path)
        .with_context(|| format!("Failed to validate {}", summary_path.display()))?;

    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("✅ Summary is valid!"));
        Ok(())
    } else {
        println!("{}", ColorOutput::error("❌ Summary is invalid"));
        anyhow::bail!("{} failed validation", summary_path.display())
    }
}
