//! Board sizes, solutions and their file formats

pub mod size;
pub mod solution;
pub mod io;
pub mod validator;

pub use size::{classify, BoardClass, BoardSize};
pub use solution::Solution;
pub use io::{
    read_board_size, derive_output_path, derive_report_path, write_summary, write_no_solution, read_solutions,
    create_example_inputs,
};
pub use validator::{check_placement, PlacementViolation, SolutionValidator, SummaryValidation};
