//! N-Queens search engine and solution sinks

pub mod error;
pub mod sink;
pub mod engine;
pub mod problem;

pub use error::SearchError;
pub use sink::{SolutionSink, Finalized, BufferedFileSink, MemorySink, CountingSink};
pub use engine::{SearchEngine, SearchOutcome, SearchStatus};
pub use problem::{QueensProblem, SolveReport, RunReport};
