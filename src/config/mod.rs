//! Configuration management for the N-Queens solver

pub mod settings;

pub use settings::{
    Settings, SearchConfig, InputConfig, OutputConfig, UnsolvablePolicy, CliOverrides,
    MAX_BOARD_SIZE,
};
