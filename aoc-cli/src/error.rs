//! Error types for the CLI

use aoc_core::{RegistrationError, SolveError, SolverError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("input file not found: {0} (use --input or place the file under the inputs directory)")]
    InputMissing(PathBuf),
    #[error("failed to read {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("--input requires both --year and --day")]
    InputNeedsYearDay,
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("no solvers found matching the specified filters")]
    NoSolversMatched,
}
