//! Advent of Code solver framework
//!
//! Each puzzle is a type implementing [`AocParser`] (how to turn the raw
//! input into shared data) and [`Solver`] (how to answer each part from that
//! data). Solvers announce themselves through the [`SolverPlugin`] inventory
//! so a binary can collect every linked solution without a hand-maintained
//! match over days.
//!
//! # Example
//!
//! ```
//! use aoc_core::{AocParser, ParseError, RegistryBuilder, SolveError, Solver, SolverPlugin};
//!
//! struct Day1;
//!
//! impl AocParser for Day1 {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| {
//!                 l.parse()
//!                     .map_err(|_| ParseError::InvalidFormat("expected integer".into()))
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl Solver for Day1 {
//!     const PARTS: u8 = 1;
//!
//!     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
//!         match part {
//!             1 => Ok(shared.iter().sum::<i64>().to_string()),
//!             p => Err(SolveError::PartNotImplemented(p)),
//!         }
//!     }
//! }
//!
//! inventory::submit! {
//!     SolverPlugin { year: 2025, day: 1, solver: &Day1, tags: &["example"] }
//! }
//!
//! let registry = RegistryBuilder::new().register_all_plugins().unwrap().build();
//! let mut solver = registry.create_solver(2025, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveOutcome, SolverInstance};
pub use registry::{
    RegisterableSolver, RegistryBuilder, SolverInfo, SolverPlugin, SolverRegistry,
};
pub use solver::{AocParser, Solver, SolverExt};

// Re-export inventory so solution crates can `inventory::submit!` plugins
// without depending on it directly.
pub use inventory;
