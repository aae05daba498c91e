//! Advent of Code puzzle solutions with automatic registration
//!
//! Each solution module implements the `aoc-core` solver traits and submits
//! a `SolverPlugin` so binaries linking this crate discover every day
//! automatically. The algorithmic machinery shared by the harder days lives
//! in [`utils`].

pub mod utils;
pub mod year_2025;
