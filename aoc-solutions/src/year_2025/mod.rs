//! Solutions for Advent of Code 2025

pub mod day_2;
pub mod day_4;
pub mod day_8;
pub mod day_11;
