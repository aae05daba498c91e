//! Day 2: invalid product IDs
//!
//! The input is one long line of `first-last` ID ranges. An ID is invalid
//! when its decimal digits are a block repeated exactly twice (part 1) or
//! at least twice (part 2); each part sums the invalid IDs in every range.

use anyhow::anyhow;
use aoc_core::{AocParser, ParseError, SolveError, Solver, SolverPlugin};
use log::debug;

pub struct Day2;

inventory::submit! {
    SolverPlugin {
        year: 2025,
        day: 2,
        solver: &Day2,
        tags: &["2025", "ranges"],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    min_id: u64,
    max_id: u64,
}

impl IdRange {
    fn sum_invalid(&self, exactly_two_repeats: bool) -> u64 {
        (self.min_id..=self.max_id)
            .filter(|&id| is_invalid_id(id, exactly_two_repeats))
            .inspect(|id| debug!("invalid id {} in {}-{}", id, self.min_id, self.max_id))
            .sum()
    }
}

/// An ID is invalid when its digit string is some block repeated twice
/// (`exactly_two_repeats`) or any number of times at least twice.
fn is_invalid_id(id: u64, exactly_two_repeats: bool) -> bool {
    let digits = id.to_string();
    let len = digits.len();
    let block_lens: Vec<usize> = if exactly_two_repeats {
        if len % 2 != 0 {
            return false;
        }
        vec![len / 2]
    } else {
        (1..len).filter(|d| len % d == 0).collect()
    };
    block_lens.into_iter().any(|d| {
        let block = &digits[..d];
        digits.as_bytes().chunks(d).all(|chunk| chunk == block.as_bytes())
    })
}

impl AocParser for Day2 {
    type SharedData<'a> = Vec<IdRange>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|range| -> Result<IdRange, anyhow::Error> {
                let (min_id, max_id) = range
                    .split_once('-')
                    .ok_or_else(|| anyhow!("range {:?} missing `-`", range))?;
                let min_id = min_id.trim().parse()?;
                let max_id = max_id.trim().parse()?;
                if min_id > max_id {
                    return Err(anyhow!("range {:?} is reversed", range));
                }
                Ok(IdRange { min_id, max_id })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl Solver for Day2 {
    const PARTS: u8 = 2;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        let exactly_two = match part {
            1 => true,
            2 => false,
            p => return Err(SolveError::PartNotImplemented(p)),
        };
        let total: u64 = shared
            .iter()
            .map(|range| range.sum_invalid(exactly_two))
            .sum();
        Ok(total.to_string())
    }
}
