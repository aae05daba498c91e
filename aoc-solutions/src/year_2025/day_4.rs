//! Day 4: paper rolls and forklifts
//!
//! A grid of paper rolls (`@`). A roll is accessible when fewer than four
//! of its eight neighbors are rolls. Part 1 counts accessible rolls; part 2
//! removes accessible rolls and rescans until nothing more can be removed.

use anyhow::anyhow;
use aoc_core::{AocParser, ParseError, SolveError, Solver, SolverPlugin};
use log::debug;

pub struct Day4;

inventory::submit! {
    SolverPlugin {
        year: 2025,
        day: 4,
        solver: &Day4,
        tags: &["2025", "grid"],
    }
}

const ACCESS_THRESHOLD: usize = 4;

#[derive(Debug, Clone)]
pub struct PaperGrid {
    cells: Vec<bool>,
    rows: usize,
    cols: usize,
}

impl PaperGrid {
    fn is_roll(&self, row: isize, col: isize) -> bool {
        if row < 0 || row >= self.rows as isize || col < 0 || col >= self.cols as isize {
            return false;
        }
        self.cells[row as usize * self.cols + col as usize]
    }

    fn neighbor_rolls(&self, row: usize, col: usize) -> usize {
        let mut count = 0;
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if (dr, dc) != (0, 0) && self.is_roll(row as isize + dr, col as isize + dc) {
                    count += 1;
                }
            }
        }
        count
    }

    fn accessible(&self, row: usize, col: usize) -> bool {
        self.is_roll(row as isize, col as isize)
            && self.neighbor_rolls(row, col) < ACCESS_THRESHOLD
    }

    fn accessible_rolls(&self) -> Vec<(usize, usize)> {
        (0..self.rows)
            .flat_map(|r| (0..self.cols).map(move |c| (r, c)))
            .filter(|&(r, c)| self.accessible(r, c))
            .collect()
    }

    fn remove(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] = false;
    }
}

impl AocParser for Day4 {
    type SharedData<'a> = PaperGrid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = input.trim().lines().map(str::trim).collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.len());
        if rows == 0 || cols == 0 {
            return Err(ParseError::MissingData("empty grid".to_string()));
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in lines.iter().enumerate() {
            if line.len() != cols {
                return Err(ParseError::InvalidFormat(
                    anyhow!("(line {}) ragged row: {} cells, expected {}", row + 1, line.len(), cols)
                        .to_string(),
                ));
            }
            for ch in line.chars() {
                match ch {
                    '@' => cells.push(true),
                    '.' => cells.push(false),
                    other => {
                        return Err(ParseError::InvalidFormat(
                            anyhow!("(line {}) unexpected cell {:?}", row + 1, other).to_string(),
                        ));
                    }
                }
            }
        }
        Ok(PaperGrid { cells, rows, cols })
    }
}

impl Solver for Day4 {
    const PARTS: u8 = 2;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        match part {
            1 => Ok(shared.accessible_rolls().len().to_string()),
            2 => {
                // Work on a copy so part 1 still sees the original grid.
                let mut grid = shared.clone();
                let mut removed = 0;
                loop {
                    let batch = grid.accessible_rolls();
                    if batch.is_empty() {
                        break;
                    }
                    debug!("removing {} rolls", batch.len());
                    removed += batch.len();
                    for (r, c) in batch {
                        grid.remove(r, c);
                    }
                }
                Ok(removed.to_string())
            }
            p => Err(SolveError::PartNotImplemented(p)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.";

    #[test]
    fn part_1_example() {
        let mut shared = Day4::parse(EXAMPLE).unwrap();
        assert_eq!(Day4::solve_part(&mut shared, 1).unwrap(), "13");
    }

    #[test]
    fn part_2_example() {
        let mut shared = Day4::parse(EXAMPLE).unwrap();
        assert_eq!(Day4::solve_part(&mut shared, 2).unwrap(), "43");
    }

    #[test]
    fn part_order_does_not_matter() {
        let mut shared = Day4::parse(EXAMPLE).unwrap();
        assert_eq!(Day4::solve_part(&mut shared, 2).unwrap(), "43");
        assert_eq!(Day4::solve_part(&mut shared, 1).unwrap(), "13");
    }

    #[test]
    fn ragged_grid_rejected() {
        assert!(Day4::parse("@@.\n@@").is_err());
        assert!(Day4::parse("@x@").is_err());
    }
}
