//! Day 8: junction-box circuits
//!
//! Connect the closest pairs of junction boxes in 3-D space and watch the
//! circuits grow. Part 1 multiplies the three largest circuit sizes after
//! the first batch of connections; part 2 keeps connecting until a single
//! circuit remains and multiplies the X coordinates of the final pair.

use crate::utils::circuit::{CircuitTracker, ExhaustedError, JunctionBox};
use anyhow::anyhow;
use aoc_core::{AocParser, ParseError, SolveError, Solver, SolverPlugin};
use log::debug;

pub struct Day8;

inventory::submit! {
    SolverPlugin {
        year: 2025,
        day: 8,
        solver: &Day8,
        tags: &["2025", "graph", "union-find"],
    }
}

/// Connections to make for part 1: the worked example (20 boxes) uses 10,
/// full-size inputs use 1000.
fn part1_connections(box_count: usize) -> usize {
    if box_count <= 20 { 10 } else { 1000 }
}

pub struct SharedData {
    boxes: Vec<JunctionBox>,
    common: Option<CommonResult>,
}

struct CommonResult {
    top_circuit_product: usize,
    last_pair_x_product: i64,
}

impl AocParser for Day8 {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(id, line)| -> Result<JunctionBox, anyhow::Error> {
                let coords = line
                    .trim()
                    .split(',')
                    .map(|c| {
                        c.parse::<i64>()
                            .map_err(|e| anyhow!("(line {}) bad coordinate {:?}: {}", id + 1, c, e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                match coords[..] {
                    [x, y, z] => Ok(JunctionBox::new(id, x, y, z)),
                    _ => Err(anyhow!(
                        "(line {}) expected x,y,z, got {} coordinates",
                        id + 1,
                        coords.len()
                    )),
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|boxes| SharedData {
                boxes,
                common: None,
            })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl Solver for Day8 {
    const PARTS: u8 = 2;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        let common = solve_once_for_both(shared)?;
        match part {
            1 => Ok(common.top_circuit_product.to_string()),
            2 => Ok(common.last_pair_x_product.to_string()),
            p => Err(SolveError::PartNotImplemented(p)),
        }
    }
}

/// Run the connection process once: snapshot the circuit sizes after the
/// part-1 quota, keep going until the boxes form a single circuit.
fn solve_once_for_both(shared: &mut SharedData) -> Result<&CommonResult, SolveError> {
    if shared.common.is_none() {
        let quota = part1_connections(shared.boxes.len());
        let mut tracker = CircuitTracker::new(shared.boxes.clone());

        let mut top_circuit_product = None;
        let mut last_pair = None;
        while !(tracker.is_fully_connected() && tracker.connections_made() >= quota) {
            let needed = !tracker.is_fully_connected();
            let (a, b) = tracker.connect_closest_pair().map_err(SolveError::failed)?;
            if needed {
                last_pair = Some((a, b));
            }
            if tracker.connections_made() == quota {
                let top = tracker.circuit_sizes(Some(3));
                debug!("circuits after {} connections: {:?}", quota, top);
                top_circuit_product = Some(top.iter().product());
            }
        }

        let (a, b) = last_pair.ok_or_else(|| {
            SolveError::failed(ExhaustedError)
        })?;
        debug!("final merging connection: {:?} and {:?}", a, b);
        shared.common = Some(CommonResult {
            // The quota is always reached before the loop exits.
            top_circuit_product: top_circuit_product.unwrap_or(0),
            last_pair_x_product: a.x * b.x,
        });
    }
    Ok(shared.common.as_ref().unwrap())
}
