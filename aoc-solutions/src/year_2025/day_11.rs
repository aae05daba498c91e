//! Day 11: reactor data paths
//!
//! The input lists devices and their outputs, forming a DAG. Part 1 counts
//! every path from `you` to `out`. Part 2 counts the paths from `svr` to
//! `out` that visit both `dac` and `fft`; the graph is wide but pinches
//! into narrow waist layers, so the count runs segment-by-segment between
//! detected waists instead of enumerating paths.

use crate::utils::device_graph::DeviceGraph;
use anyhow::anyhow;
use aoc_core::{AocParser, ParseError, SolveError, Solver, SolverPlugin};
use log::debug;

pub struct Day11;

inventory::submit! {
    SolverPlugin {
        year: 2025,
        day: 11,
        solver: &Day11,
        tags: &["2025", "graph", "paths"],
    }
}

impl AocParser for Day11 {
    type SharedData<'a> = DeviceGraph;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut graph = DeviceGraph::new();
        for (line_idx, line) in input.trim().lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (device, outputs) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("(line {}) expected `device: outputs`", line_idx + 1))
                .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
            for output in outputs.split_whitespace() {
                graph.add_edge(device.trim(), output);
            }
        }
        if graph.is_empty() {
            return Err(ParseError::MissingData("no devices in input".to_string()));
        }
        Ok(graph)
    }
}

impl Solver for Day11 {
    const PARTS: u8 = 2;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        match part {
            1 => {
                let count = shared
                    .count_paths("you", "out")
                    .map_err(SolveError::failed)?;
                Ok(count.to_string())
            }
            2 => {
                let waists = shared
                    .detect_waists("svr", "out")
                    .map_err(SolveError::failed)?;
                debug!("using {} waist layers", waists.len());
                let count = shared
                    .count_constrained_paths("svr", "out", &["dac", "fft"], &waists)
                    .map_err(SolveError::failed)?;
                Ok(count.to_string())
            }
            p => Err(SolveError::PartNotImplemented(p)),
        }
    }
}
