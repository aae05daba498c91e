//! Incremental connectivity over junction boxes in 3-D space
//!
//! [`CircuitTracker`] repeatedly connects the closest pair of boxes not yet
//! directly connected and keeps the resulting partition into circuits
//! (connected components) up to date after every connection.
//!
//! Candidate pairs live in a min-heap keyed by squared Euclidean distance;
//! integer coordinates make squared distance an exact ordering key, so no
//! floating point is involved anywhere. Connecting two boxes already in the
//! same circuit is legal and leaves the partition unchanged.

use crate::utils::disjoint_set::DisjointSet;
use itertools::Itertools;
use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use thiserror::Error;

/// Asked to connect another pair when every pair is already directly connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no unconnected pair of junction boxes remains")]
pub struct ExhaustedError;

/// A junction box: an identifier plus a position in 3-D integer space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JunctionBox {
    pub id: usize,
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl JunctionBox {
    pub fn new(id: usize, x: i64, y: i64, z: i64) -> Self {
        Self { id, x, y, z }
    }

    /// Squared Euclidean distance; orders pairs identically to the real
    /// distance over integer coordinates.
    pub fn squared_distance(&self, other: &JunctionBox) -> i64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// Tracks circuits formed by connecting closest pairs of junction boxes.
///
/// # Example
///
/// ```
/// use aoc_solutions::utils::circuit::{CircuitTracker, JunctionBox};
///
/// let boxes = vec![
///     JunctionBox::new(0, 0, 0, 0),
///     JunctionBox::new(1, 1, 0, 0),
///     JunctionBox::new(2, 10, 0, 0),
/// ];
/// let mut tracker = CircuitTracker::new(boxes);
/// let (a, b) = tracker.connect_closest_pair().unwrap();
/// assert_eq!((a.id, b.id), (0, 1));
/// assert_eq!(tracker.circuit_sizes(None), vec![2, 1]);
/// assert!(!tracker.is_fully_connected());
/// ```
pub struct CircuitTracker {
    boxes: Vec<JunctionBox>,
    // Min-heap of (d², low index, high index) over pairs not yet directly
    // connected. The index pair doubles as the deterministic tie-break.
    candidates: BinaryHeap<Reverse<(i64, usize, usize)>>,
    circuits: DisjointSet,
    connections_made: usize,
}

impl CircuitTracker {
    /// Every box starts as its own singleton circuit; no connections exist.
    pub fn new(boxes: Vec<JunctionBox>) -> Self {
        let candidates = boxes
            .iter()
            .enumerate()
            .tuple_combinations()
            .map(|((i, a), (j, b))| Reverse((a.squared_distance(b), i, j)))
            .collect();
        let circuits = DisjointSet::new(boxes.len());
        Self {
            boxes,
            candidates,
            circuits,
            connections_made: 0,
        }
    }

    /// Connect the closest pair of boxes not yet directly connected.
    ///
    /// Ties are broken by the lower `(low id, high id)` pair. Connecting two
    /// boxes already in the same circuit still consumes the connection; the
    /// partition is simply unchanged.
    pub fn connect_closest_pair(&mut self) -> Result<(JunctionBox, JunctionBox), ExhaustedError> {
        let Reverse((d2, i, j)) = self.candidates.pop().ok_or(ExhaustedError)?;
        let merged = self.circuits.union(i, j);
        self.connections_made += 1;
        debug!(
            "connection {}: boxes {} and {} (d\u{b2}={}), {}",
            self.connections_made,
            i,
            j,
            d2,
            if merged { "circuits merged" } else { "already in the same circuit" },
        );
        Ok((self.boxes[i], self.boxes[j]))
    }

    /// Sizes of all current circuits, largest first, truncated to `top_n`
    /// when given.
    pub fn circuit_sizes(&mut self, top_n: Option<usize>) -> Vec<usize> {
        let mut sizes = self.circuits.set_sizes();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        if let Some(n) = top_n {
            sizes.truncate(n);
        }
        sizes
    }

    /// True iff exactly one circuit remains.
    pub fn is_fully_connected(&self) -> bool {
        self.circuits.set_count() <= 1
    }

    /// Number of circuits currently present.
    pub fn circuit_count(&self) -> usize {
        self.circuits.set_count()
    }

    /// Number of connections issued so far, no-ops included.
    pub fn connections_made(&self) -> usize {
        self.connections_made
    }

    pub fn boxes(&self) -> &[JunctionBox] {
        &self.boxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The 20 junction boxes from the day-8 worked example.
    fn example_boxes() -> Vec<JunctionBox> {
        const COORDS: [(i64, i64, i64); 20] = [
            (162, 817, 812),
            (57, 618, 57),
            (906, 360, 560),
            (592, 479, 940),
            (352, 342, 300),
            (466, 668, 158),
            (542, 29, 236),
            (431, 825, 988),
            (739, 650, 466),
            (52, 470, 668),
            (216, 146, 977),
            (819, 987, 18),
            (117, 168, 530),
            (805, 96, 715),
            (346, 949, 466),
            (970, 615, 88),
            (941, 993, 340),
            (862, 61, 35),
            (984, 92, 344),
            (425, 690, 689),
        ];
        COORDS
            .iter()
            .enumerate()
            .map(|(id, &(x, y, z))| JunctionBox::new(id, x, y, z))
            .collect()
    }

    #[test]
    fn picks_globally_closest_pair() {
        // Distances known by construction: (0,1) at 1, (1,2) at 4, (0,2) at 9.
        let boxes = vec![
            JunctionBox::new(0, 0, 0, 0),
            JunctionBox::new(1, 0, 1, 0),
            JunctionBox::new(2, 0, 3, 0),
            JunctionBox::new(3, 100, 0, 0),
        ];
        let mut tracker = CircuitTracker::new(boxes);
        let (a, b) = tracker.connect_closest_pair().unwrap();
        assert_eq!((a.id, b.id), (0, 1));
        let (a, b) = tracker.connect_closest_pair().unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        let (a, b) = tracker.connect_closest_pair().unwrap();
        assert_eq!((a.id, b.id), (0, 2));
    }

    #[test]
    fn example_first_connection() {
        let mut tracker = CircuitTracker::new(example_boxes());
        let (a, b) = tracker.connect_closest_pair().unwrap();
        // 162,817,812 and 425,690,689 are the closest pair in the example.
        assert_eq!((a.id, b.id), (0, 19));
    }

    #[test]
    fn example_sizes_after_ten_connections() {
        let mut tracker = CircuitTracker::new(example_boxes());
        for _ in 0..10 {
            tracker.connect_closest_pair().unwrap();
        }
        assert_eq!(
            tracker.circuit_sizes(None),
            vec![5, 4, 2, 2, 1, 1, 1, 1, 1, 1, 1]
        );
        let top = tracker.circuit_sizes(Some(3));
        assert_eq!(top.iter().product::<usize>(), 40);
    }

    #[test]
    fn example_final_merging_connection() {
        let mut tracker = CircuitTracker::new(example_boxes());
        let mut last = None;
        while !tracker.is_fully_connected() {
            last = Some(tracker.connect_closest_pair().unwrap());
        }
        let (a, b) = last.unwrap();
        // 216,146,977 and 117,168,530 close the single circuit.
        assert_eq!(a.x * b.x, 25272);
    }

    #[test]
    fn circuit_count_monotonic_and_terminates() {
        let boxes = example_boxes();
        let n = boxes.len();
        let mut tracker = CircuitTracker::new(boxes);
        let mut merges = 0;
        while !tracker.is_fully_connected() {
            let before = tracker.circuit_count();
            tracker.connect_closest_pair().unwrap();
            let after = tracker.circuit_count();
            assert!(after == before || after == before - 1);
            if after == before - 1 {
                merges += 1;
            }
        }
        // Exactly n-1 merging connections; no-ops only add extra calls.
        assert_eq!(merges, n - 1);
    }

    #[test]
    fn queries_are_idempotent() {
        let mut tracker = CircuitTracker::new(example_boxes());
        for _ in 0..5 {
            tracker.connect_closest_pair().unwrap();
        }
        let first = tracker.circuit_sizes(None);
        let second = tracker.circuit_sizes(None);
        assert_eq!(first, second);
    }

    #[test]
    fn exhausting_all_pairs_errors() {
        let boxes = vec![
            JunctionBox::new(0, 0, 0, 0),
            JunctionBox::new(1, 1, 1, 1),
        ];
        let mut tracker = CircuitTracker::new(boxes);
        assert!(tracker.connect_closest_pair().is_ok());
        assert_eq!(tracker.connect_closest_pair(), Err(ExhaustedError));
        assert!(tracker.is_fully_connected());
    }

    #[test]
    fn empty_and_singleton_are_fully_connected() {
        let mut empty = CircuitTracker::new(Vec::new());
        assert!(empty.is_fully_connected());
        assert_eq!(empty.connect_closest_pair(), Err(ExhaustedError));

        let one = CircuitTracker::new(vec![JunctionBox::new(0, 1, 2, 3)]);
        assert!(one.is_fully_connected());
    }
}
