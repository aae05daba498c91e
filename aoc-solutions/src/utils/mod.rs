//! Shared algorithmic utilities for puzzle solutions

pub mod circuit;
pub mod device_graph;
pub mod disjoint_set;
