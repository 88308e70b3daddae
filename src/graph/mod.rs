//! Graph representation and algorithms module

pub mod campus;
pub mod builder;
pub mod algorithms;

pub use campus::{CampusGraph, Edge, Location, LocationId, Weight};
pub use builder::{CampusBuilder, LocationRecord, PathRecord, Record};
pub use algorithms::{dijkstra, route, shortest_path, Route, ShortestPaths};
