//! Campus navigation: a weighted location graph with shortest-path queries,
//! prefix search, sorted listings and a line-based map format

pub mod config;
pub mod error;
pub mod data;
pub mod graph;
pub mod query;
pub mod storage;

pub use anyhow::{Result, anyhow};
pub use config::Config;
pub use error::CampusError;
pub use graph::{CampusGraph, Location, LocationId, Route, Weight};
