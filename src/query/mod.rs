//! Read-only views over the location store

use itertools::Itertools;
use serde::{Serialize, Deserialize};

use crate::graph::{CampusGraph, Location, LocationId, Weight};

/// Ordering for a location listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    /// Popularity, highest first
    Popularity,
    /// Id, lowest first
    Id,
}

/// Flat listing row for a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRow {
    pub id: LocationId,
    pub name: String,
    pub popularity: i32,
    pub info: String,
}

impl From<&Location> for LocationRow {
    fn from(loc: &Location) -> Self {
        Self {
            id: loc.id,
            name: loc.name.clone(),
            popularity: loc.popularity,
            info: loc.info.clone(),
        }
    }
}

/// Flat listing row for an undirected path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub from: LocationId,
    pub to: LocationId,
    pub weight: Weight,
}

/// Snapshot sorted by popularity, descending. Ties keep insertion order.
pub fn sorted_by_popularity(graph: &CampusGraph) -> Vec<&Location> {
    graph
        .locations()
        .iter()
        .sorted_by(|a, b| b.popularity.cmp(&a.popularity))
        .collect()
}

/// Snapshot sorted by id, ascending
pub fn sorted_by_id(graph: &CampusGraph) -> Vec<&Location> {
    graph.locations().iter().sorted_by_key(|l| l.id).collect()
}

pub fn sorted(graph: &CampusGraph, key: SortKey) -> Vec<&Location> {
    match key {
        SortKey::Popularity => sorted_by_popularity(graph),
        SortKey::Id => sorted_by_id(graph),
    }
}

/// Locations whose name starts with `prefix` (case-sensitive), in store order
pub fn search_prefix<'a>(graph: &'a CampusGraph, prefix: &str) -> Vec<&'a Location> {
    graph
        .locations()
        .iter()
        .filter(|l| l.name.starts_with(prefix))
        .collect()
}

/// Every location as a listing row, in store order
pub fn location_rows(graph: &CampusGraph) -> Vec<LocationRow> {
    graph.locations().iter().map(LocationRow::from).collect()
}

/// Every undirected path once, taken from the half-edge whose origin id is
/// lower than its destination id. Parallel pairs show up once per pair.
pub fn edge_rows(graph: &CampusGraph) -> Vec<EdgeRow> {
    graph
        .locations()
        .iter()
        .flat_map(|origin| {
            origin
                .edges
                .iter()
                .filter(move |e| origin.id < e.destination)
                .map(move |e| EdgeRow {
                    from: origin.id,
                    to: e.destination,
                    weight: e.weight,
                })
        })
        .collect()
}
