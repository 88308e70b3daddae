//! Shortest path search over the campus graph

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use serde::{Serialize, Deserialize};

use crate::error::CampusError;
use crate::graph::{CampusGraph, LocationId, Weight};

/// Distance and predecessor maps produced by a single-source search.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub source: LocationId,

    /// Best known distance per location id, `None` if never reached
    pub distances: HashMap<LocationId, Option<Weight>>,

    /// Predecessor on one shortest path, `None` for the source and unreached ids
    pub predecessors: HashMap<LocationId, Option<LocationId>>,
}

impl ShortestPaths {
    /// Distance to `id`, or `None` when it is unknown or unreachable
    pub fn distance(&self, id: LocationId) -> Option<Weight> {
        self.distances.get(&id).copied().flatten()
    }

    pub fn is_reachable(&self, id: LocationId) -> bool {
        self.distance(id).is_some()
    }

    /// Walk predecessor links back from `target` and return the source→target
    /// sequence. Empty when the target is unknown or unreachable.
    pub fn path_to(&self, target: LocationId) -> Vec<LocationId> {
        if !self.is_reachable(target) {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut current = target;

        loop {
            path.push(current);
            if current == self.source {
                break;
            }
            match self.predecessors.get(&current).copied().flatten() {
                Some(parent) => current = parent,
                None => return Vec::new(),
            }
        }

        path.reverse();
        path
    }
}

/// A resolved shortest route between two known locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: LocationId,
    pub to: LocationId,
    pub distance: Weight,

    /// Location ids from `from` to `to`, both inclusive
    pub stops: Vec<LocationId>,
}

impl Route {
    /// Names of the stops in travel order
    pub fn names<'a>(&self, graph: &'a CampusGraph) -> Vec<&'a str> {
        self.stops
            .iter()
            .filter_map(|&id| graph.location(id))
            .map(|l| l.name.as_str())
            .collect()
    }
}

/// Dijkstra's algorithm from `source` (weights are assumed non-negative).
///
/// Every known location gets an entry in both maps. An unknown source yields
/// all-`None` distances rather than an error. A candidate distance that would
/// overflow `Weight` never relaxes its destination.
pub fn dijkstra(graph: &CampusGraph, source: LocationId) -> ShortestPaths {
    let count = graph.location_count();
    let mut distances: HashMap<LocationId, Option<Weight>> = HashMap::with_capacity(count);
    let mut predecessors: HashMap<LocationId, Option<LocationId>> = HashMap::with_capacity(count);

    for location in graph.locations() {
        distances.insert(location.id, None);
        predecessors.insert(location.id, None);
    }

    if !graph.contains(source) {
        log::debug!("Dijkstra source {} is not in the graph", source);
        return ShortestPaths { source, distances, predecessors };
    }

    distances.insert(source, Some(0));

    let mut heap = BinaryHeap::new();
    heap.push(Reverse((0, source)));
    let mut settled = 0usize;

    while let Some(Reverse((dist, u))) = heap.pop() {
        if distances[&u].map_or(true, |best| dist > best) {
            continue; // Stale entry
        }
        settled += 1;

        for edge in graph.edges(u) {
            let candidate = match dist.checked_add(edge.weight) {
                Some(candidate) => candidate,
                None => continue,
            };
            let best = distances.entry(edge.destination).or_insert(None);
            if best.map_or(true, |b| candidate < b) {
                *best = Some(candidate);
                predecessors.insert(edge.destination, Some(u));
                heap.push(Reverse((candidate, edge.destination)));
            }
        }
    }

    log::debug!("Dijkstra from {} settled {} entries", source, settled);

    ShortestPaths { source, distances, predecessors }
}

/// Shortest path from `source` to `target` as a sequence of ids.
///
/// Unknown ids and unreachable targets both give an empty sequence; use
/// [`route`] to tell them apart.
pub fn shortest_path(graph: &CampusGraph, source: LocationId, target: LocationId) -> Vec<LocationId> {
    dijkstra(graph, source).path_to(target)
}

/// Shortest route between two locations, checking both ids first.
pub fn route(graph: &CampusGraph, from: LocationId, to: LocationId) -> Result<Route, CampusError> {
    for id in [from, to] {
        if !graph.contains(id) {
            return Err(CampusError::UnknownLocation(id));
        }
    }

    let paths = dijkstra(graph, from);
    let distance = paths
        .distance(to)
        .ok_or(CampusError::Unreachable { from, to })?;

    Ok(Route {
        from,
        to,
        distance,
        stops: paths.path_to(to),
    })
}
