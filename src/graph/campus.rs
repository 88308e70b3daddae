//! Location store, identifier index and weighted adjacency lists

use std::collections::HashMap;
use serde::{Serialize, Deserialize};

use crate::error::CampusError;

/// Externally assigned location identifier.
pub type LocationId = i64;

/// Non-negative edge weight (walking distance).
pub type Weight = u64;

/// One directed half of an undirected path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Id of the location this half-edge leads to
    pub destination: LocationId,

    /// Cost of traversing the edge
    pub weight: Weight,
}

/// A named place on campus together with its outgoing half-edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub info: String,
    pub popularity: i32,

    /// Half-edges in insertion order
    #[serde(skip)]
    pub edges: Vec<Edge>,
}

/// Weighted undirected campus graph.
///
/// Locations live in a contiguous vector in insertion order; `id_index` maps
/// each id to its position. The two are only ever mutated together, so the
/// index is a bijection with the store.
#[derive(Debug, Clone, Default)]
pub struct CampusGraph {
    locations: Vec<Location>,
    id_index: HashMap<LocationId, usize>,
}

impl CampusGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with pre-allocated capacity
    pub fn with_capacity(location_count: usize) -> Self {
        Self {
            locations: Vec::with_capacity(location_count),
            id_index: HashMap::with_capacity(location_count),
        }
    }

    /// Append a new location. Fails without touching the graph if `id` is taken.
    pub fn add_location(
        &mut self,
        id: LocationId,
        name: impl Into<String>,
        info: impl Into<String>,
        popularity: i32,
    ) -> Result<(), CampusError> {
        if self.id_index.contains_key(&id) {
            log::warn!("Location id {} already exists", id);
            return Err(CampusError::DuplicateId(id));
        }

        let name = name.into();
        log::debug!("Adding location {} ({})", id, name);

        self.id_index.insert(id, self.locations.len());
        self.locations.push(Location {
            id,
            name,
            info: info.into(),
            popularity,
            edges: Vec::new(),
        });

        Ok(())
    }

    /// Connect `u` and `v` with a mirrored pair of half-edges.
    ///
    /// No deduplication: repeated calls add parallel pairs, and `u == v`
    /// stores both halves on the same location.
    pub fn add_path(&mut self, u: LocationId, v: LocationId, weight: Weight) -> Result<(), CampusError> {
        let (u_idx, v_idx) = match (self.index_of(u), self.index_of(v)) {
            (Some(u_idx), Some(v_idx)) => (u_idx, v_idx),
            _ => {
                log::warn!("Invalid location ids in path {} -> {}", u, v);
                return Err(CampusError::InvalidReference { from: u, to: v });
            }
        };

        log::debug!("Adding path {} <-> {} (weight {})", u, v, weight);

        self.locations[u_idx].edges.push(Edge { destination: v, weight });
        self.locations[v_idx].edges.push(Edge { destination: u, weight });

        Ok(())
    }

    /// Look up a location by id
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.index_of(id).map(|idx| &self.locations[idx])
    }

    /// Storage position of `id`, re-resolved on every call
    pub fn index_of(&self, id: LocationId) -> Option<usize> {
        self.id_index.get(&id).copied()
    }

    /// Location at a storage position, if the position is still valid
    pub fn location_at(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Outgoing half-edges of a location (empty for unknown ids)
    pub fn edges(&self, id: LocationId) -> &[Edge] {
        self.location(id).map(|l| l.edges.as_slice()).unwrap_or(&[])
    }

    /// All locations in insertion order
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Drop every location, edge and index entry at once
    pub fn clear(&mut self) {
        log::debug!("Clearing graph with {} locations", self.locations.len());
        self.locations.clear();
        self.id_index.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of stored half-edges (two per `add_path` call)
    pub fn half_edge_count(&self) -> usize {
        self.locations.iter().map(|l| l.edges.len()).sum()
    }

    /// Number of undirected paths
    pub fn edge_count(&self) -> usize {
        self.half_edge_count() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_triangle() -> CampusGraph {
        let mut g = CampusGraph::new();
        g.add_location(1, "Gate", "Main entrance", 80).unwrap();
        g.add_location(2, "Library", "Study hall", 95).unwrap();
        g.add_location(3, "Canteen", "Food", 90).unwrap();
        g.add_path(1, 2, 200).unwrap();
        g.add_path(2, 3, 100).unwrap();
        g
    }

    #[test]
    fn test_add_location_and_lookup() {
        let g = make_triangle();
        assert_eq!(g.location_count(), 3);
        let lib = g.location(2).unwrap();
        assert_eq!(lib.name, "Library");
        assert_eq!(lib.info, "Study hall");
        assert_eq!(lib.popularity, 95);
        assert!(g.location(42).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut g = make_triangle();
        let err = g.add_location(2, "Other", "", 1).unwrap_err();
        assert!(matches!(err, CampusError::DuplicateId(2)));
        assert_eq!(g.location_count(), 3);
        assert_eq!(g.location(2).unwrap().name, "Library");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut g = CampusGraph::new();
        for id in [5, 1, 3] {
            g.add_location(id, format!("L{}", id), "", 0).unwrap();
        }
        let ids: Vec<_> = g.locations().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![5, 1, 3]);
        assert_eq!(g.index_of(1), Some(1));
        assert_eq!(g.location_at(2).unwrap().id, 3);
    }

    #[test]
    fn test_add_path_mirrors() {
        let g = make_triangle();
        assert_eq!(g.edges(1), &[Edge { destination: 2, weight: 200 }]);
        assert_eq!(
            g.edges(2),
            &[
                Edge { destination: 1, weight: 200 },
                Edge { destination: 3, weight: 100 }
            ]
        );
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.half_edge_count(), 4);
    }

    #[test]
    fn test_add_path_invalid_reference() {
        let mut g = make_triangle();
        let err = g.add_path(1, 99, 50).unwrap_err();
        assert!(matches!(err, CampusError::InvalidReference { from: 1, to: 99 }));
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edges(1).len(), 1);
    }

    #[test]
    fn test_parallel_and_self_paths() {
        let mut g = make_triangle();
        g.add_path(1, 2, 200).unwrap();
        g.add_path(3, 3, 10).unwrap();
        assert_eq!(g.edges(1).len(), 2);
        assert_eq!(g.edges(3).len(), 3);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_clear_empties_store_and_index() {
        let mut g = make_triangle();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(g.location(1).is_none());
        assert!(g.index_of(1).is_none());
        // Ids become free again after a clear
        g.add_location(1, "Gate", "", 1).unwrap();
        assert_eq!(g.index_of(1), Some(0));
    }
}
