//! Graph construction module

use crate::error::CampusError;
use crate::graph::{CampusGraph, LocationId, Weight};

/// A location waiting to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: String,
    pub info: String,
    pub popularity: i32,
}

/// An undirected path waiting to be inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRecord {
    pub from: LocationId,
    pub to: LocationId,
    pub weight: Weight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Location(LocationRecord),
    Path(PathRecord),
}

/// Builder for staging records and applying them to a graph in one pass.
///
/// Records are applied in the order they were staged, so a path staged before
/// the locations it references is rejected, exactly as a direct `add_path`
/// would be.
#[derive(Debug, Default)]
pub struct CampusBuilder {
    records: Vec<Record>,
    location_count: usize,
}

impl CampusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            location_count: 0,
        }
    }

    pub fn location(
        &mut self,
        id: LocationId,
        name: impl Into<String>,
        info: impl Into<String>,
        popularity: i32,
    ) -> &mut Self {
        self.records.push(Record::Location(LocationRecord {
            id,
            name: name.into(),
            info: info.into(),
            popularity,
        }));
        self.location_count += 1;
        self
    }

    pub fn path(&mut self, from: LocationId, to: LocationId, weight: Weight) -> &mut Self {
        self.records.push(Record::Path(PathRecord { from, to, weight }));
        self
    }

    pub fn push(&mut self, record: Record) -> &mut Self {
        match record {
            Record::Location(loc) => {
                self.location(loc.id, loc.name, loc.info, loc.popularity)
            }
            Record::Path(p) => self.path(p.from, p.to, p.weight),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Insert every staged record into `graph`.
    ///
    /// Rejected insertions are collected and returned instead of stopping
    /// the pass.
    pub fn apply(self, graph: &mut CampusGraph) -> Vec<CampusError> {
        let mut rejected = Vec::new();

        for record in self.records {
            let outcome = match record {
                Record::Location(loc) => {
                    graph.add_location(loc.id, loc.name, loc.info, loc.popularity)
                }
                Record::Path(p) => graph.add_path(p.from, p.to, p.weight),
            };
            if let Err(e) = outcome {
                rejected.push(e);
            }
        }

        rejected
    }

    /// Build a fresh graph from the staged records
    pub fn build(self) -> (CampusGraph, Vec<CampusError>) {
        let mut graph = CampusGraph::with_capacity(self.location_count);
        let rejected = self.apply(&mut graph);
        (graph, rejected)
    }
}
