//! Built-in campus map used when no map file is supplied

use crate::graph::{CampusBuilder, CampusGraph};

/// Stage the default campus: seven locations and nine paths.
pub fn default_campus_records() -> CampusBuilder {
    let mut b = CampusBuilder::with_capacity(16);
    b.location(1, "Gate", "Main entrance", 80)
        .location(2, "Library", "Quiet study area", 95)
        .location(3, "Canteen", "Meals and snacks", 90)
        .location(4, "Dormitory", "Student housing", 85)
        .location(5, "Classrooms", "Lecture halls", 88)
        .location(6, "Gymnasium", "Sports and fitness", 75)
        .location(7, "Admin", "Administration offices", 50)
        .path(1, 5, 200)
        .path(1, 6, 500)
        .path(5, 2, 100)
        .path(5, 3, 150)
        .path(2, 4, 300)
        .path(3, 4, 50)
        .path(6, 3, 250)
        .path(6, 7, 400)
        .path(7, 2, 100);
    b
}

/// Replace the contents of `graph` with the default campus
pub fn seed_default_campus(graph: &mut CampusGraph) {
    graph.clear();
    let rejected = default_campus_records().apply(graph);
    debug_assert!(rejected.is_empty());
    log::info!(
        "Seeded default campus with {} locations and {} paths",
        graph.location_count(),
        graph.edge_count()
    );
}
