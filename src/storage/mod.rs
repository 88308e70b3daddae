//! Map and path persistence

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use serde::Serialize;

use crate::data::mapfile::{EDGES_MARKER, LOCATIONS_MARKER};
use crate::error::CampusError;
use crate::graph::{CampusGraph, LocationId, Route};
use crate::query::{edge_rows, location_rows};

/// Write the names along `stops` to a new file, joined by `separator`.
///
/// An empty path is refused and no file is created.
pub fn export_path<P: AsRef<Path>>(
    graph: &CampusGraph,
    stops: &[LocationId],
    path: P,
    separator: &str,
) -> Result<(), CampusError> {
    let path = path.as_ref();
    if stops.is_empty() {
        log::warn!("No path to export");
        return Err(CampusError::EmptyPath);
    }

    let names = stops
        .iter()
        .map(|&id| {
            graph
                .location(id)
                .map(|l| l.name.as_str())
                .ok_or(CampusError::UnknownLocation(id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("Exporting {}-stop path to {}", names.len(), path.display());

    let mut file = File::create(path).map_err(|e| CampusError::file_open(path, e))?;
    writeln!(file, "{}", names.iter().join(separator))?;

    Ok(())
}

/// Read a file written by [`export_path`] back into its location names
pub fn read_exported_path<P: AsRef<Path>>(path: P, separator: &str) -> Result<Vec<String>, CampusError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| CampusError::file_open(path, e))?;
    let line = text.trim_end_matches(['\r', '\n']);

    if line.is_empty() {
        return Ok(Vec::new());
    }
    Ok(line.split(separator).map(str::to_string).collect())
}

/// Save the whole graph in the map file format
pub fn save_map<P: AsRef<Path>>(graph: &CampusGraph, path: P) -> Result<(), CampusError> {
    let path = path.as_ref();
    log::info!(
        "Saving {} locations and {} paths to {}",
        graph.location_count(),
        graph.edge_count(),
        path.display()
    );

    check_savable(graph)?;
    let file = File::create(path).map_err(|e| CampusError::file_open(path, e))?;
    let mut writer = BufWriter::new(file);
    write_map(graph, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// Refuse locations whose name or info would not reload as the same record
fn check_savable(graph: &CampusGraph) -> Result<(), CampusError> {
    for loc in graph.locations() {
        let reason = if loc.name.is_empty() {
            Some("empty name")
        } else if loc.name.contains(char::is_whitespace) {
            Some("name contains whitespace")
        } else if loc.info.contains(['\n', '\r']) {
            Some("info contains a line break")
        } else {
            None
        };

        if let Some(reason) = reason {
            log::warn!("Location {} cannot be saved: {}", loc.id, reason);
            return Err(CampusError::Unsavable { id: loc.id, reason });
        }
    }
    Ok(())
}

/// Serialize the graph as a LOCATIONS section followed by an EDGES section.
///
/// Nothing is written if any location would not survive a reload.
pub fn write_map<W: Write>(graph: &CampusGraph, mut writer: W) -> Result<(), CampusError> {
    check_savable(graph)?;

    writeln!(writer, "{}", LOCATIONS_MARKER)?;
    for loc in graph.locations() {
        if loc.info.is_empty() {
            writeln!(writer, "{} {} {}", loc.id, loc.popularity, loc.name)?;
        } else {
            writeln!(writer, "{} {} {} {}", loc.id, loc.popularity, loc.name, loc.info)?;
        }
    }

    writeln!(writer, "{}", EDGES_MARKER)?;
    for row in edge_rows(graph) {
        writeln!(writer, "{} {} {}", row.from, row.to, row.weight)?;
    }

    Ok(())
}

/// Comma-separated location listing: `id,name,popularity,info`
pub fn write_locations_csv<W: Write>(graph: &CampusGraph, writer: W, header: bool) -> Result<(), CampusError> {
    write_rows_csv(&location_rows(graph), writer, header)
}

/// Comma-separated edge listing: `from,to,weight`, one row per undirected path
pub fn write_edges_csv<W: Write>(graph: &CampusGraph, writer: W, header: bool) -> Result<(), CampusError> {
    write_rows_csv(&edge_rows(graph), writer, header)
}

/// Comma-separated listing of arbitrary rows, quoting fields where needed
pub fn write_rows_csv<T, W>(rows: &[T], writer: W, header: bool) -> Result<(), CampusError>
where
    T: Serialize,
    W: Write,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(header)
        .from_writer(writer);

    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// A route's stop names as a single comma-separated record
pub fn write_route_csv<W: Write>(graph: &CampusGraph, route: &Route, writer: W) -> Result<(), CampusError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(route.names(graph))?;
    csv_writer.flush()?;

    Ok(())
}

/// Pretty-printed JSON of any listing or route
pub fn write_json<T, W>(value: &T, mut writer: W) -> Result<(), CampusError>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{read_map, LoadMode};
    use crate::graph::shortest_path;
    use crate::query::EdgeRow;
    use std::io::Cursor;

    fn make_sample() -> CampusGraph {
        let mut g = CampusGraph::new();
        g.add_location(1, "Gate", "Main entrance", 80).unwrap();
        g.add_location(2, "Library", "Study hall", 95).unwrap();
        g.add_location(3, "Canteen", "", 90).unwrap();
        g.add_path(1, 2, 200).unwrap();
        g.add_path(2, 3, 100).unwrap();
        g
    }

    #[test]
    fn test_export_path_round_trip() {
        let g = make_sample();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("route.txt");

        let stops = shortest_path(&g, 1, 3);
        export_path(&g, &stops, &file, " -> ").unwrap();

        let text = fs::read_to_string(&file).unwrap();
        assert_eq!(text.trim_end(), "Gate -> Library -> Canteen");
        assert_eq!(
            read_exported_path(&file, " -> ").unwrap(),
            vec!["Gate", "Library", "Canteen"]
        );
    }

    #[test]
    fn test_export_empty_path_creates_nothing() {
        let g = make_sample();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("route.txt");

        let err = export_path(&g, &[], &file, " -> ").unwrap_err();
        assert!(matches!(err, CampusError::EmptyPath));
        assert!(!file.exists());
    }

    #[test]
    fn test_export_unknown_stop() {
        let g = make_sample();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("route.txt");
        let err = export_path(&g, &[1, 42], &file, " -> ").unwrap_err();
        assert!(matches!(err, CampusError::UnknownLocation(42)));
        assert!(!file.exists());
    }

    #[test]
    fn test_write_map_format() {
        let g = make_sample();
        let mut out = Vec::new();
        write_map(&g, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "LOCATIONS\n1 80 Gate Main entrance\n2 95 Library Study hall\n3 90 Canteen\nEDGES\n1 2 200\n2 3 100\n"
        );
    }

    #[test]
    fn test_save_and_reload() {
        let g = make_sample();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("map.txt");
        save_map(&g, &file).unwrap();

        let mut reloaded = CampusGraph::new();
        let report = crate::data::load_map(&mut reloaded, &file, LoadMode::Strict).unwrap();
        assert!(report.is_clean());
        assert_eq!(reloaded.locations(), g.locations());
    }

    #[test]
    fn test_write_map_rejects_unsavable_records() {
        let mut g = make_sample();
        g.add_location(4, "Hall", "first line\nsecond line", 10).unwrap();
        let mut out = Vec::new();
        let err = write_map(&g, &mut out).unwrap_err();
        assert!(matches!(err, CampusError::Unsavable { id: 4, .. }));
        assert!(out.is_empty());

        let mut g = make_sample();
        g.add_location(5, "Sports Hall", "", 10).unwrap();
        assert!(matches!(
            write_map(&g, Vec::new()),
            Err(CampusError::Unsavable { id: 5, .. })
        ));
    }

    #[test]
    fn test_save_map_unsavable_creates_nothing() {
        let mut g = make_sample();
        g.add_location(4, "", "nameless", 10).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("map.txt");

        let err = save_map(&g, &file).unwrap_err();
        assert!(matches!(err, CampusError::Unsavable { id: 4, reason: "empty name" }));
        assert!(!file.exists());
    }

    #[test]
    fn test_write_map_then_read_map() {
        let g = make_sample();
        let mut out = Vec::new();
        write_map(&g, &mut out).unwrap();

        let mut reloaded = CampusGraph::new();
        read_map(&mut reloaded, Cursor::new(out), LoadMode::Strict).unwrap();
        assert_eq!(
            edge_rows(&reloaded),
            vec![
                EdgeRow { from: 1, to: 2, weight: 200 },
                EdgeRow { from: 2, to: 3, weight: 100 }
            ]
        );
    }

    #[test]
    fn test_locations_csv() {
        let mut g = make_sample();
        g.add_location(4, "Hall", "Big, bright", 10).unwrap();
        let mut out = Vec::new();
        write_locations_csv(&g, &mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,name,popularity,info");
        assert_eq!(lines[1], "1,Gate,80,Main entrance");
        assert_eq!(lines[4], "4,Hall,10,\"Big, bright\"");
    }

    #[test]
    fn test_edges_csv_without_header() {
        let g = make_sample();
        let mut out = Vec::new();
        write_edges_csv(&g, &mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1,2,200\n2,3,100\n");
    }

    #[test]
    fn test_route_csv_quotes_names() {
        let mut g = make_sample();
        g.add_location(4, "Hall,East", "", 10).unwrap();
        g.add_path(3, 4, 20).unwrap();

        let route = crate::graph::route(&g, 1, 4).unwrap();
        let mut out = Vec::new();
        write_route_csv(&g, &route, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Gate,Library,Canteen,\"Hall,East\"\n"
        );
    }

    #[test]
    fn test_write_json_rows() {
        let g = make_sample();
        let mut out = Vec::new();
        write_json(&location_rows(&g), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[1]["name"], "Library");
        assert_eq!(value[2]["popularity"], 90);
    }
}
