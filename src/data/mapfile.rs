//! Text map file handling
//!
//! A map file has two sections, each opened by a bare marker line:
//!
//! ```text
//! LOCATIONS
//! <id> <popularity> <name> <info...>
//! EDGES
//! <u> <v> <weight>
//! ```
//!
//! Records are applied in file order, so a location must appear before any
//! edge that references it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::CampusError;
use crate::graph::{CampusBuilder, CampusGraph, LocationRecord, PathRecord, Record};

pub const LOCATIONS_MARKER: &str = "LOCATIONS";
pub const EDGES_MARKER: &str = "EDGES";

/// What to do with a line that does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Skip the line, log it and keep going
    #[default]
    Lenient,
    /// Abort the whole load on the first bad line
    Strict,
}

/// A line dropped by a lenient load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

/// Outcome of a map load
#[derive(Debug, Default)]
pub struct LoadReport {
    pub locations_loaded: usize,
    pub paths_loaded: usize,

    /// Lines that did not parse (lenient mode only)
    pub skipped: Vec<SkippedLine>,

    /// Well-formed records the graph refused (duplicate ids, unknown endpoints)
    pub rejected: Vec<CampusError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.rejected.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Locations,
    Edges,
}

/// Clear `graph` and reload it from the map file at `path`.
///
/// The graph is cleared before the file is opened, so any failure leaves it
/// empty rather than half-replaced.
pub fn load_map<P: AsRef<Path>>(
    graph: &mut CampusGraph,
    path: P,
    mode: LoadMode,
) -> Result<LoadReport, CampusError> {
    let path = path.as_ref();
    log::info!("Loading map file: {}", path.display());

    graph.clear();
    let file = File::open(path).map_err(|e| CampusError::file_open(path, e))?;

    let report = read_map(graph, BufReader::new(file), mode)?;

    log::info!(
        "Loaded {} locations and {} paths from {}",
        report.locations_loaded,
        report.paths_loaded,
        path.display()
    );

    Ok(report)
}

/// Clear `graph` and reload it from an already opened map source
pub fn read_map<R: BufRead>(
    graph: &mut CampusGraph,
    reader: R,
    mode: LoadMode,
) -> Result<LoadReport, CampusError> {
    graph.clear();

    let (builder, skipped) = parse_map(reader, mode)?;
    let rejected = builder.apply(graph);

    for e in &rejected {
        log::warn!("Rejected map record: {}", e);
    }

    let paths_loaded = graph.edge_count();
    Ok(LoadReport {
        locations_loaded: graph.location_count(),
        paths_loaded,
        skipped,
        rejected,
    })
}

/// Parse a map source into staged records without touching any graph
pub fn parse_map<R: BufRead>(
    reader: R,
    mode: LoadMode,
) -> Result<(CampusBuilder, Vec<SkippedLine>), CampusError> {
    let mut builder = CampusBuilder::new();
    let mut skipped = Vec::new();
    let mut section = Section::Preamble;

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let line_no = idx + 1;
        let line = match String::from_utf8(raw?) {
            Ok(line) => line,
            Err(_) => {
                skip_or_abort(mode, &mut skipped, line_no, "line is not valid UTF-8".to_string())?;
                continue;
            }
        };
        let line = line.trim_end_matches('\r');

        match line.trim() {
            "" => continue,
            LOCATIONS_MARKER => {
                section = Section::Locations;
                continue;
            }
            EDGES_MARKER => {
                section = Section::Edges;
                continue;
            }
            _ => {}
        }

        let parsed = match section {
            Section::Preamble => Err("line appears before any section marker".to_string()),
            Section::Locations => parse_location_line(line).map(Record::Location),
            Section::Edges => parse_edge_line(line).map(Record::Path),
        };

        match parsed {
            Ok(record) => {
                builder.push(record);
            }
            Err(reason) => skip_or_abort(mode, &mut skipped, line_no, reason)?,
        }
    }

    Ok((builder, skipped))
}

/// Record a bad line when lenient, fail the load when strict
fn skip_or_abort(
    mode: LoadMode,
    skipped: &mut Vec<SkippedLine>,
    line: usize,
    reason: String,
) -> Result<(), CampusError> {
    match mode {
        LoadMode::Strict => Err(CampusError::malformed(line, reason)),
        LoadMode::Lenient => {
            log::warn!("Skipping malformed line {}: {}", line, reason);
            skipped.push(SkippedLine { line, reason });
            Ok(())
        }
    }
}

/// Split off the next whitespace-delimited token, returning it and the
/// untouched remainder.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

fn parse_field<'a, T: std::str::FromStr>(
    token: Option<(&'a str, &'a str)>,
    field: &str,
) -> Result<(T, &'a str), String> {
    let (raw, rest) = token.ok_or_else(|| format!("missing {}", field))?;
    let value = raw
        .parse::<T>()
        .map_err(|_| format!("invalid {} '{}'", field, raw))?;
    Ok((value, rest))
}

/// `<id> <popularity> <name> <info...>`; info keeps internal spacing and
/// loses exactly one leading space.
fn parse_location_line(line: &str) -> Result<LocationRecord, String> {
    let (id, rest) = parse_field(next_token(line), "id")?;
    let (popularity, rest) = parse_field(next_token(rest), "popularity")?;
    let (name, rest) = next_token(rest).ok_or_else(|| "missing name".to_string())?;
    let info = rest.strip_prefix(' ').unwrap_or(rest);

    Ok(LocationRecord {
        id,
        name: name.to_string(),
        info: info.to_string(),
        popularity,
    })
}

/// `<u> <v> <weight>`; anything after the weight is ignored
fn parse_edge_line(line: &str) -> Result<PathRecord, String> {
    let (from, rest) = parse_field(next_token(line), "origin id")?;
    let (to, rest) = parse_field(next_token(rest), "destination id")?;
    let (weight, _) = parse_field(next_token(rest), "weight")?;

    Ok(PathRecord { from, to, weight })
}
