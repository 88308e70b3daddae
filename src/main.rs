use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use itertools::Itertools;

use campus_nav::data::{self, LoadMode};
use campus_nav::graph::{self as campus_graph, CampusGraph, LocationId};
use campus_nav::query::{self, LocationRow, SortKey};
use campus_nav::config::DEFAULT_PATH_SEPARATOR;
use campus_nav::{storage, CampusError, Config};

#[derive(Parser, Debug)]
#[clap(
    name = "campus-nav",
    about = "Campus navigation: shortest paths, search and listings over a location map"
)]
struct Cli {
    /// Map file to load (LOCATIONS/EDGES format); the built-in campus is used otherwise
    #[clap(long, global = true)]
    map: Option<PathBuf>,

    /// Fail the load on the first malformed map line instead of skipping it
    #[clap(long, global = true)]
    strict: bool,

    /// Output format for listings and routes
    #[clap(long, value_enum, default_value = "csv", global = true)]
    format: OutputFormat,

    /// Omit the header row in CSV output
    #[clap(long, global = true)]
    no_header: bool,

    /// Verbose logging
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shortest path between two location ids
    Path { from: LocationId, to: LocationId },

    /// List all locations
    Locations,

    /// List all paths, once per undirected pair
    Edges,

    /// Locations whose name starts with a prefix
    Search { prefix: String },

    /// List locations in a given order
    Sort {
        #[clap(long, value_enum, default_value = "popularity")]
        by: SortKey,
    },

    /// Write the shortest path between two ids to a file
    ExportPath {
        from: LocationId,
        to: LocationId,
        output: PathBuf,
    },

    /// Save the current map in LOCATIONS/EDGES format
    Save { output: PathBuf },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config::new(
        DEFAULT_PATH_SEPARATOR,
        if args.strict { LoadMode::Strict } else { LoadMode::Lenient },
        args.map.is_none(),
        !args.no_header,
    );

    let mut campus = CampusGraph::new();
    open_campus(&mut campus, args.map.as_ref(), &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Path { from, to } => print_route(&campus, from, to, args.format, &config, &mut out)?,
        Command::Locations => match args.format {
            OutputFormat::Csv => storage::write_locations_csv(&campus, &mut out, config.csv_header)?,
            OutputFormat::Json => storage::write_json(&query::location_rows(&campus), &mut out)?,
        },
        Command::Edges => match args.format {
            OutputFormat::Csv => storage::write_edges_csv(&campus, &mut out, config.csv_header)?,
            OutputFormat::Json => storage::write_json(&query::edge_rows(&campus), &mut out)?,
        },
        Command::Search { prefix } => {
            let rows: Vec<LocationRow> = query::search_prefix(&campus, &prefix)
                .into_iter()
                .map(LocationRow::from)
                .collect();
            if rows.is_empty() {
                log::info!("No locations start with '{}'", prefix);
            }
            print_locations(&rows, args.format, &config, &mut out)?;
        }
        Command::Sort { by } => {
            let rows: Vec<LocationRow> = query::sorted(&campus, by)
                .into_iter()
                .map(LocationRow::from)
                .collect();
            print_locations(&rows, args.format, &config, &mut out)?;
        }
        Command::ExportPath { from, to, output } => {
            let route = campus_graph::route(&campus, from, to)?;
            storage::export_path(&campus, &route.stops, &output, &config.path_separator)?;
            log::info!("Path exported to {}", output.display());
        }
        Command::Save { output } => storage::save_map(&campus, &output)?,
    }

    Ok(())
}

/// Populate the session graph from a map file or the built-in campus
fn open_campus(campus: &mut CampusGraph, map: Option<&PathBuf>, config: &Config) -> Result<()> {
    match map {
        Some(path) => {
            let report = data::load_map(campus, path, config.load_mode)
                .with_context(|| format!("Failed to load map {}", path.display()))?;
            if !report.is_clean() {
                log::warn!(
                    "Map loaded with {} skipped lines and {} rejected records",
                    report.skipped.len(),
                    report.rejected.len()
                );
            }
        }
        None if config.seed_default_campus => data::seed_default_campus(campus),
        None => {}
    }

    if campus.is_empty() {
        log::warn!("No locations available");
    }
    Ok(())
}

fn print_route<W: Write>(
    campus: &CampusGraph,
    from: LocationId,
    to: LocationId,
    format: OutputFormat,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let route = match campus_graph::route(campus, from, to) {
        Ok(route) => route,
        Err(e @ CampusError::Unreachable { .. }) => {
            log::info!("{}", e);
            writeln!(out)?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Csv => {
            log::info!("Shortest path length: {}", route.distance);
            log::info!("Path: {}", route.names(campus).iter().join(&config.path_separator));
            storage::write_route_csv(campus, &route, out)?;
        }
        OutputFormat::Json => storage::write_json(&route, out)?,
    }

    Ok(())
}

fn print_locations<W: Write>(
    rows: &[LocationRow],
    format: OutputFormat,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Csv => storage::write_rows_csv(rows, out, config.csv_header)?,
        OutputFormat::Json => storage::write_json(rows, out)?,
    }
    Ok(())
}
