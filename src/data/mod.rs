//! Map input: text map files and the built-in campus

pub mod mapfile;
pub mod seed;

pub use mapfile::{load_map, parse_map, read_map, LoadMode, LoadReport, SkippedLine};
pub use seed::{default_campus_records, seed_default_campus};
