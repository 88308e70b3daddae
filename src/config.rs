//! Configuration management for campus navigation

use crate::data::LoadMode;

/// Separator placed between location names in an exported path
pub const DEFAULT_PATH_SEPARATOR: &str = " -> ";

/// Runtime configuration shared by the loader, exporters and CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Separator between names in exported paths
    pub path_separator: String,

    /// How the map loader treats malformed lines
    pub load_mode: LoadMode,

    /// Start from the built-in campus when no map file is given
    pub seed_default_campus: bool,

    /// Emit a header row in CSV listings
    pub csv_header: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_PATH_SEPARATOR.to_string(),
            load_mode: LoadMode::Lenient,
            seed_default_campus: true,
            csv_header: true,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        path_separator: impl Into<String>,
        load_mode: LoadMode,
        seed_default_campus: bool,
        csv_header: bool,
    ) -> Self {
        Self {
            path_separator: path_separator.into(),
            load_mode,
            seed_default_campus,
            csv_header,
        }
    }
}
