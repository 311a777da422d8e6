//! Station Directory
//!
//! Read-only lookup tables mapping the station names riders say to the codes
//! the transit API keys predictions by. Content comes from a JSON resource
//! file loaded once at process start, so the tables can change without a
//! rebuild.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Failures loading the directory resource at startup.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read station directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse station directory: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A physical rail station: the name riders say and the code the transit
/// API knows it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub name: String,
    pub code: String,
}

/// The directory tables, deserialized once at process start and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationDirectory {
    /// Canonical spoken name -> station code.
    stations: HashMap<String, String>,
    /// Common mis-hearing -> canonical spoken name.
    #[serde(default)]
    corrections: HashMap<String, String>,
    /// Upstream destination name -> short spoken form.
    #[serde(default)]
    abbreviations: HashMap<String, String>,
}

impl StationDirectory {
    /// Builds a directory from in-memory tables.
    pub fn new(
        stations: HashMap<String, String>,
        corrections: HashMap<String, String>,
        abbreviations: HashMap<String, String>,
    ) -> Self {
        Self {
            stations,
            corrections,
            abbreviations,
        }
    }

    /// Loads the directory from a JSON resource file.
    pub fn from_path(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Resolves a spoken station name.
    ///
    /// The correction table is applied first, then the result must match a
    /// canonical name exactly. No fuzzy matching.
    pub fn lookup(&self, spoken_name: &str) -> Option<Station> {
        let canonical = self.correct(spoken_name);
        self.stations.get(canonical).map(|code| Station {
            name: canonical.to_string(),
            code: code.clone(),
        })
    }

    /// Applies the mis-hearing correction table, or returns the name as heard.
    pub fn correct<'a>(&'a self, spoken_name: &'a str) -> &'a str {
        self.corrections
            .get(spoken_name)
            .map(String::as_str)
            .unwrap_or(spoken_name)
    }

    /// Maps an upstream destination name to its short spoken form, when one
    /// exists.
    pub fn expand_abbreviation<'a>(&'a self, api_name: &'a str) -> &'a str {
        self.abbreviations
            .get(api_name)
            .map(String::as_str)
            .unwrap_or(api_name)
    }

    /// Number of stations in the directory.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True when the directory holds no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
