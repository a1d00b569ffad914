//! Dependency manifest formatting (`name==version` per line)

use std::fmt;

use serde::{Deserialize, Serialize};

/// One manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub version: Option<String>,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>) -> Self {
        ManifestEntry {
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version.as_deref().map(str::trim) {
            Some(version) if !version.is_empty() => write!(f, "{}=={}", self.name, version),
            _ => f.write_str(&self.name),
        }
    }
}

/// Render entries sorted ascending by name, one per line. A name that
/// appears twice keeps its first entry.
pub fn render_manifest(entries: &[ManifestEntry]) -> String {
    let mut sorted: Vec<&ManifestEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted.dedup_by(|later, earlier| later.name == earlier.name);

    sorted.iter().map(|entry| format!("{entry}\n")).collect()
}
