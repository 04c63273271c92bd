pub mod doctor;
pub mod format;

use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Label substituted when a decoded class index falls outside the table.
pub const UNKNOWN_LABEL: &str = "unknown";

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("read label file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered class-name table, indexed by the model's class index.
///
/// The table length is not guaranteed to match the model's class count;
/// lookups past the end resolve to [`UNKNOWN_LABEL`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Reads one label per line, stopping at the first blank line.
    pub fn from_reader(reader: impl BufRead) -> std::io::Result<Self> {
        let mut labels = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                break;
            }
            labels.push(line);
        }
        Ok(Self { labels })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let path = path.as_ref();
        let wrap = |source| LabelError::Io {
            path: path.display().to_string(),
            source,
        };
        let file = std::fs::File::open(path).map_err(wrap)?;
        let table = Self::from_reader(BufReader::new(file)).map_err(wrap)?;
        debug!("labels: loaded {} labels from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, class_idx: usize) -> Option<&str> {
        self.labels.get(class_idx).map(String::as_str)
    }

    /// Label for `class_idx`, falling back to [`UNKNOWN_LABEL`] past the end.
    pub fn resolve(&self, class_idx: usize) -> &str {
        self.get(class_idx).unwrap_or(UNKNOWN_LABEL)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for LabelTable {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}
