mod record;
mod render;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use itertools::Itertools;
use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub(crate) use render::HEADER;

/// Default location of the authors file, relative to the repository root.
pub const AUTHORS_FILE: &str = "authors.yaml";

#[derive(Debug, Error)]
pub enum AuthorsError {
    #[error("{}: {source}", path.display())]
    NotFound { path: PathBuf, source: io::Error },
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Parse(#[from] serde_yaml::Error),
    #[error("{context} must be a mapping, found {found}")]
    NotAMapping { context: String, found: &'static str },
    #[error("keys must be strings, found {found}: {key}")]
    InvalidKey { key: String, found: &'static str },
    #[error("{username}.{field} must be a scalar, found {found}")]
    NonScalarField {
        username: String,
        field: String,
        found: &'static str,
    },
}

/// Usernames mapped to their entries, in the order they were loaded.
///
/// Entries are kept as loaded. Only the usernames are checked on load, the
/// shape of each record matters once the file is rewritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorsTable {
    entries: IndexMap<String, Value>,
}

/// Usernames compare case-insensitively by lower-casing each codepoint.
pub fn sort_key(username: &str) -> String {
    username.to_lowercase()
}

/// The authors file at the root of the repository containing `start`.
///
/// Walks up until a directory holds the file or a `.git` entry. Outside a
/// repository this is `start/authors.yaml`.
pub fn locate(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        let candidate = dir.join(AUTHORS_FILE);
        if candidate.is_file() || dir.join(".git").exists() {
            return candidate;
        }
    }
    start.join(AUTHORS_FILE)
}

impl AuthorsTable {
    pub fn load(path: &Path) -> Result<Self, AuthorsError> {
        let s = fs::read_to_string(path).map_err(|source| {
            let path = path.to_path_buf();
            match source.kind() {
                io::ErrorKind::NotFound => AuthorsError::NotFound { path, source },
                _ => AuthorsError::Io { path, source },
            }
        })?;
        let table = Self::from_yaml(&s)?;
        debug!(path = %path.display(), n = table.len(), "Loaded authors");
        Ok(table)
    }

    /// Parse a YAML document. An empty document is an empty table.
    pub fn from_yaml(s: &str) -> Result<Self, AuthorsError> {
        let doc: Value = serde_yaml::from_str(s)?;
        if doc.is_null() {
            return Ok(Self::default());
        }
        let entries: IndexMap<String, Value> = serde_yaml::from_value(doc)?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn usernames(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Usernames in case-insensitive order. Ties keep their loaded order.
    pub fn sorted_usernames(&self) -> Vec<&str> {
        self.entries
            .keys()
            .map(String::as_str)
            .sorted_by_key(|k| sort_key(k))
            .collect()
    }

    pub fn is_sorted(&self) -> bool {
        self.usernames() == self.sorted_usernames()
    }

    /// A copy of the table with entries in case-insensitive username order.
    pub fn sorted(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, _, b, _| sort_key(a).cmp(&sort_key(b)));
        Self { entries }
    }
}

fn string_key(key: &Value) -> Result<String, AuthorsError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        other => Err(AuthorsError::InvalidKey {
            key: serde_yaml::to_string(other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default(),
            found: kind(other),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
