//! Env file loading.
//!
//! Reads `KEY=VALUE` lines into an ordered [`EnvMap`]. The format is
//! deliberately minimal:
//!
//! - Each line is trimmed; blank lines and lines without `=` are skipped.
//! - The line is split on the first `=`. Later `=` characters belong to the value.
//! - One layer of matching `"` or `'` quotes around the value is removed.
//! - There is no comment syntax, escaping, or multi-line value support.
//!   `# A=B` is an entry with key `# A`.

use crate::error::{EnvJobError, Result};
use std::path::Path;


/// Ordered key/value pairs loaded from an env file.
///
/// Keys are unique. Iteration follows the order in which each key first
/// appeared; re-inserting a key overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    entries: Vec<(String, String)>,
}

impl EnvMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

#[cfg(test)]
impl<K, V> FromIterator<(K, V)> for EnvMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = EnvMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Parse env file content into an [`EnvMap`].
///
/// Never fails: lines that do not look like `KEY=VALUE` are skipped.
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn parse_str(content: &str) -> EnvMap {
    let mut map = EnvMap::new();

    // `\r\n` yields an extra empty piece, which is skipped as a blank line.
    for line in content.split(['\n', '\r']) {
        if let Some((key, value)) = parse_line(line) {
            map.insert(key, value);
        }
    }

    map
}

/// Parse a single line, returning `None` for lines that should be skipped.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (key, raw_value) = line.split_once('=')?;
    Some((key, strip_quotes(raw_value)))
}

/// Remove one layer of matching surrounding quotes.
///
/// `"abc"` and `'abc'` become `abc`; `"abc'`, `"abc` and a lone `"` are
/// returned unchanged.
pub fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Load and parse an env file.
///
/// # Errors
///
/// Returns `EnvJobError::EnvFile` if the file is missing, unreadable, or not UTF-8.
pub fn load<P: AsRef<Path>>(path: P) -> Result<EnvMap> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        EnvJobError::EnvFile(format!(
            "failed to read env file '{}': {}\n\
             Fix: create the file or pass --env-file <PATH>.",
            path.display(),
            e
        ))
    })?;

    let map = parse_str(&content);
    if map.is_empty() {
        tracing::warn!(path = %path.display(), "env file has no KEY=VALUE lines");
    }
    tracing::info!(path = %path.display(), count = map.len(), "loaded env file");
    for key in map.keys() {
        tracing::debug!(key, "env variable");
    }

    Ok(map)
}
