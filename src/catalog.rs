//! The external catalog of legal message keys.

use std::{collections::BTreeSet, fs, path::Path};

use serde_json::Value;
use tracing::debug;

use crate::{diagnostics::Diagnostics, document::DocumentFormat, paths::display_path};

/// Read-only set of message keys a channel may reference.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    /// Top-level keys of the catalog document.
    keys: BTreeSet<String>,
    /// Display name of the source document, used in reports.
    source: String,
    /// Whether the catalog document was loaded.
    available: bool,
}

impl MessageCatalog {
    /// Load the top-level keys of the catalog at `path`.
    ///
    /// Any failure degrades to an empty catalog and a warning, so every
    /// `messageKey` is then reported as unknown.
    pub(crate) fn load(path: &Path, diagnostics: &mut Diagnostics) -> Self {
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| display_path(path));

        match read_keys(path) {
            Ok(keys) => {
                debug!(path = %path.display(), count = keys.len(), "loaded message catalog");
                Self {
                    keys,
                    source,
                    available: true,
                }
            }
            Err(reason) => {
                diagnostics.warn(format!(
                    "Could not load message catalog {}: {reason}",
                    display_path(path)
                ));
                Self {
                    keys: BTreeSet::new(),
                    source,
                    available: false,
                }
            }
        }
    }

    /// Build a catalog from known keys.
    #[cfg(test)]
    pub(crate) fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            source: "catalog".to_string(),
            available: true,
        }
    }

    /// Whether `key` is a legal message key.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of known keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the catalog has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether the catalog document was loaded successfully.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Display name of the catalog document.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Read a catalog document and collect its top-level keys.
fn read_keys(path: &Path) -> Result<BTreeSet<String>, String> {
    let contents = fs::read_to_string(path).map_err(|error| error.to_string())?;
    match DocumentFormat::from_path(path).parse(&contents)? {
        Value::Object(map) => Ok(map.into_iter().map(|(key, _)| key).collect()),
        _ => Err("top level must be a mapping".to_string()),
    }
}
