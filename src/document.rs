//! Loading and saving the preset document.

use std::{
    fs, mem,
    path::{Path, PathBuf},
    result::Result as StdResult,
};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Interchange format of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON, written with two-space indentation.
    Json,
    /// YAML, written in block style.
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }

    /// Parse text in this format into a tree.
    pub fn parse(self, contents: &str) -> StdResult<Value, String> {
        match self {
            Self::Json => serde_json::from_str(contents).map_err(|error| error.to_string()),
            Self::Yaml => serde_yaml::from_str(contents).map_err(|error| error.to_string()),
        }
    }

    /// Render a tree in this format.
    pub fn render(self, value: &Value) -> StdResult<String, String> {
        match self {
            Self::Json => {
                let mut text =
                    serde_json::to_string_pretty(value).map_err(|error| error.to_string())?;
                text.push('\n');
                Ok(text)
            }
            Self::Yaml => serde_yaml::to_string(value).map_err(|error| error.to_string()),
        }
    }
}

/// A preset document held in memory between load and save.
#[derive(Debug, Clone)]
pub struct PresetDocument {
    /// Where the document was loaded from and will be saved to.
    path: PathBuf,
    /// On-disk format.
    format: DocumentFormat,
    /// The parsed tree.
    root: Value,
}

impl PresetDocument {
    /// Read and parse a preset, failing on missing or malformed input.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::DocumentRead {
            path: path.to_path_buf(),
            source,
        })?;
        let format = DocumentFormat::from_path(path);
        let root = format
            .parse(&contents)
            .map_err(|message| Error::DocumentParse {
                path: path.to_path_buf(),
                message,
            })?;
        if !root.is_object() {
            return Err(Error::DocumentShape {
                path: path.to_path_buf(),
                message: "top level must be a mapping".to_string(),
            });
        }
        debug!(path = %path.display(), ?format, "loaded preset");
        Ok(Self {
            path: path.to_path_buf(),
            format,
            root,
        })
    }

    /// Path the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, used in prompts.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// The parsed tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Mutable access to the parsed tree.
    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// Serialize the current tree in the document's format.
    pub fn render(&self) -> Result<String> {
        self.format
            .render(&self.root)
            .map_err(|message| Error::DocumentSerialize {
                path: self.path.clone(),
                message,
            })
    }

    /// Overwrite the document on disk with the current tree.
    pub fn save(&self) -> Result<()> {
        let rendered = self.render()?;
        fs::write(&self.path, rendered).map_err(|source| Error::DocumentWrite {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "saved preset");
        Ok(())
    }
}

/// Rename `from` to `to` without moving the entry.
///
/// The value keeps the position `from` had. An existing `to` entry is
/// replaced. Returns false when `from` is absent.
pub fn rename_key(map: &mut Map<String, Value>, from: &str, to: &str) -> bool {
    if from == to || !map.contains_key(from) {
        return false;
    }
    let entries = mem::take(map);
    for (key, value) in entries {
        if key == from {
            map.insert(to.to_string(), value);
        } else if key != to {
            map.insert(key, value);
        }
    }
    true
}
