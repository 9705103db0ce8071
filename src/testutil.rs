//! Test utilities for preset fixtures and scripted operators.
//!
//! `PresetFixture` writes preset and catalog documents into a temp directory;
//! `ScriptedPrompter` answers repair prompts without a terminal.

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tempfile::TempDir;

use crate::{config::Config, error::Result, prompt::Prompter, suggest::DEFAULT_THRESHOLD};

/// Answers prompts from a script and records every question asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    /// Answers handed out in order.
    answers: VecDeque<bool>,
    /// Answer used once the script runs out.
    fallback: Option<bool>,
    /// Questions asked so far.
    questions: Vec<String>,
}

impl ScriptedPrompter {
    /// Accept every prompt.
    pub fn accept_all() -> Self {
        Self {
            fallback: Some(true),
            ..Self::default()
        }
    }

    /// Decline every prompt.
    pub fn reject_all() -> Self {
        Self {
            fallback: Some(false),
            ..Self::default()
        }
    }

    /// Answer with exactly these values; asking more panics.
    pub fn answers(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Questions asked so far.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.questions.push(question.to_string());
        let answer = self
            .answers
            .pop_front()
            .or(self.fallback)
            .unwrap_or_else(|| panic!("unexpected prompt: {question}"));
        Ok(answer)
    }
}

/// A channel that passes every check.
pub fn valid_channel(key: &str) -> Value {
    serde_json::json!({
        "key": key,
        "name": key,
        "type": "GuildText",
        "permissionKey": "publicWrite"
    })
}

/// Temp directory holding a preset and a message catalog.
pub struct PresetFixture {
    /// Root temp directory.
    root: TempDir,
    /// Preset document path.
    preset: PathBuf,
    /// Catalog document path.
    catalog: PathBuf,
}

impl PresetFixture {
    /// Create an empty fixture with JSON file names.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        let preset = root.path().join("varietyz.json");
        let catalog = root.path().join("channelMessages.json");
        Self {
            root,
            preset,
            catalog,
        }
    }

    /// Write the preset document verbatim.
    pub fn with_preset_text(self, text: &str) -> Self {
        fs::write(&self.preset, text).expect("write preset");
        self
    }

    /// Write the preset document as two-space JSON.
    pub fn with_preset(self, preset: &Value) -> Self {
        let text = serde_json::to_string_pretty(preset).expect("serialize preset");
        self.with_preset_text(&text)
    }

    /// Write a catalog with the given top-level keys.
    pub fn with_catalog(self, keys: &[&str]) -> Self {
        let map: Map<String, Value> = keys
            .iter()
            .map(|key| ((*key).to_string(), Value::String(format!("{key} message"))))
            .collect();
        let text = serde_json::to_string_pretty(&map).expect("serialize catalog");
        fs::write(&self.catalog, text).expect("write catalog");
        self
    }

    /// Preset document path.
    pub fn preset_path(&self) -> &Path {
        &self.preset
    }

    /// Catalog document path.
    pub fn catalog_path(&self) -> &Path {
        &self.catalog
    }

    /// Raw preset text as currently on disk.
    pub fn read_preset_text(&self) -> String {
        fs::read_to_string(&self.preset).expect("read preset")
    }

    /// Parsed preset as currently on disk.
    pub fn read_preset(&self) -> Value {
        serde_json::from_str(&self.read_preset_text()).expect("parse preset")
    }

    /// Config pointing at the fixture files.
    pub fn config(&self) -> Config {
        Config {
            preset: self.preset.clone(),
            catalog: self.catalog.clone(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Default for PresetFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn writes_preset_and_catalog() {
        let fixture = PresetFixture::new()
            .with_preset(&json!({ "noCategory": [valid_channel("g")] }))
            .with_catalog(&["welcome"]);

        assert!(fixture.preset_path().exists());
        assert_eq!(fixture.read_preset()["noCategory"][0]["key"], json!("g"));
        let catalog: Value =
            serde_json::from_str(&fs::read_to_string(fixture.catalog_path()).expect("read"))
                .expect("parse");
        assert!(catalog.get("welcome").is_some());
    }

    #[test]
    fn scripted_answers_run_in_order() {
        let mut prompter = ScriptedPrompter::answers([true, false]);
        assert!(prompter.confirm("one").expect("answer"));
        assert!(!prompter.confirm("two").expect("answer"));
        assert_eq!(prompter.questions(), ["one", "two"]);
    }
}
