//! Walks a preset's sections and reports the results.

use std::{io::Write, result::Result as StdResult};

use serde_json::Value;
use tracing::debug;

use crate::{
    catalog::MessageCatalog,
    console::Console,
    error::Result,
    issue::{IssueRecord, breadcrumb},
    palette::Tone,
    validator::{ChannelValidator, display_value},
};

/// Section holding channels outside any category.
pub const NO_CATEGORY: &str = "noCategory";

/// Section holding categories.
pub const CATEGORIES: &str = "categories";

/// Name shown for a category without one.
const UNNAMED_CATEGORY: &str = "Unnamed Category";

/// Tallies gathered during a traversal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    /// Categories seen.
    pub categories: usize,
    /// Categories holding at least one channel.
    pub categories_with_channels: usize,
    /// Channels seen, with or without a category.
    pub channels: usize,
    /// Role records, counting each element of a role sequence.
    pub roles: usize,
    /// Channels with a webhook.
    pub webhooks: usize,
    /// Channels referencing a message key.
    pub message_keys: usize,
}

impl Counters {
    /// Count one channel and the blocks it carries.
    fn tally(&mut self, channel: &Value) {
        self.channels += 1;
        match channel.get("role") {
            Some(Value::Array(roles)) => self.roles += roles.len(),
            Some(_) => self.roles += 1,
            None => {}
        }
        if channel.get("webhook").is_some() {
            self.webhooks += 1;
        }
        if channel.get("messageKey").is_some() {
            self.message_keys += 1;
        }
    }
}

/// Outcome of validating every channel in a preset.
#[derive(Debug, Default, Clone)]
pub struct Traversal {
    /// Tallies for the summary.
    pub counters: Counters,
    /// Records for channels that produced notes, in traversal order.
    pub records: Vec<IssueRecord>,
}

impl Traversal {
    /// Whether any accepted repair changed the document.
    pub fn has_fixes(&self) -> bool {
        self.records.iter().any(IssueRecord::has_fixes)
    }

    /// Keep a channel's record, if it produced one.
    fn record(&mut self, record: Option<IssueRecord>) {
        let Some(record) = record else {
            return;
        };
        debug!(
            path = %record.path,
            fixed = record.has_fixes(),
            unresolved = record.has_problems(),
            "channel recorded"
        );
        self.records.push(record);
    }
}

/// Check that the sections the traversal walks have the expected shape.
///
/// Runs before any channel is validated so a malformed preset is rejected
/// without prompting.
pub fn check_shape(root: &Value) -> StdResult<(), String> {
    let Some(root) = root.as_object() else {
        return Err("top level must be a mapping".to_string());
    };
    if let Some(section) = root.get(NO_CATEGORY)
        && !section.is_array()
    {
        return Err(format!("`{NO_CATEGORY}` must be a sequence"));
    }
    let Some(categories) = root.get(CATEGORIES) else {
        return Ok(());
    };
    let Some(categories) = categories.as_array() else {
        return Err(format!("`{CATEGORIES}` must be a sequence"));
    };
    for (index, category) in categories.iter().enumerate() {
        let Some(category) = category.as_object() else {
            return Err(format!("`{CATEGORIES}[{index}]` must be a mapping"));
        };
        if let Some(channels) = category.get("channels")
            && !channels.is_array()
        {
            return Err(format!("`{CATEGORIES}[{index}].channels` must be a sequence"));
        }
    }
    Ok(())
}

/// Label a channel by name, then key, then `unknown`.
fn channel_label(channel: &Value) -> String {
    channel
        .get("name")
        .or_else(|| channel.get("key"))
        .map(display_value)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Validate every channel under `noCategory`, then under each category.
///
/// The tree must already have passed [`check_shape`].
pub fn traverse<W: Write>(
    root: &mut Value,
    validator: &mut ChannelValidator<'_, W>,
) -> Result<Traversal> {
    let mut traversal = Traversal::default();

    validator
        .console()
        .line(Tone::Heading, "📂 Validating `noCategory` channels...")?;
    validator.console().blank()?;
    if let Some(Value::Array(channels)) = root.get_mut(NO_CATEGORY) {
        for channel in channels.iter_mut() {
            traversal.counters.tally(channel);
            let path = breadcrumb(NO_CATEGORY, &channel_label(channel));
            traversal.record(validator.validate(channel, &path)?);
        }
    }

    validator.console().blank()?;
    validator
        .console()
        .line(Tone::Heading, "📂 Validating `categories`...")?;
    if let Some(Value::Array(categories)) = root.get_mut(CATEGORIES) {
        for category in categories.iter_mut() {
            traversal.counters.categories += 1;
            let name = category
                .get("name")
                .map(display_value)
                .unwrap_or_else(|| UNNAMED_CATEGORY.to_string());
            validator.console().blank()?;
            validator
                .console()
                .segments(&[(Tone::Heading, "📁 Category: "), (Tone::Plain, &name)])?;

            let Some(Value::Array(channels)) = category.get_mut("channels") else {
                continue;
            };
            if !channels.is_empty() {
                traversal.counters.categories_with_channels += 1;
            }
            for channel in channels.iter_mut() {
                traversal.counters.tally(channel);
                let path = breadcrumb(&name, &channel_label(channel));
                traversal.record(validator.validate(channel, &path)?);
            }
        }
    }

    Ok(traversal)
}

/// Print the counters and the detailed issue breakdown.
pub fn print_summary<W: Write>(
    console: &mut Console<W>,
    traversal: &Traversal,
    catalog: &MessageCatalog,
) -> Result<()> {
    let counters = &traversal.counters;
    console.blank()?;
    console.line(Tone::Heading, "📊 Validation complete.")?;
    for (label, count) in [
        ("Total categories validated", counters.categories),
        ("Categories with channels", counters.categories_with_channels),
        ("Total channels validated", counters.channels),
        ("Total roles validated", counters.roles),
        ("Total webhooks validated", counters.webhooks),
        ("Total message keys validated", counters.message_keys),
    ] {
        console.line(Tone::Success, &format!("{label}: {count}"))?;
    }

    if !catalog.is_available() {
        console.line(
            Tone::WarningHeading,
            &format!(
                "⚠ Message catalog {} was unavailable; every messageKey was reported as unknown.",
                catalog.source()
            ),
        )?;
    }

    if traversal.records.is_empty() {
        console.line(Tone::Success, "🎉 All channels passed validation!")?;
        return Ok(());
    }

    console.line(
        Tone::Error,
        &format!("❗ {} channel(s) have issues.", traversal.records.len()),
    )?;
    console.blank()?;
    console.line(Tone::WarningHeading, "Detailed Issue Breakdown:")?;
    for record in &traversal.records {
        console.blank()?;
        console.line(Tone::Identifier, &format!("• {}", record.path))?;
        for issue in &record.issues {
            console.line(
                Tone::for_severity(issue.severity),
                &format!("  - {issue}"),
            )?;
        }
    }
    Ok(())
}
