//! Per-channel validation and operator-approved repair.
//!
//! Checks run in a fixed order: unknown top-level keys are repaired first so
//! later checks see canonical names, then required fields and enumerated
//! values, then the nested role, webhook, message key and forum blocks.

use std::io::Write;

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    catalog::MessageCatalog,
    console::Console,
    document::rename_key,
    error::Result,
    issue::{Issue, IssueRecord},
    palette::Tone,
    prompt::Prompter,
    schema::{
        CHANNEL_FIELDS, CHANNEL_TYPES, FORUM_FIELDS, FieldSet, ForumValueKind, PERMISSION_KEYS,
        REQUIRED_CHANNEL_FIELDS, ROLE_FIELDS, WEBHOOK_FIELDS, is_forum_type,
    },
    suggest::Suggester,
};

/// Question asked before every repair.
const AUTOFIX_QUESTION: &str = "💡 Autofix it?";

/// Where a set of keys lives, which decides how repairs are reported.
#[derive(Debug, Clone, Copy)]
enum KeyScope {
    /// Top level of a channel.
    Channel,
    /// A role record, numbered from one.
    Role(usize),
    /// The webhook record.
    Webhook,
}

impl KeyScope {
    /// Noun used in the live warning line.
    fn noun(self) -> &'static str {
        match self {
            Self::Channel => "key",
            Self::Role(_) => "role key",
            Self::Webhook => "webhook key",
        }
    }

    /// Note recorded for an accepted rename.
    fn fixed(self, key: &str, suggestion: &str) -> String {
        match self {
            Self::Channel => format!("Fixed '{key}' → '{suggestion}'"),
            Self::Role(_) => format!("Fixed role key '{key}' → '{suggestion}'"),
            Self::Webhook => format!("Fixed webhook key '{key}' → '{suggestion}'"),
        }
    }

    /// Note recorded for a declined rename.
    fn rejected(self, key: &str, suggestion: &str) -> String {
        match self {
            Self::Channel => format!("Unrecognized field '{key}', suggested: '{suggestion}'"),
            Self::Role(n) => format!("Role #{n} unrecognized key '{key}', suggested: '{suggestion}'"),
            Self::Webhook => format!("Webhook unrecognized key '{key}', suggested: '{suggestion}'"),
        }
    }

    /// Note recorded for a key with no close match.
    fn unknown(self, key: &str) -> String {
        match self {
            Self::Channel => format!("Unknown field '{key}' is not expected in channel definition."),
            Self::Role(n) => format!("Role #{n} unknown key '{key}'"),
            Self::Webhook => format!("Unknown webhook key '{key}' is not expected."),
        }
    }
}

/// An enumerated channel field with fuzzy repair.
#[derive(Debug, Clone, Copy)]
struct EnumField {
    /// Channel key holding the value.
    field: &'static str,
    /// Legal values.
    values: FieldSet,
    /// Lead-in for reports about an illegal value.
    invalid: &'static str,
    /// Lead-in for the confirmation of a legal value.
    valid: &'static str,
}

/// The channel `type` field.
const TYPE_FIELD: EnumField = EnumField {
    field: "type",
    values: CHANNEL_TYPES,
    invalid: "Invalid type",
    valid: "Valid type",
};

/// The channel `permissionKey` field.
const PERMISSION_FIELD: EnumField = EnumField {
    field: "permissionKey",
    values: PERMISSION_KEYS,
    invalid: "Unknown permissionKey",
    valid: "Valid permissionKey",
};

/// Render a scalar for reports: strings bare, everything else as JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Validates channel mappings, asking before each repair.
pub struct ChannelValidator<'a, W: Write> {
    /// Fuzzy matcher for unknown tokens.
    suggester: Suggester,
    /// Legal message keys.
    catalog: &'a MessageCatalog,
    /// Approves or declines repairs.
    prompter: &'a mut dyn Prompter,
    /// Progress output.
    console: &'a mut Console<W>,
}

impl<'a, W: Write> ChannelValidator<'a, W> {
    /// Create a validator.
    pub fn new(
        suggester: Suggester,
        catalog: &'a MessageCatalog,
        prompter: &'a mut dyn Prompter,
        console: &'a mut Console<W>,
    ) -> Self {
        Self {
            suggester,
            catalog,
            prompter,
            console,
        }
    }

    /// Progress output shared with the traversal.
    pub(crate) fn console(&mut self) -> &mut Console<W> {
        &mut *self.console
    }

    /// Validate one channel, mutating it only through accepted repairs.
    ///
    /// Returns `None` when nothing was recorded. Accepted repairs are recorded
    /// too, so a fully repaired channel still yields a record.
    pub fn validate(&mut self, channel: &mut Value, path: &str) -> Result<Option<IssueRecord>> {
        self.console
            .segments(&[(Tone::Heading, "🔎 Validating: "), (Tone::Identifier, path)])?;
        let mut issues = Vec::new();

        if let Some(map) = channel.as_object_mut() {
            self.check_channel(map, &mut issues)?;
        } else {
            issues.push(Issue::error("Channel definition must be an object"));
        }

        self.finish(path, issues)
    }

    /// Run every check against a channel mapping.
    fn check_channel(&mut self, map: &mut Map<String, Value>, issues: &mut Vec<Issue>) -> Result<()> {
        self.repair_keys(map, CHANNEL_FIELDS, KeyScope::Channel, issues)?;
        self.check_required(map, issues)?;
        self.check_enum(map, TYPE_FIELD, issues)?;
        self.check_enum(map, PERMISSION_FIELD, issues)?;
        self.check_roles(map, issues)?;
        self.check_webhook(map, issues)?;
        self.check_message_key(map, issues)?;
        if is_forum_type(map.get("type")) {
            self.check_forum(map, issues)?;
        }
        Ok(())
    }

    /// Offer renames for keys outside `fields`.
    fn repair_keys(
        &mut self,
        map: &mut Map<String, Value>,
        fields: FieldSet,
        scope: KeyScope,
        issues: &mut Vec<Issue>,
    ) -> Result<()> {
        let unknown: Vec<String> = map
            .keys()
            .filter(|key| !fields.contains(key))
            .cloned()
            .collect();

        for key in unknown {
            let Some(suggestion) = self.suggester.suggest(&key, fields) else {
                issues.push(Issue::warning(scope.unknown(&key)));
                continue;
            };

            let replaces = if map.contains_key(suggestion) {
                format!(" (replaces existing '{suggestion}')")
            } else {
                String::new()
            };
            self.console.line(
                Tone::Warning,
                &format!(
                    "⚠ Unrecognized {} '{key}' — did you mean '{suggestion}'?{replaces}",
                    scope.noun()
                ),
            )?;

            if self.ask()? {
                rename_key(map, &key, suggestion);
                let note = scope.fixed(&key, suggestion);
                debug!(%note, "applied key repair");
                self.console.line(Tone::Success, &format!("  🔧 {note}"))?;
                issues.push(Issue::fixed(note));
            } else {
                issues.push(Issue::warning(scope.rejected(&key, suggestion)));
            }
        }
        Ok(())
    }

    /// Record a single error listing absent required fields.
    fn check_required(&mut self, map: &Map<String, Value>, issues: &mut Vec<Issue>) -> Result<()> {
        let missing = REQUIRED_CHANNEL_FIELDS.missing_from(map);
        if missing.is_empty() {
            self.console
                .line(Tone::Success, "  ✔ All required fields present.")?;
        } else {
            issues.push(Issue::error(format!("Missing required fields: {missing}")));
        }
        Ok(())
    }

    /// Check an enumerated field, offering a replacement for illegal strings.
    fn check_enum(
        &mut self,
        map: &mut Map<String, Value>,
        target: EnumField,
        issues: &mut Vec<Issue>,
    ) -> Result<()> {
        let Some(value) = map.get(target.field) else {
            return Ok(());
        };
        let shown = display_value(value);

        if let Some(text) = value.as_str()
            && target.values.contains(text)
        {
            self.console
                .line(Tone::Success, &format!("  ✔ {}: {shown}", target.valid))?;
            return Ok(());
        }

        let suggestion = value
            .as_str()
            .and_then(|text| self.suggester.suggest(text, target.values));
        let Some(suggestion) = suggestion else {
            issues.push(Issue::error(format!("{}: {shown}", target.invalid)));
            return Ok(());
        };

        self.console.line(
            Tone::Warning,
            &format!(
                "⚠ {} '{shown}' — did you mean '{suggestion}'?",
                target.invalid
            ),
        )?;
        if self.ask()? {
            map.insert(target.field.to_string(), Value::String(suggestion.to_string()));
            let note = format!("Fixed {} '{shown}' → '{suggestion}'", target.field);
            debug!(%note, "applied value repair");
            self.console.line(Tone::Success, &format!("  🔧 {note}"))?;
            issues.push(Issue::fixed(note));
        } else {
            issues.push(Issue::error(format!(
                "{}: {shown} (suggested: {suggestion})",
                target.invalid
            )));
        }
        Ok(())
    }

    /// Check the role block, which may be one record or a sequence of them.
    ///
    /// A single record stays a single record; only iteration treats it as a
    /// one-element sequence.
    fn check_roles(&mut self, map: &mut Map<String, Value>, issues: &mut Vec<Issue>) -> Result<()> {
        let Some(role) = map.get_mut("role") else {
            return Ok(());
        };
        self.console.line(Tone::Plain, "  ↪ Validating role...")?;

        match role {
            Value::Array(roles) => {
                for (index, role) in roles.iter_mut().enumerate() {
                    self.check_role(role, index + 1, issues)?;
                }
            }
            single => self.check_role(single, 1, issues)?,
        }
        Ok(())
    }

    /// Check one role record.
    fn check_role(&mut self, role: &mut Value, number: usize, issues: &mut Vec<Issue>) -> Result<()> {
        let Some(role) = role.as_object_mut() else {
            issues.push(Issue::error(format!("Role #{number} must be an object")));
            return Ok(());
        };

        self.repair_keys(role, ROLE_FIELDS, KeyScope::Role(number), issues)?;
        let missing = ROLE_FIELDS.missing_from(role);
        if missing.is_empty() {
            self.console
                .line(Tone::Success, &format!("    ✔ Role #{number} is valid."))?;
        } else {
            issues.push(Issue::warning(format!("Role #{number} missing: {missing}")));
        }
        Ok(())
    }

    /// Check the webhook record.
    fn check_webhook(&mut self, map: &mut Map<String, Value>, issues: &mut Vec<Issue>) -> Result<()> {
        let Some(webhook) = map.get_mut("webhook") else {
            return Ok(());
        };
        self.console.line(Tone::Plain, "  ↪ Validating webhook...")?;

        let Some(webhook) = webhook.as_object_mut() else {
            issues.push(Issue::error("Webhook must be an object"));
            return Ok(());
        };

        self.repair_keys(webhook, WEBHOOK_FIELDS, KeyScope::Webhook, issues)?;
        let missing = WEBHOOK_FIELDS.missing_from(webhook);
        if missing.is_empty() {
            self.console.line(Tone::Success, "    ✔ Webhook is valid.")?;
        } else {
            issues.push(Issue::warning(format!("Webhook missing fields: {missing}")));
        }
        Ok(())
    }

    /// Cross-reference `messageKey` against the catalog. Never repaired.
    fn check_message_key(&mut self, map: &Map<String, Value>, issues: &mut Vec<Issue>) -> Result<()> {
        let Some(value) = map.get("messageKey") else {
            return Ok(());
        };
        let shown = display_value(value);

        match value.as_str() {
            Some(key) if self.catalog.contains(key) => {
                self.console
                    .line(Tone::Success, &format!("  ✔ messageKey '{shown}' is valid."))?;
            }
            _ => issues.push(Issue::error(format!(
                "messageKey '{shown}' not found in {}",
                self.catalog.source()
            ))),
        }
        Ok(())
    }

    /// Check the `forumOptions` block of a forum channel.
    fn check_forum(&mut self, map: &Map<String, Value>, issues: &mut Vec<Issue>) -> Result<()> {
        self.console.line(Tone::Plain, "  ↪ Validating forumOptions...")?;

        let empty = Map::new();
        let forum = match map.get("forumOptions") {
            None => &empty,
            Some(Value::Object(forum)) => forum,
            Some(_) => {
                issues.push(Issue::error("forumOptions must be an object"));
                return Ok(());
            }
        };

        let missing = FORUM_FIELDS.missing_from(forum);
        if !missing.is_empty() {
            issues.push(Issue::error(format!(
                "Missing forumOptions fields: {missing}"
            )));
        }

        for field in FORUM_FIELDS.iter() {
            if let Some(value) = forum.get(field)
                && let Some(kind) = ForumValueKind::of(field)
                && !kind.accepts(value)
            {
                issues.push(Issue::error(format!(
                    "forumOptions.{field} must be {}",
                    kind.describe()
                )));
            }
        }
        Ok(())
    }

    /// Ask the operator to approve the repair just described.
    fn ask(&mut self) -> Result<bool> {
        self.console.flush()?;
        self.prompter.confirm(AUTOFIX_QUESTION)
    }

    /// Print the channel verdict and build its record.
    fn finish(&mut self, path: &str, issues: Vec<Issue>) -> Result<Option<IssueRecord>> {
        if issues.is_empty() {
            self.console
                .line(Tone::Success, "  ✅ Channel passed all checks.")?;
            self.console.blank()?;
            return Ok(None);
        }

        self.console.line(Tone::Warning, "  ⚠ Issues found:")?;
        for issue in &issues {
            self.console.line(
                Tone::for_severity(issue.severity),
                &format!("    {issue}"),
            )?;
        }
        self.console.blank()?;

        Ok(Some(IssueRecord {
            path: path.to_string(),
            issues,
        }))
    }
}
