//! The closed schema that preset channels are checked against.
//!
//! Every legal field name and enumerated value lives here so the suggester
//! and the validator agree on a single source of truth.

use std::fmt;

use serde_json::{Map, Value};

/// An immutable, ordered set of legal tokens.
///
/// Declaration order is significant: it is the order used when reporting
/// missing members and when breaking ties between equally close suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet {
    /// Members in declaration order.
    members: &'static [&'static str],
}

impl FieldSet {
    /// Build a set from a static member list.
    pub(crate) const fn new(members: &'static [&'static str]) -> Self {
        Self { members }
    }

    /// Whether `token` is a member of the set.
    pub fn contains(&self, token: &str) -> bool {
        self.members.contains(&token)
    }

    /// Iterate members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.members.iter().copied()
    }

    /// Members of this set that are absent from `map`, in declaration order.
    pub fn missing_from(&self, map: &Map<String, Value>) -> Missing {
        Missing(
            self.iter()
                .filter(|field| !map.contains_key(*field))
                .collect(),
        )
    }
}

/// A list of missing field names, rendered as a comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missing(Vec<&'static str>);

impl Missing {
    /// Whether nothing is missing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The missing names in declaration order.
    #[cfg(test)]
    pub(crate) fn names(&self) -> &[&'static str] {
        &self.0
    }
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Legal top-level keys of a channel.
pub const CHANNEL_FIELDS: FieldSet = FieldSet::new(&[
    "key",
    "name",
    "type",
    "topic",
    "permissionKey",
    "role",
    "webhook",
    "messageKey",
    "forumOptions",
]);

/// Keys every channel must carry.
pub const REQUIRED_CHANNEL_FIELDS: FieldSet =
    FieldSet::new(&["key", "name", "type", "permissionKey"]);

/// Legal keys of a role record. All of them are expected.
pub const ROLE_FIELDS: FieldSet = FieldSet::new(&["name", "mentionable", "color"]);

/// Legal keys of a webhook record. All of them are expected.
pub const WEBHOOK_FIELDS: FieldSet = FieldSet::new(&["enabled", "key", "name"]);

/// Legal keys of a forum channel's `forumOptions` block.
pub const FORUM_FIELDS: FieldSet = FieldSet::new(&[
    "tags",
    "defaultReactionEmoji",
    "slowmode",
    "nsfw",
    "guidelines",
]);

/// Channel type that requires a `forumOptions` block.
pub const FORUM_CHANNEL_TYPE: &str = "GuildForum";

/// Legal values of a channel's `type`.
pub const CHANNEL_TYPES: FieldSet = FieldSet::new(&[
    "GuildText",
    "GuildVoice",
    "GuildAnnouncement",
    FORUM_CHANNEL_TYPE,
    "GuildStageVoice",
    "GuildDirectory",
]);

/// Legal values of a channel's `permissionKey`.
pub const PERMISSION_KEYS: FieldSet = FieldSet::new(&[
    "publicReadOnly",
    "publicWrite",
    "staffOnly",
    "modOnly",
    "voiceReadNoJoin",
    "voiceSpeakOnly",
    "readAndReactOnly",
    "feedbackWriteOnly",
    "teamOnly",
    "donatorOnly",
    "adultOnly",
    "designerOnly",
    "customRoleOnly",
    "verifiedReadOnly",
    "verifiedWrite",
    "verifiedReadReact",
    "premiumOnly",
    "clanOnly",
]);

/// Whether a channel `type` value denotes a forum channel.
pub fn is_forum_type(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str) == Some(FORUM_CHANNEL_TYPE)
}

/// Expected JSON shape of a `forumOptions` sub-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForumValueKind {
    /// A sequence.
    List,
    /// An integer.
    Integer,
    /// A boolean.
    Boolean,
    /// A string.
    String,
    /// Anything goes.
    Text,
}

impl ForumValueKind {
    /// The expected kind of a forum sub-field, if it is a known field.
    pub fn of(field: &str) -> Option<Self> {
        match field {
            "tags" => Some(Self::List),
            "slowmode" => Some(Self::Integer),
            "nsfw" => Some(Self::Boolean),
            "defaultReactionEmoji" => Some(Self::String),
            "guidelines" => Some(Self::Text),
            _ => None,
        }
    }

    /// Whether `value` has this kind.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::List => value.is_array(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::String => value.is_string(),
            Self::Text => true,
        }
    }

    /// Human description used in type mismatch reports.
    pub fn describe(self) -> &'static str {
        match self {
            Self::List => "a list",
            Self::Integer => "an integer",
            Self::Boolean => "a boolean",
            Self::String => "a string",
            Self::Text => "text",
        }
    }
}
