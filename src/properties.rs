//! Property tests over generated presets with known, repairable typos.

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use crate::{
    catalog::MessageCatalog,
    console::Console,
    schema::{CHANNEL_FIELDS, CHANNEL_TYPES, FieldSet, PERMISSION_KEYS, ROLE_FIELDS, WEBHOOK_FIELDS},
    suggest::Suggester,
    testutil::ScriptedPrompter,
    traverse::{Traversal, check_shape, traverse},
    validator::ChannelValidator,
};

/// A channel key with no close match among legal fields.
const NOISE_KEY: &str = "colour";

/// Pick the legal spelling or a typo that the default threshold repairs.
fn spelled(legal: &'static str, typo: &'static str) -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(legal), Just(typo)]
}

fn role() -> impl Strategy<Value = Value> {
    (
        spelled("name", "nme"),
        spelled("mentionable", "mentionabl"),
        spelled("color", "colr"),
    )
        .prop_map(|(name, mentionable, color)| {
            let mut map = Map::new();
            map.insert(name.into(), json!("Member"));
            map.insert(mentionable.into(), json!(true));
            map.insert(color.into(), json!("#00ff00"));
            Value::Object(map)
        })
}

fn webhook() -> impl Strategy<Value = Value> {
    (spelled("enabled", "enabld"), spelled("key", "ky")).prop_map(|(enabled, key)| {
        let mut map = Map::new();
        map.insert(enabled.into(), json!(true));
        map.insert(key.into(), json!("hook"));
        map.insert("name".into(), json!("Hook"));
        Value::Object(map)
    })
}

fn channel() -> impl Strategy<Value = Value> {
    let fields = (
        spelled("key", "ky"),
        spelled("name", "nam"),
        spelled("type", "tpye"),
        spelled("permissionKey", "permissionKy"),
    );
    let values = (
        prop::sample::select(vec!["GuildText", "GuildVoice", "GuildTxt", "GuildVoic", "GuildAnnouncment"]),
        prop::sample::select(vec!["publicWrite", "clanOnly", "publicWrit", "staffOnl", "clanOly"]),
    );
    let extras = (
        prop::option::of(spelled("topic", "topc")),
        prop::option::of((spelled("messageKey", "messageKe"), prop::sample::select(vec!["welcome", "rules"]))),
        prop::option::of((spelled("webhook", "webhoo"), webhook())),
        prop::option::of(prop_oneof![role(), prop::collection::vec(role(), 2..4).prop_map(Value::Array)]),
        any::<bool>(),
    );

    (fields, values, extras).prop_map(
        |((key, name, kind, permission), (kind_value, permission_value), (topic, message, hook, roles, noise))| {
            let mut map = Map::new();
            map.insert(key.into(), json!("chan"));
            map.insert(name.into(), json!("Chan"));
            map.insert(kind.into(), json!(kind_value));
            map.insert(permission.into(), json!(permission_value));
            if let Some(topic) = topic {
                map.insert(topic.into(), json!("About"));
            }
            if let Some((field, value)) = message {
                map.insert(field.into(), json!(value));
            }
            if let Some((field, value)) = hook {
                map.insert(field.into(), value);
            }
            if let Some(roles) = roles {
                map.insert("role".into(), roles);
            }
            if noise {
                map.insert(NOISE_KEY.into(), json!("#fff"));
            }
            Value::Object(map)
        },
    )
}

fn preset() -> impl Strategy<Value = Value> {
    let category = (
        "[A-Z][a-z]{2,8}",
        prop::collection::vec(channel(), 0..3),
    )
        .prop_map(|(name, channels)| json!({ "name": name, "channels": channels }));
    (
        prop::collection::vec(channel(), 0..3),
        prop::collection::vec(category, 0..3),
    )
        .prop_map(|(loose, categories)| json!({ "noCategory": loose, "categories": categories }))
}

fn lint(root: &mut Value, prompter: &mut ScriptedPrompter) -> Traversal {
    check_shape(root).expect("generated presets are well formed");
    let catalog = MessageCatalog::from_keys(["welcome", "rules"]);
    let mut console = Console::new(Vec::new(), false);
    let mut validator = ChannelValidator::new(Suggester::default(), &catalog, prompter, &mut console);
    traverse(root, &mut validator).expect("traverse")
}

fn channels(root: &Value) -> Vec<&Value> {
    let loose = root["noCategory"].as_array().into_iter().flatten();
    let nested = root["categories"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|category| category["channels"].as_array())
        .flatten();
    loose.chain(nested).collect()
}

fn keys_within(value: &Value, fields: FieldSet) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.keys().all(|key| fields.contains(key)))
}

fn roles(channel: &Value) -> Vec<&Value> {
    match channel.get("role") {
        Some(Value::Array(roles)) => roles.iter().collect(),
        Some(role) => vec![role],
        None => Vec::new(),
    }
}

proptest! {
    /// Accepting every repair leaves only legal keys and values behind.
    #[test]
    fn accepted_repairs_leave_legal_tokens(mut root in preset()) {
        lint(&mut root, &mut ScriptedPrompter::accept_all());

        for channel in channels(&root) {
            let map = channel.as_object().expect("channel mapping");
            prop_assert!(map.keys().all(|key| CHANNEL_FIELDS.contains(key) || key == NOISE_KEY));
            prop_assert!(CHANNEL_TYPES.contains(channel["type"].as_str().expect("type")));
            prop_assert!(PERMISSION_KEYS.contains(channel["permissionKey"].as_str().expect("permission")));
            if let Some(hook) = channel.get("webhook") {
                prop_assert!(keys_within(hook, WEBHOOK_FIELDS));
            }
            for role in roles(channel) {
                prop_assert!(keys_within(role, ROLE_FIELDS));
            }
        }
    }

    /// A second run over a fully repaired preset has nothing left to fix.
    #[test]
    fn repairs_are_idempotent(mut root in preset()) {
        lint(&mut root, &mut ScriptedPrompter::accept_all());
        let repaired = root.clone();

        let mut prompter = ScriptedPrompter::answers([]);
        let second = lint(&mut root, &mut prompter);

        prop_assert!(prompter.questions().is_empty());
        prop_assert!(!second.has_fixes());
        prop_assert_eq!(&root, &repaired);
        let noisy = channels(&root).iter().any(|channel| channel.get(NOISE_KEY).is_some());
        prop_assert_eq!(second.records.is_empty(), !noisy);
    }

    /// Declining every repair leaves the document untouched.
    #[test]
    fn declined_repairs_change_nothing(mut root in preset()) {
        let original = root.clone();
        let traversal = lint(&mut root, &mut ScriptedPrompter::reject_all());

        prop_assert_eq!(&root, &original);
        prop_assert!(!traversal.has_fixes());
    }

    /// Every channel in every section is counted exactly once.
    #[test]
    fn counts_every_channel(mut root in preset()) {
        let expected = channels(&root).len();
        let with_channels = root["categories"]
            .as_array()
            .map_or(0, |categories| {
                categories
                    .iter()
                    .filter(|category| category["channels"].as_array().is_some_and(|c| !c.is_empty()))
                    .count()
            });

        let traversal = lint(&mut root, &mut ScriptedPrompter::reject_all());

        prop_assert_eq!(traversal.counters.channels, expected);
        prop_assert_eq!(traversal.counters.categories_with_channels, with_channels);
    }
}
