//! Configuration types
//!
//! Caller options are a JSON object merged over the [defaults table] and then
//! deserialised into a typed [`ConsoleConfig`]. Keys are camelCase:
//!
//! ```json
//! {
//!   "useColor": true,
//!   "timestampTemplate": "HH:mm:ss",
//!   "utc": false,
//!   "colorsByLevel": { "warn": { "time": { "text": "red" } } },
//!   "levelToChannel": { "warn": "error" }
//! }
//! ```
//!
//! [defaults table]: defaults::defaults

mod defaults;
mod merge;
mod presets;

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use defaults::defaults;
pub use merge::merge_default;

use crate::color::{FormatSpec, Style};
use crate::core::{ConsoleError, ConsoleResult};
use crate::level::{Channel, Level};
use crate::sink::SinkTarget;
use crate::timestamp::DEFAULT_TEMPLATE;

/// Effective configuration after merging.
///
/// Top-level keys it does not know are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Stream for normal-channel levels
    pub output_sink: SinkTarget,
    /// Stream for error-channel levels
    pub error_sink: SinkTarget,
    /// Explicit color choice; `None` detects it from the output sink
    #[serde(default)]
    pub use_color: Option<bool>,
    /// Timestamp template, `true` for the default one; `None` disables
    #[serde(default)]
    pub timestamp_template: Option<TimestampSetting>,
    /// Render timestamps in UTC instead of local time
    #[serde(default)]
    pub utc: bool,
    /// Level name to segment styles
    #[serde(default)]
    pub colors_by_level: Option<BTreeMap<String, LevelColors>>,
    /// Level name to channel
    #[serde(default)]
    pub level_to_channel: Option<BTreeMap<String, Channel>>,
}

/// `timestampTemplate` value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimestampSetting {
    /// `true` for the default template, `false` to disable
    Toggle(bool),
    /// Custom template
    Template(String),
}

/// Styles of the two segments of a line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelColors {
    /// The `[timestamp]` segment
    pub time: FormatSpec,
    /// The message segment
    pub message: FormatSpec,
}

impl ConsoleConfig {
    /// Template to compile, if timestamps are on
    pub fn timestamp_template(&self) -> Option<Cow<'_, str>> {
        match &self.timestamp_template {
            None | Some(TimestampSetting::Toggle(false)) => None,
            Some(TimestampSetting::Toggle(true)) => Some(Cow::Borrowed(DEFAULT_TEMPLATE)),
            Some(TimestampSetting::Template(template)) => Some(Cow::Borrowed(template)),
        }
    }

    /// Resolved `(time, message)` styles per level, in [`Level::ALL`] order.
    ///
    /// Levels without an entry are unstyled.
    pub fn level_styles(&self) -> ConsoleResult<[(Style, Style); Level::COUNT]> {
        let mut styles: [(Style, Style); Level::COUNT] = Default::default();
        for (name, colors) in self.colors_by_level.iter().flatten() {
            let level = level_key(name, "colorsByLevel")?;
            styles[level.index()] = (
                Style::from_spec(&colors.time)?,
                Style::from_spec(&colors.message)?,
            );
        }
        Ok(styles)
    }

    /// Channel per level, in [`Level::ALL`] order.
    ///
    /// Levels without an entry fall back to the normal channel.
    pub fn channels(&self) -> ConsoleResult<[Channel; Level::COUNT]> {
        let mut channels: [Option<Channel>; Level::COUNT] = [None; Level::COUNT];
        for (name, channel) in self.level_to_channel.iter().flatten() {
            channels[level_key(name, "levelToChannel")?.index()] = Some(*channel);
        }
        Ok(Level::ALL.map(|level| {
            channels[level.index()].unwrap_or_else(|| {
                tracing::debug!(%level, "no channel configured, using normal");
                Channel::Normal
            })
        }))
    }
}

/// A validated configuration with its per-level tables
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Merged configuration
    pub config: ConsoleConfig,
    /// `(time, message)` styles, in [`Level::ALL`] order
    pub styles: [(Style, Style); Level::COUNT],
    /// Channels, in [`Level::ALL`] order
    pub channels: [Channel; Level::COUNT],
}

fn level_key(name: &str, table: &str) -> ConsoleResult<Level> {
    name.parse()
        .map_err(|_| ConsoleError::configuration(format!("unknown level '{name}' in {table}")))
}

/// Caller overrides, merged over [`defaults`] at construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleOptions {
    overrides: Map<String, Value>,
}

impl ConsoleOptions {
    /// No overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides from a JSON object.
    ///
    /// `timestamps` is accepted as an alias of `timestampTemplate`.
    pub fn from_value(value: Value) -> ConsoleResult<Self> {
        match value {
            Value::Object(map) => Ok(map
                .into_iter()
                .fold(Self::new(), |options, (key, value)| options.set(&key, value))),
            Value::Null => Ok(Self::new()),
            other => Err(ConsoleError::configuration(format!(
                "options must be an object, got {other}"
            ))),
        }
    }

    /// Set a raw option
    #[must_use]
    pub fn set(mut self, key: &str, value: Value) -> Self {
        let key = match key {
            "timestamps" => "timestampTemplate",
            other => other,
        };
        self.overrides.insert(key.to_owned(), value);
        self
    }

    /// Force color on or off
    #[must_use]
    pub fn use_color(self, enabled: bool) -> Self {
        self.set("useColor", Value::Bool(enabled))
    }

    /// Detect color support from the output sink
    #[must_use]
    pub fn auto_color(self) -> Self {
        self.set("useColor", Value::Null)
    }

    /// Turn timestamps on (default template) or off
    #[must_use]
    pub fn timestamps(self, enabled: bool) -> Self {
        self.set("timestampTemplate", Value::Bool(enabled))
    }

    /// Use a custom timestamp template
    #[must_use]
    pub fn timestamp_template(self, template: impl Into<String>) -> Self {
        self.set("timestampTemplate", Value::String(template.into()))
    }

    /// Render timestamps in UTC
    #[must_use]
    pub fn utc(self, utc: bool) -> Self {
        self.set("utc", Value::Bool(utc))
    }

    /// Override the segment styles of one level.
    ///
    /// Nested fields merge with the level's defaults.
    #[must_use]
    pub fn level_colors(mut self, level: Level, colors: Value) -> Self {
        self.insert_nested("colorsByLevel", level, colors);
        self
    }

    /// Route a level to a channel
    #[must_use]
    pub fn level_channel(mut self, level: Level, channel: Channel) -> Self {
        self.insert_nested("levelToChannel", level, Value::from(channel.to_string()));
        self
    }

    fn insert_nested(&mut self, table: &str, level: Level, value: Value) {
        let mut entries = match self.overrides.remove(table) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        entries.insert(level.as_str().to_owned(), value);
        self.overrides.insert(table.to_owned(), Value::Object(entries));
    }

    /// Overrides as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(self.overrides.clone())
    }

    /// Merge over the defaults and deserialise
    pub fn resolve(&self) -> ConsoleResult<ConsoleConfig> {
        self.resolve_tables().map(|resolved| resolved.config)
    }

    /// Like [`resolve`](Self::resolve), keeping the per-level tables built
    /// while validating
    pub fn resolve_tables(&self) -> ConsoleResult<ResolvedConfig> {
        let merged = merge_default(&defaults(), &self.to_value());
        let config: ConsoleConfig = serde_json::from_value(merged)?;
        let styles = config.level_styles()?;
        let channels = config.channels()?;
        Ok(ResolvedConfig {
            config,
            styles,
            channels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn defaults_resolve() {
        let config = ConsoleOptions::new().resolve().unwrap();
        assert_eq!(config.output_sink, SinkTarget::Stdout);
        assert_eq!(config.error_sink, SinkTarget::Stderr);
        assert_eq!(config.use_color, None);
        assert_eq!(config.timestamp_template().as_deref(), Some(DEFAULT_TEMPLATE));
        assert!(!config.utc);
        assert_eq!(
            config.channels().unwrap(),
            [
                Channel::Normal,
                Channel::Normal,
                Channel::Error,
                Channel::Normal,
                Channel::Normal,
                Channel::Error,
            ]
        );
    }

    #[test]
    fn default_styles() {
        let styles = ConsoleOptions::new().resolve().unwrap().level_styles().unwrap();
        assert_eq!(styles[Level::Log.index()].0.open_sequence(), "\x1b[34m");
        assert!(styles[Level::Log.index()].1.is_plain());
        assert_eq!(styles[Level::Warn.index()].0.open_sequence(), "\x1b[30;103m");
        assert_eq!(styles[Level::Wtf.index()].1.open_sequence(), "\x1b[31m");
    }

    #[test]
    fn nested_color_override_keeps_sibling_defaults() {
        let config = ConsoleOptions::new()
            .level_colors(Level::Warn, json!({"time": {"text": "red"}}))
            .resolve()
            .unwrap();
        let styles = config.level_styles().unwrap();
        assert_eq!(styles[Level::Warn.index()].0.open_sequence(), "\x1b[31;103m");
    }

    #[test]
    fn string_spec_replaces_object_default() {
        let config = ConsoleOptions::new()
            .level_colors(Level::Log, json!({"message": ["bold", "green"]}))
            .resolve()
            .unwrap();
        let styles = config.level_styles().unwrap();
        assert_eq!(styles[Level::Log.index()].1.open_sequence(), "\x1b[1;32m");
    }

    #[rstest::rstest]
    #[case(json!(true), Some(DEFAULT_TEMPLATE))]
    #[case(json!(false), None)]
    #[case(json!(null), None)]
    #[case(json!("HH:mm"), Some("HH:mm"))]
    fn timestamp_settings(#[case] raw: Value, #[case] expected: Option<&str>) {
        let config = ConsoleOptions::new().set("timestamps", raw).resolve().unwrap();
        assert_eq!(config.timestamp_template().as_deref(), expected);
    }

    #[test]
    fn unknown_level_key_is_rejected() {
        let err = ConsoleOptions::new()
            .set("levelToChannel", json!({"fatal": "error"}))
            .resolve()
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("unknown level 'fatal' in levelToChannel"));
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = ConsoleOptions::new()
            .level_colors(Level::Debug, json!({"time": {"text": "octarine"}}))
            .resolve()
            .unwrap_err();
        assert!(err.to_string().contains("unknown color 'octarine'"));
    }

    #[test]
    fn bad_sink_target_is_rejected() {
        let err = ConsoleOptions::new()
            .set("outputSink", json!("printer"))
            .resolve()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn unknown_options_are_ignored() {
        let config = ConsoleOptions::new()
            .set("colour", json!(true))
            .set("prefix", json!({"text": "bot"}))
            .resolve()
            .unwrap();
        assert_eq!(config, ConsoleOptions::new().resolve().unwrap());
    }

    #[test]
    fn resolved_tables_match_config() {
        let resolved = ConsoleOptions::new()
            .level_channel(Level::Debug, Channel::Error)
            .resolve_tables()
            .unwrap();
        assert_eq!(resolved.channels, resolved.config.channels().unwrap());
        assert_eq!(resolved.channels[Level::Debug.index()], Channel::Error);
        assert_eq!(resolved.styles[Level::Warn.index()].0.open_sequence(), "\x1b[30;103m");
    }

    #[test]
    fn null_channel_table_falls_back_to_normal() {
        let config = ConsoleOptions::new()
            .set("levelToChannel", Value::Null)
            .resolve()
            .unwrap();
        assert_eq!(config.channels().unwrap(), [Channel::Normal; Level::COUNT]);
    }

    #[test]
    fn level_channel_override() {
        let config = ConsoleOptions::new()
            .level_channel(Level::Warn, Channel::Error)
            .resolve()
            .unwrap();
        assert_eq!(config.channels().unwrap()[Level::Warn.index()], Channel::Error);
    }

    #[test]
    fn from_value_accepts_objects_only() {
        let options = ConsoleOptions::from_value(json!({"timestamps": false, "utc": true})).unwrap();
        assert_eq!(options.to_value(), json!({"timestampTemplate": false, "utc": true}));
        assert!(ConsoleOptions::from_value(json!([1])).is_err());
        assert_eq!(ConsoleOptions::from_value(Value::Null).unwrap(), ConsoleOptions::new());
    }
}
