//! Option presets for common scenarios

use serde_json::Value;

use super::ConsoleOptions;
use crate::timestamp::DEFAULT_TEMPLATE;

fn flag(value: &str) -> bool {
    value != "0" && !value.eq_ignore_ascii_case("false")
}

impl ConsoleOptions {
    /// Options from environment variables
    ///
    /// - `BOTCONSOLE_COLOR`: `0`/`false` disables color, anything else forces it
    /// - `NO_COLOR`: when non-empty and `BOTCONSOLE_COLOR` is unset, disables color
    /// - `BOTCONSOLE_TIMESTAMPS`: `0`/`false` disables timestamps, `1`/`true`
    ///   selects the default template, any other value is used as the template
    /// - `BOTCONSOLE_UTC`: render timestamps in UTC
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::new();

        if let Some(v) = lookup("BOTCONSOLE_COLOR") {
            options = options.use_color(flag(&v));
        } else if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            options = options.use_color(false);
        }

        if let Some(v) = lookup("BOTCONSOLE_TIMESTAMPS") {
            options = match v.as_str() {
                "1" => options.timestamps(true),
                t if t.eq_ignore_ascii_case("true") => options.timestamps(true),
                t if !flag(t) => options.timestamps(false),
                template => options.timestamp_template(template),
            };
        }

        if let Some(v) = lookup("BOTCONSOLE_UTC") {
            options = options.utc(flag(&v));
        }

        options
    }

    /// No color, no timestamps: output is exactly the flattened text
    #[must_use]
    pub fn plain() -> Self {
        Self::new().use_color(false).timestamps(false)
    }

    /// Color forced on with the default timestamp template
    #[must_use]
    pub fn development() -> Self {
        Self::new()
            .use_color(true)
            .set("timestampTemplate", Value::from(DEFAULT_TEMPLATE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> ConsoleOptions {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ConsoleOptions::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_sets_nothing() {
        assert_eq!(from_vars(&[]).to_value(), json!({}));
    }

    #[rstest]
    #[case(&[("BOTCONSOLE_COLOR", "false")], json!({"useColor": false}))]
    #[case(&[("BOTCONSOLE_COLOR", "1")], json!({"useColor": true}))]
    #[case(&[("NO_COLOR", "1")], json!({"useColor": false}))]
    #[case(&[("NO_COLOR", "")], json!({}))]
    #[case(&[("NO_COLOR", "1"), ("BOTCONSOLE_COLOR", "true")], json!({"useColor": true}))]
    #[case(&[("BOTCONSOLE_TIMESTAMPS", "0")], json!({"timestampTemplate": false}))]
    #[case(&[("BOTCONSOLE_TIMESTAMPS", "TRUE")], json!({"timestampTemplate": true}))]
    #[case(
        &[("BOTCONSOLE_TIMESTAMPS", "HH:mm"), ("BOTCONSOLE_UTC", "1")],
        json!({"timestampTemplate": "HH:mm", "utc": true})
    )]
    fn environment_variables(#[case] vars: &[(&str, &str)], #[case] expected: Value) {
        assert_eq!(from_vars(vars).to_value(), expected);
    }

    #[test]
    fn plain_preset_resolves() {
        let config = ConsoleOptions::plain().resolve().unwrap();
        assert_eq!(config.use_color, Some(false));
        assert_eq!(config.timestamp_template(), None);
    }

    #[test]
    fn development_preset_resolves() {
        let config = ConsoleOptions::development().resolve().unwrap();
        assert_eq!(config.use_color, Some(true));
        assert_eq!(config.timestamp_template().as_deref(), Some(DEFAULT_TEMPLATE));
    }
}
