//! Built-in defaults table

use serde_json::{Map, Value, json};

use crate::level::Level;

/// The table caller options are merged over.
///
/// Sinks are the standard streams, color is auto-detected, timestamps use
/// the default template in local time.
pub fn defaults() -> Value {
    let channels: Map<String, Value> = Level::ALL
        .into_iter()
        .map(|level| (level.as_str().to_owned(), json!(level.default_channel())))
        .collect();

    json!({
        "outputSink": "stdout",
        "errorSink": "stderr",
        "useColor": null,
        "timestampTemplate": true,
        "utc": false,
        "colorsByLevel": {
            "log": {
                "time": { "style": null, "text": "blue", "background": null },
                "message": { "style": null, "text": null, "background": null },
            },
            "warn": {
                "time": { "style": null, "text": "black", "background": "lightyellow" },
                "message": { "style": null, "text": null, "background": null },
            },
            "error": {
                "time": { "style": null, "text": null, "background": "red" },
                "message": { "style": null, "text": null, "background": null },
            },
            "debug": {
                "time": { "style": null, "text": "magenta", "background": null },
                "message": { "style": null, "text": null, "background": null },
            },
            "verbose": {
                "time": { "style": null, "text": "gray", "background": null },
                "message": { "style": null, "text": "gray", "background": null },
            },
            "wtf": {
                "time": { "style": null, "text": null, "background": "red" },
                "message": { "style": null, "text": "red", "background": null },
            },
        },
        "levelToChannel": channels,
    })
}
