//! Conversion of values into printable text

use crate::color::ColorContext;
use crate::value::{LogValue, inspect};

/// Flatten one value.
///
/// Strings pass through untouched and string-only arrays become one line
/// per element. Errors and objects prefer their stack, then their message;
/// anything else falls back to [`inspect`], which cannot fail.
pub fn flatten(value: &LogValue, colors: &ColorContext) -> String {
    let value = innermost(value);
    match value {
        LogValue::Undefined => "undefined".to_owned(),
        LogValue::Null => "null".to_owned(),
        LogValue::Bool(b) => b.to_string(),
        LogValue::Int(i) => i.to_string(),
        LogValue::Float(f) => format_float(*f),
        LogValue::String(s) => s.clone(),
        LogValue::Array(items) => {
            let lines: Option<Vec<&str>> = items
                .iter()
                .map(|item| match item {
                    LogValue::String(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect();
            match lines {
                Some(lines) => lines.join("\n"),
                None => inspect(value, Some(1), colors),
            }
        }
        LogValue::Error(err) => match (&err.stack, err.message.as_str()) {
            (Some(stack), _) if !stack.is_empty() => stack.clone(),
            (_, message) if !message.is_empty() => message.to_owned(),
            _ => inspect(value, None, colors),
        },
        LogValue::Object(_) => inspect(value, None, colors),
    }
}

/// Follow truthy `stack` / `message` fields down through nested objects
fn innermost(mut value: &LogValue) -> &LogValue {
    while let LogValue::Object(map) = value {
        match ["stack", "message"]
            .into_iter()
            .find_map(|field| map.get(field).filter(|v| v.is_truthy()))
        {
            Some(inner) => value = inner,
            None => break,
        }
    }
    value
}

/// Flatten every value and join them with newlines
pub fn flatten_all<'a, I>(values: I, colors: &ColorContext) -> String
where
    I: IntoIterator<Item = &'a LogValue>,
{
    values
        .into_iter()
        .map(|v| flatten(v, colors))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_owned()
    } else if f.is_infinite() {
        (if f > 0.0 { "Infinity" } else { "-Infinity" }).to_owned()
    } else if f == 0.0 {
        "0".to_owned()
    } else {
        f.to_string()
    }
}
