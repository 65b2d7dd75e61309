//! Heterogeneous values accepted by the level methods
//!
//! Anything a caller logs is first converted into a [`LogValue`] tree, then
//! [flattened](flatten) into text.

mod flatten;
mod inspect;

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use indexmap::IndexMap;

pub use flatten::{flatten, flatten_all};
pub use inspect::inspect;

/// A loggable value
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    /// No value at all
    Undefined,
    /// Explicit absence
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i128),
    /// Floating point number
    Float(f64),
    /// Text, rendered verbatim
    String(String),
    /// Ordered sequence
    Array(Vec<LogValue>),
    /// Ordered key/value record
    Object(IndexMap<String, LogValue>),
    /// Error with optional stack text
    Error(ErrorValue),
}

/// An error captured for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    /// Error kind shown in summaries, `Error` by default
    pub name: String,
    /// Human-readable message
    pub message: String,
    /// Full trace text; preferred over the message when present
    pub stack: Option<String>,
}

impl ErrorValue {
    /// Error without a stack
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: "Error".to_owned(),
            message: message.into(),
            stack: None,
        }
    }

    /// Set the error kind
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach stack text
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture a Rust error.
    ///
    /// The message is the error's `Display`. When the error has sources the
    /// stack lists them under `Caused by:`.
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let message = err.to_string();
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(format!("    {cause}"));
            source = cause.source();
        }
        let stack = (!causes.is_empty())
            .then(|| format!("{message}\n\nCaused by:\n{}", causes.join("\n")));
        Self {
            name: "Error".to_owned(),
            message,
            stack,
        }
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "[{}]", self.name)
        } else {
            write!(f, "[{}: {}]", self.name, self.message)
        }
    }
}

impl LogValue {
    /// Capture a Rust error
    pub fn error<E: StdError + ?Sized>(err: &E) -> Self {
        Self::Error(ErrorValue::from_error(err))
    }

    /// Text from any `Display` value
    pub fn display(value: impl fmt::Display) -> Self {
        Self::String(value.to_string())
    }

    /// Text from any `Debug` value
    pub fn debug(value: impl fmt::Debug) -> Self {
        Self::String(format!("{value:?}"))
    }

    /// Truthiness as used when probing `stack` / `message` fields:
    /// undefined, null, `false`, zero, NaN and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Error(_) => true,
        }
    }
}

impl From<()> for LogValue {
    fn from((): ()) -> Self {
        Self::Undefined
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! int_conversions {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LogValue {
            fn from(value: $ty) -> Self {
                Self::Int(i128::from(value))
            }
        })*
    };
}

int_conversions!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<isize> for LogValue {
    fn from(value: isize) -> Self {
        Self::Int(value as i128)
    }
}

impl From<usize> for LogValue {
    fn from(value: usize) -> Self {
        Self::Int(value as i128)
    }
}

impl From<f32> for LogValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<char> for LogValue {
    fn from(value: char) -> Self {
        Self::String(value.to_string())
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for LogValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<Cow<'_, str>> for LogValue {
    fn from(value: Cow<'_, str>) -> Self {
        Self::String(value.into_owned())
    }
}

impl From<ErrorValue> for LogValue {
    fn from(value: ErrorValue) -> Self {
        Self::Error(value)
    }
}

impl From<Box<dyn StdError + Send + Sync>> for LogValue {
    fn from(value: Box<dyn StdError + Send + Sync>) -> Self {
        Self::error(value.as_ref())
    }
}

impl From<std::io::Error> for LogValue {
    fn from(value: std::io::Error) -> Self {
        Self::error(&value)
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<LogValue>> From<Vec<T>> for LogValue {
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<LogValue>> From<&[T]> for LogValue {
    fn from(value: &[T]) -> Self {
        Self::Array(value.iter().cloned().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<LogValue>> From<IndexMap<K, V>> for LogValue {
    fn from(value: IndexMap<K, V>) -> Self {
        Self::Object(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Self::Int(i128::from(u))
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&serde_json::Value> for LogValue {
    fn from(value: &serde_json::Value) -> Self {
        Self::from(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("handshake failed")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn error_chain_becomes_stack() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::TimedOut, "socket timed out"));
        let value = ErrorValue::from_error(&err);
        assert_eq!(value.message, "handshake failed");
        assert_eq!(
            value.stack.as_deref(),
            Some("handshake failed\n\nCaused by:\n    socket timed out")
        );
    }

    #[test]
    fn error_without_source_has_no_stack() {
        let err = std::io::Error::other("disk full");
        let value = ErrorValue::from_error(&err);
        assert_eq!(value.message, "disk full");
        assert_eq!(value.stack, None);
        assert_eq!(value.to_string(), "[Error: disk full]");
    }

    #[test]
    fn json_conversion_keeps_kinds() {
        let value = LogValue::from(json!({"b": 1, "a": [true, null, 1.5, "x"]}));
        let LogValue::Object(map) = value else {
            panic!("expected object");
        };
        assert_eq!(map.len(), 2);
        assert_eq!(map["b"], LogValue::Int(1));
        assert_eq!(
            map["a"],
            LogValue::Array(vec![
                LogValue::Bool(true),
                LogValue::Null,
                LogValue::Float(1.5),
                LogValue::String("x".into()),
            ])
        );
    }

    #[test]
    fn option_and_unit() {
        assert_eq!(LogValue::from(None::<i32>), LogValue::Null);
        assert_eq!(LogValue::from(Some(3_u8)), LogValue::Int(3));
        assert_eq!(LogValue::from(()), LogValue::Undefined);
    }

    #[test]
    fn truthiness() {
        assert!(!LogValue::String(String::new()).is_truthy());
        assert!(!LogValue::Int(0).is_truthy());
        assert!(!LogValue::Float(f64::NAN).is_truthy());
        assert!(!LogValue::Null.is_truthy());
        assert!(LogValue::String("x".into()).is_truthy());
        assert!(LogValue::Array(Vec::new()).is_truthy());
    }
}
