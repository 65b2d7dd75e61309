//! Layer that writes `tracing` events to a console

// Standard library
use std::fmt::{self, Write as _};
use std::sync::Arc;

// External dependencies
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

// Internal crates
use crate::console::Console;
use crate::level::Level;
use crate::value::LogValue;

/// Forwards `tracing` events to a [`Console`].
///
/// `TRACE` maps to `verbose`, `DEBUG` to `debug`, `INFO` to `log`, `WARN`
/// to `warn` and `ERROR` to `error`. The event message comes first,
/// followed by its fields as `key=value`.
#[derive(Debug, Clone)]
pub struct ConsoleLayer {
    console: Arc<Console>,
}

impl ConsoleLayer {
    /// Forward events to `console`
    pub fn new(console: Arc<Console>) -> Self {
        Self { console }
    }

    /// Console level for a `tracing` level
    pub fn level_for(level: tracing::Level) -> Level {
        match level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Log,
            tracing::Level::DEBUG => Level::Debug,
            _ => Level::Verbose,
        }
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let level = Self::level_for(*event.metadata().level());
        // A layer has nowhere to report a failed write.
        let _ = self
            .console
            .write(&[LogValue::String(visitor.finish())], level);
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
}

impl EventVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}
