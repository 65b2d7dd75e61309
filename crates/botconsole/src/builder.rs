//! Console builder

// Standard library
use std::fmt;
use std::sync::Arc;

// External dependencies
use serde_json::Value;

// Internal crates
use crate::color::{ColorContext, ColorFormatter};
use crate::config::{ConsoleOptions, ResolvedConfig};
use crate::console::{Console, LevelFormat};
use crate::core::{ConsoleError, ConsoleResult};
use crate::level::{Channel, Level};
use crate::sink::{self, Sink};
use crate::timestamp::{Clock, SystemClock, TimestampFormatter};

/// Builds a [`Console`] from options and sinks
pub struct ConsoleBuilder {
    options: ConsoleOptions,
    output: Option<Box<dyn Sink>>,
    error: Option<Box<dyn Sink>>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for ConsoleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleBuilder")
            .field("options", &self.options)
            .field("custom_output", &self.output.is_some())
            .field("custom_error", &self.error.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for ConsoleBuilder {
    fn default() -> Self {
        Self::from_options(ConsoleOptions::new())
    }
}

impl ConsoleBuilder {
    /// Create builder from options
    #[must_use]
    pub fn from_options(options: ConsoleOptions) -> Self {
        Self {
            options,
            output: None,
            error: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Sink for normal-channel levels, replacing `outputSink`
    #[must_use]
    pub fn output_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.output = Some(Box::new(sink));
        self
    }

    /// Sink for error-channel levels, replacing `errorSink`
    #[must_use]
    pub fn error_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.error = Some(Box::new(sink));
        self
    }

    /// Time source for timestamps
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// See [`ConsoleOptions::use_color`]
    #[must_use]
    pub fn use_color(mut self, enabled: bool) -> Self {
        self.options = self.options.use_color(enabled);
        self
    }

    /// See [`ConsoleOptions::timestamps`]
    #[must_use]
    pub fn timestamps(mut self, enabled: bool) -> Self {
        self.options = self.options.timestamps(enabled);
        self
    }

    /// See [`ConsoleOptions::timestamp_template`]
    #[must_use]
    pub fn timestamp_template(mut self, template: impl Into<String>) -> Self {
        self.options = self.options.timestamp_template(template);
        self
    }

    /// See [`ConsoleOptions::utc`]
    #[must_use]
    pub fn utc(mut self, utc: bool) -> Self {
        self.options = self.options.utc(utc);
        self
    }

    /// See [`ConsoleOptions::level_colors`]
    #[must_use]
    pub fn level_colors(mut self, level: Level, colors: Value) -> Self {
        self.options = self.options.level_colors(level, colors);
        self
    }

    /// See [`ConsoleOptions::level_channel`]
    #[must_use]
    pub fn level_channel(mut self, level: Level, channel: Channel) -> Self {
        self.options = self.options.level_channel(level, channel);
        self
    }

    /// Resolve the configuration and build the console
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Configuration`] if:
    /// - an option has the wrong shape or names an unknown level
    /// - a style names an unknown color or modifier
    /// - either sink reports itself as not writable
    pub fn build(self) -> ConsoleResult<Console> {
        let ResolvedConfig {
            config,
            styles,
            channels,
        } = self.options.resolve_tables()?;

        let output = self.output.unwrap_or_else(|| sink::make_sink(config.output_sink));
        let error = self.error.unwrap_or_else(|| sink::make_sink(config.error_sink));
        for (name, sink) in [("output", &output), ("error", &error)] {
            if !sink.is_writable() {
                return Err(ConsoleError::configuration(format!(
                    "{name} sink is not writable"
                )));
            }
        }

        let use_color = match config.use_color {
            Some(explicit) => explicit,
            None => {
                let detected = output.is_terminal().unwrap_or(false);
                tracing::debug!(detected, "color support detected from output sink");
                detected
            }
        };
        let colors = ColorContext::new(use_color);

        let timestamp = config.timestamp_template().map(|template| {
            tracing::trace!(%template, utc = config.utc, "compiling timestamp template");
            TimestampFormatter::with_clock(template, Arc::clone(&self.clock))
        });

        let levels = Level::ALL.map(|level| {
            let (time, message) = &styles[level.index()];
            LevelFormat {
                time: ColorFormatter::from_style(time, colors.clone()),
                message: ColorFormatter::from_style(message, colors.clone()),
                channel: channels[level.index()],
            }
        });

        Ok(Console::from_parts(
            output,
            error,
            colors,
            timestamp,
            config.utc,
            levels,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::ConsoleLayer;
    use crate::sink::MemorySink;
    use pretty_assertions::assert_eq;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    fn quiet() -> ConsoleBuilder {
        Console::builder()
            .use_color(false)
            .timestamps(false)
            .output_sink(MemorySink::new())
            .error_sink(MemorySink::new())
    }

    #[test]
    fn channel_fallback_is_reported_once_per_level() {
        let events = MemorySink::new();
        let recorder = quiet().output_sink(events.clone()).build().unwrap();
        let subscriber = Registry::default().with(ConsoleLayer::new(Arc::new(recorder)));

        tracing::subscriber::with_default(subscriber, || {
            ConsoleBuilder::from_options(ConsoleOptions::plain().set("levelToChannel", Value::Null))
                .output_sink(MemorySink::new())
                .error_sink(MemorySink::new())
                .build()
                .unwrap();
        });

        let fallbacks: Vec<String> = events
            .entries()
            .into_iter()
            .filter(|e| e.starts_with("no channel configured"))
            .collect();
        assert_eq!(fallbacks.len(), Level::COUNT);
        for level in Level::ALL {
            assert!(fallbacks.contains(&format!("no channel configured, using normal level={level}")));
        }
    }

    #[test]
    fn custom_sinks_replace_configured_targets() {
        let out = MemorySink::new();
        let console = quiet().output_sink(out.clone()).build().unwrap();
        console.log(["routed"]).unwrap();
        assert_eq!(out.entries(), vec!["routed"]);
    }

    #[test]
    fn invalid_options_fail_build() {
        let err = quiet()
            .level_colors(Level::Log, serde_json::json!({"message": "sparkly"}))
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
