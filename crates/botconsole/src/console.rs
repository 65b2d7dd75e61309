//! The console facade

// Standard library
use std::fmt;

// External dependencies
use parking_lot::Mutex;

// Internal crates
use crate::builder::ConsoleBuilder;
use crate::color::{ColorContext, ColorFormatter};
use crate::config::ConsoleOptions;
use crate::core::{ConsoleError, ConsoleResult};
use crate::level::{Channel, Level};
use crate::sink::Sink;
use crate::timestamp::TimestampFormatter;
use crate::value::{LogValue, flatten_all};

/// Formatters and routing of one level
#[derive(Debug, Clone)]
pub(crate) struct LevelFormat {
    pub(crate) time: ColorFormatter,
    pub(crate) message: ColorFormatter,
    pub(crate) channel: Channel,
}

/// Leveled, colorized, timestamped console.
///
/// Every call renders and writes synchronously, so output appears in call
/// order. Each level routes to the output or the error sink.
///
/// ```rust,ignore
/// let console = Console::builder().timestamps(false).build()?;
/// console.log(["connected to", "play.example.net"])?;
/// botconsole::warn!(console, "ping", 412, "ms")?;
/// ```
pub struct Console {
    output: Mutex<Box<dyn Sink>>,
    error: Mutex<Box<dyn Sink>>,
    colors: ColorContext,
    timestamp: Option<TimestampFormatter>,
    utc: bool,
    levels: [LevelFormat; Level::COUNT],
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("colors", &self.colors.is_enabled())
            .field("timestamp", &self.timestamp.as_ref().map(TimestampFormatter::template))
            .field("utc", &self.utc)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Start building a console
    pub fn builder() -> ConsoleBuilder {
        ConsoleBuilder::default()
    }

    /// Build a console on the standard streams from options
    pub fn new(options: ConsoleOptions) -> ConsoleResult<Self> {
        ConsoleBuilder::from_options(options).build()
    }

    pub(crate) fn from_parts(
        output: Box<dyn Sink>,
        error: Box<dyn Sink>,
        colors: ColorContext,
        timestamp: Option<TimestampFormatter>,
        utc: bool,
        levels: [LevelFormat; Level::COUNT],
    ) -> Self {
        Self {
            output: Mutex::new(output),
            error: Mutex::new(error),
            colors,
            timestamp,
            utc,
            levels,
        }
    }

    /// Current timestamp text, `None` when timestamps are off
    pub fn timestamp(&self) -> Option<String> {
        self.timestamp.as_ref().map(|ts| {
            if self.utc {
                ts.display_utc()
            } else {
                ts.display()
            }
        })
    }

    /// Whether styling is applied
    pub fn color_enabled(&self) -> bool {
        self.colors.is_enabled()
    }

    /// Switch styling for every formatter of this console
    pub fn set_color(&self, enabled: bool) {
        self.colors.set_enabled(enabled);
    }

    /// Shared color flag, for formatters built outside the console
    pub fn color_context(&self) -> &ColorContext {
        &self.colors
    }

    /// Channel a level is routed to
    pub fn channel(&self, level: Level) -> Channel {
        self.levels[level.index()].channel
    }

    /// Render values as they would be written for `level`.
    ///
    /// Values are flattened and joined with newlines; every resulting line
    /// gets the styled `[timestamp]` and a space in front when timestamps are
    /// on.
    pub fn render(&self, values: &[LogValue], level: Level) -> String {
        let format = &self.levels[level.index()];
        let body = flatten_all(values, &self.colors);
        let stamp = self
            .timestamp()
            .map(|ts| format.time.format(&format!("[{ts}]")).into_owned());

        body.split('\n')
            .map(|line| {
                let message = format.message.format(line);
                match &stamp {
                    Some(stamp) => format!("{stamp} {message}"),
                    None => message.into_owned(),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render values and write them to the sink of `level`'s channel
    pub fn write(&self, values: &[LogValue], level: Level) -> ConsoleResult<()> {
        let text = self.render(values, level);
        let channel = self.channel(level);
        let sink = match channel {
            Channel::Normal => &self.output,
            Channel::Error => &self.error,
        };
        sink.lock()
            .write_text(&text)
            .map_err(|source| ConsoleError::Sink { channel, source })
    }

    /// Like [`write`](Self::write) with a level name.
    ///
    /// Unknown names fail with [`ConsoleError::InvalidLevel`] and nothing is
    /// written.
    pub fn write_tagged(&self, values: &[LogValue], level: &str) -> ConsoleResult<()> {
        self.write(values, level.parse()?)
    }

    fn write_all<I>(&self, values: I, level: Level) -> ConsoleResult<()>
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        let values: Vec<LogValue> = values.into_iter().map(Into::into).collect();
        self.write(&values, level)
    }

    /// Write at `log` level
    pub fn log<I>(&self, values: I) -> ConsoleResult<()>
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.write_all(values, Level::Log)
    }

    /// Write at `warn` level
    pub fn warn<I>(&self, values: I) -> ConsoleResult<()>
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.write_all(values, Level::Warn)
    }

    /// Write at `error` level
    pub fn error<I>(&self, values: I) -> ConsoleResult<()>
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.write_all(values, Level::Error)
    }

    /// Write at `debug` level
    pub fn debug<I>(&self, values: I) -> ConsoleResult<()>
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.write_all(values, Level::Debug)
    }

    /// Write at `verbose` level
    pub fn verbose<I>(&self, values: I) -> ConsoleResult<()>
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.write_all(values, Level::Verbose)
    }

    /// Write at `wtf` level, for states that should be impossible
    pub fn wtf<I>(&self, values: I) -> ConsoleResult<()>
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.write_all(values, Level::Wtf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use crate::timestamp::FixedClock;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use time::macros::datetime;

    fn plain() -> (Console, MemorySink, MemorySink) {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let console = Console::builder()
            .use_color(false)
            .timestamps(false)
            .output_sink(out.clone())
            .error_sink(err.clone())
            .build()
            .unwrap();
        (console, out, err)
    }

    #[test]
    fn plain_lines_have_no_prefix() {
        let (console, out, err) = plain();
        console.log(["hello", "world"]).unwrap();
        assert_eq!(out.entries(), vec!["hello\nworld"]);
        assert!(err.is_empty());
    }

    #[test]
    fn timestamp_prefixes_every_line() {
        let out = MemorySink::new();
        let console = Console::builder()
            .use_color(false)
            .clock(FixedClock::new(datetime!(2024-03-05 10:20:30 UTC)))
            .output_sink(out.clone())
            .error_sink(MemorySink::new())
            .build()
            .unwrap();
        console.log(["a", "b\nc"]).unwrap();
        assert_eq!(
            out.contents(),
            "[2024-03-05 10:20:30] a\n[2024-03-05 10:20:30] b\n[2024-03-05 10:20:30] c"
        );
    }

    #[test]
    fn utc_flag_selects_utc_rendering() {
        let build = |utc: bool| {
            Console::builder()
                .use_color(false)
                .timestamp_template("YYYY-MM-DD HH:mm")
                .utc(utc)
                .clock(FixedClock::new(datetime!(2024-03-05 22:30:00 -05:00)))
                .output_sink(MemorySink::new())
                .error_sink(MemorySink::new())
                .build()
                .unwrap()
        };
        assert_eq!(build(false).timestamp().as_deref(), Some("2024-03-05 22:30"));
        assert_eq!(build(true).timestamp().as_deref(), Some("2024-03-06 03:30"));
    }

    #[test]
    fn colored_segments_use_level_styles() {
        let out = MemorySink::new();
        let console = Console::builder()
            .use_color(true)
            .timestamp_template("HH:mm")
            .clock(FixedClock::new(datetime!(2024-03-05 09:05:00 UTC)))
            .output_sink(out.clone())
            .error_sink(MemorySink::new())
            .build()
            .unwrap();

        console.verbose(["quiet"]).unwrap();
        assert_eq!(
            out.contents(),
            "\x1b[90m[09:05]\x1b[0m \x1b[90mquiet\x1b[0m"
        );

        out.clear();
        console.set_color(false);
        console.verbose(["quiet"]).unwrap();
        assert_eq!(out.contents(), "[09:05] quiet");
    }

    #[test]
    fn error_class_levels_use_error_sink() {
        let (console, out, err) = plain();
        console.error(["broken"]).unwrap();
        console.wtf(["impossible"]).unwrap();
        assert!(out.is_empty());
        assert_eq!(err.entries(), vec!["broken", "impossible"]);

        console.warn(["careful"]).unwrap();
        console.debug(["detail"]).unwrap();
        console.verbose(["noise"]).unwrap();
        assert_eq!(out.entries(), vec!["careful", "detail", "noise"]);
    }

    #[test]
    fn tagged_writes_normalise_case() {
        let (console, out, err) = plain();
        console.write_tagged(&["x".into()], "ERROR").unwrap();
        console.write_tagged(&["y".into()], "Log").unwrap();
        assert_eq!(err.entries(), vec!["x"]);
        assert_eq!(out.entries(), vec!["y"]);
    }

    #[test]
    fn unknown_tag_writes_nothing() {
        let (console, out, err) = plain();
        let result = console.write_tagged(&["x".into()], "fatal");
        assert!(matches!(result, Err(ConsoleError::InvalidLevel(_))));
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn heterogeneous_values() {
        let (console, out, _) = plain();
        let values = [
            LogValue::from("kicked"),
            LogValue::from(3),
            LogValue::Null,
            LogValue::from(json!({"reason": "idle"})),
            LogValue::from(vec!["line one", "line two"]),
        ];
        console.write(&values, Level::Log).unwrap();
        assert_eq!(
            out.contents(),
            "kicked\n3\nnull\n{ reason: 'idle' }\nline one\nline two"
        );
    }

    #[test]
    fn empty_call_writes_an_empty_line() {
        let (console, out, _) = plain();
        console.log(Vec::<LogValue>::new()).unwrap();
        assert_eq!(out.entries(), vec![""]);
    }

    #[test]
    fn console_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Console>();
    }
}
