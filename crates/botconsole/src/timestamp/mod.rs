//! Timestamp templates
//!
//! A template such as `"YYYY-MM-DD HH:mm:ss"` is compiled once into literal
//! and token segments, then rendered against the clock on every call.
//! Tokens are runs of one letter; a run is split into the longest known
//! tokens and whatever is left over is emitted as-is. `[...]` escapes text.

mod clock;

use std::fmt::Write as _;
use std::sync::Arc;

use time::{OffsetDateTime, UtcOffset};

pub use clock::{Clock, FixedClock, SystemClock};

/// Template used when timestamps are switched on without a template
pub const DEFAULT_TEMPLATE: &str = "YYYY-MM-DD HH:mm:ss";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year,
    YearShort,
    Quarter,
    Month,
    MonthPadded,
    MonthShort,
    MonthLong,
    Day,
    DayPadded,
    DayOfYear,
    DayOfYearPadded,
    Weekday,
    WeekdayMin,
    WeekdayShort,
    WeekdayLong,
    Hour,
    HourPadded,
    Hour12,
    Hour12Padded,
    MeridiemLower,
    MeridiemUpper,
    Minute,
    MinutePadded,
    Second,
    SecondPadded,
    Tenths,
    Hundredths,
    Millis,
    UnixSeconds,
    UnixMillis,
    Offset,
    OffsetCompact,
}

/// Known tokens, longest first within each letter.
const TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Year),
    ("YY", Token::YearShort),
    ("Q", Token::Quarter),
    ("MMMM", Token::MonthLong),
    ("MMM", Token::MonthShort),
    ("MM", Token::MonthPadded),
    ("M", Token::Month),
    ("DDDD", Token::DayOfYearPadded),
    ("DDD", Token::DayOfYear),
    ("DD", Token::DayPadded),
    ("D", Token::Day),
    ("dddd", Token::WeekdayLong),
    ("ddd", Token::WeekdayShort),
    ("dd", Token::WeekdayMin),
    ("d", Token::Weekday),
    ("HH", Token::HourPadded),
    ("H", Token::Hour),
    ("hh", Token::Hour12Padded),
    ("h", Token::Hour12),
    ("a", Token::MeridiemLower),
    ("A", Token::MeridiemUpper),
    ("mm", Token::MinutePadded),
    ("m", Token::Minute),
    ("ss", Token::SecondPadded),
    ("s", Token::Second),
    ("SSS", Token::Millis),
    ("SS", Token::Hundredths),
    ("S", Token::Tenths),
    ("X", Token::UnixSeconds),
    ("x", Token::UnixMillis),
    ("ZZ", Token::OffsetCompact),
    ("Z", Token::Offset),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Token(Token),
}

/// Compiled timestamp template
#[derive(Debug, Clone)]
pub struct TimestampFormatter {
    template: String,
    segments: Vec<Segment>,
    clock: Arc<dyn Clock>,
}

impl TimestampFormatter {
    /// Compile `template` against the system clock
    pub fn new(template: impl Into<String>) -> Self {
        Self::with_clock(template, Arc::new(SystemClock))
    }

    /// Compile `template` against a specific clock
    pub fn with_clock(template: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let template = template.into();
        let segments = compile(&template);
        Self {
            template,
            segments,
            clock,
        }
    }

    /// Source template
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the current local time
    pub fn display(&self) -> String {
        self.display_at(self.clock.now_local())
    }

    /// Render the current UTC time
    pub fn display_utc(&self) -> String {
        self.display_at(self.clock.now_utc())
    }

    /// Render `at` in its own offset
    pub fn display_at(&self, at: OffsetDateTime) -> String {
        let mut out = String::with_capacity(self.template.len() + 8);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Token(token) => render_token(&mut out, *token, at),
            }
        }
        out
    }

    /// Render `at` converted to UTC
    pub fn display_utc_at(&self, at: OffsetDateTime) -> String {
        self.display_at(at.to_offset(UtcOffset::UTC))
    }
}

fn is_token_char(c: char) -> bool {
    TOKENS.iter().any(|(pattern, _)| pattern.starts_with(c))
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Literal(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Literal(text.to_owned()));
    }
}

fn compile(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                push_literal(&mut segments, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        if !is_token_char(c) {
            let skip = c.len_utf8();
            let end = rest[skip..]
                .find(|ch: char| ch == '[' || is_token_char(ch))
                .map_or(rest.len(), |i| i + skip);
            push_literal(&mut segments, &rest[..end]);
            rest = &rest[end..];
            continue;
        }

        // Token letters are ASCII, so byte length equals run length.
        let run = rest.len() - rest.trim_start_matches(c).len();
        let mut remaining = run;
        while remaining > 0 {
            let matched = TOKENS
                .iter()
                .find(|(pattern, _)| pattern.starts_with(c) && pattern.len() <= remaining);
            match matched {
                Some((pattern, token)) => {
                    segments.push(Segment::Token(*token));
                    remaining -= pattern.len();
                }
                None => {
                    push_literal(&mut segments, &rest[run - remaining..run]);
                    remaining = 0;
                }
            }
        }
        rest = &rest[run..];
    }

    segments
}

fn render_token(out: &mut String, token: Token, at: OffsetDateTime) {
    let month = u8::from(at.month());
    let hour12 = match at.hour() % 12 {
        0 => 12,
        h => h,
    };
    let millis = at.millisecond();

    // Writing into a String cannot fail.
    let _ = match token {
        Token::Year => write!(out, "{:04}", at.year()),
        Token::YearShort => write!(out, "{:02}", at.year().rem_euclid(100)),
        Token::Quarter => write!(out, "{}", (month - 1) / 3 + 1),
        Token::Month => write!(out, "{month}"),
        Token::MonthPadded => write!(out, "{month:02}"),
        Token::MonthShort => write!(out, "{}", &at.month().to_string()[..3]),
        Token::MonthLong => write!(out, "{}", at.month()),
        Token::Day => write!(out, "{}", at.day()),
        Token::DayPadded => write!(out, "{:02}", at.day()),
        Token::DayOfYear => write!(out, "{}", at.ordinal()),
        Token::DayOfYearPadded => write!(out, "{:03}", at.ordinal()),
        Token::Weekday => write!(out, "{}", at.weekday().number_days_from_sunday()),
        Token::WeekdayMin => write!(out, "{}", &at.weekday().to_string()[..2]),
        Token::WeekdayShort => write!(out, "{}", &at.weekday().to_string()[..3]),
        Token::WeekdayLong => write!(out, "{}", at.weekday()),
        Token::Hour => write!(out, "{}", at.hour()),
        Token::HourPadded => write!(out, "{:02}", at.hour()),
        Token::Hour12 => write!(out, "{hour12}"),
        Token::Hour12Padded => write!(out, "{hour12:02}"),
        Token::MeridiemLower => out.write_str(if at.hour() < 12 { "am" } else { "pm" }),
        Token::MeridiemUpper => out.write_str(if at.hour() < 12 { "AM" } else { "PM" }),
        Token::Minute => write!(out, "{}", at.minute()),
        Token::MinutePadded => write!(out, "{:02}", at.minute()),
        Token::Second => write!(out, "{}", at.second()),
        Token::SecondPadded => write!(out, "{:02}", at.second()),
        Token::Tenths => write!(out, "{}", millis / 100),
        Token::Hundredths => write!(out, "{:02}", millis / 10),
        Token::Millis => write!(out, "{millis:03}"),
        Token::UnixSeconds => write!(out, "{}", at.unix_timestamp()),
        Token::UnixMillis => write!(out, "{}", at.unix_timestamp_nanos() / 1_000_000),
        Token::Offset | Token::OffsetCompact => {
            let offset = at.offset();
            let sign = if offset.is_negative() { '-' } else { '+' };
            let hours = offset.whole_hours().unsigned_abs();
            let minutes = offset.minutes_past_hour().unsigned_abs();
            if token == Token::Offset {
                write!(out, "{sign}{hours:02}:{minutes:02}")
            } else {
                write!(out, "{sign}{hours:02}{minutes:02}")
            }
        }
    };
}
