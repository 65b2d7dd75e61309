//! Readable rendering of structured values

use colored::Color;

use crate::color::{ColorContext, ColorFormatter, Modifier, Style};
use crate::value::LogValue;

/// Single-line renderings wider than this break into one entry per line.
const BREAK_WIDTH: usize = 72;

/// Nesting past this level is always summarised, whatever depth was asked for.
const MAX_NESTING: usize = 64;

/// Render `value` as readable text.
///
/// Containers nested deeper than `depth` are summarised as `[Array]` or
/// `[Object]`; `None` means no limit other than a fixed nesting cap that
/// keeps pathological trees from exhausting the stack. Scalars are styled when `colors` is
/// enabled.
pub fn inspect(value: &LogValue, depth: Option<usize>, colors: &ColorContext) -> String {
    Inspector::new(depth, colors).render(value, 0)
}

struct Inspector {
    depth: Option<usize>,
    number: ColorFormatter,
    string: ColorFormatter,
    null: ColorFormatter,
    undefined: ColorFormatter,
    special: ColorFormatter,
}

impl Inspector {
    fn new(depth: Option<usize>, colors: &ColorContext) -> Self {
        let paint = |style: Style| ColorFormatter::from_style(&style, colors.clone());
        Self {
            depth,
            number: paint(Style::fg(Color::Yellow)),
            string: paint(Style::fg(Color::Green)),
            null: paint(Style::default().with(Modifier::Bold)),
            undefined: paint(Style::fg(Color::BrightBlack)),
            special: paint(Style::fg(Color::Cyan)),
        }
    }

    fn render(&self, value: &LogValue, level: usize) -> String {
        match value {
            LogValue::Undefined => self.undefined.format("undefined").into_owned(),
            LogValue::Null => self.null.format("null").into_owned(),
            LogValue::Bool(b) => self.number.format(&b.to_string()).into_owned(),
            LogValue::Int(i) => self.number.format(&i.to_string()).into_owned(),
            LogValue::Float(f) => self.number.format(&super::flatten::format_float(*f)).into_owned(),
            LogValue::String(s) => self.string.format(&quote(s)).into_owned(),
            LogValue::Error(err) => match &err.stack {
                Some(stack) if !stack.is_empty() => stack.clone(),
                _ => err.to_string(),
            },
            LogValue::Array(items) => {
                if items.is_empty() {
                    return "[]".to_owned();
                }
                if self.exceeds_depth(level) {
                    return self.special.format("[Array]").into_owned();
                }
                let entries: Vec<String> = items.iter().map(|v| self.render(v, level + 1)).collect();
                compose(&entries, ('[', ']'), level)
            }
            LogValue::Object(map) => {
                if map.is_empty() {
                    return "{}".to_owned();
                }
                if self.exceeds_depth(level) {
                    return self.special.format("[Object]").into_owned();
                }
                let entries: Vec<String> = map
                    .iter()
                    .map(|(key, v)| format!("{}: {}", self.key(key), self.render(v, level + 1)))
                    .collect();
                compose(&entries, ('{', '}'), level)
            }
        }
    }

    fn exceeds_depth(&self, level: usize) -> bool {
        level > self.depth.map_or(MAX_NESTING, |max| max.min(MAX_NESTING))
    }

    fn key(&self, key: &str) -> String {
        if is_identifier(key) {
            key.to_owned()
        } else {
            self.string.format(&quote(key)).into_owned()
        }
    }
}

fn compose(entries: &[String], (open, close): (char, char), level: usize) -> String {
    let single = format!("{open} {} {close}", entries.join(", "));
    let multiline = entries.iter().any(|e| e.contains('\n'));
    if !multiline && visible_width(&single) + 2 * level <= BREAK_WIDTH {
        return single;
    }

    let mut out = String::new();
    out.push(open);
    for (i, entry) in entries.iter().enumerate() {
        out.push('\n');
        for (j, line) in entry.split('\n').enumerate() {
            if j > 0 {
                out.push('\n');
            }
            out.push_str("  ");
            out.push_str(line);
        }
        if i + 1 < entries.len() {
            out.push(',');
        }
    }
    out.push('\n');
    out.push(close);
    out
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Character count with SGR sequences skipped
fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}
