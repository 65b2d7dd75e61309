//! Format specifications and their resolution into SGR codes

use std::borrow::Cow;
use std::str::FromStr;

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::core::{ConsoleError, ConsoleResult};

/// Visual style description as written in configuration.
///
/// ```json
/// "bold"
/// ["bold", "red"]
/// { "style": "underline", "text": "black", "background": "lightyellow" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatSpec {
    /// No styling
    #[default]
    None,
    /// A single modifier or foreground color name
    Name(String),
    /// Several modifiers and/or colors applied together
    Composite(Vec<String>),
    /// Explicit style, text color and background color
    Detailed(StyleSpec),
}

/// Object form of a [`FormatSpec`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSpec {
    /// Modifier name or list of names
    pub style: Option<StyleNames>,
    /// Foreground color
    pub text: Option<ColorSpec>,
    /// Background color
    pub background: Option<ColorSpec>,
}

/// One or many style names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleNames {
    /// Single name
    One(String),
    /// List of names
    Many(Vec<String>),
}

/// A color written as a name, `#rrggbb` / `#rgb`, or `[r, g, b]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named or hex color
    Name(String),
    /// Truecolor triple
    Rgb([u8; 3]),
}

/// Text attribute toggled by an SGR code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// SGR 1
    Bold,
    /// SGR 2
    Dim,
    /// SGR 3
    Italic,
    /// SGR 4
    Underline,
    /// SGR 5
    Blink,
    /// SGR 7
    Inverse,
    /// SGR 8
    Hidden,
    /// SGR 9
    Strikethrough,
}

impl Modifier {
    fn code(self) -> &'static str {
        match self {
            Self::Bold => "1",
            Self::Dim => "2",
            Self::Italic => "3",
            Self::Underline => "4",
            Self::Blink => "5",
            Self::Inverse => "7",
            Self::Hidden => "8",
            Self::Strikethrough => "9",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "bold" => Self::Bold,
            "dim" | "dimmed" => Self::Dim,
            "italic" => Self::Italic,
            "underline" | "underlined" => Self::Underline,
            "blink" => Self::Blink,
            "inverse" | "reversed" => Self::Inverse,
            "hidden" => Self::Hidden,
            "strikethrough" => Self::Strikethrough,
            _ => return None,
        })
    }
}

/// Resolved style: modifiers plus optional foreground and background
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    modifiers: Vec<Modifier>,
    foreground: Option<Color>,
    background: Option<Color>,
}

impl Style {
    /// Style with only a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            foreground: Some(color),
            ..Self::default()
        }
    }

    /// Style with only a background color
    pub fn bg(color: Color) -> Self {
        Self {
            background: Some(color),
            ..Self::default()
        }
    }

    /// Add a modifier
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.push_modifier(modifier);
        self
    }

    fn push_modifier(&mut self, modifier: Modifier) {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
    }

    /// Whether applying the style would change nothing
    pub fn is_plain(&self) -> bool {
        self.modifiers.is_empty() && self.foreground.is_none() && self.background.is_none()
    }

    /// Opening escape sequence, empty for a plain style.
    ///
    /// All codes go into a single SGR sequence so one reset closes them.
    pub fn open_sequence(&self) -> String {
        if self.is_plain() {
            return String::new();
        }
        let codes: Vec<Cow<'static, str>> = self
            .modifiers
            .iter()
            .map(|m| Cow::Borrowed(m.code()))
            .chain(self.foreground.map(|c| color_code(c, Layer::Foreground)))
            .chain(self.background.map(|c| color_code(c, Layer::Background)))
            .collect();
        format!("\x1b[{}m", codes.join(";"))
    }

    /// Resolve a configuration spec
    pub fn from_spec(spec: &FormatSpec) -> ConsoleResult<Self> {
        let mut style = Self::default();
        match spec {
            FormatSpec::None => {}
            FormatSpec::Name(name) => style.apply_name(name)?,
            FormatSpec::Composite(names) => {
                for name in names {
                    style.apply_name(name)?;
                }
            }
            FormatSpec::Detailed(detailed) => {
                match &detailed.style {
                    Some(StyleNames::One(name)) => style.apply_modifier(name)?,
                    Some(StyleNames::Many(names)) => {
                        for name in names {
                            style.apply_modifier(name)?;
                        }
                    }
                    None => {}
                }
                if let Some(text) = &detailed.text {
                    style.foreground = Some(resolve_color(text)?);
                }
                if let Some(background) = &detailed.background {
                    style.background = Some(resolve_color(background)?);
                }
            }
        }
        Ok(style)
    }

    fn apply_modifier(&mut self, name: &str) -> ConsoleResult<()> {
        let normalized = name.trim().to_ascii_lowercase();
        match Modifier::from_name(&normalized) {
            Some(modifier) => {
                self.push_modifier(modifier);
                Ok(())
            }
            None => Err(ConsoleError::configuration(format!(
                "unknown style modifier '{name}'"
            ))),
        }
    }

    /// A bare name is a modifier, a `bg`-prefixed color, or a foreground color.
    fn apply_name(&mut self, name: &str) -> ConsoleResult<()> {
        let normalized = name.trim().to_ascii_lowercase();
        if let Some(modifier) = Modifier::from_name(&normalized) {
            self.push_modifier(modifier);
            return Ok(());
        }
        if let Some(color) = parse_color(&normalized) {
            self.foreground = Some(color);
            return Ok(());
        }
        if let Some(color) = normalized.strip_prefix("bg").and_then(parse_color) {
            self.background = Some(color);
            return Ok(());
        }
        Err(ConsoleError::configuration(format!(
            "unknown style or color '{name}'"
        )))
    }
}

#[derive(Clone, Copy)]
enum Layer {
    Foreground,
    Background,
}

/// SGR parameters for `color`.
///
/// Truecolor is always emitted as `38;2`/`48;2`; `colored` would downgrade it
/// to the nearest basic color unless `COLORTERM` advertises truecolor.
fn color_code(color: Color, layer: Layer) -> Cow<'static, str> {
    match (color, layer) {
        (Color::TrueColor { r, g, b }, Layer::Foreground) => {
            Cow::Owned(format!("38;2;{r};{g};{b}"))
        }
        (Color::TrueColor { r, g, b }, Layer::Background) => {
            Cow::Owned(format!("48;2;{r};{g};{b}"))
        }
        (named, Layer::Foreground) => named.to_fg_str(),
        (named, Layer::Background) => named.to_bg_str(),
    }
}

fn resolve_color(spec: &ColorSpec) -> ConsoleResult<Color> {
    match spec {
        ColorSpec::Rgb([r, g, b]) => Ok(Color::TrueColor {
            r: *r,
            g: *g,
            b: *b,
        }),
        ColorSpec::Name(name) => parse_color(&name.trim().to_ascii_lowercase())
            .ok_or_else(|| ConsoleError::configuration(format!("unknown color '{name}'"))),
    }
}

/// Parse a lowercase color name.
///
/// Accepts everything `colored` knows plus `gray`/`grey`, `light<color>` and
/// `bright<color>` without a separator, and hex notation.
fn parse_color(name: &str) -> Option<Color> {
    let name = name.trim_start_matches(['_', '-', ' ']);
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }
    match name {
        "gray" | "grey" => return Some(Color::BrightBlack),
        "lightgray" | "lightgrey" | "silver" => return Some(Color::White),
        _ => {}
    }
    let spaced = name.replace(['_', '-'], " ");
    if let Some(base) = spaced
        .strip_prefix("light")
        .or_else(|| spaced.strip_prefix("bright"))
    {
        return Color::from_str(&format!("bright {}", base.trim())).ok();
    }
    Color::from_str(&spaced).ok()
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::TrueColor {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        }),
        3 => {
            let widen = |s: &str| channel(s).map(|v| v * 17);
            Some(Color::TrueColor {
                r: widen(&hex[0..1])?,
                g: widen(&hex[1..2])?,
                b: widen(&hex[2..3])?,
            })
        }
        _ => None,
    }
}
