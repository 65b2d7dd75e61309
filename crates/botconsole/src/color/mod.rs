//! Toggleable ANSI styling
//!
//! A [`ColorFormatter`] owns the escape sequence of one resolved [`Style`].
//! Whether it emits that sequence is decided by the [`ColorContext`] it was
//! built with; every formatter sharing a context flips on or off together.

mod spec;

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub use spec::{ColorSpec, FormatSpec, Modifier, Style, StyleNames, StyleSpec};

use crate::core::ConsoleResult;

const RESET: &str = "\x1b[0m";

/// Shared color-enable flag
///
/// Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct ColorContext {
    enabled: Arc<AtomicBool>,
}

impl ColorContext {
    /// Create a context with the given initial state
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    /// Whether styling is currently applied
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Turn styling on or off for every formatter holding this context
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

/// Applies one style to text when its context is enabled
#[derive(Debug, Clone)]
pub struct ColorFormatter {
    open: Box<str>,
    context: ColorContext,
}

impl ColorFormatter {
    /// Build from a configuration spec
    pub fn new(spec: &FormatSpec, context: ColorContext) -> ConsoleResult<Self> {
        Ok(Self::from_style(&Style::from_spec(spec)?, context))
    }

    /// Build from an already resolved style
    pub fn from_style(style: &Style, context: ColorContext) -> Self {
        Self {
            open: style.open_sequence().into_boxed_str(),
            context,
        }
    }

    /// Wrap `text` in the style's start and reset sequences.
    ///
    /// Returns the input untouched when the context is disabled or the style
    /// is plain.
    pub fn format<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.open.is_empty() || !self.context.is_enabled() {
            return Cow::Borrowed(text);
        }
        Cow::Owned(format!("{}{text}{RESET}", self.open))
    }

    /// The context this formatter reads
    pub fn context(&self) -> &ColorContext {
        &self.context
    }
}
