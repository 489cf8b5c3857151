//! Output helpers for the menu: colored one-line messages and book lines.

use std::env;
use std::ffi::OsStr;
use std::fmt::Display;
use std::io::{self, Write};

use anyhow::Error;
use crossterm::style::{Color, Stylize};

use crate::models::Book;

/// Tone of a one-line message, mapped to a color when styling is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Success,
    Warning,
    Error,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Success => Color::Green,
            Tone::Warning => Color::Yellow,
            Tone::Error => Color::Red,
        }
    }
}

/// Writes menu output, optionally colored through crossterm.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Renderer {
    styled: bool,
}

impl Renderer {
    /// Style output only when `styled` is requested and `NO_COLOR` is unset
    /// or empty. Crossterm drops the colors under `NO_COLOR` but still writes
    /// attribute and reset codes, so the check has to happen here.
    pub(crate) fn new(styled: bool) -> Self {
        Self::with_no_color(styled, env::var_os("NO_COLOR").as_deref())
    }

    fn with_no_color(styled: bool, no_color: Option<&OsStr>) -> Self {
        let suppressed = no_color.is_some_and(|value| !value.is_empty());
        Self {
            styled: styled && !suppressed,
        }
    }

    pub(crate) fn line<W: Write>(
        &self,
        out: &mut W,
        tone: Tone,
        text: impl Display,
    ) -> io::Result<()> {
        if self.styled {
            writeln!(out, "{}", text.to_string().with(tone.color()))
        } else {
            writeln!(out, "{text}")
        }
    }

    pub(crate) fn heading<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        if self.styled {
            writeln!(out, "{}", text.bold())
        } else {
            writeln!(out, "{text}")
        }
    }

    pub(crate) fn books<W: Write>(&self, out: &mut W, books: &[Book]) -> io::Result<()> {
        for book in books {
            writeln!(out, "{book}")?;
        }
        Ok(())
    }
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn plain_renderer_writes_text_verbatim() {
        let mut out = Vec::new();
        Renderer { styled: false }
            .line(&mut out, Tone::Error, "boom")
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "boom\n");
    }

    #[test]
    fn no_color_suppresses_every_escape_code() {
        let render = Renderer::with_no_color(true, Some(OsStr::new("1")));
        let mut out = Vec::new();
        render.heading(&mut out, "Menu:").unwrap();
        render.line(&mut out, Tone::Error, "boom").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Menu:\nboom\n");
    }

    #[test]
    fn empty_no_color_keeps_styling() {
        let render = Renderer::with_no_color(true, Some(OsStr::new("")));
        let mut out = Vec::new();
        render.line(&mut out, Tone::Success, "saved").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{1b}'));
        assert!(text.contains("saved"));
    }

    #[test]
    fn unstyled_request_stays_plain_without_no_color() {
        let render = Renderer::with_no_color(false, None);
        let mut out = Vec::new();
        render.heading(&mut out, "Menu:").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Menu:\n");
    }

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = anyhow!("disk full").context("failed to save catalog");
        assert_eq!(surface_error(&err), "disk full");
    }
}
