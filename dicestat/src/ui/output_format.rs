//! Themed, colour-aware message helpers.
//!
//! Colour is applied only when the caller says the target stream supports
//! it, so piped output and test captures stay plain text.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Applies the theme colour for `entry` to `text`.
pub fn styled(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    if !enable_colors {
        return text.to_string();
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

pub fn print_info_message(w: &mut dyn Write, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    writeln!(w, "{}", styled(msg, ThemeEntry::Info, theme, enable_colors))
}

pub fn print_success_message(w: &mut dyn Write, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    writeln!(w, "{}", styled(msg, ThemeEntry::Success, theme, enable_colors))
}

pub fn print_warn_message(w: &mut dyn Write, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    writeln!(w, "{}", styled(msg, ThemeEntry::Warn, theme, enable_colors))
}

pub fn print_error_message(w: &mut dyn Write, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    writeln!(w, "{}", styled(msg, ThemeEntry::Error, theme, enable_colors))
}
