//! Module for managing the application's command-line interface (CLI) theme.
//!
//! Each logical part of the report (headers, statistics labels, chart bars,
//! the bias verdict) maps to a 16-color ANSI foreground. Themes load from
//! YAML and fall back to built-in defaults for any entry they omit.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Colour assignment for every styled part of the output.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Section titles and banner rules.
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// Labels in the statistics block ("Minimum", "Average", ...).
    StatLabel,
    /// Bars of the ASCII chart.
    Bar,
    /// Verdict when the die looks biased.
    Biased,
    /// Verdict when the die looks fair.
    Fair,
    /// Interactive prompts.
    Prompt,
}

const ALL_ENTRIES: [ThemeEntry; 10] = [
    ThemeEntry::Header,
    ThemeEntry::Success,
    ThemeEntry::Info,
    ThemeEntry::Warn,
    ThemeEntry::Error,
    ThemeEntry::StatLabel,
    ThemeEntry::Bar,
    ThemeEntry::Biased,
    ThemeEntry::Fair,
    ThemeEntry::Prompt,
];

/// A colour as written in a theme file. Unknown names are rejected on load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum ThemeColor {
    /// One of the sixteen ANSI names, lower-cased.
    Named(String),
}

/// Colour names accepted in theme files, with the ANSI colour each selects.
const NAMED_COLORS: [(&str, AnsiColors); 16] = [
    ("black", AnsiColors::Black),
    ("red", AnsiColors::Red),
    ("green", AnsiColors::Green),
    ("yellow", AnsiColors::Yellow),
    ("blue", AnsiColors::Blue),
    ("magenta", AnsiColors::Magenta),
    ("cyan", AnsiColors::Cyan),
    ("white", AnsiColors::White),
    ("brightblack", AnsiColors::BrightBlack),
    ("brightred", AnsiColors::BrightRed),
    ("brightgreen", AnsiColors::BrightGreen),
    ("brightyellow", AnsiColors::BrightYellow),
    ("brightblue", AnsiColors::BrightBlue),
    ("brightmagenta", AnsiColors::BrightMagenta),
    ("brightcyan", AnsiColors::BrightCyan),
    ("brightwhite", AnsiColors::BrightWhite),
];

/// A colour name that is not in [`NAMED_COLORS`].
#[derive(Debug, Clone)]
pub struct ParseThemeColorError(String);

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<&str> = NAMED_COLORS.iter().map(|(name, _)| *name).collect();
        write!(f, "unknown colour '{}'; use one of: {}", self.0, names.join(", "))
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if NAMED_COLORS.iter().any(|(name, _)| *name == lower) {
            Ok(ThemeColor::Named(lower))
        } else {
            Err(ParseThemeColorError(s.to_string()))
        }
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ParseThemeColorError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<ThemeColor> for String {
    fn from(color: ThemeColor) -> Self {
        let ThemeColor::Named(name) = color;
        name
    }
}

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor::Named(name.to_string())
    }

    /// The ANSI colour for this entry. Unknown names render as white.
    pub fn to_ansi_color(&self) -> AnsiColors {
        let ThemeColor::Named(name) = self;
        NAMED_COLORS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
            .unwrap_or(AnsiColors::White)
    }
}

/// Styling for one [`ThemeEntry`]. Only the foreground is configurable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

/// The theme from `theme_path`, or the built-in one when no path is given.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    if let Some(path) = theme_path {
        ThemeStyle::load_from_file(path)
    } else {
        Ok(ThemeStyle::default_theme_map())
    }
}

impl ThemeStyle {
    /// Loads a theme from disk; entries it leaves out keep their default colour.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        let mut theme = Self::default_theme_map();
        theme.extend(custom);
        Ok(theme)
    }

    /// Built-in colours. Entries without a dedicated colour are white.
    pub fn default_theme_map() -> ThemeMap {
        let mut default_theme = HashMap::new();
        default_theme.insert(ThemeEntry::Header, ThemeStyle { fg: Some(ThemeColor::named("cyan")) });
        default_theme.insert(ThemeEntry::Success, ThemeStyle { fg: Some(ThemeColor::named("green")) });
        default_theme.insert(ThemeEntry::Warn, ThemeStyle { fg: Some(ThemeColor::named("yellow")) });
        default_theme.insert(ThemeEntry::Error, ThemeStyle { fg: Some(ThemeColor::named("red")) });
        default_theme.insert(ThemeEntry::Bar, ThemeStyle { fg: Some(ThemeColor::named("blue")) });
        default_theme.insert(ThemeEntry::Biased, ThemeStyle { fg: Some(ThemeColor::named("brightred")) });
        default_theme.insert(ThemeEntry::Fair, ThemeStyle { fg: Some(ThemeColor::named("brightgreen")) });

        for entry in ALL_ENTRIES {
            default_theme.entry(entry).or_insert_with(|| ThemeStyle { fg: Some(ThemeColor::named("white")) });
        }
        default_theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn color_names_are_case_insensitive() {
        assert_eq!(" BrightGreen ".parse::<ThemeColor>().unwrap(), ThemeColor::named("brightgreen"));
        assert!("orange".parse::<ThemeColor>().is_err());
    }

    #[test]
    fn parse_error_lists_known_names() {
        let err = "teal".parse::<ThemeColor>().unwrap_err().to_string();
        assert!(err.contains("'teal'"));
        assert!(err.contains("brightcyan"));
    }

    #[test]
    fn every_name_maps_to_its_ansi_color() {
        for (name, color) in NAMED_COLORS {
            let parsed: ThemeColor = name.parse().unwrap();
            assert_eq!(parsed.to_ansi_color(), color);
        }
        assert_eq!(ThemeColor::named("mauve").to_ansi_color(), AnsiColors::White);
    }

    #[test]
    fn default_theme_covers_every_entry() {
        let theme = ThemeStyle::default_theme_map();
        for entry in ALL_ENTRIES {
            assert!(theme.contains_key(&entry), "missing {:?}", entry);
        }
    }

    #[test]
    fn theme_file_with_unknown_colour_fails_to_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bar:\n  fg: mauve").unwrap();

        let err = ThemeStyle::load_from_file(file.path()).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Failed to parse theme file"), "{}", chain);
        assert!(chain.contains("mauve"), "{}", chain);
    }

    #[test]
    fn theme_file_colour_names_are_normalised() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "header:\n  fg: BrightYellow").unwrap();

        let theme = ThemeStyle::load_from_file(file.path()).unwrap();
        assert_eq!(theme[&ThemeEntry::Header].fg, Some(ThemeColor::named("brightyellow")));
    }

    #[test]
    fn theme_file_overrides_only_listed_entries() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "bar:\n  fg: magenta").unwrap();

        let theme = ThemeStyle::load_from_file(file.path()).unwrap();
        assert_eq!(theme[&ThemeEntry::Bar].fg, Some(ThemeColor::named("magenta")));
        assert_eq!(theme[&ThemeEntry::Biased].fg, Some(ThemeColor::named("brightred")));
    }
}
