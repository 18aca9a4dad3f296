//! `index.theme` parsing.
//!
//! The manifest is an INI-style document with a mandatory `[Icon Theme]`
//! section and one section per declared directory:
//!
//! ```text
//! [Icon Theme]
//! Name=Hicolor
//! Comment=Fallback icon theme
//! Hidden=true
//! Directories=48x48/apps,scalable/apps
//!
//! [48x48/apps]
//! Size=48
//! Context=Applications
//! Type=Threshold
//!
//! [scalable/apps]
//! Size=16
//! MinSize=1
//! MaxSize=512
//! Context=Applications
//! Type=Scalable
//! ```
//!
//! Keys are case-sensitive and values are taken verbatim.

use std::path::Path;

use ini::{Ini, ParseOption, Properties};
use tracing::debug;

use crate::directory::{DEFAULT_THRESHOLD, DirectoryDescriptor, DirectoryOptions, SizingPolicy};
use crate::error::{Error, Result};
use crate::logging::targets;

/// Name of the mandatory manifest section.
pub const THEME_SECTION: &str = "Icon Theme";

/// File name of a theme manifest inside the theme root.
pub const INDEX_FILE: &str = "index.theme";

/// The parsed contents of an `index.theme` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeManifest {
    /// Short theme name.
    pub name: String,
    /// Longer description, empty when absent.
    pub comment: String,
    /// Parent theme names, in declaration order.
    pub inherits: Vec<String>,
    /// Descriptors for `Directories`, in declaration order.
    pub directories: Vec<DirectoryDescriptor>,
    /// Descriptors for `ScaledDirectories`, in declaration order.
    pub scaled_directories: Vec<DirectoryDescriptor>,
    /// Whether the theme should be hidden from theme pickers.
    pub hidden: bool,
    /// Name of an icon that showcases the theme, empty when absent.
    pub example: String,
}

impl ThemeManifest {
    /// Parse manifest text for a theme rooted at `theme_root`.
    ///
    /// Directory paths are resolved as `theme_root / section_name`. When the
    /// manifest has no `Name`, the last component of `theme_root` is used.
    pub fn parse(text: &str, theme_root: &Path) -> Result<Self> {
        let fallback_name = theme_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string());

        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, options)
            .map_err(|e| Error::parse(&fallback_name, None, None, e.to_string()))?;

        let section = ini.section(Some(THEME_SECTION)).ok_or_else(|| {
            Error::parse(
                &fallback_name,
                Some(THEME_SECTION),
                None,
                "missing [Icon Theme] section",
            )
        })?;

        let name = section
            .get("Name")
            .map(str::to_string)
            .unwrap_or(fallback_name);
        let comment = section.get("Comment").unwrap_or_default().to_string();
        let inherits = split_list(section.get("Inherits").unwrap_or_default());

        let directory_names = section.get("Directories").map(split_list).ok_or_else(|| {
            Error::parse(
                &name,
                Some(THEME_SECTION),
                Some("Directories"),
                "missing Directories key",
            )
        })?;
        if directory_names.is_empty() {
            return Err(Error::parse(
                &name,
                Some(THEME_SECTION),
                Some("Directories"),
                "no directories listed",
            ));
        }
        let scaled_names = split_list(section.get("ScaledDirectories").unwrap_or_default());

        let hidden = match section.get("Hidden") {
            Some(value) => parse_bool(value).ok_or_else(|| {
                Error::validation(
                    &name,
                    THEME_SECTION,
                    Some("Hidden"),
                    format!("'{value}' is not a boolean"),
                )
            })?,
            None => false,
        };
        let example = section.get("Example").unwrap_or_default().to_string();

        let directories = read_directories(&ini, &directory_names, theme_root, &name)?;
        let scaled_directories = read_directories(&ini, &scaled_names, theme_root, &name)?;

        debug!(
            target: targets::THEME,
            theme = %name,
            directories = directories.len(),
            scaled_directories = scaled_directories.len(),
            "parsed theme manifest"
        );

        Ok(Self {
            name,
            comment,
            inherits,
            directories,
            scaled_directories,
            hidden,
            example,
        })
    }
}

fn read_directories(
    ini: &Ini,
    names: &[String],
    theme_root: &Path,
    theme: &str,
) -> Result<Vec<DirectoryDescriptor>> {
    names
        .iter()
        .map(|dir_name| {
            let section = ini.section(Some(dir_name.as_str())).ok_or_else(|| {
                Error::parse(
                    theme,
                    Some(dir_name.as_str()),
                    None,
                    format!("directory '{dir_name}' has no section"),
                )
            })?;
            parse_directory_section(theme, dir_name, section, theme_root)
        })
        .collect()
}

/// Parse one directory section into a validated descriptor.
fn parse_directory_section(
    theme: &str,
    dir_name: &str,
    section: &Properties,
    theme_root: &Path,
) -> Result<DirectoryDescriptor> {
    let size = parse_u32(theme, dir_name, section, "Size")?.ok_or_else(|| {
        Error::validation(theme, dir_name, Some("Size"), "missing Size key")
    })?;

    let sizing_policy = match section.get("Type") {
        Some(value) => value
            .parse::<SizingPolicy>()
            .map_err(|message: String| Error::validation(theme, dir_name, Some("Type"), message))?,
        None => SizingPolicy::default(),
    };

    let options = DirectoryOptions {
        scale: parse_u32(theme, dir_name, section, "Scale")?.unwrap_or(1),
        context: section.get("Context").unwrap_or_default().to_string(),
        sizing_policy,
        min_size: parse_u32(theme, dir_name, section, "MinSize")?,
        max_size: parse_u32(theme, dir_name, section, "MaxSize")?,
        threshold: parse_u32(theme, dir_name, section, "Threshold")?.unwrap_or(DEFAULT_THRESHOLD),
    };

    DirectoryDescriptor::new(theme, dir_name, theme_root.join(dir_name), size, options)
}

/// Read an optional integer key. Empty values count as absent.
fn parse_u32(theme: &str, dir_name: &str, section: &Properties, key: &str) -> Result<Option<u32>> {
    match section.get(key).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|_| {
            Error::validation(
                theme,
                dir_name,
                Some(key),
                format!("'{value}' is not a non-negative integer"),
            )
        }),
    }
}

/// Split a comma-separated list, dropping empty entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Recognizes: true/false, yes/no, 1/0, on/off (case-insensitive).
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}
