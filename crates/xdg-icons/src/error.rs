//! Error types for theme loading.

use std::path::PathBuf;

/// Result type alias for theme operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing an icon theme.
///
/// Lookups never produce an error: a missing icon is reported as `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The manifest is malformed or incomplete.
    #[error("theme '{theme}': parse error{}: {message}", location(.section, .key))]
    Parse {
        theme: String,
        section: Option<String>,
        key: Option<String>,
        message: String,
    },

    /// A declared attribute violates its type or range constraints.
    #[error("theme '{theme}': invalid value{}: {message}", location(.section, .key))]
    Validation {
        theme: String,
        section: Option<String>,
        key: Option<String>,
        message: String,
    },

    /// File I/O error.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is neither a PNG nor an SVG image.
    #[error("'{path}' is not a supported icon image")]
    UnsupportedContent { path: PathBuf },
}

impl Error {
    /// Create a parse error.
    pub fn parse(
        theme: impl Into<String>,
        section: Option<&str>,
        key: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            theme: theme.into(),
            section: section.map(str::to_string),
            key: key.map(str::to_string),
            message: message.into(),
        }
    }

    /// Create a validation error for a key in a section.
    pub fn validation(
        theme: impl Into<String>,
        section: &str,
        key: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            theme: theme.into(),
            section: Some(section.to_string()),
            key: key.map(str::to_string),
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an unsupported content error.
    pub fn unsupported_content(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedContent { path: path.into() }
    }

    /// Returns true for errors raised while reading the manifest structure.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns true for errors raised by attribute validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// The section the error points at, if any.
    pub fn section(&self) -> Option<&str> {
        match self {
            Self::Parse { section, .. } | Self::Validation { section, .. } => section.as_deref(),
            _ => None,
        }
    }

    /// The key the error points at, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Parse { key, .. } | Self::Validation { key, .. } => key.as_deref(),
            _ => None,
        }
    }
}

fn location(section: &Option<String>, key: &Option<String>) -> String {
    match (section, key) {
        (Some(section), Some(key)) => format!(" in [{section}] {key}"),
        (Some(section), None) => format!(" in [{section}]"),
        (None, Some(key)) => format!(" at {key}"),
        (None, None) => String::new(),
    }
}
