//! Typed descriptors for the directories of an icon theme.
//!
//! Every entry of a theme's `Directories` list has its own section in
//! `index.theme` describing the icons stored there: their nominal size, the
//! display scale they target, and how far they may be resized. A
//! [`DirectoryDescriptor`] is the validated form of such a section.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Threshold applied when a directory does not declare one.
pub const DEFAULT_THRESHOLD: u32 = 2;

/// How icons in a directory may be matched against a requested size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizingPolicy {
    /// Icons are used at their nominal size only.
    Fixed,
    /// Icons may be scaled anywhere within `[min_size, max_size]`.
    Scalable,
    /// Icons may be used when the requested size is within `threshold` of
    /// the nominal size.
    #[default]
    Threshold,
}

impl SizingPolicy {
    /// The `Type` value used in `index.theme`.
    pub fn as_str(self) -> &'static str {
        match self {
            SizingPolicy::Fixed => "Fixed",
            SizingPolicy::Scalable => "Scalable",
            SizingPolicy::Threshold => "Threshold",
        }
    }
}

impl FromStr for SizingPolicy {
    type Err = String;

    /// Values are matched exactly, as written in `index.theme`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Fixed" => Ok(SizingPolicy::Fixed),
            "Scalable" => Ok(SizingPolicy::Scalable),
            "Threshold" => Ok(SizingPolicy::Threshold),
            other => Err(format!(
                "'{other}' is not one of 'Fixed', 'Scalable' or 'Threshold'"
            )),
        }
    }
}

impl fmt::Display for SizingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon context/category following the freedesktop specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconContext {
    /// Icons for user actions (copy, save, etc.)
    Actions,
    /// Loading and processing animations
    Animations,
    /// Application icons
    Applications,
    /// Program menu categories
    Categories,
    /// Hardware devices
    Devices,
    /// File/folder emblems and tags
    Emblems,
    /// Emoticons for chat
    Emotes,
    /// Country flags
    International,
    /// File type icons (MIME types)
    MimeTypes,
    /// Filesystem locations
    Places,
    /// System status indicators
    Status,
}

impl IconContext {
    /// The context name as written in `index.theme`.
    pub fn as_str(self) -> &'static str {
        match self {
            IconContext::Actions => "Actions",
            IconContext::Animations => "Animations",
            IconContext::Applications => "Applications",
            IconContext::Categories => "Categories",
            IconContext::Devices => "Devices",
            IconContext::Emblems => "Emblems",
            IconContext::Emotes => "Emotes",
            IconContext::International => "International",
            IconContext::MimeTypes => "MimeTypes",
            IconContext::Places => "Places",
            IconContext::Status => "Status",
        }
    }
}

impl FromStr for IconContext {
    type Err = ();

    /// Accepts the freedesktop context names plus the directory-style short forms
    /// (`apps`, `intl`, `mimetypes`), case-insensitively.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "actions" => Ok(IconContext::Actions),
            "animations" => Ok(IconContext::Animations),
            "apps" | "applications" => Ok(IconContext::Applications),
            "categories" => Ok(IconContext::Categories),
            "devices" => Ok(IconContext::Devices),
            "emblems" => Ok(IconContext::Emblems),
            "emotes" => Ok(IconContext::Emotes),
            "intl" | "international" => Ok(IconContext::International),
            "mimetypes" | "mime-types" => Ok(IconContext::MimeTypes),
            "places" => Ok(IconContext::Places),
            "status" => Ok(IconContext::Status),
            _ => Err(()),
        }
    }
}

/// Optional attributes of a theme directory.
///
/// Unset bounds fall back to the nominal size when the descriptor is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryOptions {
    /// Target display scale.
    pub scale: u32,
    /// Free-text context, may be empty.
    pub context: String,
    /// How requested sizes are matched.
    pub sizing_policy: SizingPolicy,
    /// Smallest size the icons may be scaled to.
    pub min_size: Option<u32>,
    /// Largest size the icons may be scaled to.
    pub max_size: Option<u32>,
    /// Allowed distance from the nominal size for `Threshold` directories.
    pub threshold: u32,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            scale: 1,
            context: String::new(),
            sizing_policy: SizingPolicy::default(),
            min_size: None,
            max_size: None,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Validated metadata for one theme subdirectory.
///
/// Guarantees `0 < min_size <= size <= max_size` and `scale >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryDescriptor {
    name: String,
    path: PathBuf,
    size: u32,
    scale: u32,
    context: String,
    sizing_policy: SizingPolicy,
    min_size: u32,
    max_size: u32,
    threshold: u32,
    owning_theme: String,
}

impl DirectoryDescriptor {
    /// Build a descriptor for the directory `name` of `owning_theme`.
    ///
    /// `path` is where the icons live on disk, normally the theme root
    /// joined with `name`.
    pub fn new(
        owning_theme: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        size: u32,
        options: DirectoryOptions,
    ) -> Result<Self> {
        let owning_theme = owning_theme.into();
        let name = name.into();

        if size == 0 {
            return Err(Error::validation(
                owning_theme,
                &name,
                Some("Size"),
                "size must be greater than zero",
            ));
        }
        if options.scale == 0 {
            return Err(Error::validation(
                owning_theme,
                &name,
                Some("Scale"),
                "scale must be at least 1",
            ));
        }

        let min_size = options.min_size.unwrap_or(size);
        let max_size = options.max_size.unwrap_or(size);
        if min_size == 0 {
            return Err(Error::validation(
                owning_theme,
                &name,
                Some("MinSize"),
                "minimum size must be greater than zero",
            ));
        }
        if min_size > max_size {
            return Err(Error::validation(
                owning_theme,
                &name,
                Some("MinSize"),
                format!("minimum size {min_size} exceeds maximum size {max_size}"),
            ));
        }
        if size < min_size || size > max_size {
            return Err(Error::validation(
                owning_theme,
                &name,
                Some("Size"),
                format!("size {size} lies outside [{min_size}, {max_size}]"),
            ));
        }

        Ok(Self {
            name,
            path: path.into(),
            size,
            scale: options.scale,
            context: options.context,
            sizing_policy: options.sizing_policy,
            min_size,
            max_size,
            threshold: options.threshold,
            owning_theme,
        })
    }

    /// Subsection name, e.g. `48x48/apps`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the icons on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Nominal (unscaled) icon size.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Target display scale.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Free-text context as declared.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The declared context, when it is one of the standard ones.
    pub fn context_kind(&self) -> Option<IconContext> {
        self.context.parse().ok()
    }

    /// How requested sizes are matched.
    pub fn sizing_policy(&self) -> SizingPolicy {
        self.sizing_policy
    }

    /// Smallest size the icons may be scaled to.
    pub fn min_size(&self) -> u32 {
        self.min_size
    }

    /// Largest size the icons may be scaled to.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Allowed distance from the nominal size for `Threshold` directories.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Name of the theme that declared this directory.
    pub fn owning_theme(&self) -> &str {
        &self.owning_theme
    }

    /// Check whether an icon from this directory satisfies `size` without
    /// resampling beyond what the directory allows.
    pub fn matches_size(&self, size: u32) -> bool {
        match self.sizing_policy {
            SizingPolicy::Fixed => size == self.size,
            SizingPolicy::Scalable => (self.min_size..=self.max_size).contains(&size),
            SizingPolicy::Threshold => self.size.abs_diff(size) <= self.threshold,
        }
    }

    /// The range of sizes at which this directory matches exactly.
    ///
    /// Used as the resize target when no directory matches a request.
    pub fn size_bounds(&self) -> (u32, u32) {
        match self.sizing_policy {
            SizingPolicy::Scalable => (self.min_size, self.max_size),
            SizingPolicy::Fixed | SizingPolicy::Threshold => (self.size, self.size),
        }
    }
}

impl fmt::Display for DirectoryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Directory({})", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(size: u32, options: DirectoryOptions) -> DirectoryDescriptor {
        DirectoryDescriptor::new("hicolor", "test", "/icons/test", size, options).unwrap()
    }

    #[test]
    fn test_defaults() {
        let d = dir(48, DirectoryOptions::default());
        assert_eq!(d.scale(), 1);
        assert_eq!(d.sizing_policy(), SizingPolicy::Threshold);
        assert_eq!(d.min_size(), 48);
        assert_eq!(d.max_size(), 48);
        assert_eq!(d.threshold(), 2);
        assert_eq!(d.context(), "");
        assert_eq!(d.context_kind(), None);
        assert_eq!(d.owning_theme(), "hicolor");
    }

    #[test]
    fn test_matches_size() {
        let fixed = dir(
            16,
            DirectoryOptions {
                sizing_policy: SizingPolicy::Fixed,
                ..Default::default()
            },
        );
        assert!(fixed.matches_size(16));
        assert!(!fixed.matches_size(17));

        let scalable = dir(
            48,
            DirectoryOptions {
                sizing_policy: SizingPolicy::Scalable,
                min_size: Some(16),
                max_size: Some(256),
                ..Default::default()
            },
        );
        assert!(scalable.matches_size(16));
        assert!(scalable.matches_size(128));
        assert!(scalable.matches_size(256));
        assert!(!scalable.matches_size(15));
        assert!(!scalable.matches_size(257));

        let threshold = dir(22, DirectoryOptions::default());
        assert!(threshold.matches_size(20));
        assert!(threshold.matches_size(22));
        assert!(threshold.matches_size(24));
        assert!(!threshold.matches_size(19));
        assert!(!threshold.matches_size(25));
    }

    #[test]
    fn test_size_bounds() {
        let scalable = dir(
            48,
            DirectoryOptions {
                sizing_policy: SizingPolicy::Scalable,
                min_size: Some(8),
                max_size: Some(512),
                ..Default::default()
            },
        );
        assert_eq!(scalable.size_bounds(), (8, 512));
        assert_eq!(dir(32, DirectoryOptions::default()).size_bounds(), (32, 32));
    }

    #[test]
    fn test_rejects_invalid_attributes() {
        let err = DirectoryDescriptor::new("t", "d", "/d", 0, DirectoryOptions::default())
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.key(), Some("Size"));

        let err = DirectoryDescriptor::new(
            "t",
            "d",
            "/d",
            16,
            DirectoryOptions {
                scale: 0,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.key(), Some("Scale"));

        let err = DirectoryDescriptor::new(
            "t",
            "d",
            "/d",
            48,
            DirectoryOptions {
                min_size: Some(64),
                max_size: Some(32),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.key(), Some("MinSize"));
        assert_eq!(err.section(), Some("d"));

        let err = DirectoryDescriptor::new(
            "t",
            "d",
            "/d",
            16,
            DirectoryOptions {
                min_size: Some(32),
                max_size: Some(64),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.key(), Some("Size"));
    }

    #[test]
    fn test_sizing_policy_from_str() {
        assert_eq!("Fixed".parse::<SizingPolicy>(), Ok(SizingPolicy::Fixed));
        assert_eq!("Scalable".parse::<SizingPolicy>(), Ok(SizingPolicy::Scalable));
        assert_eq!("Threshold".parse::<SizingPolicy>(), Ok(SizingPolicy::Threshold));
        assert!("fixed".parse::<SizingPolicy>().is_err());
        assert!("Stretchy".parse::<SizingPolicy>().is_err());
    }

    #[test]
    fn test_icon_context_from_str() {
        assert_eq!("Actions".parse::<IconContext>(), Ok(IconContext::Actions));
        assert_eq!("apps".parse::<IconContext>(), Ok(IconContext::Applications));
        assert_eq!("Applications".parse::<IconContext>(), Ok(IconContext::Applications));
        assert_eq!("MimeTypes".parse::<IconContext>(), Ok(IconContext::MimeTypes));
        assert_eq!("unknown".parse::<IconContext>(), Err(()));
        assert_eq!(IconContext::International.as_str(), "International");
    }
}
