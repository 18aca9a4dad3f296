//! Classified icon files.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::content::ContentType;
use crate::directory::{DirectoryDescriptor, SizingPolicy};
use crate::error::{Error, Result};

/// A single icon file resolved to a name, location and image kind.
///
/// Sizing attributes are copied from the directory the file was found in,
/// so a record stays meaningful after it is handed out of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRecord {
    name: String,
    path: PathBuf,
    content_type: ContentType,
    size: u32,
    sizing_policy: SizingPolicy,
    min_size: u32,
    max_size: u32,
    owning_theme: String,
}

impl IconRecord {
    /// Classify the file at `path` as an icon of `directory`.
    ///
    /// The record is named after the file stem. Fails with
    /// [`Error::UnsupportedContent`] when the file is neither a PNG nor an
    /// SVG document, and with [`Error::Io`] when it cannot be read.
    pub fn new(path: impl AsRef<Path>, directory: &DirectoryDescriptor) -> Result<Self> {
        let listed = path.as_ref();
        // Symlinked icons keep the name they are listed under.
        let name = listed
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| Error::unsupported_content(listed))?;

        let path = listed.canonicalize().map_err(|e| Error::io(listed, e))?;
        let content_type = ContentType::sniff_file(&path)
            .map_err(|e| Error::io(&path, e))?
            .ok_or_else(|| Error::unsupported_content(&path))?;

        Ok(Self {
            name,
            path,
            content_type,
            size: directory.size(),
            sizing_policy: directory.sizing_policy(),
            min_size: directory.min_size(),
            max_size: directory.max_size(),
            owning_theme: directory.owning_theme().to_string(),
        })
    }

    /// Lookup key: the file name without its extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical location of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Image kind, determined from the file contents.
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Nominal size of the directory the icon was found in.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Sizing policy of the directory the icon was found in.
    pub fn sizing_policy(&self) -> SizingPolicy {
        self.sizing_policy
    }

    /// Smallest size the icon may be scaled to.
    pub fn min_size(&self) -> u32 {
        self.min_size
    }

    /// Largest size the icon may be scaled to.
    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    /// Name of the theme the icon belongs to.
    pub fn owning_theme(&self) -> &str {
        &self.owning_theme
    }

    /// Whether the icon may be resampled to sizes other than its nominal one.
    ///
    /// Only raster images from `Fixed` directories are pinned to their size.
    /// Resampling a scalable raster may lose quality, but is permitted.
    pub fn scalable(&self) -> bool {
        !(self.sizing_policy == SizingPolicy::Fixed && self.content_type.is_raster())
    }
}

impl fmt::Display for IconRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Icon({})", self.name)
    }
}
