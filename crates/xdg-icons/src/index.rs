//! Lazy per-directory icon listings.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::directory::DirectoryDescriptor;
use crate::error::Error;
use crate::logging::targets;
use crate::record::IconRecord;

/// Icons found in one directory, with a name index.
#[derive(Debug, Default)]
struct Listing {
    records: Vec<IconRecord>,
    by_name: HashMap<String, usize>,
}

/// A theme directory together with its lazily enumerated icons.
///
/// The directory is read on first access and the result is kept for the
/// lifetime of the index. Concurrent first accesses initialize the listing
/// exactly once.
#[derive(Debug)]
pub struct ThemeDirectoryIndex {
    descriptor: DirectoryDescriptor,
    listing: OnceLock<Listing>,
}

impl ThemeDirectoryIndex {
    /// Wrap a descriptor; nothing is read until the icons are requested.
    pub fn new(descriptor: DirectoryDescriptor) -> Self {
        Self {
            descriptor,
            listing: OnceLock::new(),
        }
    }

    /// The directory this index covers.
    pub fn descriptor(&self) -> &DirectoryDescriptor {
        &self.descriptor
    }

    /// All icons in the directory, ordered by file name.
    pub fn icons(&self) -> &[IconRecord] {
        &self.listing().records
    }

    /// The icon named `name`, if the directory has one.
    ///
    /// When several files share a stem (`edit-copy.png` and `edit-copy.svg`),
    /// the first in file-name order is returned.
    pub fn get(&self, name: &str) -> Option<&IconRecord> {
        let listing = self.listing();
        listing.by_name.get(name).map(|&i| &listing.records[i])
    }

    /// Check whether the directory has an icon named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.listing().by_name.contains_key(name)
    }

    /// Returns whether the directory has been enumerated yet.
    pub fn is_loaded(&self) -> bool {
        self.listing.get().is_some()
    }

    fn listing(&self) -> &Listing {
        self.listing.get_or_init(|| enumerate(&self.descriptor))
    }
}

fn enumerate(descriptor: &DirectoryDescriptor) -> Listing {
    let dir = descriptor.path();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(target: targets::INDEX, dir = %dir.display(), "directory does not exist");
            return Listing::default();
        }
        Err(e) => {
            warn!(target: targets::INDEX, dir = %dir.display(), error = %e, "cannot list directory");
            return Listing::default();
        }
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut listing = Listing::default();
    for path in paths {
        match IconRecord::new(&path, descriptor) {
            Ok(record) => {
                let index = listing.records.len();
                listing
                    .by_name
                    .entry(record.name().to_string())
                    .or_insert(index);
                listing.records.push(record);
            }
            Err(Error::UnsupportedContent { .. }) => {
                debug!(target: targets::INDEX, file = %path.display(), "skipping non-icon file");
            }
            Err(e) => {
                warn!(target: targets::INDEX, file = %path.display(), error = %e, "skipping unreadable file");
            }
        }
    }

    debug!(
        target: targets::INDEX,
        dir = %dir.display(),
        icons = listing.records.len(),
        "enumerated theme directory"
    );
    listing
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::directory::DirectoryOptions;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48"/>"#;

    fn index_for(path: &Path) -> ThemeDirectoryIndex {
        let descriptor =
            DirectoryDescriptor::new("hicolor", "48x48/apps", path, 48, DirectoryOptions::default())
                .unwrap();
        ThemeDirectoryIndex::new(descriptor)
    }

    #[test]
    fn test_skips_non_image_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("firefox.png"), PNG_SIGNATURE).unwrap();
        fs::write(dir.path().join("gimp.svg"), SVG).unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/inner.png"), PNG_SIGNATURE).unwrap();

        let index = index_for(dir.path());
        let names: Vec<_> = index.icons().iter().map(IconRecord::name).collect();
        assert_eq!(names, ["firefox", "gimp"]);
        assert!(index.contains("gimp"));
        assert!(!index.contains("notes"));
        assert!(!index.contains("inner"));
    }

    #[test]
    fn test_listing_is_memoized() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), PNG_SIGNATURE).unwrap();

        let index = index_for(dir.path());
        assert!(!index.is_loaded());
        let first = index.icons().to_vec();
        assert!(index.is_loaded());

        // Later changes on disk are not observed.
        fs::write(dir.path().join("b.png"), PNG_SIGNATURE).unwrap();
        assert_eq!(index.icons(), first.as_slice());
        assert!(std::ptr::eq(index.icons(), index.icons()));
    }

    #[test]
    fn test_first_file_wins_for_shared_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("edit-copy.svg"), SVG).unwrap();
        fs::write(dir.path().join("edit-copy.png"), PNG_SIGNATURE).unwrap();

        let index = index_for(dir.path());
        assert_eq!(index.icons().len(), 2);
        let record = index.get("edit-copy").unwrap();
        assert!(record.path().ends_with("edit-copy.png"));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let index = index_for(&dir.path().join("256x256/apps"));
        assert!(index.icons().is_empty());
        assert!(index.get("anything").is_none());
    }

    #[test]
    fn test_concurrent_first_access() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(dir.path().join(format!("{name}.png")), PNG_SIGNATURE).unwrap();
        }
        let index = index_for(dir.path());

        let lens: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| index.icons().len())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(lens, [3, 3, 3, 3]);
    }
}
