//! Integration tests for icon lookup against on-disk themes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use xdg_icons::{ContentType, IconLookup, IconTheme, SizingPolicy, ThemeChain, parse_theme};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16"/>"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("xdg_icons=trace")
        .with_test_writer()
        .try_init();
}

/// A theme written to a temporary directory.
struct ThemeFixture {
    dir: TempDir,
}

impl ThemeFixture {
    /// Write `index.theme` with the given directory sections.
    ///
    /// Each section is `(name, body)` where `body` holds the keys.
    fn new(name: &str, sections: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let names: Vec<_> = sections.iter().map(|(n, _)| *n).collect();
        let mut manifest = format!(
            "[Icon Theme]\nName={name}\nComment=Fixture theme\nDirectories={}\n",
            names.join(",")
        );
        for (section, body) in sections {
            manifest.push_str(&format!("\n[{section}]\n{body}\n"));
            fs::create_dir_all(dir.path().join(section)).unwrap();
        }
        fs::write(dir.path().join("index.theme"), manifest).unwrap();
        Self { dir }
    }

    fn png(self, section: &str, icon: &str) -> Self {
        fs::write(self.dir.path().join(section).join(format!("{icon}.png")), PNG_SIGNATURE)
            .unwrap();
        self
    }

    fn svg(self, section: &str, icon: &str) -> Self {
        fs::write(self.dir.path().join(section).join(format!("{icon}.svg")), SVG).unwrap();
        self
    }

    fn file(self, section: &str, file: &str, contents: &str) -> Self {
        fs::write(self.dir.path().join(section).join(file), contents).unwrap();
        self
    }

    fn index_file(&self) -> PathBuf {
        self.dir.path().join("index.theme")
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn load(&self) -> IconTheme {
        IconTheme::from_index_file(self.index_file()).unwrap()
    }
}

#[test]
fn test_threshold_exact_and_window() {
    init_tracing();
    let fixture = ThemeFixture::new("T", &[("48x48/apps", "Size=48\nType=Threshold")])
        .png("48x48/apps", "x");
    let theme = fixture.load();

    let icon = theme.find_icon("x", 48, 1, true).unwrap();
    assert_eq!(icon.name(), "x");
    assert_eq!(icon.size(), 48);
    assert_eq!(icon.sizing_policy(), SizingPolicy::Threshold);

    let near = theme.find_icon("x", 47, 1, false).unwrap();
    assert_eq!(near.path(), icon.path());
    assert!(theme.find_icon("x", 51, 1, false).is_none());
}

#[test]
fn test_scalable_range() {
    let fixture = ThemeFixture::new(
        "S",
        &[("scalable/apps", "Size=48\nType=Scalable\nMinSize=16\nMaxSize=256")],
    )
    .svg("scalable/apps", "y");
    let theme = fixture.load();

    for size in [16, 128, 256] {
        let icon = theme.find_icon("y", size, 1, false).unwrap();
        assert_eq!(icon.content_type(), ContentType::Svg);
    }
    assert!(theme.find_icon("y", 15, 1, false).is_none());
    // With preference the request is clamped to the smallest bound.
    assert!(theme.find_icon("y", 15, 1, true).is_some());
    assert!(theme.find_icon("y", 512, 1, true).is_some());
}

#[test]
fn test_fallback_to_parent() {
    let parent = ThemeFixture::new("B", &[("32x32/apps", "Size=32\nType=Fixed")])
        .png("32x32/apps", "only-in-parent");
    let child = ThemeFixture::new("A", &[("32x32/apps", "Size=32\nType=Fixed")])
        .png("32x32/apps", "other");

    let theme = child.load().with_fallback(Arc::new(parent.load()));
    let icon = theme.find_icon("only-in-parent", 32, 1, true).unwrap();
    assert_eq!(icon.owning_theme(), "B");
    assert!(icon.path().starts_with(parent.root().canonicalize().unwrap()));
    assert_eq!(theme.fallback().map(|t| t.name()), Some("B"));
}

#[test]
fn test_prefer_this_theme_resizes_before_fallback() {
    let parent = ThemeFixture::new("Parent", &[("64x64/apps", "Size=64\nType=Fixed")])
        .png("64x64/apps", "z");
    let child = ThemeFixture::new(
        "Child",
        &[
            ("16x16/apps", "Size=16\nType=Fixed"),
            ("256x256/apps", "Size=256\nType=Fixed"),
        ],
    )
    .png("16x16/apps", "z")
    .png("256x256/apps", "z");

    let theme = child.load().with_fallback(Arc::new(parent.load()));

    let preferred = theme.find_icon("z", 64, 1, true).unwrap();
    assert_eq!(preferred.owning_theme(), "Child");
    assert_eq!(preferred.size(), 256);

    let deferred = theme.find_icon("z", 64, 1, false).unwrap();
    assert_eq!(deferred.owning_theme(), "Parent");
    assert_eq!(deferred.size(), 64);

    let lookup = IconLookup::new("z", 64).with_prefer_this_theme(false);
    assert_eq!(theme.lookup(&lookup), Some(deferred));
}

#[test]
fn test_largest_directory_wins() {
    let fixture = ThemeFixture::new(
        "Order",
        &[
            ("scalable/apps", "Size=16\nType=Scalable\nMinSize=8\nMaxSize=512"),
            ("48x48/apps", "Size=48"),
        ],
    )
    .svg("scalable/apps", "app")
    .png("48x48/apps", "app");
    let theme = fixture.load();

    // Both directories accept 48; the larger nominal size is scanned first.
    let icon = theme.find_icon("app", 48, 1, true).unwrap();
    assert_eq!(icon.content_type(), ContentType::Png);
    assert_eq!(theme.available_sizes("app"), [16, 48]);
}

#[test]
fn test_enumeration_is_idempotent() {
    let fixture = ThemeFixture::new("I", &[("22x22/actions", "Size=22")])
        .png("22x22/actions", "a")
        .svg("22x22/actions", "b");
    let theme = fixture.load();
    let directory = theme.directory("22x22/actions").unwrap();

    assert!(!directory.is_loaded());
    let first = directory.icons().to_vec();
    let second = directory.icons().to_vec();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_non_image_files_are_ignored() {
    let fixture = ThemeFixture::new("N", &[("16x16/apps", "Size=16")])
        .png("16x16/apps", "one")
        .svg("16x16/apps", "two")
        .file("16x16/apps", "README.txt", "icons go here");
    let theme = fixture.load();

    let directory = theme.directory("16x16/apps").unwrap();
    assert_eq!(directory.icons().len(), 2);
    assert!(!theme.has_icon("README"));
    assert!(theme.has_icon("one"));
}

#[test]
fn test_total_miss() {
    let parent = ThemeFixture::new("P", &[("48x48/apps", "Size=48")]).png("48x48/apps", "a");
    let child = ThemeFixture::new("C", &[("48x48/apps", "Size=48")]).png("48x48/apps", "b");
    let theme = child.load().with_fallback(Arc::new(parent.load()));

    assert!(theme.find_icon("nonexistent-icon", 48, 1, true).is_none());
    assert!(theme.find_icon("", 48, 1, true).is_none());
    assert!(theme.find_icon("a", 0, 1, true).is_none());
}

#[test]
fn test_missing_directory_on_disk() {
    let fixture = ThemeFixture::new("M", &[("48x48/apps", "Size=48")]).png("48x48/apps", "a");
    fs::remove_dir_all(fixture.root().join("48x48/apps")).unwrap();
    let theme = fixture.load();
    assert!(theme.find_icon("a", 48, 1, true).is_none());
}

#[test]
fn test_chain_builder_and_parse_theme() {
    let base = ThemeFixture::new("Base", &[("16x16/apps", "Size=16")]).png("16x16/apps", "base");
    let top = ThemeFixture::new("Top", &[("16x16/apps", "Size=16")]).png("16x16/apps", "top");

    let theme = ThemeChain::builder()
        .base(base.index_file())
        .then(top.index_file())
        .build()
        .unwrap()
        .unwrap();
    assert_eq!(theme.name(), "Top");
    assert_eq!(theme.comment(), "Fixture theme");
    assert_eq!(theme.find_icon("base", 16, 1, true).unwrap().owning_theme(), "Base");

    let parsed = parse_theme(base.index_file()).unwrap();
    assert_eq!(parsed.name(), "Base");
    assert_eq!(parsed.root(), base.root());
}

#[test]
fn test_svg_with_long_license_header_is_indexed() {
    let header = format!(
        "<?xml version=\"1.0\"?>\n<!--\n{}-->\n",
        "Permission is granted to copy and distribute this icon.\n".repeat(150)
    );
    let fixture = ThemeFixture::new(
        "L",
        &[("scalable/apps", "Size=48\nType=Scalable\nMinSize=8\nMaxSize=512")],
    )
    .file("scalable/apps", "licensed.svg", &format!("{header}{SVG}"));
    let theme = fixture.load();

    let icon = theme.find_icon("licensed", 48, 1, true).unwrap();
    assert_eq!(icon.content_type(), ContentType::Svg);
}
