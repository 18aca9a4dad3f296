//! Content-type sniffing for icon files.
//!
//! Classification looks at file contents, never at the extension: a PNG is
//! recognized by its signature and an SVG by an XML document whose root
//! element is `<svg>`.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use image::ImageFormat;

/// Number of leading bytes inspected when sniffing a file.
const SNIFF_LEN: usize = 4096;

/// The two image kinds an icon theme may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Raster bitmap (`image/png`).
    Png,
    /// Scalable vector (`image/svg+xml`).
    Svg,
}

impl ContentType {
    /// The MIME type string.
    pub fn mime(self) -> &'static str {
        match self {
            ContentType::Png => "image/png",
            ContentType::Svg => "image/svg+xml",
        }
    }

    /// Returns true for raster bitmaps.
    pub fn is_raster(self) -> bool {
        matches!(self, ContentType::Png)
    }

    /// Returns true for vector images.
    pub fn is_vector(self) -> bool {
        matches!(self, ContentType::Svg)
    }

    /// Classify the leading bytes of a file.
    ///
    /// Returns `None` for anything that is not a PNG or an SVG document,
    /// including an XML prolog that is cut off before the root element.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match classify(bytes) {
            Sniff::Found(kind) => Some(kind),
            Sniff::Rejected | Sniff::Incomplete => None,
        }
    }

    /// Classify a file on disk by reading its first bytes.
    ///
    /// Reading continues past the first block while an XML prolog (long
    /// comments, large DOCTYPE subsets) has not reached the root element.
    pub fn sniff_file(path: impl AsRef<Path>) -> io::Result<Option<Self>> {
        let mut file = File::open(path.as_ref())?;
        let mut buf = Vec::with_capacity(SNIFF_LEN);
        let mut block = SNIFF_LEN as u64;
        loop {
            let read = file.by_ref().take(block).read_to_end(&mut buf)?;
            match classify(&buf) {
                Sniff::Found(kind) => return Ok(Some(kind)),
                Sniff::Rejected => return Ok(None),
                Sniff::Incomplete if (read as u64) < block => return Ok(None),
                Sniff::Incomplete => block = buf.len() as u64,
            }
        }
    }
}

/// Outcome of inspecting a prefix of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sniff {
    Found(ContentType),
    Rejected,
    /// The prefix ends before the root element is known.
    Incomplete,
}

fn classify(bytes: &[u8]) -> Sniff {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Sniff::Found(ContentType::Png),
        Ok(_) => Sniff::Rejected,
        Err(_) => svg_root(bytes),
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime())
    }
}

/// Walk past the XML prolog (declaration, comments, doctype, processing
/// instructions) and check that the first element is `svg`.
fn svg_root(bytes: &[u8]) -> Sniff {
    let (text, malformed) = decode_prefix(bytes);
    match prolog_root(text) {
        Sniff::Incomplete if malformed => Sniff::Rejected,
        sniff => sniff,
    }
}

fn prolog_root(text: &str) -> Sniff {
    let mut rest = text.trim_start_matches('\u{feff}');

    loop {
        rest = rest.trim_start();
        let end = if let Some(after) = rest.strip_prefix("<?") {
            after.find("?>").map(|end| (after, end + 2))
        } else if let Some(after) = rest.strip_prefix("<!--") {
            after.find("-->").map(|end| (after, end + 3))
        } else if let Some(after) = rest.strip_prefix("<!") {
            // DOCTYPE may carry an internal subset in brackets.
            match (after.find('['), after.find('>')) {
                (Some(open), Some(close)) if open < close => {
                    after[open..].find("]>").map(|i| (after, open + i + 2))
                }
                (_, Some(close)) => Some((after, close + 1)),
                _ => None,
            }
        } else {
            break;
        };
        match end {
            Some((after, end)) => rest = &after[end..],
            None => return Sniff::Incomplete,
        }
    }

    if rest.is_empty() || "<!--".starts_with(rest) || "<?".starts_with(rest) {
        return Sniff::Incomplete;
    }
    let Some(tag) = rest.strip_prefix('<') else {
        return Sniff::Rejected;
    };
    let Some(name_end) = tag.find(|c: char| c.is_whitespace() || c == '>' || c == '/') else {
        return Sniff::Incomplete;
    };
    let name = &tag[..name_end];
    if name == "svg" || name.ends_with(":svg") {
        Sniff::Found(ContentType::Svg)
    } else {
        Sniff::Rejected
    }
}

/// Decode the valid UTF-8 prefix of `bytes`.
///
/// A multi-byte character cut by the buffer end is dropped. The flag is set
/// when an invalid sequence occurs before the end.
fn decode_prefix(bytes: &[u8]) -> (&str, bool) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text, false),
        Err(e) => {
            let text = std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default();
            (text, e.error_len().is_some())
        }
    }
}
