//! File lookup inside an unpacked widget package.
//!
//! Implements the W3C widget rules for finding a file within a widget
//! package (with localized `locales/<tag>/` folders) and for identifying
//! the media type of a file.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use manifest_parser::utils::validate_language_tag;

/// Directory holding localized copies of package files.
pub const LOCALE_DIRECTORY: &str = "locales";

/// Start files tried when the manifest declares no usable content.
pub const DEFAULT_START_FILES: &[&str] = &[
    "index.htm",
    "index.html",
    "index.svg",
    "index.xhtml",
    "index.xht",
];

/// Icon files picked up even when not declared.
pub const DEFAULT_ICON_FILES: &[&str] = &["icon.svg", "icon.ico", "icon.png", "icon.gif", "icon.jpg"];

/// Media types accepted for icons.
pub const ICON_MIME_TYPES: &[&str] = &[
    "image/gif",
    "image/png",
    "image/vnd.microsoft.icon",
    "image/svg+xml",
    "image/jpeg",
];

const FILE_IDENTIFICATION_TABLE: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("xml", "application/xml"),
    ("txt", "text/plain"),
    ("wav", "audio/x-wav"),
    ("xhtml", "application/xhtml+xml"),
    ("xht", "application/xhtml+xml"),
    ("gif", "image/gif"),
    ("png", "image/png"),
    ("ico", "image/vnd.microsoft.icon"),
    ("svg", "image/svg+xml"),
    ("jpg", "image/jpeg"),
    ("mp3", "audio/mpeg"),
];

/// Bytes read from a file when sniffing its type.
const SNIFF_LENGTH: usize = 512;

/// Outcome of looking a path up inside the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindResult {
    /// The file, as a path under the package root.
    Found(PathBuf),
    NotFound,
    /// The reference is empty or names a directory.
    Invalid,
}

impl FindResult {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, FindResult::Found(_))
    }
}

/// Check `candidate`, returning `None` when there is nothing at that path.
fn probe(candidate: PathBuf) -> Option<FindResult> {
    let metadata = fs::metadata(&candidate).ok()?;
    if metadata.is_dir() {
        return Some(FindResult::Invalid);
    }
    Some(FindResult::Found(candidate))
}

/// Locale folders with a valid language tag name, in sorted order.
fn locale_folders(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(root.join(LOCALE_DIRECTORY)) else {
        return Vec::new();
    };
    let mut folders: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(validate_language_tag)
        })
        .map(|entry| entry.path())
        .collect();
    folders.sort();
    folders
}

/// Find the file `reference` points at within the package at `root`.
///
/// Localized copies under `locales/<tag>/` take precedence over the file at
/// the package root. A reference into `locales/` itself must name a valid
/// language tag and is then looked up by its remainder.
#[must_use]
pub fn find_file_within_widget(root: &Path, reference: &str) -> FindResult {
    let reference = reference.strip_prefix('/').unwrap_or(reference);
    if reference.is_empty() {
        return FindResult::Invalid;
    }

    let mut components = reference.split('/');
    let relative = if components.next() == Some(LOCALE_DIRECTORY) {
        match components.next() {
            Some(tag) if validate_language_tag(tag) => components.collect::<Vec<_>>().join("/"),
            _ => return FindResult::NotFound,
        }
    } else {
        reference.to_string()
    };

    for folder in locale_folders(root) {
        if let Some(result) = probe(folder.join(&relative)) {
            return result;
        }
    }
    probe(root.join(&relative)).unwrap_or(FindResult::NotFound)
}

fn mime_type_from_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    if !extension.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    FILE_IDENTIFICATION_TABLE
        .iter()
        .find(|(known, _)| *known == extension)
        .map(|(_, mime)| *mime)
}

fn sniff_mime_type(path: &Path) -> Option<&'static str> {
    let mut head = Vec::with_capacity(SNIFF_LENGTH);
    File::open(path)
        .ok()?
        .take(SNIFF_LENGTH as u64)
        .read_to_end(&mut head)
        .ok()?;

    let mime = if head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a") {
        "image/gif"
    } else if head.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if head.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if head.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
        "image/vnd.microsoft.icon"
    } else if String::from_utf8_lossy(&head).contains("<svg") {
        "image/svg+xml"
    } else {
        return None;
    };
    Some(mime)
}

/// Media type of `path`: from its extension when known, otherwise sniffed
/// from the file contents.
#[must_use]
pub fn identify_mime_type(path: &Path) -> Option<&'static str> {
    mime_type_from_extension(path).or_else(|| sniff_mime_type(path))
}

#[must_use]
pub fn is_icon_mime_type_supported(path: &Path) -> bool {
    identify_mime_type(path).is_some_and(|mime| ICON_MIME_TYPES.contains(&mime))
}
