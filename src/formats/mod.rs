//! Container sniffing and per-container extraction paths
//!
//! The declared MIME type selects the path:
//! - `jpeg`/`jpg` → EXIF from the APP1 segment, IPTC presence and XMP
//! - `tiff` → EXIF from the bare TIFF header
//! - anything else → basic file information only, no binary parsing

pub mod jpeg_io;
pub mod tiff_io;

use serde::Serialize;
use std::path::Path;

/// MIME type reported when nothing better is known
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Container format - decides which extraction path runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// JPEG (JFIF/Exif structure)
    Jpeg,
    /// Bare TIFF stream
    Tiff,
    /// Anything else; only basic file information is reported
    Unsupported,
}

impl ContainerKind {
    /// Classify a declared MIME type
    ///
    /// Matching is a case-insensitive substring test, so `image/JPG` and
    /// `image/x-tiff` are both recognised.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.contains("jpeg") || mime.contains("jpg") {
            ContainerKind::Jpeg
        } else if mime.contains("tiff") {
            ContainerKind::Tiff
        } else {
            ContainerKind::Unsupported
        }
    }

    /// Detect container from a file extension (without dot)
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        if Self::Jpeg.extensions().contains(&ext.as_str()) {
            ContainerKind::Jpeg
        } else if Self::Tiff.extensions().contains(&ext.as_str()) {
            ContainerKind::Tiff
        } else {
            ContainerKind::Unsupported
        }
    }

    /// File extensions this container accepts
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ContainerKind::Jpeg => &["jpg", "jpeg", "jpe", "jfif"],
            ContainerKind::Tiff => &["tif", "tiff"],
            ContainerKind::Unsupported => &[],
        }
    }

    /// Primary MIME type, if the container has one
    pub fn to_mime(&self) -> Option<&'static str> {
        match self {
            ContainerKind::Jpeg => Some("image/jpeg"),
            ContainerKind::Tiff => Some("image/tiff"),
            ContainerKind::Unsupported => None,
        }
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ContainerKind::Jpeg => "jpeg",
            ContainerKind::Tiff => "tiff",
            ContainerKind::Unsupported => "unsupported",
        })
    }
}

/// Guess a MIME type from a path's extension
///
/// Covers the supported containers plus common image types that take the
/// fallback path, so records still carry a meaningful type.
pub fn mime_from_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return DEFAULT_MIME;
    };
    if let Some(mime) = ContainerKind::from_extension(ext).to_mime() {
        return mime;
    }
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" | "heif" => "image/heif",
        "avif" => "image/avif",
        _ => DEFAULT_MIME,
    }
}
