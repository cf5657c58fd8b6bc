//! Extraction limits
//!
//! Every scan over the input is bounded by one of these values. Hosts can
//! tighten or relax the defaults, or load them from JSON.

use serde::{Deserialize, Serialize};

/// Default byte cap for the JPEG APP1 (`FF E1`) search
pub const DEFAULT_EXIF_SCAN_LIMIT: usize = 512 * 1024;

/// Default IPTC marker window
pub const DEFAULT_IPTC_SCAN_LIMIT: usize = 32 * 1024;

/// Default XMP text window
pub const DEFAULT_XMP_WINDOW: usize = 64 * 1024;

/// Default cap on IFD entries visited
pub const DEFAULT_MAX_IFD_ENTRIES: usize = 50;

/// Maximum file size accepted for extraction (256 MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 256 * 1024 * 1024;

/// Options for metadata extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Bytes searched for the EXIF APP1 marker; `None` scans the whole buffer
    pub exif_scan_limit: Option<usize>,

    /// Bytes searched for IPTC/Photoshop markers
    pub iptc_scan_limit: usize,

    /// Bytes decoded as text when looking for an XMP packet
    pub xmp_window: usize,

    /// IFD entries visited regardless of the declared entry count; can only
    /// lower the default cap
    pub max_ifd_entries: usize,

    /// Larger buffers are rejected with `Error::DataTooLarge`
    pub max_file_size: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            exif_scan_limit: Some(DEFAULT_EXIF_SCAN_LIMIT),
            iptc_scan_limit: DEFAULT_IPTC_SCAN_LIMIT,
            xmp_window: DEFAULT_XMP_WINDOW,
            max_ifd_entries: DEFAULT_MAX_IFD_ENTRIES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ExtractOptions {
    /// Set the EXIF marker search cap; `None` removes it
    pub fn with_exif_scan_limit(mut self, limit: Option<usize>) -> Self {
        self.exif_scan_limit = limit;
        self
    }

    pub fn with_iptc_scan_limit(mut self, limit: usize) -> Self {
        self.iptc_scan_limit = limit;
        self
    }

    pub fn with_xmp_window(mut self, window: usize) -> Self {
        self.xmp_window = window;
        self
    }

    /// Lower the IFD entry cap; values above the default are clamped to it
    pub fn with_max_ifd_entries(mut self, max: usize) -> Self {
        self.max_ifd_entries = max.min(DEFAULT_MAX_IFD_ENTRIES);
        self
    }

    /// IFD entry cap actually applied, never above [`DEFAULT_MAX_IFD_ENTRIES`]
    ///
    /// Options loaded from JSON bypass the builder, so the clamp is repeated
    /// here.
    pub fn ifd_entry_cap(&self) -> usize {
        self.max_ifd_entries.min(DEFAULT_MAX_IFD_ENTRIES)
    }

    pub fn with_max_file_size(mut self, max: usize) -> Self {
        self.max_file_size = max;
        self
    }
}
