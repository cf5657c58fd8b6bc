//! Input boundary and record assembly
//!
//! An [`Asset`] is one image held in memory together with the attributes the
//! caller knows about it (file name, declared MIME type, last-modified time).
//! Extraction never touches the file system; [`Asset::open`] is a convenience
//! that reads a file into an `Asset` first.

use crate::{
    error::{Error, Result},
    formats::{jpeg_io, mime_from_path, tiff_io, ContainerKind},
    options::ExtractOptions,
    record::{BasicInfo, MetadataRecord, RecordParts},
    xmp,
};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Note attached to records that take the fallback path
pub const FALLBACK_NOTE: &str =
    "Binary metadata extraction is only supported for JPEG and TIFF files";

/// An image file loaded into memory
///
/// # Example
///
/// ```
/// use meta_extract::Asset;
///
/// # fn main() -> meta_extract::Result<()> {
/// let asset = Asset::new("photo.png", "image/png", vec![0x89, b'P', b'N', b'G']);
/// let record = asset.extract()?;
/// assert!(record.basic().is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Asset {
    filename: String,
    mime_type: String,
    last_modified: Option<DateTime<Utc>>,
    bytes: Vec<u8>,
}

impl Asset {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            last_modified: None,
            bytes,
        }
    }

    /// Replace the declared MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Read a file into memory with default limits
    ///
    /// The MIME type is guessed from the extension and the last-modified time
    /// comes from the file system when available.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &ExtractOptions::default())
    }

    /// Read a file into memory, refusing files over `options.max_file_size`
    ///
    /// The size is checked against the file metadata before any byte is read,
    /// and the read itself never takes more than the limit plus one byte.
    pub fn open_with<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        let max = options.max_file_size;
        let metadata = std::fs::metadata(path)?;
        check_size(metadata.len(), max)?;

        let mut bytes = Vec::new();
        File::open(path)?
            .take((max as u64).saturating_add(1))
            .read_to_end(&mut bytes)?;
        // the file may have grown since the metadata call
        check_size(bytes.len() as u64, max)?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            filename,
            mime_type: mime_from_path(path).to_string(),
            last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            bytes,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Extraction path selected by the declared MIME type
    pub fn container(&self) -> ContainerKind {
        ContainerKind::from_mime(&self.mime_type)
    }

    /// Extract metadata with default limits
    pub fn extract(&self) -> Result<MetadataRecord> {
        self.extract_with(&ExtractOptions::default())
    }

    /// Extract metadata
    ///
    /// Per-tag and per-segment problems end up inside the record. The only
    /// failure is a buffer larger than `options.max_file_size`, reported as
    /// [`Error::Extraction`] naming the file.
    pub fn extract_with(&self, options: &ExtractOptions) -> Result<MetadataRecord> {
        assemble(
            &self.bytes,
            &self.mime_type,
            &self.filename,
            self.last_modified,
            options,
        )
        .map_err(|e| e.for_file(&self.filename))
    }
}

/// Extract metadata from a borrowed buffer
///
/// This is the core entry point: one buffer, its declared MIME type and its
/// file name in, one record out. The buffer is not retained.
pub fn extract(
    bytes: &[u8],
    mime_type: &str,
    filename: &str,
    options: &ExtractOptions,
) -> Result<MetadataRecord> {
    assemble(bytes, mime_type, filename, None, options).map_err(|e| e.for_file(filename))
}

fn check_size(size: u64, max: usize) -> Result<()> {
    if size > max as u64 {
        return Err(Error::DataTooLarge {
            size: usize::try_from(size).unwrap_or(usize::MAX),
            max,
        });
    }
    Ok(())
}

fn assemble(
    bytes: &[u8],
    mime_type: &str,
    filename: &str,
    last_modified: Option<DateTime<Utc>>,
    options: &ExtractOptions,
) -> Result<MetadataRecord> {
    check_size(bytes.len() as u64, options.max_file_size)?;

    let container = ContainerKind::from_mime(mime_type);
    log::debug!("{filename}: {} bytes, {mime_type} -> {container}", bytes.len());

    let parts = match container {
        ContainerKind::Jpeg => RecordParts {
            exif: jpeg_io::read_exif(bytes, options),
            iptc: Some(jpeg_io::scan_iptc(bytes, options.iptc_scan_limit)),
            xmp: Some(xmp::extract_xmp(bytes, options.xmp_window)),
            basic: None,
        },
        ContainerKind::Tiff => RecordParts {
            exif: tiff_io::read_exif(bytes, options),
            ..Default::default()
        },
        ContainerKind::Unsupported => RecordParts {
            basic: Some(BasicInfo {
                mime_type: mime_type.to_string(),
                last_modified,
                note: FALLBACK_NOTE.to_string(),
            }),
            ..Default::default()
        },
    };

    Ok(MetadataRecord::new(
        filename.to_string(),
        bytes.len() as u64,
        mime_type.to_string(),
        last_modified,
        container,
        parts,
    ))
}
