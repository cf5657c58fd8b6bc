//! Error types for meta-extract

use std::io;

/// Result type for meta-extract operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting metadata
///
/// Only [`Error::Io`], [`Error::DataTooLarge`] and [`Error::Extraction`] ever
/// leave the public extraction API, and [`Error::Json`] only comes from export.
/// The other variants are raised inside the decoder and absorbed there as data
/// (an `error` note or a missing tag).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A read would run past the end of the buffer
    #[error("Buffer overrun: {width} bytes at offset {offset} (buffer length {len})")]
    BufferOverrun {
        offset: usize,
        width: usize,
        len: usize,
    },

    /// EXIF/TIFF signature or magic bytes did not match
    #[error("{0}")]
    InvalidSignature(String),

    /// TIFF type code outside the decodable set
    #[error("Unsupported TIFF type code {0}")]
    UnsupportedType(u16),

    /// Data size exceeds maximum allowed
    #[error("Data too large: {size} bytes (max: {max})")]
    DataTooLarge { size: usize, max: usize },

    /// The whole file could not be processed
    #[error("Failed to extract metadata from {filename}: {source}")]
    Extraction {
        filename: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error as a whole-file failure for `filename`
    ///
    /// Already-labelled failures are returned unchanged.
    pub fn for_file(self, filename: impl Into<String>) -> Self {
        match self {
            e @ Error::Extraction { .. } => e,
            e => Error::Extraction {
                filename: filename.into(),
                source: Box::new(e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_file_labels_once() {
        let err = Error::DataTooLarge { size: 10, max: 5 }.for_file("a.jpg");
        let err = err.for_file("b.jpg");
        match err {
            Error::Extraction { filename, source } => {
                assert_eq!(filename, "a.jpg");
                assert!(matches!(*source, Error::DataTooLarge { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_signature_displays_note() {
        let err = Error::InvalidSignature("Invalid TIFF magic number".into());
        assert_eq!(err.to_string(), "Invalid TIFF magic number");
    }
}
