//! Metadata extraction from raw JPEG and TIFF bytes.
//!
//! This crate reads embedded image metadata straight from a byte buffer,
//! without an imaging library:
//!
//! - **EXIF**: the tags of IFD0, from a JPEG APP1 `Exif` segment or a bare TIFF file
//! - **IPTC**: presence of an APP13/APP2 marker only (records are not decoded)
//! - **XMP**: the packet excerpt plus `dc:title` and `dc:creator`, found by text search
//!
//! # Design Principles
//!
//! - **Defensive**: every read is bounds-checked and every scan is capped
//! - **Absorbing**: a bad tag or segment becomes data (a note or a missing
//!   field), never a failure of the whole file
//! - **Stateless**: each call owns its buffer and returns an independent record
//!
//! # Quick Start
//!
//! ```
//! use meta_extract::{extract, test_utils::*, ExtractOptions, TagValue};
//!
//! # fn main() -> meta_extract::Result<()> {
//! let tiff = TiffBuilder::little().ascii(0x010F, "ACME").build();
//! let jpeg = jpeg_with_exif(&tiff);
//!
//! let record = extract(&jpeg, "image/jpeg", "photo.jpg", &ExtractOptions::default())?;
//! assert_eq!(record.exif().get("Make"), Some(&TagValue::Text("ACME".into())));
//! # Ok(())
//! # }
//! ```
//!
//! # Batches
//!
//! ```no_run
//! use meta_extract::{export, extract_batch, ExtractOptions};
//! use std::path::PathBuf;
//!
//! let files = vec![PathBuf::from("a.jpg"), PathBuf::from("b.tif")];
//! let results = extract_batch(files, &ExtractOptions::default(), |p| {
//!     println!("{}: {}", p.index, p.name);
//! });
//! let records: Vec<_> = results.into_iter().filter_map(Result::ok).collect();
//! println!("{}", export::to_csv(&records));
//! ```

mod asset;
mod batch;
mod error;
pub mod export;
pub mod formats;
pub mod options;
pub mod reader;
mod record;
pub mod tags;
pub mod tiff;
pub mod xmp;

pub use asset::{extract, Asset, FALLBACK_NOTE};
pub use batch::{extract_all, extract_batch, AssetSource, Progress};
pub use error::{Error, Result};
pub use formats::ContainerKind;
pub use options::ExtractOptions;
pub use record::{BasicInfo, ExifData, IptcInfo, MetadataRecord, TagValue, XmpInfo};

// Test utilities - only compiled for tests or when explicitly enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
