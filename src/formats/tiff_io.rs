//! Bare TIFF extraction path

use crate::{options::ExtractOptions, record::ExifData, tiff};

/// Decode IFD0 of a TIFF file
///
/// The stream starts at offset 0 and its magic number must be 42; otherwise
/// the result carries the `Invalid TIFF magic number` note and no tags.
pub fn read_exif(data: &[u8], options: &ExtractOptions) -> ExifData {
    tiff::read_ifd0(data, 0, true, options.ifd_entry_cap())
}
