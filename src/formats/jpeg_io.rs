//! JPEG extraction paths: EXIF APP1 segment and IPTC marker presence
//!
//! Neither scan walks the JPEG segment structure; both search the raw bytes
//! for marker pairs, which also works on truncated or slightly corrupt files.

use crate::{
    options::ExtractOptions,
    record::{ExifData, IptcInfo},
    tiff,
};

// JPEG markers
const MARKER_PREFIX: u8 = 0xFF;
const APP1: u8 = 0xE1; // EXIF / XMP
const APP2: u8 = 0xE2; // ICC, FlashPix
const APP13: u8 = 0xED; // Photoshop IRB / IPTC

const EXIF_SIGNATURE: &[u8] = b"Exif\0\0";

/// Distance from the marker to the EXIF signature (marker + segment length)
const SIGNATURE_OFFSET: usize = 4;

/// Note attached to every IPTC result; `detected` carries the outcome
pub const IPTC_NOTE: &str =
    "Presence of an IPTC/Photoshop (APP13) or APP2 marker only; IPTC records are not decoded";

/// Position of the first `FF <marker>` pair within `limit` bytes
fn find_marker(data: &[u8], markers: &[u8], limit: usize) -> Option<usize> {
    let window = &data[..data.len().min(limit)];
    window
        .windows(2)
        .position(|pair| pair[0] == MARKER_PREFIX && markers.contains(&pair[1]))
}

/// Offset of the TIFF stream inside the first APP1 segment
///
/// Only the first `FF E1` pair is considered; if it is not followed by the
/// `Exif\0\0` signature the file has no usable EXIF.
pub fn find_exif_tiff_offset(data: &[u8], scan_limit: Option<usize>) -> Option<usize> {
    let marker = find_marker(data, &[APP1], scan_limit.unwrap_or(usize::MAX))?;
    let signature_start = marker + SIGNATURE_OFFSET;
    let signature = data.get(signature_start..signature_start + EXIF_SIGNATURE.len())?;
    if signature != EXIF_SIGNATURE {
        log::debug!("APP1 marker at {marker} is not an EXIF segment");
        return None;
    }
    Some(signature_start + EXIF_SIGNATURE.len())
}

/// Decode IFD0 of the EXIF segment; empty when there is no EXIF segment
pub fn read_exif(data: &[u8], options: &ExtractOptions) -> ExifData {
    match find_exif_tiff_offset(data, options.exif_scan_limit) {
        Some(tiff_offset) => {
            log::debug!("EXIF TIFF stream at offset {tiff_offset}");
            tiff::read_ifd0(data, tiff_offset, false, options.ifd_entry_cap())
        }
        None => ExifData::default(),
    }
}

/// Report whether an APP13 or APP2 marker occurs within `scan_limit` bytes
pub fn scan_iptc(data: &[u8], scan_limit: usize) -> IptcInfo {
    IptcInfo {
        detected: find_marker(data, &[APP13, APP2], scan_limit).is_some(),
        note: IPTC_NOTE.to_string(),
    }
}
