//! Minimal TIFF/EXIF IFD walker
//!
//! This module decodes the tags of the first Image File Directory (IFD0) of a
//! TIFF stream, whether it is a bare TIFF file or the payload of a JPEG APP1
//! `Exif` segment. Sub-IFDs (Exif, GPS) are never followed; their pointer tags
//! are reported as plain numbers.
//!
//! TIFF Structure:
//! - Header: byte order (II/MM), magic (0x002A), IFD offset
//! - IFD (Image File Directory): tag count, tags (12 bytes each), next IFD offset
//! - Tags: tag ID (2), type (2), count (4), value/offset (4)
//!
//! All pointers inside the stream are relative to the TIFF base offset, which
//! is `0` for a bare TIFF file and the start of the TIFF header for EXIF.

use crate::{
    error::{Error, Result},
    reader::{ByteReader, Endian},
    record::{ExifData, TagValue},
    tags,
};
use std::collections::BTreeMap;

/// Magic number following the byte order marker
pub const TIFF_MAGIC: u16 = 42;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Note recorded when the magic number check fails
pub const INVALID_MAGIC_NOTE: &str = "Invalid TIFF magic number";

/// Note recorded when the byte order marker is neither `II` nor `MM`
pub const INVALID_BYTE_ORDER_NOTE: &str = "Invalid TIFF byte order marker";

/// TIFF field types (codes 1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
}

impl TiffType {
    /// Size in bytes of a single value of this type
    pub fn size(self) -> u64 {
        match self {
            TiffType::Byte | TiffType::Ascii | TiffType::SByte | TiffType::Undefined => 1,
            TiffType::Short | TiffType::SShort => 2,
            TiffType::Long | TiffType::SLong | TiffType::Float => 4,
            TiffType::Rational | TiffType::SRational | TiffType::Double => 8,
        }
    }
}

impl TryFrom<u16> for TiffType {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        Ok(match code {
            1 => TiffType::Byte,
            2 => TiffType::Ascii,
            3 => TiffType::Short,
            4 => TiffType::Long,
            5 => TiffType::Rational,
            6 => TiffType::SByte,
            7 => TiffType::Undefined,
            8 => TiffType::SShort,
            9 => TiffType::SLong,
            10 => TiffType::SRational,
            11 => TiffType::Float,
            12 => TiffType::Double,
            other => return Err(Error::UnsupportedType(other)),
        })
    }
}

/// Parsed TIFF header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    pub endian: Endian,
    /// IFD0 offset relative to the TIFF base offset
    pub ifd0_offset: u32,
}

impl TiffHeader {
    /// Parse the 8-byte header starting at `tiff_offset`
    ///
    /// The magic number is only checked when `check_magic` is set; the EXIF
    /// path inside JPEG trusts the `Exif\0\0` signature instead.
    pub fn parse(data: &[u8], tiff_offset: usize, check_magic: bool) -> Result<Self> {
        let marker = ByteReader::new(data, Endian::Big);
        let bom = [
            marker.read_u8(tiff_offset)?,
            marker.read_u8(tiff_offset.saturating_add(1))?,
        ];
        let endian = Endian::from_marker(&bom)
            .ok_or_else(|| Error::InvalidSignature(INVALID_BYTE_ORDER_NOTE.into()))?;

        let reader = ByteReader::new(data, endian);
        if check_magic && reader.read_u16(tiff_offset.saturating_add(2))? != TIFF_MAGIC {
            return Err(Error::InvalidSignature(INVALID_MAGIC_NOTE.into()));
        }

        Ok(Self {
            endian,
            ifd0_offset: reader.read_u32(tiff_offset.saturating_add(4))?,
        })
    }
}

/// One 12-byte IFD record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffEntry {
    pub tag: u16,
    pub type_code: u16,
    pub count: u32,
    /// Absolute position of the 4-byte value/offset field
    pub value_field: usize,
}

impl TiffEntry {
    /// Read the entry whose first byte is at `entry_offset`
    pub fn read(reader: &ByteReader<'_>, entry_offset: usize) -> Result<Self> {
        Ok(Self {
            tag: reader.read_u16(entry_offset)?,
            type_code: reader.read_u16(entry_offset.saturating_add(2))?,
            count: reader.read_u32(entry_offset.saturating_add(4))?,
            value_field: entry_offset.saturating_add(8),
        })
    }

    /// Absolute position of the payload
    ///
    /// Inline iff `size(type) * count <= 4`, otherwise the value field holds an
    /// offset from `tiff_offset`.
    pub fn value_offset(
        &self,
        reader: &ByteReader<'_>,
        ty: TiffType,
        tiff_offset: usize,
    ) -> Result<usize> {
        if ty.size() * u64::from(self.count) <= 4 {
            return Ok(self.value_field);
        }
        let pointer = reader.read_u32(self.value_field)? as usize;
        tiff_offset
            .checked_add(pointer)
            .ok_or(Error::BufferOverrun {
                offset: pointer,
                width: 0,
                len: reader.len(),
            })
    }

    /// Decode the first value of this entry
    ///
    /// Only BYTE, ASCII, SHORT, LONG and RATIONAL are decoded; every other type
    /// code yields [`TagValue::Absent`] without touching the payload.
    pub fn decode(&self, reader: &ByteReader<'_>, tiff_offset: usize) -> Result<TagValue> {
        let ty = match TiffType::try_from(self.type_code) {
            Ok(ty) => ty,
            Err(_) => return Ok(TagValue::Absent),
        };
        if !matches!(
            ty,
            TiffType::Byte | TiffType::Ascii | TiffType::Short | TiffType::Long | TiffType::Rational
        ) {
            return Ok(TagValue::Absent);
        }

        let offset = self.value_offset(reader, ty, tiff_offset)?;
        Ok(match ty {
            TiffType::Byte => TagValue::Byte(reader.read_u8(offset)?),
            // count includes the terminating NUL
            TiffType::Ascii => TagValue::Text(
                reader.read_ascii(offset, (self.count as usize).saturating_sub(1))?,
            ),
            TiffType::Short => TagValue::Short(reader.read_u16(offset)?),
            TiffType::Long => TagValue::Long(reader.read_u32(offset)?),
            TiffType::Rational => {
                let numerator = reader.read_u32(offset)?;
                let denominator = reader.read_u32(offset.saturating_add(4))?;
                TagValue::Rational(rational(numerator, denominator))
            }
            _ => TagValue::Absent,
        })
    }
}

/// `numerator / denominator`, or `0` for a zero denominator
pub fn rational(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}

/// Decode the registered tags of the IFD at absolute offset `ifd_offset`
///
/// At most `max_entries` entries are visited no matter what the entry count
/// says. An entry that cannot be read or decoded is logged and left out of the
/// result; the walk carries on with the next entry.
pub fn walk_ifd(
    reader: &ByteReader<'_>,
    tiff_offset: usize,
    ifd_offset: usize,
    max_entries: usize,
) -> Result<BTreeMap<String, TagValue>> {
    let entry_count = reader.read_u16(ifd_offset)? as usize;
    let visited = entry_count.min(max_entries);
    if visited < entry_count {
        log::debug!("IFD declares {entry_count} entries, reading the first {visited}");
    }

    let mut fields = BTreeMap::new();
    for index in 0..visited {
        let entry_offset = ifd_offset.saturating_add(2 + index * IFD_ENTRY_SIZE);
        let tag = match reader.read_u16(entry_offset) {
            Ok(tag) => tag,
            Err(e) => {
                log::warn!("Skipping IFD entry {index}: {e}");
                continue;
            }
        };
        let Some(name) = tags::name_of(tag) else {
            continue;
        };

        match TiffEntry::read(reader, entry_offset).and_then(|e| e.decode(reader, tiff_offset)) {
            Ok(value) => {
                fields.insert(name.to_string(), value);
            }
            Err(e) => log::warn!("Skipping tag 0x{tag:04X} ({name}): {e}"),
        }
    }
    Ok(fields)
}

/// Decode IFD0 of the TIFF stream at `tiff_offset`
///
/// Header and directory failures are recorded as the mapping's error note
/// rather than returned.
pub fn read_ifd0(
    data: &[u8],
    tiff_offset: usize,
    check_magic: bool,
    max_entries: usize,
) -> ExifData {
    let result = TiffHeader::parse(data, tiff_offset, check_magic).and_then(|header| {
        let reader = ByteReader::new(data, header.endian);
        let ifd_offset = tiff_offset
            .checked_add(header.ifd0_offset as usize)
            .ok_or(Error::BufferOverrun {
                offset: header.ifd0_offset as usize,
                width: 2,
                len: data.len(),
            })?;
        walk_ifd(&reader, tiff_offset, ifd_offset, max_entries)
    });

    match result {
        Ok(fields) => ExifData::from_tags(fields),
        Err(e) => {
            log::debug!("TIFF stream at offset {tiff_offset} not decoded: {e}");
            ExifData::with_error(e.to_string())
        }
    }
}
