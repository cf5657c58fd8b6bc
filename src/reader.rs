//! Bounds-checked, endian-aware reads over an in-memory buffer
//!
//! Every read validates `offset + width <= len` and reports
//! [`Error::BufferOverrun`] instead of panicking, so the TIFF walker can run
//! over attacker-controlled input and drop single tags on failure.

use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

/// Longest string [`ByteReader::read_ascii`] will return
pub const MAX_ASCII_LEN: usize = 99;

/// Byte order for reading multi-byte values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    /// `II` marker, least-significant byte first
    Little,
    /// `MM` marker, most-significant byte first
    Big,
}

impl Endian {
    /// Interpret a TIFF byte order marker
    pub fn from_marker(marker: &[u8]) -> Option<Self> {
        match marker {
            b"II" => Some(Endian::Little),
            b"MM" => Some(Endian::Big),
            _ => None,
        }
    }

    fn u16_from(self, bytes: &[u8]) -> u16 {
        match self {
            Endian::Little => LittleEndian::read_u16(bytes),
            Endian::Big => BigEndian::read_u16(bytes),
        }
    }

    fn u32_from(self, bytes: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(bytes),
            Endian::Big => BigEndian::read_u32(bytes),
        }
    }
}

/// Read-only view over a byte buffer with a fixed byte order
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    endian: Endian,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self { data, endian }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn slice(&self, offset: usize, width: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(width)
            .filter(|&end| end <= self.data.len())
            .map(|end| &self.data[offset..end])
            .ok_or(Error::BufferOverrun {
                offset,
                width,
                len: self.data.len(),
            })
    }

    /// Read one byte (byte order does not apply)
    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16> {
        Ok(self.endian.u16_from(self.slice(offset, 2)?))
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32> {
        Ok(self.endian.u32_from(self.slice(offset, 4)?))
    }

    /// Decode `count` bytes as characters, one byte per character
    ///
    /// At most [`MAX_ASCII_LEN`] bytes are read no matter how large `count` is.
    /// Bytes are mapped 1:1 to `char` (Latin-1); no multi-byte decoding happens.
    pub fn read_ascii(&self, offset: usize, count: usize) -> Result<String> {
        let bytes = self.slice(offset, count.min(MAX_ASCII_LEN))?;
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }
}
