//! Test utilities for building synthetic image buffers.
//!
//! No fixture files are needed: every test assembles the exact bytes it wants
//! to feed the extractor, including malformed ones.
//!
//! # Usage
//!
//! ```
//! use meta_extract::test_utils::*;
//!
//! let tiff = TiffBuilder::little().ascii(0x010F, "ACME").build();
//! let jpeg = jpeg_with_exif(&tiff);
//! assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
//! ```

use crate::reader::Endian;

/// Builds a TIFF stream with a single IFD0 placed right after the header
///
/// Payloads larger than four bytes go into a data area after the IFD and are
/// referenced by offsets relative to the start of the stream.
#[derive(Debug, Clone)]
pub struct TiffBuilder {
    endian: Endian,
    entries: Vec<Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    tag: u16,
    type_code: u16,
    count: u32,
    payload: Payload,
}

#[derive(Debug, Clone)]
enum Payload {
    Bytes(Vec<u8>),
    /// Value field written verbatim, nothing stored in the data area
    Field(u32),
}

impl TiffBuilder {
    pub fn new(endian: Endian) -> Self {
        Self {
            endian,
            entries: Vec::new(),
        }
    }

    pub fn little() -> Self {
        Self::new(Endian::Little)
    }

    pub fn big() -> Self {
        Self::new(Endian::Big)
    }

    fn u16_bytes(&self, v: u16) -> [u8; 2] {
        match self.endian {
            Endian::Little => v.to_le_bytes(),
            Endian::Big => v.to_be_bytes(),
        }
    }

    fn u32_bytes(&self, v: u32) -> [u8; 4] {
        match self.endian {
            Endian::Little => v.to_le_bytes(),
            Endian::Big => v.to_be_bytes(),
        }
    }

    fn push(mut self, tag: u16, type_code: u16, count: u32, payload: Payload) -> Self {
        self.entries.push(Entry {
            tag,
            type_code,
            count,
            payload,
        });
        self
    }

    pub fn byte(self, tag: u16, value: u8) -> Self {
        self.push(tag, 1, 1, Payload::Bytes(vec![value]))
    }

    /// ASCII tag with a terminating NUL (count = len + 1)
    pub fn ascii(self, tag: u16, value: &str) -> Self {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        let count = bytes.len() as u32;
        self.push(tag, 2, count, Payload::Bytes(bytes))
    }

    pub fn short(self, tag: u16, value: u16) -> Self {
        let bytes = self.u16_bytes(value).to_vec();
        self.push(tag, 3, 1, Payload::Bytes(bytes))
    }

    pub fn long(self, tag: u16, value: u32) -> Self {
        let bytes = self.u32_bytes(value).to_vec();
        self.push(tag, 4, 1, Payload::Bytes(bytes))
    }

    pub fn rational(self, tag: u16, numerator: u32, denominator: u32) -> Self {
        let mut bytes = self.u32_bytes(numerator).to_vec();
        bytes.extend_from_slice(&self.u32_bytes(denominator));
        self.push(tag, 5, 1, Payload::Bytes(bytes))
    }

    /// Entry with arbitrary type, count and value field, for malformed input
    pub fn raw(self, tag: u16, type_code: u16, count: u32, value_field: u32) -> Self {
        self.push(tag, type_code, count, Payload::Field(value_field))
    }

    /// Assemble header, IFD0 (with a zero next-IFD offset) and data area
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(match self.endian {
            Endian::Little => b"II",
            Endian::Big => b"MM",
        });
        out.extend_from_slice(&self.u16_bytes(42));
        out.extend_from_slice(&self.u32_bytes(8));

        let ifd_len = 2 + self.entries.len() * 12 + 4;
        let mut data_area: Vec<u8> = Vec::new();
        let data_start = 8 + ifd_len;

        out.extend_from_slice(&self.u16_bytes(self.entries.len() as u16));
        for entry in &self.entries {
            out.extend_from_slice(&self.u16_bytes(entry.tag));
            out.extend_from_slice(&self.u16_bytes(entry.type_code));
            out.extend_from_slice(&self.u32_bytes(entry.count));
            match &entry.payload {
                Payload::Field(value) => out.extend_from_slice(&self.u32_bytes(*value)),
                Payload::Bytes(bytes) if bytes.len() <= 4 => {
                    let mut field = [0u8; 4];
                    field[..bytes.len()].copy_from_slice(bytes);
                    out.extend_from_slice(&field);
                }
                Payload::Bytes(bytes) => {
                    let offset = (data_start + data_area.len()) as u32;
                    out.extend_from_slice(&self.u32_bytes(offset));
                    data_area.extend_from_slice(bytes);
                }
            }
        }
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&data_area);
        out
    }
}

/// Wrap bytes in a JPEG APP segment with the given marker (e.g. `0xE1`)
pub fn app_segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// SOI + the given segments + EOI
pub fn jpeg_with_segments(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    for segment in segments {
        out.extend_from_slice(segment);
    }
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// Minimal JPEG whose APP1 segment carries `Exif\0\0` followed by `tiff`
pub fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);
    jpeg_with_segments(&[app_segment(0xE1, &payload)])
}

/// An XMP packet with optional `dc:title` and `dc:creator` properties
pub fn xmp_packet(title: Option<&str>, creator: Option<&str>) -> String {
    let mut props = String::new();
    if let Some(title) = title {
        props.push_str(&format!(
            "<dc:title><rdf:Alt><rdf:li xml:lang=\"x-default\">{title}</rdf:li></rdf:Alt></dc:title>\n"
        ));
    }
    if let Some(creator) = creator {
        props.push_str(&format!(
            "<dc:creator><rdf:Seq><rdf:li>{creator}</rdf:li></rdf:Seq></dc:creator>\n"
        ));
    }
    format!(
        r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
<rdf:Description rdf:about="" xmlns:dc="http://purl.org/dc/elements/1.1/">
{props}</rdf:Description>
</rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#
    )
}

/// Minimal JPEG carrying `xmp` in a standard APP1 XMP segment
pub fn jpeg_with_xmp(xmp: &str) -> Vec<u8> {
    let mut payload = b"http://ns.adobe.com/xap/1.0/\0".to_vec();
    payload.extend_from_slice(xmp.as_bytes());
    jpeg_with_segments(&[app_segment(0xE1, &payload)])
}
