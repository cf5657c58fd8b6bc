//! Per-image metadata record
//!
//! A [`MetadataRecord`] is assembled once per processed file and handed to the
//! caller; nothing in the crate mutates it afterwards. Its parts ([`ExifData`],
//! [`IptcInfo`], [`XmpInfo`], [`BasicInfo`]) are produced by independent
//! extraction passes over the same buffer.

use crate::formats::ContainerKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// A decoded TIFF tag value
///
/// Serialized adjacently tagged so the TIFF type survives JSON export:
/// `{"type":"text","value":"ACME"}`, `{"type":"absent"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TagValue {
    /// BYTE (type 1)
    Byte(u8),
    /// ASCII (type 2), at most 99 characters
    Text(String),
    /// SHORT (type 3)
    Short(u16),
    /// LONG (type 4)
    Long(u32),
    /// RATIONAL (type 5) as numerator / denominator, `0` when the denominator is `0`
    Rational(f64),
    /// Type code the decoder does not handle
    Absent,
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value for BYTE, SHORT and LONG tags
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            TagValue::Byte(v) => Some(v.into()),
            TagValue::Short(v) => Some(v.into()),
            TagValue::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            TagValue::Rational(v) => Some(v),
            ref other => other.as_u32().map(f64::from),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TagValue::Absent)
    }
}

impl fmt::Display for TagValue {
    /// Plain rendering used by CSV export; `Absent` renders empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Byte(v) => write!(f, "{v}"),
            TagValue::Text(s) => f.write_str(s),
            TagValue::Short(v) => write!(f, "{v}"),
            TagValue::Long(v) => write!(f, "{v}"),
            TagValue::Rational(v) => write!(f, "{v}"),
            TagValue::Absent => Ok(()),
        }
    }
}

/// EXIF field name to value mapping, plus an optional error note
///
/// Serializes flat, e.g. `{"Make":{…},"Model":{…}}` or
/// `{"error":"Invalid TIFF magic number"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExifData {
    #[serde(flatten)]
    tags: BTreeMap<String, TagValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ExifData {
    pub fn from_tags(tags: BTreeMap<String, TagValue>) -> Self {
        Self { tags, error: None }
    }

    /// Mapping that carries only an error note
    pub fn with_error(note: impl Into<String>) -> Self {
        Self {
            tags: BTreeMap::new(),
            error: Some(note.into()),
        }
    }

    pub fn get(&self, field: &str) -> Option<&TagValue> {
        self.tags.get(field)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True when no tags were decoded (an error note may still be present)
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// IPTC presence result; IPTC records themselves are never decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IptcInfo {
    pub detected: bool,
    pub note: String,
}

/// Best-effort XMP packet excerpt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XmpInfo {
    pub detected: bool,
    /// First 500 characters of the packet followed by `...`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Fallback information for containers without binary parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub mime_type: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub note: String,
}

/// Everything extracted from one image
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    id: Uuid,
    filename: String,
    size: u64,
    mime_type: String,
    last_modified: Option<DateTime<Utc>>,
    container: ContainerKind,
    processed_at: DateTime<Utc>,
    exif: ExifData,
    #[serde(skip_serializing_if = "Option::is_none")]
    iptc: Option<IptcInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    xmp: Option<XmpInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    basic: Option<BasicInfo>,
}

/// Parts produced by the extraction passes for one file
#[derive(Debug, Default)]
pub(crate) struct RecordParts {
    pub exif: ExifData,
    pub iptc: Option<IptcInfo>,
    pub xmp: Option<XmpInfo>,
    pub basic: Option<BasicInfo>,
}

impl MetadataRecord {
    pub(crate) fn new(
        filename: String,
        size: u64,
        mime_type: String,
        last_modified: Option<DateTime<Utc>>,
        container: ContainerKind,
        parts: RecordParts,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            size,
            mime_type,
            last_modified,
            container,
            processed_at: Utc::now(),
            exif: parts.exif,
            iptc: parts.iptc,
            xmp: parts.xmp,
            basic: parts.basic,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// File size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// MIME type as declared by the caller
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// Extraction path chosen for this file
    pub fn container(&self) -> ContainerKind {
        self.container
    }

    pub fn processed_at(&self) -> DateTime<Utc> {
        self.processed_at
    }

    pub fn exif(&self) -> &ExifData {
        &self.exif
    }

    pub fn iptc(&self) -> Option<&IptcInfo> {
        self.iptc.as_ref()
    }

    pub fn xmp(&self) -> Option<&XmpInfo> {
        self.xmp.as_ref()
    }

    pub fn basic(&self) -> Option<&BasicInfo> {
        self.basic.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_value_json_keeps_type() {
        let json = serde_json::to_string(&TagValue::Text("ACME".into())).unwrap();
        assert_eq!(json, r#"{"type":"text","value":"ACME"}"#);
        let json = serde_json::to_string(&TagValue::Absent).unwrap();
        assert_eq!(json, r#"{"type":"absent"}"#);
        let json = serde_json::to_string(&TagValue::Short(6)).unwrap();
        assert_eq!(json, r#"{"type":"short","value":6}"#);
    }

    #[test]
    fn test_tag_value_display() {
        assert_eq!(TagValue::Rational(72.0).to_string(), "72");
        assert_eq!(TagValue::Rational(0.5).to_string(), "0.5");
        assert_eq!(TagValue::Long(7).to_string(), "7");
        assert_eq!(TagValue::Absent.to_string(), "");
    }

    #[test]
    fn test_tag_value_accessors() {
        assert_eq!(TagValue::Byte(3).as_u32(), Some(3));
        assert_eq!(TagValue::Short(3).as_f64(), Some(3.0));
        assert_eq!(TagValue::Text("x".into()).as_u32(), None);
        assert!(TagValue::Absent.is_absent());
    }

    #[test]
    fn test_exif_data_serializes_flat() {
        let mut tags = BTreeMap::new();
        tags.insert("Make".to_string(), TagValue::Text("ACME".into()));
        let json = serde_json::to_value(ExifData::from_tags(tags)).unwrap();
        assert_eq!(json["Make"]["value"], "ACME");
        assert!(json.get("error").is_none());

        let json = serde_json::to_value(ExifData::with_error("Invalid TIFF magic number")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid TIFF magic number" }));
    }
}
