//! JSON and CSV export of extracted records
//!
//! JSON keeps every record verbatim. CSV is a fixed, flat summary with one
//! row per record.

use crate::{error::Result, record::MetadataRecord};
use chrono::SecondsFormat;
use std::borrow::Cow;

/// CSV column headers, in output order
pub const CSV_HEADERS: [&str; 12] = [
    "Filename",
    "File Size",
    "MIME Type",
    "Processed At",
    "Make",
    "Model",
    "DateTime",
    "Orientation",
    "IPTC Detected",
    "XMP Detected",
    "XMP Title",
    "XMP Creator",
];

/// Pretty-printed JSON array of records
pub fn to_json(records: &[MetadataRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Quote a CSV field if it contains a comma, quote or newline
///
/// Quotes inside a quoted field are doubled.
///
/// # Example
///
/// ```
/// use meta_extract::export::escape_csv_field;
///
/// assert_eq!(escape_csv_field("test,value"), "\"test,value\"");
/// assert_eq!(escape_csv_field("plain"), "plain");
/// ```
pub fn escape_csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn csv_row(record: &MetadataRecord) -> Vec<String> {
    let exif = |field: &str| {
        record
            .exif()
            .get(field)
            .map(ToString::to_string)
            .unwrap_or_default()
    };
    let xmp = record.xmp();

    vec![
        record.filename().to_string(),
        record.size().to_string(),
        record.mime_type().to_string(),
        record
            .processed_at()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        exif("Make"),
        exif("Model"),
        exif("DateTime"),
        exif("Orientation"),
        record.iptc().is_some_and(|i| i.detected).to_string(),
        xmp.is_some_and(|x| x.detected).to_string(),
        xmp.and_then(|x| x.title.clone()).unwrap_or_default(),
        xmp.and_then(|x| x.creator.clone()).unwrap_or_default(),
    ]
}

/// CSV document with a header row and one row per record
pub fn to_csv(records: &[MetadataRecord]) -> String {
    let mut lines = vec![CSV_HEADERS.join(",")];
    for record in records {
        let row = csv_row(record);
        let fields: Vec<Cow<'_, str>> = row.iter().map(|f| escape_csv_field(f)).collect();
        lines.push(fields.join(","));
    }
    lines.join("\n")
}
