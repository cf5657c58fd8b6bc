//! Minimal XMP packet scanner
//!
//! This is not an XML parser. The head of the file is viewed as text, one
//! character per byte, and searched for the `<?xpacket begin=` / `<?xpacket end=`
//! processing instructions. Inside the packet two Dublin Core properties,
//! `dc:title` and `dc:creator`, are picked out with case-insensitive patterns.
//!
//! XMP Structure:
//! - XMP packets are XML-based RDF metadata wrapped in `<?xpacket ...?>` PIs
//! - Properties can be attributes on rdf:Description or child elements
//! - Only the child-element form is recognised here

use crate::record::XmpInfo;
use regex::Regex;
use std::sync::LazyLock;

const PACKET_BEGIN: &[u8] = b"<?xpacket begin=";
const PACKET_END: &[u8] = b"<?xpacket end=";

/// Characters kept past the start of the end PI, enough for `<?xpacket end="w"?>`
const END_TAIL: usize = 20;

/// Length of the raw excerpt before the `...` suffix
pub const MAX_EXCERPT_CHARS: usize = 500;

pub const NOT_FOUND_NOTE: &str = "No XMP packet found";

static TITLE: LazyLock<Regex> = LazyLock::new(|| property_pattern("title"));
static CREATOR: LazyLock<Regex> = LazyLock::new(|| property_pattern("creator"));
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static pattern"));

fn property_pattern(name: &str) -> Regex {
    Regex::new(&format!(r"(?is)<dc:{name}\b[^>]*>(.*?)</dc:{name}>")).expect("static pattern")
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Byte-for-byte text view: each byte becomes exactly one `char`
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Inner text of a property element with nested markup removed
fn capture_text(pattern: &Regex, packet: &str) -> Option<String> {
    let inner = pattern.captures(packet)?.get(1)?.as_str();
    let text = MARKUP.replace_all(inner, " ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Locate the packet within the first `window` bytes
///
/// Returns the byte range from the begin PI through `END_TAIL` bytes past the
/// start of the end PI (clamped to the window).
pub fn find_packet(data: &[u8], window: usize) -> Option<std::ops::Range<usize>> {
    let view = &data[..data.len().min(window)];
    let start = find(view, PACKET_BEGIN)?;
    let end = start + find(&view[start..], PACKET_END)?;
    Some(start..view.len().min(end + END_TAIL))
}

/// Scan the head of `data` for an XMP packet
pub fn extract_xmp(data: &[u8], window: usize) -> XmpInfo {
    let Some(range) = find_packet(data, window) else {
        return XmpInfo {
            detected: false,
            note: Some(NOT_FOUND_NOTE.to_string()),
            ..Default::default()
        };
    };

    let packet = latin1(&data[range.clone()]);
    log::debug!("XMP packet at bytes {}..{}", range.start, range.end);

    let mut raw: String = packet.chars().take(MAX_EXCERPT_CHARS).collect();
    raw.push_str("...");

    XmpInfo {
        detected: true,
        raw: Some(raw),
        title: capture_text(&TITLE, &packet),
        creator: capture_text(&CREATOR, &packet),
        note: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::xmp_packet;

    #[test]
    fn test_detects_packet_and_fields() {
        let xmp = xmp_packet(Some("Sunset"), Some("Jane Doe"));
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(xmp.as_bytes());

        let info = extract_xmp(&data, 65536);
        assert!(info.detected);
        assert_eq!(info.title.as_deref(), Some("Sunset"));
        assert_eq!(info.creator.as_deref(), Some("Jane Doe"));
        assert!(info.note.is_none());

        let raw = info.raw.unwrap();
        assert!(raw.starts_with("<?xpacket begin="));
        assert!(raw.ends_with("..."));
    }

    #[test]
    fn test_excerpt_is_truncated() {
        let filler = "x".repeat(2000);
        let xmp = xmp_packet(Some(&filler), None);
        let info = extract_xmp(xmp.as_bytes(), 65536);
        let raw = info.raw.unwrap();
        assert_eq!(raw.chars().count(), MAX_EXCERPT_CHARS + 3);
        // fields come from the whole packet, not the excerpt
        assert_eq!(info.title.map(|t| t.len()), Some(2000));
    }

    #[test]
    fn test_missing_end_is_not_detected() {
        let data = b"<?xpacket begin=\"\"?><x:xmpmeta/>";
        let info = extract_xmp(data, 65536);
        assert!(!info.detected);
        assert!(info.raw.is_none());
        assert_eq!(info.note.as_deref(), Some(NOT_FOUND_NOTE));
    }

    #[test]
    fn test_end_before_begin_is_not_detected() {
        let data = b"<?xpacket end=\"w\"?> ... <?xpacket begin=\"\"?>";
        assert!(!extract_xmp(data, 65536).detected);
    }

    #[test]
    fn test_window_bounds_search() {
        let mut data = vec![b' '; 70_000];
        data.extend_from_slice(xmp_packet(None, None).as_bytes());
        assert!(!extract_xmp(&data, 65536).detected);
        assert!(extract_xmp(&data, data.len()).detected);
    }

    #[test]
    fn test_packet_tail_is_clamped() {
        let data = b"<?xpacket begin=\"\"?><?xpacket end=";
        let range = find_packet(data, 65536).unwrap();
        assert_eq!(range, 0..data.len());
    }

    #[test]
    fn test_fields_are_case_insensitive_and_optional() {
        let data = b"<?xpacket begin=''?><DC:Title>Hi</DC:TITLE><?xpacket end='w'?>";
        let info = extract_xmp(data, 65536);
        assert_eq!(info.title.as_deref(), Some("Hi"));
        assert!(info.creator.is_none());
    }

    #[test]
    fn test_high_bytes_map_one_to_one() {
        let mut data = b"<?xpacket begin=''?><dc:creator>".to_vec();
        data.extend_from_slice(&[b'J', 0xF6, b'r', b'g']);
        data.extend_from_slice(b"</dc:creator><?xpacket end='w'?>");
        let info = extract_xmp(&data, 65536);
        assert_eq!(info.creator.as_deref(), Some("J\u{f6}rg"));
    }
}
