#![no_main]

use libfuzzer_sys::fuzz_target;
use meta_extract::{export, extract, ExtractOptions};

fuzz_target!(|data: &[u8]| {
    // Hostile bytes must never panic and never fail extraction
    let options = ExtractOptions::default();
    let mut records = Vec::new();

    for mime in ["image/jpeg", "image/tiff"] {
        let record = extract(data, mime, "fuzz", &options).expect("extraction absorbs bad input");
        let _ = record.exif().len();
        records.push(record);
    }

    // Exporters must cope with whatever text the parsers produced
    let _ = export::to_csv(&records);
    let _ = export::to_json(&records);
});
