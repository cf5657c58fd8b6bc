#![no_main]

use libfuzzer_sys::fuzz_target;
use meta_extract::xmp::extract_xmp;

fuzz_target!(|data: &[u8]| {
    for window in [0, 64, 65536] {
        let info = extract_xmp(data, window);
        if let Some(raw) = &info.raw {
            assert!(raw.chars().count() <= 503);
        }
        if !info.detected {
            assert!(info.title.is_none() && info.creator.is_none());
        }
    }
});
