// Integration tests using the test_utils module

#[cfg(test)]
mod extraction_tests {
    use meta_extract::{
        extract, test_utils::*, Asset, ContainerKind, ExtractOptions, TagValue,
    };

    fn opts() -> ExtractOptions {
        ExtractOptions::default()
    }

    #[test]
    fn test_little_endian_tiff_make_round_trip() {
        let data = TiffBuilder::little().ascii(0x010F, "ACME").build();
        // count is 5: "ACME" plus the NUL terminator
        assert_eq!(&data[14..18], &5u32.to_le_bytes());

        let record = extract(&data, "image/tiff", "acme.tif", &opts()).unwrap();
        let exif = record.exif();
        assert_eq!(exif.len(), 1);
        assert_eq!(exif.get("Make"), Some(&TagValue::Text("ACME".into())));
    }

    #[test]
    fn test_jpeg_exif_is_classified_and_decoded() {
        let tiff = TiffBuilder::little()
            .ascii(0x010F, "ACME")
            .ascii(0x0110, "Roadrunner 3000")
            .ascii(0x0132, "2024:01:02 03:04:05")
            .short(0x0112, 6)
            .build();
        let jpeg = jpeg_with_exif(&tiff);

        let record = extract(&jpeg, "image/jpeg", "rr.jpg", &opts()).unwrap();
        assert_eq!(record.container(), ContainerKind::Jpeg);
        assert_eq!(record.exif().get("Make"), Some(&TagValue::Text("ACME".into())));
        assert_eq!(
            record.exif().get("Model"),
            Some(&TagValue::Text("Roadrunner 3000".into()))
        );
        assert_eq!(
            record.exif().get("DateTime"),
            Some(&TagValue::Text("2024:01:02 03:04:05".into()))
        );
        assert_eq!(record.exif().get("Orientation"), Some(&TagValue::Short(6)));
        assert!(record.iptc().is_some());
        assert!(record.xmp().is_some());
    }

    #[test]
    fn test_big_endian_tiff_accepted() {
        let data = TiffBuilder::big().ascii(0x010F, "ACME").build();
        assert_eq!(&data[0..2], &[0x4D, 0x4D]);
        let record = extract(&data, "image/tiff", "be.tif", &opts()).unwrap();
        assert!(record.exif().error().is_none());
        assert_eq!(record.exif().get("Make"), Some(&TagValue::Text("ACME".into())));
    }

    #[test]
    fn test_wrong_magic_yields_error_note_only() {
        let mut data = TiffBuilder::big().ascii(0x010F, "ACME").build();
        data[2..4].copy_from_slice(&43u16.to_be_bytes());
        let record = extract(&data, "image/tiff", "bad.tif", &opts()).unwrap();
        let json = serde_json::to_value(record.exif()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid TIFF magic number" }));
    }

    #[test]
    fn test_xmp_detection() {
        let xmp = xmp_packet(Some("Desert"), Some("Chuck"));
        let record = extract(&jpeg_with_xmp(&xmp), "image/jpeg", "x.jpg", &opts()).unwrap();
        let info = record.xmp().unwrap();
        assert!(info.detected);
        let raw = info.raw.as_deref().unwrap();
        assert!(!raw.is_empty());
        assert!(raw.ends_with("..."));
        assert!(raw.chars().count() <= 503);
        assert_eq!(info.title.as_deref(), Some("Desert"));
        assert_eq!(info.creator.as_deref(), Some("Chuck"));

        let record = extract(&jpeg_with_exif(&[]), "image/jpeg", "y.jpg", &opts()).unwrap();
        assert!(!record.xmp().unwrap().detected);
    }

    #[test]
    fn test_iptc_presence_only() {
        let jpeg = jpeg_with_segments(&[app_segment(0xED, b"Photoshop 3.0\08BIM\x04\x04")]);
        let record = extract(&jpeg, "image/jpeg", "i.jpg", &opts()).unwrap();
        assert!(record.iptc().unwrap().detected);
        assert!(record.exif().is_empty());
    }

    #[test]
    fn test_png_takes_fallback_path() {
        let record = Asset::new("p.png", "image/png", b"\x89PNG\r\n\x1a\n".to_vec())
            .extract()
            .unwrap();
        assert_eq!(record.container(), ContainerKind::Unsupported);
        assert!(record.basic().is_some());
        assert!(record.iptc().is_none());
        assert!(record.xmp().is_none());
    }

    #[test]
    fn test_garbage_never_fails() {
        let garbage: Vec<u8> = (0..4096u32)
            .map(|i| (i.wrapping_mul(2654435761) >> 24) as u8)
            .collect();
        for mime in ["image/jpeg", "image/tiff", "image/gif"] {
            assert!(extract(&garbage, mime, "g", &opts()).is_ok(), "{mime}");
        }
        for mime in ["image/jpeg", "image/tiff"] {
            assert!(extract(&[], mime, "empty", &opts()).is_ok(), "{mime}");
        }
    }
}

#[cfg(test)]
mod export_tests {
    use meta_extract::{export, test_utils::*, Asset};

    #[test]
    fn test_csv_escaping() {
        assert_eq!(export::escape_csv_field("test,value"), "\"test,value\"");
        assert_eq!(export::escape_csv_field("test value"), "test value");
    }

    #[test]
    fn test_csv_and_json_for_mixed_batch() {
        let tiff = TiffBuilder::little().ascii(0x010F, "ACME").build();
        let records = vec![
            Asset::new("one.jpg", "image/jpeg", jpeg_with_exif(&tiff))
                .extract()
                .unwrap(),
            Asset::new("two.png", "image/png", vec![1, 2, 3])
                .extract()
                .unwrap(),
        ];

        let csv = export::to_csv(&records);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("one.jpg,"));
        assert!(lines[1].contains(",ACME,"));
        assert!(lines[2].starts_with("two.png,3,image/png,"));

        let json: serde_json::Value =
            serde_json::from_str(&export::to_json(&records).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[1]["basic"]["mimeType"], "image/png");
    }
}

#[cfg(test)]
mod batch_tests {
    use meta_extract::{extract_batch, test_utils::*, Error, ExtractOptions};
    use std::path::PathBuf;

    #[test]
    fn test_batch_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let jpg = dir.path().join("a.jpg");
        let tif = dir.path().join("b.tiff");
        let model = TiffBuilder::big().ascii(0x0110, "M1").build();
        std::fs::write(&jpg, jpeg_with_exif(&model)).unwrap();
        std::fs::write(&tif, TiffBuilder::little().ascii(0x0110, "M2").build()).unwrap();

        let files: Vec<PathBuf> = vec![jpg, dir.path().join("gone.jpg"), tif];
        let mut order = Vec::new();
        let results = extract_batch(files, &ExtractOptions::default(), |p| order.push(p.index));

        assert_eq!(order, vec![0, 1, 2]);
        let models: Vec<Option<String>> = results
            .iter()
            .map(|r| {
                r.as_ref()
                    .ok()
                    .and_then(|rec| rec.exif().get("Model"))
                    .map(|v| v.to_string())
            })
            .collect();
        assert_eq!(models, vec![Some("M1".into()), None, Some("M2".into())]);
        assert!(matches!(
            &results[1],
            Err(Error::Extraction { filename, .. }) if filename == "gone.jpg"
        ));
    }
}
