//! Sequential multi-file extraction
//!
//! Files are processed one at a time in submission order. A failure is
//! recorded for that file only and the batch moves on; nothing is shared
//! between files.

use crate::{
    asset::Asset,
    error::Result,
    options::ExtractOptions,
    record::MetadataRecord,
};
use std::path::{Path, PathBuf};

/// Something that can be turned into an [`Asset`] when its turn comes
///
/// Loading is deferred so only one file's bytes are held in memory at a time.
pub trait AssetSource {
    /// Name used to label a failure for this source
    fn name(&self) -> String;

    /// Produce the asset, honouring `options.max_file_size` while loading
    fn load(self, options: &ExtractOptions) -> Result<Asset>;
}

impl AssetSource for Asset {
    fn name(&self) -> String {
        self.filename().to_string()
    }

    fn load(self, _options: &ExtractOptions) -> Result<Asset> {
        Ok(self)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl AssetSource for PathBuf {
    fn name(&self) -> String {
        file_label(self)
    }

    fn load(self, options: &ExtractOptions) -> Result<Asset> {
        Asset::open_with(self, options)
    }
}

impl AssetSource for &Path {
    fn name(&self) -> String {
        file_label(self)
    }

    fn load(self, options: &ExtractOptions) -> Result<Asset> {
        Asset::open_with(self, options)
    }
}

/// Progress report handed to the batch callback after each file
#[derive(Debug)]
pub struct Progress<'a> {
    /// Zero-based position of the file in the batch
    pub index: usize,
    pub name: &'a str,
    pub result: &'a Result<MetadataRecord>,
}

/// Extract every source in order, reporting after each one
///
/// Returns one entry per source, in the same order. Failed entries are
/// [`crate::Error::Extraction`] values naming the file.
pub fn extract_batch<I, S, F>(
    sources: I,
    options: &ExtractOptions,
    mut on_progress: F,
) -> Vec<Result<MetadataRecord>>
where
    I: IntoIterator<Item = S>,
    S: AssetSource,
    F: FnMut(Progress<'_>),
{
    let mut results = Vec::new();
    for (index, source) in sources.into_iter().enumerate() {
        let name = source.name();
        let result = source
            .load(options)
            .and_then(|asset| asset.extract_with(options))
            .map_err(|e| e.for_file(&name));

        match &result {
            Ok(_) => log::debug!("[{index}] {name}: extracted"),
            Err(e) => log::warn!("[{index}] {e}"),
        }
        on_progress(Progress {
            index,
            name: &name,
            result: &result,
        });
        results.push(result);
    }
    results
}

/// [`extract_batch`] without a progress callback
pub fn extract_all<I, S>(sources: I, options: &ExtractOptions) -> Vec<Result<MetadataRecord>>
where
    I: IntoIterator<Item = S>,
    S: AssetSource,
{
    extract_batch(sources, options, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::tags;
    use crate::test_utils::{jpeg_with_exif, TiffBuilder};

    #[test]
    fn test_order_and_isolation() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.jpg");
        std::fs::write(&good, jpeg_with_exif(&TiffBuilder::little().ascii(tags::MAKE, "A").build()))
            .unwrap();
        let missing = dir.path().join("missing.jpg");
        let also_good = dir.path().join("notes.txt");
        std::fs::write(&also_good, b"hello").unwrap();

        let mut seen = Vec::new();
        let results = extract_batch(
            vec![good, missing, also_good],
            &ExtractOptions::default(),
            |p| seen.push((p.index, p.name.to_string(), p.result.is_ok())),
        );

        assert_eq!(
            seen,
            vec![
                (0, "good.jpg".to_string(), true),
                (1, "missing.jpg".to_string(), false),
                (2, "notes.txt".to_string(), true),
            ]
        );
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().filename(), "good.jpg");
        match &results[1] {
            Err(Error::Extraction { filename, source }) => {
                assert_eq!(filename, "missing.jpg");
                assert!(matches!(**source, Error::Io(_)));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(results[2].as_ref().unwrap().basic().is_some());
    }

    #[test]
    fn test_in_memory_assets() {
        let opts = ExtractOptions::default().with_max_file_size(16);
        let results = extract_all(
            vec![
                Asset::new("big.tif", "image/tiff", vec![0u8; 32]),
                Asset::new("small.tif", "image/tiff", TiffBuilder::big().build()),
            ],
            &opts,
        );
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_oversized_file_is_refused_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("big.tif");
        std::fs::write(&big, vec![0u8; 4096]).unwrap();

        let opts = ExtractOptions::default().with_max_file_size(64);
        let results = extract_all(vec![big.as_path()], &opts);
        match &results[0] {
            Err(Error::Extraction { filename, source }) => {
                assert_eq!(filename, "big.tif");
                assert!(matches!(**source, Error::DataTooLarge { size: 4096, max: 64 }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_batch() {
        let results = extract_all(Vec::<Asset>::new(), &ExtractOptions::default());
        assert!(results.is_empty());
    }
}
