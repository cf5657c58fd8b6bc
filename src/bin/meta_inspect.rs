//! Print the metadata of one or more image files as JSON or CSV
//!
//! Run: `cargo run --features cli --bin meta-inspect -- --format csv photo.jpg scan.tif`

use clap::{Parser, ValueEnum};
use meta_extract::{export, extract_batch, Asset, AssetSource, ExtractOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "meta-inspect",
    version,
    about = "Extract EXIF, IPTC presence and XMP from images"
)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Treat every file as this MIME type instead of guessing from the extension
    #[arg(long)]
    mime: Option<String>,

    /// Bytes searched for the EXIF APP1 marker
    #[arg(long, conflicts_with = "unbounded_scan")]
    exif_scan_limit: Option<usize>,

    /// Search the whole file for the EXIF APP1 marker
    #[arg(long)]
    unbounded_scan: bool,

    /// Image files to inspect, processed in order
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

/// A path whose declared MIME type may be overridden on the command line
struct Input {
    path: PathBuf,
    mime: Option<String>,
}

impl AssetSource for Input {
    fn name(&self) -> String {
        self.path.name()
    }

    fn load(self, options: &ExtractOptions) -> meta_extract::Result<Asset> {
        let asset = Asset::open_with(&self.path, options)?;
        Ok(match self.mime {
            Some(mime) => asset.with_mime_type(mime),
            None => asset,
        })
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = ExtractOptions::default();
    if cli.unbounded_scan {
        options = options.with_exif_scan_limit(None);
    } else if let Some(limit) = cli.exif_scan_limit {
        options = options.with_exif_scan_limit(Some(limit));
    }

    let total = cli.files.len();
    let inputs = cli.files.into_iter().map(|path| Input {
        path,
        mime: cli.mime.clone(),
    });
    let results = extract_batch(inputs, &options, |p| {
        log::info!("processed {}/{}: {}", p.index + 1, total, p.name);
    });

    let mut failed = false;
    let mut records = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                eprintln!("error: {e}");
                failed = true;
            }
        }
    }

    match cli.format {
        Format::Json => match export::to_json(&records) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        Format::Csv => println!("{}", export::to_csv(&records)),
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
