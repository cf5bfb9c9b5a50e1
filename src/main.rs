use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use barscan::config::constants;
use barscan::debug::DebugDump;
use barscan::service::{self, BarDetectionRequest, ErrorResponse, Variant};
use barscan::{DetectionParams, ImageDocumentRasterizer};

#[derive(Parser)]
#[command(name = "barscan")]
#[command(about = "Detect bar lines and numbered measures on a sheet-music page")]
struct Cli {
    /// Path to the rendered page image
    #[arg(value_name = "DOCUMENT")]
    document_path: PathBuf,

    /// Page index to process
    #[arg(long, default_value_t = constants::DEFAULT_PAGE)]
    page: usize,

    /// Minimum width between bars in pixels
    #[arg(long, default_value_t = constants::DEFAULT_MIN_BAR_WIDTH)]
    min_bar_width: u32,

    /// Minimum height for a valid bar line in pixels
    #[arg(long, default_value_t = constants::DEFAULT_MIN_BAR_HEIGHT)]
    min_bar_height: u32,

    /// Rasterization resolution
    #[arg(long, default_value_t = constants::DEFAULT_DPI)]
    dpi: u32,

    /// Emit the advanced response (default parameters, confidence label)
    #[arg(long)]
    advanced: bool,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save intermediate masks to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    if args.verbose {
        eprintln!("Loading document: {:?}", args.document_path);
    }
    let document = std::fs::read(&args.document_path)?;
    let rasterizer = ImageDocumentRasterizer;

    let request = BarDetectionRequest {
        page: args.page,
        params: DetectionParams::new()
            .with_min_bar_width(args.min_bar_width)
            .with_min_bar_height(args.min_bar_height),
    };

    // Fail on a bad debug directory before doing any work
    let dump = args.debug_out.map(DebugDump::new).transpose()?;

    let variant = if args.advanced {
        Variant::Advanced
    } else {
        Variant::Standard
    };

    let detection = match service::detect_page(&rasterizer, &document, &request, variant, args.dpi) {
        Ok(detection) => detection,
        Err(err) => {
            println!("{}", to_json(&ErrorResponse::from(&err), args.pretty)?);
            anyhow::bail!(err);
        }
    };

    println!("{}", to_json(&detection.response(), args.pretty)?);

    if let Some(dump) = dump {
        let written = dump.save(&detection.analysis, &detection.image)?;
        if args.verbose {
            eprintln!("Saved {} debug images to {}", written.len(), dump.output_dir().display());
        }
    }

    Ok(())
}
