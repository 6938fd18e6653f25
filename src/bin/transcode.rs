//! # Transcode Binary Entry Point
//!
//! Thin command-line front end over the [`Transcoder`]: builds one request from
//! files and flags, runs it, and prints the JSON response on stdout.
//!
//! ## Usage
//!
//! ```bash
//! transcode encode sha256 --image photo.png
//! transcode encode stegano --image photo.png --hide "meet at noon" --output carrier.png
//! transcode encode qr --image photo.png --output qr.png
//! transcode decode hex --text-file photo.hex --output photo.png
//! transcode decode stegano --image carrier.png
//! transcode --config config/transcode.toml encode ascii --image photo.jpg
//! ```
//!
//! Logs go to stderr. The process exits with status 1 when the response is an error.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Target};
use log::{info, LevelFilter};
use std::io::Write;
use std::path::{Path, PathBuf};

use image_transcoder::common::config::load_config;
use image_transcoder::{CodecSelector, Direction, TranscodeConfig, TranscodeRequest, TranscodeResponse, Transcoder};

/// Command-line arguments for the transcode binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML format); defaults apply when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Log at DEBUG level
    #[arg(short, long)]
    verbose: bool,

    /// encode or decode
    action: Direction,

    /// base64, hex, binary, url, ascii, md5, sha256, qr or stegano
    codec: CodecSelector,

    /// Image file to encode, or to extract a hidden message from
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Filename reported for the image (defaults to the image path's file name)
    #[arg(long)]
    filename: Option<String>,

    /// Encoded text to decode
    #[arg(short, long, conflicts_with = "text_file")]
    text: Option<String>,

    /// File holding encoded text to decode
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Text to hide with the stegano codec
    #[arg(long)]
    hide: Option<String>,

    /// Write the rendered image (QR, stegano carrier, decoded image) to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger(verbose: bool) {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .target(Target::Stderr)
        .init();
}

fn build_request(args: &Args) -> Result<TranscodeRequest> {
    let image_bytes = match &args.image {
        Some(path) => Some(std::fs::read(path).with_context(|| format!("reading {}", path.display()))?),
        None => None,
    };

    let filename = args.filename.clone().or_else(|| {
        args.image
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    });

    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => {
            Some(std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?)
        }
        (None, None) => None,
    };

    Ok(TranscodeRequest {
        direction: args.action,
        selector: args.codec,
        image_bytes,
        filename,
        text,
        hidden_text: args.hide.clone(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config: TranscodeConfig = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading config {}", path))?,
        None => TranscodeConfig::default(),
    };

    let transcoder = Transcoder::new(config);
    let request = build_request(&args)?;
    let result = transcoder.run(request).await;

    if let (Ok(output), Some(path)) = (&result, &args.output) {
        if let Some(rendered) = &output.rendered_image {
            std::fs::write(path, &rendered.bytes).with_context(|| format!("writing {}", path.display()))?;
            info!("💾 Wrote {} bytes to {}", rendered.bytes.len(), path.display());
        }
    }

    let response = TranscodeResponse::from(result);
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
