use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use rayon::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fastimage::ImageResource;

#[derive(Parser)]
#[command(name = "fastimage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Report image format, size and depth by reading only the header")]
struct Cli {
    /// Image files to probe; `-` reads standard input
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Print one JSON object per input
    #[arg(long)]
    json: bool,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let resources: Vec<ImageResource> = cli.paths.par_iter().map(|p| load(p)).collect();

    let mut out = io::stdout().lock();
    for resource in &resources {
        if cli.json {
            serde_json::to_writer(&mut out, resource).context("Failed to encode result")?;
            writeln!(out)?;
        } else {
            print_row(&mut out, resource)?;
        }
    }
    out.flush()?;

    if resources.iter().all(|r| r.recognized) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "fastimage=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load(path: &Path) -> ImageResource {
    if path.as_os_str() == "-" {
        ImageResource::from_reader("-", io::stdin().lock(), None)
    } else {
        ImageResource::open(path)
    }
}

fn print_row(out: &mut impl Write, r: &ImageResource) -> io::Result<()> {
    if !r.recognized {
        let reason = r.error().unwrap_or("unknown error");
        return writeln!(out, "{}  {}", r.uri, style(reason).red());
    }

    let meta = &r.metadata;
    let dims = meta
        .dimensions()
        .map(|(w, h)| format!("{w}x{h}"))
        .unwrap_or_else(|| "?".to_string());
    let bpp = meta
        .bits_per_pixel
        .map(|b| format!("{b}bpp"))
        .unwrap_or_else(|| "?".to_string());

    write!(
        out,
        "{}  {:<4} {:>11} {:>6}",
        r.uri,
        style(meta.format).green().bold(),
        dims,
        bpp
    )?;

    if meta.progressive {
        write!(out, "  progressive")?;
    }
    if meta.number_of_images > 1 {
        write!(out, "  {} frames", meta.number_of_images)?;
    }
    if let (Some(x), Some(y)) = (meta.physical_width_dpi, meta.physical_height_dpi) {
        write!(out, "  {x}x{y}dpi")?;
    }
    for comment in &meta.comments {
        write!(out, "  {}", quote_comment(comment))?;
    }
    writeln!(out)
}

/// Quotes a comment for the terminal; APP1 payloads carry raw binary.
fn quote_comment(comment: &str) -> String {
    format!("\"{}\"", comment.escape_debug())
}
