//! Scene Creator CLI
//!
//! Builds a constellation scene from a JSON parameter file.
//!
//! Usage:
//!   create-scene --params data/scene.json --format xml --output scene.xml

use anyhow::Result;
use clap::Parser;
use scene_creator::{create_scene, loader, render, OutputFormat};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "create-scene",
    about = "Build Walker and Streets-of-Coverage constellation scenes with ground stations"
)]
struct Args {
    /// Path to scene parameters JSON file
    #[arg(short, long, default_value = "data/scene.json")]
    params: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "scene_creator=debug,constellations=debug,ground_stations=debug"
    } else {
        "scene_creator=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let request = loader::load_request(&args.params)?;
    let scene = create_scene(&request)?;
    let rendered = render(&scene, args.format)?;

    match &args.output {
        Some(path) => {
            info!("Writing {:?} scene to {:?}", args.format, path);
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(rendered.as_bytes())?;
            writer.flush()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered)?;
        }
    }

    Ok(())
}
