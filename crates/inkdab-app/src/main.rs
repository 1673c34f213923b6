//! `inkdab` command-line entry point.

use clap::{Parser, Subcommand};
use inkdab_app::{
    detect, load_raster, parse_color, render, save_raster, smudge, AppConfig, AppResult,
    RenderOptions, StrokeFile,
};
use inkdab_core::SerializableColor;
use std::path::PathBuf;

/// Smudge brush and quick-shape recognition on PNG rasters.
#[derive(Parser, Debug)]
#[command(name = "inkdab")]
#[command(version)]
#[command(about = "Smudge brush and quick-shape recognition", long_about = None)]
struct Cli {
    /// JSON config file with `brush` and `recognition` sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the shape recognized in a stroke file as JSON
    Detect {
        stroke: PathBuf,
    },
    /// Draw the recognized shape, or the raw stroke, into a PNG
    Render {
        stroke: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
        /// Raster width (defaults to fitting the stroke)
        #[arg(long)]
        width: Option<u32>,
        /// Raster height (defaults to fitting the stroke)
        #[arg(long)]
        height: Option<u32>,
        /// Background as #rrggbb or #rrggbbaa
        #[arg(long, value_parser = parse_background)]
        background: Option<SerializableColor>,
        /// Disable anti-aliasing
        #[arg(long)]
        aliased: bool,
    },
    /// Drag the smudge brush along a stroke over a PNG
    Smudge {
        input: PathBuf,
        stroke: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn parse_background(text: &str) -> Result<SerializableColor, String> {
    parse_color(text).map_err(|e| e.to_string())
}

fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::Detect { stroke } => {
            let detection = detect(&StrokeFile::load(&stroke)?, &config);
            println!("{}", serde_json::to_string_pretty(&detection)?);
        }
        Command::Render {
            stroke,
            out,
            width,
            height,
            background,
            aliased,
        } => {
            let options = RenderOptions {
                width,
                height,
                background: background.unwrap_or_else(SerializableColor::transparent),
                anti_alias: !aliased,
            };
            let (raster, _) = render(&StrokeFile::load(&stroke)?, &config, &options)?;
            save_raster(&raster, &out)?;
        }
        Command::Smudge { input, stroke, out } => {
            let mut raster = load_raster(&input)?;
            let dabs = smudge(&mut raster, &StrokeFile::load(&stroke)?, &config);
            log::info!("Painted {dabs} dabs");
            save_raster(&raster, &out)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting InkDab");

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
