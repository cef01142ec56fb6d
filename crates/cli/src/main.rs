mod input;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use futures::executor::block_on;
use serde_json::json;
use shape_outside::api::{Band, FileImageSource, OffsetMode, OffsetParams, ShapeInfo};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "shape-outside")]
#[command(about = "Exclusion edges and layout offsets for shaped floats")]
#[command(version = shape_outside::VERSION)]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the left/right exclusion edges for one band (shape coordinates)
    Edges {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        top: f64,
        #[arg(long)]
        bottom: f64,
    },
    /// Print the layout offsets covering the margin box
    Offsets {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = Mode::Adaptive)]
        mode: Mode,
        /// Strip height for step mode; also the font size the defaults derive from
        #[arg(long, default_value_t = 16.0)]
        step: f64,
        /// Area limit per adaptive strip (default 1.8 × step)
        #[arg(long)]
        limit: Option<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Step,
    Adaptive,
}

impl From<Mode> for OffsetMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Step => OffsetMode::Step,
            Mode::Adaptive => OffsetMode::Adaptive,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Edges { input, top, bottom } => edges(input, Band::new(top, bottom)),
        Action::Offsets {
            input,
            mode,
            step,
            limit,
        } => {
            let mut params = OffsetParams::for_font_size(step);
            params.mode = mode.into();
            if let Some(limit) = limit {
                params.limit = limit;
            }
            offsets(input, params)
        }
    }
}

fn build(input: &Path) -> Result<ShapeInfo> {
    let spec = input::load(input)?;
    let images = FileImageSource::new(input::image_base(input));
    let info = block_on(ShapeInfo::build(spec.metrics.clone(), spec.value(), &images));
    tracing::info!(input = %input.display(), kind = info.geometry().kind(), "shape ready");
    Ok(info)
}

fn edges(input: PathBuf, band: Band) -> Result<()> {
    let info = build(&input)?;
    let out = json!({
        "kind": info.geometry().kind(),
        "band": band,
        "left": info.left_exclusion_edge(band),
        "right": info.right_exclusion_edge(band),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn offsets(input: PathBuf, params: OffsetParams) -> Result<()> {
    let info = build(&input)?;
    let offsets = info
        .offsets(&params)
        .with_context(|| format!("computing offsets for {}", input.display()))?;
    tracing::info!(strips = offsets.len(), mode = ?params.mode, "offsets");
    println!("{}", serde_json::to_string_pretty(&offsets)?);
    Ok(())
}
