use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;
use tracing::{info, warn};

use swatchy_engine::{
    CoordinatorConfig, DEFAULT_PALETTE_SIZE, PaletteCoordinator, PaletteGenerator,
};
use swatchy_types::Palette;
use swatchy_util::{OutputFormat, UserPreferences};

mod render;

/// Generate a palette of visually distinct colors.
#[derive(Debug, Parser)]
#[command(name = "swatchy", version, about)]
struct Cli {
    /// Number of colors to generate.
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Seed for reproducible palettes.
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum pairwise HSL distance for acceptance, in 0..=1.
    #[arg(long)]
    min_distance: Option<f32>,

    /// Saturation bounds as LO..HI (inclusive), within 0..=100.
    #[arg(long, value_parser = parse_bounds)]
    saturation: Option<(u8, u8)>,

    /// Lightness bounds as LO..HI (inclusive), within 0..=100.
    #[arg(long, value_parser = parse_bounds)]
    lightness: Option<(u8, u8)>,

    /// Output rendering.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Persist size, format, and tuning as future defaults.
    #[arg(long)]
    save_defaults: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let preferences = load_preferences();
    let stored = preferences.payload();

    let mut tuning = stored.tuning.unwrap_or_default();
    if let Some(min_distance) = cli.min_distance {
        tuning.min_distance = min_distance;
    }
    if let Some((lo, hi)) = cli.saturation {
        tuning.saturation = lo..=hi;
    }
    if let Some((lo, hi)) = cli.lightness {
        tuning.lightness = lo..=hi;
    }

    let size = cli.size.or(stored.default_size).unwrap_or(DEFAULT_PALETTE_SIZE);
    let format = cli.format.or(stored.preferred_format).unwrap_or_default();

    if cli.save_defaults {
        preferences
            .save_defaults(Some(size), Some(format), Some(tuning.clone()))
            .context("could not persist preference defaults")?;
    }

    let config = CoordinatorConfig {
        tuning,
        ..CoordinatorConfig::default()
    };
    let coordinator = match cli.seed {
        Some(seed) => PaletteCoordinator::with_generator(config, PaletteGenerator::seeded(seed)),
        None => PaletteCoordinator::new(config),
    };

    let mut palette_rx = coordinator.palette();
    let duration_rx = coordinator.last_duration();

    coordinator
        .request_palette(true, size)
        .context("palette request rejected")?;

    let palette = wait_for_palette(&mut palette_rx).await?;
    if let Some(duration) = *duration_rx.borrow() {
        info!(duration_ms = duration.as_millis() as u64, size, "palette generated");
    }

    render::print_palette(&palette, format)?;
    Ok(())
}

async fn wait_for_palette(rx: &mut watch::Receiver<Option<Palette>>) -> Result<Palette> {
    loop {
        rx.changed().await.context("palette channel closed")?;
        let published = rx.borrow_and_update().clone();
        if let Some(palette) = published {
            return Ok(palette);
        }
    }
}

fn load_preferences() -> UserPreferences {
    UserPreferences::new().unwrap_or_else(|err| {
        warn!(%err, "preferences unavailable; continuing without persistence");
        UserPreferences::ephemeral()
    })
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_bounds(raw: &str) -> Result<(u8, u8), String> {
    let (lo, hi) = raw
        .split_once("..")
        .ok_or_else(|| format!("expected LO..HI, got '{raw}'"))?;
    let lo = lo
        .trim()
        .parse::<u8>()
        .map_err(|err| format!("invalid lower bound '{lo}': {err}"))?;
    let hi = hi
        .trim()
        .parse::<u8>()
        .map_err(|err| format!("invalid upper bound '{hi}': {err}"))?;
    Ok((lo, hi))
}
