//! Palette generation with pairwise distinctness enforcement.
//!
//! The primary phase draws random HSL candidates and accepts one only
//! when it clears the distance threshold against every color already
//! accepted. If the attempt budget runs out short, a deterministic
//! hue-rotation fallback fills the remaining slots, so the requested
//! count is always met and termination is unconditional.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use swatchy_types::{HslColor, Palette};

/// Number of colors generated when the caller does not specify one.
pub const DEFAULT_PALETTE_SIZE: usize = 5;

/// Upper bound on primary-phase draws before the fallback takes over.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 500;

/// Errors surfaced by palette generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    /// The caller asked for an empty palette.
    #[error("palette size must be greater than zero")]
    InvalidSize,
    /// A tuning interval is empty or escapes the percentage domain.
    #[error("{what} range {lo}..={hi} must be a non-empty interval within 0..=100")]
    InvalidRange {
        what: &'static str,
        lo: u8,
        hi: u8,
    },
}

/// Sampling bounds and acceptance threshold for the primary phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorTuning {
    /// Minimum pairwise HSL distance for acceptance, in [0, 1].
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    /// Inclusive saturation bounds for candidate draws.
    #[serde(default = "default_saturation")]
    pub saturation: RangeInclusive<u8>,
    /// Inclusive lightness bounds for candidate draws.
    #[serde(default = "default_lightness")]
    pub lightness: RangeInclusive<u8>,
}

fn default_min_distance() -> f32 {
    0.22
}

fn default_saturation() -> RangeInclusive<u8> {
    45..=85
}

fn default_lightness() -> RangeInclusive<u8> {
    35..=70
}

impl Default for GeneratorTuning {
    fn default() -> Self {
        Self {
            min_distance: default_min_distance(),
            saturation: default_saturation(),
            lightness: default_lightness(),
        }
    }
}

impl GeneratorTuning {
    /// Check that both sampling intervals are non-empty and inside the
    /// percentage domain.
    pub fn validate(&self) -> Result<(), PaletteError> {
        validate_band("saturation", &self.saturation)?;
        validate_band("lightness", &self.lightness)
    }
}

fn validate_band(what: &'static str, band: &RangeInclusive<u8>) -> Result<(), PaletteError> {
    let (lo, hi) = (*band.start(), *band.end());
    if lo > hi || hi > 100 {
        return Err(PaletteError::InvalidRange { what, lo, hi });
    }
    Ok(())
}

/// Random palette generator with a guaranteed-termination fallback.
pub struct PaletteGenerator<R: Rng = StdRng> {
    rng: R,
    max_attempts: u32,
}

impl PaletteGenerator<StdRng> {
    /// Entropy-seeded generator with the default attempt budget.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic generator for reproducible palettes.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for PaletteGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PaletteGenerator<R> {
    /// Build a generator around a caller-supplied RNG.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the primary-phase attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Produce exactly `size` colors, pairwise separated by at least
    /// `tuning.min_distance` for every color accepted in the primary
    /// phase.
    ///
    /// Primary acceptances come first in acceptance order; fallback
    /// colors, if any were needed, are appended after them. The
    /// returned palette always holds exactly `size` colors.
    pub fn generate(
        &mut self,
        size: usize,
        tuning: &GeneratorTuning,
    ) -> Result<Palette, PaletteError> {
        if size == 0 {
            return Err(PaletteError::InvalidSize);
        }
        tuning.validate()?;

        let mut colors: Vec<HslColor> = Vec::with_capacity(size);
        let mut attempts = 0u32;

        while colors.len() < size && attempts < self.max_attempts {
            attempts += 1;
            let candidate = self.draw_candidate(tuning);
            if colors
                .iter()
                .all(|accepted| accepted.distance(&candidate) >= tuning.min_distance)
            {
                colors.push(candidate);
            }
        }

        if colors.len() < size {
            let remaining = size - colors.len();
            warn!(
                attempts,
                remaining, "sampling budget exhausted; filling remaining slots by hue rotation"
            );
            self.fill_by_hue_rotation(&mut colors, remaining);
        } else {
            debug!(attempts, size, "palette accepted within sampling budget");
        }

        Ok(Palette::new(colors))
    }

    fn draw_candidate(&mut self, tuning: &GeneratorTuning) -> HslColor {
        let hue = self.rng.gen_range(0..360) as f32;
        let saturation = self.rng.gen_range(tuning.saturation.clone()) as f32;
        let lightness = self.rng.gen_range(tuning.lightness.clone()) as f32;
        HslColor::new(hue, saturation, lightness)
    }

    /// Fill `remaining` slots with hues rotated evenly around the
    /// circle from a random starting point.
    ///
    /// Fallback colors are not re-checked against the accepted set; the
    /// rotation step of `360 / (remaining + 1)` degrees keeps them
    /// apart on the hue circle. Saturation and lightness come from
    /// fixed secondary bands, not the caller's tuning.
    fn fill_by_hue_rotation(&mut self, colors: &mut Vec<HslColor>, remaining: usize) {
        let step = 360.0 / (remaining as f32 + 1.0);
        let mut hue = self.rng.gen_range(0.0..360.0f32);
        for _ in 0..remaining {
            hue = (hue + step) % 360.0;
            let saturation = self.rng.gen_range(55..85) as f32;
            let lightness = self.rng.gen_range(40..65) as f32;
            colors.push(HslColor::new(hue, saturation, lightness));
        }
    }
}
