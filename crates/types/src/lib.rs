//! Shared color value types for the swatchy workspace.
//!
//! Everything in this crate is a plain immutable value: an HSL color
//! with on-demand RGB/hex derivation and a pairwise dissimilarity
//! metric, plus the ordered palette container the generator fills.
//! There is no I/O and no mutable state; all operations are total over
//! the constructed domain.

pub mod color;
pub mod palette;

pub use color::{HslColor, Rgb};
pub use palette::Palette;
