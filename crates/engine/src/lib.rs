//! # Swatchy Engine
//!
//! Palette generation with visual distinctness enforcement, plus the
//! request coordination layer that throttles regeneration and publishes
//! results to subscribers.
//!
//! ## Architecture
//!
//! The engine is organized into three modules:
//!
//! - **`generator`**: randomized rejection sampling in HSL space with a
//!   deterministic hue-rotation fallback that guarantees the requested
//!   color count within a bounded number of draws
//! - **`debounce`**: the minimum-interval gate that drops rapid-fire
//!   regeneration requests
//! - **`coordinator`**: the async request lifecycle: cancel the
//!   in-flight generation, run the new one, publish palette/busy/timing
//!   over watch channels

pub mod coordinator;
pub mod debounce;
pub mod generator;

pub use coordinator::{CoordinatorConfig, DEFAULT_PUBLISH_DELAY, PaletteCoordinator};
pub use debounce::{DEFAULT_DEBOUNCE_WINDOW, Debouncer};
pub use generator::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_PALETTE_SIZE, GeneratorTuning, PaletteError, PaletteGenerator,
};
