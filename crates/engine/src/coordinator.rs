//! Asynchronous request lifecycle around the palette generator.
//!
//! The coordinator throttles regeneration through the debounce gate,
//! runs accepted generations on a Tokio task, and publishes the latest
//! palette, a busy flag, and the last generation duration over watch
//! channels. Starting a new generation aborts the previous in-flight
//! task, so the last-started request is the one whose result becomes
//! visible. An aborted task is cancelled at its publish-delay sleep,
//! before anything is published.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use swatchy_types::Palette;

use crate::debounce::{DEFAULT_DEBOUNCE_WINDOW, Debouncer};
use crate::generator::{GeneratorTuning, PaletteError, PaletteGenerator};

/// Pause between computing a palette and publishing it.
pub const DEFAULT_PUBLISH_DELAY: Duration = Duration::from_millis(100);

/// Tuning and timing knobs for [`PaletteCoordinator`].
#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    /// Sampling bounds handed to the generator on every request.
    pub tuning: GeneratorTuning,
    /// Minimum spacing between accepted non-initial requests.
    pub debounce_window: Duration,
    /// Delay between computation and publication.
    pub publish_delay: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            tuning: GeneratorTuning::default(),
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            publish_delay: DEFAULT_PUBLISH_DELAY,
        }
    }
}

/// Owns the mutable generation state and publishes results to watchers.
///
/// At most one generation is logically in flight; publication order is
/// by request start, enforced by aborting the superseded task at
/// request-start time. No lock is held across an await point.
pub struct PaletteCoordinator {
    config: CoordinatorConfig,
    generator: Arc<Mutex<PaletteGenerator>>,
    debouncer: Mutex<Debouncer>,
    palette_tx: watch::Sender<Option<Palette>>,
    busy_tx: watch::Sender<bool>,
    duration_tx: watch::Sender<Option<Duration>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl PaletteCoordinator {
    /// Coordinator around an entropy-seeded generator.
    pub fn new(config: CoordinatorConfig) -> Self {
        Self::with_generator(config, PaletteGenerator::new())
    }

    /// Coordinator around a caller-supplied generator, e.g. a seeded
    /// one for reproducible output.
    pub fn with_generator(config: CoordinatorConfig, generator: PaletteGenerator) -> Self {
        let debouncer = Debouncer::new(config.debounce_window);
        Self {
            config,
            generator: Arc::new(Mutex::new(generator)),
            debouncer: Mutex::new(debouncer),
            palette_tx: watch::channel(None).0,
            busy_tx: watch::channel(false).0,
            duration_tx: watch::channel(None).0,
            in_flight: Mutex::new(None),
        }
    }

    /// Subscribe to the latest published palette.
    pub fn palette(&self) -> watch::Receiver<Option<Palette>> {
        self.palette_tx.subscribe()
    }

    /// Subscribe to the busy flag.
    pub fn busy(&self) -> watch::Receiver<bool> {
        self.busy_tx.subscribe()
    }

    /// Subscribe to the duration of the last completed generation.
    pub fn last_duration(&self) -> watch::Receiver<Option<Duration>> {
        self.duration_tx.subscribe()
    }

    /// Request a fresh palette of `size` colors.
    ///
    /// Non-initial requests inside the debounce window are dropped
    /// without side effects: no cancellation, no state change, no new
    /// palette. An accepted request aborts any in-flight generation
    /// before starting its own.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn request_palette(&self, initial: bool, size: usize) -> Result<(), PaletteError> {
        if size == 0 {
            return Err(PaletteError::InvalidSize);
        }
        self.config.tuning.validate()?;

        if !initial
            && !self
                .debouncer
                .lock()
                .expect("debouncer lock poisoned")
                .should_proceed()
        {
            debug!(size, "regeneration request dropped by debounce gate");
            return Ok(());
        }

        if let Some(previous) = self
            .in_flight
            .lock()
            .expect("in-flight lock poisoned")
            .take()
        {
            previous.abort();
        }

        let generator = Arc::clone(&self.generator);
        let tuning = self.config.tuning.clone();
        let publish_delay = self.config.publish_delay;
        let palette_tx = self.palette_tx.clone();
        let busy_tx = self.busy_tx.clone();
        let duration_tx = self.duration_tx.clone();

        let handle = tokio::spawn(async move {
            busy_tx.send_replace(true);
            let started = Instant::now();
            let result = {
                let mut generator = generator.lock().expect("generator lock poisoned");
                generator.generate(size, &tuning)
            };
            match result {
                Ok(palette) => {
                    duration_tx.send_replace(Some(started.elapsed()));
                    tokio::time::sleep(publish_delay).await;
                    palette_tx.send_replace(Some(palette));
                    busy_tx.send_replace(false);
                }
                Err(err) => {
                    error!(%err, "palette generation failed");
                    busy_tx.send_replace(false);
                }
            }
        });

        *self.in_flight.lock().expect("in-flight lock poisoned") = Some(handle);
        Ok(())
    }
}
