//! Request pacing
//!
//! Discussion pages are fetched one after another from the same site. A
//! delay before each fetch keeps the request pattern from looking like a
//! burst of automated traffic. Pacing has no effect on what is extracted.

use crate::config::PacingConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// How long to wait between fetches
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// No delay at all
    Disabled,

    /// The same delay every time
    Fixed(Duration),

    /// A delay drawn uniformly from `[min, max]`
    Uniform { min: Duration, max: Duration },
}

impl Pacing {
    /// Derives the pacing mode from configured bounds (seconds)
    pub fn from_config(config: &PacingConfig) -> Self {
        let min = seconds(config.min_delay);
        let max = seconds(config.max_delay);

        if max.is_zero() {
            Pacing::Disabled
        } else if min >= max {
            Pacing::Fixed(max)
        } else {
            Pacing::Uniform { min, max }
        }
    }
}

/// Converts configured seconds, clamping negatives to zero and saturating
/// values too large for a `Duration`
fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.max(0.0)).unwrap_or(Duration::MAX)
}

/// Produces and sleeps through pacing delays
pub struct Pacer {
    pacing: Pacing,
    rng: StdRng,
}

impl Pacer {
    /// Creates a pacer seeded from system entropy
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a pacer with a reproducible delay sequence
    pub fn with_seed(pacing: Pacing, seed: u64) -> Self {
        Self {
            pacing,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Draws the next delay
    pub fn next_delay(&mut self) -> Duration {
        match self.pacing {
            Pacing::Disabled => Duration::ZERO,
            Pacing::Fixed(delay) => delay,
            Pacing::Uniform { min, max } => {
                let secs = self.rng.gen_range(min.as_secs_f64()..=max.as_secs_f64());
                seconds(secs)
            }
        }
    }

    /// Sleeps for the next delay and returns how long it was
    pub async fn pause(&mut self) -> Duration {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tracing::debug!("Waiting {:.2}s before next request", delay.as_secs_f64());
            tokio::time::sleep(delay).await;
        }
        delay
    }
}
