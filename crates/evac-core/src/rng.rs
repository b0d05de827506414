//! Deterministic random streams.
//!
//! # Determinism strategy
//!
//! A run draws from four independent streams, each a `SmallRng` derived from
//! the run's master seed:
//!
//! | Stream      | Used for                                        |
//! |-------------|-------------------------------------------------|
//! | `placement` | starting cell of each agent                     |
//! | `strategy`  | per-agent strategy value                        |
//! | `rate`      | per-agent movement rate                         |
//! | `movement`  | handed to the move policy on every decision     |
//!
//! Child seeds are drawn from a root `SimRng` in a fixed order and mixed with
//! the stream index by the 64-bit golden-ratio constant.  Because the streams
//! are independent, adding a draw to one of them (say, a randomized move
//! policy consuming `movement`) never shifts the placement or rate of any
//! agent.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};

use crate::{CoreError, CoreResult};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG.
///
/// Used only on the single event-loop thread.  Replications running in
/// parallel each own their own streams.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── SamplingParams ────────────────────────────────────────────────────────────

/// Distribution parameters for per-agent attributes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplingParams {
    /// Strategy is drawn from `Uniform(strategy_min, strategy_max)`.
    pub strategy_min: f64,
    pub strategy_max: f64,

    /// Rate is drawn from `|Normal(rate_mean, rate_std_dev)|` ...
    pub rate_mean:    f64,
    pub rate_std_dev: f64,

    /// ... and then raised to at least `rate_floor` (must be positive).
    pub rate_floor:   f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            strategy_min: 0.5,
            strategy_max: 1.0,
            rate_mean:    1.0,
            rate_std_dev: 0.1,
            rate_floor:   0.1,
        }
    }
}

// ── SamplingStreams ───────────────────────────────────────────────────────────

/// The four seeded streams of one run plus the distributions drawn from them.
pub struct SamplingStreams {
    placement:     SimRng,
    strategy:      SimRng,
    rate:          SimRng,
    movement:      SimRng,
    strategy_dist: Uniform<f64>,
    rate_dist:     Normal<f64>,
    rate_floor:    f64,
}

impl SamplingStreams {
    /// Derive all four streams from `seed`.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidDistribution`] if the strategy range is empty or
    /// not finite, the rate standard deviation is negative or not finite, or
    /// the rate floor is not a positive finite number.
    pub fn new(seed: u64, params: &SamplingParams) -> CoreResult<Self> {
        let SamplingParams { strategy_min, strategy_max, rate_mean, rate_std_dev, rate_floor } =
            *params;

        if !(strategy_min.is_finite() && strategy_max.is_finite() && strategy_min < strategy_max) {
            return Err(CoreError::InvalidDistribution(format!(
                "strategy range [{strategy_min}, {strategy_max}) is empty or not finite"
            )));
        }
        if !(rate_floor.is_finite() && rate_floor > 0.0 && (1.0 / rate_floor).is_finite()) {
            return Err(CoreError::InvalidDistribution(format!(
                "rate floor must be positive, got {rate_floor}"
            )));
        }
        if !(rate_std_dev.is_finite() && rate_std_dev >= 0.0) {
            return Err(CoreError::InvalidDistribution(format!(
                "rate standard deviation must be non-negative, got {rate_std_dev}"
            )));
        }
        let rate_dist = Normal::new(rate_mean, rate_std_dev)
            .ok()
            .filter(|_| rate_mean.is_finite() && rate_std_dev.is_finite())
            .ok_or_else(|| {
                CoreError::InvalidDistribution(format!(
                    "rate normal(mean={rate_mean}, std_dev={rate_std_dev}) is invalid"
                ))
            })?;

        let mut root = SimRng::new(seed);
        Ok(Self {
            placement:     root.child(0),
            strategy:      root.child(1),
            rate:          root.child(2),
            movement:      root.child(3),
            strategy_dist: Uniform::new(strategy_min, strategy_max),
            rate_dist,
            rate_floor,
        })
    }

    /// Draw a rate: `max(rate_floor, |Normal(mean, std_dev)|)`.
    pub fn sample_rate(&mut self) -> f64 {
        let raw: f64 = self.rate_dist.sample(self.rate.inner());
        raw.abs().max(self.rate_floor)
    }

    /// Draw a strategy value from the configured uniform range.
    pub fn sample_strategy(&mut self) -> f64 {
        self.strategy_dist.sample(self.strategy.inner())
    }

    /// Choose a starting position uniformly from `candidates`.
    pub fn sample_placement<'a, T>(&mut self, candidates: &'a [T]) -> Option<&'a T> {
        self.placement.choose(candidates)
    }

    /// Give up the other streams once setup is done, keeping only the
    /// movement stream for the run itself.
    pub fn into_movement(self) -> SimRng {
        self.movement
    }
}
