//! Run parameters.

use evac_core::SamplingParams;

use crate::{SimError, SimResult};

/// Event budget used when [`EvacConfig::max_events`] is `None`.
pub const DEFAULT_MAX_EVENTS: u64 = 10_000_000;

/// Parameters of one evacuation run.
///
/// Typically built from command-line flags or loaded from JSON by the
/// application and handed to [`SimBuilder`](crate::SimBuilder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvacConfig {
    /// Agents to sample onto placeable cells.
    pub agent_count: usize,

    /// Master seed.  The same seed, plan and parameters replay exactly.
    pub seed: u64,

    /// Simulated time at which the evacuation is cut off.  `None` runs until
    /// every agent is resolved (or the event budget runs out).
    pub deadline: Option<f64>,

    /// Interval between bottleneck drains.  Must be positive.
    pub bottleneck_delay: f64,

    /// Event budget; `None` means [`DEFAULT_MAX_EVENTS`].
    pub max_events: Option<u64>,

    pub sampling: SamplingParams,
}

impl Default for EvacConfig {
    fn default() -> Self {
        Self {
            agent_count:      10,
            seed:             8_675_309,
            deadline:         None,
            bottleneck_delay: 1.0,
            max_events:       None,
            sampling:         SamplingParams::default(),
        }
    }
}

impl EvacConfig {
    #[inline]
    pub fn event_limit(&self) -> u64 {
        self.max_events.unwrap_or(DEFAULT_MAX_EVENTS)
    }

    /// Reject parameters the run loop cannot honor.  Sampling parameters are
    /// checked separately when the sampling streams are built.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.bottleneck_delay.is_finite() && self.bottleneck_delay > 0.0) {
            return Err(SimError::Config(format!(
                "bottleneck_delay must be positive and finite, got {}",
                self.bottleneck_delay
            )));
        }
        if let Some(d) = self.deadline {
            if !(d.is_finite() && d >= 0.0) {
                return Err(SimError::Config(format!(
                    "deadline must be a non-negative finite time, got {d}"
                )));
            }
        }
        if self.max_events == Some(0) {
            return Err(SimError::Config("max_events must be at least 1".into()));
        }
        Ok(())
    }
}
