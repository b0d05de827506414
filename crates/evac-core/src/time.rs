//! Simulated time model.
//!
//! # Design
//!
//! The evacuation model is a continuous-time discrete-event simulation: an
//! agent with rate `r` takes `1 / r` time units per step, so event times are
//! arbitrary non-negative reals rather than integer ticks.
//!
//! `SimTime` wraps an `f64` and provides a *total* order (via
//! [`f64::total_cmp`]) so it can key a `BTreeMap` directly.  Construction
//! rejects NaN; every value inside a `SimTime` is therefore comparable in the
//! ordinary numeric sense.

use std::cmp::Ordering;
use std::fmt;

/// An absolute point in simulated time.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Wrap `t`.  Returns `None` for NaN.
    #[inline]
    pub fn new(t: f64) -> Option<SimTime> {
        if t.is_nan() { None } else { Some(SimTime(t)) }
    }

    /// Wrap `t` without the NaN check.
    ///
    /// # Panics
    /// Panics in debug mode if `t` is NaN.
    #[inline]
    pub fn from_f64(t: f64) -> SimTime {
        debug_assert!(!t.is_nan(), "SimTime cannot be NaN");
        SimTime(t)
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime::from_f64(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl From<SimTime> for f64 {
    #[inline]
    fn from(t: SimTime) -> f64 {
        t.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}
