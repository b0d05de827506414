//! Run tallies and the end-of-run report.

use std::fmt;

use evac_core::SimTime;

/// Outcome counters, owned by the run loop and updated only while handling
/// events.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvacStats {
    pub total:   usize,
    pub safe:    usize,
    pub dead:    usize,
    /// Agents cut off by the deadline while stepping onto a safe cell.
    pub injured: usize,
    /// Sum of exit times over `safe` agents.
    pub sum_exit_times: f64,
}

impl EvacStats {
    pub fn new(total: usize) -> Self {
        Self { total, ..Self::default() }
    }

    pub(crate) fn record_safe(&mut self, at: SimTime) {
        self.safe += 1;
        self.sum_exit_times += at.as_f64();
    }

    /// Agents in a terminal state.
    #[inline]
    pub fn resolved(&self) -> usize {
        self.safe + self.dead + self.injured
    }

    /// Agents still moving, queued or exiting when the run stopped.
    #[inline]
    pub fn unresolved(&self) -> usize {
        self.total.saturating_sub(self.resolved())
    }

    #[inline]
    pub fn all_resolved(&self) -> bool {
        self.resolved() >= self.total
    }

    /// Mean exit time of the safe agents; `None` when nobody got out.
    pub fn avg_exit_time(&self) -> Option<f64> {
        (self.safe > 0).then(|| self.sum_exit_times / self.safe as f64)
    }
}

impl fmt::Display for EvacStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total number of people:  {}", self.total)?;
        writeln!(f, "People safe:             {}", self.safe)?;
        writeln!(f, "People dead:             {}", self.dead)?;
        writeln!(f, "People gravely injured:  {}", self.injured)?;
        writeln!(f, "People unresolved:       {}", self.unresolved())?;
        match self.avg_exit_time() {
            Some(t) => write!(f, "Average time to safe:    {t:.3}"),
            None    => write!(f, "Average time to safe:    NA"),
        }
    }
}

/// Why the run loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutcome {
    /// Every agent reached a terminal state.
    AllResolved,
    /// The deadline passed with some agents still unresolved.
    DeadlineReached,
    /// No events remained but some agents were never resolved.
    Quiescent,
    /// The event budget ran out first.
    EventLimit,
}

impl RunOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            RunOutcome::AllResolved     => "all_resolved",
            RunOutcome::DeadlineReached => "deadline_reached",
            RunOutcome::Quiescent       => "quiescent",
            RunOutcome::EventLimit      => "event_limit",
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a finished run reports.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvacReport {
    pub seed:             u64,
    pub stats:            EvacStats,
    pub outcome:          RunOutcome,
    /// Time of the last event handled.
    pub end_time:         SimTime,
    pub events_processed: u64,
}
