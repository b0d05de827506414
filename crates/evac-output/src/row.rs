//! Plain data row types written by output backends.

use evac_sim::EvacReport;

/// One agent transition, with the cell flattened to grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRow {
    pub time:     f64,
    pub agent_id: u32,
    pub row:      u32,
    pub col:      u32,
    /// `AgentState::as_str` label, e.g. `"queued"` or `"dead_fire"`.
    pub state:    &'static str,
}

/// End-of-run tallies for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub seed:             u64,
    pub outcome:          &'static str,
    pub total:            u64,
    pub safe:             u64,
    pub dead:             u64,
    pub injured:          u64,
    pub unresolved:       u64,
    /// `None` when nobody reached safety.
    pub avg_exit_time:    Option<f64>,
    pub end_time:         f64,
    pub events_processed: u64,
}

impl From<&EvacReport> for SummaryRow {
    fn from(r: &EvacReport) -> Self {
        Self {
            seed:             r.seed,
            outcome:          r.outcome.as_str(),
            total:            r.stats.total as u64,
            safe:             r.stats.safe as u64,
            dead:             r.stats.dead as u64,
            injured:          r.stats.injured as u64,
            unresolved:       r.stats.unresolved() as u64,
            avg_exit_time:    r.stats.avg_exit_time(),
            end_time:         r.end_time.as_f64(),
            events_processed: r.events_processed,
        }
    }
}
