//! Independent replications of one plan under consecutive seeds.
//!
//! With the `parallel` feature each replication runs on Rayon's thread pool.
//! Every replication owns its own [`Sim`](crate::Sim), so nothing is shared
//! mutably and the results match a sequential run exactly.

use evac_floor::FloorGraph;

use crate::{EvacConfig, EvacReport, NoopObserver, SimBuilder, SimResult};

/// Run `count` replications of `config` on `floor`, seeding replication `i`
/// with `config.seed + i`.  Reports come back in seed order.
pub fn run_replications(config: &EvacConfig, floor: &FloorGraph, count: usize) -> SimResult<Vec<EvacReport>> {
    let mut template = floor.clone();
    if !template.is_precomputed() {
        template.precompute();
    }

    let run_one = |i: usize| -> SimResult<EvacReport> {
        let config = EvacConfig { seed: config.seed.wrapping_add(i as u64), ..config.clone() };
        SimBuilder::new(config, template.clone()).build()?.run(&mut NoopObserver)
    };

    #[cfg(not(feature = "parallel"))]
    {
        (0..count).map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..count).into_par_iter().map(run_one).collect()
    }
}

/// Means over a set of replications.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    pub runs:            usize,
    pub mean_safe:       f64,
    pub mean_dead:       f64,
    pub mean_injured:    f64,
    pub mean_unresolved: f64,
    /// Mean exit time over every safe agent in every run; `None` if nobody
    /// got out in any run.
    pub mean_exit_time:  Option<f64>,
}

impl BatchSummary {
    pub fn from_reports(reports: &[EvacReport]) -> Self {
        if reports.is_empty() {
            return Self::default();
        }
        let n = reports.len() as f64;
        let mean = |f: fn(&EvacReport) -> usize| reports.iter().map(f).sum::<usize>() as f64 / n;

        let total_safe: usize = reports.iter().map(|r| r.stats.safe).sum();
        let total_exit: f64 = reports.iter().map(|r| r.stats.sum_exit_times).sum();

        Self {
            runs:            reports.len(),
            mean_safe:       mean(|r| r.stats.safe),
            mean_dead:       mean(|r| r.stats.dead),
            mean_injured:    mean(|r| r.stats.injured),
            mean_unresolved: mean(|r| r.stats.unresolved()),
            mean_exit_time:  (total_safe > 0).then(|| total_exit / total_safe as f64),
        }
    }
}
