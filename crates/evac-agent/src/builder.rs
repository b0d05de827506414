//! Sampled population construction.
//!
//! # Usage
//!
//! ```rust
//! use evac_agent::PopulationBuilder;
//! use evac_core::{SamplingParams, SamplingStreams};
//! use evac_floor::parse_floor_plan;
//!
//! let floor = parse_floor_plan("P.S\nP.S\n").unwrap();
//! let mut streams = SamplingStreams::new(42, &SamplingParams::default()).unwrap();
//!
//! let people = PopulationBuilder::new(5).build(&floor, &mut streams).unwrap();
//! assert_eq!(people.len(), 5);
//! assert!(people.iter().all(|p| floor.cell(p.location).is_placeable()));
//! ```

use evac_core::{AgentId, SamplingStreams};
use evac_floor::FloorGraph;

use crate::{AgentError, AgentResult, Person};

/// Draws `count` agents.
///
/// For each agent in id order it draws the rate, then the strategy, then a
/// start cell chosen uniformly among the placeable cells.  Several agents may
/// share a start cell.
pub struct PopulationBuilder {
    count: usize,
}

impl PopulationBuilder {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Sample the population on `floor` from `streams`.
    ///
    /// # Errors
    ///
    /// [`AgentError::NoPlaceableCells`] if agents are requested but the plan
    /// has no placeable cell.
    pub fn build(&self, floor: &FloorGraph, streams: &mut SamplingStreams) -> AgentResult<Vec<Person>> {
        let starts = floor.placeable_cells();
        if starts.is_empty() && self.count > 0 {
            return Err(AgentError::NoPlaceableCells(self.count));
        }

        let mut people = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let rate     = streams.sample_rate();
            let strategy = streams.sample_strategy();
            let &start = streams
                .sample_placement(&starts)
                .ok_or(AgentError::NoPlaceableCells(self.count))?;
            people.push(Person::new(AgentId::from_index(i), start, rate, strategy));
        }
        Ok(people)
    }
}
