//! Single-file admission queue bound to a bottleneck cell.

use std::collections::VecDeque;

use evac_core::{AgentId, CellId};

/// FIFO queue of agents waiting to pass through one bottleneck cell.
///
/// `num_in_queue` is the summed throughput of the agents currently held.
/// With the unit throughput the simulator uses it always equals
/// [`len`](Self::len).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bottleneck {
    pub cell: CellId,
    queue: VecDeque<AgentId>,
    num_in_queue: u32,
}

impl Bottleneck {
    pub fn new(cell: CellId) -> Self {
        Self { cell, queue: VecDeque::new(), num_in_queue: 0 }
    }

    /// Append `agent` at the tail.
    pub fn enter(&mut self, agent: AgentId, throughput: u32) {
        self.queue.push_back(agent);
        self.num_in_queue = self.num_in_queue.saturating_add(throughput);
    }

    /// Release the longest-waiting agent, or `None` if nobody is queued.
    /// Draining an empty queue changes nothing.
    pub fn drain(&mut self, throughput: u32) -> Option<AgentId> {
        let agent = self.queue.pop_front()?;
        self.num_in_queue = self.num_in_queue.saturating_sub(throughput);
        Some(agent)
    }

    #[inline]
    pub fn num_in_queue(&self) -> u32 {
        self.num_in_queue
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued agents, head first.
    pub fn iter(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.queue.iter().copied()
    }
}
