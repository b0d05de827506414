use evac_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("floor plan has no placeable cells to start {0} agent(s) on")]
    NoPlaceableCells(usize),

    #[error(transparent)]
    Sampling(#[from] CoreError),
}

pub type AgentResult<T> = Result<T, AgentError>;
