use evac_agent::AgentError;
use evac_core::CoreError;
use evac_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("population setup failed: {0}")]
    Agent(#[from] AgentError),

    #[error("sampling setup failed: {0}")]
    Sampling(#[from] CoreError),

    #[error("event scheduling failed: {0}")]
    Schedule(#[from] ScheduleError),
}

pub type SimResult<T> = Result<T, SimError>;
