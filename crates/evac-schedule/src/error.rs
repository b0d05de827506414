use evac_core::SimTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("cannot schedule at {at}: clock is already at {now}")]
    InPast { at: SimTime, now: SimTime },

    #[error("negative scheduling offset {0}")]
    NegativeOffset(f64),

    #[error("event time must be finite, got {0}")]
    InvalidTime(f64),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
