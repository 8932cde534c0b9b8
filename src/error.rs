use thiserror::Error;

/// The only structural failure the core defines: everything else (infeasible
/// placement, empty input) produces a well-defined output instead of an error.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("duplicate course id: {0}")]
    InvalidInput(u32),
}
