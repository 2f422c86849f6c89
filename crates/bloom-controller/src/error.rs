//! Controller error types.
//!
//! Acquisition failures never surface here; they are reported once through
//! the status snapshot and the session simply ends.

use thiserror::Error;

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("controller already started")]
    AlreadyStarted,

    #[error("session task failed: {0}")]
    SessionFailed(String),
}
