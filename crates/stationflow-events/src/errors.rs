use thiserror::Error;

/// Fatal stream errors. Both abort the run at the offending record; the
/// caller decides whether to log, abort, or restart with fresh state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("unknown event type '{event_type}', please verify input")]
    UnknownEventType { event_type: String },

    #[error("unknown control command '{command}', please verify input")]
    InvalidCommand { command: String },
}
