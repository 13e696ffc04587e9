// crates/stationflow-core/src/error.rs

pub use stationflow_events::StreamError;

pub type Result<T> = std::result::Result<T, StreamError>;
