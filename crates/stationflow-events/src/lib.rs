pub mod classify;
pub mod errors;
pub mod model;

pub use classify::{classify, EventKind};
pub use errors::StreamError;
pub use model::{Command, Event, SampleReading};
