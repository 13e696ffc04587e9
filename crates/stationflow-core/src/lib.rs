pub mod error;
pub mod processor;
pub mod state;

pub use error::Result;
pub use processor::{process_events, EventStream};
pub use state::{ProcessorState, StationRange};
pub use stationflow_events::{classify, Command, Event, EventKind, SampleReading, StreamError};
