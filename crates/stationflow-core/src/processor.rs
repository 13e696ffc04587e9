use std::collections::VecDeque;

use tracing::{debug, warn};

use stationflow_events::{classify, Command, Event, EventKind};

use crate::error::Result;
use crate::state::ProcessorState;

/// Lazy, pull-based transformation of an ordered event sequence.
///
/// Each `next()` call first drains records already queued for emission, then
/// consumes exactly one input record and dispatches on its classification.
/// Synthesized records (snapshot reports, reset confirmations) are always
/// yielded before the control record that triggered them. After yielding an
/// error the stream is fused: the offending record is dropped and nothing
/// further is consumed or produced.
pub struct EventStream<I> {
    input: I,
    state: ProcessorState,
    pending: VecDeque<Event>,
    failed: bool,
}

/// Wrap an ordered sequence of event records into the transformed stream.
///
/// Records pass through unchanged and in order; `control` records may be
/// preceded by one synthesized record as described on [`EventStream`].
/// State lives for this one run and starts empty.
pub fn process_events<I>(events: I) -> EventStream<I::IntoIter>
where
    I: IntoIterator<Item = Event>,
{
    EventStream {
        input: events.into_iter(),
        state: ProcessorState::new(),
        pending: VecDeque::new(),
        failed: false,
    }
}

impl<I> EventStream<I> {
    /// The state accumulated so far by this run.
    pub fn state(&self) -> &ProcessorState {
        &self.state
    }
}

impl<I> Iterator for EventStream<I>
where
    I: Iterator<Item = Event>,
{
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(record) = self.pending.pop_front() {
            return Some(Ok(record));
        }
        if self.failed {
            return None;
        }

        let record = self.input.next()?;
        match classify(&record) {
            Ok(EventKind::Untyped) => Some(Ok(record)),
            Ok(EventKind::Sample(reading)) => {
                self.state.observe(&reading);
                Some(Ok(record))
            }
            Ok(EventKind::Control(Command::Snapshot)) => match self.state.snapshot() {
                Some(snapshot) => {
                    debug!(stations = self.state.stations().len(), "emitting snapshot");
                    self.pending.push_back(record);
                    Some(Ok(snapshot))
                }
                None => Some(Ok(record)),
            },
            Ok(EventKind::Control(Command::Reset)) => {
                let confirmation = self.state.reset();
                debug!("station accumulation reset");
                self.pending.push_back(record);
                Some(Ok(confirmation))
            }
            Err(err) => {
                warn!(error = %err, "aborting event stream");
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
