use serde_json::Value;

use crate::errors::StreamError;
use crate::model::{Command, Event, SampleReading};

/// A record classified for dispatch. Classification never mutates the
/// record; the processor re-emits the original regardless of what was read
/// out of it here.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Sample(SampleReading),
    Control(Command),
    /// No `type` key (or `type: null`). Passed through verbatim, never
    /// examined further.
    Untyped,
}

/// Classify one record by its `type` field.
///
/// Fails with [`StreamError::UnknownEventType`] for an unrecognized type and
/// [`StreamError::InvalidCommand`] for a `control` record whose `command` is
/// not one of [`Command`]'s variants. Both errors carry the offending value:
/// strings verbatim, anything else in its JSON rendering.
pub fn classify(event: &Event) -> Result<EventKind, StreamError> {
    let Some(event_type) = field(event, "type") else {
        return Ok(EventKind::Untyped);
    };

    match event_type.as_str() {
        Some("sample") => Ok(EventKind::Sample(SampleReading {
            station_name: field(event, "stationName")
                .and_then(Value::as_str)
                .map(str::to_owned),
            temperature: field(event, "temperature").and_then(Value::as_f64),
            timestamp: field(event, "timestamp").and_then(Value::as_i64),
        })),
        Some("control") => {
            let command = field(event, "command");
            match command.and_then(Value::as_str) {
                Some(name) => Command::try_from(name)
                    .map(EventKind::Control)
                    .map_err(|_| StreamError::InvalidCommand {
                        command: name.to_owned(),
                    }),
                None => Err(StreamError::InvalidCommand {
                    command: render(command),
                }),
            }
        }
        _ => Err(StreamError::UnknownEventType {
            event_type: render(Some(event_type)),
        }),
    }
}

/// Lenient field read: a `null` value reads as an absent key.
fn field<'a>(event: &'a Event, key: &str) -> Option<&'a Value> {
    event.get(key).filter(|value| !value.is_null())
}

/// Render a field value for an error message. Strings verbatim, everything
/// else as JSON (`null` for absent-or-null).
fn render(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
        None => Value::Null.to_string(),
    }
}
