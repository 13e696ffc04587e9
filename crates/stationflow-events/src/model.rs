use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An open event record: string keys to JSON values. The only key with
/// universal meaning is `type`; every other field is read leniently, and a
/// `null` value is indistinguishable from an absent key.
pub type Event = Map<String, Value>;

/// Control directives the processor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Snapshot,
    Reset,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Snapshot => "snapshot",
            Command::Reset => "reset",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Command {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "snapshot" => Ok(Command::Snapshot),
            "reset" => Ok(Command::Reset),
            other => Err(format!("unknown control command '{other}'")),
        }
    }
}

/// The fields a `sample` record carries, read once at classification time.
///
/// All fields are optional: a partial sample is not an error, it just
/// contributes less. Non-string station names, non-numeric temperatures and
/// non-integer timestamps read as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReading {
    pub station_name: Option<String>,
    pub temperature: Option<f64>,
    pub timestamp: Option<i64>,
}

impl SampleReading {
    /// Station identifier usable for range accumulation. An empty name does
    /// not identify a station.
    pub fn station(&self) -> Option<&str> {
        self.station_name.as_deref().filter(|name| !name.is_empty())
    }
}
