//! The game-facing state block persisted through the save engine. The shell
//! core never interprets it; it is one collaborator writing one payload
//! block.

use crate::save::{SaveError, SaveReader, SaveState, SaveWriter};
use serde_json::json;
use std::io::Write;

/// How a finished playthrough ended. Stored on the wire as a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ending {
    #[default]
    Unresolved,
    Ascension,
    Oblivion,
}

impl Ending {
    fn to_wire(self) -> u32 {
        match self {
            Ending::Unresolved => 0,
            Ending::Ascension => 1,
            Ending::Oblivion => 2,
        }
    }

    fn from_wire(value: u32) -> Result<Self, SaveError> {
        match value {
            0 => Ok(Ending::Unresolved),
            1 => Ok(Ending::Ascension),
            2 => Ok(Ending::Oblivion),
            other => Err(SaveError::Handler(format!("unknown ending code {other}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ending::Unresolved => "unresolved",
            Ending::Ascension => "ascension",
            Ending::Oblivion => "oblivion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub player_name: String,
    pub commands_executed: u64,
    pub sessions_started: u32,
    pub play_seconds: u64,
    pub completed: bool,
    pub ending: Ending,
}

impl Session {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            sessions_started: 1,
            ..Self::default()
        }
    }
}

impl SaveState for Session {
    fn write_payload<W: Write>(&self, writer: &mut SaveWriter<W>) -> Result<(), SaveError> {
        writer.write_string(&self.player_name)?;
        writer.write_u64(self.commands_executed)?;
        writer.write_u32(self.sessions_started)?;
        writer.write_u64(self.play_seconds)?;
        writer.write_bool(self.completed)?;
        writer.write_u32(self.ending.to_wire())
    }

    fn read_payload(reader: &mut SaveReader<'_>) -> Result<Self, SaveError> {
        Ok(Self {
            player_name: reader.read_string()?,
            commands_executed: reader.read_u64()?,
            sessions_started: reader.read_u32()?,
            play_seconds: reader.read_u64()?,
            completed: reader.read_bool()?,
            ending: Ending::from_wire(reader.read_u32()?)?,
        })
    }

    fn sidecar_summary(&self) -> serde_json::Value {
        json!({
            "player": self.player_name,
            "commands_executed": self.commands_executed,
            "sessions_started": self.sessions_started,
            "play_seconds": self.play_seconds,
            "completed": self.completed,
            "ending": self.ending.as_str(),
        })
    }
}
