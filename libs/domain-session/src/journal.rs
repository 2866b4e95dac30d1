//! # Command Journal
//!
//! JSON-lines persistence for command streams: one command object per line,
//! blank lines ignored.

use crate::command::Command;
use crate::error::{SessionError, SessionResult};

/// Serialize commands, one JSON object per line.
pub fn to_jsonl(commands: &[Command]) -> SessionResult<String> {
    let mut out = String::new();
    for command in commands {
        let line = serde_json::to_string(command).map_err(|err| SessionError::Journal {
            line: 0,
            message: err.to_string(),
        })?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Parse a JSON-lines journal.
pub fn from_jsonl(text: &str) -> SessionResult<Vec<Command>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|err| SessionError::Journal {
                line: index + 1,
                message: err.to_string(),
            })
        })
        .collect()
}
