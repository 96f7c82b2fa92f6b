//! Request reader: pull the candidate command out of a hook payload.
//!
//! Readers never fail. Anything that is not a recognizable JSON payload
//! degrades to scanning the raw text.

use std::io::Read;

use serde_json::Value;

use super::types::{Extracted, ToolInvocationRequest};

/// JSON paths checked for the command string, in order of preference.
const COMMAND_PATHS: &[&[&str]] = &[&["tool_input", "command"], &["command"]];

/// Strategy for turning a raw payload into scan text.
pub trait CommandReader: Send + Sync {
    /// Strategy name as used in `settings.reader`.
    fn name(&self) -> &'static str;

    /// Extract the command text from a payload.
    fn extract(&self, payload: &str) -> Extracted;

    /// Build the full request value for a payload.
    fn read(&self, payload: String) -> ToolInvocationRequest {
        let command = self.extract(&payload);
        ToolInvocationRequest {
            raw_payload: payload,
            command,
        }
    }
}

/// Parse JSON and look for a command field, falling back to the raw payload.
pub struct StructuredReader;

impl CommandReader for StructuredReader {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn extract(&self, payload: &str) -> Extracted {
        match command_field(payload) {
            Some(command) => Extracted::Parsed(command),
            None => Extracted::Unparsed(payload.to_string()),
        }
    }
}

/// Never parse; always scan the whole payload.
pub struct RawReader;

impl CommandReader for RawReader {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn extract(&self, payload: &str) -> Extracted {
        Extracted::Unparsed(payload.to_string())
    }
}

/// Pick a reader strategy by name. Unknown names get the structured reader.
pub fn reader_for(name: &str) -> Box<dyn CommandReader> {
    match name {
        "raw" => Box::new(RawReader),
        "structured" => Box::new(StructuredReader),
        other => {
            log::warn!("unknown reader {other:?}, using structured");
            Box::new(StructuredReader)
        }
    }
}

/// Read an entire payload stream. Invalid UTF-8 is replaced, a read error
/// yields whatever was read before it (usually nothing).
pub fn read_payload(mut source: impl Read) -> String {
    let mut buf = Vec::new();
    if let Err(e) = source.read_to_end(&mut buf) {
        log::debug!("payload read failed: {e}");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// First non-blank string at one of the conventional command paths.
fn command_field(payload: &str) -> Option<String> {
    let value: Value = match serde_json::from_str(payload) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("payload is not JSON ({e}), scanning raw text");
            return None;
        }
    };
    COMMAND_PATHS.iter().find_map(|path| {
        let text = lookup(&value, path)?;
        if text.trim().is_empty() {
            None
        } else {
            log::debug!("command found at {}", path.join("."));
            Some(text.to_string())
        }
    })
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |node, key| node.get(key))?
        .as_str()
}
