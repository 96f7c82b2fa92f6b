//! apigate: a PreToolUse hook that pre-approves narrowly scoped API calls.
//!
//! The hook reads a tool-use payload from stdin, pulls out the proposed shell
//! command, and emits an `allow` decision when the command is a `curl` (or
//! other configured fetch tool) call to an allow-listed host. Anything else,
//! including malformed input, produces no output at all so the host falls
//! back to its normal permission flow. The gate never denies.
//!
//! # Architecture
//!
//! - **[`input`]**: Request reader: JSON field extraction with raw-text fallback.
//! - **[`policy`]**: Policy matcher: ordered `(tool, host)` substring rules.
//! - **[`decision`]**: Decision types and rendering into the hook protocol.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: Decision logging to `~/.local/share/apigate/decisions.log`.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Approval decisions and the stdout protocol.
pub mod decision;
/// Payload reading and command extraction.
pub mod input;
/// File-based decision logging.
pub mod logging;
/// Allow-list rules and first-match evaluation.
pub mod policy;

use config::Config;
use decision::{ApprovalDecision, Emitter};
use input::{CommandReader, ToolInvocationRequest};
use policy::Policy;

/// Reader, policy and emitter wired together from one configuration.
pub struct Gate {
    reader: Box<dyn CommandReader>,
    policy: Policy,
    emitter: Emitter,
}

impl Gate {
    /// Build the gate from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            reader: input::reader_for(&config.settings.reader),
            policy: Policy::from_config(&config.policy),
            emitter: Emitter::new(config.settings.include_event_name),
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Read a payload into a request using the configured reader strategy.
    pub fn read(&self, payload: String) -> ToolInvocationRequest {
        self.reader.read(payload)
    }

    /// Classify an already-read request.
    pub fn decide(&self, request: &ToolInvocationRequest) -> ApprovalDecision {
        let text = request.command.text();
        if text.trim().is_empty() {
            return ApprovalDecision::no_opinion("empty command");
        }
        match self.policy.find_match(text) {
            Some(rule) => ApprovalDecision::allow(rule),
            None => ApprovalDecision::no_opinion(format!(
                "no allow-list rule matched ({} text)",
                request.command.source()
            )),
        }
    }

    /// Classify a raw payload.
    pub fn evaluate(&self, payload: &str) -> ApprovalDecision {
        self.decide(&self.read(payload.to_string()))
    }

    /// Stdout line for a decision; `None` means print nothing.
    pub fn render(&self, decision: &ApprovalDecision) -> Option<String> {
        self.emitter.render(decision)
    }
}

/// Build a gate from the default config and evaluate a raw payload.
///
/// This is the main entry point for tests and simple usage.
/// For hook usage with the user config, build the [`Gate`] directly.
pub fn evaluate(payload: &str) -> ApprovalDecision {
    let config = Config::default_config();
    Gate::from_config(&config).evaluate(payload)
}
