//! Approval decisions and their rendering into the host's hook protocol.

use serde::Serialize;

use crate::policy::Rule;

/// Hook stage every decision from this gate belongs to.
pub const HOOK_EVENT: &str = "PreToolUse";

/// The gate only ever opts in. There is deliberately no deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Allow,
    NoOpinion,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Allow => "allow",
            Outcome::NoOpinion => "no-opinion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalDecision {
    pub outcome: Outcome,
    pub reason: String,
    pub scope: &'static str,
}

impl ApprovalDecision {
    /// Allow because `rule` matched.
    pub fn allow(rule: &Rule) -> Self {
        Self {
            outcome: Outcome::Allow,
            reason: format!("allow-listed API call ({})", rule.describe()),
            scope: HOOK_EVENT,
        }
    }

    pub fn no_opinion(reason: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::NoOpinion,
            reason: reason.into(),
            scope: HOOK_EVENT,
        }
    }

    pub fn is_allow(&self) -> bool {
        self.outcome == Outcome::Allow
    }
}

/// Output format the host expects on stdout.
#[derive(Debug, Serialize)]
pub struct HookOutput<'a> {
    #[serde(rename = "hookSpecificOutput")]
    pub hook_specific_output: HookSpecificOutput<'a>,
}

#[derive(Debug, Serialize)]
pub struct HookSpecificOutput<'a> {
    #[serde(rename = "hookEventName", skip_serializing_if = "Option::is_none")]
    pub hook_event_name: Option<&'a str>,
    #[serde(rename = "permissionDecision")]
    pub permission_decision: &'a str,
    #[serde(rename = "permissionDecisionReason")]
    pub permission_decision_reason: &'a str,
}

/// Renders decisions into single-line JSON.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    include_event_name: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            include_event_name: true,
        }
    }
}

impl Emitter {
    pub fn new(include_event_name: bool) -> Self {
        Self { include_event_name }
    }

    /// The line to print for `decision`, or `None` when the gate stays silent.
    pub fn render(&self, decision: &ApprovalDecision) -> Option<String> {
        if !decision.is_allow() {
            return None;
        }
        let output = HookOutput {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: self.include_event_name.then_some(decision.scope),
                permission_decision: decision.outcome.as_str(),
                permission_decision_reason: &decision.reason,
            },
        };
        match serde_json::to_string(&output) {
            Ok(line) => Some(line),
            Err(e) => {
                log::error!("failed to serialize decision: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn example_allow() -> ApprovalDecision {
        ApprovalDecision::allow(&Rule::new("example", "curl", "api.example.com"))
    }

    #[test]
    fn allow_renders_full_shape() {
        let line = Emitter::default().render(&example_allow()).unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(
            value,
            json!({
                "hookSpecificOutput": {
                    "hookEventName": "PreToolUse",
                    "permissionDecision": "allow",
                    "permissionDecisionReason": "allow-listed API call (example: curl api.example.com)",
                }
            })
        );
    }

    #[test]
    fn allow_is_single_line() {
        let line = Emitter::default().render(&example_allow()).unwrap();
        assert!(!line.contains('\n'));
    }

    #[test]
    fn event_name_can_be_omitted() {
        let line = Emitter::new(false).render(&example_allow()).unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();
        let inner = &value["hookSpecificOutput"];
        assert!(inner.get("hookEventName").is_none());
        assert_eq!(inner["permissionDecision"], "allow");
    }

    #[test]
    fn no_opinion_renders_nothing() {
        let decision = ApprovalDecision::no_opinion("no rule matched");
        assert_eq!(Emitter::default().render(&decision), None);
        assert_eq!(Emitter::new(false).render(&decision), None);
    }

    #[test]
    fn scope_is_pre_tool_use() {
        assert_eq!(example_allow().scope, "PreToolUse");
        assert_eq!(ApprovalDecision::no_opinion("x").scope, "PreToolUse");
    }

    #[test]
    fn reason_is_escaped() {
        let rule = Rule::new("quote\"d", "curl", "api.example.com");
        let line = Emitter::default()
            .render(&ApprovalDecision::allow(&rule))
            .unwrap();
        let value: Value = serde_json::from_str(&line).unwrap();
        assert!(
            value["hookSpecificOutput"]["permissionDecisionReason"]
                .as_str()
                .unwrap()
                .contains("quote\"d")
        );
    }
}
