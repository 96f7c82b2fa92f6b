pub mod rule;

pub use rule::Rule;

use crate::config::PolicyConfig;

/// Ordered, closed set of allow-list rules. First match wins.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    rules: Vec<Rule>,
}

impl Policy {
    /// Build the policy from configuration.
    ///
    /// Invalid rules are dropped; a repeated id keeps its first definition.
    pub fn from_config(config: &PolicyConfig) -> Self {
        let mut rules: Vec<Rule> = Vec::new();
        for cfg in &config.rules {
            if rules.iter().any(|r| r.id == cfg.id) {
                log::warn!("duplicate rule id {:?}, keeping the first", cfg.id);
                continue;
            }
            if let Some(rule) = Rule::from_config(cfg) {
                rules.push(rule);
            }
        }
        Self { rules }
    }

    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Return the first rule matching `text`, if any.
    pub fn find_match(&self, text: &str) -> Option<&Rule> {
        if text.is_empty() {
            return None;
        }
        let found = self.rules.iter().find(|rule| rule.matches(text));
        match found {
            Some(rule) => log::debug!("rule {} matched", rule.id),
            None => log::debug!("no rule matched ({} checked)", self.rules.len()),
        }
        found
    }
}
