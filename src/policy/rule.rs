use crate::config::RuleConfig;

/// A single allow-list rule: a fetch-tool token paired with an approved host.
///
/// Matching is a plain substring test on both parts. There is no shell
/// tokenization, so `curl` inside `libcurl` or a host inside a longer
/// hostname still count. Rules reduce prompting for a known-benign class of
/// commands; they are not a boundary against an adversarial caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub tool: String,
    pub host: String,
}

impl Rule {
    pub fn new(id: impl Into<String>, tool: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tool: tool.into(),
            host: host.into(),
        }
    }

    /// Build a rule from config, rejecting entries that would match too broadly.
    pub fn from_config(cfg: &RuleConfig) -> Option<Self> {
        if cfg.tool.trim().is_empty() || cfg.host.trim().is_empty() {
            log::warn!("ignoring rule {:?}: tool and host must be non-empty", cfg.id);
            return None;
        }
        Some(Self::new(&cfg.id, &cfg.tool, &cfg.host))
    }

    /// True when `text` contains both the tool token and the host.
    pub fn matches(&self, text: &str) -> bool {
        !text.is_empty() && text.contains(&self.tool) && text.contains(&self.host)
    }

    /// Human-readable description used in decision reasons.
    pub fn describe(&self) -> String {
        format!("{}: {} {}", self.id, self.tool, self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Rule {
        Rule::new("example", "curl", "api.example.com")
    }

    #[test]
    fn tool_and_host() {
        assert!(example().matches("curl https://api.example.com/x"));
    }

    #[test]
    fn host_without_tool() {
        assert!(!example().matches("echo api.example.com"));
    }

    #[test]
    fn tool_without_host() {
        assert!(!example().matches("curl https://example.org"));
    }

    #[test]
    fn empty_text() {
        assert!(!example().matches(""));
    }

    #[test]
    fn case_sensitive() {
        assert!(!example().matches("CURL https://API.EXAMPLE.COM"));
    }

    #[test]
    fn order_does_not_matter() {
        assert!(example().matches("API=api.example.com; curl \"https://$API/v1\""));
    }

    #[test]
    fn substring_not_word() {
        // Coarse by design: any occurrence counts
        assert!(example().matches("libcurl-config --host api.example.com.evil.net"));
    }

    #[test]
    fn from_config_rejects_empty_host() {
        let cfg = RuleConfig {
            id: "bad".into(),
            tool: "curl".into(),
            host: " ".into(),
        };
        assert_eq!(Rule::from_config(&cfg), None);
    }

    #[test]
    fn from_config_rejects_empty_tool() {
        let cfg = RuleConfig {
            id: "bad".into(),
            tool: String::new(),
            host: "api.example.com".into(),
        };
        assert_eq!(Rule::from_config(&cfg), None);
    }

    #[test]
    fn from_config_keeps_valid_rule() {
        let cfg = RuleConfig {
            id: "example".into(),
            tool: "curl".into(),
            host: "api.example.com".into(),
        };
        assert_eq!(Rule::from_config(&cfg), Some(example()));
    }

    #[test]
    fn describe_names_all_parts() {
        assert_eq!(example().describe(), "example: curl api.example.com");
    }
}
