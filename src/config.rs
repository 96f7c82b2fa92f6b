use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Location of the user overlay, tilde-expanded at load time.
const USER_CONFIG_PATH: &str = "~/.config/apigate/config.toml";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Request reader strategy: `"structured"` or `"raw"`.
    #[serde(default = "default_reader")]
    pub reader: String,
    /// Whether the emitted decision carries `hookEventName`.
    #[serde(default = "default_true")]
    pub include_event_name: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Decision log path; empty disables file logging.
    #[serde(default)]
    pub log_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reader: default_reader(),
            include_event_name: true,
            log_level: default_log_level(),
            log_file: String::new(),
        }
    }
}

fn default_reader() -> String {
    "structured".into()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct PolicyConfig {
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// One allow-list rule as written in TOML.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RuleConfig {
    pub id: String,
    /// Network-fetch token that must appear in the command (e.g. `curl`).
    pub tool: String,
    /// Literal host substring that must appear in the command.
    pub host: String,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    policy: PolicyOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    reader: Option<String>,
    include_event_name: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct PolicyOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    rules: Vec<RuleConfig>,
    #[serde(default)]
    remove_rules: Vec<String>,
}

// ── Merge logic ──

/// Merge user rules into the default rule list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove ids first, then extend with additions (deduped by id).
fn merge_rules(base: &mut Vec<RuleConfig>, add: Vec<RuleConfig>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|rule| !remove.contains(&rule.id));
        for rule in add {
            if !base.iter().any(|r| r.id == rule.id) {
                base.push(rule);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/apigate/config.toml (if exists)
    ///
    /// User config merges with defaults: rules extend, scalars override.
    /// Set `replace = true` in `[policy]` to replace the default rules entirely.
    /// Use `remove_rules` to subtract specific default rules by id.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/apigate/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let path = shellexpand::tilde(USER_CONFIG_PATH);
        let content = std::fs::read_to_string(path.as_ref()).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                // stdout carries the hook protocol; diagnostics go to stderr
                eprintln!("apigate: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        if let Some(v) = s.reader {
            self.settings.reader = v;
        }
        if let Some(v) = s.include_event_name {
            self.settings.include_event_name = v;
        }
        if let Some(v) = s.log_level {
            self.settings.log_level = v;
        }
        if let Some(v) = s.log_file {
            self.settings.log_file = v;
        }

        let p = overlay.policy;
        merge_rules(&mut self.policy.rules, p.rules, &p.remove_rules, p.replace);
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
