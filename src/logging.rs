use std::fs::OpenOptions;
use std::path::PathBuf;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::config::Settings;
use crate::decision::ApprovalDecision;

/// Longest command prefix written to the decision log.
const MAX_LOGGED_COMMAND: usize = 200;

/// Install a file logger from settings.
/// Best-effort: failures are silently ignored (logging must never block the hook).
/// stdout carries the hook protocol, so nothing is ever logged there.
pub fn init(settings: &Settings) {
    let level = parse_level(&settings.log_level);
    if level == LevelFilter::Off {
        return;
    }
    let Some(path) = resolve_path(&settings.log_file) else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let _ = WriteLogger::init(level, config, file);
}

/// Record one decision as `<outcome>\t<command>\t<reason>`.
pub fn log_decision(command: &str, decision: &ApprovalDecision) {
    log::info!("{}", format_record(command, decision));
}

fn format_record(command: &str, decision: &ApprovalDecision) -> String {
    // Compact single-line fields so one invocation is one log line
    let cmd_truncated: String = command
        .chars()
        .take(MAX_LOGGED_COMMAND)
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect();
    let reason_oneline = decision.reason.replace('\n', "; ");
    format!(
        "{}\t{}\t{}",
        decision.outcome.as_str(),
        cmd_truncated,
        reason_oneline
    )
}

/// Unknown level names fall back to `info`.
fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Tilde-expanded log path, `None` when logging to a file is disabled.
fn resolve_path(log_file: &str) -> Option<PathBuf> {
    let trimmed = log_file.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(shellexpand::tilde(trimmed).as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Rule;

    #[test]
    fn levels_parse() {
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level(" warn "), LevelFilter::Warn);
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }

    #[test]
    fn empty_path_disables() {
        assert_eq!(resolve_path(""), None);
        assert_eq!(resolve_path("   "), None);
    }

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(
            resolve_path("/var/log/apigate.log"),
            Some(PathBuf::from("/var/log/apigate.log"))
        );
    }

    #[test]
    fn record_is_tab_separated() {
        let decision = ApprovalDecision::allow(&Rule::new("example", "curl", "api.example.com"));
        let record = format_record("curl api.example.com", &decision);
        let fields: Vec<&str> = record.split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], "allow");
        assert_eq!(fields[1], "curl api.example.com");
        assert!(fields[2].contains("example"));
    }

    #[test]
    fn record_flattens_and_truncates_command() {
        let decision = ApprovalDecision::no_opinion("no rule matched");
        let command = format!("echo a\n\tb {}", "x".repeat(500));
        let record = format_record(&command, &decision);
        assert!(!record.contains('\n'));
        assert_eq!(record.split('\t').count(), 3);
        let logged = record.split('\t').nth(1).unwrap();
        assert_eq!(logged.chars().count(), MAX_LOGGED_COMMAND);
        assert!(logged.starts_with("echo a  b "));
    }
}
