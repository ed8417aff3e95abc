//! Output rendering for the bootstrap report.
//!
//! Supports `human` (default) and `json` outputs. The JSON form lists every
//! plugin with its checkers' resolved states, the extension registry, the
//! `{tool, code}` keys of active checkers, and a top-level summary.

use crate::bootstrap::BootReport;
use crate::config::OutputMode;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: OutputMode) -> bool {
    output != OutputMode::Json && std::env::var_os("NO_COLOR").is_none()
}

/// Print the report in the requested format.
pub fn print_report(report: &BootReport, output: OutputMode) {
    match output {
        OutputMode::Json => match serde_json::to_string_pretty(&compose_report_json(report)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("failed to serialize report: {}", e),
        },
        OutputMode::Human => {
            let color = use_colors(output);
            for plugin in &report.plugins {
                let header = format!(
                    "{} {} [{}]",
                    plugin.tool_name(),
                    plugin.description.version,
                    plugin.language()
                );
                if color {
                    println!("{}", header.bold());
                } else {
                    println!("{}", header);
                }
                for checker in &plugin.checkers {
                    let active = report
                        .activation
                        .is_active(plugin.tool_name(), &checker.code)
                        .unwrap_or(checker.active);
                    let mark = match (active, color) {
                        (true, true) => "● on ".green().to_string(),
                        (true, false) => "● on ".to_string(),
                        (false, true) => "○ off".bright_black().to_string(),
                        (false, false) => "○ off".to_string(),
                    };
                    println!(
                        "  {} {:<24} {} ({})",
                        mark, checker.code, checker.name, checker.severity
                    );
                }
            }
            let exts: Vec<&str> = report.extensions.extensions().collect();
            if !exts.is_empty() {
                println!("extensions: {}", exts.join(", "));
            }
            let summary = format!(
                "— Summary — plugins={} checkers={} active={} overrides={} synced={}",
                report.plugins.len(),
                report.activation.len(),
                report.activation.active_count(),
                if report.override_mode { "on" } else { "off" },
                report.synced
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose the report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &BootReport) -> JsonVal {
    let plugins: Vec<_> = report
        .plugins
        .iter()
        .map(|p| {
            let checkers: Vec<_> = p
                .checkers
                .iter()
                .map(|c| {
                    json!({
                        "code": c.code,
                        "name": c.name,
                        "severity": c.severity,
                        "default": c.active,
                        "active": report
                            .activation
                            .is_active(p.tool_name(), &c.code)
                            .unwrap_or(c.active),
                    })
                })
                .collect();
            json!({
                "name": p.description.name,
                "version": p.description.version,
                "language": p.description.language,
                "description": p.description.description,
                "extensions": p.description.extensions,
                "checkers": checkers,
            })
        })
        .collect();
    // `{tool, code}` of every active checker, ordered by tool then code
    let enabled: Vec<_> = report
        .activation
        .iter()
        .filter(|(_, active)| *active)
        .map(|(key, _)| key)
        .collect();
    let summary = json!({
        "plugins": report.plugins.len(),
        "checkers": report.activation.len(),
        "active": report.activation.active_count(),
        "overrideMode": report.override_mode,
        "synced": report.synced,
    });
    json!({
        "plugins": plugins,
        "extensions": report.extensions,
        "enabled": enabled,
        "summary": summary,
    })
}
