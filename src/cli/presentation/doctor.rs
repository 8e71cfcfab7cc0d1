//! Diagnostics presentation.

use owo_colors::OwoColorize;

use super::shared::format_section_heading;
use crate::doctor::{CheckStatus, DoctorReport};

pub fn format_doctor_report_text(report: &DoctorReport) -> String {
    let mut out = format!("{}\n", format_section_heading("Diagnostics"));
    for check in &report.checks {
        let mark = match check.status {
            CheckStatus::Ok => format!("{}", "✓".green()),
            CheckStatus::Warn => format!("{}", "!".yellow()),
            CheckStatus::Fail => format!("{}", "✗".red()),
        };
        out.push_str(&format!("{} {}: {}\n", mark, check.name, check.detail));
    }
    if !report.fixed.is_empty() {
        out.push_str("\nCreated:\n");
        for path in &report.fixed {
            out.push_str(&format!("  {}\n", path.display()));
        }
    }
    let issues = report.issues();
    if issues == 0 {
        out.push_str("\nNo problems found.");
    } else {
        out.push_str(&format!("\n{} issue(s) found.", issues));
    }
    out
}

pub fn format_doctor_report_json(report: &DoctorReport) -> String {
    let mut value = serde_json::to_value(report).unwrap_or_else(|_| serde_json::json!({}));
    value["issues"] = serde_json::json!(report.issues());
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}
