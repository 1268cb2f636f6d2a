//! Text summary builder for CLI output.
//!
//! Formats human-readable lines for one-shot `--check` mode from the derived
//! presentation view.

use crate::feedback::{self, AnalysisView};
use crate::model::AnalysisReport;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text summary from an analysis report.
pub(crate) fn build_text_summary(report: &AnalysisReport) -> TextSummary {
    let view: AnalysisView = feedback::build_view(report);
    let mut lines = Vec::new();

    lines.push(format!("Strength: {}", view.strength_line));
    lines.push(view.banner.headline.to_string());
    if let Some(exposures) = view.banner.exposures.as_deref() {
        lines.push(exposures.to_string());
    }
    if view.banner.offer_regenerate {
        lines.push("Hint: run with --generate for a new secure password".to_string());
    }

    // Empty sections are suppressed entirely.
    if !view.requirements_met.is_empty() {
        lines.push("Requirements met:".to_string());
        for req in &view.requirements_met {
            lines.push(format!("  [x] {req}"));
        }
    }
    if !view.requirements_failed.is_empty() {
        lines.push("Requirements not met:".to_string());
        for req in &view.requirements_failed {
            lines.push(format!("  [ ] {req}"));
        }
    }

    TextSummary { lines }
}
