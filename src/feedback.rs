//! Derived presentation state.
//!
//! Pure functions from the last analysis report to presentation values.
//! No I/O, no side effects; recomputed whenever the report slot is replaced.

use crate::model::{AnalysisReport, LeakCheck};

/// Known strength categories, plus `Unknown` for any label the service
/// introduces that this client does not recognize. The raw label is still
/// rendered verbatim; only the styling falls back to a neutral treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthCategory {
    VeryWeak,
    Weak,
    Medium,
    Strong,
    VeryStrong,
    Unknown,
}

/// Lowercase the label and replace spaces with hyphens: "Very Strong" ->
/// "very-strong". Any label is accepted; no validation against a fixed set.
pub fn style_key(label: &str) -> String {
    label.to_lowercase().replace(' ', "-")
}

pub fn category_for(label: &str) -> StrengthCategory {
    match style_key(label).as_str() {
        "very-weak" => StrengthCategory::VeryWeak,
        "weak" => StrengthCategory::Weak,
        "medium" => StrengthCategory::Medium,
        "strong" => StrengthCategory::Strong,
        "very-strong" => StrengthCategory::VeryStrong,
        _ => StrengthCategory::Unknown,
    }
}

/// Format a count with thousands grouping: 1234567 -> "1,234,567".
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Breach banner contents. Present whenever a report is present; the
/// exposures line and the regenerate action only appear for leaked passwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachBanner {
    pub leaked: bool,
    pub headline: &'static str,
    pub exposures: Option<String>,
    pub offer_regenerate: bool,
}

pub fn breach_banner(leak: &LeakCheck) -> BreachBanner {
    if leak.leaked {
        BreachBanner {
            leaked: true,
            headline: "Password Compromised!",
            exposures: Some(format!(
                "Found in {} data breaches",
                group_thousands(leak.total_exposures)
            )),
            offer_regenerate: true,
        }
    } else {
        BreachBanner {
            leaked: false,
            headline: "Password Not Found in Breaches",
            exposures: None,
            offer_regenerate: false,
        }
    }
}

/// Everything a presentation layer needs to render one analysis report.
#[derive(Debug, Clone)]
pub struct AnalysisView {
    pub strength_line: String,
    pub category: StrengthCategory,
    pub banner: BreachBanner,
    /// Verbatim, in source order. Empty lists mean the section is suppressed
    /// entirely, not rendered as an empty placeholder.
    pub requirements_met: Vec<String>,
    pub requirements_failed: Vec<String>,
}

pub fn build_view(report: &AnalysisReport) -> AnalysisView {
    AnalysisView {
        strength_line: format!(
            "{} ({}/{})",
            report.strength, report.score, report.max_score
        ),
        category: category_for(&report.strength),
        banner: breach_banner(&report.leak_check),
        requirements_met: report.requirements_met.clone(),
        requirements_failed: report.requirements_failed.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(strength: &str, met: &[&str], failed: &[&str], leaked: bool) -> AnalysisReport {
        AnalysisReport {
            score: 2,
            max_score: 5,
            strength: strength.to_string(),
            requirements_met: met.iter().map(|s| s.to_string()).collect(),
            requirements_failed: failed.iter().map(|s| s.to_string()).collect(),
            leak_check: LeakCheck {
                leaked,
                total_exposures: if leaked { 1234567 } else { 0 },
            },
        }
    }

    #[test]
    fn style_key_lowercases_and_hyphenates() {
        assert_eq!(style_key("Very Strong"), "very-strong");
        assert_eq!(style_key("Weak"), "weak");
    }

    #[test]
    fn unknown_labels_get_a_distinct_category() {
        assert_eq!(category_for("Very Strong"), StrengthCategory::VeryStrong);
        assert_eq!(category_for("Glorious"), StrengthCategory::Unknown);
        assert_eq!(category_for(""), StrengthCategory::Unknown);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn leaked_banner_offers_regeneration() {
        let banner = breach_banner(&LeakCheck {
            leaked: true,
            total_exposures: 1234567,
        });
        assert!(banner.offer_regenerate);
        assert_eq!(
            banner.exposures.as_deref(),
            Some("Found in 1,234,567 data breaches")
        );
    }

    #[test]
    fn clean_banner_has_no_exposures_line() {
        let banner = breach_banner(&LeakCheck {
            leaked: false,
            total_exposures: 0,
        });
        assert!(!banner.offer_regenerate);
        assert!(banner.exposures.is_none());
    }

    #[test]
    fn requirements_kept_verbatim_in_source_order() {
        let view = build_view(&report("Weak", &[], &["length", "symbol"], false));
        assert!(view.requirements_met.is_empty());
        assert_eq!(view.requirements_failed, vec!["length", "symbol"]);
    }

    #[test]
    fn weak_scenario_renders_expected_view() {
        let view = build_view(&report(
            "Weak",
            &["length"],
            &["uppercase", "digit", "symbol"],
            false,
        ));
        assert_eq!(view.strength_line, "Weak (2/5)");
        assert_eq!(view.category, StrengthCategory::Weak);
        assert_eq!(view.requirements_met.len(), 1);
        assert_eq!(view.requirements_failed.len(), 3);
        assert!(!view.banner.leaked);
    }
}
