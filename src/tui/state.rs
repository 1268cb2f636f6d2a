use crate::feedback::{self, AnalysisView};
use crate::model::{AnalysisReport, AppEvent, GeneratorKind};
use crate::notify::Notifier;
use std::ops::RangeInclusive;

pub const STANDARD_LENGTH_RANGE: RangeInclusive<u32> = 16..=100;
pub const QUANTUM_LENGTH_RANGE: RangeInclusive<u32> = 24..=100;

/// Which input affordance currently receives edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Password,
    StandardLength,
    QuantumLength,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Password => Focus::StandardLength,
            Focus::StandardLength => Focus::QuantumLength,
            Focus::QuantumLength => Focus::Password,
        }
    }
}

pub struct UiState {
    pub password: String,
    pub standard_length: u32,
    pub quantum_length: u32,
    /// At most one live report; replaced only when an analyze completes
    /// successfully, discarded by reset. Failures leave it untouched.
    pub report: Option<AnalysisReport>,
    /// Derived once per report replacement, never out of step with `report`.
    pub view: Option<AnalysisView>,
    pub standard_password: Option<String>,
    pub quantum_password: Option<String>,
    /// In-flight request count; any affordance that starts a request is
    /// disabled while this is non-zero.
    pub busy: usize,
    pub notifier: Notifier,
    pub focus: Focus,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            password: String::new(),
            standard_length: *STANDARD_LENGTH_RANGE.start(),
            quantum_length: *QUANTUM_LENGTH_RANGE.start(),
            report: None,
            view: None,
            standard_password: None,
            quantum_password: None,
            busy: 0,
            notifier: Notifier::default(),
            focus: Focus::Password,
        }
    }
}

impl UiState {
    pub fn is_busy(&self) -> bool {
        self.busy > 0
    }

    /// Clear the password and discard the analysis report together; no
    /// partial reset is observable between the two.
    pub fn reset(&mut self) {
        self.password.clear();
        self.report = None;
        self.view = None;
    }

    /// Adjust the focused length field, clamped to its bound.
    pub fn adjust_length(&mut self, delta: i64) {
        let (value, range) = match self.focus {
            Focus::StandardLength => (&mut self.standard_length, STANDARD_LENGTH_RANGE),
            Focus::QuantumLength => (&mut self.quantum_length, QUANTUM_LENGTH_RANGE),
            Focus::Password => return,
        };
        let adjusted = (*value as i64 + delta).clamp(*range.start() as i64, *range.end() as i64);
        *value = adjusted as u32;
    }

    pub fn slot(&self, kind: GeneratorKind) -> Option<&String> {
        match kind {
            GeneratorKind::Standard => self.standard_password.as_ref(),
            GeneratorKind::Quantum => self.quantum_password.as_ref(),
        }
    }
}

/// Apply an orchestrator event to the UI state.
pub fn apply_event(state: &mut UiState, ev: AppEvent) {
    match ev {
        AppEvent::RequestStarted { .. } => {
            state.busy += 1;
        }
        AppEvent::RequestFinished { .. } => {
            state.busy = state.busy.saturating_sub(1);
        }
        AppEvent::AnalysisCompleted { report } => {
            state.view = Some(feedback::build_view(&report));
            if report.leak_check.leaked {
                state
                    .notifier
                    .error("Warning: Password found in data breaches!");
            }
            state.report = Some(*report);
        }
        AppEvent::GenerationCompleted { kind, password } => {
            match kind {
                GeneratorKind::Standard => state.standard_password = Some(password),
                GeneratorKind::Quantum => state.quantum_password = Some(password),
            }
            let message = match kind {
                GeneratorKind::Standard => "New password generated!",
                GeneratorKind::Quantum => "Quantum-secure password generated!",
            };
            state.notifier.success(message);
        }
        AppEvent::RequestFailed { op } => {
            state.notifier.error(op.failure_message());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeakCheck, OpKind};
    use crate::notify::Severity;

    fn report(leaked: bool) -> Box<AnalysisReport> {
        Box::new(AnalysisReport {
            score: 2,
            max_score: 5,
            strength: "Weak".into(),
            requirements_met: vec!["length".into()],
            requirements_failed: vec!["uppercase".into(), "digit".into(), "symbol".into()],
            leak_check: LeakCheck {
                leaked,
                total_exposures: if leaked { 250 } else { 0 },
            },
        })
    }

    #[test]
    fn busy_counter_composes_across_overlapping_requests() {
        let mut state = UiState::default();
        apply_event(
            &mut state,
            AppEvent::RequestStarted { op: OpKind::Analyze },
        );
        apply_event(
            &mut state,
            AppEvent::RequestStarted {
                op: OpKind::Generate(GeneratorKind::Standard),
            },
        );
        assert!(state.is_busy());

        apply_event(
            &mut state,
            AppEvent::RequestFinished { op: OpKind::Analyze },
        );
        // One request still in flight; the first completion must not clear it.
        assert!(state.is_busy());

        apply_event(
            &mut state,
            AppEvent::RequestFinished {
                op: OpKind::Generate(GeneratorKind::Standard),
            },
        );
        assert!(!state.is_busy());
    }

    #[test]
    fn leaked_analysis_replaces_report_and_notifies() {
        let mut state = UiState::default();
        apply_event(&mut state, AppEvent::AnalysisCompleted { report: report(true) });

        assert!(state.report.as_ref().unwrap().leak_check.leaked);
        let visible = state.notifier.visible().unwrap();
        assert_eq!(visible.severity, Severity::Error);
        assert!(visible.message.contains("data breaches"));
    }

    #[test]
    fn clean_analysis_emits_no_notification() {
        let mut state = UiState::default();
        apply_event(&mut state, AppEvent::AnalysisCompleted { report: report(false) });

        assert!(state.report.is_some());
        assert_eq!(state.view.as_ref().unwrap().strength_line, "Weak (2/5)");
        assert!(state.notifier.visible().is_none());
    }

    #[test]
    fn failed_analyze_keeps_the_previous_report() {
        let mut state = UiState::default();
        apply_event(&mut state, AppEvent::AnalysisCompleted { report: report(false) });

        // A new analyze fails; the last result stays visible.
        apply_event(
            &mut state,
            AppEvent::RequestStarted { op: OpKind::Analyze },
        );
        apply_event(&mut state, AppEvent::RequestFailed { op: OpKind::Analyze });
        apply_event(
            &mut state,
            AppEvent::RequestFinished { op: OpKind::Analyze },
        );

        assert!(state.report.is_some());
        assert_eq!(state.view.as_ref().unwrap().strength_line, "Weak (2/5)");
        assert!(!state.is_busy());
    }

    #[test]
    fn successful_analyze_replaces_the_previous_report() {
        let mut state = UiState::default();
        apply_event(&mut state, AppEvent::AnalysisCompleted { report: report(false) });
        apply_event(&mut state, AppEvent::AnalysisCompleted { report: report(true) });

        // Replacement happens only on completion; at most one report lives.
        assert!(state.report.as_ref().unwrap().leak_check.leaked);
        assert!(state.view.as_ref().unwrap().banner.leaked);
    }

    #[test]
    fn generated_slots_are_independent() {
        let mut state = UiState::default();
        apply_event(
            &mut state,
            AppEvent::GenerationCompleted {
                kind: GeneratorKind::Standard,
                password: "std-1".into(),
            },
        );
        apply_event(
            &mut state,
            AppEvent::GenerationCompleted {
                kind: GeneratorKind::Quantum,
                password: "qnt-1".into(),
            },
        );
        apply_event(
            &mut state,
            AppEvent::GenerationCompleted {
                kind: GeneratorKind::Standard,
                password: "std-2".into(),
            },
        );

        assert_eq!(state.standard_password.as_deref(), Some("std-2"));
        assert_eq!(state.quantum_password.as_deref(), Some("qnt-1"));
    }

    #[test]
    fn failed_generation_keeps_previous_slot_value() {
        let mut state = UiState::default();
        state.standard_password = Some("old".into());
        apply_event(
            &mut state,
            AppEvent::RequestFailed {
                op: OpKind::Generate(GeneratorKind::Standard),
            },
        );

        assert_eq!(state.standard_password.as_deref(), Some("old"));
        let visible = state.notifier.visible().unwrap();
        assert_eq!(visible.severity, Severity::Error);
    }

    #[test]
    fn reset_clears_password_and_report_together() {
        let mut state = UiState::default();
        state.password = "hunter2".into();
        apply_event(&mut state, AppEvent::AnalysisCompleted { report: report(false) });

        state.reset();

        assert!(state.password.is_empty());
        assert!(state.report.is_none());
        assert!(state.view.is_none());
    }

    #[test]
    fn length_adjustment_clamps_to_bounds() {
        let mut state = UiState::default();
        state.focus = Focus::StandardLength;
        state.adjust_length(-5);
        assert_eq!(state.standard_length, 16);
        state.adjust_length(1000);
        assert_eq!(state.standard_length, 100);

        state.focus = Focus::QuantumLength;
        state.adjust_length(-100);
        assert_eq!(state.quantum_length, 24);
    }
}
