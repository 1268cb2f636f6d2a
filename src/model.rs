use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    pub user_agent: String,
}

/// Breach lookup outcome attached to an analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeakCheck {
    pub leaked: bool,
    #[serde(default)]
    pub total_exposures: u64,
}

/// Successful response of `POST /check_password`.
///
/// `strength` is an open categorical label owned by the service; see
/// `feedback::StrengthCategory` for how unknown values are handled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub score: i64,
    pub max_score: i64,
    pub strength: String,
    #[serde(default)]
    pub requirements_met: Vec<String>,
    #[serde(default)]
    pub requirements_failed: Vec<String>,
    pub leak_check: LeakCheck,
}

/// Response body of both generation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPassword {
    pub password: String,
}

/// Which generation endpoint a request or result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratorKind {
    Standard,
    Quantum,
}

impl GeneratorKind {
    pub fn label(self) -> &'static str {
        match self {
            GeneratorKind::Standard => "password",
            GeneratorKind::Quantum => "quantum-secure password",
        }
    }
}

/// The three remote operations sharing the busy counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpKind {
    Analyze,
    Generate(GeneratorKind),
}

impl OpKind {
    /// Human-readable failure message for the notification channel.
    /// Uniform per operation; the underlying error is not surfaced.
    pub fn failure_message(self) -> String {
        match self {
            OpKind::Analyze => "Error checking password strength".to_string(),
            OpKind::Generate(kind) => format!("Error generating {}", kind.label()),
        }
    }
}

/// Events emitted by the orchestrator and consumed by UI/CLI layers.
#[derive(Debug, Clone)]
pub enum AppEvent {
    RequestStarted {
        op: OpKind,
    },
    /// Emitted on every request exit path, including stale drops, so the
    /// busy counter always drains.
    RequestFinished {
        op: OpKind,
    },
    AnalysisCompleted {
        // Box to keep AppEvent small; the report carries two string lists.
        report: Box<AnalysisReport>,
    },
    GenerationCompleted {
        kind: GeneratorKind,
        password: String,
    },
    RequestFailed {
        op: OpKind,
    },
}
