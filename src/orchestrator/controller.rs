//! Request lifecycle controller.
//!
//! Receives commands from UI layers, spawns one task per remote request, and
//! emits events back for presentation. Requests are never serialized or
//! cancelled; instead each operation kind carries a monotonically increasing
//! token and completions older than the latest issued token are dropped, so a
//! slow earlier request can never overwrite a newer result.

use crate::model::{AnalysisReport, AppEvent, GeneratorKind, OpKind};
use crate::service::SuiteClient;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI layers.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    /// Analyze the given password. Empty input is a no-op: no request is
    /// sent and no event is emitted.
    Analyze(String),
    Generate(GeneratorKind, u32),
    Quit,
}

enum Outcome {
    Analysis(Box<AnalysisReport>),
    Generated(GeneratorKind, String),
    Failed,
}

struct Completion {
    op: OpKind,
    token: u64,
    outcome: Outcome,
}

/// Latest issued token per operation kind. A completion is stale when a newer
/// token for the same kind has been issued since it started.
#[derive(Debug, Default)]
struct TokenLedger {
    analyze: u64,
    standard: u64,
    quantum: u64,
}

impl TokenLedger {
    fn slot(&mut self, op: OpKind) -> &mut u64 {
        match op {
            OpKind::Analyze => &mut self.analyze,
            OpKind::Generate(GeneratorKind::Standard) => &mut self.standard,
            OpKind::Generate(GeneratorKind::Quantum) => &mut self.quantum,
        }
    }

    fn issue(&mut self, op: OpKind) -> u64 {
        let slot = self.slot(op);
        *slot += 1;
        *slot
    }

    fn is_current(&mut self, op: OpKind, token: u64) -> bool {
        *self.slot(op) == token
    }
}

fn spawn_request(
    client: Arc<SuiteClient>,
    cmd: UiCommand,
    op: OpKind,
    token: u64,
    done_tx: UnboundedSender<Completion>,
) {
    tokio::spawn(async move {
        let outcome = match cmd {
            UiCommand::Analyze(password) => match client.check_password(&password).await {
                Ok(report) => Outcome::Analysis(Box::new(report)),
                Err(_) => Outcome::Failed,
            },
            UiCommand::Generate(kind, length) => {
                match client.generate_password(kind, length).await {
                    Ok(password) => Outcome::Generated(kind, password),
                    Err(_) => Outcome::Failed,
                }
            }
            UiCommand::Quit => return,
        };
        let _ = done_tx.send(Completion { op, token, outcome });
    });
}

/// Orchestrate requests based on UI commands and emit events back to
/// presentation layers. Returns once `Quit` is received and all in-flight
/// requests have completed (each request has a client-side deadline, so this
/// cannot hang on a dead server).
pub(crate) async fn run_controller(
    client: SuiteClient,
    event_tx: UnboundedSender<AppEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let client = Arc::new(client);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
    let mut ledger = TokenLedger::default();
    let mut in_flight = 0usize;
    let mut quit_pending = false;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv(), if !quit_pending => {
                let cmd = cmd.unwrap_or(UiCommand::Quit);
                let op = match &cmd {
                    UiCommand::Analyze(password) => {
                        if password.is_empty() {
                            continue;
                        }
                        OpKind::Analyze
                    }
                    UiCommand::Generate(kind, _) => OpKind::Generate(*kind),
                    UiCommand::Quit => {
                        if in_flight == 0 {
                            break;
                        }
                        quit_pending = true;
                        continue;
                    }
                };
                let token = ledger.issue(op);
                in_flight += 1;
                let _ = event_tx.send(AppEvent::RequestStarted { op });
                spawn_request(client.clone(), cmd, op, token, done_tx.clone());
            }
            Some(done) = done_rx.recv() => {
                in_flight = in_flight.saturating_sub(1);
                if ledger.is_current(done.op, done.token) {
                    match done.outcome {
                        Outcome::Analysis(report) => {
                            let _ = event_tx.send(AppEvent::AnalysisCompleted { report });
                        }
                        Outcome::Generated(kind, password) => {
                            let _ = event_tx.send(AppEvent::GenerationCompleted { kind, password });
                        }
                        Outcome::Failed => {
                            let _ = event_tx.send(AppEvent::RequestFailed { op: done.op });
                        }
                    }
                }
                // Stale completions still release the busy counter.
                let _ = event_tx.send(AppEvent::RequestFinished { op: done.op });
                if quit_pending && in_flight == 0 {
                    break;
                }
            }
        }
    }

    Ok(())
}
