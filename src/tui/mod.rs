mod clipboard;
mod state;

use crate::cli::{build_config, Cli};
use crate::feedback::StrengthCategory;
use crate::model::{AppEvent, GeneratorKind};
use crate::notify::Severity;
use crate::orchestrator::{self, UiCommand};
use crate::service::SuiteClient;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use state::{apply_event, Focus, UiState};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between the UI thread and the
    // controller; the volume here is tiny.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let client = SuiteClient::new(&build_config(&args))?;

    // TUI runs in a dedicated thread to keep all blocking I/O out of the
    // Tokio runtime.
    let ui_args = args.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_args, event_rx, cmd_tx));

    let res = orchestrator::run_controller(client, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    args: Cli,
    mut event_rx: UnboundedReceiver<AppEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut state = UiState {
        standard_length: args.length,
        quantum_length: args.quantum_length,
        ..Default::default()
    };

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            apply_event(&mut state, ev);
        }
        state.notifier.tick(Instant::now());

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                        state.reset();
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('g')) => {
                        if !state.is_busy() {
                            let _ = cmd_tx.send(UiCommand::Generate(
                                GeneratorKind::Standard,
                                state.standard_length,
                            ));
                        }
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                        if !state.is_busy() {
                            let _ = cmd_tx.send(UiCommand::Generate(
                                GeneratorKind::Quantum,
                                state.quantum_length,
                            ));
                        }
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('y')) => {
                        copy_slot(&mut state, GeneratorKind::Standard);
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                        copy_slot(&mut state, GeneratorKind::Quantum);
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
                        state.notifier.dismiss();
                    }
                    (_, KeyCode::Enter) => {
                        // Empty input is a no-op; the orchestrator would
                        // also refuse it, this just keeps the gate at the
                        // affordance level.
                        if !state.is_busy() && !state.password.is_empty() {
                            let _ = cmd_tx.send(UiCommand::Analyze(state.password.clone()));
                        }
                    }
                    (_, KeyCode::Tab) => {
                        state.focus = state.focus.next();
                    }
                    (_, KeyCode::Up) => state.adjust_length(1),
                    (_, KeyCode::Down) => state.adjust_length(-1),
                    (_, KeyCode::Backspace) => {
                        if state.focus == Focus::Password {
                            state.password.pop();
                        }
                    }
                    (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                        if state.focus == Focus::Password {
                            state.password.push(c);
                        }
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Copy a generated password slot to the clipboard.
/// The success notification is unconditional; the write itself is
/// fire-and-forget (see `clipboard.rs`).
fn copy_slot(state: &mut UiState, kind: GeneratorKind) {
    if let Some(password) = state.slot(kind).cloned() {
        let _ = clipboard::copy_to_clipboard(&password);
        state.notifier.success("Password copied to clipboard!");
    }
}

fn category_color(category: StrengthCategory) -> Color {
    match category {
        StrengthCategory::VeryWeak => Color::Red,
        StrengthCategory::Weak => Color::LightRed,
        StrengthCategory::Medium => Color::Yellow,
        StrengthCategory::Strong => Color::Green,
        StrengthCategory::VeryStrong => Color::Cyan,
        StrengthCategory::Unknown => Color::Gray,
    }
}

fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled("Password Security Suite", Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled(
            if state.is_busy() { "Working…" } else { "" },
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("password-suite-cli"),
    );
    f.render_widget(title, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
        .split(chunks[1]);

    draw_checker(columns[0], f, state);
    draw_generators(columns[1], f, state);
    draw_status(chunks[2], f, state);
}

/// Strength checker card: masked input, strength line, breach banner, and
/// the two requirement lists.
fn draw_checker(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let masked = "*".repeat(state.password.chars().count());
    let input = Paragraph::new(masked).block(focus_block(
        "Enter Password (Enter: check, Ctrl+R: reset)",
        state.focus == Focus::Password,
    ));
    f.render_widget(input, rows[0]);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(view) = state.view.as_ref() {
        lines.push(Line::from(vec![
            Span::styled("Strength: ", Style::default().fg(Color::Gray)),
            Span::styled(
                view.strength_line.clone(),
                Style::default().fg(category_color(view.category)),
            ),
        ]));
        lines.push(Line::from(""));

        let banner_color = if view.banner.leaked {
            Color::Red
        } else {
            Color::Green
        };
        lines.push(Line::from(Span::styled(
            view.banner.headline,
            Style::default().fg(banner_color),
        )));
        if let Some(exposures) = view.banner.exposures.as_deref() {
            lines.push(Line::from(exposures.to_string()));
        }
        if view.banner.offer_regenerate {
            lines.push(Line::from(Span::styled(
                "Press Ctrl+G to generate a new secure password",
                Style::default().fg(Color::Yellow),
            )));
        }

        // Empty lists render no section at all.
        if !view.requirements_met.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Requirements met:",
                Style::default().fg(Color::Green),
            )));
            for req in &view.requirements_met {
                lines.push(Line::from(format!("  ✓ {req}")));
            }
        }
        if !view.requirements_failed.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Requirements not met:",
                Style::default().fg(Color::Red),
            )));
            for req in &view.requirements_failed {
                lines.push(Line::from(format!("  ✗ {req}")));
            }
        }
    } else {
        lines.push(Line::from(
            "Type a password and press Enter to analyze its strength.",
        ));
    }

    let results = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Strength Checker"),
    );
    f.render_widget(results, rows[1]);
}

/// Generator cards: one slot per generator, never interacting.
fn draw_generators(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let standard_lines = generator_lines(
        state.standard_length,
        state.standard_password.as_deref(),
        "Ctrl+G generate | Ctrl+Y copy",
    );
    let standard = Paragraph::new(standard_lines).block(focus_block(
        "Password Generator",
        state.focus == Focus::StandardLength,
    ));
    f.render_widget(standard, rows[0]);

    let quantum_lines = generator_lines(
        state.quantum_length,
        state.quantum_password.as_deref(),
        "Ctrl+Q generate | Ctrl+U copy",
    );
    let quantum = Paragraph::new(quantum_lines).block(focus_block(
        "Quantum-Secure Generator",
        state.focus == Focus::QuantumLength,
    ));
    f.render_widget(quantum, rows[1]);
}

fn generator_lines<'a>(length: u32, slot: Option<&'a str>, keys: &'a str) -> Vec<Line<'a>> {
    vec![
        Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Gray)),
            Span::raw(length.to_string()),
            Span::raw("  (Up/Down to adjust when focused)"),
        ]),
        Line::from(vec![
            Span::styled("Password: ", Style::default().fg(Color::Gray)),
            Span::raw(slot.unwrap_or("-")),
        ]),
        Line::from(""),
        Line::from(Span::styled(keys, Style::default().fg(Color::Magenta))),
    ]
}

/// Bottom line: the one visible notification, or the keybind reference.
fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let widget = match state.notifier.visible() {
        Some(notification) => {
            let color = match notification.severity {
                Severity::Success => Color::Green,
                Severity::Error => Color::Red,
            };
            Paragraph::new(Line::from(Span::styled(
                notification.message.clone(),
                Style::default().fg(color),
            )))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Notification (Ctrl+D to dismiss)"),
            )
        }
        None => Paragraph::new(
            "Tab switch field | Enter check | Ctrl+G/Ctrl+Q generate | Ctrl+Y/Ctrl+U copy | Esc quit",
        )
        .block(Block::default().borders(Borders::ALL).title("Keys")),
    };
    f.render_widget(widget, area);
}
