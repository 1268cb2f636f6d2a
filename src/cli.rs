use crate::model::{ClientConfig, GeneratorKind};
use crate::service::SuiteClient;
use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "password-suite-cli",
    version,
    about = "Password strength/breach analysis and generation client with optional TUI"
)]
pub struct Cli {
    /// Base URL for the password analysis/generation service
    #[arg(long, default_value = "http://localhost:5000")]
    pub base_url: String,

    /// Analyze the given password once and exit (no TUI)
    #[arg(long, value_name = "PASSWORD")]
    pub check: Option<String>,

    /// Print the raw analysis report as JSON (requires --check)
    #[arg(long)]
    pub json: bool,

    /// Generate a password once and exit (no TUI)
    #[arg(long)]
    pub generate: bool,

    /// Generate a quantum-secure password once and exit (no TUI)
    #[arg(long)]
    pub generate_quantum: bool,

    /// Length for generated passwords
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(16..=100))]
    pub length: u32,

    /// Length for quantum-secure generated passwords
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u32).range(24..=100))]
    pub quantum_length: u32,

    /// Per-request deadline
    #[arg(long, default_value = "10s")]
    pub request_timeout: humantime::Duration,
}

/// Build a `ClientConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> ClientConfig {
    ClientConfig {
        base_url: args.base_url.clone(),
        request_timeout: Duration::from(args.request_timeout),
        user_agent: format!("password-suite-cli/{}", env!("CARGO_PKG_VERSION")),
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.json && args.check.is_none() {
        return Err(anyhow::anyhow!(
            "--json can only be used with --check. Use --check --json together."
        ));
    }

    if let Some(password) = args.check.clone() {
        if password.is_empty() {
            return Err(anyhow::anyhow!("--check requires a non-empty password"));
        }
        return run_check(&args, &password).await;
    }
    if args.generate {
        return run_generate(&args, GeneratorKind::Standard).await;
    }
    if args.generate_quantum {
        return run_generate(&args, GeneratorKind::Quantum).await;
    }

    #[cfg(feature = "tui")]
    {
        crate::tui::run(args).await
    }
    #[cfg(not(feature = "tui"))]
    {
        // Fallback when built without TUI support.
        Err(anyhow::anyhow!(
            "built without TUI support; use --check, --generate, or --generate-quantum"
        ))
    }
}

/// One-shot analysis: print a text summary, or the raw report with --json.
async fn run_check(args: &Cli, password: &str) -> Result<()> {
    let client = SuiteClient::new(&build_config(args))?;
    let report = client
        .check_password(password)
        .await
        .context("password check failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in crate::text_summary::build_text_summary(&report).lines {
            println!("{line}");
        }
    }
    Ok(())
}

/// One-shot generation: print the new password to stdout.
async fn run_generate(args: &Cli, kind: GeneratorKind) -> Result<()> {
    let client = SuiteClient::new(&build_config(args))?;
    let length = match kind {
        GeneratorKind::Standard => args.length,
        GeneratorKind::Quantum => args.quantum_length,
    };
    let password = client
        .generate_password(kind, length)
        .await
        .with_context(|| format!("failed to generate {}", kind.label()))?;
    println!("{password}");
    Ok(())
}
