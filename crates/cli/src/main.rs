//! SkillSet CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: socket path, timeouts, and retry settings from
//!    flags, falling back to `SKILLSET_*` environment variables.
//! 2. **Wire observability**: `tracing-subscriber` (text or JSON on stderr)
//!    plus an optional OpenTelemetry OTLP exporter.
//! 3. **Run one operation**: `invoke`, `skills`, or `context`, and print the
//!    JSON result on stdout.

mod telemetry;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use skillset::{JsonObject, SkillSetError};
use skillset_client::{ClientConfig, SkillSetClient};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "skillset")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Invoke skills through the local SkillSet service socket", long_about = None)]
struct Cli {
    /// Path to the SkillSet service's Unix domain socket
    #[arg(long, env = "SKILLSET_SOCKET")]
    socket: PathBuf,

    /// Connect timeout in milliseconds
    #[arg(long, default_value_t = 5_000)]
    dial_timeout_ms: u64,

    /// Attempts per request (at least 1)
    #[arg(long, default_value_t = 3)]
    max_retries: u32,

    /// Pause after each failed attempt, in milliseconds
    #[arg(long, default_value_t = 100)]
    retry_delay_ms: u64,

    /// Limit on the request/response exchange in milliseconds (default: none)
    #[arg(long)]
    request_timeout_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json_logs: bool,

    /// Export spans to this OTLP gRPC endpoint
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    otlp_endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Invoke a skill and print its result
    Invoke {
        #[arg(long, env = "SKILLSET_SESSION_ID")]
        session_id: String,

        /// Defaults to a freshly generated UUID
        #[arg(long, env = "SKILLSET_INVOCATION_ID")]
        invocation_id: Option<String>,

        /// Name of the skill to run
        #[arg(long)]
        skill: String,

        /// Skill arguments as a JSON object
        #[arg(long, default_value = "{}", value_parser = parse_json_object)]
        args: JsonObject,
    },

    /// List the skills available to a session
    Skills {
        #[arg(long, env = "SKILLSET_SESSION_ID")]
        session_id: String,
    },

    /// Fetch a named context entry for an invocation
    Context {
        #[arg(long, env = "SKILLSET_SESSION_ID")]
        session_id: String,

        #[arg(long, env = "SKILLSET_INVOCATION_ID")]
        invocation_id: String,

        /// Context entry name
        #[arg(long)]
        name: String,
    },
}

fn parse_json_object(raw: &str) -> Result<JsonObject, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, got {other}")),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

fn client_config(cli: &Cli) -> Result<ClientConfig, SkillSetError> {
    let mut builder = ClientConfig::builder(&cli.socket)
        .dial_timeout(Duration::from_millis(cli.dial_timeout_ms))
        .max_retries(cli.max_retries)
        .retry_delay(Duration::from_millis(cli.retry_delay_ms));
    if let Some(ms) = cli.request_timeout_ms {
        builder = builder.request_timeout(Duration::from_millis(ms));
    }
    builder.build()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let telemetry = telemetry::init(cli.json_logs, level, cli.otlp_endpoint.as_deref())?;

    let result = run(cli).await;
    telemetry.shutdown();
    result
}

async fn run(cli: Cli) -> Result<()> {
    let client = SkillSetClient::with_config(
        client_config(&cli).context("invalid client configuration")?,
    );

    let output = match cli.command {
        Command::Invoke {
            session_id,
            invocation_id,
            skill,
            args,
        } => {
            let invocation_id =
                invocation_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            info!(%session_id, %invocation_id, %skill, "invoking skill");
            let result = client
                .invoke_skill(&session_id, &invocation_id, &skill, args)
                .await
                .with_context(|| format!("failed to invoke skill {skill}"))?;
            serde_json::to_value(&result)?
        }
        Command::Skills { session_id } => {
            let skills = client
                .get_skills(&session_id)
                .await
                .context("failed to list skills")?;
            Value::Array(skills)
        }
        Command::Context {
            session_id,
            invocation_id,
            name,
        } => client
            .get_context(&session_id, &invocation_id, &name)
            .await
            .with_context(|| format!("failed to get context {name}"))?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
