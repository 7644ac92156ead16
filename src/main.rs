//! Coordinator CLI
//!
//! Loads the coordinator configuration and runs one operation against it,
//! printing the result as JSON.

#![allow(missing_docs)]

use clap::{Args, Parser, Subcommand};
use mcp_coordinator::utils::logging::init_tracing;
use mcp_coordinator::{
    ClassifiedRequest, Config, Coordinator, CoordinatorBuilder, PrivacyLevel, QualityLevel,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

/// Exit code for configuration problems
const EXIT_CONFIG: u8 = 1;
/// Exit code for a request that failed after escalation
const EXIT_REQUEST: u8 = 2;

#[derive(Parser)]
#[command(name = "coordinator")]
#[command(version, about = "Capability-based request router and sub-component coordinator", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "COORDINATOR_CONFIG",
        default_value = "config/coordinator.yaml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which adapter a request would be routed to
    Route(RequestArgs),

    /// Route a request and execute it with retries and fallback
    Dispatch(RequestArgs),

    /// Print coordinator metrics
    Status,

    /// Probe every sub-component
    Health,

    /// List registered adapters
    Adapters,
}

#[derive(Args)]
struct RequestArgs {
    /// Request content
    content: String,

    /// Task type
    #[arg(short, long, default_value = "")]
    task_type: String,

    /// Quality level (low, medium, high, ultra_high)
    #[arg(short, long, default_value = "medium")]
    quality: QualityLevel,

    /// Privacy level (low, normal, high)
    #[arg(short, long, default_value = "normal")]
    privacy: PrivacyLevel,

    /// Context entries as key=value
    #[arg(long = "context", value_parser = parse_key_val)]
    context: Vec<(String, String)>,

    /// Only consider adapters with this capability
    #[arg(long)]
    capability: Option<String>,
}

impl RequestArgs {
    fn into_request(self) -> ClassifiedRequest {
        let mut request = ClassifiedRequest::new(self.task_type, self.content)
            .with_quality(self.quality)
            .with_privacy(self.privacy);
        for (key, value) in self.context {
            request = request.with_context(key, value);
        }
        if let Some(capability) = self.capability {
            request = request.with_capability(capability);
        }
        request
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{}`", s))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    init_tracing(&config.logging);

    let coordinator = match CoordinatorBuilder::from_config(config).build() {
        Ok(coordinator) => coordinator,
        Err(e) => {
            error!("Failed to build coordinator: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    run(cli.command, coordinator).await
}

async fn load_config(path: &Path) -> mcp_coordinator::Result<Config> {
    let mut config = Config::from_file(path).await?;
    config.apply_env_overrides()?;
    Ok(config)
}

async fn run(command: Commands, coordinator: Arc<Coordinator>) -> ExitCode {
    match command {
        Commands::Route(args) => match coordinator.route(&args.into_request()) {
            Ok(decision) => print_json(&decision),
            Err(e) => report(e),
        },
        Commands::Dispatch(args) => {
            coordinator.start().await;
            let result = coordinator.dispatch(&args.into_request()).await;
            coordinator.shutdown().await;
            match result {
                Ok(outcome) => print_json(&outcome),
                Err(e) => report(e),
            }
        }
        Commands::Status => {
            coordinator.start().await;
            coordinator.health_check().await;
            let metrics = coordinator.get_system_status();
            coordinator.shutdown().await;
            print_json(&metrics)
        }
        Commands::Health => {
            coordinator.start().await;
            let report = coordinator.health_check().await;
            coordinator.shutdown().await;
            print_json(&report)
        }
        Commands::Adapters => print_json(&coordinator.list_adapters()),
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report(error: mcp_coordinator::CoordinatorError) -> ExitCode {
    let body = serde_json::json!({
        "error": error.kind(),
        "message": error.to_string(),
        "chain": match &error {
            mcp_coordinator::CoordinatorError::EscalationExhausted { chain, .. } => {
                serde_json::to_value(chain).unwrap_or_default()
            }
            _ => serde_json::Value::Null,
        },
    });
    println!("{}", body);

    if error.is_fatal() {
        ExitCode::from(EXIT_CONFIG)
    } else {
        ExitCode::from(EXIT_REQUEST)
    }
}
