use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agentry::agents::AgentRole;
use agentry::llm::create_client;
use agentry::orchestration::{Mode, Orchestrator, OrchestratorRequest};
use agentry::Config;

#[derive(Parser)]
#[command(name = "agentry")]
#[command(author, version, about = "Agentry - multi-agent orchestration CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run agents against an input under an execution mode
    Run {
        /// The input text for the agents
        input: String,

        /// Execution mode (single, parallel, pipeline, auto)
        #[arg(short, long, default_value = "auto")]
        mode: String,

        /// Agent role to invoke; repeat for parallel mode
        #[arg(short, long = "role")]
        roles: Vec<String>,

        /// Pipeline name, for pipeline mode
        #[arg(short, long)]
        pipeline: Option<String>,

        /// Print the full response as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List the configured agents
    Agents,

    /// List the available pipelines
    Pipelines,

    /// Write a starter configuration file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "agentry=debug"
    } else {
        "agentry=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run {
            input,
            mode,
            roles,
            pipeline,
            json,
        } => run(input, mode, roles, pipeline, json).await,
        Commands::Agents => list_agents(),
        Commands::Pipelines => list_pipelines(),
        Commands::Init => init_config(),
    }
}

async fn run(
    input: String,
    mode: String,
    roles: Vec<String>,
    pipeline: Option<String>,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let client = create_client(&config).map_err(report)?;
    let orchestrator = Orchestrator::from_config(&config, client).map_err(report)?;

    let request = OrchestratorRequest {
        mode: mode.parse::<Mode>().map_err(report)?,
        input,
        roles: roles
            .iter()
            .map(|r| r.parse::<AgentRole>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(report)?,
        pipeline,
    };

    let response = orchestrator.run(&request).await.map_err(report)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("mode: {}\n", response.mode.to_string().cyan());
    for result in &response.results {
        println!(
            "{} {}",
            format!("[{}]", result.role).green().bold(),
            format!(
                "({}, in: {}, out: {})",
                result.model, result.usage.input_tokens, result.usage.output_tokens
            )
            .dimmed()
        );
        println!("{}\n", result.content);
    }

    if let Some(pipeline) = &response.pipeline {
        println!(
            "{} {} steps, final output above from step {}",
            "pipeline:".cyan(),
            pipeline.steps.len(),
            pipeline.steps.len()
        );
    }

    Ok(())
}

fn list_agents() -> Result<()> {
    let config = Config::load()?;
    let registry = agentry::AgentRegistry::from_config(&config).map_err(report)?;

    for meta in registry.public_meta() {
        println!(
            "{:<18} {:<18} {}",
            meta.role.to_string().green(),
            meta.name,
            meta.model.dimmed()
        );
    }
    Ok(())
}

fn list_pipelines() -> Result<()> {
    let catalog = agentry::orchestration::PipelineCatalog::builtin();

    for meta in catalog.list() {
        println!("{:<18} {}", meta.name.green(), meta.description);
    }
    Ok(())
}

fn init_config() -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() {
        println!("config already exists at {}", path.display());
        return Ok(());
    }

    let written = Config::starter().save()?;
    println!("wrote starter config to {}", written.display());
    println!("set ANTHROPIC_API_KEY and run: agentry run \"your request\"");
    Ok(())
}

/// Convert an orchestrator error for `?`, prefixing its stable kind tag
///
/// Formats exactly once; `main`'s `Result` return prints it.
fn report(err: agentry::OrchestratorError) -> anyhow::Error {
    anyhow::anyhow!("{} {}", format!("[{}]", err.kind()).red().bold(), err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_formats_kind_tag_and_message_once() {
        let err = agentry::OrchestratorError::NotFound("deploy-chain".to_string());
        let formatted = report(err).to_string();

        assert!(formatted.contains("not_found"));
        assert_eq!(formatted.matches("deploy-chain").count(), 1);
    }
}
