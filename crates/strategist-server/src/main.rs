use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strategist_aggregation::AggregationConfig;
use strategist_core::{AggregationOutcome, Language};
use strategist_server::{
    run_plan, serve, ApiKey, ConsoleRenderer, PlanOptions, PlanProfile, ServerConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "strategist", version, about = "Marketing strategy generator")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the part-generation endpoint
    Serve {
        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Listen address, overriding the configuration
        #[arg(long)]
        bind: Option<String>,
    },

    /// Walk the wizard with a profile file and print the report as it arrives
    Plan {
        /// TOML file with the wizard answers
        #[arg(long)]
        profile: PathBuf,

        /// Report language (en, ar)
        #[arg(long, default_value = "en")]
        language: Language,

        /// Part-generation endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Per-part timeout in seconds; 0 waits forever
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Directory for the exported document
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Serve { config, bind } => {
            let mut config =
                ServerConfig::load(config.as_deref()).context("loading configuration")?;
            if let Some(bind) = bind {
                config = config.with_bind_addr(bind);
            }
            serve(&config, ApiKey::from_env()).await?;
        }
        Command::Plan {
            profile,
            language,
            endpoint,
            timeout_secs,
            out_dir,
        } => {
            let profile = PlanProfile::load(&profile)?;
            let mut aggregation = AggregationConfig::new();
            if let Some(endpoint) = endpoint {
                aggregation = aggregation.with_endpoint(endpoint);
            }
            if let Some(secs) = timeout_secs {
                aggregation = aggregation.with_part_timeout_secs(secs);
            }
            let options = PlanOptions {
                language,
                aggregation,
                out_dir,
            };

            let summary = run_plan(&profile, &options, Box::<ConsoleRenderer>::default()).await?;
            println!(
                "{} points, title \"{}\", {} parts arrived",
                summary.points,
                summary.title,
                summary.arrived.len()
            );
            if let Some(path) = &summary.document {
                println!("Document written to {}", path.display());
            }
            if matches!(summary.outcome, AggregationOutcome::AllFailed(_)) {
                anyhow::bail!("no part of the report could be generated");
            }
        }
    }

    Ok(())
}
