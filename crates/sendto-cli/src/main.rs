//! sendto command line
//!
//! Resolves a payment destination (raw public key, `.sol` name or other
//! TLD domain) into a public key and, when one exists, the token account
//! stored at that key.

mod output;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use output::{ClassifyReport, FailureReport, ResolveReport, WatchReport};
use sendto_core::classify;
use sendto_resolver::{
    ControllerPhase, DestinationController, DestinationPipeline, DestinationUpdate, ResolverConfig,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "sendto")]
#[command(about = "Resolve payment destinations", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RPC endpoint, overrides config file and environment
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Log as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one destination and exit
    ///
    /// Domains under other TLDs resolve only from `tld_overrides` in the
    /// config file; there is no live TLD registry lookup.
    Resolve {
        /// Public key, name.sol or name.tld
        input: String,
    },

    /// Treat each stdin line as the latest destination input
    Watch {
        /// Quiet period before resolving, overrides config
        #[arg(short, long)]
        quiet_period_ms: Option<u64>,
    },

    /// Print the resolver strategy for an input
    Classify {
        /// Public key, name.sol or name.tld
        input: String,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json);

    match &cli.command {
        Commands::Resolve { input } => {
            let config = load_config(&cli)?;
            run_resolve(&config, input).await?;
        }
        Commands::Watch { quiet_period_ms } => {
            let mut config = load_config(&cli)?;
            if let Some(ms) = quiet_period_ms {
                config.quiet_period_ms = *ms;
            }
            run_watch(&config).await?;
        }
        Commands::Classify { input } => {
            let report = ClassifyReport::new(input, &classify(input));
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = load_config(&cli)?;
                println!("{}", config.to_json()?);
            }
            ConfigAction::Init { force } => {
                run_config_init(cli.config.clone(), *force)?;
            }
        },
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout carries reports
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(cli: &Cli) -> Result<ResolverConfig> {
    let mut config =
        ResolverConfig::load_or_default(cli.config.as_deref()).context("Failed to load config")?;

    if let Some(url) = &cli.rpc_url {
        config.network.rpc_url = Some(url.clone());
        config.validate().context("Invalid --rpc-url")?;
    }

    debug!("RPC endpoint: {}", config.network.rpc_url());
    Ok(config)
}

async fn run_resolve(config: &ResolverConfig, input: &str) -> Result<()> {
    let pipeline = DestinationPipeline::from_config(config)?;

    let result = pipeline.resolve(input).await;
    if result.public_key.is_none() {
        info!("No destination found for {}", input);
    }

    let failures = FailureReport::from_recorded(&pipeline.log().failures());
    let report = ResolveReport::new(input, classify(input).kind(), result, failures);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

async fn run_watch(config: &ResolverConfig) -> Result<()> {
    let controller = DestinationController::from_config(config)?;
    let mut results = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("Watching stdin, quiet period {:?}", config.quiet_period());

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => controller.set_input(line),
                None => break,
            },
            changed = results.changed() => {
                if changed.is_err() {
                    break;
                }
                let update = results.borrow_and_update().clone();
                print_watch_line(update)?;
            }
        }
    }

    // let the last input settle before shutting down
    let drain =
        config.quiet_period() + 2 * config.network.request_timeout() + Duration::from_secs(1);
    if results.has_changed().unwrap_or(false) {
        let update = results.borrow_and_update().clone();
        print_watch_line(update)?;
    } else if matches!(
        controller.phase(),
        ControllerPhase::Scheduled | ControllerPhase::Resolving
    ) {
        match tokio::time::timeout(drain, results.changed()).await {
            Ok(Ok(())) => {
                let update = results.borrow_and_update().clone();
                print_watch_line(update)?;
            }
            Ok(Err(_)) => {}
            Err(_) => warn!("Last input did not settle within {:?}", drain),
        }
    }

    controller.shutdown();
    Ok(())
}

fn print_watch_line(update: DestinationUpdate) -> Result<()> {
    println!("{}", serde_json::to_string(&WatchReport::from(update))?);
    Ok(())
}

fn run_config_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path.or_else(ResolverConfig::default_path) {
        Some(path) => path,
        None => bail!("No config directory available, pass --config"),
    };

    if path.exists() && !force {
        bail!("{} already exists, use --force to overwrite", path.display());
    }

    ResolverConfig::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}
