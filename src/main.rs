use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tokio::sync::broadcast;

use intentloop::config::Config;
use intentloop::demo::{DemoIntent, DemoState};
use intentloop::logging::init_tracing;
use intentloop::module::{present_screen, DemoModule};
use intentloop::registry::ModuleRegistry;
use intentloop::scheduler::TokioScheduler;
use intentloop::script::{parse_script, ScriptStep};

#[derive(Debug, Parser)]
#[command(name = "intentloop", version, about = "Drive the MVI demo store from a script of intents")]
struct Cli {
    /// Config file (default: ~/.config/intentloop/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dispatch a script of intents and print every state change
    Run {
        /// Script file, one intent per line (default: stdin)
        #[arg(long)]
        script: Option<PathBuf>,

        /// How long to wait for in-flight work after the last line
        #[arg(long, default_value_t = 2500)]
        settle_ms: u64,

        /// Print states as JSON instead of one-line summaries
        #[arg(long)]
        json: bool,

        /// Seed for simulated network failures
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the commands a script may use
    Intents,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Intents => {
            for (usage, help) in DemoIntent::COMMANDS {
                println!("{usage:<24} {help}");
            }
            println!("{:<24} pause the script", "wait <ms>");
            Ok(())
        }
        Command::Run {
            script,
            settle_ms,
            json,
            seed,
        } => {
            let mut config = load_config(cli.config)?;
            if seed.is_some() {
                config.simulation.seed = seed;
            }
            let source = read_script(script).await?;
            run(config, &source, Duration::from_millis(settle_ms), json).await
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Config::load().context("loading config"),
    }
}

async fn read_script(path: Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading script {}", path.display())),
        None => {
            let mut source = String::new();
            tokio::io::stdin()
                .read_to_string(&mut source)
                .await
                .context("reading script from stdin")?;
            Ok(source)
        }
    }
}

async fn run(config: Config, source: &str, settle: Duration, json: bool) -> Result<()> {
    let steps = parse_script(source)?;

    let registry = ModuleRegistry::global();
    DemoModule::register_services(registry, &config, Arc::new(TokioScheduler));
    let Some(store) = present_screen(registry, DemoModule::SCREEN_KEY) else {
        return Ok(());
    };

    print_state(&store.state(), json)?;
    let printer = tokio::spawn(print_changes(store.changes(), json));

    for step in steps {
        match step {
            ScriptStep::Dispatch(intent) => store.dispatch(intent),
            ScriptStep::Wait(delay) => tokio::time::sleep(delay).await,
        }
    }
    tokio::time::sleep(settle).await;

    printer.abort();
    println!("final:");
    print_state(&store.state(), json)
}

async fn print_changes(mut states: broadcast::Receiver<DemoState>, json: bool) {
    loop {
        match states.recv().await {
            Ok(state) => {
                if let Err(err) = print_state(&state, json) {
                    tracing::warn!("Failed to print state: {}", err);
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "State printer fell behind; states skipped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn print_state(state: &DemoState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(state)?);
    } else {
        println!("{}", state.summary());
    }
    Ok(())
}
