use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::Value;
use tone_bridge::config::AppConfig;
use tone_bridge::engine::StubEngineFactory;
use tone_bridge::{AudioEngineHandle, Command, CommandKind, CommandRouter};

#[derive(Parser, Debug)]
#[command(
    name = "tone_cli",
    about = "Desktop harness for the tone bridge command router"
)]
struct Cli {
    /// Make the stub engine fail native initialization
    #[arg(long, global = true)]
    fail_init: bool,
    /// Log engine activity to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dispatch a single method call and print the JSON reply
    Dispatch {
        method: String,
        /// JSON object with the call arguments
        #[arg(long = "args")]
        arguments: Option<String>,
    },
    /// Dispatch a JSON array of {method, arguments} calls against one engine
    Script { path: PathBuf },
    /// List the method names the router understands
    Commands,
}

#[derive(Debug, Deserialize)]
struct ScriptStep {
    method: String,
    #[serde(default)]
    arguments: Value,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    if cli.verbose {
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .try_init();
    }

    let config = AppConfig::load_platform();
    let factory = if cli.fail_init {
        StubEngineFactory::new().failing_initialize()
    } else {
        StubEngineFactory::new()
    };
    let mut handle = AudioEngineHandle::new(Arc::new(factory), &config);

    match cli.command {
        Commands::Dispatch { method, arguments } => {
            run_dispatch(&mut handle, &config, method, arguments.as_deref())
        }
        Commands::Script { path } => run_script(&mut handle, &config, &path),
        Commands::Commands => run_list(),
    }
}

fn run_dispatch(
    handle: &mut AudioEngineHandle,
    config: &AppConfig,
    method: String,
    arguments: Option<&str>,
) -> Result<ExitCode> {
    let arguments = match arguments {
        Some(json) => serde_json::from_str(json).context("parsing --args JSON")?,
        None => Value::Null,
    };
    let command = Command::from_value(method, arguments);
    let result = CommandRouter::new(handle)
        .with_command_logging(config.bridge.log_commands)
        .dispatch(&command);

    println!("{}", serde_json::to_string(&result)?);
    Ok(ExitCode::from(0))
}

fn run_script(handle: &mut AudioEngineHandle, config: &AppConfig, path: &Path) -> Result<ExitCode> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let steps: Vec<ScriptStep> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing script {}", path.display()))?;

    let mut router = CommandRouter::new(handle).with_command_logging(config.bridge.log_commands);
    for step in steps {
        let command = Command::from_value(step.method, step.arguments);
        let result = router.dispatch(&command);
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(ExitCode::from(0))
}

fn run_list() -> Result<ExitCode> {
    for kind in CommandKind::ALL {
        println!("{}", kind.method_name());
    }
    Ok(ExitCode::from(0))
}
