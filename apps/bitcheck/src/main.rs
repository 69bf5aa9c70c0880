//! bitcheck - Integrity verification for media collections
//!
//! This is the CLI application: it loads configuration, opens the library
//! and drives the verification engine, rendering events and results.

mod cli;
mod display;
mod error;
mod events;
mod logging;
mod setup;

use crate::cli::{CheckArgs, Cli, Commands};
use crate::display::{CommandOutput, OutputRenderer};
use crate::error::CliError;
use crate::events::EventHandler;
use crate::setup::SystemSetup;
use bitcheck_check::{list_validators, CheckOptions};
use bitcheck_config::Config;
use bitcheck_events::{AppEvent, EventEmitter, EventReceiver, EventSender, GeneralEvent};
use bitcheck_library::{ItemStore, Selector};
use bitcheck_types::OutputFormat;
use bitcheck_validate::{SearchPath, ToolRegistry};
use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::Path;
use std::process;
use tokio::select;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();

    init_tracing(cli.global.json, cli.global.debug, &Config::default().log_dir());

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Main application logic; returns the process exit status
async fn run(cli: Cli) -> Result<i32, CliError> {
    info!("Starting bitcheck v{}", env!("CARGO_PKG_VERSION"));

    // Defaults < file < environment < CLI flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli.global, &cli.command);

    let format = if cli.global.json {
        OutputFormat::Json
    } else {
        config.general.default_output
    };
    let quiet = matches!(&cli.command, Commands::Check(args) if args.quiet);
    let renderer = OutputRenderer::new(format, config.general.color, quiet);

    // Listing tools needs no library
    if let Commands::Check(CheckArgs {
        list_tools: true, ..
    }) = &cli.command
    {
        let registry = ToolRegistry::builtin()?;
        let output = CommandOutput::Tools(list_validators(&registry, &SearchPath::Env));
        renderer.render(&output)?;
        return Ok(output.exit_code());
    }

    let setup = SystemSetup::initialize(config).await?;

    let (event_sender, event_receiver) = bitcheck_events::channel();
    let mut event_handler =
        EventHandler::new(!quiet && format != OutputFormat::Json, !cli.global.json);

    let output = execute_command_with_events(
        cli.command,
        &setup,
        event_sender,
        event_receiver,
        &mut event_handler,
    )
    .await?;

    renderer.render(&output)?;

    info!("Command completed");
    Ok(output.exit_code())
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    setup: &SystemSetup,
    event_sender: EventSender,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<CommandOutput, CliError> {
    let mut command_future = Box::pin(execute_command(command, setup, event_sender));

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(
    command: Commands,
    setup: &SystemSetup,
    tx: EventSender,
) -> Result<CommandOutput, CliError> {
    match command {
        Commands::Check(args) => execute_check(args, setup, tx).await,

        Commands::Import { paths } => {
            let summary = bitcheck_library::import(setup.library(), &paths, &tx).await?;
            Ok(CommandOutput::Imported(summary))
        }

        Commands::Ls { query } => {
            let selector = Selector::parse(&query)?;
            let items = setup.library().items(&selector).await?;
            Ok(CommandOutput::Items(items))
        }
    }
}

async fn execute_check(
    args: CheckArgs,
    setup: &SystemSetup,
    tx: EventSender,
) -> Result<CommandOutput, CliError> {
    let selector = Selector::parse(&args.query)?;
    let orchestrator = setup.orchestrator(tx.clone());

    if args.export {
        let entries = orchestrator.export(&selector).await?;
        return Ok(CommandOutput::Export(entries));
    }

    let config = setup.config();
    let options = CheckOptions {
        mode: args.run_mode(),
        phases: args.phases(config.check.integrity),
        jobs: config.jobs(),
        ignore: config.check.ignore.clone(),
    };

    let report = orchestrator
        .run(&selector, &options, |prompt: &str| confirm_overwrite(&tx, prompt))
        .await?;
    Ok(CommandOutput::Report(report))
}

/// Ask on the terminal; anything but an explicit yes declines
fn confirm_overwrite(tx: &EventSender, prompt: &str) -> bool {
    tx.emit(AppEvent::General(GeneralEvent::UserConfirmationRequired {
        prompt: prompt.to_string(),
    }));

    let response = match Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
    {
        Ok(response) => response,
        Err(e) => {
            warn!("Failed to get user confirmation: {}", e);
            tx.emit_warning_with_context(
                "could not ask for confirmation; keeping stored checksums",
                e.to_string(),
            );
            false
        }
    };

    tx.emit(AppEvent::General(GeneralEvent::UserConfirmationReceived {
        response,
    }));
    response
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool, log_dir: &Path) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            if !json_mode {
                eprintln!("Warning: Failed to create log directory: {e}");
            }
        }

        let log_file = log_dir.join(format!(
            "bitcheck-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        if let Ok(file) = std::fs::File::create(&log_file) {
            tracing_subscriber::fmt()
                .json()
                .with_writer(file)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                        tracing_subscriber::EnvFilter::new("info,bitcheck=debug")
                    }),
                )
                .init();

            if !json_mode {
                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            return;
        }
    }

    if json_mode {
        // JSON mode: suppress all console output to avoid contaminating JSON
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: per-file lines already cover warnings, so only errors
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error,bitcheck=error")),
            )
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs, command: &Commands) {
    if let Some(color) = global.color {
        config.general.color = color;
    }

    if let Some(library) = &global.library {
        config.paths.library_path = Some(library.clone());
    }

    if let Commands::Check(CheckArgs {
        jobs: Some(jobs), ..
    }) = command
    {
        config.check.jobs = *jobs;
    }
}
