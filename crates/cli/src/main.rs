// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pipec - CI pipeline configuration compiler

mod commands;
mod completions;
mod config;
mod error;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{compile, lint, stages};
use completions::{generate_completions, CompletionsArgs};
use config::ProjectConfig;
use error::CliError;
use std::path::Path;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "pipec",
    version,
    about = "pipec - lint and compile CI pipeline documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pipeline document
    Lint(lint::LintArgs),
    /// Compile the builds of a pipeline for a ref
    Compile(compile::CompileArgs),
    /// List the resolved stages
    Stages(stages::StagesArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(cli_err) => eprint!("{}", cli_err),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Completions need no project
    if let Commands::Completions(args) = cli.command {
        generate_completions::<Cli>(args.shell);
        return Ok(());
    }

    let config = ProjectConfig::load(Path::new("."))?;

    match cli.command {
        Commands::Lint(args) => lint::handle(args, &config),
        Commands::Compile(args) => compile::handle(args, &config),
        Commands::Stages(args) => stages::handle(args, &config),
        Commands::Completions(_) => Ok(()),
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
