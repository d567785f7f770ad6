mod cli;
mod color;
mod commands;
mod config;
mod domain;
mod integrations;
mod service;

use clap::{CommandFactory, Parser};
use clap_complete::env::CompleteEnv;
use std::process::ExitCode;

// Use shared CLI definitions from cli module
use cli::{Cli, Commands};

fn main() -> ExitCode {
    // Handle dynamic completion via COMPLETE environment variable
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();

    // Resolve color mode from CLI flag and environment variables
    let color_mode = color::ColorMode::resolve(cli.color);

    let result = match cli.command {
        Commands::Apply { issue } => commands::apply::cmd_apply(issue, color_mode),
        Commands::Completion { shell } => commands::completion::cmd_completion(&shell).map(|()| 0),
    };

    match result {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            eprintln!("{}", color::error(color_mode, format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}
