//! routegen - typed route tree generator for Vike pages.

#![allow(dead_code)]

mod cli;
mod compiler;
mod config;
mod discover;
mod emit;
mod logger;
mod route;
mod utils;
mod watch;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::RoutegenConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = RoutegenConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { strict } => cli::build::build_routes(&config, *strict),
        Commands::Watch => cli::watch::watch_routes(&config),
        Commands::Routes { json } => cli::routes::list_routes(&config, *json),
    }
}
