//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DiscoveryStrategy, Framework};

/// Typed route tree generator for Vike pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: routegen.toml)
    #[arg(short = 'C', long, global = true, default_value = "routegen.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Pages directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub pages: Option<PathBuf>,

    /// Generated file path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Route discovery strategy
    #[arg(short, long, global = true)]
    pub strategy: Option<DiscoveryStrategy>,

    /// Page registry file for the registry strategy
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub registry: Option<PathBuf>,

    /// Framework whose `usePageContext` the params helper imports
    #[arg(short, long, global = true)]
    pub framework: Option<Framework>,

    /// Do not generate the `useParams` helper
    #[arg(long, global = true)]
    pub no_params_helper: bool,

    /// Print debug output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the route tree once
    #[command(visible_alias = "b")]
    Build {
        /// Exit with an error if the route tree could not be generated
        #[arg(long)]
        strict: bool,
    },

    /// Generate the route tree and regenerate it on page changes
    #[command(visible_alias = "w")]
    Watch,

    /// Print the discovered routes
    #[command(visible_alias = "r")]
    Routes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
