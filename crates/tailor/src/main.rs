//! Tailor CLI - inspect and render styled component libraries.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tailor_core::Value;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "tailor")]
#[command(about = "Inspect and render styled component libraries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to tailor.toml config file
    #[arg(short, long, default_value = "tailor.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every component in the library
    List,

    /// Print a component's folded configuration as JSON
    Inspect {
        /// Component name (case-insensitive)
        name: String,
    },

    /// Render a component to static HTML
    Render {
        /// Component name (case-insensitive)
        name: String,

        /// Prop to pass, as key=value (repeatable)
        #[arg(short = 'p', long = "prop", value_parser = commands::render::parse_prop)]
        props: Vec<(String, Value)>,

        /// Render as a different tag
        #[arg(long = "as")]
        as_tag: Option<String>,

        /// Text content
        #[arg(short, long)]
        text: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config(&cli.config)?;

    match cli.command {
        Commands::List => {
            commands::list::run(&config)?;
        }
        Commands::Inspect { name } => {
            commands::inspect::run(&config, &name)?;
        }
        Commands::Render {
            name,
            props,
            as_tag,
            text,
        } => {
            commands::render::run(&config, &name, props, as_tag, text)?;
        }
    }

    Ok(())
}
