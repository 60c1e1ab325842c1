//! Lazy Algebra CLI - run the bundled scenarios and parser expressions
//!
//! Provides subcommands for listing and running scenarios, parsing input with
//! the two-digit parser expression, and writing a default configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};
use lazy_algebra::config::DemoConfig;
use lazy_algebra::demo;
use lazy_algebra::interpreter::evaluate;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lazy-algebra")]
#[command(about = "Deferred algebraic expressions with a lazy interpreter", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available scenarios
    List,

    /// Run scenarios
    Run {
        /// Only run the named scenario (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Input for the parser scenarios
        #[arg(long)]
        input: Option<String>,
    },

    /// Parse text with the two-digit parser expression
    Parse {
        /// Text to parse
        text: String,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    match cli.command {
        Commands::List => {
            for scenario in demo::scenarios() {
                println!("{:<20} {}", scenario.name, scenario.description);
            }
        }

        Commands::Run { only, input } => {
            if !only.is_empty() {
                config.scenarios = only;
            }
            if let Some(input) = input {
                config.parser_input = input;
            }

            let reports = demo::run(&config);
            let failed = reports.iter().filter(|report| !report.passed).count();
            for report in &reports {
                let status = if report.passed { "ok  " } else { "FAIL" };
                println!("{} {:<20} {}", status, report.name, report.rendered);
            }
            println!("{} passed, {} failed", reports.len() - failed, failed);

            if failed > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Parse { text } => {
            let parser = evaluate(demo::two_digits())?;
            println!("{}", demo::render_parses(&parser.run(&text)?));
        }

        Commands::InitConfig { path } => {
            DemoConfig::default().save(&path)?;
            println!("Wrote default configuration to {:?}", path);
        }
    }

    Ok(ExitCode::SUCCESS)
}
