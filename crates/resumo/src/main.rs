//! Command-line entry point.
//!
//! ```sh
//! # Uses ./config.json
//! resumo
//!
//! # Explicit config and model, with debug logging
//! resumo --config projeto.json --model gemini-1.5-pro -vv
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use resumo::{Config, GeminiClient};

/// Summarize a text file into a formatted .docx using Gemini.
#[derive(Parser)]
#[command(name = "resumo", version)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Override the model named in the configuration.
    #[arg(long)]
    model: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = resumo::logging::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {e}");
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> resumo::Result<()> {
    let mut config = Config::load(&cli.config)?;
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }

    let client = GeminiClient::from_config(&config)?;
    let report = resumo::run(&config, &client).await?;

    println!("Summary saved to {}", report.output_path.display());
    println!();
    println!("{}", report.summary);
    Ok(())
}
