use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use ml_showcase::models::Model;

const EXIT_SUCCESS: i32 = 0;
const EXIT_SERVER: i32 = 2;
const EXIT_INPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default if no subcommand)
    Serve {
        /// Override the configured bind address
        #[arg(long)]
        host: Option<String>,
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Score a single JSON request body
    Score {
        /// Demo to run
        #[arg(value_enum)]
        model: Model,
        /// File holding the JSON request body (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Print the raw HTTP response body instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// List the available demos
    Algorithms,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "ml-showcase")]
#[command(about = "Machine learning demo scorers over HTTP", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/ml-showcase/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn read_body(input: Option<PathBuf>) -> anyhow::Result<String> {
    use anyhow::Context;
    match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read stdin")?;
            Ok(body)
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    });
    let config_path = cli.config.map(PathBuf::from);

    // Init runs before loading so a broken config can be replaced
    if let Commands::Init { force } = command {
        match ml_showcase::config::write_default_config(config_path, force) {
            Ok(path) => {
                println!("Config written to {}", path.display());
                std::process::exit(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    let mut config = match ml_showcase::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Commands::Serve { host, port } = &command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }

    if let Err(errors) = ml_showcase::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if let Err(e) = ml_showcase::logging::init(&config.log_level, cli.verbose) {
        eprintln!("{:#}", e);
        std::process::exit(EXIT_CONFIG);
    }

    match command {
        Commands::Serve { .. } => {
            if let Err(e) = ml_showcase::server::serve(&config.server).await {
                tracing::error!("{:#}", e);
                std::process::exit(EXIT_SERVER);
            }
        }
        Commands::Score { model, input, json } => {
            let body = match read_body(input) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            tracing::debug!(model = %model, "scoring {} byte request", body.len());

            match ml_showcase::evaluate_json(model, &body) {
                Ok(prediction) if json => match serde_json::to_string_pretty(&prediction) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Failed to serialize result: {}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                },
                Ok(prediction) => {
                    let use_colors = ml_showcase::output::should_use_colors();
                    println!(
                        "{}",
                        ml_showcase::output::format_prediction(model, &prediction, use_colors)
                    );
                }
                Err(e) if e.is_validation() => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
                Err(e) => {
                    eprintln!("{}: {}", model.failure_context(), e);
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Commands::Algorithms => {
            let use_colors = ml_showcase::output::should_use_colors();
            println!("{}", ml_showcase::output::format_algorithm_table(use_colors));
        }
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
