//! Command-line interface parsing and handling
//!
//! This module parses arguments, builds the conversation engine from config
//! and environment, and dispatches to the chat loop or a utility subcommand.

pub mod chat;
pub mod inspect;

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cli::chat::{run_chat_loop, BANNER, USAGE_HINT};
use crate::cli::inspect::run_inspect;
use crate::core::config::data::path_display;
use crate::core::config::Config;
use crate::core::conversation::{ConversationEngine, EngineSettings};
use crate::core::credentials::{resolve_api_key, BASE_URL_ENV};
use crate::utils::logging::LoggingState;
use crate::utils::url::resolve_base_url;

/// Environment variable holding the tracing filter (e.g. `debug`).
pub const LOG_FILTER_ENV: &str = "DATACHAT_LOG";

#[derive(Parser)]
#[command(name = "datachat", version)]
#[command(about = "Ask questions about a CSV, spreadsheet or JSON dataset from the terminal")]
#[command(
    long_about = "datachat loads a dataset and answers natural-language questions about it \
using an OpenAI-compatible chat API. The assistant is told the dataset's shape and column \
names; the conversation so far is sent along with every question.\n\n\
Environment Variables (a .env file in the working directory is read too):\n\
  OPENAI_API_KEY    Your OpenAI API key (required for chat)\n\
  OPENAI_BASE_URL   Custom API base URL (optional, defaults to https://api.openai.com/v1)\n\
  DATACHAT_LOG      Diagnostic log filter written to stderr (e.g. debug)\n\n\
Commands at the prompt:\n\
  load <path>       Load a .csv, .xlsx, .xls, .json or .txt file\n\
  exit              Quit\n\
  anything else     Ask a question about the loaded data"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use for chat
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Dataset to load before the first prompt
    #[arg(short = 'd', long = "data", global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Append the conversation to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Turns of history sent for context (0 for no limit)
    #[arg(long, global = true, value_name = "N")]
    pub max_turns: Option<usize>,

    /// API key to use instead of OPENAI_API_KEY
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Load a dataset and print its shape and column types
    Inspect {
        /// File to inspect
        path: PathBuf,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Print the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_main(args))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

async fn async_main(mut args: Args) -> Result<(), Box<dyn Error>> {
    match args.command.take().unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(args).await,
        Commands::Inspect { path } => run_inspect(&path),
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            if value.is_empty() {
                config.print_all();
                return Ok(());
            }
            match config.set_value(&key, &value.join(" ")) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                    Ok(())
                }
                Err(e) => {
                    eprintln!("❌ {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match config.unset_value(&key) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                    Ok(())
                }
                Err(e) => {
                    eprintln!("❌ {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Config => {
            let config = Config::load()?;
            config.print_all();
            if let Ok(path) = Config::get_config_path() {
                println!("\nConfig file: {}", path_display(&path));
            }
            Ok(())
        }
    }
}

/// Engine settings from config, with command-line overrides applied.
fn chat_settings(config: &Config, args: &Args) -> EngineSettings {
    let mut settings = config.engine_settings();
    if let Some(model) = &args.model {
        settings.model = model.clone();
    }
    if let Some(turns) = args.max_turns {
        settings.max_turns = (turns > 0).then_some(turns);
    }
    settings
}

async fn run_chat(args: Args) -> Result<(), Box<dyn Error>> {
    println!("{BANNER}");
    println!("{USAGE_HINT}");

    let config = Config::load()?;
    let settings = chat_settings(&config, &args);

    // The environment is only consulted here; the engine takes explicit values.
    let api_key = match resolve_api_key(args.api_key.as_deref(), |name| std::env::var(name).ok()) {
        Ok(key) => key,
        Err(err) => {
            eprintln!("❌ {err}");
            eprintln!();
            eprintln!("💡 Quick fixes:");
            for fix in err.quick_fixes() {
                eprintln!("  • {fix}");
            }
            std::process::exit(err.exit_code());
        }
    };
    let env_base_url = std::env::var(BASE_URL_ENV).ok();
    let base_url = resolve_base_url([env_base_url.as_deref(), config.base_url.as_deref()]);

    let mut engine = ConversationEngine::connect(
        settings,
        Some(api_key),
        &base_url,
        config.request_timeout(),
    )?;
    println!("Chatbot initialized successfully!");

    let logging = LoggingState::new(args.log)?;
    logging.log_session_start(&engine.settings().model)?;

    if let Some(path) = args.data {
        let message = engine.load_dataset(&path);
        logging.log_note(&message)?;
        println!("Chatbot: {message}");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_chat_loop(&mut engine, &logging, stdin.lock(), &mut stdout).await?;
    Ok(())
}
