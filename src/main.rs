//! Snippets CLI - store and retrieve snippets of text

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use snippets::config::{self, Settings};
use snippets::{OutputMode, SnippetStore, commands, logging, ui};

#[derive(Parser)]
#[command(name = "snippets")]
#[command(version)]
#[command(about = "Store and retrieve snippets of text")]
#[command(arg_required_else_help = true)]
#[command(long_about = r#"
Store and retrieve snippets of text.

Example usage:
  snippets put greeting "hello world"
  snippets get greeting
  snippets catalog
  snippets search hello
"#)]
struct Cli {
    /// Path to the database file (default: snippets.db)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the log file (default: snippets.log)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Mirror the log trace to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a snippet
    Put {
        /// Name of the snippet
        name: String,

        /// Snippet text
        snippet: String,
    },

    /// Retrieve a snippet
    Get {
        /// Name of the snippet
        name: String,
    },

    /// List the names of all stored snippets
    Catalog,

    /// Search snippets for a string
    Search {
        /// The string you are searching for
        string: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ui::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> anyhow::Result<()> {
    let file_config = config::load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(cli.database.clone(), cli.log_file.clone(), file_config);

    logging::init(&settings.log_file, cli.verbose)?;
    tracing::debug!("Using database {}", settings.database.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch(cli, &settings, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Open the store and run one subcommand against it
fn dispatch(cli: Cli, settings: &Settings, out: &mut dyn Write) -> anyhow::Result<()> {
    let store = SnippetStore::open(&settings.database)?;
    let output_mode = OutputMode::from_json_flag(cli.json);

    match cli.command {
        Commands::Put { name, snippet } => {
            commands::run_put(&store, output_mode, out, &name, &snippet)?;
        }
        Commands::Get { name } => {
            commands::run_get(&store, output_mode, out, &name)?;
        }
        Commands::Catalog => {
            commands::run_catalog(&store, output_mode, out)?;
        }
        Commands::Search { string } => {
            commands::run_search(&store, output_mode, out, &string)?;
        }
    }
    Ok(())
}
