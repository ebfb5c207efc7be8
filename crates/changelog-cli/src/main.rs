use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "changelog-cli", version, about = "Changelog console CLI")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimated timeline with recency buckets and summary totals
    Timeline(commands::timeline::TimelineArgs),
    /// Explain how one record's estimate was derived
    Explain(commands::explain::ExplainArgs),
    /// Classify commit messages into change records
    Import(commands::import::ImportArgs),
    /// Format a number of minutes for display
    Format {
        /// Minutes to format
        minutes: u64,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Timeline(args) => commands::timeline::run(args),
        Commands::Explain(args) => commands::explain::run(args),
        Commands::Import(args) => commands::import::run(args),
        Commands::Format { minutes } => {
            println!("{}", changelog_core::format_minutes(minutes));
            Ok(())
        }
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
