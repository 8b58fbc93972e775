use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "focuspool", version, about = "Focuspool CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Session timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Task list management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Time pool reports
    Pool {
        #[command(subcommand)]
        action: commands::pool::PoolAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Character image management
    Character {
        #[command(subcommand)]
        action: commands::character::CharacterAction,
    },
    /// Persisted data maintenance
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Pool { action } => commands::pool::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Character { action } => commands::character::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Completions { shell } => commands::completions(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
