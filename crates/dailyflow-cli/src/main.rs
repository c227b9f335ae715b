use clap::{Parser, Subcommand};
use dailyflow_core::Config;

mod commands;
mod logging;
mod ticker;

#[derive(Parser)]
#[command(name = "dailyflow", version, about = "DailyFlow: todos, habits, notes and a pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Todo list
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },
    /// Habit tracker
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Freeform notes
    Notes {
        #[command(subcommand)]
        action: commands::notes::NotesAction,
    },
    /// Light/dark theme flag
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Export todos, habits and notes as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
    /// Erase todos, habits, notes and the stored record
    Clear {
        /// Confirm the erase
        #[arg(long)]
        yes: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    logging::init(&config.log);
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "using default configuration");
    }

    let result = match cli.command {
        Commands::Todo { action } => commands::todo::run(action, &config),
        Commands::Habit { action } => commands::habit::run(action, &config),
        Commands::Notes { action } => commands::notes::run(action, &config),
        Commands::Theme { action } => commands::theme::run(action, &config),
        Commands::Timer { action } => commands::timer::run(action, &config),
        Commands::Export { out } => commands::data::export(out, &config),
        Commands::Clear { yes } => commands::data::clear(yes, &config),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
