//! Habit tracker commands.

use clap::Subcommand;
use dailyflow_core::habit::today;
use dailyflow_core::{Config, HabitItem, StreakChange};

use super::{open_app, resolve_id, short_id, App, CmdResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit
    Add {
        /// Habit title
        title: String,
    },
    /// Flip today's check-in for a habit
    Toggle {
        /// Habit ID (or unique prefix)
        id: String,
    },
    /// Delete a habit
    Rm {
        /// Habit ID (or unique prefix)
        id: String,
    },
    /// Reset a habit's streak to zero
    Reset {
        /// Habit ID (or unique prefix)
        id: String,
    },
    /// List habits
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn lookup(app: &App, query: &str) -> Result<String, String> {
    resolve_id(app.habits().iter().map(|h| h.id.as_str()), query)
}

fn line(habit: &HabitItem) -> String {
    let mark = if habit.is_done_on(today()) { "x" } else { " " };
    format!(
        "[{mark}] {}  {} (streak {})",
        short_id(&habit.id),
        habit.title,
        habit.streak
    )
}

pub fn run(action: HabitAction, config: &Config) -> CmdResult {
    let mut app = open_app(config);

    match action {
        HabitAction::Add { title } => match app.add_habit(&title) {
            Some(habit) => println!("{}", line(&habit)),
            None => return Err("habit title must not be empty".into()),
        },
        HabitAction::Toggle { id } => {
            let id = lookup(&app, &id)?;
            if let Some(change) = app.toggle_habit(&id, today()) {
                let state = match change {
                    StreakChange::TurnOff => "off",
                    StreakChange::TurnOnNewDay | StreakChange::TurnOnSameDay => "on",
                };
                let streak = app.habits().get(&id).map(|h| h.streak).unwrap_or(0);
                println!("{state} (streak {streak})");
            }
        }
        HabitAction::Rm { id } => {
            let id = lookup(&app, &id)?;
            app.remove_habit(&id);
            println!("removed");
        }
        HabitAction::Reset { id } => {
            let id = lookup(&app, &id)?;
            app.reset_habit_streak(&id);
            println!("streak reset");
        }
        HabitAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(app.habits().as_slice())?);
            } else {
                for habit in app.habits().iter() {
                    println!("{}", line(habit));
                }
            }
        }
    }
    Ok(())
}
