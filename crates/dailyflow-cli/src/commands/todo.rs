//! Todo list commands.

use clap::Subcommand;
use dailyflow_core::{Config, TodoItem};

use super::{open_app, resolve_id, short_id, App, CmdResult};

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a todo to the top of the list
    Add {
        /// Todo text
        text: String,
    },
    /// Toggle a todo between open and done
    Toggle {
        /// Todo ID (or unique prefix)
        id: String,
    },
    /// Delete a todo
    Rm {
        /// Todo ID (or unique prefix)
        id: String,
    },
    /// List todos
    List {
        /// Case-insensitive text filter
        #[arg(long)]
        filter: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete every completed todo
    ClearDone,
}

fn lookup(app: &App, query: &str) -> Result<String, String> {
    resolve_id(app.todos().iter().map(|t| t.id.as_str()), query)
}

fn line(item: &TodoItem) -> String {
    let mark = if item.done { "x" } else { " " };
    format!("[{mark}] {}  {}", short_id(&item.id), item.text)
}

pub fn run(action: TodoAction, config: &Config) -> CmdResult {
    let mut app = open_app(config);

    match action {
        TodoAction::Add { text } => match app.add_todo(&text) {
            Some(item) => println!("{}", line(&item)),
            None => return Err("todo text must not be empty".into()),
        },
        TodoAction::Toggle { id } => {
            let id = lookup(&app, &id)?;
            if let Some(done) = app.toggle_todo(&id) {
                println!("{}", if done { "done" } else { "open" });
            }
        }
        TodoAction::Rm { id } => {
            let id = lookup(&app, &id)?;
            app.remove_todo(&id);
            println!("removed");
        }
        TodoAction::List { filter, json } => {
            let items = app.todos().filter(filter.as_deref().unwrap_or(""));
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for item in items {
                    println!("{}", line(item));
                }
            }
        }
        TodoAction::ClearDone => {
            let n = app.clear_done_todos();
            println!("removed {n} completed");
        }
    }
    Ok(())
}
