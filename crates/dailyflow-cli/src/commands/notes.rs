use clap::Subcommand;
use dailyflow_core::Config;

use super::{open_app, CmdResult};

#[derive(Subcommand)]
pub enum NotesAction {
    /// Print the notes
    Show,
    /// Replace the notes
    Set {
        /// New notes text
        text: String,
    },
}

pub fn run(action: NotesAction, config: &Config) -> CmdResult {
    let mut app = open_app(config);

    match action {
        NotesAction::Show => println!("{}", app.notes()),
        NotesAction::Set { text } => {
            app.set_notes(text);
            println!("ok");
        }
    }
    Ok(())
}
