use clap::Subcommand;
use dailyflow_core::Config;

use super::{open_app, CmdResult};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

fn name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

pub fn run(action: ThemeAction, config: &Config) -> CmdResult {
    let mut app = open_app(config);

    match action {
        ThemeAction::Show => println!("{}", name(app.is_dark())),
        ThemeAction::Toggle => println!("{}", name(app.toggle_theme())),
    }
    Ok(())
}
