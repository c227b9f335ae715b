//! Export and clear-data commands.

use std::path::PathBuf;

use chrono::Utc;
use dailyflow_core::Config;

use super::{open_app, CmdResult};

pub fn export(out: Option<PathBuf>, config: &Config) -> CmdResult {
    let app = open_app(config);
    let doc = app.export(Utc::now());
    let json = doc.to_json_pretty()?;

    match out {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(doc.file_name())
            } else {
                path
            };
            std::fs::write(&path, json)?;
            println!("exported to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn clear(confirmed: bool, config: &Config) -> CmdResult {
    if !confirmed {
        return Err("refusing to erase data without --yes".into());
    }
    let mut app = open_app(config);
    app.clear_data()?;
    println!("all data cleared");
    Ok(())
}
