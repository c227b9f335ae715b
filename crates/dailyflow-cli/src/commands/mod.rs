pub mod config;
pub mod data;
pub mod habit;
pub mod notes;
pub mod theme;
pub mod timer;
pub mod todo;

use dailyflow_core::{
    AppSnapshot, Config, DailyFlow, MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore,
};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub type App = DailyFlow<Box<dyn SnapshotStore>>;

/// Open the shell over the on-disk record.
///
/// If the database cannot be opened the session runs against an in-memory
/// record, so reads still degrade to an empty state instead of failing.
pub fn open_app(config: &Config) -> App {
    let store: Box<dyn SnapshotStore> = match SqliteSnapshotStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "database unavailable, changes will not be saved");
            Box::new(MemorySnapshotStore::new())
        }
    };
    let fresh = AppSnapshot {
        dark: config.defaults.dark,
        pomodoro: config.defaults.pomodoro(),
        ..Default::default()
    };
    DailyFlow::open_with(
        store,
        dailyflow_core::habit::today(),
        fresh,
        config.habits.streak_policy,
    )
}

/// The first eight characters of an id, for list output.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Resolve a full id or a unique prefix of one.
pub fn resolve_id<'a, I>(ids: I, query: &str) -> Result<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.trim();
    if query.is_empty() {
        return Err("id must not be empty".into());
    }
    let matches: Vec<&str> = ids.into_iter().filter(|id| id.starts_with(query)).collect();
    match matches.as_slice() {
        [one] => Ok((*one).to_string()),
        [] => Err(format!("no item matches '{query}'")),
        many if many.contains(&query) => Ok(query.to_string()),
        _ => Err(format!("'{query}' is ambiguous")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_id_by_prefix() {
        let ids = ["abc123", "abd456", "xyz"];
        assert_eq!(resolve_id(ids, "abc").unwrap(), "abc123");
        assert_eq!(resolve_id(ids, "x").unwrap(), "xyz");
        assert!(resolve_id(ids, "ab").is_err());
        assert!(resolve_id(ids, "q").is_err());
        assert!(resolve_id(ids, " ").is_err());
    }

    #[test]
    fn short_id_counts_characters() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("aéééé-x"), "aéééé-x");
        assert_eq!(short_id("ééééééééé"), "éééééééé");
        assert_eq!(short_id(""), "");
    }
}
