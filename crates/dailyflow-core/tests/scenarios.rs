//! End-to-end scenarios through the application shell.

use chrono::{NaiveDate, Utc};
use dailyflow_core::{
    AppSnapshot, DailyFlow, KvDatabase, MemorySnapshotStore, PomodoroSettings, PomodoroTimer,
    SnapshotStore, SqliteSnapshotStore, StreakChange, TimerMode, SNAPSHOT_KEY,
};

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn classic_pomodoro_first_work_phase() {
    let mut timer = PomodoroTimer::new(PomodoroSettings::new(25, 5, 15, 4));
    timer.start();
    for _ in 0..1500 {
        timer.tick();
    }
    assert_eq!(timer.mode(), TimerMode::ShortBreak);
    assert_eq!(timer.seconds_remaining(), 300);
    assert!(timer.is_running());
}

#[test]
fn habit_toggled_three_times_in_one_day() {
    let store = MemorySnapshotStore::new();
    let mut app = DailyFlow::open(&store, day("2024-05-01"));
    let id = app.add_habit("Meditate").unwrap().id;

    let steps = [
        (StreakChange::TurnOnNewDay, 1, true),
        (StreakChange::TurnOff, 1, false),
        (StreakChange::TurnOnSameDay, 1, true),
    ];
    for (expected_change, streak, on) in steps {
        let change = app.toggle_habit(&id, day("2024-05-01")).unwrap();
        let habit = app.habits().get(&id).unwrap();
        assert_eq!(change, expected_change);
        assert_eq!(habit.streak, streak);
        assert_eq!(habit.toggled_today, on);
    }
}

#[test]
fn snapshot_round_trips_through_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dailyflow.db");

    let original = {
        let store = SqliteSnapshotStore::new(KvDatabase::open_at(&path).unwrap());
        let mut app = DailyFlow::open(store, day("2024-05-01"));
        let todo = app.add_todo("Write report").unwrap();
        app.add_todo("Water plants");
        app.toggle_todo(&todo.id);
        let habit = app.add_habit("Stretch").unwrap();
        app.toggle_habit(&habit.id, day("2024-05-01"));
        app.set_notes("line one\nline two");
        app.update_pomodoro_settings(PomodoroSettings::new(40, 8, 20, 3))
            .unwrap();
        app.snapshot()
    };

    let store = SqliteSnapshotStore::new(KvDatabase::open_at(&path).unwrap());
    let reopened = DailyFlow::open(store, day("2024-05-01"));
    let restored = reopened.snapshot();

    assert_eq!(restored.todos, original.todos);
    assert_eq!(restored.habits, original.habits);
    assert_eq!(restored.notes, original.notes);
    assert_eq!(restored.pomodoro, original.pomodoro);
    assert_eq!(reopened.timer().seconds_remaining(), 40 * 60);
}

#[test]
fn export_document_matches_state() {
    let mut app = DailyFlow::open(MemorySnapshotStore::new(), day("2024-05-01"));
    app.add_todo("one");
    app.add_habit("two");
    app.set_notes("three");
    app.set_dark(true);

    let doc = app.export(Utc::now());
    let json: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["todos"][0]["text"], "one");
    assert_eq!(json["habits"][0]["title"], "two");
    assert_eq!(json["notes"], "three");
    assert!(json["exportedAt"].is_string());
    assert!(json.get("dark").is_none());
}

#[test]
fn unreadable_record_is_silently_replaced() {
    let db = KvDatabase::open_memory().unwrap();
    db.kv_set(SNAPSHOT_KEY, "{\"todos\": 12}").unwrap();
    let store = SqliteSnapshotStore::new(db);

    let mut app = DailyFlow::open(store, day("2024-05-01"));
    assert!(app.todos().is_empty());

    app.add_todo("fresh start");
    let raw = app.store().load().unwrap();
    assert_eq!(AppSnapshot::from_json(&raw).todos.len(), 1);
}

#[test]
fn clear_data_then_reopen_is_empty() {
    let store = MemorySnapshotStore::new();
    {
        let mut app = DailyFlow::open(&store, day("2024-05-01"));
        app.add_todo("a");
        app.clear_data().unwrap();
    }
    let app = DailyFlow::open(&store, day("2024-05-02"));
    assert!(app.todos().is_empty());
    assert!(store.record().is_none());
}
