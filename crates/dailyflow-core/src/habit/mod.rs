//! Habit items and the daily-streak decision table.
//!
//! A habit is "on" for a day only while `last_seen_day` equals that day and
//! `toggled_today` is set. Streaks count distinct days that were switched on;
//! turning a day off never takes a day back.

mod store;

pub use store::HabitStore;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar day in the process's local time zone.
pub type DayKey = NaiveDate;

/// Today's key in local time.
pub fn today() -> DayKey {
    Local::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub toggled_today: bool,
    #[serde(default)]
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_day: Option<DayKey>,
}

/// How a new day's first toggle-on treats missed days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    /// Every new day that is switched on adds one, whatever the gap.
    #[default]
    Cumulative,
    /// A gap of more than one calendar day restarts the streak at 1.
    GapAware,
}

/// Outcome of a single toggle, decided before any field is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// First switch-on for a day the habit had not been seen on.
    TurnOnNewDay,
    /// Switched back on after being switched off earlier the same day.
    TurnOnSameDay,
    TurnOff,
}

impl StreakChange {
    pub fn streak_delta(&self) -> u32 {
        match self {
            StreakChange::TurnOnNewDay => 1,
            StreakChange::TurnOnSameDay | StreakChange::TurnOff => 0,
        }
    }

    pub fn turns_on(&self) -> bool {
        !matches!(self, StreakChange::TurnOff)
    }
}

impl HabitItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            toggled_today: false,
            streak: 0,
            last_seen_day: None,
        }
    }

    /// Effective "on" state for `today`; a flag left over from another day
    /// reads as off.
    pub fn is_done_on(&self, today: DayKey) -> bool {
        self.last_seen_day == Some(today) && self.toggled_today
    }

    pub fn classify(&self, today: DayKey) -> StreakChange {
        if self.is_done_on(today) {
            StreakChange::TurnOff
        } else if self.last_seen_day == Some(today) {
            StreakChange::TurnOnSameDay
        } else {
            StreakChange::TurnOnNewDay
        }
    }

    /// Flip today's state with the default cumulative policy.
    pub fn toggle_today(&mut self, today: DayKey) -> StreakChange {
        self.toggle_today_with(today, StreakPolicy::Cumulative)
    }

    pub fn toggle_today_with(&mut self, today: DayKey, policy: StreakPolicy) -> StreakChange {
        let change = self.classify(today);
        let broken = policy == StreakPolicy::GapAware
            && change == StreakChange::TurnOnNewDay
            && self
                .last_seen_day
                .is_some_and(|last| (today - last).num_days() > 1);

        self.streak = if broken {
            1
        } else {
            self.streak.saturating_add(change.streak_delta())
        };
        self.toggled_today = change.turns_on();
        self.last_seen_day = Some(today);
        change
    }

    pub fn reset_streak(&mut self) {
        self.streak = 0;
        self.toggled_today = false;
    }
}

/// Start-up pass: clear stale `toggled_today` flags from earlier days.
///
/// Leaves `streak` and `last_seen_day` alone. Returns how many flags were cleared.
pub fn daily_reset(habits: &mut [HabitItem], today: DayKey) -> usize {
    let mut cleared = 0;
    for habit in habits
        .iter_mut()
        .filter(|h| h.last_seen_day != Some(today))
    {
        if habit.toggled_today {
            habit.toggled_today = false;
            cleared += 1;
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn first_toggle_starts_streak() {
        let mut habit = HabitItem::new("h1", "Read");
        let change = habit.toggle_today(day("2024-05-01"));
        assert_eq!(change, StreakChange::TurnOnNewDay);
        assert_eq!(habit.streak, 1);
        assert!(habit.toggled_today);
        assert_eq!(habit.last_seen_day, Some(day("2024-05-01")));
    }

    #[test]
    fn same_day_retoggle_does_not_double_count() {
        let today = day("2024-05-01");
        let mut habit = HabitItem::new("h1", "Read");

        habit.toggle_today(today);
        assert_eq!((habit.streak, habit.toggled_today), (1, true));

        assert_eq!(habit.toggle_today(today), StreakChange::TurnOff);
        assert_eq!((habit.streak, habit.toggled_today), (1, false));

        assert_eq!(habit.toggle_today(today), StreakChange::TurnOnSameDay);
        assert_eq!((habit.streak, habit.toggled_today), (1, true));
    }

    #[test]
    fn stale_flag_from_yesterday_counts_as_off() {
        let mut habit = HabitItem::new("h1", "Run");
        habit.toggle_today(day("2024-05-01"));
        assert!(habit.toggled_today);

        let next = day("2024-05-02");
        assert!(!habit.is_done_on(next));
        assert_eq!(habit.toggle_today(next), StreakChange::TurnOnNewDay);
        assert_eq!(habit.streak, 2);
        assert!(habit.toggled_today);
    }

    #[test]
    fn cumulative_policy_ignores_gaps() {
        let mut habit = HabitItem::new("h1", "Run");
        habit.toggle_today(day("2024-05-01"));
        habit.toggle_today(day("2024-05-09"));
        assert_eq!(habit.streak, 2);
    }

    #[test]
    fn gap_aware_policy_restarts_after_missed_day() {
        let mut habit = HabitItem::new("h1", "Run");
        let policy = StreakPolicy::GapAware;
        habit.toggle_today_with(day("2024-05-01"), policy);
        habit.toggle_today_with(day("2024-05-02"), policy);
        assert_eq!(habit.streak, 2);
        habit.toggle_today_with(day("2024-05-04"), policy);
        assert_eq!(habit.streak, 1);
    }

    #[test]
    fn turning_off_a_new_day_is_impossible() {
        // The first toggle of any day always turns on.
        let mut habit = HabitItem::new("h1", "Run");
        habit.toggle_today(day("2024-05-01"));
        habit.toggle_today(day("2024-05-01"));
        assert!(!habit.toggled_today);
        assert_eq!(
            habit.classify(day("2024-05-02")),
            StreakChange::TurnOnNewDay
        );
    }

    #[test]
    fn daily_reset_clears_only_stale_flags() {
        let today = day("2024-05-03");
        let mut stale = HabitItem::new("a", "Stale");
        stale.toggle_today(day("2024-05-02"));
        let mut fresh = HabitItem::new("b", "Fresh");
        fresh.toggle_today(today);
        let never = HabitItem::new("c", "Never");

        let mut habits = vec![stale, fresh, never];
        assert_eq!(daily_reset(&mut habits, today), 1);

        assert!(!habits[0].toggled_today);
        assert_eq!(habits[0].streak, 1);
        assert_eq!(habits[0].last_seen_day, Some(day("2024-05-02")));
        assert!(habits[1].toggled_today);
        assert!(!habits[2].toggled_today);
    }

    #[test]
    fn json_shape_matches_snapshot_record() {
        let mut habit = HabitItem::new("h1", "Read");
        let json = serde_json::to_value(&habit).unwrap();
        assert!(json.get("lastSeenDay").is_none());

        habit.toggle_today(day("2024-05-01"));
        let json = serde_json::to_value(&habit).unwrap();
        assert_eq!(json["toggledToday"], true);
        assert_eq!(json["lastSeenDay"], "2024-05-01");
    }
}
