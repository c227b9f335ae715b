use uuid::Uuid;

use super::{daily_reset, DayKey, HabitItem, StreakChange, StreakPolicy};

/// Habits in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitStore {
    habits: Vec<HabitItem>,
    policy: StreakPolicy,
}

impl HabitStore {
    pub fn new(habits: Vec<HabitItem>) -> Self {
        Self {
            habits,
            policy: StreakPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: StreakPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> StreakPolicy {
        self.policy
    }

    /// Add a habit. Blank titles are rejected with `None`.
    pub fn add(&mut self, title: &str) -> Option<&HabitItem> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        self.habits
            .push(HabitItem::new(Uuid::new_v4().to_string(), title));
        self.habits.last()
    }

    pub fn toggle_today(&mut self, id: &str, today: DayKey) -> Option<StreakChange> {
        let policy = self.policy;
        let habit = self.habits.iter_mut().find(|h| h.id == id)?;
        let change = habit.toggle_today_with(today, policy);
        tracing::debug!(habit = %habit.id, ?change, streak = habit.streak, "habit toggled");
        Some(change)
    }

    pub fn reset_streak(&mut self, id: &str) -> bool {
        match self.habits.iter_mut().find(|h| h.id == id) {
            Some(habit) => {
                habit.reset_streak();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        self.habits.len() != before
    }

    pub fn daily_reset(&mut self, today: DayKey) -> usize {
        daily_reset(&mut self.habits, today)
    }

    pub fn get(&self, id: &str) -> Option<&HabitItem> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HabitItem> {
        self.habits.iter()
    }

    pub fn as_slice(&self) -> &[HabitItem] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn clear(&mut self) {
        self.habits.clear();
    }
}
