use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{PomodoroSettings, TimerMode};

/// Every timer state change produces an Event.
/// The shell renders them; nothing else mutates timer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// Explicit preset switch. Always leaves the timer paused.
    PresetSelected {
        mode: TimerMode,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    /// The countdown for `from` ran out and `to` was loaded.
    PhaseCompleted {
        from: TimerMode,
        to: TimerMode,
        completed_work_cycles: u32,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        settings: PomodoroSettings,
        at: DateTime<Utc>,
    },
    TimerSnapshot {
        mode: TimerMode,
        seconds_remaining: u64,
        total_secs: u64,
        is_running: bool,
        completed_work_cycles: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerReset { at }
            | Event::PresetSelected { at, .. }
            | Event::PhaseCompleted { at, .. }
            | Event::SettingsUpdated { at, .. }
            | Event::TimerSnapshot { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::PhaseCompleted {
            from: TimerMode::Work,
            to: TimerMode::ShortBreak,
            completed_work_cycles: 1,
            seconds_remaining: 300,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "PhaseCompleted");
        assert_eq!(json["from"], "work");
        assert_eq!(json["to"], "short-break");
    }
}
