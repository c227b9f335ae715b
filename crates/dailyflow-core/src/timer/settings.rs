use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Floor applied to any configured duration (minutes) or cycle count.
pub const MIN_SETTING: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Work => "Work",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, TimerMode::Work)
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TimerMode::Work => "work",
            TimerMode::ShortBreak => "short-break",
            TimerMode::LongBreak => "long-break",
        })
    }
}

impl std::str::FromStr for TimerMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(TimerMode::Work),
            "short-break" | "short" => Ok(TimerMode::ShortBreak),
            "long-break" | "long" => Ok(TimerMode::LongBreak),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("unknown timer mode '{other}'"),
            }),
        }
    }
}

/// Pomodoro durations, persisted as part of the app snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_cycles_per_long_break")]
    pub cycles_per_long_break: u32,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_cycles_per_long_break() -> u32 {
    4
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            cycles_per_long_break: default_cycles_per_long_break(),
        }
    }
}

impl PomodoroSettings {
    pub fn new(work: u32, short_break: u32, long_break: u32, cycles: u32) -> Self {
        Self {
            work_minutes: work,
            short_break_minutes: short_break,
            long_break_minutes: long_break,
            cycles_per_long_break: cycles,
        }
    }

    /// Reject any zero field.
    ///
    /// # Errors
    /// Returns `ValidationError::NotPositive` naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("workMinutes", self.work_minutes),
            ("shortBreakMinutes", self.short_break_minutes),
            ("longBreakMinutes", self.long_break_minutes),
            ("cyclesPerLongBreak", self.cycles_per_long_break),
        ];
        for (field, value) in fields {
            if value < MIN_SETTING {
                return Err(ValidationError::NotPositive { field, value });
            }
        }
        Ok(())
    }

    /// Copy with every field raised to at least [`MIN_SETTING`].
    pub fn clamped(self) -> Self {
        Self {
            work_minutes: self.work_minutes.max(MIN_SETTING),
            short_break_minutes: self.short_break_minutes.max(MIN_SETTING),
            long_break_minutes: self.long_break_minutes.max(MIN_SETTING),
            cycles_per_long_break: self.cycles_per_long_break.max(MIN_SETTING),
        }
    }

    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        let raw = match mode {
            TimerMode::Work => self.work_minutes,
            TimerMode::ShortBreak => self.short_break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        };
        raw.max(MIN_SETTING)
    }

    /// Effective duration of `mode` in seconds. Never zero.
    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        u64::from(self.minutes_for(mode)).saturating_mul(60)
    }

    pub fn cycles(&self) -> u32 {
        self.cycles_per_long_break.max(MIN_SETTING)
    }
}
