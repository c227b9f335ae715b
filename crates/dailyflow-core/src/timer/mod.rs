mod engine;
mod settings;

pub use engine::{format_clock, PomodoroTimer};
pub use settings::{PomodoroSettings, TimerMode, MIN_SETTING};
