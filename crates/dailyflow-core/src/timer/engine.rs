//! Pomodoro timer state machine.
//!
//! The engine owns no clock and no thread. Time only advances when the caller
//! invokes `tick()`, one call per elapsed second while the timer is running.
//!
//! ## Phase cycle
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work -> LongBreak -> Work
//!         (every `cyclesPerLongBreak`-th work phase ends in a long break)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = PomodoroTimer::new(PomodoroSettings::default());
//! timer.start();
//! // Once per second, from a single scheduler:
//! if let Some(event) = timer.tick() { render(event); }
//! ```

use chrono::Utc;

use super::settings::{PomodoroSettings, TimerMode};
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    settings: PomodoroSettings,
    mode: TimerMode,
    seconds_remaining: u64,
    is_running: bool,
    /// Work phases finished since construction or the last `reset()`.
    completed_work_cycles: u32,
}

impl PomodoroTimer {
    /// Create an idle timer in `work` mode with a full work countdown.
    ///
    /// Zero-valued settings are clamped to the one-minute floor.
    pub fn new(settings: PomodoroSettings) -> Self {
        let settings = settings.clamped();
        Self {
            seconds_remaining: settings.duration_secs(TimerMode::Work),
            settings,
            mode: TimerMode::Work,
            is_running: false,
            completed_work_cycles: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn completed_work_cycles(&self) -> u32 {
        self.completed_work_cycles
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    /// Full duration of the current mode in seconds.
    pub fn total_secs(&self) -> u64 {
        self.settings.duration_secs(self.mode)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (1.0 - (self.seconds_remaining as f64 / total as f64)).clamp(0.0, 1.0)
    }

    pub fn snapshot(&self) -> Event {
        Event::TimerSnapshot {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            total_secs: self.total_secs(),
            is_running: self.is_running,
            completed_work_cycles: self.completed_work_cycles,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Resume counting down. Returns `None` if already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        self.is_running = true;
        tracing::debug!(mode = %self.mode, remaining = self.seconds_remaining, "timer started");
        Some(Event::TimerStarted {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Freeze the countdown. Returns `None` if it was not running.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        tracing::debug!(mode = %self.mode, remaining = self.seconds_remaining, "timer paused");
        Some(Event::TimerPaused {
            mode: self.mode,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Event {
        self.is_running = false;
        self.completed_work_cycles = 0;
        self.mode = TimerMode::Work;
        self.seconds_remaining = self.settings.duration_secs(TimerMode::Work);
        tracing::debug!("timer reset");
        Event::TimerReset { at: Utc::now() }
    }

    /// Jump to `mode` with its full duration. Always pauses.
    pub fn set_preset(&mut self, mode: TimerMode) -> Event {
        self.is_running = false;
        self.mode = mode;
        self.seconds_remaining = self.settings.duration_secs(mode);
        tracing::debug!(mode = %mode, "preset selected");
        Event::PresetSelected {
            mode,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        }
    }

    /// Replace the durations.
    ///
    /// An idle timer in `work` mode picks up a changed work duration at once;
    /// otherwise the new values take effect from the next phase.
    ///
    /// # Errors
    /// Rejects settings with any zero field, leaving the timer untouched.
    pub fn set_settings(&mut self, settings: PomodoroSettings) -> Result<Event, ValidationError> {
        settings.validate()?;
        let previous = std::mem::replace(&mut self.settings, settings);
        if !self.is_running
            && self.mode == TimerMode::Work
            && settings.work_minutes != previous.work_minutes
        {
            self.seconds_remaining = settings.duration_secs(TimerMode::Work);
        }
        Ok(Event::SettingsUpdated {
            settings,
            at: Utc::now(),
        })
    }

    /// Advance by one second. Returns `Some(Event::PhaseCompleted)` on the
    /// tick that exhausts the current phase; the new phase keeps running.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        if self.seconds_remaining > 1 {
            self.seconds_remaining -= 1;
            return None;
        }
        Some(self.advance())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self) -> Event {
        let from = self.mode;
        let next = match from {
            TimerMode::Work => {
                self.completed_work_cycles = self.completed_work_cycles.saturating_add(1);
                if self.completed_work_cycles % self.settings.cycles() == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                }
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Work,
        };
        self.mode = next;
        self.seconds_remaining = self.settings.duration_secs(next);
        tracing::info!(
            from = %from,
            to = %next,
            cycles = self.completed_work_cycles,
            "phase completed"
        );
        Event::PhaseCompleted {
            from,
            to: next,
            completed_work_cycles: self.completed_work_cycles,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        }
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(PomodoroSettings::default())
    }
}

/// Render seconds as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(timer: &mut PomodoroTimer, n: u64) -> Vec<Event> {
        (0..n).filter_map(|_| timer.tick()).collect()
    }

    #[test]
    fn start_pause_start() {
        let mut timer = PomodoroTimer::default();
        assert!(!timer.is_running());

        assert!(timer.start().is_some());
        assert!(timer.is_running());
        assert!(timer.start().is_none(), "second start is a no-op");

        assert!(timer.pause().is_some());
        assert!(!timer.is_running());
        assert!(timer.pause().is_none());
    }

    #[test]
    fn start_does_not_reset_remaining() {
        let mut timer = PomodoroTimer::default();
        timer.start();
        run_ticks(&mut timer, 10);
        timer.pause();
        timer.start();
        assert_eq!(timer.seconds_remaining(), 1490);
    }

    #[test]
    fn tick_while_paused_is_ignored() {
        let mut timer = PomodoroTimer::default();
        timer.start();
        run_ticks(&mut timer, 5);
        timer.pause();
        assert!(run_ticks(&mut timer, 100).is_empty());
        assert_eq!(timer.seconds_remaining(), 1495);
    }

    #[test]
    fn work_phase_rolls_into_short_break_and_keeps_running() {
        let mut timer = PomodoroTimer::default();
        timer.start();
        let events = run_ticks(&mut timer, 1500);
        assert_eq!(events.len(), 1);
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
        assert_eq!(timer.seconds_remaining(), 300);
        assert!(timer.is_running());
        assert_eq!(timer.completed_work_cycles(), 1);
        match &events[0] {
            Event::PhaseCompleted { from, to, .. } => {
                assert_eq!(*from, TimerMode::Work);
                assert_eq!(*to, TimerMode::ShortBreak);
            }
            other => panic!("Expected PhaseCompleted, got {other:?}"),
        }
    }

    #[test]
    fn break_returns_to_work() {
        let mut timer = PomodoroTimer::default();
        timer.set_preset(TimerMode::ShortBreak);
        timer.start();
        run_ticks(&mut timer, 300);
        assert_eq!(timer.mode(), TimerMode::Work);
        assert_eq!(timer.seconds_remaining(), 1500);
        assert_eq!(timer.completed_work_cycles(), 0);
    }

    #[test]
    fn fourth_work_phase_ends_in_long_break() {
        let settings = PomodoroSettings::new(1, 1, 2, 4);
        let mut timer = PomodoroTimer::new(settings);
        timer.start();
        let mut breaks = Vec::new();
        for _ in 0..4 {
            run_ticks(&mut timer, 60);
            breaks.push(timer.mode());
            let secs = timer.seconds_remaining();
            run_ticks(&mut timer, secs);
            assert_eq!(timer.mode(), TimerMode::Work);
        }
        assert_eq!(
            breaks,
            vec![
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::LongBreak
            ]
        );
    }

    #[test]
    fn single_cycle_setting_always_long_breaks() {
        let mut timer = PomodoroTimer::new(PomodoroSettings::new(1, 1, 3, 1));
        timer.start();
        run_ticks(&mut timer, 60);
        assert_eq!(timer.mode(), TimerMode::LongBreak);
        assert_eq!(timer.seconds_remaining(), 180);
    }

    #[test]
    fn reset_goes_to_beginning() {
        let mut timer = PomodoroTimer::new(PomodoroSettings::new(1, 1, 1, 4));
        timer.start();
        run_ticks(&mut timer, 90);
        assert_eq!(timer.completed_work_cycles(), 1);
        timer.reset();
        assert_eq!(timer.mode(), TimerMode::Work);
        assert_eq!(timer.seconds_remaining(), 60);
        assert!(!timer.is_running());
        assert_eq!(timer.completed_work_cycles(), 0);
    }

    #[test]
    fn preset_switch_pauses_and_loads_duration() {
        let mut timer = PomodoroTimer::default();
        timer.start();
        run_ticks(&mut timer, 3);
        timer.set_preset(TimerMode::LongBreak);
        assert!(!timer.is_running());
        assert_eq!(timer.mode(), TimerMode::LongBreak);
        assert_eq!(timer.seconds_remaining(), 900);
    }

    #[test]
    fn settings_change_while_idle_reloads_work() {
        let mut timer = PomodoroTimer::default();
        timer
            .set_settings(PomodoroSettings::new(50, 10, 30, 2))
            .unwrap();
        assert_eq!(timer.seconds_remaining(), 3000);
    }

    #[test]
    fn break_settings_change_keeps_paused_work_progress() {
        let mut timer = PomodoroTimer::default();
        timer.start();
        run_ticks(&mut timer, 600);
        timer.pause();
        assert_eq!(timer.seconds_remaining(), 900);

        timer
            .set_settings(PomodoroSettings::new(25, 10, 15, 4))
            .unwrap();
        assert_eq!(timer.seconds_remaining(), 900);
        assert_eq!(timer.settings().short_break_minutes, 10);

        timer
            .set_settings(PomodoroSettings::new(30, 10, 15, 4))
            .unwrap();
        assert_eq!(timer.seconds_remaining(), 1800);
    }

    #[test]
    fn settings_change_while_running_keeps_countdown() {
        let mut timer = PomodoroTimer::default();
        timer.start();
        run_ticks(&mut timer, 10);
        timer
            .set_settings(PomodoroSettings::new(50, 10, 30, 2))
            .unwrap();
        assert_eq!(timer.seconds_remaining(), 1490);
        run_ticks(&mut timer, 1490);
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
        assert_eq!(timer.seconds_remaining(), 600);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut timer = PomodoroTimer::default();
        let err = timer
            .set_settings(PomodoroSettings::new(0, 5, 15, 4))
            .unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { field: "workMinutes", .. }));
        assert_eq!(timer.settings(), &PomodoroSettings::default());
        assert_eq!(timer.seconds_remaining(), 1500);
    }

    #[test]
    fn zero_settings_at_construction_are_clamped() {
        let timer = PomodoroTimer::new(PomodoroSettings::new(0, 0, 0, 0));
        assert_eq!(timer.seconds_remaining(), 60);
        assert_eq!(timer.settings().cycles_per_long_break, 1);
    }

    #[test]
    fn progress_and_clock() {
        let mut timer = PomodoroTimer::new(PomodoroSettings::new(1, 1, 1, 1));
        assert_eq!(timer.progress(), 0.0);
        timer.start();
        run_ticks(&mut timer, 30);
        assert!((timer.progress() - 0.5).abs() < f64::EPSILON);
        assert_eq!(format_clock(timer.seconds_remaining()), "00:30");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn snapshot_reflects_state() {
        let timer = PomodoroTimer::default();
        match timer.snapshot() {
            Event::TimerSnapshot {
                mode,
                seconds_remaining,
                total_secs,
                is_running,
                ..
            } => {
                assert_eq!(mode, TimerMode::Work);
                assert_eq!(seconds_remaining, 1500);
                assert_eq!(total_secs, 1500);
                assert!(!is_running);
            }
            other => panic!("Expected TimerSnapshot, got {other:?}"),
        }
    }
}
