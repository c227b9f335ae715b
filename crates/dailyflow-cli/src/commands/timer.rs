//! Pomodoro timer commands.
//!
//! Timer running state lives only as long as the `run` process; the settings
//! are part of the persisted snapshot.

use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use dailyflow_core::{format_clock, Config, Event, PomodoroSettings, TimerMode};

use super::{open_app, CmdResult};
use crate::ticker::{self, RunOptions, StopReason, Update};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print the idle timer state as JSON
    Status,
    /// Show or change durations
    Settings {
        /// Work minutes
        #[arg(long)]
        work: Option<u32>,
        /// Short break minutes
        #[arg(long)]
        short: Option<u32>,
        /// Long break minutes
        #[arg(long)]
        long: Option<u32>,
        /// Work phases per long break
        #[arg(long)]
        cycles: Option<u32>,
    },
    /// Run the countdown in the foreground (Ctrl-C pauses and exits)
    Run {
        /// Phase to start in
        #[arg(long, default_value = "work")]
        preset: TimerMode,
        /// Exit after this many phase changes
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        phases: Option<u32>,
    },
}

pub fn run(action: TimerAction, config: &Config) -> CmdResult {
    let mut app = open_app(config);

    match action {
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&app.timer().snapshot())?);
        }
        TimerAction::Settings {
            work,
            short,
            long,
            cycles,
        } => {
            let current = *app.timer().settings();
            if work.is_none() && short.is_none() && long.is_none() && cycles.is_none() {
                println!("{}", serde_json::to_string_pretty(&current)?);
                return Ok(());
            }
            let next = PomodoroSettings::new(
                work.unwrap_or(current.work_minutes),
                short.unwrap_or(current.short_break_minutes),
                long.unwrap_or(current.long_break_minutes),
                cycles.unwrap_or(current.cycles_per_long_break),
            );
            let event = app.update_pomodoro_settings(next)?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Run { preset, phases } => {
            app.set_timer_preset(preset);
            let options = RunOptions {
                period: Duration::from_millis(config.timer.tick_ms.max(1)),
                max_phases: phases,
            };
            let bell = config.timer.bell;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let reason = runtime.block_on(ticker::run(
                &mut app,
                &options,
                ticker::until_signal(tokio::signal::ctrl_c()),
                |update| render(update, bell),
            ));

            println!();
            match reason {
                StopReason::Interrupted => println!("paused"),
                StopReason::PhasesDone => println!("done"),
            }
        }
    }
    Ok(())
}

fn render(update: Update<'_>, bell: bool) {
    let mut out = std::io::stdout().lock();
    match update {
        Update::Second {
            mode,
            seconds_remaining,
        } => {
            let _ = write!(out, "\r{:<12} {}", mode.label(), format_clock(seconds_remaining));
        }
        Update::Event(Event::PhaseCompleted { from, to, .. }) => {
            let chime = if bell { "\x07" } else { "" };
            let _ = writeln!(out, "\r{chime}{} finished, {} next", from.label(), to.label());
        }
        Update::Event(Event::TimerStarted {
            mode,
            seconds_remaining,
            ..
        }) => {
            let _ = write!(out, "\r{:<12} {}", mode.label(), format_clock(*seconds_remaining));
        }
        Update::Event(_) => {}
    }
    let _ = out.flush();
}
