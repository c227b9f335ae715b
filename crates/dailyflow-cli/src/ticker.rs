//! The one recurring trigger that drives the timer.
//!
//! A single loop owns the interval, so ticks are strictly serialized. When the
//! stop signal fires the timer is paused and the interval is dropped before
//! `run` returns; no tick can arrive afterwards.

use std::future::Future;
use std::time::Duration;

use dailyflow_core::{DailyFlow, Event, SnapshotStore, TimerMode};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub struct RunOptions {
    /// Wall-clock period of one timer second.
    pub period: Duration,
    /// Stop after this many phase transitions.
    pub max_phases: Option<u32>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            max_phases: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Interrupted,
    PhasesDone,
}

pub enum Update<'a> {
    Event(&'a Event),
    Second {
        mode: TimerMode,
        seconds_remaining: u64,
    },
}

/// Resolve when `signal` fires.
///
/// If the handler could not be installed this never resolves, so the loop keeps
/// running until its phase limit or the process is killed.
pub async fn until_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Start the timer and tick it once per `period` until `stop` resolves or the
/// phase limit is reached. The timer is always paused on return.
pub async fn run<S, F, R>(
    app: &mut DailyFlow<S>,
    options: &RunOptions,
    stop: F,
    mut render: R,
) -> StopReason
where
    S: SnapshotStore,
    F: Future<Output = ()>,
    R: FnMut(Update<'_>),
{
    tokio::pin!(stop);

    if let Some(event) = app.start_timer() {
        render(Update::Event(&event));
    }

    let mut interval = interval_at(Instant::now() + options.period, options.period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut phases = 0u32;

    let reason = loop {
        tokio::select! {
            biased;
            _ = &mut stop => break StopReason::Interrupted,
            _ = interval.tick() => {
                match app.tick() {
                    Some(event) => {
                        render(Update::Event(&event));
                        phases += 1;
                        if options.max_phases.is_some_and(|max| phases >= max) {
                            break StopReason::PhasesDone;
                        }
                    }
                    None => render(Update::Second {
                        mode: app.timer().mode(),
                        seconds_remaining: app.timer().seconds_remaining(),
                    }),
                }
            }
        }
    };

    drop(interval);
    if let Some(event) = app.pause_timer() {
        render(Update::Event(&event));
    }
    tracing::debug!(?reason, phases, "timer loop stopped");
    reason
}
