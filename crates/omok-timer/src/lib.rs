//! Per-turn countdown timer for the Omok match server.
//!
//! One logical countdown per active match, ticking at a fixed cadence
//! (one second by default) while running. Each tick decrements the
//! remaining time; on reaching zero the timer reports expiry exactly
//! once, self-resets to the turn limit, and keeps ticking for the next
//! turn holder.
//!
//! # Integration
//!
//! The timer is designed to sit inside the session coordinator's
//! `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         update = timer.wait() => {
//!             // broadcast TIME, handle expiry
//!         }
//!     }
//! }
//! ```
//!
//! While stopped, [`TurnTimer::wait`] pends forever, so the `select!`
//! simply never takes the timer branch — and because stop happens on
//! the same task between awaits, no tick can land after a stop.

use std::time::Duration;

use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the turn timer.
#[derive(Debug, Clone)]
pub struct TimerConfig {
    /// Seconds each player gets per turn. Default: 35.
    pub turn_limit_secs: u32,
    /// How often the countdown ticks. Default: 1 second.
    pub tick_interval: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            turn_limit_secs: 35,
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl TimerConfig {
    /// Creates a config with a specific turn limit and the default cadence.
    pub fn with_limit(turn_limit_secs: u32) -> Self {
        Self {
            turn_limit_secs,
            ..Default::default()
        }
    }

    /// Clamps out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`TurnTimer::new`]. A zero turn limit or
    /// zero interval would make the countdown degenerate, so both are
    /// raised to their minimums.
    pub fn validated(mut self) -> Self {
        if self.turn_limit_secs == 0 {
            warn!("turn_limit_secs of 0 — raising to 1");
            self.turn_limit_secs = 1;
        }
        if self.tick_interval < Duration::from_millis(10) {
            warn!(interval = ?self.tick_interval, "tick_interval too small — raising to 10ms");
            self.tick_interval = Duration::from_millis(10);
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tick updates
// ---------------------------------------------------------------------------

/// One countdown tick, returned by [`TurnTimer::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickUpdate {
    /// Seconds left for the current turn *after* this tick. Zero only
    /// on the expiring tick.
    pub remaining: u32,
    /// `true` exactly once per turn: the countdown hit zero and the
    /// timer self-reset to the turn limit for the next turn holder.
    pub expired: bool,
}

// ---------------------------------------------------------------------------
// TurnTimer
// ---------------------------------------------------------------------------

/// The per-turn countdown.
///
/// Owned by the session coordinator task; `start`, `reset` and `stop`
/// are all idempotent and cheap. The invariant "running iff the match
/// is active with both seats filled" is the coordinator's to maintain —
/// the timer just ticks while told to.
#[derive(Debug)]
pub struct TurnTimer {
    config: TimerConfig,
    remaining: u32,
    running: bool,
    /// Deadline of the next tick while running.
    next_tick: Option<TokioInstant>,
}

impl TurnTimer {
    /// Creates a stopped timer from config.
    pub fn new(config: TimerConfig) -> Self {
        let config = config.validated();
        debug!(
            limit_secs = config.turn_limit_secs,
            interval = ?config.tick_interval,
            "turn timer created"
        );
        Self {
            remaining: config.turn_limit_secs,
            running: false,
            next_tick: None,
            config,
        }
    }

    /// Starts (or restarts) the countdown at the full turn limit.
    ///
    /// Safe to call on a running timer: it restarts from the limit.
    pub fn start(&mut self) {
        self.remaining = self.config.turn_limit_secs;
        self.running = true;
        self.next_tick = Some(TokioInstant::now() + self.config.tick_interval);
        debug!(limit_secs = self.remaining, "turn timer started");
    }

    /// Resets the countdown to the full turn limit without stopping.
    ///
    /// Called on every successful move. The next tick is rescheduled a
    /// full interval out so the new turn holder gets whole seconds.
    /// No-op while stopped.
    pub fn reset(&mut self) {
        if !self.running {
            return;
        }
        self.remaining = self.config.turn_limit_secs;
        self.next_tick = Some(TokioInstant::now() + self.config.tick_interval);
        trace!("turn timer reset");
    }

    /// Halts ticking entirely. Idempotent; once stopped, [`wait`](Self::wait)
    /// pends until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.next_tick = None;
            debug!("turn timer stopped");
        }
    }

    /// Whether the countdown is ticking.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds left for the current turn.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// The configured per-turn limit in seconds.
    pub fn turn_limit(&self) -> u32 {
        self.config.turn_limit_secs
    }

    /// Waits for the next tick. Pends forever while stopped.
    pub async fn wait(&mut self) -> TickUpdate {
        let next = match self.next_tick {
            Some(next) if self.running => next,
            _ => {
                // Stopped: this future never completes, but a
                // surrounding select! still services other branches.
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        time::sleep_until(next).await;

        // Keep the cadence anchored to the deadline, not to wake-up
        // time, so a late wake does not stretch the turn.
        self.next_tick = Some(next + self.config.tick_interval);
        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.remaining = self.config.turn_limit_secs;
            trace!("turn timer expired — resetting for next turn");
            TickUpdate {
                remaining: 0,
                expired: true,
            }
        } else {
            trace!(remaining = self.remaining, "turn timer tick");
            TickUpdate {
                remaining: self.remaining,
                expired: false,
            }
        }
    }
}
