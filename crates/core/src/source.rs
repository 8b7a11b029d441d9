//! Where distance readings come from, and how they reach the UI.
//!
//! A [`StateSource`] produces one reading per timer tick. [`run_source`]
//! drives it on an interval and publishes into a [`StateHub`], a `watch`
//! channel the render loop observes.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::state::DistanceState;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("scripted source needs at least one state")]
    EmptyScript,

    #[error("unknown source kind: {0} (use random, script, or stdin)")]
    UnknownKind(String),
}

pub trait StateSource: Send {
    /// The next reading, or `None` to leave the current state alone.
    fn next_state(&mut self) -> Option<DistanceState>;

    fn name(&self) -> &'static str;
}

/// Simulated sensor: a uniformly random reading each tick, never `Unknown`.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StateSource for RandomSource {
    fn next_state(&mut self) -> Option<DistanceState> {
        DistanceState::READINGS.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Replays a fixed sequence of states, wrapping around at the end.
pub struct ScriptedSource {
    script: Vec<DistanceState>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<DistanceState>) -> Result<Self, SourceError> {
        if script.is_empty() {
            return Err(SourceError::EmptyScript);
        }
        Ok(Self { script, cursor: 0 })
    }
}

impl StateSource for ScriptedSource {
    fn next_state(&mut self) -> Option<DistanceState> {
        let state = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        Some(state)
    }

    fn name(&self) -> &'static str {
        "script"
    }
}

/// A published value plus a counter that advances on every publish, so
/// repeated identical readings remain observable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reading {
    pub state: DistanceState,
    pub seq: u64,
}

/// The single shared state value. Starts as `Unknown`.
pub struct StateHub {
    tx: watch::Sender<Reading>,
}

impl StateHub {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Reading::default());
        Self { tx }
    }

    /// Replaces the current state. Equal values are published too.
    pub fn publish(&self, state: DistanceState) {
        self.tx.send_modify(|reading| {
            reading.state = state;
            reading.seq += 1;
        });
    }

    pub fn current(&self) -> Reading {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Reading> {
        self.tx.subscribe()
    }
}

impl Default for StateHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Polls `source` every `interval` until `cancel` fires. The first reading
/// arrives one full interval after start.
pub async fn run_source<S: StateSource>(
    mut source: S,
    interval: Duration,
    hub: &StateHub,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    tracing::info!(source = source.name(), interval_ms = interval.as_millis() as u64, "State source started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Some(state) = source.next_state() {
                    tracing::debug!(%state, "Reading");
                    hub.publish(state);
                }
            }
        }
    }

    tracing::info!(source = source.name(), "State source stopped");
}

fn publish_line(line: &str, hub: &StateHub) {
    if line.trim().is_empty() {
        return;
    }
    match line.parse::<DistanceState>() {
        Ok(state) => {
            tracing::debug!(%state, "Reading from input");
            hub.publish(state);
        }
        Err(e) => tracing::warn!(error = %e, "Ignoring input line"),
    }
}

/// Reads one state name per line from `reader`. Unparsable lines are
/// logged and skipped; end of input stops the feed.
pub async fn run_line_source<R>(reader: R, hub: &StateHub, cancel: CancellationToken)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line,
        };
        match line {
            Ok(Some(line)) => publish_line(&line, hub),
            Ok(None) => {
                tracing::info!("State input closed");
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read state input");
                break;
            }
        }
    }
}

/// Blocking counterpart of [`run_line_source`]. Cancellation is noticed
/// between lines only.
pub fn read_line_source<R: BufRead>(reader: R, hub: &StateHub, cancel: &CancellationToken) {
    for line in reader.lines() {
        if cancel.is_cancelled() {
            return;
        }
        match line {
            Ok(line) => publish_line(&line, hub),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read state input");
                return;
            }
        }
    }
    tracing::info!("State input closed");
}

/// Feeds the hub from standard input on a dedicated thread. The thread is
/// never joined; a read still pending at exit ends with the process.
pub fn spawn_stdin_source(hub: Arc<StateHub>, cancel: CancellationToken) -> io::Result<()> {
    std::thread::Builder::new()
        .name("stdin-source".into())
        .spawn(move || {
            read_line_source(io::stdin().lock(), &hub, &cancel);
        })?;
    Ok(())
}
