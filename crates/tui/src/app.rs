use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use distind_config::Config;
use distind_core::animation::{Easing, OffsetAnimator};
use distind_core::geometry::{offsets, Offsets, RulerMeasurement, RulerSpec};
use distind_core::source::Reading;
use distind_core::DistanceState;
use ratatui::prelude::*;
use tokio::sync::watch;

use crate::input::handle_key;
use crate::ruler::RulerState;
use crate::theme::Theme;
use crate::ui::draw;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Following the state source.
    Live,
    /// Source updates are ignored until resumed.
    Paused,
}

pub struct App {
    pub mode: AppMode,
    pub state: DistanceState,
    pub should_quit: bool,
    pub source_name: String,
    pub theme: Theme,
    pub spec: RulerSpec,
    pub mark_rows: u16,
    pub highlight_rows: u16,
    pub animator: OffsetAnimator,
    pub ruler_state: RulerState,
    measurement: RulerMeasurement,
    frame: Duration,
    readings: Option<watch::Receiver<Reading>>,
}

impl App {
    pub fn new(config: &Config, source_name: &str) -> Self {
        Self {
            mode: AppMode::Live,
            state: DistanceState::Unknown,
            should_quit: false,
            source_name: source_name.to_string(),
            theme: Theme::from_config(&config.tui),
            spec: config.ruler.spec(),
            mark_rows: config.ruler.mark_rows,
            highlight_rows: config.ruler.highlight_rows,
            animator: OffsetAnimator::new(config.ruler.animation(), Easing::EaseInOut),
            ruler_state: RulerState::default(),
            measurement: RulerMeasurement::default(),
            frame: Duration::from_millis(config.tui.frame_ms),
            readings: None,
        }
    }

    /// Follows readings published on `rx`.
    pub fn with_readings(mut self, rx: watch::Receiver<Reading>) -> Self {
        self.readings = Some(rx);
        self
    }

    /// Replaces the current state and retargets both offsets.
    pub fn set_state(&mut self, state: DistanceState) {
        if state != self.state {
            tracing::debug!(from = %self.state, to = %state, "State changed");
        }
        self.state = state;
        self.retarget();
    }

    /// Feeds back the layout measured by the last draw. The first
    /// measurement and every resize recompute the offsets.
    pub fn set_measurement(&mut self, measurement: RulerMeasurement) {
        if measurement == self.measurement {
            return;
        }
        let first = !self.measurement.is_measured();
        self.measurement = measurement;
        if first {
            // nothing on screen yet to animate from
            self.animator.jump_to(self.target_offsets());
        } else {
            self.retarget();
        }
    }

    pub fn measurement(&self) -> RulerMeasurement {
        self.measurement
    }

    pub fn target_offsets(&self) -> Offsets {
        offsets(self.state, &self.measurement, &self.spec)
    }

    fn retarget(&mut self) {
        let target = self.target_offsets();
        self.animator.retarget(target);
    }

    pub fn toggle_pause(&mut self) {
        self.mode = match self.mode {
            AppMode::Live => AppMode::Paused,
            AppMode::Paused => AppMode::Live,
        };
        tracing::info!(mode = ?self.mode, "Source following toggled");
    }

    /// Applies a pending reading, if any. Returns true when one was seen.
    pub fn poll_readings(&mut self) -> bool {
        let Some(rx) = self.readings.as_mut() else {
            return false;
        };
        match rx.has_changed() {
            Ok(true) => {
                let reading = *rx.borrow_and_update();
                if self.mode == AppMode::Live {
                    self.set_state(reading.state);
                }
                true
            }
            Ok(false) => false,
            Err(_) => {
                tracing::debug!("State source closed");
                self.readings = None;
                false
            }
        }
    }

    /// Advances animations by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.animator.update(dt);
    }

    pub async fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(io::stdout());
        let result = match Terminal::new(backend) {
            Ok(mut terminal) => self.event_loop(&mut terminal).await,
            Err(e) => Err(e.into()),
        };

        // restore the terminal whether or not the loop failed
        let restored = restore_terminal();
        result.and(restored)
    }

    async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        tracing::info!(source = %self.source_name, "Distance indicator started");
        let mut last = Instant::now();

        loop {
            terminal.draw(|frame| draw(frame, self))?;
            let measured = self.ruler_state.measurement();
            self.set_measurement(measured);

            if event::poll(self.frame)? {
                if let Event::Key(key) = event::read()? {
                    handle_key(self, key);
                }
            }

            self.poll_readings();

            let now = Instant::now();
            self.tick(now - last);
            last = now;

            if self.should_quit {
                break;
            }

            tokio::task::yield_now().await;
        }

        tracing::info!("Distance indicator stopped");
        Ok(())
    }
}

/// Leaves raw mode and the alternate screen. Both steps always run; the
/// first error wins.
fn restore_terminal() -> Result<()> {
    restore_with(terminal::disable_raw_mode, || {
        io::stdout().execute(LeaveAlternateScreen).map(|_| ())
    })
}

fn restore_with(
    disable_raw: impl FnOnce() -> io::Result<()>,
    leave_screen: impl FnOnce() -> io::Result<()>,
) -> Result<()> {
    let raw = disable_raw();
    let screen = leave_screen();
    raw?;
    screen?;
    Ok(())
}
