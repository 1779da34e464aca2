use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Length of one clock tick. Every tick is worth one second of game time.
pub const TICK_RATE_MS: u64 = 1000;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TimerEvent {
    Key(KeyEvent),
    Resize,
    /// The tick deadline passed while the clock was armed.
    Tick,
    /// Nothing happened within the poll window while the clock was disarmed.
    Idle,
    /// The event source hung up; the app should shut down.
    Closed,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait TimerEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TimerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(TimerEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(TimerEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn one_second() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TimerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TimerEvent>) -> Self {
        Self { rx }
    }
}

impl TimerEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TimerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time.
///
/// Ticks are only produced while the runner is armed. Arming schedules the
/// first tick one full interval out; disarming drops the deadline so a paused
/// clock never receives a stray tick. [`Runner::rearm`] restarts the interval
/// when the turn changes hands, so a fresh turn never inherits part of the
/// previous turn's second.
pub struct Runner<E: TimerEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Option<Instant>,
}

impl<E: TimerEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            next_tick: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn set_armed(&mut self, armed: bool) {
        match (armed, self.next_tick) {
            (true, None) => self.next_tick = Some(Instant::now() + self.ticker.interval()),
            (false, Some(_)) => self.next_tick = None,
            _ => {}
        }
    }

    /// Pushes a pending tick back to one full interval from now. No-op while
    /// disarmed.
    pub fn rearm(&mut self) {
        if self.next_tick.is_some() {
            self.next_tick = Some(Instant::now() + self.ticker.interval());
        }
    }

    /// Blocks until the next event or tick deadline and returns it.
    pub fn step(&mut self) -> TimerEvent {
        let Some(deadline) = self.next_tick else {
            return match self.event_source.recv_timeout(self.ticker.interval()) {
                Ok(ev) => ev,
                Err(RecvTimeoutError::Timeout) => TimerEvent::Idle,
                Err(RecvTimeoutError::Disconnected) => TimerEvent::Closed,
            };
        };

        let now = Instant::now();
        if now >= deadline {
            self.schedule_next(deadline);
            return TimerEvent::Tick;
        }

        match self.event_source.recv_timeout(deadline - now) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => {
                self.schedule_next(deadline);
                TimerEvent::Tick
            }
            Err(RecvTimeoutError::Disconnected) => TimerEvent::Closed,
        }
    }

    // Keeps a steady cadence; if the loop fell behind, the missed ticks
    // come back to back on the following steps.
    fn schedule_next(&mut self, deadline: Instant) {
        self.next_tick = Some(deadline + self.ticker.interval());
    }
}
