use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Cadence of the session timer. One tick advances `elapsed_secs` by one.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Unified event type consumed by the app loop.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if one arrives before the timeout, or Err(Timeout)
    /// if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source backed by a crossterm reader thread.
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
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

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface.
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker. The production loop runs it at `TICK_INTERVAL`;
/// tests shrink the interval to keep runs fast.
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed event source for driving the loop without a terminal.
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the application one event at a time. Quiet stretches become
/// `Tick` events on a fixed cadence, which is the only clock the session
/// ever sees.
///
/// The tick deadline is tracked across steps: incoming events do not push
/// it back, so a steady stream of keystrokes cannot starve the timer, and
/// time spent draining a burst of events is caught up tick by tick.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Blocks until the next event or the tick deadline, whichever comes
    /// first. Queued events win over an already-due tick.
    pub fn step(&mut self) -> AppEvent {
        let wait = self.next_tick.saturating_duration_since(Instant::now());

        match self.event_source.recv_timeout(wait) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.emit_tick(),
            Err(RecvTimeoutError::Disconnected) => {
                // A dead source still ticks, it just has nothing to say.
                std::thread::sleep(wait);
                self.emit_tick()
            }
        }
    }

    /// Re-arm the cadence so the next tick lands one full interval from
    /// now. Called when a session activates: its first elapsed second
    /// starts counting at the first keystroke, not at process start.
    pub fn restart_tick(&mut self) {
        self.next_tick = Instant::now() + self.ticker.interval();
    }

    fn emit_tick(&mut self) -> AppEvent {
        self.next_tick += self.ticker.interval();
        AppEvent::Tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let mut runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            AppEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        tx.send(AppEvent::Tick).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(100));
        let mut runner = Runner::new(es, ticker);

        match runner.step() {
            AppEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
        match runner.step() {
            AppEvent::Tick => {}
            _ => panic!("expected queued Tick event"),
        }
    }

    #[test]
    fn events_do_not_push_back_the_tick_deadline() {
        let (tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(20));
        let mut runner = Runner::new(es, ticker);

        // Let the deadline pass while an event is queued.
        std::thread::sleep(Duration::from_millis(25));
        tx.send(AppEvent::Resize).unwrap();

        match runner.step() {
            AppEvent::Resize => {}
            _ => panic!("queued event should win over a due tick"),
        }

        // The tick was due before the event arrived; with the queue empty
        // it fires without waiting another interval.
        let start = Instant::now();
        match runner.step() {
            AppEvent::Tick => {}
            _ => panic!("expected the overdue Tick"),
        }
        assert!(start.elapsed() < Duration::from_millis(15));
    }

    #[test]
    fn restart_tick_defers_the_next_tick() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(20));
        let mut runner = Runner::new(es, ticker);

        // Deadline long gone, but a restart re-arms a full interval.
        std::thread::sleep(Duration::from_millis(25));
        runner.restart_tick();

        let start = Instant::now();
        match runner.step() {
            AppEvent::Tick => {}
            _ => panic!("expected Tick"),
        }
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn default_ticker_runs_at_one_second() {
        assert_eq!(FixedTicker::default().interval(), Duration::from_secs(1));
    }
}
