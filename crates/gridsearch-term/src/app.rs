//! The Model-View-Update loop: [`Model`], [`Driver`], [`Effect`], [`App`].
//!
//! The loop polls the driver for input, feeds every message to the model,
//! redraws into a [`Canvas`] and flushes only the cells that changed. A
//! model that wants to animate returns a [`Model::tick_interval`] and gets a
//! [`Msg::Tick`] each time it elapses.

use std::error::Error;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::canvas::{Canvas, Frame, Glyph};
use crate::messages::Msg;

/// Poll timeout while the model does not want ticks.
pub const IDLE_POLL: Duration = Duration::from_millis(50);

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deliver a follow-up message after the current one.
    Msg(Msg),
    /// Several effects, applied in order.
    Batch(Vec<Effect>),
    /// Stop the application loop.
    End,
}

/// Application state driven by messages.
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `canvas`.
    fn draw(&self, canvas: &mut Canvas);

    /// How often the model wants a [`Msg::Tick`]; `None` disables ticks.
    fn tick_interval(&self) -> Option<Duration> {
        None
    }
}

/// A screen and input back-end.
pub trait Driver {
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait at most `timeout` for input and send whatever arrived through
    /// `tx`. Returning early with nothing sent is fine.
    fn poll_msgs(&mut self, timeout: Duration, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>>;

    /// Put the changed cells on screen.
    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>>;

    /// Restore the screen. Called once, also after errors.
    fn close(&mut self);
}

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub rows: i32,
    pub cols: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    rows: i32,
    cols: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            rows: config.rows,
            cols: config.cols,
        }
    }

    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run until the model returns [`Effect::End`]. The driver is closed on
    /// every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let (tx, rx) = mpsc::channel();
        tx.send(Msg::Init)?;

        let mut prev = Canvas::new(self.rows, self.cols);
        let mut curr = prev.clone();
        let mut next_tick: Option<Instant> = None;

        loop {
            if self.process_pending(&rx, &tx, &mut prev, &mut curr)? {
                return Ok(());
            }

            let now = Instant::now();
            let timeout = match self.model.tick_interval() {
                Some(interval) => {
                    let due = *next_tick.get_or_insert(now + interval);
                    if now >= due {
                        next_tick = Some(now + interval);
                        tx.send(Msg::Tick)?;
                        continue;
                    }
                    due - now
                }
                None => {
                    next_tick = None;
                    IDLE_POLL
                }
            };
            self.driver.poll_msgs(timeout, &tx)?;
        }
    }

    /// Drain queued messages, then redraw and flush the diff if anything was
    /// processed. Returns `true` once the model asked to stop.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        tx: &Sender<Msg>,
        prev: &mut Canvas,
        curr: &mut Canvas,
    ) -> Result<bool, Box<dyn Error>> {
        let mut dirty = false;
        while let Ok(msg) = rx.try_recv() {
            if matches!(msg, Msg::Screen { .. }) {
                // The driver cleared the screen.
                prev.fill(Glyph::default());
            }
            dirty = true;
            if let Some(effect) = self.model.update(msg) {
                if apply(effect, tx)? {
                    return Ok(true);
                }
            }
        }

        if dirty {
            self.model.draw(curr);
            let frame = curr.diff(prev);
            if !frame.is_empty() {
                self.driver.flush(&frame)?;
            }
            prev.copy_from(curr);
        }
        Ok(false)
    }
}

/// Returns `true` if the app should stop.
fn apply(effect: Effect, tx: &Sender<Msg>) -> Result<bool, Box<dyn Error>> {
    match effect {
        Effect::End => Ok(true),
        Effect::Msg(msg) => {
            tx.send(msg)?;
            Ok(false)
        }
        Effect::Batch(effects) => {
            for e in effects {
                if apply(e, tx)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}
