//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! Drawing takes `&mut self` because a render is not free of state: every
//! composed frame advances the light flicker and the random source.

use std::error::Error;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::frame::Frame;
use crate::geom::Viewport;
use crate::messages::Msg;
use crate::recording::FrameRecorder;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// Cooperative stop flag shared between the loop and the driver.
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Ring the terminal bell `n` times.
    Bell(u8),
    /// Several effects, applied in order.
    Batch(Vec<Effect>),
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model.
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Compose the next frame for a viewport of the given size.
    fn draw(&mut self, viewport: Viewport) -> Frame;
}

/// Back-end that owns the screen and the input source.
pub trait Driver {
    /// Prepare the screen.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Push any pending input into `tx`. Should return promptly, sending
    /// [`Msg::Tick`] when nothing arrived within the tick interval.
    fn poll_msgs(&mut self, ctx: &Context, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>>;

    /// Current screen size.
    fn viewport(&mut self) -> Result<Viewport, Box<dyn Error>>;

    /// Draw a complete frame.
    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>>;

    /// Ring the bell `count` times.
    fn bell(&mut self, count: u8) -> Result<(), Box<dyn Error>>;

    /// Restore the screen. Must be safe to call more than once.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    /// Optional transcript of every flushed frame.
    pub frame_writer: Option<Box<dyn Write>>,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    recorder: Option<FrameRecorder<Box<dyn Write>>>,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            recorder: config.frame_writer.map(FrameRecorder::new),
        }
    }

    /// Run the loop: poll -> update -> draw -> flush, until the model
    /// returns [`Effect::End`] or the driver fails.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let result = self.run_loop();
        self.driver.close();
        result
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();

        tx.send(Msg::Init).ok();
        self.process_pending(&rx, &ctx)?;

        while !ctx.is_done() {
            self.driver.poll_msgs(&ctx, &tx)?;
            if ctx.is_done() {
                break;
            }
            self.process_pending(&rx, &ctx)?;
        }
        Ok(())
    }

    /// Drain queued messages, update the model, then draw once.
    fn process_pending(&mut self, rx: &Receiver<Msg>, ctx: &Context) -> Result<(), Box<dyn Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Some(effect) = self.model.update(msg) {
                if self.handle_effect(effect, ctx)? {
                    return Ok(());
                }
            }
            needs_draw = true;
        }

        if needs_draw {
            let viewport = self.driver.viewport()?;
            let frame = self.model.draw(viewport);
            self.driver.flush(&frame)?;
            if let Some(rec) = &mut self.recorder {
                rec.record(&frame)?;
            }
        }
        Ok(())
    }

    /// Returns `true` if the app should stop.
    fn handle_effect(&mut self, effect: Effect, ctx: &Context) -> Result<bool, Box<dyn Error>> {
        match effect {
            Effect::End => {
                ctx.cancel();
                Ok(true)
            }
            Effect::Bell(n) => {
                self.driver.bell(n)?;
                Ok(false)
            }
            Effect::Batch(effects) => {
                for e in effects {
                    if self.handle_effect(e, ctx)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}
