//! Host loop: poll input, step, render, report.

use flowfield_core::draw::{Bounds, Frame, Renderer};
use flowfield_core::engine::Engine;
use flowfield_core::pointer::{DisplaySink, InputSource};
use tracing::info;

/// The particle count is pushed to the display sink every this many ticks.
pub const COUNT_INTERVAL: u64 = 10;

/// Drives an [`Engine`] one tick at a time against its host collaborators.
///
/// The renderer's extent is checked every tick and handed to the engine
/// whenever it differs from the last one seen.
pub struct Driver<E, I, S> {
    engine: E,
    input: I,
    sink: S,
    bounds: Option<Bounds>,
}

impl<E: Engine, I: InputSource, S: DisplaySink> Driver<E, I, S> {
    /// Wraps an engine with its pointer source and count display.
    pub fn new(engine: E, input: I, sink: S) -> Self {
        Self {
            engine,
            input,
            sink,
            bounds: None,
        }
    }

    /// Runs one tick: syncs the canvas extent, polls the pointer, steps,
    /// replays the frame into `renderer`, and reports the count after every
    /// tenth step.
    pub fn tick<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Frame {
        let bounds = renderer.bounds();
        if self.bounds != Some(bounds) {
            self.engine.resize(bounds);
            self.bounds = Some(bounds);
        }

        let pointer = self.input.poll();
        let frame = self.engine.step(&pointer);
        frame.render_to(renderer);
        if (frame.tick + 1) % COUNT_INTERVAL == 0 {
            self.sink.show_count(frame.particle_count);
        }
        frame
    }

    /// Runs `ticks` ticks and returns the last frame, if any.
    pub fn run<R: Renderer + ?Sized>(&mut self, renderer: &mut R, ticks: u64) -> Option<Frame> {
        let mut last = None;
        for _ in 0..ticks {
            last = Some(self.tick(renderer));
        }
        last
    }

    /// The driven engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The count display.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Splits the driver back into engine, input and sink.
    pub fn into_parts(self) -> (E, I, S) {
        (self.engine, self.input, self.sink)
    }
}

/// Display sink that reports the particle count through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DisplaySink for LogSink {
    fn show_count(&mut self, count: usize) {
        info!(particles = count, "particle count");
    }
}
