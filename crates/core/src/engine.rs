//! The `Engine` trait: a tick-driven simulation that emits frames.
//!
//! The trait is object-safe so hosts can drive `dyn Engine` without knowing
//! the concrete simulation or its noise source.

use serde_json::Value;

use crate::draw::{Bounds, Frame};
use crate::pointer::PointerState;

/// A frame-driven simulation.
///
/// One call to [`step`](Engine::step) is one tick: it fully applies the
/// tick's state changes and returns the draw commands for it. Steps never
/// fail; bad numeric input degrades the picture, not the process.
pub trait Engine {
    /// Advances one tick using the given pointer snapshot.
    fn step(&mut self, pointer: &PointerState) -> Frame;

    /// Adopts a new canvas extent. Takes effect from the next step.
    fn resize(&mut self, bounds: Bounds);

    /// Number of completed ticks.
    fn tick(&self) -> u64;

    /// Live particle count.
    fn particle_count(&self) -> usize;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use serde_json::json;

    /// Counts ticks and reports the pointer's hover flag as its particle count.
    struct MockEngine {
        ticks: u64,
        last_hover: bool,
        resizes: usize,
    }

    impl Engine for MockEngine {
        fn step(&mut self, pointer: &PointerState) -> Frame {
            self.ticks += 1;
            self.last_hover = pointer.hovering;
            Frame {
                tick: self.ticks - 1,
                clear: Rgba::TRANSPARENT,
                commands: Vec::new(),
                particle_count: self.particle_count(),
            }
        }

        fn resize(&mut self, _bounds: Bounds) {
            self.resizes += 1;
        }

        fn tick(&self) -> u64 {
            self.ticks
        }

        fn particle_count(&self) -> usize {
            usize::from(self.last_hover)
        }

        fn params(&self) -> Value {
            json!({"ticks": self.ticks})
        }

        fn param_schema(&self) -> Value {
            json!({"ticks": {"type": "integer", "default": 0}})
        }
    }

    #[test]
    fn engine_trait_is_object_safe() {
        let mut engine: Box<dyn Engine> = Box::new(MockEngine {
            ticks: 0,
            last_hover: false,
            resizes: 0,
        });
        let frame = engine.step(&PointerState::default().with_toggle());
        assert_eq!(frame.tick, 0);
        assert_eq!(engine.tick(), 1);
    }

    #[test]
    fn step_sees_pointer_snapshot() {
        let mut engine = MockEngine {
            ticks: 0,
            last_hover: false,
            resizes: 0,
        };
        let pointer = PointerState::hovering_at(crate::vector::Vector2::new(1.0, 2.0));
        let frame = engine.step(&pointer);
        assert_eq!(frame.particle_count, 1);
        assert_eq!(engine.params()["ticks"], 1);
        assert_eq!(engine.param_schema()["ticks"]["type"], "integer");
    }

    #[test]
    fn resize_reaches_the_engine() {
        let mut engine = MockEngine {
            ticks: 0,
            last_hover: false,
            resizes: 0,
        };
        {
            let dyn_engine: &mut dyn Engine = &mut engine;
            dyn_engine.resize(Bounds::new(10.0, 20.0).unwrap());
            dyn_engine.resize(Bounds::new(30.0, 20.0).unwrap());
        }
        assert_eq!(engine.resizes, 2);
        assert_eq!(engine.tick(), 0);
    }
}
