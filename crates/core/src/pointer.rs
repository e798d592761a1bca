//! Pointer input snapshots and the host-side collaborator traits.
//!
//! Device events are folded into a [`PointerState`] by whatever owns the
//! window. The simulation pulls one snapshot per tick through
//! [`InputSource::poll`], so input timing never leaks into step timing.

use serde::{Deserialize, Serialize};

use crate::vector::Vector2;

/// Pointer state as seen by one simulation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    /// Last known pointer position in canvas pixels.
    pub position: Vector2,
    /// Whether the pointer is over the canvas.
    pub hovering: bool,
    /// Whether the primary button is held.
    pub button_down: bool,
    /// One-shot request to create or remove an attractor at `position`.
    pub toggle: bool,
}

impl PointerState {
    /// A hovering pointer at `position` with no button held.
    pub fn hovering_at(position: Vector2) -> Self {
        Self {
            position,
            hovering: true,
            ..Self::default()
        }
    }

    /// Same state with the button held.
    pub fn pressed(self) -> Self {
        Self {
            button_down: true,
            ..self
        }
    }

    /// Same state with a toggle request attached.
    pub fn with_toggle(self) -> Self {
        Self {
            toggle: true,
            ..self
        }
    }
}

/// Supplies one pointer snapshot per tick.
pub trait InputSource {
    /// Returns the current pointer state. A pending toggle is reported once
    /// and cleared.
    fn poll(&mut self) -> PointerState;
}

/// Receives the live particle count for informational display.
pub trait DisplaySink {
    fn show_count(&mut self, count: usize);
}

/// Input source that always reports the same state, minus the toggle after
/// the first poll.
impl InputSource for PointerState {
    fn poll(&mut self) -> PointerState {
        let snapshot = *self;
        self.toggle = false;
        snapshot
    }
}

impl DisplaySink for Vec<usize> {
    fn show_count(&mut self, count: usize) {
        self.push(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pointer_is_idle_at_origin() {
        let p = PointerState::default();
        assert_eq!(p.position, Vector2::ZERO);
        assert!(!p.hovering && !p.button_down && !p.toggle);
    }

    #[test]
    fn builders_compose() {
        let p = PointerState::hovering_at(Vector2::new(3.0, 4.0))
            .pressed()
            .with_toggle();
        assert_eq!(p.position, Vector2::new(3.0, 4.0));
        assert!(p.hovering && p.button_down && p.toggle);
    }

    #[test]
    fn polling_a_state_consumes_the_toggle() {
        let mut source = PointerState::hovering_at(Vector2::new(1.0, 1.0)).with_toggle();
        assert!(source.poll().toggle);
        let second = source.poll();
        assert!(!second.toggle);
        assert!(second.hovering);
    }

    #[test]
    fn vec_sink_collects_counts() {
        let mut sink: Vec<usize> = Vec::new();
        sink.show_count(4);
        sink.show_count(8);
        assert_eq!(sink, vec![4, 8]);
    }
}
