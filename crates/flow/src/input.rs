//! A pointer source replayed from a fixed script, for headless runs.

use std::ops::Range;

use flowfield_core::pointer::{InputSource, PointerState};
use flowfield_core::vector::Vector2;

/// Replays a scripted pointer over successive polls.
///
/// Each poll advances an internal tick counter. The pointer hovers at a
/// fixed position (or not at all), holds the button during an optional tick
/// range, and issues attractor toggles at listed ticks. A toggle moves the
/// reported position to its own point for that tick only.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    hover: Option<Vector2>,
    press: Option<Range<u64>>,
    toggles: Vec<(u64, Vector2)>,
    tick: u64,
}

impl ScriptedInput {
    /// A pointer that never hovers, presses, or toggles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hover at `position` on every tick.
    pub fn hovering_at(mut self, position: Vector2) -> Self {
        self.hover = Some(position);
        self
    }

    /// Hold the button for ticks in `ticks`.
    pub fn pressed_during(mut self, ticks: Range<u64>) -> Self {
        self.press = Some(ticks);
        self
    }

    /// Request an attractor toggle at `position` on tick `tick`.
    pub fn toggle_at(mut self, tick: u64, position: Vector2) -> Self {
        self.toggles.push((tick, position));
        self
    }

    /// Ticks polled so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> PointerState {
        let tick = self.tick;
        self.tick += 1;

        let mut state = match self.hover {
            Some(position) => PointerState::hovering_at(position),
            None => PointerState::default(),
        };
        state.button_down = self.press.as_ref().is_some_and(|r| r.contains(&tick));

        if let Some(&(_, position)) = self.toggles.iter().find(|(t, _)| *t == tick) {
            state.position = position;
            state.toggle = true;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_is_idle() {
        let mut input = ScriptedInput::new();
        for _ in 0..3 {
            assert_eq!(input.poll(), PointerState::default());
        }
        assert_eq!(input.tick(), 3);
    }

    #[test]
    fn press_range_is_half_open() {
        let mut input = ScriptedInput::new()
            .hovering_at(Vector2::new(5.0, 5.0))
            .pressed_during(1..3);
        let pressed: Vec<bool> = (0..4).map(|_| input.poll().button_down).collect();
        assert_eq!(pressed, vec![false, true, true, false]);
    }

    #[test]
    fn toggles_fire_once_at_their_position() {
        let hover = Vector2::new(10.0, 10.0);
        let target = Vector2::new(200.0, 150.0);
        let mut input = ScriptedInput::new()
            .hovering_at(hover)
            .toggle_at(1, target);

        let t0 = input.poll();
        assert!(!t0.toggle);
        assert_eq!(t0.position, hover);

        let t1 = input.poll();
        assert!(t1.toggle);
        assert_eq!(t1.position, target);
        assert!(t1.hovering);

        let t2 = input.poll();
        assert!(!t2.toggle);
        assert_eq!(t2.position, hover);
    }

    #[test]
    fn toggle_without_hover_keeps_hover_off() {
        let mut input = ScriptedInput::new().toggle_at(0, Vector2::new(1.0, 2.0));
        let state = input.poll();
        assert!(state.toggle);
        assert!(!state.hovering);
    }
}
