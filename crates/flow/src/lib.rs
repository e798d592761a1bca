#![deny(unsafe_code)]
//! Flow-field particle simulation.
//!
//! Particles spawn at random, drift along a time-varying OpenSimplex field,
//! get pushed around by the pointer, and are pulled in and swallowed by
//! attractors that the pointer places and removes. Each tick produces a
//! [`Frame`](flowfield_core::draw::Frame) of line segments (particle trails)
//! followed by glowing circles (attractors).
//!
//! [`Simulation`] implements [`Engine`](flowfield_core::Engine); [`Driver`]
//! runs it against an input source, a renderer, and a count display.

pub mod config;
pub mod driver;
pub mod entity;
pub mod input;
pub mod simulation;

pub use config::FlowConfig;
pub use driver::{Driver, LogSink};
pub use entity::{Attractor, Particle};
pub use input::ScriptedInput;
pub use simulation::{Simulation, ToggleOutcome};
