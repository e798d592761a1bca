//! The per-tick particle and attractor step.
//!
//! A step runs in a fixed order:
//!
//! 1. spawn `spawn_per_tick` particles at random in-bounds positions;
//! 2. for every particle, blend its velocity toward the field, pointer and
//!    attractor targets, integrate once, and cull it if it left the canvas
//!    or was swallowed;
//! 3. evict the oldest particles beyond `max_count`;
//! 4. resolve a pending attractor toggle, grow every attractor, and emit
//!    one circle each.
//!
//! Particles are moved out of the simulation for the pass and only the
//! survivors are moved back.

use std::f64::consts::TAU;

use flowfield_core::color::Hsla;
use flowfield_core::draw::{BlendMode, Bounds, DrawCommand, Frame, Glow};
use flowfield_core::engine::Engine;
use flowfield_core::error::EngineError;
use flowfield_core::noise_field::{NoiseField, SimplexNoise};
use flowfield_core::pointer::PointerState;
use flowfield_core::prng::Xorshift64;
use flowfield_core::vector::{Vector2, VectorExt};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::FlowConfig;
use crate::entity::{Attractor, Particle};

/// Blend factor toward the field target velocity.
pub const FIELD_BLEND: f64 = 0.0125;
/// Blend factor toward the pointer target velocity.
pub const POINTER_BLEND: f64 = 0.0125;
/// Blend factor toward an attractor's target velocity.
pub const ATTRACTOR_BLEND: f64 = 0.0075;
/// Particles closer than this to a hovering pointer are removed.
pub const POINTER_KILL_RADIUS: f64 = 1.0;
/// Particles closer than this to an attractor (inside its threshold) are removed.
pub const ATTRACTOR_KILL_RADIUS: f64 = 2.0;

const FIELD_SCALE_X: f64 = 0.0015;
const FIELD_SCALE_Y: f64 = 0.0025;
const FIELD_TIME_SCALE: f64 = 0.0015;
/// Keeps the field from collapsing to a single point when the pointer sits at the origin.
const POINTER_BIAS: f64 = 0.1;

const HUE_BASE: f64 = 160.0;
const HUE_RANGE: f64 = 90.0;
const PARTICLE_SATURATION: f64 = 1.0;
const PARTICLE_LIGHTNESS: f64 = 0.6;
const GLOW_SATURATION: f64 = 0.5;
const GLOW_LIGHTNESS: f64 = 0.5;
const GLOW_BLUR_MIN: f64 = 4.0;
const GLOW_BLUR_MAX: f64 = 22.0;

/// Result of a toggle request at a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A new attractor was placed at the pointer.
    Created,
    /// The pointer was inside an existing attractor, which was removed.
    Removed,
    /// Nothing was hit and the attractor capacity is full.
    AtCapacity,
    /// The position was not finite; nothing changed.
    Ignored,
}

/// Maps a noise value to the hue used for both particles and attractor glows.
fn hue_for(noise: f64) -> f64 {
    HUE_RANGE * noise.abs() + HUE_BASE
}

/// Flow-field particle simulation.
///
/// Owns its particles, attractors, config, noise source and PRNG. The
/// pointer is borrowed per step. The signed pointer power flips once per
/// button transition: positive pushes particles away from the pointer,
/// negative draws them in.
pub struct Simulation<N = SimplexNoise> {
    config: FlowConfig,
    bounds: Bounds,
    noise: N,
    rng: Xorshift64,
    particles: Vec<Particle>,
    attractors: Vec<Attractor>,
    pointer_power: f64,
    button_was_down: bool,
    tick: u64,
}

impl Simulation<SimplexNoise> {
    /// Creates a simulation with OpenSimplex noise.
    ///
    /// The noise seed is derived from `seed`, so a run is reproducible from
    /// `(config, bounds, seed)` and the pointer input.
    pub fn new(config: FlowConfig, bounds: Bounds, seed: u64) -> Self {
        let mut rng = Xorshift64::new(seed);
        let noise = SimplexNoise::new(rng.next_u32());
        Self::from_parts(config, bounds, noise, rng)
    }

    /// Creates a simulation from a JSON params object, falling back to
    /// defaults for missing or falsy keys.
    ///
    /// Returns `EngineError::InvalidDimensions` if the canvas size is not
    /// positive and finite.
    pub fn from_json(
        width: f64,
        height: f64,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        let bounds = Bounds::new(width, height)?;
        Ok(Self::new(FlowConfig::from_json(params), bounds, seed))
    }
}

impl<N: NoiseField> Simulation<N> {
    /// Creates a simulation driven by a caller-supplied noise field.
    pub fn with_noise(config: FlowConfig, bounds: Bounds, noise: N, seed: u64) -> Self {
        Self::from_parts(config, bounds, noise, Xorshift64::new(seed))
    }

    fn from_parts(config: FlowConfig, bounds: Bounds, noise: N, rng: Xorshift64) -> Self {
        let pointer_power = config.mouse_power.abs();
        Self {
            config,
            bounds,
            noise,
            rng,
            particles: Vec::new(),
            attractors: Vec::new(),
            pointer_power,
            button_was_down: false,
            tick: 0,
        }
    }

    /// The options this simulation was built with.
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Current canvas extent used for spawning, culling and field stretch.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Live particles, oldest first.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Live attractors, oldest first.
    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    /// Signed pointer force magnitude currently in effect.
    pub fn pointer_power(&self) -> f64 {
        self.pointer_power
    }

    /// Updates the canvas size. Particles now outside it are culled on the next step.
    pub fn resize(&mut self, bounds: Bounds) {
        debug!(
            width = bounds.width(),
            height = bounds.height(),
            "canvas resized"
        );
        self.bounds = bounds;
    }

    /// Adds a particle, e.g. to seed a scene. It is the newest particle.
    pub fn insert_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Removes the newest attractor whose drawn radius contains `at`, or
    /// else places a new one there if capacity allows. Never both.
    ///
    /// A non-finite position changes nothing and returns `Ignored`.
    pub fn toggle_attractor(&mut self, at: Vector2) -> ToggleOutcome {
        if !at.is_finite() {
            debug!("toggle at non-finite position ignored");
            return ToggleOutcome::Ignored;
        }

        let hit = self
            .attractors
            .iter()
            .rposition(|a| at.distance_to(a.position) < a.size);

        if let Some(index) = hit {
            let removed = self.attractors.remove(index);
            debug!(
                x = removed.position.x,
                y = removed.position.y,
                remaining = self.attractors.len(),
                "attractor removed"
            );
            ToggleOutcome::Removed
        } else if self.attractors.len() < self.config.max_attractors {
            self.attractors.push(Attractor::at(at));
            debug!(
                x = at.x,
                y = at.y,
                count = self.attractors.len(),
                "attractor created"
            );
            ToggleOutcome::Created
        } else {
            debug!(max = self.config.max_attractors, "attractor capacity reached");
            ToggleOutcome::AtCapacity
        }
    }

    /// Runs one tick and returns its frame.
    pub fn advance(&mut self, pointer: &PointerState) -> Frame {
        self.spawn();
        self.update_polarity(pointer.button_down);

        let mut commands = Vec::with_capacity(self.particles.len() + self.attractors.len() + 1);
        self.advance_particles(pointer, &mut commands);
        self.advance_attractors(pointer, &mut commands);

        let frame = Frame {
            tick: self.tick,
            clear: self.config.fill,
            commands,
            particle_count: self.particles.len(),
        };
        self.tick += 1;
        frame
    }

    fn spawn(&mut self) {
        for _ in 0..self.config.spawn_per_tick {
            let position = self.rng.next_point(self.bounds);
            self.particles.push(Particle::at(position));
        }
    }

    /// Applies a button transition to the pointer power, once per edge.
    fn update_polarity(&mut self, button_down: bool) {
        if button_down == self.button_was_down {
            return;
        }
        self.button_was_down = button_down;
        let magnitude = self.config.mouse_power.abs();
        self.pointer_power = if button_down { -magnitude } else { magnitude };
        debug!(power = self.pointer_power, "pointer polarity changed");
    }

    /// Field value at `at`, stretched by the pointer's relative position.
    fn field_sample(&self, at: Vector2, pointer: Vector2) -> f64 {
        let stretch_x = pointer.x / self.bounds.width() + POINTER_BIAS;
        let stretch_y = pointer.y / self.bounds.height() + POINTER_BIAS;
        self.noise.sample3(
            at.x * FIELD_SCALE_X * stretch_x,
            at.y * FIELD_SCALE_Y * stretch_y,
            self.tick as f64 * FIELD_TIME_SCALE,
        )
    }

    fn advance_particles(&mut self, pointer: &PointerState, commands: &mut Vec<DrawCommand>) {
        let particles = std::mem::take(&mut self.particles);
        let mut survivors = Vec::with_capacity(particles.len());
        let mut segments = Vec::with_capacity(particles.len());

        for mut particle in particles {
            if let Some(noise) = self.advance_particle(&mut particle, pointer) {
                segments.push(self.segment(&particle, noise));
                survivors.push(particle);
            }
        }

        let excess = survivors.len().saturating_sub(self.config.max_count);
        if excess > 0 {
            trace!(excess, max = self.config.max_count, "evicting oldest particles");
            survivors.drain(..excess);
            segments.drain(..excess);
        }

        self.particles = survivors;
        commands.extend(segments);
    }

    /// Moves one particle through the tick. Returns the field value it
    /// sampled if it survives, `None` if it must be removed.
    fn advance_particle(&self, particle: &mut Particle, pointer: &PointerState) -> Option<f64> {
        let margin = self.config.size;
        if !self.bounds.contains(particle.position, margin) {
            return None;
        }

        particle.last_position = particle.position;

        let noise = self.field_sample(particle.position, pointer.position);
        let field_target = Vector2::from_polar(noise * TAU, self.config.speed);
        particle.velocity.lerp_toward(field_target, FIELD_BLEND);

        if pointer.hovering {
            let distance = pointer.position.distance_to(particle.position);
            if distance < self.config.mouse_threshold {
                if distance < POINTER_KILL_RADIUS {
                    return None;
                }
                let away = pointer.position.heading_to(particle.position);
                let target = Vector2::from_polar(away, Vector2::splat(self.pointer_power));
                particle.velocity.lerp_toward(target, POINTER_BLEND);
            }
        }

        for attractor in &self.attractors {
            let distance = particle.position.distance_to(attractor.position);
            if distance < attractor.threshold {
                if distance < ATTRACTOR_KILL_RADIUS {
                    return None;
                }
                let inward = particle.position.heading_to(attractor.position);
                let target =
                    Vector2::from_polar(inward, Vector2::splat(self.config.attractor_power));
                particle.velocity.lerp_toward(target, ATTRACTOR_BLEND);
            }
        }

        particle.position += particle.velocity;

        self.bounds
            .contains(particle.position, margin)
            .then_some(noise)
    }

    fn segment(&self, particle: &Particle, noise: f64) -> DrawCommand {
        let color = Hsla::new(hue_for(noise), PARTICLE_SATURATION, PARTICLE_LIGHTNESS, 1.0);
        DrawCommand::Line {
            from: particle.last_position,
            to: particle.position,
            color: color.to_rgba(),
            width: self.config.size,
            blend: BlendMode::Additive,
        }
    }

    fn advance_attractors(&mut self, pointer: &PointerState, commands: &mut Vec<DrawCommand>) {
        if pointer.toggle {
            self.toggle_attractor(pointer.position);
        }

        let (max_size, max_threshold) = (self.config.attractor_size, self.config.attractor_threshold);
        for attractor in &mut self.attractors {
            attractor.grow(max_size, max_threshold);
        }

        for i in 0..self.attractors.len() {
            let attractor = self.attractors[i];
            let noise = self.field_sample(attractor.position, pointer.position);
            let glow = Glow {
                color: Hsla::new(hue_for(noise), GLOW_SATURATION, GLOW_LIGHTNESS, 1.0).to_rgba(),
                blur: self.rng.next_range(GLOW_BLUR_MIN, GLOW_BLUR_MAX),
            };
            commands.push(DrawCommand::Arc {
                center: attractor.position,
                radius: attractor.size,
                fill: self.config.attractor_color,
                stroke: None,
                glow: Some(glow),
            });
        }
    }
}

impl<N: NoiseField> Engine for Simulation<N> {
    fn step(&mut self, pointer: &PointerState) -> Frame {
        self.advance(pointer)
    }

    fn resize(&mut self, bounds: Bounds) {
        Simulation::resize(self, bounds);
    }

    fn tick(&self) -> u64 {
        self.tick
    }

    fn particle_count(&self) -> usize {
        self.particles.len()
    }

    fn params(&self) -> Value {
        self.config.to_json()
    }

    fn param_schema(&self) -> Value {
        FlowConfig::schema()
    }
}
