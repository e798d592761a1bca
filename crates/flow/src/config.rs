//! Simulation options.
//!
//! [`FlowConfig`] is a plain record of tunables. It is built from defaults
//! merged with a JSON object; any key that is missing, falsy, or of the
//! wrong type keeps its default, so construction never fails.

use flowfield_core::color::Rgba;
use flowfield_core::params::{param_color, param_f64, param_usize, truthy};
use flowfield_core::vector::Vector2;
use serde_json::{json, Value};

/// Default canvas fill painted each tick; its alpha sets trail length.
pub const DEFAULT_FILL: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.6);
/// Default particle stroke width, also the off-screen culling margin.
pub const DEFAULT_SIZE: f64 = 2.0;
/// Default per-axis field speed.
pub const DEFAULT_SPEED: f64 = 8.0;
/// Default particle capacity.
pub const DEFAULT_MAX_COUNT: usize = 2000;
/// Default number of particles spawned each tick.
pub const DEFAULT_SPAWN_PER_TICK: usize = 2;
/// Default pointer influence radius.
pub const DEFAULT_MOUSE_THRESHOLD: f64 = 200.0;
/// Default pointer force magnitude.
pub const DEFAULT_MOUSE_POWER: f64 = 30.0;
/// Default maximum attractor influence radius.
pub const DEFAULT_ATTRACTOR_THRESHOLD: f64 = 300.0;
/// Default attractor pull magnitude.
pub const DEFAULT_ATTRACTOR_POWER: f64 = 30.0;
/// Default maximum attractor radius as drawn.
pub const DEFAULT_ATTRACTOR_SIZE: f64 = 12.0;
/// Default attractor fill.
pub const DEFAULT_ATTRACTOR_COLOR: Rgba = Rgba::new(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0, 0.4);
/// Default attractor capacity.
pub const DEFAULT_MAX_ATTRACTORS: usize = 12;

/// Tunables for one simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowConfig {
    /// Fill painted over the canvas at the start of each frame.
    pub fill: Rgba,
    /// Particle stroke width.
    pub size: f64,
    /// Field-force target speed per axis.
    pub speed: Vector2,
    /// Maximum live particles after a step.
    pub max_count: usize,
    /// Particles spawned at the start of every step.
    pub spawn_per_tick: usize,
    /// Radius within which a hovering pointer affects particles.
    pub mouse_threshold: f64,
    /// Pointer force magnitude. The sign is runtime state on the simulation.
    pub mouse_power: f64,
    /// Influence radius an attractor grows to.
    pub attractor_threshold: f64,
    /// Attractor pull magnitude.
    pub attractor_power: f64,
    /// Radius an attractor grows to.
    pub attractor_size: f64,
    /// Attractor fill.
    pub attractor_color: Rgba,
    /// Maximum live attractors.
    pub max_attractors: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL,
            size: DEFAULT_SIZE,
            speed: Vector2::splat(DEFAULT_SPEED),
            max_count: DEFAULT_MAX_COUNT,
            spawn_per_tick: DEFAULT_SPAWN_PER_TICK,
            mouse_threshold: DEFAULT_MOUSE_THRESHOLD,
            mouse_power: DEFAULT_MOUSE_POWER,
            attractor_threshold: DEFAULT_ATTRACTOR_THRESHOLD,
            attractor_power: DEFAULT_ATTRACTOR_POWER,
            attractor_size: DEFAULT_ATTRACTOR_SIZE,
            attractor_color: DEFAULT_ATTRACTOR_COLOR,
            max_attractors: DEFAULT_MAX_ATTRACTORS,
        }
    }
}

impl FlowConfig {
    /// Merges `params` over the defaults.
    pub fn from_json(params: &Value) -> Self {
        Self::default().merge(params)
    }

    /// Returns a copy with every truthy, well-typed key of `params` applied.
    ///
    /// `speed` may be a number (both axes) or an object with `x` and/or `y`.
    pub fn merge(&self, params: &Value) -> Self {
        let speed = match truthy(params, "speed") {
            Some(Value::Object(_)) => {
                let axes = &params["speed"];
                Vector2::new(
                    param_f64(axes, "x", self.speed.x),
                    param_f64(axes, "y", self.speed.y),
                )
            }
            Some(v) => v.as_f64().map(Vector2::splat).unwrap_or(self.speed),
            None => self.speed,
        };

        Self {
            fill: param_color(params, "fill", self.fill),
            size: param_f64(params, "size", self.size),
            speed,
            max_count: param_usize(params, "max_count", self.max_count),
            spawn_per_tick: param_usize(params, "spawn_per_tick", self.spawn_per_tick),
            mouse_threshold: param_f64(params, "mouse_threshold", self.mouse_threshold),
            mouse_power: param_f64(params, "mouse_power", self.mouse_power),
            attractor_threshold: param_f64(params, "attractor_threshold", self.attractor_threshold),
            attractor_power: param_f64(params, "attractor_power", self.attractor_power),
            attractor_size: param_f64(params, "attractor_size", self.attractor_size),
            attractor_color: param_color(params, "attractor_color", self.attractor_color),
            max_attractors: param_usize(params, "max_attractors", self.max_attractors),
        }
    }

    /// Current values as a JSON object accepted by [`FlowConfig::from_json`].
    pub fn to_json(&self) -> Value {
        json!({
            "fill": self.fill.to_css(),
            "size": self.size,
            "speed": {"x": self.speed.x, "y": self.speed.y},
            "max_count": self.max_count,
            "spawn_per_tick": self.spawn_per_tick,
            "mouse_threshold": self.mouse_threshold,
            "mouse_power": self.mouse_power,
            "attractor_threshold": self.attractor_threshold,
            "attractor_power": self.attractor_power,
            "attractor_size": self.attractor_size,
            "attractor_color": self.attractor_color.to_css(),
            "max_attractors": self.max_attractors,
        })
    }

    /// Describes every option with its type, default, and meaning.
    pub fn schema() -> Value {
        json!({
            "fill": {
                "type": "color",
                "default": DEFAULT_FILL.to_css(),
                "description": "Fill painted over the canvas each tick; lower alpha gives longer trails"
            },
            "size": {
                "type": "number",
                "default": DEFAULT_SIZE,
                "min": 0.5,
                "max": 10.0,
                "description": "Particle stroke width and off-screen culling margin"
            },
            "speed": {
                "type": "object",
                "default": {"x": DEFAULT_SPEED, "y": DEFAULT_SPEED},
                "description": "Field-force target speed per axis (a number sets both)"
            },
            "max_count": {
                "type": "integer",
                "default": DEFAULT_MAX_COUNT,
                "min": 1,
                "max": 100_000,
                "description": "Maximum live particles; the oldest are evicted beyond this"
            },
            "spawn_per_tick": {
                "type": "integer",
                "default": DEFAULT_SPAWN_PER_TICK,
                "min": 1,
                "max": 1000,
                "description": "Particles spawned at random positions every tick"
            },
            "mouse_threshold": {
                "type": "number",
                "default": DEFAULT_MOUSE_THRESHOLD,
                "min": 0.0,
                "max": 2000.0,
                "description": "Radius within which a hovering pointer pushes particles"
            },
            "mouse_power": {
                "type": "number",
                "default": DEFAULT_MOUSE_POWER,
                "min": 0.0,
                "max": 200.0,
                "description": "Pointer force magnitude; holding the button reverses it"
            },
            "attractor_threshold": {
                "type": "number",
                "default": DEFAULT_ATTRACTOR_THRESHOLD,
                "min": 0.0,
                "max": 2000.0,
                "description": "Influence radius an attractor grows to"
            },
            "attractor_power": {
                "type": "number",
                "default": DEFAULT_ATTRACTOR_POWER,
                "min": 0.0,
                "max": 200.0,
                "description": "Attractor pull magnitude"
            },
            "attractor_size": {
                "type": "number",
                "default": DEFAULT_ATTRACTOR_SIZE,
                "min": 0.0,
                "max": 100.0,
                "description": "Radius an attractor grows to; toggles inside it remove the attractor"
            },
            "attractor_color": {
                "type": "color",
                "default": DEFAULT_ATTRACTOR_COLOR.to_css(),
                "description": "Attractor fill"
            },
            "max_attractors": {
                "type": "integer",
                "default": DEFAULT_MAX_ATTRACTORS,
                "min": 1,
                "max": 100,
                "description": "Maximum live attractors"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        assert_eq!(FlowConfig::from_json(&json!({})), FlowConfig::default());
    }

    #[test]
    fn non_object_json_gives_defaults() {
        assert_eq!(FlowConfig::from_json(&json!(null)), FlowConfig::default());
        assert_eq!(FlowConfig::from_json(&json!([1, 2])), FlowConfig::default());
    }

    #[test]
    fn defaults_match_documented_values() {
        let c = FlowConfig::default();
        assert_eq!(c.size, 2.0);
        assert_eq!(c.speed, Vector2::new(8.0, 8.0));
        assert_eq!(c.max_count, 2000);
        assert_eq!(c.spawn_per_tick, 2);
        assert_eq!(c.mouse_threshold, 200.0);
        assert_eq!(c.mouse_power, 30.0);
        assert_eq!(c.attractor_threshold, 300.0);
        assert_eq!(c.attractor_power, 30.0);
        assert_eq!(c.attractor_size, 12.0);
        assert_eq!(c.max_attractors, 12);
        assert_eq!(c.fill.to_css(), "rgba(0,0,0,0.6)");
        assert_eq!(c.attractor_color.to_css(), "rgba(10,10,10,0.4)");
    }

    #[test]
    fn truthy_values_override() {
        let c = FlowConfig::from_json(&json!({
            "size": 3,
            "max_count": 50,
            "mouse_power": 12.5,
            "attractor_color": "rgba(255,0,0,1)",
            "max_attractors": 3,
        }));
        assert_eq!(c.size, 3.0);
        assert_eq!(c.max_count, 50);
        assert_eq!(c.mouse_power, 12.5);
        assert_eq!(c.attractor_color.to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(c.max_attractors, 3);
    }

    #[test]
    fn falsy_values_are_ignored() {
        let c = FlowConfig::from_json(&json!({
            "size": 0,
            "max_count": 0,
            "fill": "",
            "mouse_power": null,
            "attractor_size": false,
        }));
        assert_eq!(c, FlowConfig::default());
    }

    #[test]
    fn wrong_types_are_ignored() {
        let c = FlowConfig::from_json(&json!({
            "size": "large",
            "max_count": 12.5,
            "fill": 7,
            "attractor_color": "chartreuse-ish",
        }));
        assert_eq!(c, FlowConfig::default());
    }

    #[test]
    fn speed_accepts_object_or_number() {
        let c = FlowConfig::from_json(&json!({"speed": {"x": 3, "y": 0}}));
        assert_eq!(c.speed, Vector2::new(3.0, DEFAULT_SPEED));
        let c = FlowConfig::from_json(&json!({"speed": 5}));
        assert_eq!(c.speed, Vector2::new(5.0, 5.0));
        let c = FlowConfig::from_json(&json!({"speed": "fast"}));
        assert_eq!(c.speed, Vector2::splat(DEFAULT_SPEED));
    }

    #[test]
    fn merge_keeps_prior_values_not_defaults() {
        let base = FlowConfig::from_json(&json!({"size": 4}));
        let merged = base.merge(&json!({"size": 0, "max_count": 10}));
        assert_eq!(merged.size, 4.0);
        assert_eq!(merged.max_count, 10);
    }

    #[test]
    fn to_json_round_trips() {
        let c = FlowConfig::from_json(&json!({
            "size": 1.5,
            "speed": {"x": 2, "y": 6},
            "max_count": 300,
            "fill": "rgba(0,0,0,0.25)",
        }));
        assert_eq!(FlowConfig::from_json(&c.to_json()), c);
    }

    #[test]
    fn schema_covers_every_json_key() {
        let schema = FlowConfig::schema();
        let values = FlowConfig::default().to_json();
        for key in values.as_object().unwrap().keys() {
            let entry = &schema[key.as_str()];
            assert!(entry.get("type").is_some(), "{key} missing 'type'");
            assert!(entry.get("default").is_some(), "{key} missing 'default'");
            assert!(entry.get("description").is_some(), "{key} missing 'description'");
        }
    }
}
