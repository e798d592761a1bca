//! Helpers for reading options out of a JSON parameter object.
//!
//! Options follow merge semantics: a key only overrides its default when it
//! carries a *truthy* value of the right type. Missing keys, `null`,
//! `false`, `0`, `""`, and values of the wrong type all leave the default
//! in place. These never fail.

use serde_json::Value;

use crate::color::Rgba;

/// Returns `params[name]` if it is present and truthy.
pub fn truthy<'a>(params: &'a Value, name: &str) -> Option<&'a Value> {
    params.get(name).filter(|v| is_truthy(v))
}

/// JSON truthiness: everything except `null`, `false`, `0`, NaN and `""`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Extracts a truthy number as `f64`, or `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    truthy(params, name)
        .and_then(Value::as_f64)
        .unwrap_or(default)
}

/// Extracts a truthy non-negative integer as `usize`, or `default`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    truthy(params, name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a truthy CSS color string, or `default` if absent or unparseable.
pub fn param_color(params: &Value, name: &str, default: Rgba) -> Rgba {
    truthy(params, name)
        .and_then(Value::as_str)
        .and_then(|s| Rgba::parse_css(s).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_matches_merge_rules() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!(0.5), json!("x"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn param_f64_extracts_number() {
        let params = json!({"size": 3.5, "count": 10});
        assert_eq!(param_f64(&params, "size", 2.0), 3.5);
        assert_eq!(param_f64(&params, "count", 0.0), 10.0);
    }

    #[test]
    fn param_f64_ignores_zero_and_null() {
        let params = json!({"size": 0, "power": null});
        assert_eq!(param_f64(&params, "size", 2.0), 2.0);
        assert_eq!(param_f64(&params, "power", 30.0), 30.0);
    }

    #[test]
    fn param_f64_accepts_negative_numbers() {
        let params = json!({"power": -12.0});
        assert_eq!(param_f64(&params, "power", 30.0), -12.0);
    }

    #[test]
    fn param_f64_ignores_wrong_type_and_non_objects() {
        assert_eq!(param_f64(&json!({"size": "big"}), "size", 2.0), 2.0);
        assert_eq!(param_f64(&json!("nope"), "size", 2.0), 2.0);
    }

    #[test]
    fn param_usize_extracts_positive_integers_only() {
        let params = json!({"a": 42, "b": 0, "c": -1, "d": 2.5});
        assert_eq!(param_usize(&params, "a", 7), 42);
        assert_eq!(param_usize(&params, "b", 7), 7);
        assert_eq!(param_usize(&params, "c", 7), 7);
        assert_eq!(param_usize(&params, "d", 7), 7);
        assert_eq!(param_usize(&params, "missing", 7), 7);
    }

    #[test]
    fn param_color_parses_css() {
        let params = json!({"fill": "rgba(255,0,0,0.5)"});
        let c = param_color(&params, "fill", Rgba::BLACK);
        assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
    }

    #[test]
    fn param_color_falls_back_on_empty_or_invalid() {
        let params = json!({"a": "", "b": "not a color", "c": 12});
        assert_eq!(param_color(&params, "a", Rgba::WHITE), Rgba::WHITE);
        assert_eq!(param_color(&params, "b", Rgba::WHITE), Rgba::WHITE);
        assert_eq!(param_color(&params, "c", Rgba::WHITE), Rgba::WHITE);
    }
}
