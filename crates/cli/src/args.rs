//! Value parsers for the scripted-pointer flags.
//!
//! Each returns `Result<_, String>` so clap reports the message verbatim.

use std::ops::Range;

use flowfield_core::vector::Vector2;

/// Parses `X,Y` into a point.
pub fn parse_point(s: &str) -> Result<Vector2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate {v:?} in {s:?}: {e}"))
    };
    Ok(Vector2::new(coord(x)?, coord(y)?))
}

/// Parses `A..B` into a half-open tick range.
pub fn parse_ticks(s: &str) -> Result<Range<u64>, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected A..B, got {s:?}"))?;
    let tick = |v: &str| {
        v.trim()
            .parse::<u64>()
            .map_err(|e| format!("bad tick {v:?} in {s:?}: {e}"))
    };
    let range = tick(start)?..tick(end)?;
    if range.is_empty() {
        return Err(format!("empty tick range {s:?}"));
    }
    Ok(range)
}

/// Parses `TICK:X,Y` into a scheduled toggle.
pub fn parse_toggle(s: &str) -> Result<(u64, Vector2), String> {
    let (tick, point) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TICK:X,Y, got {s:?}"))?;
    let tick = tick
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("bad tick in {s:?}: {e}"))?;
    Ok((tick, parse_point(point)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_accepts_spaces_and_decimals() {
        assert_eq!(parse_point("320, 240.5"), Ok(Vector2::new(320.0, 240.5)));
    }

    #[test]
    fn point_rejects_missing_axis() {
        assert!(parse_point("320").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn ticks_parse_half_open() {
        assert_eq!(parse_ticks("10..20"), Ok(10..20));
        assert!(parse_ticks("20..10").is_err());
        assert!(parse_ticks("10-20").is_err());
    }

    #[test]
    fn toggle_splits_tick_and_point() {
        assert_eq!(parse_toggle("5:10,20"), Ok((5, Vector2::new(10.0, 20.0))));
        assert!(parse_toggle("5:10").is_err());
        assert!(parse_toggle("x:10,20").is_err());
    }
}
