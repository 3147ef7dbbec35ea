//! Parsers for the CSS color and linear-gradient text the engine consumes.
//!
//! Parsing never fails loudly. Anything that is not a recognizable color is
//! "no color" (`None`) and is left alone by the simulation; anything that is
//! not a recognizable linear gradient yields `None` as well.
//!
//! Recognized inputs:
//!
//! ```text
//! color     rgb(R, G, B) | rgba(R, G, B, A) | transparent | ""
//! gradient  [repeating-]linear-gradient([<direction>,] <stop>[, <stop>]*)
//! stop      <color>[ <position>]      position: N% | Npx
//! ```

use crate::color::rgb::{Rgb, sanitize};
use crate::gradient::{ColorStop, Gradient};

const LINEAR_GRADIENT: &str = "linear-gradient";
const REPEATING_PREFIX: &str = "repeating-";

/// Parse a solid color.
///
/// Finds the first `rgb(...)` or `rgba(...)` function anywhere in `s`, so a
/// color embedded in a larger value (such as a shadow list) is still found.
/// Channels must be plain integers; the alpha of `rgba` is discarded, except
/// that a fully transparent color (alpha 0) counts as no color at all.
///
/// Returns `None` for empty input, `transparent`, and anything unrecognized.
pub fn parse_color(s: &str) -> Option<Rgb> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("transparent") {
        return None;
    }

    let rgb = s.find("rgb(").map(|i| (i, "rgb", 3));
    let rgba = s.find("rgba(").map(|i| (i, "rgba", 4));
    let (start, name, arity) = match (rgb, rgba) {
        (Some(a), Some(b)) => {
            if a.0 < b.0 {
                a
            } else {
                b
            }
        }
        (a, b) => a.or(b)?,
    };

    let inner = function_args(s, start + name.len())?;
    let args: Vec<&str> = split_top_level(inner).into_iter().map(str::trim).collect();
    if args.len() != arity {
        return None;
    }

    let channel = |arg: &str| -> Option<u8> {
        if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Out-of-range integers clamp rather than fail.
        arg.parse::<f64>().ok().map(sanitize)
    };
    let rgb = Rgb::new(channel(args[0])?, channel(args[1])?, channel(args[2])?);

    if let Some(alpha) = args.get(3) {
        let alpha = parse_alpha(alpha)?;
        if alpha <= 0.0 {
            return None;
        }
    }

    Some(rgb)
}

/// Parse a single-layer linear gradient.
///
/// The value must be exactly one `linear-gradient(...)` call, optionally
/// `repeating-`, with nothing but whitespace around it. Layered backgrounds
/// (`url(a.png), linear-gradient(...)`) are not single gradients and yield
/// `None`, as do unbalanced parentheses and argument lists without stops.
pub fn parse_gradient(s: &str) -> Option<Gradient> {
    let s = s.trim();
    let start = s.find(LINEAR_GRADIENT)?;
    let repeating = match &s[..start] {
        "" => false,
        REPEATING_PREFIX => true,
        _ => return None,
    };

    let open = start + LINEAR_GRADIENT.len();
    let inner = function_args(s, open)?;
    if !s[open + inner.len() + 2..].trim().is_empty() {
        return None;
    }
    let parts: Vec<&str> = split_top_level(inner).into_iter().map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let (direction, stops) = match parts.split_first() {
        Some((first, rest)) if is_direction(first) => (Some((*first).to_string()), rest),
        _ => (None, parts.as_slice()),
    };
    if stops.is_empty() {
        return None;
    }

    Some(Gradient {
        direction,
        stops: stops.iter().map(|s| parse_stop(s)).collect(),
        repeating,
    })
}

/// Split a gradient stop into its color token and optional position.
///
/// The position is only split off when the stop ends in a percentage or a
/// pixel length preceded by whitespace and a non-empty color token; it is
/// kept verbatim. Otherwise the whole (trimmed) stop is the color token.
pub fn parse_stop(s: &str) -> ColorStop {
    let s = s.trim();
    if let Some((color, position)) = s.rsplit_once(char::is_whitespace) {
        let color = color.trim_end();
        if !color.is_empty() && is_length(position) {
            return ColorStop {
                color: color.to_string(),
                position: Some(position.to_string()),
            };
        }
    }
    ColorStop {
        color: s.to_string(),
        position: None,
    }
}

/// Split on commas that are not nested inside parentheses.
///
/// `to right, rgb(1, 2, 3) 10%, rgb(4, 5, 6)` splits into three parts.
pub(crate) fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Arguments of the function whose opening parenthesis is at `open`.
///
/// Returns the text between the parentheses, or `None` if `s[open]` is not
/// `(` or the closing parenthesis is missing.
fn function_args(s: &str, open: usize) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[open + 1..i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_alpha(s: &str) -> Option<f64> {
    let valid = !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    if !valid {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Unsigned decimal number, e.g. `12`, `33.3333`, `.5`.
fn is_number(s: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for b in s.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

fn is_length(s: &str) -> bool {
    s.strip_suffix('%')
        .or_else(|| s.strip_suffix("px"))
        .is_some_and(is_number)
}

/// `to <side-or-corner>` or an angle such as `90deg`, `-0.25turn`.
fn is_direction(s: &str) -> bool {
    if s == "to" || s.starts_with("to ") {
        return true;
    }
    ["deg", "grad", "rad", "turn"].iter().any(|unit| {
        s.strip_suffix(unit)
            .map(|n| n.trim_start_matches(|c| c == '-' || c == '+'))
            .is_some_and(is_number)
    })
}
