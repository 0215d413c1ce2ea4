use crate::foundation::core::Rgba8;
use crate::foundation::error::{StickframeError, StickframeResult};

/// Palette shown before the user has picked anything.
pub const DEFAULT_RECENT_COLORS: [&str; 8] = [
    "#000000", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#FFFFFF",
];

/// Parse the CSS color forms strokes are stored with.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)` with
/// `a` in `0..=1`.
pub fn parse_css_color(s: &str) -> StickframeResult<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| invalid(s));
    }

    let lower = s.to_ascii_lowercase();
    let (args, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest, true)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest, false)
    } else {
        return Err(invalid(s));
    };
    let args = args.strip_suffix(')').ok_or_else(|| invalid(s))?;
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if has_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(invalid(s));
    }

    let channel = |p: &str| -> StickframeResult<u8> {
        let v: f64 = p.parse().map_err(|_| invalid(s))?;
        if !v.is_finite() || !(0.0..=255.0).contains(&v) {
            return Err(invalid(s));
        }
        Ok(v.round() as u8)
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    if !has_alpha {
        return Ok(Rgba8::opaque(r, g, b));
    }
    let a: f64 = parts[3].parse().map_err(|_| invalid(s))?;
    if !a.is_finite() || !(0.0..=1.0).contains(&a) {
        return Err(invalid(s));
    }
    Ok(Rgba8::with_alpha_f64(r, g, b, a))
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba8::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba8::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba8::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn invalid(s: &str) -> StickframeError {
    StickframeError::validation(format!("unsupported color '{s}'"))
}

/// Most-recent-first list of picked colors with a fixed capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentColors {
    colors: Vec<String>,
    capacity: usize,
}

impl RecentColors {
    pub fn new(capacity: usize) -> Self {
        Self {
            colors: DEFAULT_RECENT_COLORS.iter().map(|c| c.to_string()).collect(),
            capacity,
        }
        .truncated()
    }

    /// Replace the list with stored colors, keeping the capacity bound.
    pub fn from_stored(colors: Vec<String>, capacity: usize) -> Self {
        Self { colors, capacity }.truncated()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.colors
    }

    /// Record a pick. Returns `true` when the list changed.
    ///
    /// Colors already present keep their position.
    pub fn record(&mut self, color: &str) -> bool {
        if self.colors.iter().any(|c| c == color) {
            return false;
        }
        self.colors.insert(0, color.to_string());
        self.colors.truncate(self.capacity);
        true
    }

    fn truncated(mut self) -> Self {
        self.colors.truncate(self.capacity);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
