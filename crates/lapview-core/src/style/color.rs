//! Colour values for the draw list
//!
//! Style files store colours as CSS-like strings (`#RRGGBB`, `#RRGGBBAA`,
//! `rgb(r,g,b)`, `rgba(r,g,b,a)`). They are parsed once when the style is
//! deserialized; an unparsable colour logs a warning and falls back to white.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Straight-alpha RGBA colour, components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 1.0)
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Parse a colour string, `None` when the format is not recognised
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(args) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(args);
        }
        parse_hex(s.trim_start_matches('#'))
    }

    fn to_u8(component: f32) -> u8 {
        (component.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 {
        byte(6)? as f32 / 255.0
    } else {
        1.0
    };
    Some(Rgba::from_rgba8(byte(0)?, byte(2)?, byte(4)?, alpha))
}

// rgba(176,176,176) without alpha shows up in the stock palettes, accept it
fn parse_functional(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| s.parse::<u8>().ok();
    let alpha = match parts.get(3) {
        Some(a) => a.parse::<f32>().ok()?,
        None => 1.0,
    };
    Some(Rgba::from_rgba8(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

impl From<String> for Rgba {
    fn from(s: String) -> Self {
        Rgba::parse(&s).unwrap_or_else(|| {
            log::warn!("Invalid colour '{}', using white", s);
            Rgba::WHITE
        })
    }
}

impl From<&str> for Rgba {
    fn from(s: &str) -> Self {
        Rgba::from(s.to_string())
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = (Self::to_u8(self.r), Self::to_u8(self.g), Self::to_u8(self.b));
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            write!(f, "rgba({},{},{},{})", r, g, b, self.a)
        }
    }
}
