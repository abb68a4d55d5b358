use palette::Srgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color with straight (non pre-multiplied) alpha, channels in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub Srgba<f32>);

impl Rgba {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(Srgba::new(r, g, b, a))
    }

    /// Opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        )
    }

    pub fn channels(&self) -> [f32; 4] {
        [self.0.red, self.0.green, self.0.blue, self.0.alpha]
    }

    /// Round each channel to 8 bits, the way the color is finally displayed
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = self.channels().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        (r, g, b, a)
    }

    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let (r, g, b, _) = self.to_rgba8();
        (r, g, b)
    }

    /// Interpolate towards `other`. `t = 0` returns `self` and `t = 1` returns
    /// `other` exactly.
    pub fn lerp(&self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let a = self.channels();
        let b = other.channels();
        let mix = |i: usize| a[i] * (1.0 - t) + b[i] * t;
        Rgba::new(mix(0), mix(1), mix(2), mix(3))
    }
}

impl FromStr for Rgba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| format!("Invalid hex color: {}", s));
        }
        palette::named::from_str(&s.to_lowercase())
            .map(|c| Rgba::from_rgb8(c.red, c.green, c.blue))
            .ok_or_else(|| format!("Unknown color: {}", s))
    }
}

/// Parse "rrggbb" or "rrggbbaa"
fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let a = if hex.len() == 8 { channel(6)? } else { 255 };
    Some(Rgba::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ))
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.to_rgba8();
        if a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rgba::from_str(&s).map_err(serde::de::Error::custom)
    }
}
