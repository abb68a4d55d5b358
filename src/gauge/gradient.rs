//! Ring color gradients.
//!
//! Every ring takes one color per axis sample. Segment `i` of a ring is
//! painted with color `i`, so sample order is drawing order.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(position: f32, color: Rgba) -> Self {
        Self { position, color }
    }
}

/// Piecewise linear gradient over `[0, 1]`.
///
/// Always holds at least one stop, starts at 0 and ends at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
pub struct Gradient {
    stops: Vec<ColorStop>,
}

impl Gradient {
    /// Build from arbitrary stops: sorted by position, clamped to `[0, 1]`,
    /// with the outermost colors extended to cover both ends.
    pub fn new(stops: Vec<ColorStop>) -> Option<Self> {
        let mut stops: Vec<ColorStop> = stops
            .into_iter()
            .filter(|s| s.position.is_finite())
            .map(|s| ColorStop::new(s.position.clamp(0.0, 1.0), s.color))
            .collect();
        if stops.is_empty() {
            return None;
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));

        let first = stops[0];
        if first.position > 0.0 {
            stops.insert(0, ColorStop::new(0.0, first.color));
        }
        let last = stops[stops.len() - 1];
        if last.position < 1.0 {
            stops.push(ColorStop::new(1.0, last.color));
        }
        Some(Self { stops })
    }

    pub fn two_stop(from: Rgba, to: Rgba) -> Self {
        Self {
            stops: vec![ColorStop::new(0.0, from), ColorStop::new(1.0, to)],
        }
    }

    /// Color at `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let upper = self
            .stops
            .iter()
            .position(|s| s.position >= t)
            .unwrap_or(self.stops.len() - 1);
        if upper == 0 {
            return self.stops[0].color;
        }
        let a = self.stops[upper - 1];
        let b = self.stops[upper];
        let width = b.position - a.position;
        if width <= 0.0 {
            return b.color;
        }
        a.color.lerp(b.color, (t - a.position) / width)
    }

    /// `n` colors at evenly spaced positions from 0 to 1 inclusive.
    pub fn sample(&self, n: usize) -> Vec<Rgba> {
        match n {
            0 => Vec::new(),
            1 => vec![self.at(0.0)],
            _ => (0..n)
                .map(|i| self.at(i as f32 / (n - 1) as f32))
                .collect(),
        }
    }
}

impl TryFrom<Vec<ColorStop>> for Gradient {
    type Error = String;

    fn try_from(stops: Vec<ColorStop>) -> Result<Self, Self::Error> {
        Gradient::new(stops).ok_or_else(|| "gradient needs at least one finite stop".to_string())
    }
}

impl From<Gradient> for Vec<ColorStop> {
    fn from(gradient: Gradient) -> Self {
        gradient.stops
    }
}

/// How a ring's colors are produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GradientSpec {
    /// Straight interpolation between two colors.
    Linear { from: Rgba, to: Rgba },
    /// `start → middle`, a flat `middle` band, then `middle → end`, split at
    /// `n / 3` and `2n / 3`.
    ThreeSegment { start: Rgba, middle: Rgba, end: Rgba },
    Stops { stops: Gradient },
}

impl GradientSpec {
    pub fn sample(&self, n: usize) -> Vec<Rgba> {
        match self {
            GradientSpec::Linear { from, to } => Gradient::two_stop(*from, *to).sample(n),
            GradientSpec::ThreeSegment { start, middle, end } => {
                three_segment(*start, *middle, *end, n)
            }
            GradientSpec::Stops { stops } => stops.sample(n),
        }
    }
}

/// Segment lengths are `n / 3`, `2n / 3 - n / 3` and `n - 2n / 3`, so the
/// pieces always add back up to `n` and the last one takes the remainder.
fn three_segment(start: Rgba, middle: Rgba, end: Rgba, n: usize) -> Vec<Rgba> {
    let first = n / 3;
    let second = 2 * n / 3;

    let mut colors = Vec::with_capacity(n);
    colors.extend(Gradient::two_stop(start, middle).sample(first));
    colors.extend(std::iter::repeat(middle).take(second - first));
    colors.extend(Gradient::two_stop(middle, end).sample(n - second));
    colors
}
