use std::f64::consts::{FRAC_PI_2, PI};

use super::AngularPosition;

/// Angular extent the axis is spread over, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub start: f64,
    pub end: f64,
}

impl ArcSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn from_degrees(start: f64, end: f64) -> Self {
        Self::new(start.to_radians(), end.to_radians())
    }

    /// 225° arc rotated so the gap sits at the bottom.
    pub fn reference() -> Self {
        Self::new(-5.0 / 8.0 * PI - FRAC_PI_2, 5.0 / 8.0 * PI - FRAC_PI_2)
    }

    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }
}

impl Default for ArcSpan {
    fn default() -> Self {
        Self::reference()
    }
}

/// Angles for every axis sample, in both reading directions.
///
/// Arcs are laid out along `forward`, labels along `reversed`. Keeping the two
/// behind separate accessors stops a call site from swapping them.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleMap {
    forward: Vec<f64>,
    reversed: Vec<f64>,
}

impl AngleMap {
    pub fn new(span: ArcSpan, samples: usize) -> Self {
        let forward = linspace(span.start, span.end, samples);
        let reversed = forward.iter().rev().copied().collect();
        Self { forward, reversed }
    }

    pub fn forward(&self) -> &[f64] {
        &self.forward
    }

    pub fn reversed(&self) -> &[f64] {
        &self.reversed
    }

    pub fn arc_position(&self, index: usize) -> AngularPosition {
        AngularPosition {
            theta: self.forward[index],
        }
    }

    /// Point on the drawn arc for sample `index`.
    #[inline]
    pub fn arc_point(&self, index: usize, radius: f64) -> (f64, f64) {
        polar_to_cartesian(self.forward[index], radius)
    }

    /// Anchor for the label of sample `index`.
    #[inline]
    pub fn label_point(&self, index: usize, radius: f64) -> (f64, f64) {
        polar_to_cartesian(self.reversed[index], radius)
    }
}

/// Convert polar coordinates around the origin to cartesian.
#[inline]
pub fn polar_to_cartesian(theta: f64, radius: f64) -> (f64, f64) {
    (radius * theta.cos(), radius * theta.sin())
}

/// `n` evenly spaced values from `start` to `end`, both included.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = end;
            values
        }
    }
}
