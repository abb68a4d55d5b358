//! Gauge model: three concentric gradient rings over one speed axis.
//!
//! Everything here is plain data built by [`compose::render`] and handed to a
//! drawing surface afterwards. Nothing is mutated once a gauge is composed.

pub mod angles;
pub mod axis;
pub mod compose;
pub mod gradient;
pub mod physics;
pub mod ticks;

pub use compose::render;
pub use physics::DomainError;

use crate::color::Rgba;

/// Upper bound on axis samples, keeps a typo'd step from allocating millions.
pub const MAX_SAMPLES: usize = 10_000;

/// One point on the linear speed axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSample {
    pub value: f64,
    pub index: usize,
}

/// Samples from `start` to `stop` inclusive, `step` apart.
pub fn axis_samples(start: f64, stop: f64, step: f64) -> Result<Vec<AxisSample>, DomainError> {
    let degenerate = DomainError::DegenerateAxis { start, stop, step };
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) || step <= 0.0 {
        return Err(degenerate);
    }
    // Tolerance so 10..=150 step 10 does not lose its last sample to rounding.
    let span = (stop - start) / step + 1e-9;
    if span < 1.0 || span >= MAX_SAMPLES as f64 {
        return Err(degenerate);
    }
    let count = span.floor() as usize + 1;
    Ok((0..count)
        .map(|index| AxisSample {
            value: start + index as f64 * step,
            index,
        })
        .collect())
}

/// Radians along the configured arc span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularPosition {
    pub theta: f64,
}

/// Colored piece of a ring between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start: AngularPosition,
    pub end: AngularPosition,
    pub color: Rgba,
    pub radius: f64,
}

impl ArcSegment {
    /// Polyline approximating the segment with `resolution` straight pieces.
    /// A resolution of 1 is the chord between the two sample points.
    pub fn points(&self, resolution: usize) -> Vec<(f64, f64)> {
        let steps = resolution.max(1);
        let sweep = self.end.theta - self.start.theta;
        (0..=steps)
            .map(|k| {
                let theta = self.start.theta + sweep * k as f64 / steps as f64;
                angles::polar_to_cartesian(theta, self.radius)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Value printed next to a ring.
    Tick,
    /// Fixed legend text under the center.
    Caption,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub text: String,
    pub position: (f64, f64),
    pub radius: f64,
    pub kind: LabelKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    Outer,
    Middle,
    Inner,
}

impl RingKind {
    pub fn name(&self) -> &'static str {
        match self {
            RingKind::Outer => "outer",
            RingKind::Middle => "middle",
            RingKind::Inner => "inner",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub kind: RingKind,
    pub radius: f64,
    pub label_radius: f64,
    pub segments: Vec<ArcSegment>,
    pub labels: Vec<TickLabel>,
}

/// Rings are stored outermost first.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub rings: [Ring; 3],
    pub captions: Vec<TickLabel>,
}
