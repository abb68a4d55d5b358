//! Text listing of every drawing primitive, one per line.
//!
//! Useful for piping a gauge into another plotting tool or diffing two
//! configurations.

use anyhow::Result;
use std::io::Write;

use super::DrawingSurface;
use crate::gauge::{ArcSegment, LabelKind, TickLabel};

pub struct PlainSurface<W: Write> {
    out: W,
    resolution: usize,
}

impl<W: Write> PlainSurface<W> {
    pub fn new(out: W, resolution: usize) -> Self {
        Self { out, resolution }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DrawingSurface for PlainSurface<W> {
    fn draw_arc(&mut self, segments: &[ArcSegment]) -> Result<()> {
        for segment in segments {
            let points: Vec<String> = segment
                .points(self.resolution)
                .iter()
                .map(|(x, y)| format!("{:.4},{:.4}", x, y))
                .collect();
            writeln!(
                self.out,
                "arc r={:.2} theta={:.4}..{:.4} color={} points={}",
                segment.radius,
                segment.start.theta,
                segment.end.theta,
                segment.color,
                points.join(" ")
            )?;
        }
        Ok(())
    }

    fn draw_label(&mut self, label: &TickLabel) -> Result<()> {
        let kind = match label.kind {
            LabelKind::Tick => "label",
            LabelKind::Caption => "caption",
        };
        writeln!(
            self.out,
            "{} at={:.4},{:.4} r={:.2} text={:?}",
            kind, label.position.0, label.position.1, label.radius, label.text
        )?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
