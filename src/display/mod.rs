pub mod braille;
pub mod plain;
pub mod terminal;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gauge::{ArcSegment, Gauge, TickLabel};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Full-screen braille rendering, closed with q or Esc
    #[default]
    Terminal,
    /// One line per drawing primitive on stdout
    Plain,
}

impl DisplayMode {
    pub fn name(&self) -> &'static str {
        match self {
            DisplayMode::Terminal => "terminal",
            DisplayMode::Plain => "plain",
        }
    }
}

/// Anything that can draw a composed gauge.
///
/// Surfaces own their output lifecycle: primitives may be buffered until
/// [`DrawingSurface::present`] is called.
pub trait DrawingSurface {
    /// Draw one ring's segments as colored polylines.
    fn draw_arc(&mut self, segments: &[ArcSegment]) -> Result<()>;

    fn draw_label(&mut self, label: &TickLabel) -> Result<()>;

    fn present(&mut self) -> Result<()>;
}

/// Hand every primitive of `gauge` to `surface`, rings outermost first, then
/// present it.
pub fn draw_gauge(gauge: &Gauge, surface: &mut dyn DrawingSurface) -> Result<()> {
    for ring in &gauge.rings {
        debug!("Drawing {} ring", ring.kind.name());
        surface.draw_arc(&ring.segments)?;
    }
    for label in gauge.rings.iter().flat_map(|r| r.labels.iter()) {
        surface.draw_label(label)?;
    }
    for caption in &gauge.captions {
        surface.draw_label(caption)?;
    }
    surface.present()
}
