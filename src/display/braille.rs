use ratatui::prelude::*;

/// Braille dot positions within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// A canvas for sub-character braille rendering.
/// Each terminal character cell maps to a 2x4 grid of braille dots and keeps
/// the color of the last dot drawn into it.
pub struct BrailleCanvas {
    grid: Vec<bool>,
    colors: Vec<Option<(u8, u8, u8)>>,
    pub grid_w: usize,
    pub grid_h: usize,
    char_w: usize,
    char_h: usize,
}

impl BrailleCanvas {
    /// Create a new braille canvas for the given character dimensions.
    pub fn new(char_w: usize, char_h: usize) -> Self {
        let grid_w = char_w * 2;
        let grid_h = char_h * 4;
        Self {
            grid: vec![false; grid_w * grid_h],
            colors: vec![None; char_w * char_h],
            grid_w,
            grid_h,
            char_w,
            char_h,
        }
    }

    /// Set a single dot on the braille grid (bounds-checked).
    #[inline]
    pub fn set(&mut self, gx: isize, gy: isize, color: (u8, u8, u8)) {
        if gx < 0 || gy < 0 {
            return;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        if gx < self.grid_w && gy < self.grid_h {
            self.grid[gy * self.grid_w + gx] = true;
            self.colors[(gy / 4) * self.char_w + gx / 2] = Some(color);
        }
    }

    pub fn is_set(&self, gx: usize, gy: usize) -> bool {
        gx < self.grid_w && gy < self.grid_h && self.grid[gy * self.grid_w + gx]
    }

    /// Draw a line using Bresenham's algorithm. Endpoints may lie off the
    /// canvas; only the visible dots are set.
    pub fn line(&mut self, from: (isize, isize), to: (isize, isize), color: (u8, u8, u8)) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: isize = if x0 < x1 { 1 } else { -1 };
        let sy: isize = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x0, y0, color);

            if x0 == x1 && y0 == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Braille character for cell (cx, cy), None when the cell is empty.
    pub fn glyph(&self, cx: usize, cy: usize) -> Option<char> {
        let mut braille: u8 = 0;
        for (dx, col) in DOT_MAP.iter().enumerate() {
            for (dy, &bit) in col.iter().enumerate() {
                if self.is_set(cx * 2 + dx, cy * 4 + dy) {
                    braille |= bit;
                }
            }
        }
        if braille == 0 {
            None
        } else {
            char::from_u32(0x2800 + braille as u32)
        }
    }

    /// Encode the grid to characters and write them into the frame buffer.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for cy in 0..self.char_h.min(area.height as usize) {
            for cx in 0..self.char_w.min(area.width as usize) {
                let (Some(ch), Some((r, g, b))) =
                    (self.glyph(cx, cy), self.colors[cy * self.char_w + cx])
                else {
                    continue;
                };
                let cell = frame
                    .buffer_mut()
                    .cell_mut((area.x + cx as u16, area.y + cy as u16));
                if let Some(cell) = cell {
                    cell.set_char(ch);
                    cell.set_fg(Color::Rgb(r, g, b));
                }
            }
        }
    }
}

/// Maps gauge coordinates (y up, unit circle) onto a dot grid (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cx: f64,
    pub cy: f64,
    pub scale: f64,
}

impl Viewport {
    /// Fit the square `[-extent, extent]²` centered in a `grid_w x grid_h`
    /// dot grid. Braille dots are close enough to square that no aspect
    /// correction is applied.
    pub fn fit(grid_w: usize, grid_h: usize, extent: f64) -> Self {
        let cx = grid_w as f64 / 2.0;
        let cy = grid_h as f64 / 2.0;
        let scale = (grid_w.min(grid_h) as f64 / 2.0) / extent;
        Self { cx, cy, scale }
    }

    #[inline]
    pub fn project(&self, (x, y): (f64, f64)) -> (isize, isize) {
        (
            (self.cx + x * self.scale).round() as isize,
            (self.cy - y * self.scale).round() as isize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: (u8, u8, u8) = (255, 255, 255);

    #[test]
    fn test_set_and_glyph() {
        let mut canvas = BrailleCanvas::new(2, 1);
        assert_eq!(canvas.glyph(0, 0), None);
        canvas.set(0, 0, WHITE);
        canvas.set(1, 3, WHITE);
        assert_eq!(canvas.glyph(0, 0), char::from_u32(0x2800 + 0x81));
        assert_eq!(canvas.glyph(1, 0), None);
    }

    #[test]
    fn test_set_ignores_out_of_bounds() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set(-1, 0, WHITE);
        canvas.set(2, 0, WHITE);
        canvas.set(0, 4, WHITE);
        assert_eq!(canvas.glyph(0, 0), None);
    }

    #[test]
    fn test_line_is_clipped() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.line((-3, 1), (10, 1), (10, 20, 30));
        for gx in 0..4 {
            assert!(canvas.is_set(gx, 1));
        }
        assert!(!canvas.is_set(0, 0));
        assert_eq!(canvas.colors[1], Some((10, 20, 30)));
    }

    #[test]
    fn test_viewport_projection() {
        let view = Viewport::fit(100, 80, 1.0);
        assert_eq!(view.project((0.0, 0.0)), (50, 40));
        // Radius maps to half the shorter side, y flips.
        assert_eq!(view.project((1.0, 1.0)), (90, 0));
        assert_eq!(view.project((-1.0, -1.0)), (10, 80));
    }
}
