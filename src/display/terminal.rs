use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use tracing::info;

use super::braille::{BrailleCanvas, Viewport};
use super::DrawingSurface;
use crate::gauge::{ArcSegment, LabelKind, TickLabel};

/// Half-width of the visible gauge area; leaves room for the outer labels.
const VIEW_EXTENT: f64 = 1.1;

/// Full-screen braille view of the gauge. Primitives are buffered and the
/// screen is drawn on [`DrawingSurface::present`], which blocks until the
/// user closes the view.
pub struct TerminalSurface {
    resolution: usize,
    segments: Vec<ArcSegment>,
    labels: Vec<TickLabel>,
}

impl TerminalSurface {
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            segments: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Paint every buffered primitive into `area`.
    fn paint(&self, frame: &mut Frame, area: Rect) {
        let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);
        let view = Viewport::fit(canvas.grid_w, canvas.grid_h, VIEW_EXTENT);

        for segment in &self.segments {
            let color = segment.color.to_rgb8();
            let points = segment.points(self.resolution);
            for pair in points.windows(2) {
                canvas.line(view.project(pair[0]), view.project(pair[1]), color);
            }
        }
        canvas.render(frame, area);

        for label in &self.labels {
            let (gx, gy) = view.project(label.position);
            let (col, row) = label_origin(&label.text, gx, gy);
            let style = match label.kind {
                LabelKind::Tick => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                LabelKind::Caption => Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            };
            put_text(frame, area, col, row, &label.text, style);
        }

        let status = " [q]uit ";
        put_text(frame, area, 0, 0, status, Style::default().fg(Color::DarkGray));
    }

    fn run(&self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                self.paint(frame, area);
            })?;

            // Anything else, resizes included, just redraws
            if is_quit(&event::read()?) {
                break;
            }
        }
        Ok(())
    }
}

impl DrawingSurface for TerminalSurface {
    fn draw_arc(&mut self, segments: &[ArcSegment]) -> Result<()> {
        self.segments.extend_from_slice(segments);
        Ok(())
    }

    fn draw_label(&mut self, label: &TickLabel) -> Result<()> {
        self.labels.push(label.clone());
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        info!(
            "Presenting {} segments and {} labels in the terminal",
            self.segments.len(),
            self.labels.len()
        );

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.run(&mut terminal);

        // Restore terminal, every step runs even if an earlier one failed
        let restore = [
            disable_raw_mode(),
            execute!(terminal.backend_mut(), LeaveAlternateScreen),
            terminal.show_cursor(),
        ];

        settle(result, restore)
    }
}

/// q, Esc or Ctrl-C, on key press only.
fn is_quit(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            kind: KeyEventKind::Press,
            ..
        }) | Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        })
    )
}

/// The session's own error wins, then the first restore step that failed.
fn settle(session: Result<()>, restore: [io::Result<()>; 3]) -> Result<()> {
    session?;
    for step in restore {
        step?;
    }
    Ok(())
}

/// Cell where a label centered on dot `(gx, gy)` starts.
fn label_origin(text: &str, gx: isize, gy: isize) -> (isize, isize) {
    let width = text.chars().count() as isize;
    (gx.div_euclid(2) - width / 2, gy.div_euclid(4))
}

/// Write `text` starting at cell (col, row), dropping whatever falls outside.
fn put_text(frame: &mut Frame, area: Rect, col: isize, row: isize, text: &str, style: Style) {
    if row < 0 || row >= area.height as isize {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let x = col + i as isize;
        if x < 0 || x >= area.width as isize {
            continue;
        }
        let cell = frame
            .buffer_mut()
            .cell_mut((area.x + x as u16, area.y + row as u16));
        if let Some(cell) = cell {
            cell.set_char(ch);
            cell.set_style(style);
        }
    }
}
