//! Terminal presentation layer
//!
//! Each character cell stands for a `CELL_WIDTH` x `CELL_HEIGHT` block of
//! game pixels. Cells are drawn as upper half blocks so every cell carries
//! two vertical samples (foreground on top, background below). The first
//! row is reserved for the HUD.

use std::io::{BufWriter, Stdout, Write, stdout};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use space_explorer::renderer::{Canvas, DrawSurface, Frame, Overlay, SurfaceError};

/// Game pixels per terminal column
pub const CELL_WIDTH: u32 = 10;
/// Game pixels per terminal row
pub const CELL_HEIGHT: u32 = 20;
/// Rows taken by the HUD
const HUD_ROWS: u16 = 1;

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_CAPTION: Color = Color::White;

/// Playfield size in game pixels for a terminal of `cols` x `rows`
pub fn playfield_size(cols: u16, rows: u16) -> Option<(u32, u32)> {
    let rows = rows.checked_sub(HUD_ROWS)?;
    if cols == 0 || rows == 0 {
        return None;
    }
    Some((u32::from(cols) * CELL_WIDTH, u32::from(rows) * CELL_HEIGHT))
}

/// Game-pixel x coordinate at the middle of terminal column `col`
pub fn column_to_x(col: u16) -> f32 {
    (u32::from(col) * CELL_WIDTH + CELL_WIDTH / 2) as f32
}

/// Draws frames onto the terminal's alternate screen
pub struct TerminalSurface {
    out: BufWriter<Stdout>,
    canvas: Canvas,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self {
            out: BufWriter::new(stdout()),
            canvas: Canvas::new(0, 0),
        }
    }
}

impl TerminalSurface {

    fn draw(&mut self, frame: &Frame, cols: u16, rows: u16) -> std::io::Result<()> {
        let field_rows = rows.saturating_sub(HUD_ROWS);
        if self.canvas.width() != usize::from(cols)
            || self.canvas.height() != usize::from(field_rows) * 2
        {
            self.canvas = Canvas::new(usize::from(cols), usize::from(field_rows) * 2);
        }
        self.canvas.draw_frame(frame);

        let out = &mut self.out;
        draw_hud(out, frame, cols)?;

        for row in 0..field_rows {
            out.queue(cursor::MoveTo(0, row + HUD_ROWS))?;
            let mut last: Option<([u8; 3], [u8; 3])> = None;
            for col in 0..usize::from(cols) {
                let top = self.canvas.get(col, usize::from(row) * 2);
                let bottom = self.canvas.get(col, usize::from(row) * 2 + 1);
                if last != Some((top, bottom)) {
                    out.queue(style::SetForegroundColor(rgb(top)))?;
                    out.queue(style::SetBackgroundColor(rgb(bottom)))?;
                    last = Some((top, bottom));
                }
                out.queue(Print('▀'))?;
            }
        }
        out.queue(style::ResetColor)?;

        if let Some(overlay) = frame.overlay {
            draw_overlay(out, overlay, cols, rows)?;
        }

        out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
        out.flush()
    }
}

impl DrawSurface for TerminalSurface {
    fn size(&self) -> Option<(u32, u32)> {
        let (cols, rows) = terminal::size().ok()?;
        playfield_size(cols, rows)
    }

    fn present(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
        let (cols, rows) = terminal::size()?;
        // A resize between `size` and `present` leaves a stale frame; drop it
        if playfield_size(cols, rows).map(|(w, h)| (w as f32, h as f32))
            != Some((frame.size.x, frame.size.y))
        {
            return Ok(());
        }
        self.draw(frame, cols, rows)?;
        Ok(())
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

fn draw_hud<W: Write>(out: &mut W, frame: &Frame, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", frame.hud.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("  {}", "♥".repeat(usize::from(frame.hud.lives)))))?;

    let hint = "P pause  C continue  R restart  Q quit";
    let used = 20 + usize::from(frame.hud.lives);
    if usize::from(cols) > used + hint.len() {
        out.queue(cursor::MoveTo(cols - hint.len() as u16, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(hint))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_overlay<W: Write>(out: &mut W, overlay: Overlay, cols: u16, rows: u16) -> std::io::Result<()> {
    let mut lines = vec![overlay.title().to_string()];
    match overlay {
        Overlay::Paused => lines.push("Press C to continue".into()),
        Overlay::GameOver { final_score } => {
            lines.push(format!("Final score: {}", final_score));
            lines.push("Press R to restart".into());
        }
    }

    let cy = rows / 2;
    out.queue(style::SetForegroundColor(C_CAPTION))?;
    out.queue(style::SetBackgroundColor(Color::Black))?;
    for (i, line) in lines.iter().enumerate() {
        let x = (cols / 2).saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(x, cy + i as u16))?;
        out.queue(Print(line))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playfield_excludes_hud_row() {
        assert_eq!(playfield_size(80, 25), Some((800, 480)));
        assert_eq!(playfield_size(80, 1), None);
        assert_eq!(playfield_size(0, 25), None);
        assert_eq!(playfield_size(80, 0), None);
    }

    #[test]
    fn test_column_maps_to_cell_center() {
        assert_eq!(column_to_x(0), 5.0);
        assert_eq!(column_to_x(3), 35.0);
    }

    #[test]
    fn test_default_starts_with_empty_canvas() {
        let surface = TerminalSurface::default();
        assert_eq!(surface.canvas.width(), 0);
        assert_eq!(surface.canvas.height(), 0);
    }
}
