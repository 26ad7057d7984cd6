//! Text-mode canvas for headless native runs
//!
//! Rasterizes the arena into a character grid. Each sprite marks the cell
//! under its center; cells hit more than once are drawn as `#`.

use super::{Canvas, Color, Rect};

/// Character raster of the arena
#[derive(Debug, Clone)]
pub struct TextCanvas {
    cols: usize,
    rows: usize,
    /// Arena pixels per cell on each axis
    cell: (f32, f32),
    buffer: Vec<char>,
    frame: String,
    presented: u64,
}

impl TextCanvas {
    /// Grid of `cols` x `rows` cells covering a `width` x `height` arena
    pub fn new(cols: usize, rows: usize, width: f32, height: f32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cell: (width / cols as f32, height / rows as f32),
            buffer: vec![' '; cols * rows],
            frame: String::new(),
            presented: 0,
        }
    }

    /// Last presented frame, one line per row
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Canvas for TextCanvas {
    type Texture = char;

    fn clear(&mut self, color: Color) {
        // Dark backgrounds render as blank space
        let luma = (color.r as u32 + color.g as u32 + color.b as u32) / 3;
        let fill = if luma < 128 { ' ' } else { '.' };
        self.buffer.fill(fill);
    }

    fn draw_sprite(&mut self, glyph: &char, dest: Rect) {
        let (cx, cy) = dest.center();
        if cx < 0 || cy < 0 {
            return;
        }
        let col = (cx as f32 / self.cell.0) as usize;
        let row = (cy as f32 / self.cell.1) as usize;
        if col >= self.cols || row >= self.rows {
            return;
        }
        let cell = &mut self.buffer[row * self.cols + col];
        *cell = if *cell == ' ' || *cell == '.' { *glyph } else { '#' };
    }

    fn present(&mut self) {
        self.frame.clear();
        for row in self.buffer.chunks(self.cols) {
            self.frame.extend(row.iter());
            self.frame.push('\n');
        }
        self.presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::BACKGROUND;

    #[test]
    fn test_marks_cells() {
        let mut canvas = TextCanvas::new(3, 2, 300.0, 200.0);
        canvas.clear(BACKGROUND);
        canvas.draw_sprite(&'o', Rect { x: 10, y: 10, w: 10, h: 10 });
        canvas.draw_sprite(&'o', Rect { x: 245, y: 145, w: 10, h: 10 });
        canvas.draw_sprite(&'o', Rect { x: 240, y: 140, w: 10, h: 10 });
        canvas.present();
        assert_eq!(canvas.frame(), "o  \n  #\n");
        assert_eq!(canvas.presented(), 1);
    }

    #[test]
    fn test_offscreen_sprites_ignored() {
        let mut canvas = TextCanvas::new(4, 4, 100.0, 100.0);
        canvas.clear(BACKGROUND);
        canvas.draw_sprite(&'o', Rect { x: -50, y: 10, w: 10, h: 10 });
        canvas.draw_sprite(&'o', Rect { x: 120, y: 10, w: 10, h: 10 });
        canvas.present();
        assert!(!canvas.frame().contains('o'));
    }
}
