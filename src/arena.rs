use crate::config::Glyphs;
use crate::item::Item;
use crate::snake::Snake;
use crate::Coords;

/// The bounded play area and the glyph buffer it is rendered into.
///
/// The buffer outlives each frame: collision checks read what the previous
/// frame left behind, so it is only wiped at the start of `draw`.
pub struct Arena {
    height: i16,
    width: i16,
    glyphs: Glyphs,
    screen: Vec<char>,
}

impl Arena {
    pub fn new(height: i16, width: i16, glyphs: Glyphs) -> Self {
        let screen = vec![glyphs.blank; height.max(0) as usize * width.max(0) as usize];
        Arena { height, width, glyphs, screen }
    }

    /// `(height, width)` of the whole surface, border ring included.
    pub fn bounds(&self) -> (i16, i16) {
        (self.height, self.width)
    }

    /// True when `pos` lies strictly inside the border ring.
    pub fn is_interior(&self, pos: Coords) -> bool {
        let (row, col) = pos;
        row > 0 && row < self.height - 1 && col > 0 && col < self.width - 1
    }

    pub fn interior_cells(&self) -> impl Iterator<Item = Coords> + '_ {
        (1..self.height - 1).flat_map(move |row| (1..self.width - 1).map(move |col| (row, col)))
    }

    /// Glyph currently on the surface at `pos`, `None` off the surface.
    pub fn glyph_at(&self, pos: Coords) -> Option<char> {
        self.index(pos).map(|i| self.screen[i])
    }

    /// Blanks the cell under the tail before it moves off it.
    pub fn clear_trail(&mut self, snake: &Snake) {
        let blank = self.glyphs.blank;
        self.print_at(snake.tail_pos(), blank);
    }

    /// Redraws the whole frame: border, then item, then body head to tail.
    pub fn draw(&mut self, snake: &Snake, item: &Item) {
        self.screen.fill(self.glyphs.blank);
        self.draw_border();

        self.print_at(item.pos(), item.glyph());

        let glyph = snake.glyph();
        for pos in snake.positions() {
            self.print_at(pos, glyph);
        }
    }

    /// Rows of the buffer, top to bottom, for presenting to a terminal.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.screen.chunks(self.width.max(1) as usize)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_border(&mut self) {
        let (end_row, end_col) = (self.height - 1, self.width - 1);
        let Glyphs { corner, horizontal, vertical, .. } = self.glyphs;

        for col in 0..self.width {
            let ch = if col == 0 || col == end_col { corner } else { horizontal };
            self.print_at((0, col), ch);
            self.print_at((end_row, col), ch);
        }

        for row in 1..end_row {
            self.print_at((row, 0), vertical);
            self.print_at((row, end_col), vertical);
        }
    }

    fn print_at(&mut self, pos: Coords, ch: char) {
        if let Some(i) = self.index(pos) {
            self.screen[i] = ch;
        }
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        let (row, col) = pos;
        if row < 0 || col < 0 || row >= self.height || col >= self.width {
            return None;
        }
        Some(self.width as usize * row as usize + col as usize)
    }
}
