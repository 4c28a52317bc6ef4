//! Built-in game settings.
//!
//! There is no config file; everything tunable lives here so the rest of the
//! code never hardcodes a glyph or a timing.

use std::time::Duration;

use crate::{Coords, Heading};

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub frame_interval: Duration,
    pub start_pos: Coords,
    pub start_heading: Heading,
    pub glyphs: Glyphs,
}

#[derive(Clone, Debug)]
pub struct Glyphs {
    pub snake: char,
    pub item: char,
    pub corner: char,
    pub horizontal: char,
    pub vertical: char,
    pub blank: char,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            frame_interval: Duration::from_millis(120),
            start_pos: (10, 10),
            start_heading: (0, 1),
            glyphs: Glyphs::default(),
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs {
            snake: '#',
            item: '*',
            corner: '+',
            horizontal: '-',
            vertical: '|',
            blank: ' ',
        }
    }
}

impl GameConfig {
    /// Smallest (height, width) that keeps the start cell and the cell ahead
    /// of it strictly inside the border ring.
    pub fn min_arena(&self) -> (i16, i16) {
        let (row, col) = self.start_pos;
        let (dy, dx) = self.start_heading;
        let ahead = (row + dy, col + dx);

        (row.max(ahead.0) + 2, col.max(ahead.1) + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_arena_leaves_room_ahead_of_start() {
        let config = GameConfig::default();
        assert_eq!(config.min_arena(), (12, 13));
    }

    #[test]
    fn min_arena_follows_start_heading() {
        let config = GameConfig { start_pos: (4, 6), start_heading: (1, 0), ..GameConfig::default() };
        assert_eq!(config.min_arena(), (7, 8));
    }
}
