use rand::seq::SliceRandom;
use rand::Rng;

use crate::arena::Arena;
use crate::snake::Snake;
use crate::Coords;

/// The single collectible. It is moved, never recreated.
pub struct Item {
    pos: Coords,
    glyph: char,
}

impl Item {
    /// An item parked on the border until its first respawn.
    pub fn new(glyph: char) -> Self {
        Item::placed_at((0, 0), glyph)
    }

    pub fn placed_at(pos: Coords, glyph: char) -> Self {
        Item { pos, glyph }
    }

    pub fn pos(&self) -> Coords {
        self.pos
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    /// Moves the item to a random interior cell the snake does not cover.
    /// Returns `None`, leaving the item where it was, when no such cell exists.
    pub fn respawn<R: Rng>(&mut self, arena: &Arena, snake: &Snake, rng: &mut R) -> Option<Coords> {
        let choices: Vec<Coords> = arena.interior_cells().filter(|pos| !snake.occupies(*pos)).collect();
        let res = choices.choose(rng).copied();

        if let Some(pos) = res {
            self.pos = pos;
            tracing::debug!(row = pos.0, col = pos.1, "item respawned");
        }

        res
    }
}
