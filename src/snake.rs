use rand::Rng;

use crate::arena::Arena;
use crate::chain::Chain;
use crate::error::GameResult;
use crate::item::Item;
use crate::{Coords, Heading};
use Direction::*;
use TickResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    Body,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickResult {
    Moved,
    Grew,
    /// Grew onto the item and there is no free cell left to respawn it in.
    Filled,
    Crashed(Crash),
}

pub struct Snake {
    chain: Chain,
    /// `None` while alive.
    death: Option<Crash>,
    glyph: char,
}

impl Direction {
    pub fn heading(self) -> Heading {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }
}

impl Snake {
    pub fn new(pos: Coords, heading: Heading, glyph: char) -> Self {
        Snake { chain: Chain::new(pos, heading), death: None, glyph }
    }

    pub fn length(&self) -> usize {
        self.chain.len()
    }

    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    pub fn death_cause(&self) -> Option<Crash> {
        self.death
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn head_pos(&self) -> Coords {
        self.chain.head().pos
    }

    pub fn heading(&self) -> Heading {
        self.chain.head().heading
    }

    pub fn tail_pos(&self) -> Coords {
        self.chain.tail().pos
    }

    /// Body cells, head first.
    pub fn positions(&self) -> impl Iterator<Item = Coords> + '_ {
        self.chain.iter().map(|seg| seg.pos)
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.positions().any(|p| p == pos)
    }

    /// Steers the head. Reversals are accepted as-is, so turning back onto
    /// the body is fatal once the snake is three segments or longer.
    pub fn set_heading(&mut self, direction: Direction) {
        self.chain.head_mut().heading = direction.heading();
    }

    pub fn grow(&mut self) -> GameResult<()> {
        self.chain.append_tail()
    }

    /// Advances the snake one step and resolves what it ran into.
    ///
    /// Self collision is read off `arena`, i.e. against last frame's drawing
    /// with the tail cell already blanked by `Arena::clear_trail`.
    pub fn tick<R: Rng>(&mut self, arena: &Arena, item: &mut Item, rng: &mut R) -> GameResult<TickResult> {
        self.chain.propagate_positions();
        self.chain.propagate_headings();

        let head = self.head_pos();

        if !arena.is_interior(head) {
            return Ok(self.crash(Crash::Wall));
        }

        if arena.glyph_at(head) == Some(self.glyph) {
            return Ok(self.crash(Crash::Body));
        }

        if head == item.pos() {
            self.grow()?;
            tracing::debug!(length = self.length(), "snake grew");

            if item.respawn(arena, self, rng).is_none() {
                tracing::warn!(length = self.length(), "no free cell left for the item");
                return Ok(Filled);
            }
            return Ok(Grew);
        }

        Ok(Moved)
    }

    /// Releases the body. Only reachable once the game is over.
    pub fn release(self) -> usize {
        self.chain.release()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn crash(&mut self, cause: Crash) -> TickResult {
        self.death = Some(cause);
        let (row, col) = self.head_pos();
        tracing::info!(?cause, row, col, length = self.length(), "snake died");
        Crashed(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Glyphs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Board {
        arena: Arena,
        snake: Snake,
        item: Item,
        rng: StdRng,
    }

    impl Board {
        fn new(start: Coords, heading: Heading, item: Coords) -> Self {
            let mut board = Board {
                arena: Arena::new(20, 40, Glyphs::default()),
                snake: Snake::new(start, heading, '#'),
                item: Item::placed_at(item, '*'),
                rng: StdRng::seed_from_u64(42),
            };
            board.arena.draw(&board.snake, &board.item);
            board
        }

        fn step(&mut self) -> TickResult {
            self.arena.clear_trail(&self.snake);
            let res = self.snake.tick(&self.arena, &mut self.item, &mut self.rng).unwrap();
            if self.snake.is_alive() {
                self.arena.draw(&self.snake, &self.item);
            }
            res
        }
    }

    #[test]
    fn head_moves_by_heading_without_input() {
        let mut b = Board::new((10, 10), (0, 1), (1, 1));

        for _ in 0..3 {
            assert_eq!(b.step(), Moved);
        }

        assert_eq!(b.snake.head_pos(), (10, 13));
        assert_eq!(b.snake.length(), 1);
    }

    #[test]
    fn eating_grows_in_the_same_tick_and_moves_the_item() {
        let mut b = Board::new((10, 10), (0, 1), (10, 11));

        assert_eq!(b.step(), Grew);

        assert_eq!(b.snake.head_pos(), (10, 11));
        assert_eq!(b.snake.length(), 2);
        assert_ne!(b.item.pos(), (10, 11));
        assert!(b.arena.is_interior(b.item.pos()));
    }

    #[test]
    fn length_changes_only_when_head_lands_on_item() {
        let mut b = Board::new((5, 5), (0, 1), (5, 8));

        for _ in 0..30 {
            let before = b.snake.length();
            let target = b.item.pos();
            let res = b.step();
            if !b.snake.is_alive() {
                break;
            }
            let ate = b.snake.head_pos() == target;
            assert_eq!(b.snake.length(), before + usize::from(ate));
            assert_eq!(res == Grew, ate);
        }
    }

    #[test]
    fn entering_the_border_kills() {
        let mut b = Board::new((10, 37), (0, 1), (1, 1));

        assert_eq!(b.step(), Moved);
        assert_eq!(b.snake.head_pos(), (10, 38));

        assert_eq!(b.step(), Crashed(Crash::Wall));
        assert!(!b.snake.is_alive());
        assert_eq!(b.snake.death_cause(), Some(Crash::Wall));
    }

    #[test]
    fn turning_back_into_the_body_kills() {
        let mut b = Board::new((10, 10), (0, 1), (10, 11));
        b.step();
        b.item = Item::placed_at((10, 12), '*');
        b.arena.draw(&b.snake, &b.item);
        b.step();
        assert_eq!(b.snake.length(), 3);
        assert_eq!(b.snake.positions().collect::<Vec<_>>(), vec![(10, 12), (10, 11), (10, 10)]);

        b.snake.set_heading(Left);
        assert_eq!(b.step(), Crashed(Crash::Body));
    }

    #[test]
    fn a_two_segment_snake_can_swap_ends() {
        let mut b = Board::new((10, 10), (0, 1), (10, 11));
        b.step();

        b.snake.set_heading(Left);
        assert_eq!(b.step(), Moved);
        assert_eq!(b.snake.positions().collect::<Vec<_>>(), vec![(10, 10), (10, 11)]);
    }

    #[test]
    fn followers_trace_the_heads_path() {
        let mut b = Board::new((10, 10), (0, 1), (10, 11));
        b.step();
        b.item = Item::placed_at((1, 1), '*');

        b.snake.set_heading(Down);
        b.step();
        assert_eq!(b.snake.positions().collect::<Vec<_>>(), vec![(11, 11), (10, 11)]);
        b.step();
        assert_eq!(b.snake.positions().collect::<Vec<_>>(), vec![(12, 11), (11, 11)]);
        assert_eq!(b.snake.heading(), (1, 0));
    }

    #[test]
    fn chasing_the_tail_around_a_square_survives() {
        let mut b = Board::new((5, 5), (0, 1), (5, 6));
        b.step();
        b.item = Item::placed_at((5, 7), '*');
        b.step();
        b.item = Item::placed_at((6, 7), '*');
        b.snake.set_heading(Down);
        b.step();
        b.item = Item::placed_at((1, 1), '*');
        b.arena.draw(&b.snake, &b.item);

        b.snake.set_heading(Left);
        b.step();
        assert_eq!(b.snake.length(), 4);
        assert_eq!(b.snake.positions().collect::<Vec<_>>(), vec![(6, 6), (6, 7), (5, 7), (5, 6)]);

        // Every tick the head enters the cell the tail is leaving
        for dir in [Up, Right, Down, Left].iter().cycle().take(8) {
            let tail = b.snake.tail_pos();
            b.snake.set_heading(*dir);

            assert_eq!(b.step(), Moved);
            assert_eq!(b.snake.head_pos(), tail);
            assert!(b.snake.is_alive());
        }

        assert_eq!(b.snake.positions().collect::<Vec<_>>(), vec![(6, 6), (6, 7), (5, 7), (5, 6)]);
        assert_eq!(b.snake.death_cause(), None);
    }

    #[test]
    fn filling_the_board_is_reported() {
        let mut arena = Arena::new(3, 4, Glyphs::default());
        let mut snake = Snake::new((1, 1), (0, 1), '#');
        let mut item = Item::placed_at((1, 2), '*');
        let mut rng = StdRng::seed_from_u64(0);
        arena.draw(&snake, &item);

        arena.clear_trail(&snake);
        assert_eq!(snake.tick(&arena, &mut item, &mut rng).unwrap(), Filled);
        assert!(snake.is_alive());
        assert_eq!(snake.length(), 2);
    }

    #[test]
    fn directions_map_to_unit_headings() {
        assert_eq!(Up.heading(), (-1, 0));
        assert_eq!(Down.heading(), (1, 0));
        assert_eq!(Left.heading(), (0, -1));
        assert_eq!(Right.heading(), (0, 1));
    }
}
