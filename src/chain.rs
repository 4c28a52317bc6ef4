use crate::error::{GameError, GameResult};
use crate::{Coords, Heading};

/// One body cell. Links are indices into the owning `Chain`'s store.
#[derive(Clone, Debug)]
pub struct Segment {
    pub pos: Coords,
    pub heading: Heading,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked body, head first. Segments are never removed while the
/// snake lives, so the store length is the chain length.
pub struct Chain {
    segments: Vec<Segment>,
    head: usize,
    tail: usize,
}

pub struct Iter<'a> {
    chain: &'a Chain,
    cursor: Option<usize>,
}

impl Chain {
    pub fn new(pos: Coords, heading: Heading) -> Self {
        let head = Segment { pos, heading, prev: None, next: None };
        Chain { segments: vec![head], head: 0, tail: 0 }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn head(&self) -> &Segment {
        &self.segments[self.head]
    }

    pub fn head_mut(&mut self) -> &mut Segment {
        &mut self.segments[self.head]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.tail]
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { chain: self, cursor: Some(self.head) }
    }

    /// Adds a segment one step behind the tail, facing the same way.
    pub fn append_tail(&mut self) -> GameResult<()> {
        self.segments.try_reserve(1).map_err(|_| GameError::AllocationFailure)?;

        let old_tail = self.tail;
        let (row, col) = self.segments[old_tail].pos;
        let (dy, dx) = self.segments[old_tail].heading;
        let new_idx = self.segments.len();

        self.segments.push(Segment {
            pos: (row - dy, col - dx),
            heading: (dy, dx),
            prev: Some(old_tail),
            next: None,
        });
        self.segments[old_tail].next = Some(new_idx);
        self.tail = new_idx;

        Ok(())
    }

    /// Moves every segment by its own heading, head to tail.
    pub fn propagate_positions(&mut self) {
        let mut cursor = Some(self.head);

        while let Some(i) = cursor {
            let seg = &mut self.segments[i];
            seg.pos = (seg.pos.0 + seg.heading.0, seg.pos.1 + seg.heading.1);
            cursor = seg.next;
        }
    }

    /// Each follower takes the heading of the segment ahead of it, walking
    /// tail to head so every read sees this tick's pre-propagation value.
    /// The head is never written here.
    pub fn propagate_headings(&mut self) {
        let mut cursor = self.tail;

        while let Some(prev) = self.segments[cursor].prev {
            self.segments[cursor].heading = self.segments[prev].heading;
            cursor = prev;
        }
    }

    /// Drops every segment, head to tail. Returns how many were released.
    pub fn release(self) -> usize {
        let released = self.iter().count();
        tracing::debug!(released, "snake segments released");
        released
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let seg = &self.chain.segments[self.cursor?];
        self.cursor = seg.next;
        Some(seg)
    }
}
