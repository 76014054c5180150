//! Snake body - ordered cells, head first.

use std::collections::VecDeque;

use crate::types::Position;

/// The snake's body. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// A one-cell snake.
    pub fn new(head: Position) -> Self {
        let mut body = VecDeque::with_capacity(16);
        body.push_back(head);
        Self { body }
    }

    /// Build a snake from segments listed head first. Returns `None` when empty.
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    /// Drop the tail segment unless that would empty the snake.
    pub(crate) fn shed_tail(&mut self) -> bool {
        if self.body.len() > 1 {
            self.body.pop_back();
            true
        } else {
            false
        }
    }
}
