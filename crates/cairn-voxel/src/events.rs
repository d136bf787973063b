//! Grid replacement events.
//!
//! [`BlockGrid::fill`](crate::BlockGrid::fill) pushes a [`GridFilled`] into a
//! [`GridEventBuffer`]; a rebuild coordinator drains the buffer and
//! re-synthesizes the addressed chunks. No callbacks are registered anywhere.

use crate::block::ChunkId;

/// Emitted once every time a chunk's grid is replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridFilled {
    /// The chunk whose grid was replaced.
    pub chunk: ChunkId,
}

/// Double-buffered storage for [`GridFilled`] events.
///
/// Events written in the current frame stay readable through the next
/// [`swap`](Self::swap) and are dropped by the one after it.
/// [`drain`](Self::drain) consumes everything readable at once.
pub struct GridEventBuffer {
    /// Events from the previous frame.
    prev: Vec<GridFilled>,
    /// Events from the current frame.
    current: Vec<GridFilled>,
}

impl GridEventBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            prev: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Records an event.
    pub fn send(&mut self, event: GridFilled) {
        self.current.push(event);
    }

    /// Returns all readable events, oldest first.
    pub fn read(&self) -> impl Iterator<Item = &GridFilled> {
        self.prev.iter().chain(self.current.iter())
    }

    /// Removes and returns all readable events, oldest first.
    pub fn drain(&mut self) -> Vec<GridFilled> {
        let mut events = std::mem::take(&mut self.prev);
        events.append(&mut self.current);
        events
    }

    /// Returns the number of readable events.
    pub fn len(&self) -> usize {
        self.prev.len() + self.current.len()
    }

    /// Returns `true` if there are no readable events.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advances one frame: previous events are dropped, current become previous.
    pub fn swap(&mut self) {
        self.prev.clear();
        std::mem::swap(&mut self.prev, &mut self.current);
    }

    /// Drops every event.
    pub fn clear(&mut self) {
        self.prev.clear();
        self.current.clear();
    }
}

impl Default for GridEventBuffer {
    fn default() -> Self {
        Self::new()
    }
}
