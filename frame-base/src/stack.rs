//! Value stack of the frame.

use core::fmt;
use alloc::vec::Vec;

/// Value type of the data stack.
pub type Cell = i64;

/// LIFO container of [`Cell`]s, addressable only at the top.
///
/// Unbounded; it is emptied only by pops, never implicitly.
///
/// # Example
/// ```
/// # use frame_base::stack::{ValueStack, StackUnderflow};
/// let mut stack = ValueStack::new();
/// stack.push(1);
/// stack.push(2);
///
/// assert_eq!(stack.peek(), Ok(2));
/// assert_eq!(stack.pop(), Ok(2));
/// assert_eq!(stack.pop(), Ok(1));
/// assert_eq!(stack.pop(), Err(StackUnderflow));
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct ValueStack {
    cells: Vec<Cell>,
}

impl ValueStack {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, v: Cell) {
        self.cells.push(v);
    }
    pub fn pop(&mut self) -> Result<Cell, StackUnderflow> {
        self.cells.pop().ok_or(StackUnderflow)
    }
    pub fn peek(&self) -> Result<Cell, StackUnderflow> {
        self.cells.last().copied().ok_or(StackUnderflow)
    }

    /// Current element count.
    pub fn depth(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Stack contents, bottom first.
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }
}

impl From<Vec<Cell>> for ValueStack {
    fn from(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

/// Attempt to remove or read a value from an empty [`ValueStack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackUnderflow;

impl fmt::Display for StackUnderflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame data stack underflow")
    }
}

#[cfg(not(feature = "no-std"))]
impl std::error::Error for StackUnderflow {}
