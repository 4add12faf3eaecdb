//! Block-allocated storage addressed by index
//!
//! Nodes refer to each other by `u32` index rather than by pointer, so
//! the whole graph can be dropped or reused in one shot. Blocks are
//! retained across [`clear`](Arena::clear), which keeps steady-state
//! rasterization free of allocation.

use std::ops::{Index, IndexMut};

const BLOCK_SIZE: usize = 256;

/// Growable arena handing out stable `u32` indices
#[derive(Debug, Clone)]
pub struct Arena<T> {
    blocks: Vec<Vec<T>>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Create an empty arena
    pub fn new() -> Self {
        Self { blocks: Vec::new(), len: 0 }
    }
    /// Number of live entries
    pub fn len(&self) -> usize {
        self.len
    }
    /// True if no entries are live
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Append an entry, returning its index
    pub fn push(&mut self, value: T) -> u32 {
        let block = self.len / BLOCK_SIZE;
        let offset = self.len % BLOCK_SIZE;
        if block == self.blocks.len() {
            self.blocks.push(Vec::with_capacity(BLOCK_SIZE));
        }
        let slots = &mut self.blocks[block];
        if offset < slots.len() {
            slots[offset] = value; // slot retained from an earlier run
        } else {
            slots.push(value);
        }
        self.len += 1;
        (self.len - 1) as u32
    }
    /// Forget all entries, keeping the allocated blocks
    pub fn clear(&mut self) {
        self.len = 0;
    }
    /// Iterate over live entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.blocks.iter().flat_map(|b| b.iter()).take(self.len)
    }
}

impl<T> Index<u32> for Arena<T> {
    type Output = T;
    fn index(&self, index: u32) -> &T {
        let index = index as usize;
        debug_assert!(index < self.len);
        &self.blocks[index / BLOCK_SIZE][index % BLOCK_SIZE]
    }
}

impl<T> IndexMut<u32> for Arena<T> {
    fn index_mut(&mut self, index: u32) -> &mut T {
        let index = index as usize;
        debug_assert!(index < self.len);
        &mut self.blocks[index / BLOCK_SIZE][index % BLOCK_SIZE]
    }
}
