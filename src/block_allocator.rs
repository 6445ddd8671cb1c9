//! Arena allocator for variable-size byte runs.
//!
//! Port of `block_allocator` from `agg_array.h`. Memory is carved from the
//! remaining space of the current block; when a request does not fit, a
//! fresh block of at least the configured block size is appended. There is
//! no per-allocation free: [`BlockAllocator::remove_all`] releases every
//! block at once.
//!
//! Instead of raw pointers, allocations are addressed through
//! [`BlockHandle`]s. A handle remembers the arena generation it came from,
//! so it stops resolving once the arena has been reset.

use bytemuck::Pod;
use log::trace;

/// Location of one allocation inside a [`BlockAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle {
    generation: u32,
    block: usize,
    offset: usize,
    len: usize,
}

impl BlockHandle {
    /// Number of bytes in the allocation.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the block the allocation lives in.
    pub fn block(&self) -> usize {
        self.block
    }
}

/// Growable arena of byte blocks.
pub struct BlockAllocator {
    block_size: usize,
    blocks: Vec<Box<[u8]>>,
    // Offset of the first free byte in the last block.
    cursor: usize,
    generation: u32,
}

impl BlockAllocator {
    /// Create an arena whose blocks hold at least `block_size` bytes.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
            blocks: Vec::new(),
            cursor: 0,
            generation: 0,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Total bytes reserved by all blocks.
    pub fn capacity(&self) -> usize {
        self.blocks.iter().map(|b| b.len()).sum()
    }

    /// Bytes still free in the current block.
    pub fn rest(&self) -> usize {
        self.blocks.last().map_or(0, |b| b.len() - self.cursor)
    }

    /// Release every block. Handles issued before the call stop resolving.
    pub fn remove_all(&mut self) {
        self.blocks.clear();
        self.cursor = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Reserve `size` bytes whose start address is a multiple of `alignment`.
    ///
    /// Returns `None` for zero-size requests. `alignment` of 0 or 1 means
    /// unaligned; other values must be powers of two.
    pub fn allocate(&mut self, size: usize, alignment: usize) -> Option<BlockHandle> {
        if size == 0 {
            return None;
        }
        let alignment = alignment.max(1);
        debug_assert!(alignment.is_power_of_two());

        if let Some(handle) = self.try_carve(size, alignment) {
            return Some(handle);
        }
        // Worst-case padding so the retry in the new block cannot fail.
        self.allocate_block(size + alignment - 1);
        self.try_carve(size, alignment)
    }

    /// Reserve room for `count` values of `T`, aligned for `T`.
    pub fn allocate_for<T: Pod>(&mut self, count: usize) -> Option<BlockHandle> {
        self.allocate(
            count * core::mem::size_of::<T>(),
            core::mem::align_of::<T>(),
        )
    }

    /// Bytes of an allocation, or `None` if the handle is stale.
    pub fn get(&self, handle: &BlockHandle) -> Option<&[u8]> {
        if handle.generation != self.generation {
            return None;
        }
        self.blocks
            .get(handle.block)
            .and_then(|b| b.get(handle.offset..handle.offset + handle.len))
    }

    pub fn get_mut(&mut self, handle: &BlockHandle) -> Option<&mut [u8]> {
        if handle.generation != self.generation {
            return None;
        }
        self.blocks
            .get_mut(handle.block)
            .and_then(|b| b.get_mut(handle.offset..handle.offset + handle.len))
    }

    /// View an allocation as a slice of `T`. Fails if the handle is stale or
    /// the run is not aligned/sized for `T`.
    pub fn slice_of<T: Pod>(&self, handle: &BlockHandle) -> Option<&[T]> {
        self.get(handle)
            .and_then(|bytes| bytemuck::try_cast_slice(bytes).ok())
    }

    pub fn slice_of_mut<T: Pod>(&mut self, handle: &BlockHandle) -> Option<&mut [T]> {
        self.get_mut(handle)
            .and_then(|bytes| bytemuck::try_cast_slice_mut(bytes).ok())
    }

    fn try_carve(&mut self, size: usize, alignment: usize) -> Option<BlockHandle> {
        let block = self.blocks.len().checked_sub(1)?;
        let data = &self.blocks[block];
        let addr = data.as_ptr() as usize + self.cursor;
        let pad = (alignment - addr % alignment) % alignment;
        if self.cursor + pad + size > data.len() {
            return None;
        }
        let offset = self.cursor + pad;
        self.cursor = offset + size;
        Some(BlockHandle {
            generation: self.generation,
            block,
            offset,
            len: size,
        })
    }

    fn allocate_block(&mut self, size: usize) {
        let size = size.max(self.block_size);
        self.blocks.push(vec![0u8; size].into_boxed_slice());
        self.cursor = 0;
        trace!(
            "block allocator: new block of {} bytes ({} blocks)",
            size,
            self.blocks.len()
        );
    }
}

impl Default for BlockAllocator {
    fn default() -> Self {
        Self::new(16384 - 16)
    }
}

// ============================================================================
// Tests
// ============================================================================
