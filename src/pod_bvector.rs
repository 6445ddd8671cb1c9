//! Block vector for plain-old-data values.
//!
//! Port of `pod_bvector` from `agg_array.h`. Elements live in fixed-size
//! blocks of `1 << S` values, so growing never moves existing elements and
//! indexing is a shift plus a mask. Blocks are kept when the vector is
//! cleared with [`PodBvector::remove_all`] and only released by
//! [`PodBvector::free_tail`] / [`PodBvector::free_all`].

use bytemuck::Pod;
use log::trace;

use crate::error::{Error, Result};

/// Growable block vector. `S` is the block shift (block size `1 << S`).
pub struct PodBvector<T: Pod, const S: u32 = 6> {
    blocks: Vec<Box<[T]>>,
    size: usize,
}

impl<T: Pod, const S: u32> PodBvector<T, S> {
    pub const BLOCK_SHIFT: u32 = S;
    pub const BLOCK_SIZE: usize = 1 << S;
    pub const BLOCK_MASK: usize = (1 << S) - 1;

    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            size: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Elements that fit without allocating another block.
    pub fn capacity(&self) -> usize {
        self.blocks.len() << S
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Append a value.
    pub fn add(&mut self, val: T) {
        let nb = self.size >> S;
        self.ensure_block(nb);
        self.blocks[nb][self.size & Self::BLOCK_MASK] = val;
        self.size += 1;
    }

    /// Drop the last value (no-op when empty).
    pub fn remove_last(&mut self) {
        if self.size > 0 {
            self.size -= 1;
        }
    }

    /// Replace the last value; on an empty vector this simply appends.
    pub fn modify_last(&mut self, val: T) {
        self.remove_last();
        self.add(val);
    }

    /// Reset the logical size; blocks stay allocated for reuse.
    pub fn remove_all(&mut self) {
        self.size = 0;
    }

    /// Truncate to `size` elements and release blocks no longer needed.
    pub fn free_tail(&mut self, size: usize) {
        if size < self.size {
            let keep = (size + Self::BLOCK_MASK) >> S;
            self.blocks.truncate(keep);
            if self.blocks.is_empty() {
                self.blocks.shrink_to_fit();
            }
            self.size = size;
        }
    }

    pub fn free_all(&mut self) {
        self.free_tail(0);
    }

    /// Reserve `num_elements` consecutive slots inside a single block and
    /// return the index of the first one.
    ///
    /// If the run does not fit in what is left of the current block, the
    /// remainder of that block is skipped (filled with zeroed values) and
    /// the run starts a new block. Runs that can never fit in one block
    /// (`num_elements >= BLOCK_SIZE`) return `None`.
    pub fn allocate_continuous_block(&mut self, num_elements: usize) -> Option<usize> {
        if num_elements == 0 || num_elements >= Self::BLOCK_SIZE {
            return None;
        }
        let rest = Self::BLOCK_SIZE - (self.size & Self::BLOCK_MASK);
        if num_elements > rest {
            for _ in 0..rest {
                self.add(T::zeroed());
            }
        }
        let index = self.size;
        for _ in 0..num_elements {
            self.add(T::zeroed());
        }
        Some(index)
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        if i < self.size {
            Some(&self.blocks[i >> S][i & Self::BLOCK_MASK])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        if i < self.size {
            Some(&mut self.blocks[i >> S][i & Self::BLOCK_MASK])
        } else {
            None
        }
    }

    /// Element at `i` counted modulo the size, for cyclic traversal of
    /// closed paths. `None` when the vector is empty.
    pub fn cyclic(&self, i: usize) -> Option<&T> {
        i.checked_rem(self.size).and_then(|i| self.get(i))
    }

    pub fn last(&self) -> Option<&T> {
        self.size.checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn last_mut(&mut self) -> Option<&mut T> {
        match self.size.checked_sub(1) {
            Some(i) => self.get_mut(i),
            None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.size).map(move |i| &self[i])
    }

    /// Number of bytes [`serialize`](Self::serialize) writes.
    pub fn byte_size(&self) -> usize {
        self.size * core::mem::size_of::<T>()
    }

    /// Copy the raw bytes of all elements, in order, into `dst`.
    ///
    /// The byte image is only meaningful to a vector of the same element
    /// type and layout.
    pub fn serialize(&self, dst: &mut [u8]) -> Result<usize> {
        let needed = self.byte_size();
        if dst.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                available: dst.len(),
            });
        }
        let mut pos = 0;
        let mut remaining = self.size;
        for block in &self.blocks {
            if remaining == 0 {
                break;
            }
            let n = remaining.min(Self::BLOCK_SIZE);
            let bytes: &[u8] = bytemuck::cast_slice(&block[..n]);
            dst[pos..pos + bytes.len()].copy_from_slice(bytes);
            pos += bytes.len();
            remaining -= n;
        }
        Ok(needed)
    }

    /// Replace the contents with elements read from `data`.
    ///
    /// `data` need not be aligned for `T`.
    pub fn deserialize(&mut self, data: &[u8]) -> Result<()> {
        let element_size = core::mem::size_of::<T>();
        if element_size == 0 || data.len() % element_size != 0 {
            return Err(Error::MisalignedByteLength {
                len: data.len(),
                element_size,
            });
        }
        self.remove_all();
        for chunk in data.chunks_exact(element_size) {
            self.add(bytemuck::pod_read_unaligned(chunk));
        }
        Ok(())
    }

    fn ensure_block(&mut self, nb: usize) {
        while nb >= self.blocks.len() {
            self.blocks
                .push(vec![T::zeroed(); Self::BLOCK_SIZE].into_boxed_slice());
            trace!(
                "pod_bvector: allocated block {} ({} elements each)",
                self.blocks.len(),
                Self::BLOCK_SIZE
            );
        }
    }
}

impl<T: Pod, const S: u32> Default for PodBvector<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pod, const S: u32> Clone for PodBvector<T, S> {
    fn clone(&self) -> Self {
        let used = (self.size + Self::BLOCK_MASK) >> S;
        Self {
            blocks: self.blocks[..used].to_vec(),
            size: self.size,
        }
    }
}

impl<T: Pod + core::fmt::Debug, const S: u32> core::fmt::Debug for PodBvector<T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Pod, const S: u32> core::ops::Index<usize> for PodBvector<T, S> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        assert!(i < self.size, "index {i} out of range for size {}", self.size);
        &self.blocks[i >> S][i & Self::BLOCK_MASK]
    }
}

impl<T: Pod, const S: u32> core::ops::IndexMut<usize> for PodBvector<T, S> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        assert!(i < self.size, "index {i} out of range for size {}", self.size);
        &mut self.blocks[i >> S][i & Self::BLOCK_MASK]
    }
}

// ============================================================================
// Tests
// ============================================================================
