/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::types::{AllocStats, MemoryResult};
use crate::core::types::Size;
use std::ptr::NonNull;

/// Memory allocator interface
pub trait Allocator {
    /// Allocate `size` usable bytes, returning the address just past the
    /// size header. A zero-byte request yields a valid, distinct block.
    fn allocate(&mut self, size: Size) -> MemoryResult<NonNull<u8>>;

    /// Release a previously allocated block.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this allocator and
    /// must not have been freed already. Violating this is undefined
    /// behavior; the allocator performs no misuse detection.
    unsafe fn deallocate(&mut self, ptr: NonNull<u8>) -> MemoryResult<()>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get a statistics snapshot
    fn stats(&self) -> AllocStats;

    /// Current number of free-list nodes
    fn free_list_length(&self) -> usize {
        self.stats().free_list_length
    }
}
