/*!
 * Allocation Manager
 *
 * The allocator facade: owns the free list, the page source, and the
 * cumulative operation counters. Explicitly constructed; there is no
 * process-global instance and no implicit first-call initialization.
 */

mod allocator;
mod free_list;
mod page_source;

use super::traits::{Allocator, MemoryInfo};
use super::types::{AllocStats, FreeBlockInfo, MemoryResult};
use crate::core::limits::PAGE_SIZE;
use crate::core::types::Size;
use free_list::FreeList;
use log::info;
use page_source::PageSource;
use std::ptr::NonNull;

/// Page-backed first-fit allocator.
///
/// Single-threaded by construction: operations take `&mut self`, and the
/// type is not `Send`/`Sync` (it holds raw pointers into its own mappings).
/// Wrap it in [`super::SharedAllocator`] for cross-thread use.
pub struct MapAllocator {
    free_list: FreeList,
    page_source: PageSource,
    allocations: u64,
    frees: u64,
}

impl MapAllocator {
    pub fn new() -> Self {
        info!(
            "map allocator initialized (page size {} bytes, first-fit free list)",
            PAGE_SIZE
        );
        Self {
            free_list: FreeList::new(),
            page_source: PageSource::new(),
            allocations: 0,
            frees: 0,
        }
    }

    /// Statistics snapshot. The free-list length is recomputed from the
    /// live chain on every call, never cached.
    pub fn stats(&self) -> AllocStats {
        AllocStats {
            pages_mapped: self.page_source.pages_mapped(),
            pages_unmapped: self.page_source.pages_unmapped(),
            allocations: self.allocations,
            frees: self.frees,
            free_list_length: self.free_list.len(),
        }
    }

    /// Write the statistics snapshot to stderr.
    pub fn print_stats(&self) {
        eprintln!("{}", self.stats());
    }

    /// Read-only snapshot of the free chain in ascending address order.
    pub fn free_blocks(&self) -> Vec<FreeBlockInfo> {
        self.free_list.blocks()
    }
}

impl Allocator for MapAllocator {
    fn allocate(&mut self, size: Size) -> MemoryResult<NonNull<u8>> {
        MapAllocator::allocate(self, size)
    }

    unsafe fn deallocate(&mut self, ptr: NonNull<u8>) -> MemoryResult<()> {
        unsafe { MapAllocator::deallocate(self, ptr) }
    }
}

impl MemoryInfo for MapAllocator {
    fn stats(&self) -> AllocStats {
        MapAllocator::stats(self)
    }
}

impl Default for MapAllocator {
    fn default() -> Self {
        Self::new()
    }
}
