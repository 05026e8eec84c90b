/*!
 * Shared Allocator
 * Coarse-locked handle for cross-thread use
 */

use super::manager::MapAllocator;
use super::types::{AllocStats, FreeBlockInfo, MemoryResult};
use crate::core::types::Size;
use parking_lot::Mutex;
use std::ptr::NonNull;
use std::sync::Arc;

/// Thread-safe wrapper around [`MapAllocator`].
///
/// The engine has no internal synchronization, so the entire
/// allocate/deallocate critical section runs under one mutex; clones share
/// the same engine.
#[derive(Clone, Default)]
pub struct SharedAllocator {
    inner: Arc<Mutex<MapAllocator>>,
}

// SAFETY: the raw pointers inside the engine refer to process-wide anonymous
// mappings that are valid from any thread; the mutex serializes every access
// to the chain and the counters.
unsafe impl Send for SharedAllocator {}
unsafe impl Sync for SharedAllocator {}

impl SharedAllocator {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MapAllocator::new())),
        }
    }

    /// See [`MapAllocator::allocate`].
    pub fn allocate(&self, size: Size) -> MemoryResult<NonNull<u8>> {
        self.inner.lock().allocate(size)
    }

    /// See [`MapAllocator::deallocate`].
    ///
    /// # Safety
    ///
    /// Same contract: `ptr` must be a live allocation from this allocator.
    pub unsafe fn deallocate(&self, ptr: NonNull<u8>) -> MemoryResult<()> {
        unsafe { self.inner.lock().deallocate(ptr) }
    }

    pub fn stats(&self) -> AllocStats {
        self.inner.lock().stats()
    }

    pub fn free_blocks(&self) -> Vec<FreeBlockInfo> {
        self.inner.lock().free_blocks()
    }
}
