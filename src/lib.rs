/*!
 * mapalloc
 *
 * A user-space memory allocator backed directly by the operating system's
 * anonymous page-mapping primitive. Small blocks are carved out of 4KB pages
 * and recycled through an address-ordered free list with coalescing; blocks
 * of a page or more get a dedicated mapping that is returned to the OS on
 * free.
 */

pub mod core;
pub mod memory;

// Re-exports
pub use memory::{
    AllocStats, Allocator, FreeBlockInfo, MapAllocator, MemoryError, MemoryInfo, MemoryResult,
    SharedAllocator,
};
