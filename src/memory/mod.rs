/*!
 * Memory Management
 *
 * Page-backed allocator with address recycling.
 *
 * ## Allocation strategy
 *
 * - **Small blocks** (total size below one page): first-fit search of an
 *   address-ordered free list, falling back to mapping a single fresh page.
 *   Oversized hits are split and the remainder returned to the list.
 *
 * - **Large blocks** (total size of a page or more): a dedicated anonymous
 *   mapping of `ceil(total / PAGE_SIZE)` pages, unmapped wholesale on free.
 *
 * ## Features
 *
 * - **Address recycling**: freed memory is immediately available for reuse
 * - **Block splitting**: larger free blocks are split to serve smaller requests
 * - **Coalescing**: address-adjacent free blocks merge on every insert
 * - **Statistics**: cumulative map/unmap/alloc/free counters plus the live
 *   free-list length
 */

pub mod manager;
pub mod shared;
pub mod traits;
pub mod types;

pub use manager::MapAllocator;
pub use shared::SharedAllocator;
pub use traits::{Allocator, MemoryInfo};
pub use types::{AllocStats, FreeBlockInfo, MemoryError, MemoryResult};
