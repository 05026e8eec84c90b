/*!
 * Allocator Limits and Constants
 *
 * Centralized location for the allocator's fixed sizes. All components
 * share these values; none of them is configurable at runtime.
 */

use crate::core::types::Size;

/// OS page size (4KB)
/// Granularity of every acquisition from and release to the OS.
pub const PAGE_SIZE: Size = 4096;

/// Per-allocation header: one machine word immediately before the pointer
/// returned to the caller, holding the total block size including itself.
pub const HEADER_SIZE: Size = std::mem::size_of::<usize>();

/// Smallest span that can host free-list bookkeeping (size word + next link).
/// A split remainder at or below this size cannot be re-listed and stays as
/// padding inside the allocated block.
pub const MIN_FREE_BLOCK: Size = 2 * std::mem::size_of::<usize>();
