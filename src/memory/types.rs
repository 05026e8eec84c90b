/*!
 * Memory Types
 * Common types for memory management
 */

use crate::core::types::{Address, Pages, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("anonymous mapping of {pages} page(s) failed (errno {errno})")]
    MapFailed { pages: Pages, errno: i32 },

    #[error("unmapping {pages} page(s) at 0x{address:x} failed (errno {errno})")]
    UnmapFailed {
        address: Address,
        pages: Pages,
        errno: i32,
    },

    #[error("allocation of {requested} bytes overflows the total block size")]
    RequestTooLarge { requested: Size },

    #[error("page count is zero or exceeds the address space")]
    InvalidPageCount,
}

/// Allocator statistics snapshot
///
/// The counters are cumulative over the allocator's lifetime;
/// `free_list_length` is recomputed from the live chain on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocStats {
    pub pages_mapped: u64,
    pub pages_unmapped: u64,
    pub allocations: u64,
    pub frees: u64,
    pub free_list_length: usize,
}

impl std::fmt::Display for AllocStats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "== mapalloc stats ==")?;
        writeln!(f, "Mapped:   {}", self.pages_mapped)?;
        writeln!(f, "Unmapped: {}", self.pages_unmapped)?;
        writeln!(f, "Allocs:   {}", self.allocations)?;
        writeln!(f, "Frees:    {}", self.frees)?;
        write!(f, "Freelen:  {}", self.free_list_length)
    }
}

/// Read-only description of one free-list node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeBlockInfo {
    pub address: Address,
    pub size: Size,
}

impl FreeBlockInfo {
    /// One-past-the-end address of the block
    pub fn end(&self) -> Address {
        self.address + self.size
    }
}
