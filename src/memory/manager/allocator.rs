/*!
 * Allocation Engine
 * Allocation and deallocation logic
 */

use super::MapAllocator;
use crate::core::limits::{HEADER_SIZE, MIN_FREE_BLOCK, PAGE_SIZE};
use crate::core::types::Size;
use crate::memory::types::{MemoryError, MemoryResult};
use log::debug;
use std::ptr::NonNull;

impl MapAllocator {
    /// Allocate `size` usable bytes.
    ///
    /// The total block size is `size` plus the word-sized header. Totals
    /// below one page are served first-fit from the free list, falling back
    /// to a single fresh page; totals of a page or more get a dedicated
    /// multi-page mapping. The header is written at the block base and the
    /// address just past it is returned.
    pub fn allocate(&mut self, size: Size) -> MemoryResult<NonNull<u8>> {
        // Counted unconditionally, before path selection.
        self.allocations += 1;

        let total = size
            .checked_add(HEADER_SIZE)
            .ok_or(MemoryError::RequestTooLarge { requested: size })?
            // Every small block must be able to host a free node once it
            // comes back; see DESIGN.md on this deviation from the C
            // reference, which could clobber a neighbor on tiny frees.
            .max(MIN_FREE_BLOCK);

        let block = if total < PAGE_SIZE {
            self.allocate_small(total)?
        } else {
            let pages = total.div_ceil(PAGE_SIZE);
            let block = self.page_source.acquire(pages)?;
            // The rounding waste up to PAGE_SIZE - 1 bytes stays inside the
            // mapping until the whole block is freed; sub-page regions of a
            // dedicated mapping are never listed.
            debug!(
                "large alloc: {} byte(s) over {} page(s) at {:p}",
                total,
                pages,
                block.as_ptr()
            );
            block
        };

        // SAFETY: `block` spans at least `total` bytes of exclusively owned
        // mapped memory. Recycled spans can start at any byte address after
        // odd-sized splits, so the header is stored unaligned.
        unsafe {
            block.cast::<usize>().as_ptr().write_unaligned(total);
            Ok(NonNull::new_unchecked(block.as_ptr().add(HEADER_SIZE)))
        }
    }

    /// Small-block path: free-list reuse with splitting, then a fresh page.
    fn allocate_small(&mut self, total: Size) -> MemoryResult<NonNull<u8>> {
        // SAFETY: spans handed out by the free list are mapped and unowned;
        // remainder inserts stay inside the span just taken.
        unsafe {
            if let Some((addr, taken)) = self.free_list.take_first_fit(total) {
                let leftover = taken - total;
                if leftover > MIN_FREE_BLOCK {
                    self.free_list.insert(addr.add(total), leftover);
                }
                debug!(
                    "recycled {} byte(s) at {:p} (block was {}, remainder {})",
                    total, addr, taken, leftover
                );
                return Ok(NonNull::new_unchecked(addr));
            }

            let page = self.page_source.acquire(1)?;
            let leftover = PAGE_SIZE - total;
            if leftover > MIN_FREE_BLOCK {
                self.free_list.insert(page.as_ptr().add(total), leftover);
            }
            debug!(
                "small alloc: {} byte(s) from a fresh page at {:p}",
                total,
                page.as_ptr()
            );
            Ok(page)
        }
    }

    /// Release a previously allocated block.
    ///
    /// The total size is recovered from the header word just before `ptr`.
    /// Sub-page blocks go back onto the free list; page-sized and larger
    /// blocks are unmapped wholesale.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by [`MapAllocator::allocate`] on this
    /// allocator and must not have been freed already. Misuse is undefined
    /// behavior; no detection is performed.
    pub unsafe fn deallocate(&mut self, ptr: NonNull<u8>) -> MemoryResult<()> {
        // Counted unconditionally.
        self.frees += 1;

        unsafe {
            let header = ptr.as_ptr().sub(HEADER_SIZE);
            let total = header.cast::<usize>().read_unaligned();

            if total < PAGE_SIZE {
                debug!("free: {} byte(s) at {:p} back onto the list", total, header);
                self.free_list.insert(header, total);
                Ok(())
            } else {
                let pages = total.div_ceil(PAGE_SIZE);
                debug!("free: {} page(s) at {:p} back to the OS", pages, header);
                self.page_source
                    .release(NonNull::new_unchecked(header), pages)
            }
        }
    }
}
