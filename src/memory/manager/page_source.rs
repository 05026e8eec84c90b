/*!
 * Page Source
 * Whole-page acquisition from and release to the OS
 */

use super::super::types::{MemoryError, MemoryResult};
use crate::core::limits::PAGE_SIZE;
use crate::core::types::Pages;
use log::{debug, error};
use std::ptr::{self, NonNull};

/// Acquires and releases anonymous memory in whole-page units.
///
/// Owns the cumulative mapped/unmapped page counters; nothing else in the
/// allocator touches the OS.
#[derive(Debug, Default)]
pub(super) struct PageSource {
    pages_mapped: u64,
    pages_unmapped: u64,
}

impl PageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte length of a page run; rejects zero and counts whose byte size
    /// does not fit in the address space.
    fn byte_length(pages: Pages) -> MemoryResult<usize> {
        if pages == 0 {
            return Err(MemoryError::InvalidPageCount);
        }
        pages
            .checked_mul(PAGE_SIZE)
            .ok_or(MemoryError::InvalidPageCount)
    }

    /// Map `pages` contiguous, zero-initialized, readable-writable pages.
    ///
    /// Mapping failure is surfaced as an explicit error rather than handed
    /// back as a sentinel address.
    pub fn acquire(&mut self, pages: Pages) -> MemoryResult<NonNull<u8>> {
        let len = Self::byte_length(pages)?;

        // SAFETY: anonymous private mapping with no backing fd; the OS
        // chooses the address.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };

        if addr == libc::MAP_FAILED {
            let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
            error!("mmap of {} page(s) failed (errno {})", pages, errno);
            return Err(MemoryError::MapFailed { pages, errno });
        }

        self.pages_mapped += pages as u64;
        debug!("mapped {} page(s) at {:p}", pages, addr);

        // SAFETY: mmap never returns null on success.
        Ok(unsafe { NonNull::new_unchecked(addr.cast::<u8>()) })
    }

    /// Return exactly `pages` pages at `addr` to the OS.
    ///
    /// # Safety
    ///
    /// `addr` must be the base of a mapping previously returned by
    /// `acquire`, and `pages` must be the page count it was acquired with.
    /// Partial release is not supported.
    pub unsafe fn release(&mut self, addr: NonNull<u8>, pages: Pages) -> MemoryResult<()> {
        let len = Self::byte_length(pages)?;

        let rc = unsafe { libc::munmap(addr.as_ptr().cast::<libc::c_void>(), len) };
        if rc != 0 {
            let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
            error!(
                "munmap of {} page(s) at {:p} failed (errno {})",
                pages,
                addr.as_ptr(),
                errno
            );
            return Err(MemoryError::UnmapFailed {
                address: addr.as_ptr() as usize,
                pages,
                errno,
            });
        }

        self.pages_unmapped += pages as u64;
        debug!("unmapped {} page(s) at {:p}", pages, addr.as_ptr());
        Ok(())
    }

    /// Cumulative pages mapped
    pub fn pages_mapped(&self) -> u64 {
        self.pages_mapped
    }

    /// Cumulative pages unmapped
    pub fn pages_unmapped(&self) -> u64 {
        self.pages_unmapped
    }
}
