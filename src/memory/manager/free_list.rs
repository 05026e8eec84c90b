/*!
 * Free List
 * Address-ordered intrusive list of reclaimed blocks
 */

use super::super::types::FreeBlockInfo;
use crate::core::limits::MIN_FREE_BLOCK;
use crate::core::types::Size;
use std::ptr;

/// Node living at the start of the freed span it describes. The span holds
/// no payload while free; its first two words are repurposed as bookkeeping.
///
/// Block totals are not rounded to word multiples (path selection depends
/// on the exact total), so a node may sit at any byte address. Nodes are
/// therefore always moved with unaligned reads/writes, never dereferenced
/// in place.
#[repr(C)]
#[derive(Clone, Copy)]
struct FreeNode {
    size: Size,
    next: *mut FreeNode,
}

const _: () = assert!(std::mem::size_of::<FreeNode>() == MIN_FREE_BLOCK);

/// Singly-linked free list kept in strictly ascending address order.
///
/// Invariant after every mutation: no two nodes are address-adjacent; any
/// adjacency created by an insert is eliminated immediately by coalescing.
/// All traversals are iterative, so chain length never costs call-stack
/// depth.
pub(super) struct FreeList {
    head: *mut FreeNode,
}

impl FreeList {
    pub fn new() -> Self {
        Self {
            head: ptr::null_mut(),
        }
    }

    /// Insert a block of `size` bytes at `addr`, keeping address order and
    /// merging with any adjacent neighbor on either side.
    ///
    /// # Safety
    ///
    /// `addr` must point to at least `size` bytes of mapped memory owned by
    /// no live allocation and not already on the list; `size` must be at
    /// least `MIN_FREE_BLOCK`.
    pub unsafe fn insert(&mut self, addr: *mut u8, size: Size) {
        debug_assert!(size >= MIN_FREE_BLOCK);
        debug_assert!(!addr.is_null());

        let node = addr.cast::<FreeNode>();

        // Locate the insertion point: prev is the last node below addr.
        let mut prev: *mut FreeNode = ptr::null_mut();
        let mut cur = self.head;
        while !cur.is_null() && cur.cast::<u8>() < addr {
            prev = cur;
            cur = unsafe { cur.read_unaligned().next };
        }

        unsafe {
            node.write_unaligned(FreeNode { size, next: cur });
            if prev.is_null() {
                self.head = node;
            } else {
                let mut link = prev.read_unaligned();
                link.next = node;
                prev.write_unaligned(link);
            }

            // Merge forward from the new node, then close the predecessor
            // gap; the second pass also re-checks forward because a merge
            // can create a further adjacency.
            Self::merge_following(node);
            if !prev.is_null() {
                Self::merge_following(prev);
            }
        }
    }

    /// Merge `node` with its successors for as long as they are adjacent.
    unsafe fn merge_following(node: *mut FreeNode) {
        loop {
            let mut merged = unsafe { node.read_unaligned() };
            let next = merged.next;
            if next.is_null() {
                break;
            }
            let end = unsafe { node.cast::<u8>().add(merged.size) };
            if end != next.cast::<u8>() {
                break;
            }
            unsafe {
                let absorbed = next.read_unaligned();
                merged.size += absorbed.size;
                merged.next = absorbed.next;
                node.write_unaligned(merged);
            }
        }
    }

    /// Remove and return the first block (in address order) of at least
    /// `min_size` bytes, or `None` if no block qualifies. First match wins;
    /// no fit-quality comparison is made.
    ///
    /// The returned span is plain uninitialized memory owned by the caller.
    pub unsafe fn take_first_fit(&mut self, min_size: Size) -> Option<(*mut u8, Size)> {
        let mut prev: *mut FreeNode = ptr::null_mut();
        let mut cur = self.head;

        while !cur.is_null() {
            unsafe {
                let node = cur.read_unaligned();
                if node.size >= min_size {
                    if prev.is_null() {
                        self.head = node.next;
                    } else {
                        let mut link = prev.read_unaligned();
                        link.next = node.next;
                        prev.write_unaligned(link);
                    }
                    return Some((cur.cast::<u8>(), node.size));
                }
                prev = cur;
                cur = node.next;
            }
        }
        None
    }

    /// Number of nodes on the list. Pure read; walks the chain.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut cur = self.head;
        while !cur.is_null() {
            count += 1;
            cur = unsafe { cur.read_unaligned().next };
        }
        count
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.head.is_null()
    }

    /// Read-only snapshot of the chain, in list (ascending address) order.
    pub fn blocks(&self) -> Vec<FreeBlockInfo> {
        let mut out = Vec::new();
        let mut cur = self.head;
        while !cur.is_null() {
            let node = unsafe { cur.read_unaligned() };
            out.push(FreeBlockInfo {
                address: cur as usize,
                size: node.size,
            });
            cur = node.next;
        }
        out
    }
}
