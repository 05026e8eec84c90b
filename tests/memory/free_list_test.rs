/*!
 * Free-Chain Invariant Tests
 * Randomized allocate/free sequences checking ordering, adjacency, and
 * accounting invariants
 */

use mapalloc::{FreeBlockInfo, MapAllocator};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ptr::NonNull;

/// Returns a description of the first violated chain invariant, if any.
fn chain_violation(blocks: &[FreeBlockInfo]) -> Option<String> {
    for pair in blocks.windows(2) {
        if pair[0].address >= pair[1].address {
            return Some(format!("addresses out of order: {:?}", pair));
        }
        if pair[0].end() == pair[1].address {
            return Some(format!("unmerged adjacent blocks: {:?}", pair));
        }
        if pair[0].end() > pair[1].address {
            return Some(format!("overlapping blocks: {:?}", pair));
        }
    }
    None
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_sequences_preserve_chain_invariants(
        ops in proptest::collection::vec(0usize..4096, 1..200)
    ) {
        let mut alloc = MapAllocator::new();
        let mut live: Vec<NonNull<u8>> = Vec::new();
        let mut allocated = 0u64;
        let mut freed = 0u64;

        for op in ops {
            if op % 3 == 0 && !live.is_empty() {
                let ptr = live.swap_remove(op % live.len());
                unsafe { alloc.deallocate(ptr).unwrap() };
                freed += 1;
            } else {
                // Mostly small requests, with the occasional multi-page one.
                let size = if op % 31 == 0 { 4096 + op } else { op };
                live.push(alloc.allocate(size).unwrap());
                allocated += 1;
            }

            let blocks = alloc.free_blocks();
            prop_assert!(chain_violation(&blocks).is_none(),
                "{}", chain_violation(&blocks).unwrap());
        }

        let stats = alloc.stats();
        prop_assert_eq!(stats.allocations, allocated);
        prop_assert_eq!(stats.frees, freed);
        prop_assert_eq!(allocated - freed, live.len() as u64);

        for ptr in live {
            unsafe { alloc.deallocate(ptr).unwrap() };
        }
        let blocks = alloc.free_blocks();
        prop_assert!(chain_violation(&blocks).is_none(),
            "{}", chain_violation(&blocks).unwrap());
    }
}

#[test]
fn seeded_stress_mix_keeps_the_chain_sound() {
    let mut rng = StdRng::seed_from_u64(0x6d61_7061_6c6c_6f63);
    let mut alloc = MapAllocator::new();
    let mut live: Vec<NonNull<u8>> = Vec::new();

    for step in 0..3000usize {
        if rng.gen_bool(0.5) && !live.is_empty() {
            let idx = rng.gen_range(0..live.len());
            let ptr = live.swap_remove(idx);
            unsafe { alloc.deallocate(ptr).expect("free") };
        } else {
            let size = rng.gen_range(0..3000);
            live.push(alloc.allocate(size).expect("allocation"));
        }

        if step % 100 == 0 {
            assert_eq!(chain_violation(&alloc.free_blocks()), None);
        }
    }

    let stats = alloc.stats();
    assert_eq!(stats.allocations - stats.frees, live.len() as u64);

    for ptr in live {
        unsafe { alloc.deallocate(ptr).expect("free") };
    }
    assert_eq!(chain_violation(&alloc.free_blocks()), None);

    let stats = alloc.stats();
    assert_eq!(stats.allocations, stats.frees);
}

#[test]
fn interleaved_frees_never_leave_mergeable_neighbors() {
    let mut alloc = MapAllocator::new();

    // Carve one page into eight contiguous blocks.
    let ptrs: Vec<NonNull<u8>> = (0..8)
        .map(|_| alloc.allocate(504).expect("allocation"))
        .collect();

    // Free evens then odds; every odd free bridges two listed blocks.
    for ptr in ptrs.iter().step_by(2) {
        unsafe { alloc.deallocate(*ptr).expect("free") };
        assert_eq!(chain_violation(&alloc.free_blocks()), None);
    }
    for ptr in ptrs.iter().skip(1).step_by(2) {
        unsafe { alloc.deallocate(*ptr).expect("free") };
        assert_eq!(chain_violation(&alloc.free_blocks()), None);
    }

    // Eight 512-byte blocks collapse back into the whole page.
    let blocks = alloc.free_blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].size, 4096);
}
