//! Fixed-size slot allocator carved out of a region.
//!
//! [`SlotPool`] hands out homogeneous slots in O(1). Unused slots form a
//! free list threaded through their first four bytes (a little-endian `u32`
//! holding the next free index, or `capacity` for "none"), so the pool needs
//! no side table.
//!
//! Releasing the same slot twice, or touching an index that was never
//! pushed, corrupts the free list. This is not guarded against: callers own
//! the live/free bookkeeping of the indices they hold.

use crate::error::ArenaError;
use crate::handle::Span;
use crate::region::Region;

/// Bytes used by the free-list link at the start of each free slot.
const LINK_BYTES: usize = std::mem::size_of::<u32>();

/// A pool of fixed-size slots stored in a [`Region`].
///
/// The pool only records where its slots live; every operation takes the
/// region the pool was created in.
#[derive(Clone, Debug)]
pub struct SlotPool {
    span: Span,
    capacity: u32,
    slot_size: usize,
    /// Distance between consecutive slots: `slot_size` rounded up to the
    /// slot alignment.
    stride: usize,
    first_free: u32,
    live: u32,
}

impl SlotPool {
    /// Carve `capacity` slots of `slot_size` bytes from `region`.
    ///
    /// Every slot starts free; slot *i* links to *i* + 1 and the last slot
    /// links to the `capacity` sentinel.
    pub fn new(
        region: &mut Region,
        capacity: u32,
        slot_size: usize,
        align: usize,
    ) -> Result<Self, ArenaError> {
        if slot_size < LINK_BYTES {
            return Err(ArenaError::SlotTooSmall { slot_size });
        }
        if align == 0 || !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment { align });
        }
        let stride = (slot_size + align - 1) & !(align - 1);
        let total = stride
            .checked_mul(capacity as usize)
            .ok_or(ArenaError::CapacityExceeded {
                requested: usize::MAX,
                remaining: region.remaining(),
            })?;
        let span = region.alloc(total, align.max(LINK_BYTES))?;

        let pool = Self {
            span,
            capacity,
            slot_size,
            stride,
            first_free: 0,
            live: 0,
        };
        let bytes = region.bytes_mut(span);
        for i in 0..capacity {
            let at = i as usize * stride;
            bytes[at..at + LINK_BYTES].copy_from_slice(&(i + 1).to_le_bytes());
        }
        Ok(pool)
    }

    /// Take the head of the free list and copy `data` into it.
    ///
    /// `data` must be exactly one slot long. Returns the slot index.
    pub fn push(&mut self, region: &mut Region, data: &[u8]) -> Result<u32, ArenaError> {
        if data.len() != self.slot_size {
            return Err(ArenaError::SlotSizeMismatch {
                expected: self.slot_size,
                actual: data.len(),
            });
        }
        if self.first_free >= self.capacity {
            return Err(ArenaError::PoolExhausted {
                capacity: self.capacity,
            });
        }
        let index = self.first_free;
        let slot = self.slot_span(index);
        let bytes = region.bytes_mut(slot);
        self.first_free = read_link(bytes);
        bytes.copy_from_slice(data);
        self.live += 1;
        Ok(index)
    }

    /// Return a slot to the head of the free list.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`. Popping a slot that is already free
    /// is not detected and corrupts the free list.
    pub fn pop(&mut self, region: &mut Region, index: u32) {
        let slot = self.slot_span(index);
        let bytes = region.bytes_mut(slot);
        bytes[..LINK_BYTES].copy_from_slice(&self.first_free.to_le_bytes());
        self.first_free = index;
        self.live = self.live.saturating_sub(1);
    }

    /// Read access to a slot's bytes.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    pub fn get<'r>(&self, region: &'r Region, index: u32) -> &'r [u8] {
        region.bytes(self.slot_span(index))
    }

    /// Write access to a slot's bytes.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    pub fn get_mut<'r>(&self, region: &'r mut Region, index: u32) -> &'r mut [u8] {
        region.bytes_mut(self.slot_span(index))
    }

    /// Number of slots.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Size of each slot in bytes.
    pub fn slot_size(&self) -> usize {
        self.slot_size
    }

    /// Number of slots currently pushed and not popped.
    pub fn live(&self) -> u32 {
        self.live
    }

    /// Index the next `push` will return, or `capacity` when exhausted.
    pub fn first_free(&self) -> u32 {
        self.first_free
    }

    fn slot_span(&self, index: u32) -> Span {
        assert!(
            index < self.capacity,
            "slot {index} out of range for pool of {}",
            self.capacity
        );
        self.span.slice(index as usize * self.stride, self.slot_size)
    }
}

fn read_link(bytes: &[u8]) -> u32 {
    let mut link = [0u8; LINK_BYTES];
    link.copy_from_slice(&bytes[..LINK_BYTES]);
    u32::from_le_bytes(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Region {
        Region::with_capacity(64 * 1024).unwrap()
    }

    fn word(v: u32) -> [u8; 4] {
        v.to_le_bytes()
    }

    #[test]
    fn push_hands_out_sequential_slots() {
        let mut r = region();
        let mut pool = SlotPool::new(&mut r, 10, 4, 8).unwrap();
        let a = pool.push(&mut r, &word(0xaaaa_aaaa)).unwrap();
        let b = pool.push(&mut r, &word(0xbbbb_bbbb)).unwrap();
        let c = pool.push(&mut r, &word(0xcccc_cccc)).unwrap();
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(pool.get(&r, b), &word(0xbbbb_bbbb));
        assert_eq!(pool.live(), 3);
    }

    #[test]
    fn pop_makes_slot_next_to_be_reused() {
        let mut r = region();
        let mut pool = SlotPool::new(&mut r, 10, 4, 8).unwrap();
        let a = pool.push(&mut r, &word(1)).unwrap();
        pool.push(&mut r, &word(2)).unwrap();
        pool.pop(&mut r, a);
        assert_eq!(pool.first_free(), a);
        let again = pool.push(&mut r, &word(3)).unwrap();
        assert_eq!(again, a);
        assert_eq!(pool.get(&r, again), &word(3));
    }

    #[test]
    fn exhausted_pool_rejects_push() {
        let mut r = region();
        let mut pool = SlotPool::new(&mut r, 2, 4, 4).unwrap();
        pool.push(&mut r, &word(1)).unwrap();
        pool.push(&mut r, &word(2)).unwrap();
        assert_eq!(
            pool.push(&mut r, &word(3)),
            Err(ArenaError::PoolExhausted { capacity: 2 })
        );
    }

    #[test]
    fn slots_are_aligned() {
        let mut r = region();
        r.alloc(1, 1).unwrap();
        let mut pool = SlotPool::new(&mut r, 4, 12, 16).unwrap();
        for i in 0..4 {
            pool.push(&mut r, &[i as u8; 12]).unwrap();
        }
        for i in 0..4 {
            let span = pool.slot_span(i);
            assert_eq!(span.offset() % 16, 0);
            assert_eq!(pool.get(&r, i), &[i as u8; 12]);
        }
    }

    #[test]
    fn get_mut_writes_in_place() {
        let mut r = region();
        let mut pool = SlotPool::new(&mut r, 4, 8, 8).unwrap();
        let idx = pool.push(&mut r, &[0u8; 8]).unwrap();
        pool.get_mut(&mut r, idx)[7] = 42;
        assert_eq!(pool.get(&r, idx)[7], 42);
    }

    #[test]
    fn slot_smaller_than_link_is_rejected() {
        let mut r = region();
        assert!(matches!(
            SlotPool::new(&mut r, 4, 2, 2),
            Err(ArenaError::SlotTooSmall { slot_size: 2 })
        ));
    }

    #[test]
    fn wrong_sized_data_is_rejected() {
        let mut r = region();
        let mut pool = SlotPool::new(&mut r, 4, 8, 8).unwrap();
        assert!(matches!(
            pool.push(&mut r, &[1, 2, 3]),
            Err(ArenaError::SlotSizeMismatch {
                expected: 8,
                actual: 3
            })
        ));
    }

    #[test]
    fn pool_larger_than_region_fails() {
        let mut r = Region::with_capacity(256).unwrap();
        assert!(matches!(
            SlotPool::new(&mut r, 100, 8, 8),
            Err(ArenaError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn double_pop_corrupts_free_list() {
        // Known limitation: popping twice makes the slot its own successor,
        // so the same index is handed out twice.
        let mut r = region();
        let mut pool = SlotPool::new(&mut r, 10, 4, 4).unwrap();
        let idx = pool.push(&mut r, &word(7)).unwrap();
        pool.pop(&mut r, idx);
        pool.pop(&mut r, idx);
        let first = pool.push(&mut r, &word(1)).unwrap();
        let second = pool.push(&mut r, &word(1)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        let mut r = region();
        let pool = SlotPool::new(&mut r, 4, 4, 4).unwrap();
        let _ = pool.get(&r, 4);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_indices_are_distinct(
                ops in proptest::collection::vec(any::<bool>(), 1..100),
            ) {
                let mut r = Region::with_capacity(16 * 1024).unwrap();
                let mut pool = SlotPool::new(&mut r, 16, 4, 4).unwrap();
                let mut held: Vec<u32> = Vec::new();
                for push in ops {
                    if push {
                        match pool.push(&mut r, &word(held.len() as u32)) {
                            Ok(idx) => {
                                prop_assert!(!held.contains(&idx));
                                held.push(idx);
                            }
                            Err(_) => prop_assert_eq!(held.len(), 16),
                        }
                    } else if let Some(idx) = held.pop() {
                        pool.pop(&mut r, idx);
                    }
                    prop_assert_eq!(pool.live() as usize, held.len());
                }
            }
        }
    }
}
