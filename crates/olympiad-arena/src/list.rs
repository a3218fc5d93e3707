//! Singly-linked list of `u32` values stored in a [`SlotPool`].
//!
//! Slot 0 holds a sentinel node that is never popped; its `next` link is
//! the head of the list. A link equal to the pool capacity terminates the
//! chain. Nodes are eight bytes: `next` then `data`, both little-endian.

use crate::error::ArenaError;
use crate::pool::SlotPool;
use crate::region::Region;

const NODE_SIZE: usize = 8;
const SENTINEL: u32 = 0;

/// A pool-backed list with O(1) push-front and O(n) lookup and removal.
pub struct PoolList {
    pool: SlotPool,
}

impl PoolList {
    /// Create a list whose pool holds `capacity` nodes, one of which is the
    /// sentinel.
    pub fn new(region: &mut Region, capacity: u32) -> Result<Self, ArenaError> {
        let mut pool = SlotPool::new(region, capacity, NODE_SIZE, 4)?;
        pool.push(region, &encode(capacity, 0))?;
        Ok(Self { pool })
    }

    /// Insert `data` at the front.
    pub fn push(&mut self, region: &mut Region, data: u32) -> Result<u32, ArenaError> {
        let (head, _) = self.node(region, SENTINEL);
        let index = self.pool.push(region, &encode(head, data))?;
        self.set_next(region, SENTINEL, index);
        Ok(index)
    }

    /// Find the node holding `data`, front to back.
    pub fn get(&self, region: &Region, data: u32) -> Option<u32> {
        self.indices(region)
            .find(|&index| self.node(region, index).1 == data)
    }

    /// Unlink and release the first node holding `data`.
    ///
    /// Returns `false` if no node holds it.
    pub fn pop(&mut self, region: &mut Region, data: u32) -> bool {
        let end = self.pool.capacity();
        let mut prev = SENTINEL;
        let (mut cur, _) = self.node(region, SENTINEL);
        while cur < end {
            let (next, value) = self.node(region, cur);
            if value == data {
                self.set_next(region, prev, next);
                self.pool.pop(region, cur);
                return true;
            }
            prev = cur;
            cur = next;
        }
        false
    }

    /// Values front to back.
    pub fn iter<'r>(&'r self, region: &'r Region) -> impl Iterator<Item = u32> + 'r {
        self.indices(region).map(move |index| self.node(region, index).1)
    }

    /// Number of values in the list (sentinel excluded).
    pub fn len(&self) -> u32 {
        self.pool.live() - 1
    }

    /// Returns `true` if the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn indices<'r>(&'r self, region: &'r Region) -> impl Iterator<Item = u32> + 'r {
        let end = self.pool.capacity();
        let (head, _) = self.node(region, SENTINEL);
        std::iter::successors((head < end).then_some(head), move |&index| {
            let (next, _) = self.node(region, index);
            (next < end).then_some(next)
        })
    }

    fn node(&self, region: &Region, index: u32) -> (u32, u32) {
        decode(self.pool.get(region, index))
    }

    fn set_next(&self, region: &mut Region, index: u32, next: u32) {
        self.pool.get_mut(region, index)[..4].copy_from_slice(&next.to_le_bytes());
    }
}

fn encode(next: u32, data: u32) -> [u8; NODE_SIZE] {
    let mut node = [0u8; NODE_SIZE];
    node[..4].copy_from_slice(&next.to_le_bytes());
    node[4..].copy_from_slice(&data.to_le_bytes());
    node
}

fn decode(bytes: &[u8]) -> (u32, u32) {
    let mut next = [0u8; 4];
    let mut data = [0u8; 4];
    next.copy_from_slice(&bytes[..4]);
    data.copy_from_slice(&bytes[4..8]);
    (u32::from_le_bytes(next), u32::from_le_bytes(data))
}
