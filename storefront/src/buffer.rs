//! Fixed-capacity circular shelf shared by the producer and the consumers.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::bail;
use crate::error::{ErrorKind, StoreResult};
use crate::types::Item;

/// Result of shelving an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutOutcome {
    /// Slots holding an item right after the put.
    pub occupied: usize,
    pub produced: u64,
}

/// Result of taking an item off the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakeOutcome {
    pub item: Item,
    /// Slots holding an item right after the take.
    pub occupied: usize,
    pub consumed: u64,
    /// Whether this take consumed the last item of the run.
    pub last: bool,
}

#[derive(Debug)]
struct Shelf {
    slots: Vec<Option<Item>>,
    /// Next slot to take from.
    head: usize,
    /// Next slot to write to.
    tail: usize,
    occupied: usize,
    produced: u64,
    consumed: u64,
}

/// Bounded FIFO of [`Item`]s guarded by a single lock.
///
/// Positions are tracked with explicit head and tail indices advanced modulo the capacity, never
/// derived from a token count. The produced and consumed counters are updated in the same
/// critical section as the slot they describe.
///
/// Callers must hold the matching token before calling: an empty-slot token for
/// [`SlotBuffer::put`], a filled-slot token for [`SlotBuffer::take`]. A put into a full shelf or a
/// take from an empty one means that protocol was broken and is reported as
/// [`ErrorKind::ProtocolViolation`].
#[derive(Debug)]
pub struct SlotBuffer {
    shelf: Mutex<Shelf>,
    capacity: usize,
    total: u64,
}

impl SlotBuffer {
    /// Creates an empty shelf of `capacity` slots for a run of `total` items.
    pub fn new(capacity: usize, total: u64) -> Self {
        Self {
            shelf: Mutex::new(Shelf {
                slots: vec![None; capacity],
                head: 0,
                tail: 0,
                occupied: 0,
                produced: 0,
                consumed: 0,
            }),
            capacity,
            total,
        }
    }

    /// Writes `item` at the tail and advances it.
    pub fn put(&self, item: Item) -> StoreResult<PutOutcome> {
        let mut shelf = self.lock_shelf();

        if self.capacity == 0 || shelf.occupied == self.capacity {
            bail!(
                ErrorKind::ProtocolViolation,
                "Item put on a full shelf",
                format!("item {item}, capacity {}", self.capacity)
            );
        }

        let tail = shelf.tail;
        if shelf.slots[tail].is_some() {
            bail!(
                ErrorKind::ProtocolViolation,
                "Tail slot is already occupied",
                format!("slot {tail}")
            );
        }

        shelf.slots[tail] = Some(item);
        shelf.tail = (tail + 1) % self.capacity;
        shelf.occupied += 1;
        shelf.produced += 1;

        Ok(PutOutcome {
            occupied: shelf.occupied,
            produced: shelf.produced,
        })
    }

    /// Removes the item at the head and advances it.
    ///
    /// The returned [`TakeOutcome::last`] is computed under the shelf lock, so exactly one take
    /// per run observes it.
    pub fn take(&self) -> StoreResult<TakeOutcome> {
        let mut shelf = self.lock_shelf();

        if shelf.occupied == 0 {
            bail!(ErrorKind::ProtocolViolation, "Item taken from an empty shelf");
        }

        let head = shelf.head;
        let Some(item) = shelf.slots[head].take() else {
            bail!(
                ErrorKind::ProtocolViolation,
                "Head slot is empty",
                format!("slot {head}")
            );
        };

        shelf.head = (head + 1) % self.capacity;
        shelf.occupied -= 1;
        shelf.consumed += 1;

        Ok(TakeOutcome {
            item,
            occupied: shelf.occupied,
            consumed: shelf.consumed,
            last: shelf.consumed == self.total,
        })
    }

    pub fn occupied(&self) -> usize {
        self.lock_shelf().occupied
    }

    pub fn produced(&self) -> u64 {
        self.lock_shelf().produced
    }

    pub fn consumed(&self) -> u64 {
        self.lock_shelf().consumed
    }

    // Every mutation of the shelf validates before writing, so a poisoned lock still guards a
    // consistent shelf.
    fn lock_shelf(&self) -> MutexGuard<'_, Shelf> {
        self.shelf.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_leave_in_the_order_they_entered() {
        let buffer = SlotBuffer::new(2, 5);
        let mut taken = vec![];

        // Interleave so that both indices wrap around the two slots.
        buffer.put(Item::new(1)).unwrap();
        buffer.put(Item::new(2)).unwrap();
        taken.push(buffer.take().unwrap().item.serial());
        buffer.put(Item::new(3)).unwrap();
        taken.push(buffer.take().unwrap().item.serial());
        buffer.put(Item::new(4)).unwrap();
        taken.push(buffer.take().unwrap().item.serial());
        taken.push(buffer.take().unwrap().item.serial());
        buffer.put(Item::new(5)).unwrap();
        taken.push(buffer.take().unwrap().item.serial());

        assert_eq!(taken, vec![1, 2, 3, 4, 5]);
        assert_eq!(buffer.occupied(), 0);
    }

    #[test]
    fn counters_follow_slot_mutations() {
        let buffer = SlotBuffer::new(3, 2);

        let put = buffer.put(Item::new(1)).unwrap();
        assert_eq!(put, PutOutcome { occupied: 1, produced: 1 });
        buffer.put(Item::new(2)).unwrap();

        let first = buffer.take().unwrap();
        assert_eq!(first.consumed, 1);
        assert_eq!(first.occupied, 1);
        assert!(!first.last);

        let second = buffer.take().unwrap();
        assert!(second.last);
        assert_eq!(buffer.produced(), 2);
        assert_eq!(buffer.consumed(), 2);
    }

    #[test]
    fn put_on_full_shelf_is_a_protocol_violation() {
        let buffer = SlotBuffer::new(1, 2);
        buffer.put(Item::new(1)).unwrap();

        let err = buffer.put(Item::new(2)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
        assert_eq!(buffer.occupied(), 1);
        assert_eq!(buffer.produced(), 1);
    }

    #[test]
    fn take_from_empty_shelf_is_a_protocol_violation() {
        let buffer = SlotBuffer::new(4, 1);

        let err = buffer.take().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
        assert_eq!(buffer.consumed(), 0);
    }
}
