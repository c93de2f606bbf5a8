// crates/dino_plugin/src/bounded.rs
use std::collections::{vec_deque, VecDeque};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// FIFO with a hard capacity. Pushing into a full queue evicts the oldest entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QueueParts<T>")]
pub struct BoundedQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

/// Wire shape of `BoundedQueue`, checked before it becomes one.
#[derive(Deserialize)]
struct QueueParts<T> {
    items: VecDeque<T>,
    capacity: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{len} queued items exceed capacity {capacity}")]
pub struct OverCapacity {
    pub len: usize,
    pub capacity: usize,
}

impl<T> TryFrom<QueueParts<T>> for BoundedQueue<T> {
    type Error = OverCapacity;

    fn try_from(parts: QueueParts<T>) -> Result<Self, Self::Error> {
        if parts.items.len() > parts.capacity {
            return Err(OverCapacity {
                len: parts.items.len(),
                capacity: parts.capacity,
            });
        }
        Ok(Self {
            items: parts.items,
            capacity: parts.capacity,
        })
    }
}

impl<T> BoundedQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `item`, returning whatever had to be evicted to make room.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_evicts_exactly_the_oldest() {
        let mut q = BoundedQueue::with_capacity(4);
        for i in 0..4 {
            assert_eq!(q.push(i), None);
        }
        assert_eq!(q.push(4), Some(0));
        assert_eq!(q.len(), 4);
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut q = BoundedQueue::with_capacity(32);
        for i in 0..100 {
            q.push(i);
            assert!(q.len() <= q.capacity());
        }
        assert_eq!(q.get(0), Some(&68));
    }

    #[test]
    fn iteration_can_be_replayed() {
        let mut q = BoundedQueue::with_capacity(3);
        q.push('a');
        q.push('b');
        let extra = ['c'];
        let all = q.iter().chain(extra.iter());
        assert_eq!(all.clone().count(), 3);
        assert_eq!(all.collect::<String>(), "abc");
    }

    #[test]
    fn snapshot_with_too_many_items_is_rejected() {
        #[derive(Serialize)]
        struct Forged {
            items: Vec<u32>,
            capacity: usize,
        }

        let bytes = bincode::serialize(&Forged { items: vec![1, 2, 3, 4, 5], capacity: 2 }).unwrap();
        assert!(bincode::deserialize::<BoundedQueue<u32>>(&bytes).is_err());

        let bytes = bincode::serialize(&Forged { items: vec![1, 2], capacity: 2 }).unwrap();
        let q: BoundedQueue<u32> = bincode::deserialize(&bytes).unwrap();
        assert_eq!(q.len(), 2);
        assert_eq!(q.capacity(), 2);
    }
}
