//! Minimum priority queue with decrease-key support.
//!
//! The queue is a binary heap with lazy deletion: lowering a priority pushes a fresh heap entry and
//! leaves the old one behind, to be discarded when it surfaces. A side table holds the live
//! priority of every enqueued key, which is what decides whether a surfacing entry is stale.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
    hash::Hash,
};

use crate::error::EmptyQueueError;

/// Live bookkeeping for one enqueued key.
#[derive(Clone, Copy, Debug)]
struct Slot<P> {
    /// Current priority of the key.
    priority: P,
    /// Insertion rank of the key, kept across priority decreases to break ties.
    sequence: u64,
}

/// Minimum priority queue over keys of type `K` with priorities of type `P`.
///
/// [`MinPriorityQueue::dequeue_min`] always returns a key whose priority is minimal among the keys
/// currently enqueued. Ties are broken by insertion order, and a key whose priority was lowered
/// keeps its original place in that order.
#[derive(Clone, Debug)]
pub struct MinPriorityQueue<K, P> {
    /// Heap of `(priority, sequence, key)` entries, possibly stale.
    heap: BinaryHeap<Reverse<(P, u64, K)>>,
    /// Live priority and rank of every enqueued key.
    live: HashMap<K, Slot<P>>,
    /// Rank handed to the next enqueued key.
    next_sequence: u64,
}

impl<K, P> Default for MinPriorityQueue<K, P>
where
    K: Copy + Eq + Hash + Ord,
    P: Copy + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> MinPriorityQueue<K, P>
where
    K: Copy + Eq + Hash + Ord,
    P: Copy + Ord,
{
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Creates an empty queue with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            live: HashMap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    /// Number of keys currently enqueued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no key is enqueued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether `key` is currently enqueued.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    /// Current priority of `key`, if enqueued.
    #[must_use]
    pub fn priority(&self, key: &K) -> Option<P> {
        self.live.get(key).map(|slot| slot.priority)
    }

    /// Inserts `key` with `priority`.
    ///
    /// Keys are expected to be unique. Enqueuing a key that is already present replaces its
    /// priority and moves it to the back of the tie-break order.
    pub fn enqueue(&mut self, key: K, priority: P) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let _ = self.live.insert(key, Slot { priority, sequence });
        self.heap.push(Reverse((priority, sequence, key)));
    }

    /// Removes and returns the key with the smallest priority.
    ///
    /// # Errors
    ///
    /// This function returns [`EmptyQueueError`] if no key is enqueued.
    pub fn dequeue_min(&mut self) -> Result<(K, P), EmptyQueueError> {
        while let Some(Reverse((priority, sequence, key))) = self.heap.pop() {
            let is_live = self
                .live
                .get(&key)
                .is_some_and(|slot| slot.sequence == sequence && slot.priority == priority);
            if is_live {
                let _ = self.live.remove(&key);
                return Ok((key, priority));
            }
        }

        Err(EmptyQueueError)
    }

    /// Lowers the priority of `key` to `priority`.
    ///
    /// Returns `true` when the priority changed. Absent keys and priorities that are not strictly
    /// lower than the current one leave the queue untouched.
    pub fn decrease_priority(&mut self, key: K, priority: P) -> bool {
        let Some(slot) = self.live.get_mut(&key) else {
            return false;
        };
        if priority >= slot.priority {
            return false;
        }
        slot.priority = priority;
        self.heap.push(Reverse((priority, slot.sequence, key)));

        true
    }

    /// Removes every key, keeping the allocated storage.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
        self.next_sequence = 0;
    }
}
