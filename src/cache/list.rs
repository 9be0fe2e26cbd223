//! Recency List Module
//!
//! Doubly linked list of cache entries ordered by access time, stored in a
//! slot arena so that nodes are addressed by stable indices instead of
//! pointers.
//!
//! ```text
//!   head (most recent)                          tail (least recent)
//!     [slot 3] <-> [slot 0] <-> [slot 5] <-> [slot 1]
//!                                               ^
//!                                         next eviction
//! ```

use crate::cache::Entry;

// == Slot Id ==
/// Stable handle to a node in the [`RecencyList`].
///
/// A handle stays valid until its node is removed. Slots are recycled, so a
/// handle must not be used after `remove` or `evict_oldest` returned its entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<V> {
    entry: Entry<V>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Tracks access order for LRU eviction strategy.
///
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Every operation is O(1). Promotion relinks the existing node in place, so
/// an entry keeps its slot for its whole lifetime.
#[derive(Debug)]
pub struct RecencyList<V> {
    slots: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates a new empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used node.
    pub fn push_front(&mut self, entry: Entry<V>) -> SlotId {
        let node = Node {
            entry,
            prev: None,
            next: None,
        };

        let idx = if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        };

        self.link_front(idx);
        self.len += 1;
        SlotId(idx)
    }

    // == Touch ==
    /// Marks a node as recently used (moves to head).
    ///
    /// Returns false if the handle does not point at a live node.
    pub fn touch(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.head != Some(id.0) {
            self.unlink(id.0);
            self.link_front(id.0);
        }
        true
    }

    // == Remove ==
    /// Unlinks a node and returns its entry.
    pub fn remove(&mut self, id: SlotId) -> Option<Entry<V>> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id.0);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.entry)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn evict_oldest(&mut self) -> Option<Entry<V>> {
        let tail = self.tail?;
        self.remove(SlotId(tail))
    }

    // == Peek ==
    /// Returns the least recently used entry without removing it.
    pub fn peek_oldest(&self) -> Option<&Entry<V>> {
        self.tail.and_then(|idx| self.get(SlotId(idx)))
    }

    /// Returns the most recently used entry.
    pub fn peek_newest(&self) -> Option<&Entry<V>> {
        self.head.and_then(|idx| self.get(SlotId(idx)))
    }

    // == Get ==
    /// Returns the entry at `id`, or None if the slot is empty.
    pub fn get(&self, id: SlotId) -> Option<&Entry<V>> {
        self.slots
            .get(id.0)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.entry)
    }

    /// Mutable access to the entry at `id`. Does not change recency.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut Entry<V>> {
        self.slots
            .get_mut(id.0)
            .and_then(|slot| slot.as_mut())
            .map(|node| &mut node.entry)
    }

    // == Contains ==
    /// Checks whether `id` points at a live node.
    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Linking ==
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_ref() {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.slots[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(node) = self.slots[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;

        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(h) => {
                if let Some(node) = self.slots[h].as_mut() {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
    }
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Iterator ==
/// Head-to-tail iterator over a [`RecencyList`].
pub struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: Option<usize>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.list;
        let idx = self.cursor?;
        let node = list.slots.get(idx)?.as_ref()?;
        self.cursor = node.next;
        Some(&node.entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys<V>(list: &RecencyList<V>) -> Vec<&str> {
        list.iter().map(|e| e.key.as_str()).collect()
    }

    fn push(list: &mut RecencyList<u32>, key: &str) -> SlotId {
        list.push_front(Entry::new(key, 0))
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<u32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.peek_oldest().is_none());
        assert!(list.peek_newest().is_none());
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = RecencyList::new();

        push(&mut list, "key1");
        push(&mut list, "key2");
        push(&mut list, "key3");

        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec!["key3", "key2", "key1"]);
        // key1 is oldest (added first)
        assert_eq!(list.peek_oldest().map(|e| e.key.as_str()), Some("key1"));
    }

    #[test]
    fn test_touch_moves_to_head() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        push(&mut list, "b");
        push(&mut list, "c");

        assert!(list.touch(a));

        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.peek_oldest().map(|e| e.key.as_str()), Some("b"));
    }

    #[test]
    fn test_touch_keeps_slot() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        push(&mut list, "b");
        list.touch(a);

        // Same handle still resolves to the same entry after promotion
        assert_eq!(list.get(a).map(|e| e.key.as_str()), Some("a"));
    }

    #[test]
    fn test_touch_head_is_noop() {
        let mut list = RecencyList::new();

        push(&mut list, "a");
        let b = push(&mut list, "b");

        assert!(list.touch(b));
        assert_eq!(keys(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_evict_oldest() {
        let mut list = RecencyList::new();

        push(&mut list, "key1");
        push(&mut list, "key2");
        push(&mut list, "key3");

        let evicted = list.evict_oldest().map(|e| e.key);
        assert_eq!(evicted.as_deref(), Some("key1"));
        assert_eq!(list.len(), 2);

        let evicted = list.evict_oldest().map(|e| e.key);
        assert_eq!(evicted.as_deref(), Some("key2"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_evict_empty() {
        let mut list: RecencyList<u32> = RecencyList::new();
        assert!(list.evict_oldest().is_none());
        assert!(list.evict_oldest().is_none());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_remove_middle() {
        let mut list = RecencyList::new();

        push(&mut list, "key1");
        let k2 = push(&mut list, "key2");
        push(&mut list, "key3");

        let removed = list.remove(k2).map(|e| e.key);

        assert_eq!(removed.as_deref(), Some("key2"));
        assert_eq!(list.len(), 2);
        assert_eq!(keys(&list), vec!["key3", "key1"]);
        assert!(!list.contains(k2));
    }

    #[test]
    fn test_remove_twice() {
        let mut list = RecencyList::new();

        let k = push(&mut list, "key1");

        assert!(list.remove(k).is_some());
        assert!(list.remove(k).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_only_node_clears_ends() {
        let mut list = RecencyList::new();

        let k = push(&mut list, "solo");
        list.remove(k);

        assert!(list.peek_newest().is_none());
        assert!(list.peek_oldest().is_none());

        push(&mut list, "next");
        assert_eq!(keys(&list), vec!["next"]);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        push(&mut list, "b");
        list.remove(a);

        let c = push(&mut list, "c");
        assert_eq!(c.index(), a.index());
        assert_eq!(keys(&list), vec!["c", "b"]);
    }

    #[test]
    fn test_order_after_multiple_touches() {
        let mut list = RecencyList::new();

        let a = push(&mut list, "a");
        let b = push(&mut list, "b");
        let c = push(&mut list, "c");

        // [c, b, a] -> touch a -> [a, c, b] -> touch c -> [c, a, b] -> touch b -> [b, c, a]
        list.touch(a);
        list.touch(c);
        list.touch(b);

        let order: Vec<String> = std::iter::from_fn(|| list.evict_oldest().map(|e| e.key)).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut list = RecencyList::new();

        let id = list.push_front(Entry::new("k", 1));
        if let Some(entry) = list.get_mut(id) {
            entry.replace(7);
        }

        assert_eq!(list.get(id).map(|e| *e.value), Some(7));
    }
}
