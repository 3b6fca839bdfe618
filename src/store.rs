//! Sparse-set entity store.
//!
//! Maps stable entity ids to densely packed values. The sparse array gives
//! O(1) id lookup; the dense array keeps every live value contiguous so
//! iteration touches no holes. Removal swap-removes from the dense side and
//! patches the sparse slot of whichever id got moved, so no other entity's
//! id is ever invalidated.
//!
//! One store instance is kept per attribute kind (transform, box, behavior
//! index, ...). The store enforces no cross-store consistency: a consumer
//! maintaining several parallel stores for one logical entity inserts and
//! removes the same id in each of them.

/// Stable identifier for an entity.
pub type EntityId = usize;

/// A sparse-set keyed store.
///
/// Iteration order over dense values is unspecified but stable until the
/// next `insert` or `remove`.
#[derive(Debug, Clone, Default)]
pub struct SparseSet<T> {
    /// id -> dense slot, `None` for ids never inserted or since removed.
    sparse: Vec<Option<usize>>,
    /// Packed live values.
    dense: Vec<T>,
    /// Owning id of each dense slot, kept parallel to `dense`.
    dense_ids: Vec<EntityId>,
}

impl<T> SparseSet<T> {
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            dense_ids: Vec::new(),
        }
    }

    /// Create with room for `capacity` live entries before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sparse: Vec::with_capacity(capacity),
            dense: Vec::with_capacity(capacity),
            dense_ids: Vec::with_capacity(capacity),
        }
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.slot(id).is_some()
    }

    /// Insert or overwrite the value for `id`. O(1) amortized.
    pub fn insert(&mut self, id: EntityId, value: T) {
        if let Some(slot) = self.slot(id) {
            self.dense[slot] = value;
            return;
        }
        if id >= self.sparse.len() {
            self.sparse.resize(id + 1, None);
        }
        self.sparse[id] = Some(self.dense.len());
        self.dense.push(value);
        self.dense_ids.push(id);
    }

    /// Look up the value for `id`.
    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slot(id).map(|slot| &self.dense[slot])
    }

    /// Mutable lookup.
    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slot(id).map(|slot| &mut self.dense[slot])
    }

    /// Remove and return the value for `id`. Absent ids are a no-op.
    ///
    /// The last dense element is swapped into the vacated slot and its
    /// sparse entry updated, keeping the dense side packed.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let slot = self.slot(id)?;
        self.sparse[id] = None;

        let value = self.dense.swap_remove(slot);
        self.dense_ids.swap_remove(slot);
        if slot < self.dense.len() {
            let moved_id = self.dense_ids[slot];
            self.sparse[moved_id] = Some(slot);
        }
        Some(value)
    }

    /// Lowest id with no live entry.
    ///
    /// Freed ids are reusable: after `remove(3)` on an otherwise full
    /// prefix, the next call returns 3 again. Consumers that hand out ids
    /// from here must insert before asking for the next one.
    pub fn first_free_id(&self) -> EntityId {
        self.sparse
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.sparse.len())
    }

    /// Iterate over live values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.dense.iter()
    }

    /// Iterate over `(id, value)` pairs.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.dense_ids.iter().copied().zip(self.dense.iter())
    }

    #[inline]
    fn slot(&self, id: EntityId) -> Option<usize> {
        self.sparse.get(id).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let mut set = SparseSet::new();
        set.insert(5, "five");
        set.insert(0, "zero");
        assert_eq!(set.get(5), Some(&"five"));
        assert_eq!(set.get(0), Some(&"zero"));
        assert_eq!(set.get(3), None);

        set.remove(5);
        assert_eq!(set.get(5), None);
        assert_eq!(set.get(0), Some(&"zero"));
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut set = SparseSet::new();
        set.insert(2, 10);
        set.insert(2, 20);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(2), Some(&20));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut set: SparseSet<u8> = SparseSet::new();
        assert_eq!(set.remove(7), None);
        set.insert(1, 1);
        assert_eq!(set.remove(100), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn dense_stays_packed() {
        let mut set = SparseSet::new();
        for id in 0..10 {
            set.insert(id, id * 100);
        }
        set.remove(0);
        set.remove(4);
        set.remove(9);

        assert_eq!(set.len(), 7);
        let mut seen: Vec<_> = set.iter_with_ids().map(|(id, &v)| (id, v)).collect();
        seen.sort_unstable();
        let expected: Vec<_> = [1, 2, 3, 5, 6, 7, 8]
            .iter()
            .map(|&id| (id, id * 100))
            .collect();
        assert_eq!(seen, expected);

        // Every live id still resolves through the sparse side.
        for (id, &value) in set.iter_with_ids().collect::<Vec<_>>() {
            assert_eq!(set.get(id), Some(&value));
        }
    }

    #[test]
    fn swap_remove_patches_moved_id() {
        let mut set = SparseSet::new();
        set.insert(0, 'a');
        set.insert(1, 'b');
        set.insert(2, 'c');
        // Removing the first dense slot moves id 2 into it.
        set.remove(0);
        assert_eq!(set.get(2), Some(&'c'));
        assert_eq!(set.get(1), Some(&'b'));
    }

    #[test]
    fn first_free_id_reuses_freed_slots() {
        let mut set = SparseSet::new();
        assert_eq!(set.first_free_id(), 0);
        set.insert(0, ());
        set.insert(1, ());
        set.insert(2, ());
        assert_eq!(set.first_free_id(), 3);
        set.remove(1);
        assert_eq!(set.first_free_id(), 1);
        set.insert(1, ());
        assert_eq!(set.first_free_id(), 3);
    }

    #[test]
    fn iteration_visits_each_live_value_once() {
        let mut set = SparseSet::new();
        for id in 0..5 {
            set.insert(id, id);
        }
        set.remove(2);
        let mut ids: Vec<_> = set.iter_with_ids().map(|(id, _)| id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 3, 4]);
        assert_eq!(set.iter().count(), 4);
    }
}
