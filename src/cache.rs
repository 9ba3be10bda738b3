use std::cell::Cell;

use crate::reference::Ref;
use crate::utils::{pairing2, MyHash};

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Direct-mapped computed table.
///
/// Each key maps to exactly one slot, a newer entry simply overwrites an
/// older one. Lookups compare the full key, so a hit is always exact.
pub struct Cache<K, V> {
    data: Vec<Option<Entry<K, V>>>,
    bitmask: u64,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<K, V> Cache<K, V> {
    /// Create a new cache of size `2^bits`.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Bits should be in the range 0..=31");

        let size = 1 << bits;

        Self {
            data: std::iter::repeat_with(|| None).take(size).collect(),
            bitmask: (size - 1) as u64,
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    fn index(&self, hash: u64) -> usize {
        (hash & self.bitmask) as usize
    }
}

impl<K, V> Cache<K, V>
where
    K: MyHash + Eq,
{
    /// Get the cached result.
    pub fn get(&self, key: &K) -> Option<&V> {
        match &self.data[self.index(key.hash())] {
            Some(entry) if &entry.key == key => {
                self.hits.set(self.hits.get() + 1);
                Some(&entry.value)
            }
            _ => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Insert a result into the cache.
    pub fn insert(&mut self, key: K, value: V) {
        let index = self.index(key.hash());
        self.data[index] = Some(Entry { key, value });
    }
}

impl MyHash for (Ref, Ref) {
    fn hash(&self) -> u64 {
        pairing2(self.0.id() as u64, self.1.id() as u64)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn key(a: u32, b: u32) -> (Ref, Ref) {
        (Ref::new(a), Ref::new(b))
    }

    #[test]
    fn test_cache() {
        let mut cache = Cache::<(Ref, Ref), i32>::new(3);

        cache.insert(key(1, 2), 3);
        cache.insert(key(2, 3), 1);
        cache.insert(key(1, 3), 2);

        assert_eq!(cache.get(&key(1, 2)), Some(&3));
        assert_eq!(cache.get(&key(2, 3)), Some(&1));
        assert_eq!(cache.get(&key(1, 3)), Some(&2));
        assert_eq!(cache.get(&key(2, 1)), None);
        assert_eq!(cache.get(&key(3, 3)), None);
        assert_eq!(cache.hits(), 3);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_overwrite_on_collision() {
        // Single slot: every key collides.
        let mut cache = Cache::<(Ref, Ref), Ref>::new(0);
        cache.insert((Ref::new(1), Ref::new(2)), Ref::new(3));
        cache.insert((Ref::new(4), Ref::new(5)), Ref::new(6));
        assert_eq!(cache.get(&(Ref::new(1), Ref::new(2))), None);
        assert_eq!(cache.get(&(Ref::new(4), Ref::new(5))), Some(&Ref::new(6)));
    }
}
