use crate::utils::MyHash;

#[derive(Clone)]
struct Entry<T> {
    value: T,
    /// Index of the next cell in the same bucket, 0 terminates the chain.
    next: usize,
}

/// Append-only hash-consing table.
///
/// Values get consecutive indices starting from 1 (cell 0 is a sentry) and
/// are never removed, so an index stays valid for the lifetime of the table.
/// Buckets chain cells through their `next` index.
pub struct Table<T> {
    data: Vec<Entry<T>>,
    buckets: Vec<usize>,
    bitmask: u64,
}

impl<T> Table<T>
where
    T: Default,
{
    /// Create a new table with `2^bits` buckets.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Table bits should be in the range 0..=31");

        let buckets_size = 1 << bits;
        let data = vec![Entry {
            value: T::default(),
            next: 0,
        }];

        Self {
            data,
            buckets: vec![0; buckets_size],
            bitmask: (buckets_size - 1) as u64,
        }
    }
}

impl<T> Table<T> {
    /// Get the number of stored values.
    pub fn len(&self) -> usize {
        self.data.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the number of buckets.
    pub fn buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Check whether the index refers to a stored value.
    pub fn contains(&self, index: usize) -> bool {
        index != 0 && index < self.data.len()
    }

    /// Get the reference to the value at the given index, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        if self.contains(index) {
            Some(&self.data[index].value)
        } else {
            None
        }
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        assert!(self.contains(index), "Index {} is not occupied", index);
        &self.data[index].value
    }

    /// Iterate over `(index, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.data.iter().enumerate().skip(1).map(|(i, e)| (i, &e.value))
    }
}

impl<T> Table<T>
where
    T: MyHash + Eq,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Find the index of an equal value already in the table.
    pub fn find(&self, value: &T) -> Option<usize> {
        let mut index = self.buckets[self.bucket_index(value)];
        while index != 0 {
            let entry = &self.data[index];
            if &entry.value == value {
                return Some(index);
            }
            index = entry.next;
        }
        None
    }

    /// Put a value into the table and return its index.
    ///
    /// Returns the index of the existing equal value, if there is one.
    pub fn put(&mut self, value: T) -> usize {
        match self.find(&value) {
            Some(index) => index,
            None => self.add(value),
        }
    }

    /// Append a value known to be absent and link it into its bucket.
    pub fn add(&mut self, value: T) -> usize {
        let bucket_index = self.bucket_index(&value);
        let index = self.data.len();
        self.data.push(Entry {
            value,
            next: self.buckets[bucket_index],
        });
        self.buckets[bucket_index] = index;
        index
    }
}
