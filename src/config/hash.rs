//! Chained hash table keyed by byte strings
//!
//! [`FastHash`] is the associative array behind every configuration section.
//! It has a fixed bucket count chosen at construction, resolves collisions by
//! chaining, and hashes keys with djb2.
//!
//! # Policies
//!
//! Two knobs change how the table behaves, see [`TableOptions`]:
//! - [`CollisionPolicy::Reject`] refuses an insert into an occupied bucket and
//!   hands the data back through [`Collision`]; [`CollisionPolicy::Chain`]
//!   prepends to the bucket's chain.
//! - [`Indexing::Tracked`] records every bucket the first time it becomes
//!   occupied, so iteration and teardown visit only those buckets.
//!   [`Indexing::Untracked`] scans the whole bucket array instead.
//!
//! # Keys
//!
//! Keys are copied into the table. An inserted key ends at its first NUL
//! byte; the `_n` variants additionally cap the key at `length` bytes.
//! Lookups compare the whole query (length and content), so a query with an
//! embedded NUL never matches a stored key.

use std::fmt;
use std::num::NonZeroUsize;
use thiserror::Error;

/// djb2 over `key`, stopping at the first NUL byte
pub fn djb2(key: &[u8]) -> u32 {
    until_nul(key).iter().fold(5381u32, |hash, &c| {
        // hash * 33 + c
        (hash << 5).wrapping_add(hash).wrapping_add(c as u32)
    })
}

/// djb2 over at most `length` bytes of `key`, stopping early at a NUL byte
pub fn djb2_n(key: &[u8], length: usize) -> u32 {
    djb2(bounded(key, length))
}

fn until_nul(key: &[u8]) -> &[u8] {
    match key.iter().position(|&b| b == 0) {
        Some(end) => &key[..end],
        None => key,
    }
}

fn bounded(key: &[u8], length: usize) -> &[u8] {
    until_nul(&key[..length.min(key.len())])
}

/// What an insert does when the target bucket already holds a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    #[default]
    Chain,
    Reject,
}

/// Whether the table keeps a list of occupied buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indexing {
    #[default]
    Tracked,
    Untracked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableOptions {
    pub collisions: CollisionPolicy,
    pub indexing: Indexing,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("hash table capacity must be nonzero")]
    ZeroCapacity,
}

/// A rejected insert. Carries the data back to the caller, who decides
/// whether the rejection is an error.
#[derive(Debug)]
pub struct Collision<T> {
    pub index: usize,
    pub data: T,
}

impl<T> fmt::Display for Collision<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bucket {} is already occupied", self.index)
    }
}

impl<T: fmt::Debug> std::error::Error for Collision<T> {}

/// Per-entry cleanup hook, invoked once for each entry's data at teardown
pub type Destructor<T> = fn(T);

/// One link of a bucket chain
#[derive(Debug)]
pub struct Entry<T> {
    key: Box<[u8]>,
    data: T,
    next: Option<Box<Entry<T>>>,
}

impl<T> Entry<T> {
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

/// Result of tearing a table down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanupStats {
    /// Entries handed to the destructor (or dropped)
    pub released: usize,
    /// Buckets inspected to find them
    pub buckets_visited: usize,
}

#[derive(Debug)]
pub struct FastHash<T> {
    options: TableOptions,
    entries: Vec<Option<Box<Entry<T>>>>,
    index_list: Vec<usize>,
    destructor: Option<Destructor<T>>,
}

impl<T> FastHash<T> {
    /// Create a table with `capacity` buckets
    pub fn new(
        capacity: usize,
        options: TableOptions,
        destructor: Option<Destructor<T>>,
    ) -> Result<Self, HashError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(HashError::ZeroCapacity)?;
        Ok(Self::with_buckets(capacity, options, destructor))
    }

    pub fn with_buckets(
        capacity: NonZeroUsize,
        options: TableOptions,
        destructor: Option<Destructor<T>>,
    ) -> Self {
        let mut entries = Vec::with_capacity(capacity.get());
        entries.resize_with(capacity.get(), || None);

        FastHash {
            options,
            entries,
            index_list: Vec::new(),
            destructor,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn options(&self) -> TableOptions {
        self.options
    }

    /// Number of entries across all chains, shadowed duplicates included
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    fn bucket_of(&self, key: &[u8]) -> usize {
        djb2(key) as usize % self.entries.len()
    }

    /// Insert `data` under `key`, returning the bucket index it landed in
    pub fn insert(&mut self, key: &[u8], data: T) -> Result<usize, Collision<T>> {
        self.insert_key(until_nul(key), data)
    }

    /// Insert using at most `length` bytes of `key`
    pub fn insert_n(
        &mut self,
        key: &[u8],
        length: usize,
        data: T,
    ) -> Result<usize, Collision<T>> {
        self.insert_key(bounded(key, length), data)
    }

    fn insert_key(&mut self, key: &[u8], data: T) -> Result<usize, Collision<T>> {
        let index = self.bucket_of(key);
        let slot = &mut self.entries[index];

        if slot.is_some() {
            if self.options.collisions == CollisionPolicy::Reject {
                return Err(Collision { index, data });
            }
        } else if self.options.indexing == Indexing::Tracked {
            self.index_list.push(index);
        }

        let next = slot.take();
        *slot = Some(Box::new(Entry {
            key: key.into(),
            data,
            next,
        }));

        Ok(index)
    }

    /// Overwrite the bucket for `key` with a single entry.
    ///
    /// Whatever chain was rooted there is dropped without passing its data
    /// to the destructor. Only safe for tables that never chain.
    pub fn force_insert(&mut self, key: &[u8], data: T) -> usize {
        self.force_insert_key(until_nul(key), data)
    }

    pub fn force_insert_n(&mut self, key: &[u8], length: usize, data: T) -> usize {
        self.force_insert_key(bounded(key, length), data)
    }

    fn force_insert_key(&mut self, key: &[u8], data: T) -> usize {
        let index = self.bucket_of(key);

        if self.entries[index].is_none() && self.options.indexing == Indexing::Tracked {
            self.index_list.push(index);
        }

        self.entries[index] = Some(Box::new(Entry {
            key: key.into(),
            data,
            next: None,
        }));

        index
    }

    /// Find the most recently inserted entry whose key equals `key`
    pub fn lookup(&self, key: &[u8]) -> Option<&Entry<T>> {
        self.lookup_key(key)
    }

    /// Find an entry whose key equals exactly the first `length` bytes of `key`
    pub fn lookup_n(&self, key: &[u8], length: usize) -> Option<&Entry<T>> {
        self.lookup_key(&key[..length.min(key.len())])
    }

    fn lookup_key(&self, key: &[u8]) -> Option<&Entry<T>> {
        let mut node = self.entries[self.bucket_of(key)].as_deref();
        while let Some(entry) = node {
            if &*entry.key == key {
                return Some(entry);
            }
            node = entry.next.as_deref();
        }
        None
    }

    /// Iterate every entry, chain by chain.
    ///
    /// With tracked indexing only the recorded buckets are visited, most
    /// recently occupied first; otherwise the bucket array is scanned.
    pub fn iter(&self) -> Iter<'_, T> {
        let buckets = match self.options.indexing {
            Indexing::Tracked => Buckets::Indexed(self.index_list.iter().rev()),
            Indexing::Untracked => Buckets::Scan(0..self.entries.len()),
        };

        Iter {
            entries: &self.entries,
            buckets,
            chain: None,
        }
    }

    /// Release every entry through the destructor and tear the table down
    pub fn cleanup(mut self) -> CleanupStats {
        self.release()
    }

    fn release(&mut self) -> CleanupStats {
        let mut stats = CleanupStats::default();
        let mut entries = std::mem::take(&mut self.entries);
        let index_list = std::mem::take(&mut self.index_list);

        match self.options.indexing {
            Indexing::Tracked => {
                for index in index_list.into_iter().rev() {
                    stats.buckets_visited += 1;
                    stats.released += release_chain(entries[index].take(), self.destructor);
                }
            }
            Indexing::Untracked => {
                for slot in entries.iter_mut() {
                    stats.buckets_visited += 1;
                    stats.released += release_chain(slot.take(), self.destructor);
                }
            }
        }

        stats
    }
}

impl<T> Drop for FastHash<T> {
    fn drop(&mut self) {
        self.release();
    }
}

// Unlinks iteratively so long chains cannot overflow the stack on drop
fn release_chain<T>(mut node: Option<Box<Entry<T>>>, destructor: Option<Destructor<T>>) -> usize {
    let mut released = 0;
    while let Some(mut entry) = node {
        node = entry.next.take();
        let Entry { data, .. } = *entry;
        if let Some(destruct) = destructor {
            destruct(data);
        }
        released += 1;
    }
    released
}

enum Buckets<'a> {
    Indexed(std::iter::Rev<std::slice::Iter<'a, usize>>),
    Scan(std::ops::Range<usize>),
}

impl Iterator for Buckets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Buckets::Indexed(indices) => indices.next().copied(),
            Buckets::Scan(range) => range.next(),
        }
    }
}

/// Iterator over table entries, see [`FastHash::iter`]
pub struct Iter<'a, T> {
    entries: &'a [Option<Box<Entry<T>>>],
    buckets: Buckets<'a>,
    chain: Option<&'a Entry<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Entry<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                return Some(entry);
            }
            let bucket = self.buckets.next()?;
            self.chain = self.entries[bucket].as_deref();
        }
    }
}
