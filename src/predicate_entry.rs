//! Storage for all facts sharing one predicate.
use crate::sort::quicksort;
use crate::triple::{EntityPair, Id, MAX_OBJECT, MAX_SUBJECT, PredicateId, Triple};
use bytesize::ByteSize;
use log::{debug, trace};
use std::collections::TryReserveError;
use std::fmt;
use std::mem::size_of;

/// Number of facts a new entry has room for before it grows the first time.
pub const INITIAL_CAPACITY: usize = 16;

pub type Result<T> = core::result::Result<T, Error>;

/// The error type for adding facts to a predicate entry.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to grow predicate entry {predicate} to {capacity} facts")]
    Allocation {
        predicate: PredicateId,
        capacity: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Sort order of one of the two views of a predicate entry.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Subject-major, ascending (subject, object).
    #[default]
    SO,
    /// Object-major, ascending (object, subject).
    OS,
}

impl Order {
    /// Decodes a key stored in this order.
    pub fn triple(self, pair: EntityPair, predicate: PredicateId) -> Triple {
        match self {
            Order::SO => Triple::from_so_key(pair, predicate),
            Order::OS => Triple::from_os_key(pair, predicate),
        }
    }
}

/// All facts with the same predicate, stored twice as entity pairs: once subject-major and once
/// object-major.
///
/// Appending keeps both arrays index-aligned, the same position refers to the same fact.
/// [`optimize`](PredicateEntry::optimize) sorts each array by its own key, after which positions no
/// longer correspond. Iterators that rely on sort order must only be built after optimizing.
pub struct PredicateEntry {
    predicate: PredicateId,
    capacity: usize,
    so_entries: Vec<EntityPair>,
    os_entries: Vec<EntityPair>,
    optimized: bool,
}

impl fmt::Debug for PredicateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "predicate {} with {} of {} facts, {}{}",
            self.predicate,
            self.len(),
            self.capacity,
            ByteSize(self.size_in_bytes() as u64),
            if self.optimized { "" } else { ", not optimized" }
        )
    }
}

impl PredicateEntry {
    /// Entry without facts or storage, used for scans of absent predicates.
    pub(crate) const EMPTY: PredicateEntry =
        PredicateEntry { predicate: 0, capacity: 0, so_entries: Vec::new(), os_entries: Vec::new(), optimized: true };

    /// Creates an empty entry with room for [`INITIAL_CAPACITY`] facts.
    pub fn new(predicate: PredicateId) -> Self {
        PredicateEntry {
            predicate,
            capacity: INITIAL_CAPACITY,
            so_entries: Vec::with_capacity(INITIAL_CAPACITY),
            os_entries: Vec::with_capacity(INITIAL_CAPACITY),
            // an empty entry is trivially sorted
            optimized: true,
        }
    }

    /// Creates an empty entry with room for `capacity` facts, at least one.
    /// Fails instead of aborting if the arrays cannot be allocated.
    pub fn with_capacity(predicate: PredicateId, capacity: usize) -> Result<Self> {
        let mut entry = PredicateEntry {
            predicate,
            capacity: 0,
            so_entries: Vec::new(),
            os_entries: Vec::new(),
            optimized: true,
        };
        entry.reserve(capacity.max(1))?;
        Ok(entry)
    }

    pub const fn predicate(&self) -> PredicateId {
        self.predicate
    }

    /// Number of stored facts, duplicates included.
    pub fn len(&self) -> usize {
        self.so_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.so_entries.is_empty()
    }

    /// Number of facts that fit before the next growth.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether both views are sorted, that is, no fact was appended since the last optimization.
    pub const fn is_optimized(&self) -> bool {
        self.optimized
    }

    /// Size in bytes on the heap.
    pub fn size_in_bytes(&self) -> usize {
        2 * self.capacity * size_of::<EntityPair>()
    }

    /// Doubles the capacity of both arrays.
    fn grow(&mut self) -> Result<()> {
        let capacity = self.capacity * 2;
        trace!("predicate entry {} grows from {} to {capacity} facts", self.predicate, self.capacity);
        self.reserve(capacity)
    }

    /// Makes room for exactly `capacity` facts in both arrays.
    fn reserve(&mut self, capacity: usize) -> Result<()> {
        let additional = capacity.saturating_sub(self.len());
        let predicate = self.predicate;
        let map = |source: TryReserveError| Error::Allocation { predicate, capacity, source };
        self.so_entries.try_reserve_exact(additional).map_err(map)?;
        self.os_entries.try_reserve_exact(additional).map_err(map)?;
        self.capacity = capacity;
        Ok(())
    }

    /// Adds the fact (subject, predicate, object) to both views.
    /// Duplicates are kept. Invalidates the sort order until the next [`optimize`](Self::optimize).
    /// Panics if the subject or object does not fit into a triple.
    pub fn append(&mut self, subject: Id, object: Id) -> Result<()> {
        assert!(subject <= MAX_SUBJECT, "subject {subject} out of range");
        assert!(object <= MAX_OBJECT, "object {object} out of range");
        if self.len() == self.capacity {
            self.grow()?;
        }
        self.so_entries.push(EntityPair::so(subject, object));
        self.os_entries.push(EntityPair::os(object, subject));
        self.optimized = false;
        Ok(())
    }

    /// Appends all (subject, object) pairs.
    pub fn extend_pairs(&mut self, pairs: impl IntoIterator<Item = (Id, Id)>) -> Result<()> {
        for (subject, object) in pairs {
            self.append(subject, object)?;
        }
        Ok(())
    }

    /// Sorts the subject-major view by (subject, object) and the object-major view by (object, subject).
    /// The two views are sorted independently and in parallel.
    pub fn optimize(&mut self) {
        if self.optimized {
            return;
        }
        let (so, os) = (&mut self.so_entries, &mut self.os_entries);
        rayon::join(|| quicksort(so), || quicksort(os));
        self.optimized = true;
        debug!("optimized {self:?}");
    }

    /// The keys of one view, in insertion order before optimizing and in sort order after.
    pub fn entries(&self, order: Order) -> &[EntityPair] {
        match order {
            Order::SO => &self.so_entries,
            Order::OS => &self.os_entries,
        }
    }

    /// Decodes the fact at the given position of one view.
    /// Panics if the position is out of bounds.
    pub fn triple_at(&self, order: Order, index: usize) -> Triple {
        order.triple(self.entries(order)[index], self.predicate)
    }

    /// All facts in subject-major order, assuming the entry is optimized.
    pub fn triples(&self) -> impl Iterator<Item = Triple> + '_ {
        self.so_entries.iter().map(|&pair| Triple::from_so_key(pair, self.predicate))
    }
}
