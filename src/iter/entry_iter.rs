use super::TripleIter;
use crate::filter::Filter;
use crate::predicate_entry::{Order, PredicateEntry};
use crate::triple::{EntityPair, Triple};
use log::warn;

static NO_FACTS: PredicateEntry = PredicateEntry::EMPTY;

/// Leaf cursor over one view of a predicate entry.
///
/// The filter is tested against the leading component of the view, the subject for [`Order::SO`]
/// and the object for [`Order::OS`]. On an optimized entry, equality and range filters first narrow
/// the scan to the matching key range by binary search.
#[derive(Debug)]
pub struct EntryIter<'a> {
    entry: &'a PredicateEntry,
    order: Order,
    filter: Filter,
    // current position
    position: usize,
    // exclusive
    end: usize,
    initialized: bool,
}

impl<'a> EntryIter<'a> {
    /// Subject-major scan. The cursor already rests on the first accepted triple, if any.
    pub fn new(entry: &'a PredicateEntry, filter: Filter) -> Self {
        Self::with_order(entry, Order::SO, filter)
    }

    /// Scan over the given view of the entry.
    pub fn with_order(entry: &'a PredicateEntry, order: Order, filter: Filter) -> Self {
        let entries = entry.entries(order);
        let (position, end) = if entry.is_optimized() {
            key_range(entries, filter)
        } else {
            warn!("scanning {entry:?}, results will not be sorted");
            (0, entries.len())
        };
        let mut iter = EntryIter { entry, order, filter, position, end, initialized: false };
        iter.skip_rejected();
        iter
    }

    /// Empty cursor, for patterns known to have no results, such as a predicate without facts.
    pub fn empty() -> Self {
        EntryIter {
            entry: &NO_FACTS,
            order: Order::SO,
            filter: Filter::PassThrough,
            position: 0,
            end: 0,
            initialized: false,
        }
    }

    pub const fn order(&self) -> Order {
        self.order
    }

    fn current(&self) -> Triple {
        self.entry.triple_at(self.order, self.position)
    }

    fn accepts(&self, triple: Triple) -> bool {
        match self.order {
            Order::SO => self.filter.apply(triple),
            Order::OS => self.filter.apply_object(triple),
        }
    }

    fn skip_rejected(&mut self) {
        while !self.is_done() && !self.accepts(self.current()) {
            self.position += 1;
        }
    }
}

/// Positions of the first and one past the last key whose leading component the filter accepts.
/// Only valid for sorted keys.
fn key_range(entries: &[EntityPair], filter: Filter) -> (usize, usize) {
    let (begin, end) = match filter {
        Filter::PassThrough => return (0, entries.len()),
        Filter::Equal(value) => (value, value),
        Filter::Range { begin, end } => (begin, end),
    };
    let first = entries.partition_point(|pair| pair.high() < begin);
    let last = first + entries[first..].partition_point(|pair| pair.high() <= end);
    (first, last)
}

impl TripleIter for EntryIter<'_> {
    fn init(&mut self) {
        assert!(!self.initialized, "entry iterator initialized twice");
        self.initialized = true;
    }

    fn is_done(&self) -> bool {
        self.position >= self.end
    }

    fn peek(&self) -> Triple {
        assert!(!self.is_done(), "peek on an exhausted entry iterator");
        self.current()
    }

    fn advance(&mut self) {
        assert!(!self.is_done(), "advance on an exhausted entry iterator");
        self.position += 1;
        self.skip_rejected();
    }
}
