//! Lazy cursors over predicate entries and merge joins of them.
//!
//! Every cursor implements [`TripleIter`], an external iteration protocol with separate
//! [`peek`](TripleIter::peek) and [`advance`](TripleIter::advance) steps. Join cursors compare the
//! current triples of their two operands to decide which one to step, so a tree of joins over
//! optimized entries yields its result in ascending key order without materializing anything.
//!
//! ```
//! use tristore::{Filter, PredicateEntry, iter::{Comparator, TripleIter, intersect, scan}};
//!
//! let mut persons = PredicateEntry::new(1);
//! let mut authors = PredicateEntry::new(2);
//! persons.extend_pairs([(1, 10), (2, 10), (3, 10)]).unwrap();
//! authors.extend_pairs([(2, 20), (3, 21), (4, 22)]).unwrap();
//! persons.optimize();
//! authors.optimize();
//! let both = intersect(scan(&persons, Filter::PassThrough), scan(&authors, Filter::PassThrough), Comparator::Subject);
//! let subjects: Vec<_> = both.triples().map(|t| t.subject()).collect();
//! assert_eq!(subjects, vec![2, 3]);
//! ```
use crate::filter::Filter;
use crate::predicate_entry::PredicateEntry;
use crate::triple::Triple;
use std::iter::FusedIterator;

mod and_iter;
pub use and_iter::AndIter;
mod comparator;
pub use comparator::Comparator;
mod entry_iter;
pub use entry_iter::EntryIter;
mod or_iter;
pub use or_iter::OrIter;

/// Cursor over triples in non-decreasing key order.
///
/// [`init`](TripleIter::init) must be called exactly once before any other method.
/// [`peek`](TripleIter::peek) and [`advance`](TripleIter::advance) panic when the cursor is done.
/// Dropping a join cursor drops its operands.
pub trait TripleIter {
    /// Prepares the cursor and moves it onto the first result, if any.
    /// Panics when called a second time.
    fn init(&mut self);

    /// Whether all results have been consumed.
    fn is_done(&self) -> bool;

    /// The current triple, without consuming it.
    fn peek(&self) -> Triple;

    /// Consumes the current triple.
    fn advance(&mut self);

    /// Resynchronizes a join after one of its operands moved.
    fn next_operand(&mut self) {}

    /// Consumes and returns the current triple, or `None` when done.
    fn take(&mut self) -> Option<Triple> {
        if self.is_done() {
            return None;
        }
        let triple = self.peek();
        self.advance();
        Some(triple)
    }

    /// Initializes the cursor and adapts it to a standard [`Iterator`].
    fn triples(mut self) -> Triples<Self>
    where
        Self: Sized,
    {
        self.init();
        Triples(self)
    }
}

impl<T: TripleIter + ?Sized> TripleIter for Box<T> {
    fn init(&mut self) {
        (**self).init();
    }

    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    fn peek(&self) -> Triple {
        (**self).peek()
    }

    fn advance(&mut self) {
        (**self).advance();
    }

    fn next_operand(&mut self) {
        (**self).next_operand();
    }

    fn take(&mut self) -> Option<Triple> {
        (**self).take()
    }
}

/// Type-erased cursor, for trees that are assembled at runtime.
pub type BoxedIter<'a> = Box<dyn TripleIter + 'a>;

/// Adapter from an initialized [`TripleIter`] to an [`Iterator`], created by [`TripleIter::triples`].
pub struct Triples<I>(I);

impl<I: TripleIter> Iterator for Triples<I> {
    type Item = Triple;

    fn next(&mut self) -> Option<Triple> {
        self.0.take()
    }
}

impl<I: TripleIter> FusedIterator for Triples<I> {}

/// Subject-major scan of an entry, skipping triples rejected by the filter.
pub fn scan(entry: &PredicateEntry, filter: Filter) -> BoxedIter<'_> {
    Box::new(EntryIter::new(entry, filter))
}

/// Merge union of two cursors by subject, duplicates included.
pub fn union<'a>(a: BoxedIter<'a>, b: BoxedIter<'a>) -> BoxedIter<'a> {
    Box::new(OrIter::new(a, b))
}

/// Merge intersection of two cursors under the given comparator.
pub fn intersect<'a>(a: BoxedIter<'a>, b: BoxedIter<'a>, comparator: Comparator) -> BoxedIter<'a> {
    Box::new(AndIter::new(a, b, comparator))
}

/// One of the two operands of a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

impl Side {
    const fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// State shared by the join cursors: both operands and which of them holds the current result.
/// `current` is `None` before initialization and after exhaustion.
struct Operands<A, B> {
    a: A,
    b: B,
    current: Option<Side>,
    initialized: bool,
}

impl<A: TripleIter, B: TripleIter> Operands<A, B> {
    const fn new(a: A, b: B) -> Self {
        Operands { a, b, current: None, initialized: false }
    }

    fn init(&mut self) {
        assert!(!self.initialized, "join iterator initialized twice");
        self.initialized = true;
        self.a.init();
        self.b.init();
    }

    const fn is_done(&self) -> bool {
        self.current.is_none()
    }

    fn peek(&self) -> Triple {
        match self.current {
            Some(Side::A) => self.a.peek(),
            Some(Side::B) => self.b.peek(),
            None => panic!("peek on an exhausted join iterator"),
        }
    }

    fn advance_side(&mut self, side: Side) {
        match side {
            Side::A => self.a.advance(),
            Side::B => self.b.advance(),
        }
    }

    fn advance_current(&mut self) {
        match self.current {
            Some(side) => self.advance_side(side),
            None => panic!("advance on an exhausted join iterator"),
        }
    }
}
