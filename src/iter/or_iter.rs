use super::{Comparator, Operands, Side, TripleIter};
use crate::triple::Triple;
use std::cmp::Ordering;

/// Merge union of two cursors.
///
/// Always yields the smaller of the two current triples, the first operand on ties, so duplicates
/// from both operands are all kept. Takes O(n+m) steps in total.
pub struct OrIter<A, B> {
    operands: Operands<A, B>,
    comparator: Comparator,
}

impl<A: TripleIter, B: TripleIter> OrIter<A, B> {
    /// Union of two subject-major cursors.
    pub const fn new(a: A, b: B) -> Self {
        Self::with_comparator(a, b, Comparator::Subject)
    }

    /// Union of two cursors ordered by the given comparator, for example object-major scans.
    pub const fn with_comparator(a: A, b: B, comparator: Comparator) -> Self {
        OrIter { operands: Operands::new(a, b), comparator }
    }
}

impl<A: TripleIter, B: TripleIter> TripleIter for OrIter<A, B> {
    fn init(&mut self) {
        self.operands.init();
        self.next_operand();
    }

    fn is_done(&self) -> bool {
        self.operands.is_done()
    }

    fn peek(&self) -> Triple {
        self.operands.peek()
    }

    fn advance(&mut self) {
        self.operands.advance_current();
        self.next_operand();
    }

    fn next_operand(&mut self) {
        let Operands { a, b, .. } = &self.operands;
        self.operands.current = match (a.is_done(), b.is_done()) {
            (true, true) => None,
            (true, false) => Some(Side::B),
            (false, true) => Some(Side::A),
            (false, false) => match self.comparator.compare(a.peek(), b.peek()) {
                Ordering::Greater => Some(Side::B),
                Ordering::Less | Ordering::Equal => Some(Side::A),
            },
        };
    }
}
