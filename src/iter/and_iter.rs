use super::{Comparator, Operands, Side, TripleIter};
use crate::triple::Triple;
use std::cmp::Ordering;

/// Merge intersection of two cursors, also known as a leapfrog or zig-zag join.
///
/// While the keys of the two current triples differ, only the operand that lags behind is advanced.
/// On equal keys, the triple of one operand is staged as the result. After it has been consumed,
/// the operand it came from is moved past the matched key if it is still sitting on it, and the next
/// match is taken from the other operand. Every result therefore has a key that occurs in both
/// operands, results are in ascending key order, and for operands with unique keys every common
/// key is returned exactly once. Takes O(n+m) comparisons in total.
pub struct AndIter<A, B> {
    operands: Operands<A, B>,
    comparator: Comparator,
}

impl<A: TripleIter, B: TripleIter> AndIter<A, B> {
    pub const fn new(a: A, b: B, comparator: Comparator) -> Self {
        AndIter { operands: Operands::new(a, b), comparator }
    }
}

impl<A: TripleIter, B: TripleIter> TripleIter for AndIter<A, B> {
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
        let previous = self.operands.current.take();
        let mut first_step = true;
        while !self.operands.a.is_done() && !self.operands.b.is_done() {
            let (a, b) = (self.operands.a.peek(), self.operands.b.peek());
            match self.comparator.compare(a, b) {
                Ordering::Less => self.operands.a.advance(),
                Ordering::Greater => self.operands.b.advance(),
                Ordering::Equal => {
                    // equal before any step: the previously returned operand is still on the last match
                    if let (Some(side), true) = (previous, first_step) {
                        self.operands.advance_side(side);
                    }
                    self.operands.current = Some(previous.map_or(Side::A, Side::other));
                    return;
                }
            }
            first_step = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::iter::{EntryIter, OrIter};
    use crate::predicate_entry::PredicateEntry;
    use crate::tests::{entry, init, subjects};
    use pretty_assertions::assert_eq;

    fn scan(e: &PredicateEntry) -> EntryIter<'_> {
        EntryIter::new(e, Filter::PassThrough)
    }

    #[test]
    fn subset() -> color_eyre::Result<()> {
        init();
        let a = entry(2, &[(2, 10), (3, 10)])?;
        let b = entry(2, &[(1, 10), (2, 10), (3, 10), (4, 10)])?;
        let mut and = AndIter::new(scan(&a), scan(&b), Comparator::Subject);
        and.init();
        let mut v = Vec::new();
        while let Some(t) = and.take() {
            v.push(t);
        }
        assert_eq!(v, vec![Triple::new(2, 2, 10), Triple::new(3, 2, 10)]);
        assert!(and.is_done());
        Ok(())
    }

    #[test]
    fn operand_order_does_not_matter() -> color_eyre::Result<()> {
        init();
        let a = entry(1, &[(1, 0), (4, 0), (6, 0), (9, 0), (12, 0)])?;
        let b = entry(2, &[(2, 0), (4, 0), (5, 0), (9, 0), (10, 0), (12, 0), (15, 0)])?;
        let ab: Vec<_> = AndIter::new(scan(&a), scan(&b), Comparator::Subject).triples().collect();
        let ba: Vec<_> = AndIter::new(scan(&b), scan(&a), Comparator::Subject).triples().collect();
        assert_eq!(subjects(&ab), vec![4, 9, 12]);
        assert_eq!(subjects(&ba), vec![4, 9, 12]);
        Ok(())
    }

    #[test]
    fn alternates_operands() -> color_eyre::Result<()> {
        init();
        let a = entry(1, &[(1, 0), (2, 0), (3, 0)])?;
        let b = entry(2, &[(1, 0), (2, 0), (3, 0)])?;
        let v: Vec<_> = AndIter::new(scan(&a), scan(&b), Comparator::Subject)
            .triples()
            .map(|t| (t.subject(), t.predicate()))
            .collect();
        assert_eq!(v, vec![(1, 1), (2, 2), (3, 1)]);
        Ok(())
    }

    #[test]
    fn duplicate_keys() -> color_eyre::Result<()> {
        init();
        // subject 2 has two objects in the first operand
        let a = entry(1, &[(2, 1), (2, 2), (5, 1)])?;
        let b = entry(2, &[(2, 7), (9, 7)])?;
        let v: Vec<_> =
            AndIter::new(scan(&a), scan(&b), Comparator::Subject).triples().map(Triple::ids).collect();
        assert_eq!(v, vec![(2, 1, 1), (2, 2, 7)]);
        Ok(())
    }

    #[test]
    fn subject_object() -> color_eyre::Result<()> {
        init();
        let a = entry(1, &[(1, 1), (1, 2), (2, 2)])?;
        let b = entry(2, &[(1, 2), (2, 1), (2, 2)])?;
        let v: Vec<_> = AndIter::new(scan(&a), scan(&b), Comparator::SubjectObject)
            .triples()
            .map(|t| (t.subject(), t.object()))
            .collect();
        assert_eq!(v, vec![(1, 2), (2, 2)]);
        Ok(())
    }

    #[test]
    fn disjoint_and_empty() -> color_eyre::Result<()> {
        init();
        let a = entry(1, &[(1, 0), (3, 0)])?;
        let b = entry(2, &[(2, 0), (4, 0)])?;
        let empty = PredicateEntry::new(3);
        let mut and = AndIter::new(scan(&a), scan(&b), Comparator::Subject);
        and.init();
        assert!(and.is_done());
        assert!(and.is_done());
        assert_eq!(AndIter::new(scan(&a), scan(&empty), Comparator::Subject).triples().count(), 0);
        assert_eq!(AndIter::new(scan(&empty), scan(&a), Comparator::Subject).triples().count(), 0);
        Ok(())
    }

    #[test]
    fn union_of_intersections() -> color_eyre::Result<()> {
        init();
        let a = entry(1, &[(1, 0), (2, 0), (3, 0)])?;
        let b = entry(2, &[(2, 0), (3, 0)])?;
        let c = entry(3, &[(5, 0), (6, 0)])?;
        let d = entry(4, &[(1, 0), (6, 0)])?;
        let tree = OrIter::new(
            AndIter::new(scan(&a), scan(&b), Comparator::Subject),
            AndIter::new(scan(&c), scan(&d), Comparator::Subject),
        );
        assert_eq!(subjects(&tree.triples().collect::<Vec<_>>()), vec![2, 3, 6]);
        Ok(())
    }
}
