#![doc = r#"
Indexing and query iteration core of a minimal triple store.

Each fact is packed into a single `u64` [`Triple`]. Facts are grouped by predicate into a
[`PredicateEntry`], which stores them twice as sortable [entity pairs](triple::EntityPair), once
subject-major and once object-major. Queries are trees of lazy cursors from the [`iter`] module:
filtered entry scans combined by merge union and merge intersection, producing triples in ascending
key order without materializing intermediate results.

# Example
```
use tristore::{Filter, PredicateEntry, iter::{Comparator, EntryIter, OrIter, AndIter, TripleIter}};

let mut knows = PredicateEntry::new(1);
let mut likes = PredicateEntry::new(2);
for s in 1..=20 {
    knows.append(s, 100).unwrap();
}
likes.extend_pairs([(5, 200), (12, 201), (30, 202)]).unwrap();
knows.optimize();
likes.optimize();

// subjects between 3 and 10 that know 100, or anyone who likes something
let or = OrIter::new(EntryIter::new(&knows, Filter::range(3, 10)), EntryIter::new(&likes, Filter::PassThrough));
assert_eq!(or.triples().count(), 11);

// subjects that both know and like something
let and = AndIter::new(EntryIter::new(&knows, Filter::PassThrough), EntryIter::new(&likes, Filter::PassThrough), Comparator::Subject);
let subjects: Vec<_> = and.triples().map(|t| t.subject()).collect();
assert_eq!(subjects, vec![5, 12]);
```
"#]
// value filters applied during entry scans
pub mod filter;
// predicate entries of a whole dataset
pub mod graph;
// cursors and merge joins
pub mod iter;
// per-predicate storage
pub mod predicate_entry;
// in-place quicksort of entity pair keys
pub mod sort;
// bit-packed triples and entity pairs
pub mod triple;

pub use filter::Filter;
pub use graph::Graph;
pub use iter::TripleIter;
pub use predicate_entry::PredicateEntry;
pub use triple::{EntityPair, Id, PredicateId, Triple};

#[cfg(test)]
mod tests {
    use crate::predicate_entry::{self, PredicateEntry};
    use crate::triple::{Id, PredicateId, Triple};
    use std::sync::Once;

    static INIT: Once = Once::new();

    pub fn init() {
        INIT.call_once(|| {
            let _ = env_logger::builder().is_test(true).try_init();
            color_eyre::install().unwrap();
        });
    }

    /// Optimized entry with the given (subject, object) pairs.
    pub fn entry(predicate: PredicateId, pairs: &[(Id, Id)]) -> predicate_entry::Result<PredicateEntry> {
        let mut entry = PredicateEntry::new(predicate);
        entry.extend_pairs(pairs.iter().copied())?;
        entry.optimize();
        Ok(entry)
    }

    pub fn subjects(triples: &[Triple]) -> Vec<Id> {
        triples.iter().map(|t| t.subject()).collect()
    }
}
