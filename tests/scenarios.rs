use pretty_assertions::assert_eq;
use tristore::iter::{Comparator, TripleIter, intersect, scan, union};
use tristore::{Filter, Id, PredicateEntry, PredicateId, Triple};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn entry(predicate: PredicateId, subjects: impl IntoIterator<Item = Id>, object: Id) -> PredicateEntry {
    let mut entry = PredicateEntry::new(predicate);
    entry.extend_pairs(subjects.into_iter().map(|s| (s, object))).unwrap();
    entry.optimize();
    entry
}

#[test]
fn range_filter() {
    init();
    let e = entry(5, 1..=20, 42);
    let v: Vec<_> = scan(&e, Filter::range(3, 10)).triples().collect();
    let expected: Vec<_> = (3..=10).map(|s| Triple::new(s, 5, 42)).collect();
    assert_eq!(v, expected);
}

#[test]
fn union_of_two_predicates() {
    init();
    let a = entry(2, 1..=4, 10);
    let b = entry(3, 5..=6, 20);
    let mut it = union(scan(&a, Filter::PassThrough), scan(&b, Filter::PassThrough));
    it.init();
    let mut v = Vec::new();
    while let Some(t) = it.take() {
        v.push(t.ids());
    }
    assert_eq!(v, vec![(1, 2, 10), (2, 2, 10), (3, 2, 10), (4, 2, 10), (5, 3, 20), (6, 3, 20)]);
}

#[test]
fn intersection_by_subject() {
    init();
    let a = entry(2, [2, 3], 10);
    let b = entry(2, 1..=4, 10);
    let mut it = intersect(scan(&a, Filter::PassThrough), scan(&b, Filter::PassThrough), Comparator::Subject);
    it.init();
    let mut subjects = Vec::new();
    while let Some(t) = it.take() {
        subjects.push(t.subject());
    }
    assert_eq!(subjects, vec![2, 3]);
}

#[test]
fn nested_union() {
    init();
    let entries: Vec<_> = (0..4).map(|i| entry(i + 2, [2 * i + 1, 2 * i + 2], 10 * (i + 1))).collect();
    let s = |i: usize| scan(&entries[i], Filter::PassThrough);
    let it = union(union(s(0), s(1)), union(s(2), s(3)));
    let v: Vec<_> = it.triples().collect();
    assert_eq!(v.iter().map(|t| t.subject()).collect::<Vec<_>>(), (1..=8).collect::<Vec<_>>());
    assert!(v.iter().all(|t| t.predicate() == (t.subject() - 1) / 2 + 2));
}

#[test]
fn intersection_of_unions() {
    init();
    // (A ∪ B) ∩ (C ∪ D)
    let a = entry(1, [1, 5, 9], 0);
    let b = entry(2, [2, 6], 0);
    let c = entry(3, [2, 3], 0);
    let d = entry(4, [9, 11], 0);
    let it = intersect(
        union(scan(&a, Filter::PassThrough), scan(&b, Filter::PassThrough)),
        union(scan(&c, Filter::PassThrough), scan(&d, Filter::PassThrough)),
        Comparator::Subject,
    );
    assert_eq!(it.triples().map(|t| t.subject()).collect::<Vec<_>>(), vec![2, 9]);
}

#[test]
fn done_is_idempotent() {
    init();
    let a = entry(1, [1, 2], 0);
    let b = entry(2, [2], 0);
    let mut it = intersect(scan(&a, Filter::PassThrough), scan(&b, Filter::PassThrough), Comparator::Subject);
    it.init();
    for _ in 0..5 {
        assert!(!it.is_done());
    }
    assert_eq!(it.peek(), Triple::new(2, 1, 0));
    it.advance();
    for _ in 0..5 {
        assert!(it.is_done());
    }
}

#[test]
fn abandon_before_exhaustion() {
    init();
    let a = entry(1, 0..1000, 0);
    let b = entry(2, 500..1500, 0);
    let mut it = union(scan(&a, Filter::PassThrough), scan(&b, Filter::PassThrough));
    it.init();
    assert_eq!(it.take().map(Triple::subject), Some(0));
    drop(it);
    // the entries are free to be modified again once the cursors are gone
    let mut a = a;
    a.append(1000, 0).unwrap();
    assert_eq!(a.len(), 1001);
}
