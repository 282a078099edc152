use crate::triple::{Id, Triple};

/// Value test applied while scanning a predicate entry, so that non-matching facts are skipped
/// without a secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Accept everything.
    #[default]
    PassThrough,
    /// Accept only the given ID.
    Equal(Id),
    /// Accept IDs between `begin` and `end`, both inclusive.
    Range { begin: Id, end: Id },
}

impl Filter {
    /// Inclusive range filter.
    /// Panics if `begin > end`.
    pub fn range(begin: Id, end: Id) -> Self {
        assert!(begin <= end, "empty filter range [{begin}, {end}]");
        Filter::Range { begin, end }
    }

    /// Whether the filter accepts a bare subject or object ID.
    pub const fn accepts(&self, id: Id) -> bool {
        match *self {
            Filter::PassThrough => true,
            Filter::Equal(value) => id == value,
            Filter::Range { begin, end } => begin <= id && id <= end,
        }
    }

    /// Tests the subject of the triple.
    pub const fn apply(&self, triple: Triple) -> bool {
        self.accepts(triple.subject())
    }

    /// Tests the object of the triple.
    pub const fn apply_object(&self, triple: Triple) -> bool {
        self.accepts(triple.object())
    }
}
