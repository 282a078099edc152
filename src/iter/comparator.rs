use crate::triple::Triple;
use std::cmp::Ordering;

/// Key extraction and comparison used by joins to line up the current triples of their operands.
/// Must be monotonic with respect to the order both operands produce.
#[derive(Debug, Clone, Copy, Default)]
pub enum Comparator {
    /// Compare subjects only.
    #[default]
    Subject,
    /// Compare objects only, for object-major operands.
    Object,
    /// Compare (subject, object).
    SubjectObject,
    /// Compare (object, subject), for object-major operands.
    ObjectSubject,
    /// Caller supplied comparison.
    Custom(fn(Triple, Triple) -> Ordering),
}

impl Comparator {
    pub fn compare(&self, a: Triple, b: Triple) -> Ordering {
        match self {
            Comparator::Subject => a.subject().cmp(&b.subject()),
            Comparator::Object => a.object().cmp(&b.object()),
            Comparator::SubjectObject => a.so_key().cmp(&b.so_key()),
            Comparator::ObjectSubject => a.os_key().cmp(&b.os_key()),
            Comparator::Custom(f) => f(a, b),
        }
    }
}
