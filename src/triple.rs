//! Bit-packed triples and the entity pair keys derived from them.
//!
//! A [`Triple`] packs subject, predicate and object IDs into a single `u64`, subject in the most
//! significant bits. Because of that layout, numeric order of triples is subject-major order.
//! An [`EntityPair`] drops the predicate and stores either (subject, object) or (object, subject)
//! in the two 32 bit halves, so that numeric order of the pair is the lexicographic order of the
//! two components.
use std::fmt;

/// Subject or object ID.
pub type Id = u32;

/// Predicate ID, numbered independently of subjects and objects.
pub type PredicateId = u32;

/// Number of bits used for the subject in a packed triple.
pub const SUBJECT_BITS: u32 = 22;
/// Number of bits used for the predicate in a packed triple.
pub const PREDICATE_BITS: u32 = 20;
/// Number of bits used for the object in a packed triple.
pub const OBJECT_BITS: u32 = 22;

const _: () = assert!(SUBJECT_BITS + PREDICATE_BITS + OBJECT_BITS == u64::BITS);
// entity pair halves must be able to hold subjects and objects losslessly
const _: () = assert!(SUBJECT_BITS <= 32 && OBJECT_BITS <= 32);

/// Largest subject ID that fits into a triple.
pub const MAX_SUBJECT: Id = (1 << SUBJECT_BITS) - 1;
/// Largest predicate ID that fits into a triple.
pub const MAX_PREDICATE: PredicateId = (1 << PREDICATE_BITS) - 1;
/// Largest object ID that fits into a triple.
pub const MAX_OBJECT: Id = (1 << OBJECT_BITS) - 1;

const OBJECT_SHIFT: u32 = 0;
const PREDICATE_SHIFT: u32 = OBJECT_BITS;
const SUBJECT_SHIFT: u32 = PREDICATE_BITS + OBJECT_BITS;

const SUBJECT_MASK: u64 = (MAX_SUBJECT as u64) << SUBJECT_SHIFT;
const PREDICATE_MASK: u64 = (MAX_PREDICATE as u64) << PREDICATE_SHIFT;
const OBJECT_MASK: u64 = (MAX_OBJECT as u64) << OBJECT_SHIFT;

const HALF_BITS: u32 = u64::BITS / 2;
const HALF_MASK: u64 = u64::MAX >> HALF_BITS;

pub type Result<T> = core::result::Result<T, Error>;

/// Position in a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Subject,
    Predicate,
    Object,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Subject => write!(f, "subject"),
            Field::Predicate => write!(f, "predicate"),
            Field::Object => write!(f, "object"),
        }
    }
}

/// The error type for encoding triples.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("{field} ID {value} does not fit into {bits} bits")]
    FieldOverflow { field: Field, value: u32, bits: u32 },
}

fn check(field: Field, value: u32, max: u32, bits: u32) -> Result<u64> {
    if value > max {
        return Err(Error::FieldOverflow { field, value, bits });
    }
    Ok(u64::from(value))
}

/// A (subject, predicate, object) fact packed into 64 bits.
/// Ordering is numeric, which equals ascending (subject, predicate, object).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Triple(u64);

impl Triple {
    /// Packs the three IDs into a triple.
    /// Panics if any of them exceeds its bit width, use [`Triple::try_new`] for unchecked input.
    pub fn new(subject: Id, predicate: PredicateId, object: Id) -> Self {
        match Self::try_new(subject, predicate, object) {
            Ok(triple) => triple,
            Err(e) => panic!("cannot encode triple ({subject}, {predicate}, {object}): {e}"),
        }
    }

    /// Packs the three IDs into a triple, failing if any of them exceeds its bit width.
    pub fn try_new(subject: Id, predicate: PredicateId, object: Id) -> Result<Self> {
        let s = check(Field::Subject, subject, MAX_SUBJECT, SUBJECT_BITS)?;
        let p = check(Field::Predicate, predicate, MAX_PREDICATE, PREDICATE_BITS)?;
        let o = check(Field::Object, object, MAX_OBJECT, OBJECT_BITS)?;
        Ok(Triple((s << SUBJECT_SHIFT) | (p << PREDICATE_SHIFT) | (o << OBJECT_SHIFT)))
    }

    /// Reinterprets a raw packed value. Every `u64` is a valid triple.
    pub const fn from_raw(raw: u64) -> Self {
        Triple(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn subject(self) -> Id {
        ((self.0 & SUBJECT_MASK) >> SUBJECT_SHIFT) as Id
    }

    pub const fn predicate(self) -> PredicateId {
        ((self.0 & PREDICATE_MASK) >> PREDICATE_SHIFT) as PredicateId
    }

    pub const fn object(self) -> Id {
        ((self.0 & OBJECT_MASK) >> OBJECT_SHIFT) as Id
    }

    /// The (subject, predicate, object) IDs.
    pub const fn ids(self) -> (Id, PredicateId, Id) {
        (self.subject(), self.predicate(), self.object())
    }

    /// Subject-major key of this triple.
    pub const fn so_key(self) -> EntityPair {
        EntityPair::so(self.subject(), self.object())
    }

    /// Object-major key of this triple.
    pub const fn os_key(self) -> EntityPair {
        EntityPair::os(self.object(), self.subject())
    }

    /// Rebuilds a triple from a subject-major key and the predicate it was stored under.
    pub fn from_so_key(pair: EntityPair, predicate: PredicateId) -> Self {
        Triple::new(pair.high(), predicate, pair.low())
    }

    /// Rebuilds a triple from an object-major key and the predicate it was stored under.
    pub fn from_os_key(pair: EntityPair, predicate: PredicateId) -> Self {
        Triple::new(pair.low(), predicate, pair.high())
    }
}

impl From<Triple> for u64 {
    fn from(triple: Triple) -> Self {
        triple.0
    }
}

impl From<Triple> for (Id, PredicateId, Id) {
    fn from(t: Triple) -> Self {
        t.ids()
    }
}

// Show the components instead of the packed number, which is meaningless to humans.
impl fmt::Debug for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject(), self.predicate(), self.object())
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject(), self.predicate(), self.object())
    }
}

/// Two entity IDs packed into the high and low halves of a `u64`.
/// Which half holds the subject depends on the index the pair is stored in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EntityPair(u64);

impl EntityPair {
    /// Subject-major pair, orders by subject first and object second.
    pub const fn so(subject: Id, object: Id) -> Self {
        EntityPair(((subject as u64) << HALF_BITS) | object as u64)
    }

    /// Object-major pair, orders by object first and subject second.
    pub const fn os(object: Id, subject: Id) -> Self {
        EntityPair(((object as u64) << HALF_BITS) | subject as u64)
    }

    pub const fn high(self) -> Id {
        (self.0 >> HALF_BITS) as Id
    }

    pub const fn low(self) -> Id {
        (self.0 & HALF_MASK) as Id
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.high(), self.low())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::init;
    use pretty_assertions::assert_eq;

    #[test]
    fn masks() {
        init();
        let triple = Triple::new(1, 2, 3);
        assert_eq!(triple.raw() & SUBJECT_MASK, Triple::new(1, 0, 0).raw());
        assert_eq!(triple.raw() & PREDICATE_MASK, Triple::new(0, 2, 0).raw());
        assert_eq!(triple.raw() & OBJECT_MASK, Triple::new(0, 0, 3).raw());
        assert_eq!(SUBJECT_MASK | PREDICATE_MASK | OBJECT_MASK, u64::MAX);
        assert_eq!((1, 2, 3), triple.ids());
    }

    #[test]
    fn keys() {
        init();
        let triple = Triple::new(1, 2, 3);
        let so = triple.so_key();
        assert_eq!(so.raw(), (1 << 32) | 3);
        assert_eq!((so.high(), so.low()), (1, 3));
        let os = triple.os_key();
        assert_eq!(os.raw(), (3 << 32) | 1);
        assert_eq!(Triple::from_so_key(so, 2), triple);
        assert_eq!(Triple::from_os_key(os, 2), triple);
    }

    #[test]
    fn field_limits() {
        init();
        let triple = Triple::new(MAX_SUBJECT, MAX_PREDICATE, MAX_OBJECT);
        assert_eq!(triple.raw(), u64::MAX);
        assert_eq!((MAX_SUBJECT, MAX_PREDICATE, MAX_OBJECT), triple.ids());
        assert_eq!(
            Triple::try_new(MAX_SUBJECT + 1, 0, 0),
            Err(Error::FieldOverflow { field: Field::Subject, value: MAX_SUBJECT + 1, bits: SUBJECT_BITS })
        );
        assert_eq!(
            Triple::try_new(0, MAX_PREDICATE + 1, 0),
            Err(Error::FieldOverflow { field: Field::Predicate, value: MAX_PREDICATE + 1, bits: PREDICATE_BITS })
        );
        assert!(Triple::try_new(0, 0, MAX_OBJECT + 1).is_err());
    }

    #[test]
    #[should_panic(expected = "subject ID 4194304 does not fit into 22 bits")]
    fn subject_overflow_panics() {
        Triple::new(MAX_SUBJECT + 1, 1, 1);
    }

    #[test]
    fn key_order() {
        init();
        // subject dominates in SO order even against a larger object
        assert!(EntityPair::so(1, MAX_OBJECT) < EntityPair::so(2, 0));
        assert!(EntityPair::os(1, MAX_SUBJECT) < EntityPair::os(2, 0));
        assert!(Triple::new(1, MAX_PREDICATE, MAX_OBJECT) < Triple::new(2, 0, 0));
        assert_eq!(format!("{:?}", Triple::new(4, 5, 6)), "(4, 5, 6)");
        assert_eq!(Triple::new(4, 5, 6).to_string(), "4 5 6");
    }
}
