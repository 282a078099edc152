//! All predicate entries of a dataset, loaded from plain text integer triples.
use crate::predicate_entry::{self, PredicateEntry};
use crate::triple::{self, Id, PredicateId, Triple};
use bytesize::ByteSize;
use log::{debug, info};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::time::Instant;

pub type Result<T> = core::result::Result<T, Error>;

/// The error type for loading a graph.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read triples")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {msg}")]
    Parse { line: usize, msg: String },
    #[error("line {line}: invalid triple")]
    Triple {
        line: usize,
        #[source]
        source: triple::Error,
    },
    #[error("invalid triple")]
    Ids(#[from] triple::Error),
    #[error("failed to store triple")]
    Entry(#[from] predicate_entry::Error),
}

/// Predicate entries keyed by predicate ID.
#[derive(Debug, Default)]
pub struct Graph {
    entries: BTreeMap<PredicateId, PredicateEntry>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the triple to the entry of its predicate, creating the entry if necessary.
    pub fn insert(&mut self, triple: Triple) -> Result<()> {
        let (s, p, o) = triple.ids();
        self.entries.entry(p).or_insert_with(|| PredicateEntry::new(p)).append(s, o)?;
        Ok(())
    }

    /// Like [`insert`](Self::insert) for IDs that may not fit into a triple.
    pub fn insert_ids(&mut self, subject: Id, predicate: PredicateId, object: Id) -> Result<()> {
        self.insert(Triple::try_new(subject, predicate, object)?)
    }

    /// Number of triples over all predicates, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.values().map(PredicateEntry::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(PredicateEntry::is_empty)
    }

    pub fn entry(&self, predicate: PredicateId) -> Option<&PredicateEntry> {
        self.entries.get(&predicate)
    }

    /// Predicate IDs in ascending order.
    pub fn predicates(&self) -> impl Iterator<Item = PredicateId> + '_ {
        self.entries.keys().copied()
    }

    /// Sorts all entries, required before querying.
    pub fn optimize(&mut self) {
        for entry in self.entries.values_mut() {
            entry.optimize();
        }
    }

    /// Size in bytes on the heap, not counting the map itself.
    pub fn size_in_bytes(&self) -> usize {
        self.entries.values().map(PredicateEntry::size_in_bytes).sum()
    }

    /// Reads whitespace separated `subject predicate object` IDs, one triple per line, and optimizes
    /// the result. Empty lines and lines starting with `#` are skipped.
    /// # Example
    /// ```
    /// let data = "# s p o\n1 2 3\n\n4 2 5\n";
    /// let graph = tristore::Graph::read(data.as_bytes()).unwrap();
    /// assert_eq!(graph.len(), 2);
    /// assert_eq!(graph.entry(2).unwrap().len(), 2);
    /// ```
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let start = Instant::now();
        let mut graph = Graph::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let [s, p, o] = parse_line(line, i + 1)?;
            let triple = Triple::try_new(s, p, o).map_err(|source| Error::Triple { line: i + 1, source })?;
            graph.insert(triple)?;
        }
        debug!("read {} triples in {:?}", graph.len(), start.elapsed());
        graph.optimize();
        info!(
            "loaded {} triples with {} predicates, {}",
            graph.len(),
            graph.entries.len(),
            ByteSize(graph.size_in_bytes() as u64)
        );
        Ok(graph)
    }
}

fn parse_line(line: &str, number: usize) -> Result<[Id; 3]> {
    let mut ids = [0; 3];
    let mut fields = line.split_whitespace();
    for id in &mut ids {
        let field = fields.next().ok_or_else(|| Error::Parse { line: number, msg: "expected 3 IDs".to_owned() })?;
        *id = field.parse().map_err(|e| Error::Parse { line: number, msg: format!("invalid ID {field:?}: {e}") })?;
    }
    if let Some(extra) = fields.next() {
        return Err(Error::Parse { line: number, msg: format!("unexpected {extra:?} after the object") });
    }
    Ok(ids)
}
