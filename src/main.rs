/// *This binary is available only if tristore is built with the `"cli"` feature.*
/// Loads integer triples and runs a union or intersection of predicate scans over them.
use clap::{Parser, ValueEnum};
use color_eyre::config::HookBuilder;
use color_eyre::eyre::{Report, WrapErr, bail};
use fs_err::File;
use log::{info, warn};
use std::io::{BufWriter, Write};
use tristore::iter::{BoxedIter, Comparator, EntryIter, OrIter, intersect};
use tristore::predicate_entry::Order;
use tristore::{Filter, Graph, TripleIter};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Key {
    /// subject only
    Subject,
    /// subject and object
    SubjectObject,
}

/// query integer triples by predicate
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// file with one "subject predicate object" triple of decimal IDs per line
    input_file: String,

    #[arg(short, long = "predicate", required = true, num_args = 1..)]
    /// predicates to scan, combined in the given order
    predicates: Vec<u32>,

    #[arg(short, long)]
    /// intersect the scans instead of uniting them
    and: bool,

    #[arg(short, long, value_enum, default_value_t = Key::Subject)]
    /// key to intersect on
    key: Key,

    #[arg(long, conflicts_with = "range")]
    /// only subjects equal to this ID, objects with --object-major
    eq: Option<u32>,

    #[arg(long, num_args = 2, value_names = ["BEGIN", "END"])]
    /// only subjects in this inclusive range, objects with --object-major
    range: Option<Vec<u32>>,

    #[arg(short, long)]
    /// scan in object-major order
    object_major: bool,

    #[arg(short, long)]
    /// count triples only, do not print them
    count: bool,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

impl Args {
    fn filter(&self) -> Result<Filter, Report> {
        Ok(match (self.eq, self.range.as_deref()) {
            (Some(value), _) => Filter::Equal(value),
            (None, Some(&[begin, end])) => {
                if begin > end {
                    bail!("empty range {begin}..{end}");
                }
                Filter::range(begin, end)
            }
            _ => Filter::PassThrough,
        })
    }

    fn comparator(&self) -> Comparator {
        match (self.key, self.object_major) {
            (Key::Subject, false) => Comparator::Subject,
            (Key::Subject, true) => Comparator::Object,
            (Key::SubjectObject, false) => Comparator::SubjectObject,
            (Key::SubjectObject, true) => Comparator::ObjectSubject,
        }
    }
}

fn main() -> Result<(), Report> {
    HookBuilder::default().display_env_section(false).install()?;
    let args = Args::parse();
    env_logger::Builder::new().filter_level(args.verbose.log_level_filter()).init();

    let filename = &args.input_file;
    let file = File::open(filename).with_context(|| format!("Error opening input file {filename}"))?;
    let graph = Graph::read(std::io::BufReader::new(file))
        .with_context(|| format!("Error loading triples from {filename}"))?;

    let filter = args.filter()?;
    let order = if args.object_major { Order::OS } else { Order::SO };
    let comparator = args.comparator();
    let mut tree: Option<BoxedIter<'_>> = None;
    for &p in &args.predicates {
        let scan: BoxedIter<'_> = match graph.entry(p) {
            Some(entry) => Box::new(EntryIter::with_order(entry, order, filter)),
            None => {
                warn!("predicate {p} does not occur in {filename}");
                Box::new(EntryIter::empty())
            }
        };
        tree = Some(match tree {
            None => scan,
            Some(tree) if args.and => intersect(tree, scan, comparator),
            Some(tree) => Box::new(OrIter::with_comparator(tree, scan, comparator)),
        });
    }
    let Some(tree) = tree else {
        bail!("no predicate given");
    };
    info!("{} of predicates {:?} with {filter:?}", if args.and { "intersection" } else { "union" }, args.predicates);

    if args.count {
        println!("{}", tree.triples().count());
        return Ok(());
    }
    let mut out = BufWriter::new(std::io::stdout().lock());
    for triple in tree.triples() {
        writeln!(out, "{triple}")?;
    }
    out.flush()?;
    Ok(())
}
