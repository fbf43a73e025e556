//! A per-chromosome index of alignment blocks.

use std::cmp::Ordering;
use std::collections::HashMap;

use omics::coordinate::position::Number;
use rust_lapper as lapper;

use crate::chain::header;
use crate::chain::Block;
use crate::chain::Chain;

/// The lookup structure for a single source chromosome.
type Lookup = lapper::Lapper<Number, Entry>;

/// A block within the [`Index`] along with the chain it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// The position of the originating chain within the source.
    chain: usize,

    /// The block.
    block: Block,
}

impl Entry {
    /// Gets the position of the originating chain within the source (0-based,
    /// in the order the chains were read).
    pub fn chain(&self) -> usize {
        self.chain
    }

    /// Gets the block.
    pub fn block(&self) -> &Block {
        &self.block
    }
}

/// An immutable index of alignment blocks, grouped by source chromosome.
///
/// # Examples
///
/// ```
/// use chainlift::liftover::Index;
///
/// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1\n";
/// let index = Index::build(chainlift::chain::parse(&data[..])?);
///
/// assert_eq!(index.contigs(), vec!["seq0"]);
/// assert_eq!(index.num_chains(), 1);
/// assert_eq!(index.num_blocks(), 2);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Index {
    /// The header of every indexed chain, in source order.
    headers: Vec<header::Record>,

    /// The block lookup for each source chromosome.
    contigs: HashMap<String, Lookup>,

    /// The total number of indexed blocks.
    num_blocks: usize,
}

impl Index {
    /// Builds an [`Index`] from a set of chains.
    pub fn build<I>(chains: I) -> Self
    where
        I: IntoIterator<Item = Chain>,
    {
        let mut headers = Vec::new();
        let mut grouped = HashMap::<String, Vec<lapper::Interval<Number, Entry>>>::new();
        let mut num_blocks = 0;

        for (i, chain) in chains.into_iter().enumerate() {
            let (record, blocks) = chain.into_parts();
            let intervals = grouped
                .entry(record.source_sequence().chromosome_name().to_string())
                .or_default();

            for block in blocks {
                intervals.push(lapper::Interval {
                    start: block.source_start(),
                    stop: block.source_end(),
                    val: Entry { chain: i, block },
                });
                num_blocks += 1;
            }

            headers.push(record);
        }

        let contigs = grouped
            .into_iter()
            .map(|(name, intervals)| (name, lapper::Lapper::new(intervals)))
            .collect();

        Self {
            headers,
            contigs,
            num_blocks,
        }
    }

    /// Gets the names of the indexed source chromosomes, sorted.
    pub fn contigs(&self) -> Vec<&str> {
        let mut names = self.contigs.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Gets the number of indexed chains.
    pub fn num_chains(&self) -> usize {
        self.headers.len()
    }

    /// Gets the number of indexed blocks.
    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    /// Gets the header of the chain at position `chain`, if it exists.
    pub fn header(&self, chain: usize) -> Option<&header::Record> {
        self.headers.get(chain)
    }

    /// Gets the blocks indexed for the source chromosome `contig`.
    ///
    /// Blocks are ordered by source start. Blocks that start at the same place
    /// are ordered longest first. An unknown chromosome has no blocks.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::liftover::Index;
    ///
    /// let data = b"chain 0 seq0 10 + 0 10 seq1 10 + 0 10 1\n2\t3\t3\n5\n";
    /// let index = Index::build(chainlift::chain::parse(&data[..])?);
    ///
    /// let starts = index
    ///     .blocks("seq0")
    ///     .iter()
    ///     .map(|entry| entry.block().source_start())
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(starts, vec![0, 5]);
    /// assert!(index.blocks("seq1").is_empty());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn blocks(&self, contig: &str) -> Vec<&Entry> {
        let mut entries = match self.contigs.get(contig) {
            Some(lookup) => lookup.iter().map(|iv| &iv.val).collect::<Vec<_>>(),
            None => return Vec::new(),
        };

        entries.sort_by(|a, b| {
            a.block
                .source_start()
                .cmp(&b.block.source_start())
                .then_with(|| b.block.len().cmp(&a.block.len()))
                .then_with(|| a.chain.cmp(&b.chain))
        });

        entries
    }

    /// Gets every block on `contig` that covers `position`, most preferred
    /// first.
    ///
    /// Blocks from higher scoring chains are preferred. Ties go to the longer
    /// block and then to the chain that appeared first.
    pub fn covering(&self, contig: &str, position: Number) -> Vec<&Entry> {
        let lookup = match self.contigs.get(contig) {
            Some(lookup) => lookup,
            None => return Vec::new(),
        };

        let stop = match position.checked_add(1) {
            Some(stop) => stop,
            None => return Vec::new(),
        };

        let mut entries = lookup.find(position, stop).map(|iv| &iv.val).collect::<Vec<_>>();
        entries.sort_by(|a, b| self.rank(a, b));
        entries
    }

    /// Orders two entries by preference.
    fn rank(&self, a: &Entry, b: &Entry) -> Ordering {
        self.score(b)
            .cmp(&self.score(a))
            .then_with(|| b.block.len().cmp(&a.block.len()))
            .then_with(|| a.chain.cmp(&b.chain))
    }

    /// Gets the score of the chain an entry came from.
    fn score(&self, entry: &Entry) -> Number {
        self.header(entry.chain).map(|h| h.score()).unwrap_or_default()
    }
}
