//! Chains of ungapped alignment blocks.
//!
//! A chain file is a sequence of chains, each made up of a header line and
//! one or more alignment data lines. This module parses those lines and walks
//! them into [`Chain`]s: a header plus the ordered, forward-oriented
//! [`Block`]s it describes.

use nonempty::NonEmpty;

use crate::chain::header::Sequence;
use crate::Reader;

pub mod block;
pub mod builder;
pub mod chains;
pub mod data;
pub mod header;

pub use block::Block;
pub use builder::Builder;
pub use chains::Chains;

/// An alignment chain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chain {
    /// The header record.
    header: header::Record,

    /// The blocks, in file order.
    blocks: NonEmpty<Block>,
}

impl Chain {
    /// Gets the header record for the [`Chain`] by reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::header::Record;
    ///
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1\n";
    /// let mut chains = chainlift::chain::parse(&data[..])?;
    /// assert_eq!(chains.len(), 1);
    ///
    /// // SAFETY: we just checked that the length was one.
    /// let chain = chains.pop().unwrap();
    /// assert_eq!(
    ///     chain.header(),
    ///     &"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1".parse::<Record>()?
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn header(&self) -> &header::Record {
        &self.header
    }

    /// Gets the blocks for the [`Chain`] by reference.
    ///
    /// Blocks are stored in forward coordinates. On a negative target strand
    /// the target coordinates therefore decrease from one block to the next.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::Block;
    ///
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1\n";
    /// let chains = chainlift::chain::parse(&data[..])?;
    ///
    /// let blocks = chains[0].blocks().iter().copied().collect::<Vec<_>>();
    /// assert_eq!(
    ///     blocks,
    ///     vec![Block::try_new(0, 3, 2, 5)?, Block::try_new(3, 4, 0, 1)?]
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn blocks(&self) -> &NonEmpty<Block> {
        &self.blocks
    }

    /// Gets the source sequence.
    pub fn source_sequence(&self) -> &Sequence {
        self.header.source_sequence()
    }

    /// Gets the target sequence.
    pub fn target_sequence(&self) -> &Sequence {
        self.header.target_sequence()
    }

    /// Consumes `self` and returns the header and the blocks.
    pub fn into_parts(self) -> (header::Record, NonEmpty<Block>) {
        (self.header, self.blocks)
    }
}

/// Parses every chain within `data`.
///
/// Parsing is all-or-nothing: the first malformed line fails the whole parse
/// and no chains are returned.
///
/// # Examples
///
/// ```
/// let data = b"chain 0 seq0 4 + 0 4 seq1 4 + 0 4 1\n4\n\nchain 0 seq1 2 + 0 2 seq2 2 + 0 2 2\n2\n";
/// let chains = chainlift::chain::parse(&data[..])?;
/// assert_eq!(chains.len(), 2);
///
/// let err = chainlift::chain::parse(&b"chain 0 seq0 4 + 0 4 seq1 4 + 0 4 1\n0\n"[..]).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "line 2: invalid alignment data record: block size must be greater than zero"
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse(data: &[u8]) -> Result<Vec<Chain>, chains::Error> {
    let mut reader = Reader::new(data);
    reader.chains().collect()
}
