//! A builder for a [`Machine`].

use std::io::BufRead;

use tracing::debug;

use crate::chain;
use crate::chain::Chain;
use crate::liftover::Index;
use crate::liftover::Machine;
use crate::reader;

/// An error related to building a [`Machine`].
#[derive(Debug)]
pub enum Error {
    /// An error reading chains.
    InvalidChains(chain::chains::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidChains(err) => write!(f, "invalid chain: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Machine`].
#[derive(Debug, Default)]
pub struct Builder;

impl Builder {
    /// Reads every chain from `reader` and builds a [`Machine`] from them.
    ///
    /// Nothing is built unless every chain in the reader parses.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1";
    /// let reader = chainlift::Reader::new(&data[..]);
    ///
    /// let machine = chainlift::liftover::machine::Builder::default().try_build_from(reader)?;
    /// assert_eq!(machine.index().num_blocks(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[allow(clippy::result_large_err)]
    pub fn try_build_from<T>(&self, mut reader: reader::Reader<T>) -> Result<Machine>
    where
        T: BufRead,
    {
        let chains = reader
            .chains()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::InvalidChains)?;

        Ok(self.build(chains))
    }

    /// Builds a [`Machine`] from chains that have already been parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1";
    /// let chains = chainlift::chain::parse(&data[..])?;
    ///
    /// let machine = chainlift::liftover::machine::Builder.build(chains);
    /// assert_eq!(machine.index().contigs(), vec!["seq0"]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn build<I>(&self, chains: I) -> Machine
    where
        I: IntoIterator<Item = Chain>,
    {
        let index = Index::build(chains);

        debug!(
            chains = index.num_chains(),
            blocks = index.num_blocks(),
            contigs = index.contigs().len(),
            "built liftover index"
        );

        Machine { index }
    }
}
