//! A one-stop converter between two genome builds.
//!
//! A [`Converter`] opens a chain file, parses it, and builds a
//! [`Machine`](crate::liftover::Machine) in one step. After that, it answers
//! liftover queries for as long as it lives.

use std::io;
use std::path::Path;

use omics::coordinate::position::Number;
use omics::coordinate::Strand;
use tracing::debug;

use crate::chain::chains;
use crate::config::Config;
use crate::liftover::machine;
use crate::liftover::LiftResult;
use crate::liftover::Machine;
use crate::source;
use crate::source::name;
use crate::source::ChainName;
use crate::source::Source;
use crate::Reader;

/// An error related to a [`Converter`].
#[derive(Debug)]
pub enum Error {
    /// The chain file could not be found.
    SourceNotFound(String),

    /// An I/O error.
    Io(io::Error),

    /// The chain file is malformed.
    ChainFormat(chains::FormatError),

    /// The pair of genome builds cannot be converted between.
    InvalidGenomePair(name::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::SourceNotFound(reason) => write!(f, "source not found: {reason}"),
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::ChainFormat(err) => write!(f, "chain format error: {err}"),
            Error::InvalidGenomePair(err) => write!(f, "invalid genome pair: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<source::Error> for Error {
    fn from(err: source::Error) -> Self {
        match err {
            source::Error::Io(err) => Error::Io(err),
            err => Error::SourceNotFound(err.to_string()),
        }
    }
}

impl From<machine::builder::Error> for Error {
    fn from(err: machine::builder::Error) -> Self {
        match err {
            machine::builder::Error::InvalidChains(chains::Error::Io(err)) => Error::Io(err),
            machine::builder::Error::InvalidChains(chains::Error::Format(err)) => {
                Error::ChainFormat(err)
            }
        }
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Lifts coordinates over from one genome build to another.
///
/// # Examples
///
/// ```
/// use chainlift::converter::Converter;
/// use chainlift::liftover::LiftResult;
/// use omics::coordinate::Strand;
///
/// let data = b"chain 1000 chr7 159138663 + 140400000 140500000 chr7 159345973 + 140700200 140800200 1\n100000\n";
/// let converter = Converter::try_from_bytes(&data[..])?;
///
/// assert_eq!(
///     converter.lift("chr7", 140439611, 140439611, Strand::Positive),
///     vec![LiftResult::new("chr7", 140739811, 140739811, Strand::Positive)]
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Converter {
    /// The liftover machine.
    machine: Machine,
}

impl Converter {
    /// Attempts to build a [`Converter`] from any [`Source`].
    #[allow(clippy::result_large_err)]
    pub fn try_from_source<S>(source: &S) -> Result<Self>
    where
        S: Source + ?Sized,
    {
        let reader = Reader::new(source.open()?);
        let machine = machine::Builder.try_build_from(reader)?;

        Ok(Self { machine })
    }

    /// Attempts to build a [`Converter`] from a chain file on disk.
    ///
    /// The file may be plain text or gzipped.
    pub fn try_from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::try_from_source(&source::File::new(path.as_ref()))
    }

    /// Attempts to build a [`Converter`] from chain file content in memory.
    pub fn try_from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::try_from_source(&source::Bytes::new(bytes))
    }

    /// Attempts to build a [`Converter`] between two genome builds (such as
    /// `hg19` and `hg38`), using the chain file found in the configured data
    /// directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::config::Config;
    /// use chainlift::converter::Converter;
    ///
    /// let err = Converter::try_from_genomes("hg38", "hg38", &Config::default()).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid genome pair: cannot lift over from `hg38` to itself"
    /// );
    /// ```
    pub fn try_from_genomes(from: &str, to: &str, config: &Config) -> Result<Self> {
        let name = ChainName::try_from_pair(from, to).map_err(Error::InvalidGenomePair)?;
        debug!(%name, "looking up chain file");

        let source = config.source(name).ok_or_else(|| {
            Error::SourceNotFound(String::from("no data directory is configured"))
        })?;

        Self::try_from_source(&source)
    }

    /// Gets the inner [`Machine`].
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Lifts the range `[start, end)` on `chromosome` over to the target
    /// genome. See [`Machine::lift()`].
    pub fn lift(
        &self,
        chromosome: &str,
        start: Number,
        end: Number,
        strand: Strand,
    ) -> Vec<LiftResult> {
        self.machine.lift(chromosome, start, end, strand)
    }

    /// Lifts a single `position` on `chromosome` over to the target genome.
    pub fn lift_position(
        &self,
        chromosome: &str,
        position: Number,
        strand: Strand,
    ) -> Vec<LiftResult> {
        self.machine.lift_position(chromosome, position, strand)
    }
}
