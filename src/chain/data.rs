//! Alignment data records: one ungapped block plus the gaps that follow it.

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;

use crate::chain::data::record::Kind;

pub mod record;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// A field of an alignment data record that failed to parse.
#[derive(Debug)]
pub enum ParseError {
    /// The record had neither one nor three fields.
    FieldCount(usize),

    /// The block size is not a number.
    Size(ParseIntError),

    /// The source gap is not a number.
    SourceGap(ParseIntError),

    /// The target gap is not a number.
    TargetGap(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::FieldCount(found) => write!(
                f,
                "expected 1 field (last block) or 3 fields (block and gaps), found {found}"
            ),
            ParseError::Size(err) => write!(f, "bad block size: {err}"),
            ParseError::SourceGap(err) => write!(f, "bad source gap: {err}"),
            ParseError::TargetGap(err) => write!(f, "bad target gap: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Record`].
#[derive(Debug)]
pub enum Error {
    /// The block size was zero.
    ZeroSize,

    /// A field could not be parsed.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroSize => write!(f, "block size must be greater than zero"),
            Error::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// The gaps that separate a block from the next block of its chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Gaps {
    /// The gap in the source sequence (`dt`).
    pub source: Number,

    /// The gap in the target sequence (`dq`).
    pub target: Number,
}

/// A line of alignment data within a chain.
///
/// Every record but the last one of a chain carries [`Gaps`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The size of the ungapped block.
    size: Number,

    /// The gaps before the next block, if there is one.
    gaps: Option<Gaps>,
}

impl Record {
    /// Attempts to create a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::data::record::Kind;
    /// use chainlift::chain::data::Gaps;
    /// use chainlift::chain::data::Record;
    ///
    /// let record = Record::try_new(10, Some(Gaps { source: 0, target: 1 }))?;
    ///
    /// assert_eq!(record.size(), 10);
    /// assert_eq!(record.source_gap(), Some(0));
    /// assert_eq!(record.target_gap(), Some(1));
    /// assert_eq!(record.kind(), Kind::NonTerminating);
    ///
    /// assert!(Record::try_new(0, None).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(size: Number, gaps: Option<Gaps>) -> Result<Self> {
        match size {
            0 => Err(Error::ZeroSize),
            _ => Ok(Self { size, gaps }),
        }
    }

    /// Gets the size of the ungapped block.
    pub fn size(&self) -> Number {
        self.size
    }

    /// Gets the gaps that follow the block.
    pub fn gaps(&self) -> Option<Gaps> {
        self.gaps
    }

    /// Gets the gap that follows the block in the source sequence.
    pub fn source_gap(&self) -> Option<Number> {
        self.gaps.map(|gaps| gaps.source)
    }

    /// Gets the gap that follows the block in the target sequence.
    pub fn target_gap(&self) -> Option<Number> {
        self.gaps.map(|gaps| gaps.target)
    }

    /// Gets whether this record closes its chain.
    pub fn kind(&self) -> Kind {
        match self.gaps {
            Some(_) => Kind::NonTerminating,
            None => Kind::Terminating,
        }
    }
}

/// Parses one numeric field, tagging a failure with the field it came from.
fn number(field: &str, tag: fn(ParseIntError) -> ParseError) -> Result<Number> {
    field.parse().map_err(|err| Error::Parse(tag(err)))
}

impl FromStr for Record {
    type Err = Error;

    /// Fields may be separated by any run of whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let fields = s.split_whitespace().collect::<Vec<_>>();

        match fields[..] {
            [size] => Self::try_new(number(size, ParseError::Size)?, None),
            [size, source, target] => {
                let size = number(size, ParseError::Size)?;
                let gaps = Gaps {
                    source: number(source, ParseError::SourceGap)?,
                    target: number(target, ParseError::TargetGap)?,
                };

                Self::try_new(size, Some(gaps))
            }
            _ => Err(Error::Parse(ParseError::FieldCount(fields.len()))),
        }
    }
}

impl std::fmt::Display for Record {
    /// Writes the record tab-delimited, as UCSC tools do.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.gaps {
            Some(Gaps { source, target }) => write!(f, "{}\t{source}\t{target}", self.size),
            None => write!(f, "{}", self.size),
        }
    }
}
