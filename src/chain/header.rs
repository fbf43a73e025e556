//! A header record.

pub mod sequence;

use std::num::ParseIntError;
use std::str::FromStr;

use omics::coordinate::position::Number;
pub use sequence::Sequence;

/// The prefix for a header record.
pub const HEADER_PREFIX: &str = "chain";

/// The delimiter used when writing a header record.
///
/// When reading, any run of whitespace separates fields.
pub const DELIMITER: char = ' ';

/// The number of expected fields in a header record (including the prefix).
pub const NUM_HEADER_FIELDS: usize = 13;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a header record.
#[derive(Debug)]
pub enum ParseError {
    /// An incorrect number of fields in the header line.
    IncorrectNumberOfFields(usize),

    /// An invalid prefix.
    InvalidPrefix(String),

    /// An invalid score.
    InvalidScore(ParseIntError),

    /// An invalid source sequence.
    InvalidSourceSequence(sequence::Error),

    /// An invalid target sequence.
    InvalidTargetSequence(sequence::Error),

    /// An invalid id.
    InvalidId(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(fields) => write!(
                f,
                "invalid number of fields in header: expected {NUM_HEADER_FIELDS} fields, found \
                 {fields} fields"
            ),
            ParseError::InvalidPrefix(prefix) => {
                write!(
                    f,
                    "invalid prefix: expected \"{HEADER_PREFIX}\", found \"{prefix}\""
                )
            }
            ParseError::InvalidScore(err) => write!(f, "invalid score: {err}"),
            ParseError::InvalidSourceSequence(err) => {
                write!(f, "invalid source sequence: {err}")
            }
            ParseError::InvalidTargetSequence(err) => write!(f, "invalid target sequence: {err}"),
            ParseError::InvalidId(err) => write!(f, "invalid id: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Record`].
#[derive(Debug)]
pub enum Error {
    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// A header record within a chain file.
///
/// The first sequence in the header is the _source_ (the coordinate space
/// lifted from) and the second is the _target_ (the coordinate space lifted
/// to).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The chain score.
    score: Number,

    /// The source sequence.
    source_sequence: Sequence,

    /// The target sequence.
    target_sequence: Sequence,

    /// The chain id.
    id: Number,
}

impl Record {
    /// Gets the score.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::header;
    ///
    /// let header = "chain 4900 seq0 2 + 0 2 seq1 2 - 0 2 1".parse::<header::Record>()?;
    /// assert_eq!(header.score(), 4900);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn score(&self) -> Number {
        self.score
    }

    /// Gets the source sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::header;
    /// use omics::coordinate::Strand;
    ///
    /// let header = "chain 0 seq0 2 + 0 2 seq1 2 - 0 2 1".parse::<header::Record>()?;
    ///
    /// assert_eq!(header.source_sequence().chromosome_name(), "seq0");
    /// assert_eq!(header.source_sequence().chromosome_size(), 2);
    /// assert_eq!(header.source_sequence().strand(), Strand::Positive);
    /// assert_eq!(header.source_sequence().alignment_start(), 0);
    /// assert_eq!(header.source_sequence().alignment_end(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn source_sequence(&self) -> &Sequence {
        &self.source_sequence
    }

    /// Gets the target sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::header;
    /// use omics::coordinate::Strand;
    ///
    /// let header = "chain 0 seq0 2 + 0 2 seq1 2 - 0 2 1".parse::<header::Record>()?;
    ///
    /// assert_eq!(header.target_sequence().chromosome_name(), "seq1");
    /// assert_eq!(header.target_sequence().strand(), Strand::Negative);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn target_sequence(&self) -> &Sequence {
        &self.target_sequence
    }

    /// Gets the id.
    pub fn id(&self) -> Number {
        self.id
    }

    /// Whether the source and target sequences lie on opposite strands.
    ///
    /// Lifting through an inverted chain flips the orientation of the query.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::header;
    ///
    /// let header = "chain 0 seq0 2 + 0 2 seq1 2 - 0 2 1".parse::<header::Record>()?;
    /// assert!(header.is_inverted());
    ///
    /// let header = "chain 0 seq0 2 + 0 2 seq1 2 + 0 2 1".parse::<header::Record>()?;
    /// assert!(!header.is_inverted());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_inverted(&self) -> bool {
        self.source_sequence.strand() != self.target_sequence.strand()
    }
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let fields = s.split_whitespace().collect::<Vec<_>>();

        let [prefix, score, sn, ss, sst, sa, se, tn, ts, tst, ta, te, id] = fields[..] else {
            return Err(Error::Parse(ParseError::IncorrectNumberOfFields(
                fields.len(),
            )));
        };

        if prefix != HEADER_PREFIX {
            return Err(Error::Parse(ParseError::InvalidPrefix(prefix.into())));
        }

        Ok(Record {
            score: score
                .parse()
                .map_err(|err| Error::Parse(ParseError::InvalidScore(err)))?,
            source_sequence: Sequence::try_from_fields([sn, ss, sst, sa, se])
                .map_err(|err| Error::Parse(ParseError::InvalidSourceSequence(err)))?,
            target_sequence: Sequence::try_from_fields([tn, ts, tst, ta, te])
                .map_err(|err| Error::Parse(ParseError::InvalidTargetSequence(err)))?,
            id: id
                .parse()
                .map_err(|err| Error::Parse(ParseError::InvalidId(err)))?,
        })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{HEADER_PREFIX}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            self.score, self.source_sequence, self.target_sequence, self.id
        )
    }
}
