//! Liftover queries.

use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::LazyLock;

use omics::coordinate::position::Number;
use omics::coordinate::strand;
use omics::coordinate::Strand;
use regex::Regex;

/// The pattern for a textual query: `<chrom>:<strand>:<start>-<end>` or
/// `<chrom>:<strand>:<position>`.
static REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:\s]+):([^:\s]+):(\d+)(?:-(\d+))?$").unwrap());

/// An error related to parsing a [`Query`].
#[derive(Debug)]
pub enum ParseError {
    /// The query did not match `<chrom>:<strand>:<start>[-<end>]`.
    InvalidFormat(String),

    /// An invalid strand.
    InvalidStrand(strand::Error),

    /// An invalid start position.
    InvalidStart(ParseIntError),

    /// An invalid end position.
    InvalidEnd(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidFormat(value) => write!(
                f,
                "invalid query `{value}`: expected `<chrom>:<strand>:<start>-<end>` or \
                 `<chrom>:<strand>:<position>`"
            ),
            ParseError::InvalidStrand(err) => write!(f, "invalid strand: {err}"),
            ParseError::InvalidStart(err) => write!(f, "invalid start: {err}"),
            ParseError::InvalidEnd(err) => write!(f, "invalid end: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Query`].
#[derive(Debug)]
pub enum Error {
    /// The end comes before the start.
    EndBeforeStart(Number, Number),

    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EndBeforeStart(start, end) => {
                write!(f, "the end ({end}) comes before the start ({start})")
            }
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A region of the source genome to lift over.
///
/// A query covers the half-open range `[start, end)`. A query where `start`
/// and `end` are equal names the single position `start`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    /// The chromosome name.
    chromosome: String,

    /// The start.
    start: Number,

    /// The end.
    end: Number,

    /// The strand.
    strand: Strand,
}

impl Query {
    /// Attempts to create a new [`Query`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::liftover::Query;
    /// use omics::coordinate::Strand;
    ///
    /// let query = Query::try_new("chr7", 140439611, 140439611, Strand::Positive)?;
    /// assert_eq!(query.chromosome(), "chr7");
    ///
    /// let err = Query::try_new("chr7", 10, 9, Strand::Positive).unwrap_err();
    /// assert_eq!(err.to_string(), "the end (9) comes before the start (10)");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        chromosome: impl Into<String>,
        start: Number,
        end: Number,
        strand: Strand,
    ) -> Result<Self> {
        if end < start {
            return Err(Error::EndBeforeStart(start, end));
        }

        Ok(Self {
            chromosome: chromosome.into(),
            start,
            end,
            strand,
        })
    }

    /// Gets the chromosome name.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Gets the start.
    pub fn start(&self) -> Number {
        self.start
    }

    /// Gets the end.
    pub fn end(&self) -> Number {
        self.end
    }

    /// Gets the strand.
    pub fn strand(&self) -> Strand {
        self.strand
    }
}

impl FromStr for Query {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let captures = REGEX
            .captures(s)
            .ok_or_else(|| Error::Parse(ParseError::InvalidFormat(s.to_string())))?;

        // SAFETY: groups one, two, and three are not optional, so they are
        // always present when the pattern matches.
        let chromosome = &captures[1];
        let strand = captures[2]
            .parse::<Strand>()
            .map_err(|err| Error::Parse(ParseError::InvalidStrand(err)))?;
        let start = captures[3]
            .parse::<Number>()
            .map_err(|err| Error::Parse(ParseError::InvalidStart(err)))?;

        let end = match captures.get(4) {
            Some(end) => end
                .as_str()
                .parse::<Number>()
                .map_err(|err| Error::Parse(ParseError::InvalidEnd(err)))?,
            None => start,
        };

        Self::try_new(chromosome, start, end, strand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_interval() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let query = "chr1:-:206072707-206072708".parse::<Query>()?;

        assert_eq!(query.chromosome(), "chr1");
        assert_eq!(query.strand(), Strand::Negative);
        assert_eq!(query.start(), 206072707);
        assert_eq!(query.end(), 206072708);

        Ok(())
    }

    #[test]
    fn parse_position() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let query = "chr7:+:140439611".parse::<Query>()?;

        assert_eq!(query.start(), 140439611);
        assert_eq!(query.end(), 140439611);
        assert_eq!(query.strand(), Strand::Positive);

        Ok(())
    }

    #[test]
    fn parse_invalid_format() {
        let err = "chr7:140439611".parse::<Query>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error: invalid query `chr7:140439611`: expected \
             `<chrom>:<strand>:<start>-<end>` or `<chrom>:<strand>:<position>`"
        );
    }

    #[test]
    fn parse_invalid_strand() {
        let err = "chr7:?:1-2".parse::<Query>().unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::InvalidStrand(_))));
    }

    #[test]
    fn parse_overflowing_position() {
        let err = "chr7:+:99999999999999999999".parse::<Query>().unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::InvalidStart(_))));
    }

    #[test]
    fn parse_end_before_start() {
        let err = "chr7:+:10-9".parse::<Query>().unwrap_err();
        assert_eq!(err.to_string(), "the end (9) comes before the start (10)");
    }
}
