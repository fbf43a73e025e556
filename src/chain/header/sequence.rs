//! A sequence within a header record.

use std::num::ParseIntError;

use omics::coordinate::position::Number;
use omics::coordinate::strand;
use omics::coordinate::Strand;

use crate::chain::header::DELIMITER;
use crate::coordinate;

/// A sequence field that failed to parse.
#[derive(Debug)]
pub enum ParseError {
    /// The chromosome size is not a number.
    Size(ParseIntError),

    /// The strand is neither `+` nor `-`.
    Strand(strand::Error),

    /// The alignment start is not a number.
    Start(ParseIntError),

    /// The alignment end is not a number.
    End(ParseIntError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Size(err) => write!(f, "bad chromosome size: {err}"),
            ParseError::Strand(err) => write!(f, "bad strand: {err}"),
            ParseError::Start(err) => write!(f, "bad alignment start: {err}"),
            ParseError::End(err) => write!(f, "bad alignment end: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Sequence`].
#[derive(Debug)]
pub enum Error {
    /// The alignment start comes after the alignment end.
    StartAfterEnd(Number, Number),

    /// The alignment runs past the end of the chromosome.
    EndExceedsSize(String, Number, Number),

    /// A field could not be parsed.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::StartAfterEnd(start, end) => {
                write!(f, "alignment start {start} comes after alignment end {end}")
            }
            Error::EndExceedsSize(name, end, size) => {
                write!(f, "alignment end {end} runs past `{name}`, which has size {size}")
            }
            Error::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// The sequence portion(s) of a header record.
///
/// The alignment start and end are kept exactly as they appear in the file,
/// which means they are relative to the end of the chromosome when the
/// strand is negative. Use [`Sequence::forward_span()`] to get
/// forward-oriented coordinates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sequence {
    /// The chromosome name.
    chromosome_name: String,

    /// The chromosome size.
    chromosome_size: Number,

    /// The strand.
    strand: Strand,

    /// The start of the alignment.
    alignment_start: Number,

    /// The end of the alignment.
    alignment_end: Number,
}

impl Sequence {
    /// Attempts to create a new [`Sequence`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::header::Sequence;
    /// use omics::coordinate::Strand;
    ///
    /// let sequence = Sequence::try_new("chr1", 100, Strand::Negative, 10, 40)?;
    /// assert_eq!(sequence.forward_span(10, 40), Some((60, 90)));
    ///
    /// assert!(Sequence::try_new("chr1", 100, Strand::Positive, 40, 10).is_err());
    /// assert!(Sequence::try_new("chr1", 100, Strand::Positive, 10, 101).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        chromosome_name: impl Into<String>,
        chromosome_size: Number,
        strand: Strand,
        alignment_start: Number,
        alignment_end: Number,
    ) -> Result<Self> {
        let chromosome_name = chromosome_name.into();

        if alignment_start > alignment_end {
            return Err(Error::StartAfterEnd(alignment_start, alignment_end));
        }

        if alignment_end > chromosome_size {
            return Err(Error::EndExceedsSize(
                chromosome_name,
                alignment_end,
                chromosome_size,
            ));
        }

        Ok(Self {
            chromosome_name,
            chromosome_size,
            strand,
            alignment_start,
            alignment_end,
        })
    }

    /// Attempts to create a new [`Sequence`] from its five header fields:
    /// name, size, strand, alignment start, and alignment end.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::header::Sequence;
    /// use omics::coordinate::Strand;
    ///
    /// let sequence = Sequence::try_from_fields(["seq0", "2", "+", "0", "2"])?;
    ///
    /// assert_eq!(sequence.chromosome_name(), "seq0");
    /// assert_eq!(sequence.chromosome_size(), 2);
    /// assert_eq!(sequence.strand(), Strand::Positive);
    /// assert_eq!(sequence.alignment_start(), 0);
    /// assert_eq!(sequence.alignment_end(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_fields([name, size, strand, start, end]: [&str; 5]) -> Result<Self> {
        let parse = |field: &str, tag: fn(ParseIntError) -> ParseError| {
            field.parse::<Number>().map_err(|err| Error::Parse(tag(err)))
        };

        let size = parse(size, ParseError::Size)?;
        let strand = strand
            .parse()
            .map_err(|err| Error::Parse(ParseError::Strand(err)))?;

        Self::try_new(
            name,
            size,
            strand,
            parse(start, ParseError::Start)?,
            parse(end, ParseError::End)?,
        )
    }

    /// Returns the chromosome name.
    pub fn chromosome_name(&self) -> &str {
        &self.chromosome_name
    }

    /// Returns the chromosome size.
    pub fn chromosome_size(&self) -> Number {
        self.chromosome_size
    }

    /// Returns the strand.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Returns the alignment start as written in the file.
    pub fn alignment_start(&self) -> Number {
        self.alignment_start
    }

    /// Returns the alignment end as written in the file.
    pub fn alignment_end(&self) -> Number {
        self.alignment_end
    }

    /// Converts the raw span `[start, end)`, expressed in this sequence's
    /// strand, into forward-oriented coordinates.
    pub fn forward_span(&self, start: Number, end: Number) -> Option<(Number, Number)> {
        coordinate::forward_span(self.chromosome_size, self.strand, start, end)
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = DELIMITER;

        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}",
            self.chromosome_name,
            self.chromosome_size,
            self.strand,
            self.alignment_start,
            self.alignment_end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fields() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let sequence = Sequence::try_from_fields(["seq0", "2", "-", "0", "2"])?;

        assert_eq!(sequence.chromosome_name(), "seq0");
        assert_eq!(sequence.strand(), Strand::Negative);
        assert_eq!(sequence.forward_span(0, 2), Some((0, 2)));

        Ok(())
    }

    #[test]
    fn bad_fields() {
        let err = Sequence::try_from_fields(["seq0", "A", "+", "0", "2"]).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Size(_))));
        assert_eq!(
            err.to_string(),
            "bad chromosome size: invalid digit found in string"
        );

        let err = Sequence::try_from_fields(["seq0", "2", "?", "0", "2"]).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Strand(_))));

        let err = Sequence::try_from_fields(["seq0", "2", "+", "-1", "2"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "bad alignment start: invalid digit found in string"
        );

        let err = Sequence::try_from_fields(["seq0", "2", "+", "0", "?"]).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::End(_))));
    }

    #[test]
    fn start_after_end() {
        let err = Sequence::try_from_fields(["seq0", "10", "+", "5", "4"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "alignment start 5 comes after alignment end 4"
        );
    }

    #[test]
    fn end_exceeds_size() {
        let err = Sequence::try_new("seq0", 2, Strand::Positive, 0, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "alignment end 3 runs past `seq0`, which has size 2"
        );
    }

    #[test]
    fn display() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let sequence = Sequence::try_new("seq0", 2, Strand::Positive, 0, 1)?;
        assert_eq!(sequence.to_string(), "seq0 2 + 0 1");
        Ok(())
    }
}
