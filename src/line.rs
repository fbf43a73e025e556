//! A line within a chain file.

use std::str::FromStr;

use crate::chain::data;
use crate::chain::header;
use crate::chain::header::HEADER_PREFIX;

/// The prefix for a comment line.
pub const COMMENT_PREFIX: char = '#';

/// An error associated with parsing a line.
#[derive(Debug)]
pub enum ParseError {
    /// An invalid header record.
    InvalidHeaderRecord(header::Error),

    /// An invalid alignment data record.
    InvalidAlignmentDataRecord(data::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidHeaderRecord(err) => write!(f, "invalid header record: {err}"),
            ParseError::InvalidAlignmentDataRecord(err) => {
                write!(f, "invalid alignment data record: {err}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A line within a chain file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Line {
    /// An empty (or whitespace-only) line.
    Empty,

    /// A comment line.
    Comment(String),

    /// A header line.
    Header(header::Record),

    /// An alignment data line.
    AlignmentData(data::Record),
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Empty => write!(f, ""),
            Line::Comment(comment) => write!(f, "{comment}"),
            Line::Header(record) => write!(f, "{record}"),
            Line::AlignmentData(record) => write!(f, "{record}"),
        }
    }
}

impl FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_start();

        if trimmed.trim_end().is_empty() {
            Ok(Self::Empty)
        } else if trimmed.starts_with(COMMENT_PREFIX) {
            Ok(Self::Comment(s.to_string()))
        } else if trimmed.starts_with(HEADER_PREFIX) {
            s.parse::<header::Record>()
                .map(Line::Header)
                .map_err(ParseError::InvalidHeaderRecord)
        } else {
            s.parse::<data::Record>()
                .map(Line::AlignmentData)
                .map_err(ParseError::InvalidAlignmentDataRecord)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::chain::data::record::Kind;

    use super::*;

    #[test]
    fn valid_header_line() -> Result<(), Box<dyn std::error::Error>> {
        let line = "chain 0 seq0 2 + 0 2 seq0 2 - 0 2 1".parse::<Line>()?;
        assert!(matches!(line, Line::Header(_)));
        Ok(())
    }

    #[test]
    fn valid_nonterminating_alignment_data_line() -> Result<(), Box<dyn std::error::Error>> {
        let line = "9\t0\t1".parse::<Line>()?;

        match line {
            Line::AlignmentData(record) => assert_eq!(record.kind(), Kind::NonTerminating),
            _ => panic!("expected alignment data, found {line:?}"),
        }

        Ok(())
    }

    #[test]
    fn valid_terminating_alignment_data_line() -> Result<(), Box<dyn std::error::Error>> {
        let line = "9".parse::<Line>()?;

        match line {
            Line::AlignmentData(record) => assert_eq!(record.kind(), Kind::Terminating),
            _ => panic!("expected alignment data, found {line:?}"),
        }

        Ok(())
    }

    #[test]
    fn whitespace_only_lines_are_empty() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("".parse::<Line>()?, Line::Empty);
        assert_eq!(" \t ".parse::<Line>()?, Line::Empty);
        Ok(())
    }

    #[test]
    fn comment_line() -> Result<(), Box<dyn std::error::Error>> {
        let line = "# generated by axtChain".parse::<Line>()?;
        assert_eq!(line, Line::Comment(String::from("# generated by axtChain")));
        Ok(())
    }

    #[test]
    fn invalid_header_line() {
        let err = "chain 0 seq0 2 + 0 2 seq0 2 - 0 2 ?"
            .parse::<Line>()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid header record: parse error: invalid id: invalid digit found in string"
        );
    }

    #[test]
    fn invalid_alignment_data_line() {
        let err = "9\t1".parse::<Line>().unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid alignment data record: expected 1 field (last block) or 3 fields (block \
             and gaps), found 2"
        );
    }
}
