//! An iterator over the [`Chain`]s within a chain file.

use std::io;
use std::io::BufRead;
use std::str::Utf8Error;

use crate::chain::builder;
use crate::chain::data::record::Kind;
use crate::chain::Builder;
use crate::chain::Chain;
use crate::line;
use crate::reader;
use crate::Line;
use crate::Reader;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// A structural problem found while parsing chains.
#[derive(Debug)]
pub enum ParseError {
    /// The input ended before the current chain was terminated.
    AbruptEndInChain,

    /// There was a blank line before the current chain was terminated.
    BlankLineInChain,

    /// There was a comment line before the current chain was terminated.
    CommentInChain,

    /// Alignment data was found outside of a chain.
    DataBetweenChains,

    /// There was a header record before the current chain was terminated.
    HeaderInChain,

    /// The line is not valid UTF-8.
    Encoding(Utf8Error),

    /// The line itself could not be parsed.
    Line(line::ParseError),

    /// The chain could not be built from its records.
    Builder(builder::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::AbruptEndInChain => {
                write!(f, "the input ended in the middle of a chain")
            }
            ParseError::BlankLineInChain => {
                write!(f, "found blank line before the chain's terminating record")
            }
            ParseError::CommentInChain => {
                write!(f, "found comment before the chain's terminating record")
            }
            ParseError::DataBetweenChains => write!(f, "found alignment data between chains"),
            ParseError::HeaderInChain => {
                write!(f, "found header before the previous chain's terminating record")
            }
            ParseError::Encoding(err) => write!(f, "line is not valid UTF-8: {err}"),
            ParseError::Line(err) => write!(f, "{err}"),
            ParseError::Builder(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A malformed chain file, along with the line where the problem was found.
#[derive(Debug)]
pub struct FormatError {
    /// The 1-based line number.
    line_no: usize,

    /// What was wrong.
    kind: ParseError,
}

impl FormatError {
    /// Gets the 1-based line number where the problem was found.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Gets what was wrong.
    pub fn kind(&self) -> &ParseError {
        &self.kind
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line_no, self.kind)
    }
}

impl std::error::Error for FormatError {}

/// An error related to [`Chains`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error from the underlying reader.
    Io(io::Error),

    /// The chain file is malformed.
    Format(FormatError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Format(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Chains
////////////////////////////////////////////////////////////////////////////////////////

/// An iterator that walks the lines of a [`Reader`] and yields one [`Chain`]
/// at a time.
///
/// The iterator is fused on the first error: once an error is returned, every
/// subsequent call to [`Iterator::next()`] returns [`None`].
#[derive(Debug)]
pub struct Chains<'a, T>
where
    T: BufRead,
{
    /// The inner reader.
    reader: &'a mut Reader<T>,

    /// Whether an error has been returned.
    failed: bool,
}

impl<'a, T> Chains<'a, T>
where
    T: BufRead,
{
    /// Creates a new [`Chains`].
    pub(crate) fn new(reader: &'a mut Reader<T>) -> Self {
        Self {
            reader,
            failed: false,
        }
    }

    /// Gets the number of lines read so far.
    pub fn line_no(&self) -> usize {
        self.reader.line_no()
    }

    /// Records a failure at the current line.
    fn fail(&mut self, kind: ParseError) -> Option<Result<Chain>> {
        self.failed = true;
        Some(Err(Error::Format(FormatError {
            line_no: self.reader.line_no(),
            kind,
        })))
    }
}

impl<T> Iterator for Chains<'_, T>
where
    T: BufRead,
{
    type Item = Result<Chain>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        // `None` means we are in between chains.
        let mut builder: Option<Builder> = None;

        loop {
            // (1) Read and classify the next line.
            let line = match self.reader.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    return match builder {
                        Some(_) => self.fail(ParseError::AbruptEndInChain),
                        None => None,
                    };
                }
                Err(reader::Error::Encoding(err)) => return self.fail(ParseError::Encoding(err)),
                Err(reader::Error::Line(err)) => return self.fail(ParseError::Line(err)),
                Err(reader::Error::Io(err)) => {
                    self.failed = true;
                    return Some(Err(Error::Io(err)));
                }
            };

            // (2) Advance the state given the line that was just read.
            builder = match (builder, line) {
                (None, Line::Empty) | (None, Line::Comment(_)) => None,
                (None, Line::Header(record)) => match Builder::default().header(record) {
                    Ok(builder) => Some(builder),
                    Err(err) => return self.fail(ParseError::Builder(err)),
                },
                (None, Line::AlignmentData(_)) => {
                    return self.fail(ParseError::DataBetweenChains);
                }
                (Some(_), Line::Empty) => return self.fail(ParseError::BlankLineInChain),
                (Some(_), Line::Comment(_)) => return self.fail(ParseError::CommentInChain),
                (Some(_), Line::Header(_)) => return self.fail(ParseError::HeaderInChain),
                (Some(inner), Line::AlignmentData(record)) => {
                    let kind = record.kind();

                    let inner = match inner.push_data(record) {
                        Ok(inner) => inner,
                        Err(err) => return self.fail(ParseError::Builder(err)),
                    };

                    // (3) A terminating record closes the chain.
                    if kind == Kind::Terminating {
                        return match inner.try_build() {
                            Ok(chain) => Some(Ok(chain)),
                            Err(err) => self.fail(ParseError::Builder(err)),
                        };
                    }

                    Some(inner)
                }
            };
        }
    }
}
