//! Line-by-line reading of chain files.

use std::io;
use std::io::BufRead;
use std::str;
use std::str::Utf8Error;

use crate::chain::Chains;
use crate::line;
use crate::Line;

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// The underlying reader failed.
    Io(io::Error),

    /// The line is not valid UTF-8.
    Encoding(Utf8Error),

    /// The line could not be parsed.
    Line(line::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Encoding(err) => write!(f, "line is not valid UTF-8: {err}"),
            Error::Line(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// Reads the lines of a chain file and keeps count of them.
///
/// Lines are read as bytes and checked for UTF-8 one at a time, so a corrupt
/// line is reported along with its position in the file.
#[derive(Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The underlying reader.
    inner: T,

    /// The bytes of the most recently read line.
    buffer: Vec<u8>,

    /// The number of lines read so far.
    line_no: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a new [`Reader`].
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1";
    /// let reader = chainlift::Reader::new(&data[..]);
    /// assert_eq!(reader.line_no(), 0);
    /// ```
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
            line_no: 0,
        }
    }

    /// Gets the number of lines read so far.
    ///
    /// After a line fails to decode or parse, this is the 1-based number of
    /// that line.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Reads the next line as text, without its line ending (`\n` or `\r\n`).
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\r\n3\t0\t1\n\xff\n";
    /// let mut reader = chainlift::Reader::new(&data[..]);
    ///
    /// assert_eq!(reader.next_line()?, Some("chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1"));
    /// assert_eq!(reader.next_line()?, Some("3\t0\t1"));
    ///
    /// assert!(reader.next_line().is_err());
    /// assert_eq!(reader.line_no(), 3);
    ///
    /// assert_eq!(reader.next_line()?, None);
    ///
    /// # Ok::<(), chainlift::reader::Error>(())
    /// ```
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        self.buffer.clear();

        if self.inner.read_until(b'\n', &mut self.buffer).map_err(Error::Io)? == 0 {
            return Ok(None);
        }

        self.line_no += 1;

        let mut line = self.buffer.as_slice();

        if let Some(rest) = line.strip_suffix(b"\n") {
            line = rest.strip_suffix(b"\r").unwrap_or(rest);
        }

        str::from_utf8(line).map(Some).map_err(Error::Encoding)
    }

    /// Reads and classifies the next [`Line`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::Line;
    ///
    /// let data = b"# liftOver\nchain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1";
    /// let mut reader = chainlift::Reader::new(&data[..]);
    ///
    /// assert!(matches!(reader.read_line()?, Some(Line::Comment(_))));
    /// assert!(matches!(reader.read_line()?, Some(Line::Header(_))));
    /// assert!(matches!(reader.read_line()?, Some(Line::AlignmentData(_))));
    /// assert!(matches!(reader.read_line()?, Some(Line::AlignmentData(_))));
    /// assert!(reader.read_line()?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_line(&mut self) -> Result<Option<Line>> {
        match self.next_line()? {
            Some(text) => text.parse().map(Some).map_err(Error::Line),
            None => Ok(None),
        }
    }

    /// Returns an iterator over the [chains](crate::chain::Chain) that remain
    /// in the reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1";
    /// let mut reader = chainlift::Reader::new(&data[..]);
    ///
    /// let chains = reader.chains().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(chains.len(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn chains(&mut self) -> Chains<'_, T> {
        Chains::new(self)
    }
}
