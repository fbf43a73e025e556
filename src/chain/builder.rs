//! A builder for a [`Chain`].

use nonempty::NonEmpty;
use omics::coordinate::position::Number;

use crate::chain::block;
use crate::chain::data;
use crate::chain::data::record::Kind;
use crate::chain::header;
use crate::chain::header::Sequence;
use crate::chain::Block;
use crate::chain::Chain;

/// An error that occurs when a required field was never provided to the
/// [`Builder`].
#[derive(Debug)]
pub enum MissingError {
    /// No data was provided to the [`Builder`].
    Data,

    /// No header was provided to the [`Builder`].
    Header,

    /// The data never included a terminating record.
    TerminatingRecord,
}

impl std::fmt::Display for MissingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingError::Data => write!(f, "data"),
            MissingError::Header => write!(f, "header"),
            MissingError::TerminatingRecord => write!(f, "terminating record"),
        }
    }
}

impl std::error::Error for MissingError {}

/// An error that occurs when a singular field was provided multiple times to
/// the [`Builder`].
#[derive(Debug)]
pub enum MultipleError {
    /// The header field was provided multiple times to the [`Builder`].
    Header,
}

impl std::fmt::Display for MultipleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MultipleError::Header => write!(f, "header"),
        }
    }
}

impl std::error::Error for MultipleError {}

/// One of the two sequences within a chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    /// The source sequence.
    Source,

    /// The target sequence.
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

/// An error related to a [`Builder`].
#[derive(Debug)]
pub enum Error {
    /// An error where a required field was never provided to the [`Builder`].
    Missing(MissingError),

    /// An error where a singular field was provided to the [`Builder`] more
    /// than once.
    Multiple(MultipleError),

    /// Alignment data was pushed after the terminating record.
    DataAfterTerminatingRecord,

    /// A block runs past the alignment end declared in the header.
    ExceedsAlignment(Side, Number, Number),

    /// The blocks and gaps do not add up to the alignment end declared in the
    /// header.
    Misaligned(Side, Number, Number),

    /// The computed block was invalid.
    Block(block::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Missing(err) => write!(f, "missing required field: {err}"),
            Error::Multiple(err) => write!(f, "singular field set multiple times: {err}"),
            Error::DataAfterTerminatingRecord => {
                write!(f, "alignment data found after the terminating record")
            }
            Error::ExceedsAlignment(side, end, alignment_end) => write!(
                f,
                "block ends at {end} in the {side} sequence, past the alignment end \
                 ({alignment_end})"
            ),
            Error::Misaligned(side, cursor, alignment_end) => write!(
                f,
                "misaligned {side} sequence: blocks end at {cursor} but the header declares an \
                 alignment end of {alignment_end}"
            ),
            Error::Block(err) => write!(f, "invalid block: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Chain`].
///
/// The builder walks the alignment data records with a cursor in each
/// sequence, emitting one [`Block`] per record. Cursors are kept in the raw
/// (strand-relative) coordinates of the file; blocks are normalized to
/// forward coordinates as they are emitted.
#[derive(Debug, Default)]
pub struct Builder {
    /// The header record.
    header: Option<header::Record>,

    /// The running cursor within the source sequence.
    source_cursor: Number,

    /// The running cursor within the target sequence.
    target_cursor: Number,

    /// The blocks emitted so far.
    blocks: Option<NonEmpty<Block>>,

    /// Whether a terminating record has been pushed.
    terminated: bool,
}

impl Builder {
    /// Sets the header record for the [`Builder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::header::Record;
    /// use chainlift::chain::Builder;
    ///
    /// let header = "chain 0 seq0 2 + 0 2 seq0 2 - 0 2 1".parse::<Record>()?;
    /// let builder = Builder::default().header(header)?;
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn header(mut self, record: header::Record) -> Result<Self> {
        if self.header.is_some() {
            return Err(Error::Multiple(MultipleError::Header));
        }

        self.source_cursor = record.source_sequence().alignment_start();
        self.target_cursor = record.target_sequence().alignment_start();
        self.header = Some(record);
        Ok(self)
    }

    /// Pushes a [data record](crate::chain::data::Record) into the
    /// [`Builder`], emitting the block it describes.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::Builder;
    ///
    /// let result = Builder::default().push_data("10".parse()?);
    /// assert!(result.is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn push_data(mut self, record: data::Record) -> Result<Self> {
        let header = self
            .header
            .as_ref()
            .ok_or(Error::Missing(MissingError::Header))?;

        if self.terminated {
            return Err(Error::DataAfterTerminatingRecord);
        }

        let (source_start, source_end) = span(
            header.source_sequence(),
            Side::Source,
            self.source_cursor,
            record.size(),
        )?;

        let (target_start, target_end) = span(
            header.target_sequence(),
            Side::Target,
            self.target_cursor,
            record.size(),
        )?;

        let block = Block::try_new(source_start, source_end, target_start, target_end)
            .map_err(Error::Block)?;

        self.source_cursor = advance(
            header.source_sequence(),
            Side::Source,
            self.source_cursor,
            record.size(),
            record.source_gap(),
        )?;

        self.target_cursor = advance(
            header.target_sequence(),
            Side::Target,
            self.target_cursor,
            record.size(),
            record.target_gap(),
        )?;

        self.terminated = record.kind() == Kind::Terminating;

        self.blocks = match self.blocks {
            Some(mut blocks) => {
                blocks.push(block);
                Some(blocks)
            }
            None => Some(NonEmpty::new(block)),
        };

        Ok(self)
    }

    /// Consumes `self` to attempt to build a [`Chain`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::Builder;
    ///
    /// let chain = Builder::default()
    ///     .header("chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1".parse()?)?
    ///     .push_data("3\t0\t1".parse()?)?
    ///     .push_data("1".parse()?)?
    ///     .try_build()?;
    ///
    /// assert_eq!(chain.header().id(), 1);
    /// assert_eq!(chain.blocks().len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build(self) -> Result<Chain> {
        let header = self.header.ok_or(Error::Missing(MissingError::Header))?;
        let blocks = self.blocks.ok_or(Error::Missing(MissingError::Data))?;

        if !self.terminated {
            return Err(Error::Missing(MissingError::TerminatingRecord));
        }

        let source_end = header.source_sequence().alignment_end();
        if self.source_cursor != source_end {
            return Err(Error::Misaligned(
                Side::Source,
                self.source_cursor,
                source_end,
            ));
        }

        let target_end = header.target_sequence().alignment_end();
        if self.target_cursor != target_end {
            return Err(Error::Misaligned(
                Side::Target,
                self.target_cursor,
                target_end,
            ));
        }

        Ok(Chain { header, blocks })
    }
}

/// Computes the forward-oriented span of a block of `size` positions starting
/// at the raw `cursor`.
fn span(sequence: &Sequence, side: Side, cursor: Number, size: Number) -> Result<(Number, Number)> {
    let end = cursor
        .checked_add(size)
        .ok_or(Error::ExceedsAlignment(side, Number::MAX, sequence.alignment_end()))?;

    if end > sequence.alignment_end() {
        return Err(Error::ExceedsAlignment(side, end, sequence.alignment_end()));
    }

    sequence
        .forward_span(cursor, end)
        .ok_or(Error::ExceedsAlignment(side, end, sequence.alignment_end()))
}

/// Moves a raw cursor past a block and its trailing gap.
fn advance(
    sequence: &Sequence,
    side: Side,
    cursor: Number,
    size: Number,
    gap: Option<Number>,
) -> Result<Number> {
    cursor
        .checked_add(size)
        .and_then(|position| position.checked_add(gap.unwrap_or_default()))
        .ok_or(Error::ExceedsAlignment(side, Number::MAX, sequence.alignment_end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_fails_to_produce_a_chain_when_no_header_is_provided(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default().push_data("1".parse()?).unwrap_err();
        assert_eq!(err.to_string(), "missing required field: header");

        let err = Builder::default().try_build().unwrap_err();
        assert_eq!(err.to_string(), "missing required field: header");

        Ok(())
    }

    #[test]
    fn it_fails_to_produce_a_chain_when_the_header_field_is_provided_more_than_once(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .header("chain 0 seq0 2 + 0 2 seq0 2 - 0 2 1".parse()?)?
            .header("chain 0 seq0 2 + 0 2 seq0 2 - 0 2 1".parse()?)
            .unwrap_err();

        assert_eq!(err.to_string(), "singular field set multiple times: header");

        Ok(())
    }

    #[test]
    fn it_fails_to_produce_a_chain_when_no_data_is_provided(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .header("chain 0 seq0 2 + 0 2 seq0 2 - 0 2 1".parse()?)?
            .try_build()
            .unwrap_err();

        assert_eq!(err.to_string(), "missing required field: data");

        Ok(())
    }

    #[test]
    fn it_fails_without_a_terminating_record(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .header("chain 0 seq0 4 + 0 4 seq0 4 + 0 4 1".parse()?)?
            .push_data("2\t0\t0".parse()?)?
            .try_build()
            .unwrap_err();

        assert_eq!(err.to_string(), "missing required field: terminating record");

        Ok(())
    }

    #[test]
    fn it_rejects_data_after_the_terminating_record(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .header("chain 0 seq0 4 + 0 4 seq0 4 + 0 4 1".parse()?)?
            .push_data("2".parse()?)?
            .push_data("2".parse()?)
            .unwrap_err();

        assert!(matches!(err, Error::DataAfterTerminatingRecord));

        Ok(())
    }

    #[test]
    fn it_emits_forward_blocks_for_a_negative_target(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let chain = Builder::default()
            .header("chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1".parse()?)?
            .push_data("3\t0\t1".parse()?)?
            .push_data("1".parse()?)?
            .try_build()?;

        let blocks = chain.blocks().iter().collect::<Vec<_>>();
        assert_eq!(*blocks[0], Block::try_new(0, 3, 2, 5)?);
        assert_eq!(*blocks[1], Block::try_new(3, 4, 0, 1)?);

        Ok(())
    }

    #[test]
    fn it_rejects_a_block_past_the_alignment_end(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .header("chain 0 seq0 10 + 0 4 seq1 10 + 0 6 1".parse()?)?
            .push_data("5".parse()?)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "block ends at 5 in the source sequence, past the alignment end (4)"
        );

        Ok(())
    }

    #[test]
    fn it_rejects_misaligned_cursors() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let err = Builder::default()
            .header("chain 0 seq0 4 + 0 3 seq0 10 - 0 9 1".parse()?)?
            .push_data("2\t0\t1".parse()?)?
            .push_data("1".parse()?)?
            .try_build()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "misaligned target sequence: blocks end at 4 but the header declares an alignment \
             end of 9"
        );

        Ok(())
    }
}
