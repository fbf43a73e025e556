//! Ungapped alignment blocks.

use omics::coordinate::position::Number;

/// An error related to a [`Block`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The block covers no positions.
    Empty,

    /// The source and target spans have different lengths.
    LengthMismatch(Number, Number),

    /// A span ends before it starts.
    Reversed(Number, Number),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Empty => write!(f, "block is empty"),
            Error::LengthMismatch(source, target) => write!(
                f,
                "source span length ({source}) doesn't match target span length ({target})"
            ),
            Error::Reversed(start, end) => {
                write!(f, "span end ({end}) is before span start ({start})")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A maximal ungapped segment that aligns the source and target sequences.
///
/// Both spans are half-open, forward-oriented, and have the same length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Block {
    /// The start of the block in the source sequence.
    source_start: Number,

    /// The end of the block in the source sequence.
    source_end: Number,

    /// The start of the block in the target sequence.
    target_start: Number,

    /// The end of the block in the target sequence.
    target_end: Number,
}

impl Block {
    /// Attempts to create a new [`Block`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::chain::Block;
    ///
    /// let block = Block::try_new(100, 110, 500, 510)?;
    /// assert_eq!(block.len(), 10);
    /// assert!(block.contains(109));
    /// assert!(!block.contains(110));
    ///
    /// assert!(Block::try_new(100, 110, 500, 505).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        source_start: Number,
        source_end: Number,
        target_start: Number,
        target_end: Number,
    ) -> Result<Self, Error> {
        if source_end < source_start {
            return Err(Error::Reversed(source_start, source_end));
        }

        if target_end < target_start {
            return Err(Error::Reversed(target_start, target_end));
        }

        let source_len = source_end - source_start;
        let target_len = target_end - target_start;

        if source_len != target_len {
            return Err(Error::LengthMismatch(source_len, target_len));
        }

        if source_len == 0 {
            return Err(Error::Empty);
        }

        Ok(Self {
            source_start,
            source_end,
            target_start,
            target_end,
        })
    }

    /// Gets the start of the block in the source sequence.
    pub fn source_start(&self) -> Number {
        self.source_start
    }

    /// Gets the end of the block in the source sequence.
    pub fn source_end(&self) -> Number {
        self.source_end
    }

    /// Gets the start of the block in the target sequence.
    pub fn target_start(&self) -> Number {
        self.target_start
    }

    /// Gets the end of the block in the target sequence.
    pub fn target_end(&self) -> Number {
        self.target_end
    }

    /// Gets the number of positions covered by the block.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> Number {
        self.source_end - self.source_start
    }

    /// Whether the source span contains `position`.
    pub fn contains(&self, position: Number) -> bool {
        self.source_start <= position && position < self.source_end
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}) -> [{}, {})",
            self.source_start, self.source_end, self.target_start, self.target_end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch() {
        let err = Block::try_new(0, 10, 0, 20).unwrap_err();
        assert_eq!(err, Error::LengthMismatch(10, 20));
        assert_eq!(
            err.to_string(),
            "source span length (10) doesn't match target span length (20)"
        );
    }

    #[test]
    fn empty_block() {
        assert_eq!(Block::try_new(5, 5, 7, 7).unwrap_err(), Error::Empty);
    }

    #[test]
    fn reversed_span() {
        assert_eq!(
            Block::try_new(5, 4, 7, 6).unwrap_err(),
            Error::Reversed(5, 4)
        );
    }

    #[test]
    fn display() {
        let block = Block::try_new(0, 3, 2, 5).unwrap();
        assert_eq!(block.to_string(), "[0, 3) -> [2, 5)");
    }
}
