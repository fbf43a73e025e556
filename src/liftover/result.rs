//! The result of a liftover.

use omics::coordinate::position::Number;
use omics::coordinate::Strand;

/// A coordinate range in the target genome produced by a liftover.
///
/// When the chain that produced the result is inverted, the range is reported
/// in descending order: `start` is greater than `end`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiftResult {
    /// The chromosome name.
    chromosome: String,

    /// The start.
    start: Number,

    /// The end.
    end: Number,

    /// The strand.
    strand: Strand,
}

impl LiftResult {
    /// Creates a new [`LiftResult`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::liftover::LiftResult;
    /// use omics::coordinate::Strand;
    ///
    /// let result = LiftResult::new("chr1", 206268644, 206268643, Strand::Negative);
    /// assert_eq!(result.to_string(), "chr1:-:206268644-206268643");
    /// ```
    pub fn new(chromosome: impl Into<String>, start: Number, end: Number, strand: Strand) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
            strand,
        }
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

impl std::fmt::Display for LiftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}-{}",
            self.chromosome, self.strand, self.start, self.end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let result = LiftResult::new("chr7", 140739811, 140739811, Strand::Positive);
        assert_eq!(result.to_string(), "chr7:+:140739811-140739811");

        let result = LiftResult::new("chr1", 206268644, 206268643, Strand::Negative);
        assert_eq!(result.to_string(), "chr1:-:206268644-206268643");
    }
}
