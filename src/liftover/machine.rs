//! A machine for lifting over coordinates from a source genome to a target
//! genome.

use omics::coordinate::position::Number;
use omics::coordinate::Strand;

use crate::chain::header;
use crate::chain::Block;
use crate::coordinate;
use crate::liftover::Entry;
use crate::liftover::Index;
use crate::liftover::LiftResult;
use crate::liftover::Query;

pub mod builder;

pub use builder::Builder;

/// A machine for lifting over coordinates from a source genome to a target
/// genome.
///
/// Generally, you will want to use a [`builder::Builder`] to construct one of
/// these. Once built, a machine is immutable and can be shared across threads
/// freely.
#[derive(Debug)]
pub struct Machine {
    /// The block index.
    index: Index,
}

impl Machine {
    /// Gets the inner [`Index`].
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Lifts the range `[start, end)` on `chromosome` over to the target
    /// genome.
    ///
    /// If `start` and `end` are equal, the single position `start` is lifted.
    /// Both ends of the range must land within the same chain. When more than
    /// one chain covers `start`, the highest scoring chain that also covers
    /// the end of the range wins.
    ///
    /// At most one result is returned. An empty result means that no mapping
    /// exists, either because nothing covers the range or because `end` comes
    /// before `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::liftover::LiftResult;
    /// use chainlift::liftover::machine::Builder;
    /// use omics::coordinate::Strand;
    ///
    /// let data = b"chain 0 seq0 10 + 0 10 seq1 10 - 0 10 1\n10\n";
    /// let machine = Builder.try_build_from(chainlift::Reader::new(&data[..]))?;
    ///
    /// assert_eq!(
    ///     machine.lift("seq0", 1, 7, Strand::Positive),
    ///     vec![LiftResult::new("seq1", 9, 3, Strand::Negative)]
    /// );
    /// assert!(machine.lift("seq0", 10, 10, Strand::Positive).is_empty());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn lift(
        &self,
        chromosome: &str,
        start: Number,
        end: Number,
        strand: Strand,
    ) -> Vec<LiftResult> {
        if end < start {
            return Vec::new();
        }

        for entry in self.index.covering(chromosome, start) {
            let header = match self.index.header(entry.chain()) {
                Some(header) => header,
                None => continue,
            };

            let lifted_start = match lift_point(header, entry.block(), start) {
                Some(position) => position,
                None => continue,
            };

            let lifted_end = match start == end {
                true => Some(lifted_start),
                false => self.lift_end(chromosome, entry, header, end),
            };

            if let Some(lifted_end) = lifted_end {
                let target = header.target_sequence();

                let strand = match header.is_inverted() {
                    true => strand.complement(),
                    false => strand,
                };

                return vec![LiftResult::new(
                    target.chromosome_name(),
                    lifted_start,
                    lifted_end,
                    strand,
                )];
            }
        }

        Vec::new()
    }

    /// Lifts the single `position` on `chromosome` over to the target genome.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::liftover::LiftResult;
    /// use chainlift::liftover::machine::Builder;
    /// use omics::coordinate::Strand;
    ///
    /// let data = b"chain 0 seq0 10 + 0 10 seq1 20 + 5 15 1\n10\n";
    /// let machine = Builder.try_build_from(chainlift::Reader::new(&data[..]))?;
    ///
    /// assert_eq!(
    ///     machine.lift_position("seq0", 3, Strand::Positive),
    ///     vec![LiftResult::new("seq1", 8, 8, Strand::Positive)]
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn lift_position(
        &self,
        chromosome: &str,
        position: Number,
        strand: Strand,
    ) -> Vec<LiftResult> {
        self.lift(chromosome, position, position, strand)
    }

    /// Lifts a [`Query`] over to the target genome.
    pub fn lift_query(&self, query: &Query) -> Vec<LiftResult> {
        self.lift(query.chromosome(), query.start(), query.end(), query.strand())
    }

    /// Lifts the exclusive `end` of a range that starts within `entry`.
    ///
    /// The last position of the range (`end - 1`) must be covered by the same
    /// chain. The lifted position is then stepped one further in the
    /// direction of the target range.
    fn lift_end(
        &self,
        chromosome: &str,
        entry: &Entry,
        header: &header::Record,
        end: Number,
    ) -> Option<Number> {
        let last = end.checked_sub(1)?;

        let block = match entry.block().contains(last) {
            true => entry.block(),
            false => self
                .index
                .covering(chromosome, last)
                .into_iter()
                .find(|candidate| candidate.chain() == entry.chain())?
                .block(),
        };

        let lifted = lift_point(header, block, last)?;

        match header.is_inverted() {
            true => lifted.checked_sub(1),
            false => lifted.checked_add(1),
        }
    }
}

/// Lifts a single `position` through a `block` of the chain described by
/// `header`.
///
/// On an inverted chain, the offset into the block is measured from the
/// target end: the strand-relative target coordinate is `(size - end) +
/// offset`, which re-expresses to `end - offset` in forward coordinates.
fn lift_point(header: &header::Record, block: &Block, position: Number) -> Option<Number> {
    if !block.contains(position) {
        return None;
    }

    let offset = position - block.source_start();

    match header.is_inverted() {
        false => block.target_start().checked_add(offset),
        true => {
            let target = header.target_sequence();
            let size = target.chromosome_size();
            let raw = size
                .checked_sub(block.target_end())?
                .checked_add(offset)?;
            coordinate::reexpress(size, Strand::Negative, raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liftover::machine;
    use crate::Reader;

    /// A forward chain between two builds of chromosome 7.
    const FORWARD: &[u8] =
        b"chain 1000 chr7 159138663 + 140400000 140500000 chr7 159345973 + 140700200 140800200 1\n100000\n";

    /// An inverted chain between two builds of chromosome 1.
    const INVERTED: &[u8] =
        b"chain 5000 chr1 249250621 + 206000000 206100000 chr1 248956422 - 42615071 42715071 2\n100000\n";

    fn machine(data: &[u8]) -> Result<Machine, Box<dyn std::error::Error>> {
        Ok(machine::Builder.try_build_from(Reader::new(data))?)
    }

    #[test]
    fn forward_position() -> Result<(), Box<dyn std::error::Error>> {
        let machine = machine(FORWARD)?;

        assert_eq!(
            machine.lift("chr7", 140439611, 140439611, Strand::Positive),
            vec![LiftResult::new("chr7", 140739811, 140739811, Strand::Positive)]
        );
        assert_eq!(
            machine.lift_position("chr7", 140453136, Strand::Positive),
            vec![LiftResult::new("chr7", 140753336, 140753336, Strand::Positive)]
        );

        Ok(())
    }

    #[test]
    fn forward_interval() -> Result<(), Box<dyn std::error::Error>> {
        let machine = machine(FORWARD)?;

        assert_eq!(
            machine.lift("chr7", 140439611, 140439616, Strand::Positive),
            vec![LiftResult::new("chr7", 140739811, 140739816, Strand::Positive)]
        );

        Ok(())
    }

    #[test]
    fn inverted_interval() -> Result<(), Box<dyn std::error::Error>> {
        let machine = machine(INVERTED)?;

        assert_eq!(
            machine.lift("chr1", 206072707, 206072708, Strand::Positive),
            vec![LiftResult::new("chr1", 206268644, 206268643, Strand::Negative)]
        );

        let results = machine.lift("chr1", 206000100, 206000200, Strand::Negative);
        assert_eq!(results.len(), 1);

        let result = &results[0];
        assert_eq!(result.strand(), Strand::Positive);
        assert!(result.start() > result.end());
        assert_eq!(result.start() - result.end(), 100);

        Ok(())
    }

    #[test]
    fn out_of_range() -> Result<(), Box<dyn std::error::Error>> {
        let machine = machine(FORWARD)?;

        assert!(machine
            .lift("chr7", 14040053136, 14040053136, Strand::Positive)
            .is_empty());
        assert!(machine
            .lift("chr7", 140500000, 140500000, Strand::Positive)
            .is_empty());
        assert!(machine
            .lift("chrUn", 140439611, 140439611, Strand::Positive)
            .is_empty());

        Ok(())
    }

    #[test]
    fn end_before_start() -> Result<(), Box<dyn std::error::Error>> {
        let machine = machine(FORWARD)?;
        assert!(machine
            .lift("chr7", 140439612, 140439611, Strand::Positive)
            .is_empty());
        Ok(())
    }

    #[test]
    fn block_boundaries_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let data = b"chain 0 seq0 100 + 10 30 seq1 100 + 50 70 1\n10\t5\t5\n5\n\n\
                     chain 0 seq2 100 + 10 30 seq3 100 - 50 70 2\n10\t5\t5\n5\n";
        let machine = machine(&data[..])?;

        for entry in machine.index().blocks("seq0") {
            let block = entry.block();
            let start = machine.lift_position("seq0", block.source_start(), Strand::Positive);
            let last = machine.lift_position("seq0", block.source_end() - 1, Strand::Positive);

            assert_eq!(start[0].start(), block.target_start());
            assert_eq!(last[0].start(), block.target_end() - 1);
        }

        for entry in machine.index().blocks("seq2") {
            let block = entry.block();
            let start = machine.lift_position("seq2", block.source_start(), Strand::Positive);
            let last = machine.lift_position("seq2", block.source_end() - 1, Strand::Positive);

            assert_eq!(start[0].start(), block.target_end());
            assert_eq!(last[0].start(), block.target_start() + 1);
        }

        Ok(())
    }

    #[test]
    fn gaps() -> Result<(), Box<dyn std::error::Error>> {
        let data = b"chain 0 seq0 100 + 10 30 seq1 100 + 50 70 1\n10\t5\t5\n5\n";
        let machine = machine(&data[..])?;

        for position in 20..25 {
            assert!(machine
                .lift_position("seq0", position, Strand::Positive)
                .is_empty());
        }

        // The range spans the gap but both ends fall within the chain.
        assert_eq!(
            machine.lift("seq0", 15, 28, Strand::Positive),
            vec![LiftResult::new("seq1", 55, 68, Strand::Positive)]
        );

        // The range ends within the gap.
        assert!(machine.lift("seq0", 15, 22, Strand::Positive).is_empty());

        Ok(())
    }

    #[test]
    fn inverted_interval_across_a_gap() -> Result<(), Box<dyn std::error::Error>> {
        let data = b"chain 0 seq2 100 + 10 30 seq3 100 - 50 70 2\n10\t5\t5\n5\n";
        let machine = machine(&data[..])?;

        assert_eq!(
            machine.lift("seq2", 15, 28, Strand::Positive),
            vec![LiftResult::new("seq3", 45, 32, Strand::Negative)]
        );

        // The range ends within the gap.
        assert!(machine.lift("seq2", 15, 22, Strand::Positive).is_empty());

        Ok(())
    }

    #[test]
    fn ends_must_share_a_chain() -> Result<(), Box<dyn std::error::Error>> {
        let data = b"chain 10 seq0 100 + 0 10 seq1 100 + 0 10 1\n10\n\n\
                     chain 10 seq0 100 + 10 20 seq2 100 + 0 10 2\n10\n";
        let machine = machine(&data[..])?;

        assert!(machine.lift("seq0", 5, 15, Strand::Positive).is_empty());
        assert_eq!(
            machine.lift("seq0", 5, 10, Strand::Positive),
            vec![LiftResult::new("seq1", 5, 10, Strand::Positive)]
        );

        Ok(())
    }

    #[test]
    fn highest_scoring_chain_wins() -> Result<(), Box<dyn std::error::Error>> {
        let data = b"chain 10 seq0 100 + 0 10 seq1 100 + 0 10 1\n10\n\n\
                     chain 90 seq0 100 + 0 10 seq2 100 + 20 30 2\n10\n\n\
                     chain 50 seq0 100 + 0 20 seq3 100 + 0 20 3\n20\n";
        let machine = machine(&data[..])?;

        assert_eq!(
            machine.lift_position("seq0", 5, Strand::Positive),
            vec![LiftResult::new("seq2", 25, 25, Strand::Positive)]
        );

        // The best chain does not reach the end, so the next one is used.
        assert_eq!(
            machine.lift("seq0", 5, 15, Strand::Positive),
            vec![LiftResult::new("seq3", 5, 15, Strand::Positive)]
        );

        Ok(())
    }

    #[test]
    fn negative_source_strand() -> Result<(), Box<dyn std::error::Error>> {
        let data = b"chain 0 seq0 10 - 0 10 seq1 10 - 0 10 1\n10\n";
        let machine = machine(&data[..])?;

        assert_eq!(
            machine.lift("seq0", 1, 7, Strand::Negative),
            vec![LiftResult::new("seq1", 1, 7, Strand::Negative)]
        );

        let data = b"chain 0 seq0 10 - 0 10 seq1 10 + 0 10 1\n10\n";
        let machine = self::machine(&data[..])?;

        assert_eq!(
            machine.lift("seq0", 1, 7, Strand::Negative),
            vec![LiftResult::new("seq1", 9, 3, Strand::Positive)]
        );

        Ok(())
    }

    #[test]
    fn lift_query() -> Result<(), Box<dyn std::error::Error>> {
        let machine = machine(INVERTED)?;
        let query = "chr1:+:206072707-206072708".parse::<Query>()?;

        let results = machine.lift_query(&query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].to_string(), "chr1:-:206268644-206268643");

        Ok(())
    }

    #[test]
    fn identical_builds_answer_identically() -> Result<(), Box<dyn std::error::Error>> {
        let a = machine(INVERTED)?;
        let b = machine(INVERTED)?;

        for position in (206000000..206100000).step_by(9973) {
            assert_eq!(
                a.lift_position("chr1", position, Strand::Positive),
                b.lift_position("chr1", position, Strand::Positive)
            );
        }

        Ok(())
    }

    #[test]
    fn concurrent_queries() -> Result<(), Box<dyn std::error::Error>> {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Machine>();

        let machine = machine(FORWARD)?;

        std::thread::scope(|scope| {
            for i in 0..4 {
                let machine = &machine;
                scope.spawn(move || {
                    let position = 140439611 + i;
                    let results = machine.lift_position("chr7", position, Strand::Positive);
                    assert_eq!(results[0].start(), 140739811 + i);
                });
            }
        });

        Ok(())
    }
}
