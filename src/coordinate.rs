//! Strand-aware coordinate arithmetic.
//!
//! Chain files store coordinates on the negative strand relative to the end
//! of the chromosome (that is, in terms of the reverse-complemented sequence).
//! Everything inside this crate works with forward-oriented, interbase
//! coordinates, so raw values are pushed through [`reexpress()`] on the way in
//! and on the way out.

use omics::coordinate::position::Number;
use omics::coordinate::Strand;

/// Re-expresses an interbase `coordinate` on a chromosome of length `size`
/// between the strand-relative and the forward-absolute conventions.
///
/// The conversion is its own inverse: on the positive strand, the coordinate
/// is returned as is; on the negative strand, it is measured from the other
/// end of the chromosome. [`None`] is returned if the coordinate does not fall
/// within `[0, size]`.
///
/// # Examples
///
/// ```
/// use chainlift::coordinate::reexpress;
/// use omics::coordinate::Strand;
///
/// assert_eq!(reexpress(10, Strand::Positive, 3), Some(3));
/// assert_eq!(reexpress(10, Strand::Negative, 3), Some(7));
/// assert_eq!(reexpress(10, Strand::Negative, 7), Some(3));
/// assert_eq!(reexpress(10, Strand::Negative, 11), None);
/// ```
pub fn reexpress(size: Number, strand: Strand, coordinate: Number) -> Option<Number> {
    if coordinate > size {
        return None;
    }

    match strand {
        Strand::Positive => Some(coordinate),
        Strand::Negative => Some(size - coordinate),
    }
}

/// Converts a strand-relative, half-open span `[start, end)` into its
/// forward-absolute equivalent.
///
/// # Examples
///
/// ```
/// use chainlift::coordinate::forward_span;
/// use omics::coordinate::Strand;
///
/// assert_eq!(forward_span(10, Strand::Positive, 0, 3), Some((0, 3)));
/// assert_eq!(forward_span(10, Strand::Negative, 0, 3), Some((7, 10)));
/// ```
pub fn forward_span(
    size: Number,
    strand: Strand,
    start: Number,
    end: Number,
) -> Option<(Number, Number)> {
    let a = reexpress(size, strand, start)?;
    let b = reexpress(size, strand, end)?;

    match strand {
        Strand::Positive => Some((a, b)),
        Strand::Negative => Some((b, a)),
    }
}
