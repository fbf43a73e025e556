//! Accessories to alignment data records.

/// A kind of alignment data record.
///
/// In other words, whether the alignment data record closes its chain or not.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// Every line except the last line in a chain.
    NonTerminating,

    /// The last line in a chain.
    Terminating,
}
