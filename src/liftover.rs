//! Facilities for lifting over coordinates.

pub mod index;
pub mod machine;
pub mod query;
pub mod result;

pub use index::Entry;
pub use index::Index;
pub use machine::Machine;
pub use query::Query;
pub use result::LiftResult;
