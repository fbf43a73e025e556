//! `chainlift` is a crate for lifting genomic coordinates over from one genome
//! build to another using chain files.
//!
//! The crate provides three main points of entry:
//!
//! - Parsing and reading chain files directly.
//! - Providing a machine for lifting over coordinates given a chain file.
//! - A [`Converter`](converter::Converter) that wires the two together for a
//!   chain file on disk, in memory, or looked up by genome build names.
//!
//! ## Parsing and reading chain files
//!
//! If you're interested in parsing and reading chain files directly, you can
//! use the [`Reader`] facility to accomplish that. Most users will want to read
//! the parsed [chains](crate::chain::Chain) using
//! [`Reader::chains()`](crate::Reader::chains()). Each chain carries its
//! [header](crate::chain::header::Record) and the ungapped
//! [blocks](crate::chain::Block) it describes. Blocks are always stored in
//! forward coordinates: coordinates on the negative strand, which chain files
//! store relative to the end of the chromosome, are converted as they are
//! read.
//!
//! ```
//! let data = b"chain 0 seq0 4 + 0 4 seq0 5 - 0 5 1\n3\t0\t1\n1";
//! let mut reader = chainlift::Reader::new(&data[..]);
//!
//! for result in reader.chains() {
//!     let chain = result?;
//!     println!("{}", chain.header());
//!
//!     for block in chain.blocks().iter() {
//!         println!("{block}");
//!     }
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Liftover Machine
//!
//! A [`liftover::Machine`] indexes the blocks of every chain by source
//! chromosome and answers liftover queries against that index. A machine
//! cannot be instantiated directly. Instead, you should use
//! [`liftover::machine::Builder`] and the associated
//! [`liftover::machine::Builder::try_build_from()`] method to construct one.
//!
//! ```
//! use chainlift::liftover::Query;
//!
//! let data = b"chain 0 seq0 10 + 0 10 seq1 10 - 0 10 1\n10";
//! let reader = chainlift::Reader::new(&data[..]);
//! let machine = chainlift::liftover::machine::Builder::default().try_build_from(reader)?;
//!
//! let query = "seq0:+:3-4".parse::<Query>()?;
//! for result in machine.lift_query(&query) {
//!     assert_eq!(result.to_string(), "seq1:-:7-6");
//! }
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod chain;
pub mod config;
pub mod converter;
pub mod coordinate;
pub mod liftover;
pub mod line;
pub mod reader;
pub mod source;

pub use line::Line;

pub use self::reader::Reader;
