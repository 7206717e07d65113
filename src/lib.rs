//! Huffman text encoder.
//!
//! A prefix code is derived from the character frequencies of a reference
//! file and used to rewrite another file as a string of `'0'`/`'1'`
//! characters, one per code bit.
//!
//! ```no_run
//! use huffenc::pipeline::{encode_files, Outcome};
//!
//! let outcome = encode_files("input.txt", "reference.txt", "output.txt")?;
//! println!("{}", outcome.report());
//! if let Outcome::Incomplete(report) = &outcome {
//!     eprintln!("no code for {:?}", report.stats.missing_chars);
//! }
//! # Ok::<(), huffenc::Error>(())
//! ```

pub mod encoder;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod pipeline;

pub use encoder::{EncodeStats, Encoder};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use huffman::{CodeTable, LeafCode, Node, TreeBuilder};
pub use pipeline::{Outcome, Report, encode_files};
