#![forbid(unsafe_code)]
//! String-table preparation toolkit for Witcher 3 mods.
//!
//! Takes the heterogeneous sources a mod accumulates (pipe-delimited
//! string tables, menu configuration markup, script sources, whole
//! directory trees) and produces the canonical table the external
//! `w3strings` encoder compiles: one record per string, with a stable
//! numeric id, a key, and text.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use w3kit::csv::{InputDocument, OutputDocument};
//! use w3kit::traits::{Parser, Serializer};
//!
//! // Parse a working table, resolve ids, write the encode-ready form.
//! let input = InputDocument::read_from("mymod.en.csv")?;
//! let output = OutputDocument::try_from(input)?;
//! output.write_to("out/en.csv")?;
//! # Ok::<(), w3kit::Error>(())
//! ```
//!
//! # Pieces
//!
//! - [`csv`]: the string-table document model: strict input parsing,
//!   id allocation and composition, section-aware in-place merging.
//! - [`scan`] / [`menu`]: key discovery in script sources and menu markup.
//! - [`encoder`]: wrapper around the external `w3strings` executable.
//! - [`lang`]: supported game languages and their encoder metadata tags.

pub mod csv;
pub mod encoder;
pub mod encoding;
pub mod error;
pub mod lang;
pub mod menu;
pub mod scan;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    csv::{InputDocument, MergeDocument, OutputDocument},
    encoder::Encoder,
    error::{Error, Result},
    types::{AbbreviatedRecord, CompleteRecord, IdSpace},
};
