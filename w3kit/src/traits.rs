//! Traits for reading and writing string-table documents.

use std::{
    fs::File,
    io::{BufRead, BufWriter, Cursor, Read, Write},
    path::Path,
};

use crate::error::{Error, Result};

/// A trait for parsing a document from text.
///
/// `read_from` decodes byte-order-marked files (UTF-16 LE/BE, UTF-8 with
/// signature) before parsing; everything else is read as plain UTF-8.
///
/// # Example
///
/// ```rust,no_run
/// use w3kit::traits::Parser;
/// let doc = w3kit::csv::InputDocument::read_from("mymod.en.csv")?;
/// Ok::<(), w3kit::Error>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self>
    where
        Self: Sized;

    /// Parse from a file path, honoring a leading byte-order mark.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded).map_err(|e| e.in_file(path))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

/// A trait for serializing a document to the canonical on-disk text form.
pub trait Serializer {
    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<()>;

    /// Write to a file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        self.to_writer(writer)
    }
}
