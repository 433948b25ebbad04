//! Composition and serialization of the encode-ready table.

use std::collections::HashSet;
use std::io::Write;

use serde::Serialize;

use crate::csv::InputDocument;
use crate::error::{Error, Result};
use crate::lang::{self, DEFAULT_LANG};
use crate::traits::Serializer;
use crate::types::{CompleteRecord, IdSpace};

/// Fixed column-header comment the encoder expects on the second line.
pub const COLUMN_HEADER: &str = "; id      |key(hex)|key(str)| text";

/// The resolved, encode-ready form of a document.
///
/// Every record carries a numeric id and the list is sorted ascending by
/// id. `space` is `None` when the document holds vanilla ids, which tells
/// the caller to disable the encoder's id-range check.
#[derive(Debug, Clone, Serialize)]
pub struct OutputDocument {
    pub lang: String,
    pub meta: String,
    pub space: Option<u32>,
    pub records: Vec<CompleteRecord>,
}

impl OutputDocument {
    /// Retargets the document at another language. The text is unchanged;
    /// only the header metadata (and thus the compiled table's variant)
    /// moves.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.meta = lang::meta_for(lang).unwrap_or(DEFAULT_LANG).to_string();
        self.lang = lang.to_string();
        self
    }
}

impl TryFrom<InputDocument> for OutputDocument {
    type Error = Error;

    /// Resolves an input document into its encode-ready form: allocates ids
    /// for abbreviated records and merges them with the complete ones.
    fn try_from(input: InputDocument) -> Result<Self> {
        let lang = input
            .lang
            .clone()
            .unwrap_or_else(|| DEFAULT_LANG.to_string());
        let meta = input
            .meta
            .clone()
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        // Allocation still uses the declared space when vanilla ids are
        // present; only the downstream range check is disabled.
        let alloc_space = input.resolved_space();
        let space = if input.has_vanilla { None } else { alloc_space };

        let mut records = Vec::with_capacity(input.abbreviated.len() + input.complete.len());
        if !input.abbreviated.is_empty() {
            let base = IdSpace::base_id(alloc_space.ok_or(Error::UnresolvedIdSpace)?);
            let mut used: HashSet<u32> = input.complete.iter().map(|rec| rec.id).collect();
            let mut counter = base;
            for rec in input.abbreviated {
                while used.contains(&counter) {
                    counter += 1;
                }
                used.insert(counter);
                records.push(CompleteRecord {
                    id: counter,
                    key_hex: String::new(),
                    key: rec.key,
                    text: rec.text,
                });
                counter += 1;
            }
        }
        records.extend(input.complete);
        records.sort_by_key(|rec| rec.id);

        Ok(OutputDocument {
            lang,
            meta,
            space,
            records,
        })
    }
}

impl Serializer for OutputDocument {
    /// Writes the canonical table text: metadata line, column header, then
    /// one record per line with the id and key-hex columns right-justified
    /// to their fixed widths.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        let mut lines = Vec::with_capacity(self.records.len() + 2);
        lines.push(format!(";meta[language={}]", self.meta));
        lines.push(COLUMN_HEADER.to_string());
        for rec in &self.records {
            lines.push(format!(
                "{:>10}|{:>8}|{}|{}",
                rec.id, rec.key_hex, rec.key, rec.text
            ));
        }
        let mut content = lines.join("\n");
        content.push('\n');
        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}
