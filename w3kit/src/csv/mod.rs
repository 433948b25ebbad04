//! The w3strings CSV document model.
//!
//! The exchange format is a pipe-delimited text table annotated with `;`
//! comment lines. Three views of it live here:
//!
//! - [`InputDocument`]: a strictly validated parse of one source table.
//! - [`OutputDocument`]: the resolved, encode-ready table with every record
//!   carrying a numeric id.
//! - [`MergeDocument`]: a line-preserving model of an existing annotated
//!   table that newly scanned keys are folded into.

pub mod input;
pub mod merge;
pub mod output;

pub use input::InputDocument;
pub use merge::MergeDocument;
pub use output::OutputDocument;

use crate::{
    error::{Error, Result},
    types::{AbbreviatedRecord, CompleteRecord},
};

/// Prefix marking a comment or attribute line.
pub const COMMENT_PREFIX: char = ';';

/// Attribute key naming a merge section.
pub const SECTION_KEY: &str = "section";

/// Attribute key declaring the document's id space.
pub const IDSPACE_KEY: &str = "idspace";

/// Key the `;meta[language=<tag>]` attribute splits into. The closing
/// bracket lands in the value and is stripped by [`Line::meta_language`].
const META_KEY: &str = "meta[language";

/// One classified line of a string-table document.
///
/// Decisions that depend on line shape pattern-match on this everywhere;
/// blank lines classify to nothing at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// An inert comment, preserved verbatim on merge, ignored on parse.
    Comment(String),
    /// A structured `;key=value` comment attribute.
    Attribute { key: String, value: String },
    /// A two-column `key|text` record.
    Abbreviated(AbbreviatedRecord),
    /// A four-column `id|key_hex|key|text` record.
    Complete(CompleteRecord),
}

impl Line {
    /// The language tag if this is the `;meta[language=<tag>]` attribute.
    pub fn meta_language(&self) -> Option<&str> {
        match self {
            Line::Attribute { key, value } if key == META_KEY => value.strip_suffix(']'),
            _ => None,
        }
    }

    /// The section name if this is a `;section=<name>` attribute.
    pub fn section_name(&self) -> Option<&str> {
        match self {
            Line::Attribute { key, value } if key == SECTION_KEY => Some(value),
            _ => None,
        }
    }
}

/// Classifies one line of a string-table document.
///
/// Returns `Ok(None)` for blank and whitespace-only lines. Content lines
/// split on `|`: two fields make an abbreviated record, four make a
/// complete record, anything else is a structural error. Comment lines are
/// split into strict `;key=value` attributes (no spaces in the key) and
/// inert comments.
pub fn classify(line: &str) -> Result<Option<Line>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    if let Some(body) = line.strip_prefix(COMMENT_PREFIX) {
        if let Some((key, value)) = body.split_once('=') {
            if !key.is_empty() && !key.contains(' ') {
                return Ok(Some(Line::Attribute {
                    key: key.to_string(),
                    value: value.to_string(),
                }));
            }
        }
        return Ok(Some(Line::Comment(line.to_string())));
    }

    let fields: Vec<&str> = line.split('|').collect();
    match fields.len() {
        2 => Ok(Some(Line::Abbreviated(AbbreviatedRecord {
            key: fields[0].trim().to_string(),
            text: fields[1].to_string(),
        }))),
        4 => {
            let id_field = fields[0].trim();
            let id = id_field
                .parse::<u32>()
                .map_err(|_| Error::IdParse(id_field.to_string()))?;
            Ok(Some(Line::Complete(CompleteRecord {
                id,
                key_hex: fields[1].trim().to_string(),
                key: fields[2].trim().to_string(),
                text: fields[3].to_string(),
            })))
        }
        count => Err(Error::ColumnCount(count)),
    }
}
