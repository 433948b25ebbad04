//! Strict parsing of one string-table source file.

use std::collections::{BTreeSet, HashSet};
use std::io::BufRead;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::csv::{COMMENT_PREFIX, IDSPACE_KEY, Line, classify};
use crate::error::{Error, Result};
use crate::lang;
use crate::traits::Parser;
use crate::types::{AbbreviatedRecord, CompleteRecord, IdSpace, SPACE_COUNT};

/// A validated parse of one string-table file.
///
/// Construction is a single pass that fails on the first structural or
/// semantic violation; a successfully built document satisfies every
/// id-space invariant and is safe to hand to the composer.
#[derive(Debug, Clone, Serialize)]
pub struct InputDocument {
    /// Target language, deduced from the file name or back-derived from the
    /// header metadata.
    pub lang: Option<String>,
    /// Language-metadata tag from the header, if declared.
    pub meta: Option<String>,
    /// Id space declared by the `;idspace=` header attribute.
    pub header_space: Option<u32>,
    /// Two-column records in file order.
    pub abbreviated: Vec<AbbreviatedRecord>,
    /// Four-column records in file order.
    pub complete: Vec<CompleteRecord>,
    /// The single id space implied by the complete records, if any are
    /// mod-owned.
    pub content_space: Option<u32>,
    /// Whether any record carries an id outside the mod range.
    pub has_vanilla: bool,
}

impl InputDocument {
    /// Parses document text. `lang` is the language deduced from the file
    /// name, when the caller knows it.
    pub fn parse(content: &str, lang: Option<&str>) -> Result<Self> {
        let mut lang = lang.map(str::to_string);
        let mut meta: Option<String> = None;
        let mut header_space: Option<u32> = None;
        let mut abbreviated = Vec::new();
        let mut complete = Vec::new();

        // The header is the run of comment lines at the top of the file;
        // anything else, including a blank line, ends it.
        let mut in_header = true;
        for (idx, raw) in content.lines().enumerate() {
            let number = idx + 1;
            if in_header && !raw.starts_with(COMMENT_PREFIX) {
                in_header = false;
            }
            let Some(line) = classify(raw).map_err(|e| e.at_line(number))? else {
                continue;
            };
            match line {
                Line::Abbreviated(rec) => abbreviated.push(rec),
                Line::Complete(rec) => complete.push(rec),
                ref attr @ Line::Attribute { ref key, ref value } if in_header => {
                    if let Some(tag) = attr.meta_language() {
                        if !lang::is_valid_meta(tag) {
                            return Err(Error::UnknownMeta {
                                found: tag.to_string(),
                                legal: lang::legal_metas().join(", "),
                            }
                            .at_line(number));
                        }
                        meta = Some(tag.to_string());
                    } else if key == IDSPACE_KEY {
                        let space = value
                            .parse::<u32>()
                            .ok()
                            .filter(|space| *space < SPACE_COUNT)
                            .ok_or_else(|| {
                                Error::InvalidIdSpace(value.clone()).at_line(number)
                            })?;
                        header_space = Some(space);
                    }
                    // Other header attributes are informational.
                }
                Line::Attribute { .. } | Line::Comment(_) => {}
            }
        }

        match (&meta, &lang) {
            (None, Some(l)) => meta = lang::meta_for(l).map(str::to_string),
            // A non-cleartext metadata tag doubles as the language code.
            (Some(m), None) if m != lang::CLEARTEXT => {
                lang = lang::lang_for_meta(m).map(str::to_string)
            }
            _ => {}
        }

        if abbreviated.is_empty() && complete.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let mut seen = HashSet::new();
        for rec in &complete {
            if !seen.insert(rec.id) {
                return Err(Error::DuplicateId(rec.id));
            }
        }

        let mut spaces = BTreeSet::new();
        let mut has_vanilla = false;
        for rec in &complete {
            match rec.space() {
                IdSpace::Vanilla => has_vanilla = true,
                IdSpace::Mod(space) => {
                    spaces.insert(space);
                }
            }
        }
        let content_space = match spaces.len() {
            0 | 1 => spaces.first().copied(),
            _ => return Err(Error::MultipleIdSpaces(spaces.into_iter().collect())),
        };

        if let (Some(header), Some(content)) = (header_space, content_space)
            && header != content
        {
            return Err(Error::IdSpaceMismatch { header, content });
        }

        if !abbreviated.is_empty() && header_space.is_none() && content_space.is_none() {
            return Err(Error::UnresolvedIdSpace);
        }

        if has_vanilla {
            warn!("document contains ids outside the mod range; id-space checks will be disabled");
        }
        if !abbreviated.is_empty() && !complete.is_empty() {
            warn!(
                "document mixes abbreviated and complete records; keep their keys distinct to avoid duplicate entries"
            );
        }

        Ok(InputDocument {
            lang,
            meta,
            header_space,
            abbreviated,
            complete,
            content_space,
            has_vanilla,
        })
    }

    /// The id space used for allocation: the header declaration wins over
    /// the one implied by record content.
    pub fn resolved_space(&self) -> Option<u32> {
        self.header_space.or(self.content_space)
    }
}

impl Parser for InputDocument {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let content = reader
            .lines()
            .collect::<std::result::Result<Vec<_>, _>>()?
            .join("\n");
        Self::parse(&content, None)
    }

    /// Reads a file, deducing the target language from dot-delimited file
    /// name components before parsing the content.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let lang = lang::deduce_from_filename(path);
        let content = crate::encoding::read_to_string(path)?;
        Self::parse(&content, lang).map_err(|e| e.in_file(path))
    }
}
