//! Key derivation from mod menu configuration markup.
//!
//! Menu schemas reference their visible labels by localization key through
//! `displayName` attributes on group, variable, option, and preset
//! elements. Walking the tree with a pull parser keeps an implicit element
//! stack instead of parent back-references.

use std::collections::HashSet;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{Error, Result};
use crate::types::AbbreviatedRecord;

/// Element names whose `displayName` is rendered through the string table.
const LABELED_ELEMENTS: [&[u8]; 4] = [b"Group", b"Var", b"Option", b"Preset"];

/// Derives string keys from a menu configuration document.
///
/// Keys come out in document order, each once. A `prefix` filter restricts
/// the result to keys starting with it; display names that are plainly not
/// localization keys (empty, purely numeric) are skipped either way.
pub fn scan_menu(xml: &str, prefix: Option<&str>) -> Result<Vec<AbbreviatedRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut seen = HashSet::new();
    let mut records = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if !LABELED_ELEMENTS.contains(&e.name().as_ref()) {
                    continue;
                }
                for attr in e.attributes().with_checks(false) {
                    let attr = attr.map_err(|e| Error::MenuMarkup(e.to_string()))?;
                    if attr.key.as_ref() != b"displayName" {
                        continue;
                    }
                    let value = attr.unescape_value()?.to_string();
                    if !is_localization_key(&value, prefix) {
                        continue;
                    }
                    if seen.insert(value.clone()) {
                        records.push(AbbreviatedRecord::placeholder(value));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
    }

    Ok(records)
}

fn is_localization_key(value: &str, prefix: Option<&str>) -> bool {
    if value.is_empty() || value.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    match prefix {
        Some(prefix) => value.starts_with(prefix),
        None => true,
    }
}
