//! Key discovery in script sources and whole mod directories.

use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use walkdir::WalkDir;

use crate::encoding;
use crate::error::Result;
use crate::menu;
use crate::types::AbbreviatedRecord;

/// Merge section collecting keys found in menu configuration files.
pub const MENU_SECTION: &str = "menu";
/// Merge section collecting keys found in script sources.
pub const SCRIPTS_SECTION: &str = "scripts";

lazy_static! {
    // Both spellings of the runtime string lookup.
    static ref LOC_CALL: Regex =
        Regex::new(r#"GetLocStringByKey(?:Ext)?\s*\(\s*"([^"]+)"\s*\)"#).unwrap();
    static ref STRING_LITERAL: Regex = Regex::new(r#""([^"]+)""#).unwrap();
}

/// Keys a script source refers to.
///
/// Arguments of localization lookup calls always count. With a `prefix`
/// filter, any double-quoted literal starting with the prefix counts too;
/// that is how keys passed around as plain strings get picked up.
/// Each key appears once, in first-seen order.
pub fn scan_script(source: &str, prefix: Option<&str>) -> Vec<AbbreviatedRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for cap in LOC_CALL.captures_iter(source) {
        let key = &cap[1];
        if seen.insert(key.to_string()) {
            records.push(AbbreviatedRecord::placeholder(key));
        }
    }
    if let Some(prefix) = prefix {
        for cap in STRING_LITERAL.captures_iter(source) {
            let lit = &cap[1];
            if lit.starts_with(prefix) && seen.insert(lit.to_string()) {
                records.push(AbbreviatedRecord::placeholder(lit));
            }
        }
    }
    records
}

/// Scans a mod directory tree for localization keys.
///
/// `.ws` files feed the script scanner and `.xml` files the menu scanner.
/// Files are visited in name order so repeated runs see the same sequence.
/// Returns the non-empty merge sections, menu first.
pub fn scan_dir(
    root: &Path,
    prefix: Option<&str>,
) -> Result<Vec<(String, Vec<AbbreviatedRecord>)>> {
    let mut menu_records: Vec<AbbreviatedRecord> = Vec::new();
    let mut script_records: Vec<AbbreviatedRecord> = Vec::new();
    let mut seen = HashSet::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        match path.extension().and_then(|s| s.to_str()) {
            Some("ws") => {
                let source = encoding::read_to_string(path)?;
                let found = scan_script(&source, prefix);
                debug!(path = %path.display(), keys = found.len(), "scanned script");
                for rec in found {
                    if seen.insert(rec.key.clone()) {
                        script_records.push(rec);
                    }
                }
            }
            Some("xml") => {
                let source = encoding::read_to_string(path)?;
                let found = menu::scan_menu(&source, prefix)
                    .map_err(|e| e.in_file(path))?;
                debug!(path = %path.display(), keys = found.len(), "scanned menu");
                for rec in found {
                    if seen.insert(rec.key.clone()) {
                        menu_records.push(rec);
                    }
                }
            }
            _ => {}
        }
    }

    let mut sections = Vec::new();
    if !menu_records.is_empty() {
        sections.push((MENU_SECTION.to_string(), menu_records));
    }
    if !script_records.is_empty() {
        sections.push((SCRIPTS_SECTION.to_string(), script_records));
    }
    Ok(sections)
}
