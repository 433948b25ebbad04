//! Non-destructive growth of an existing annotated string table.
//!
//! Scanners discover keys faster than anyone writes the strings for them,
//! so the working table is annotated with `;section=` markers and new keys
//! are folded in under the right marker without touching anything else.
//! Re-running a scan never duplicates an entry.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::csv::{Line, SECTION_KEY, classify};
use crate::encoding;
use crate::error::{Error, Result};
use crate::traits::Serializer;
use crate::types::AbbreviatedRecord;

/// A line-addressable model of an existing annotated document.
///
/// The whole file is read up front; insertions splice into the line buffer
/// and nothing is written until [`MergeDocument::save`]. Every original
/// line survives verbatim, including malformed ones: this parse is
/// best-effort and never rejects a file.
#[derive(Debug)]
pub struct MergeDocument {
    path: PathBuf,
    lines: Vec<String>,
    keys: HashSet<String>,
}

impl MergeDocument {
    /// Opens `path` for merging, or synthesizes a fresh document when the
    /// file does not exist yet. The fresh header deliberately declares an
    /// unknown id space so a later encode pass fails until the author picks
    /// one.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let lines: Vec<String> = if path.exists() {
            encoding::read_to_string(&path)?
                .lines()
                .map(String::from)
                .collect()
        } else {
            info!(path = %path.display(), "target does not exist, starting a fresh document");
            vec![
                ";idspace=?".to_string(),
                "; pick your mod's id space before encoding".to_string(),
            ]
        };

        let mut keys = HashSet::new();
        for line in &lines {
            match classify(line) {
                Ok(Some(Line::Abbreviated(rec))) => {
                    keys.insert(rec.key);
                }
                Ok(Some(Line::Complete(rec))) => {
                    keys.insert(rec.key);
                }
                // Comments, attributes, blanks, and lines this parse cannot
                // make sense of are all preserved as-is.
                _ => {}
            }
        }

        Ok(MergeDocument { path, lines, keys })
    }

    /// Whether any record in the document already uses `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Inserts `records` at the end of the named section, appending a new
    /// section marker when none exists. Records whose key is already
    /// present anywhere in the document are dropped. Returns how many lines
    /// were actually inserted.
    pub fn insert(&mut self, section: &str, records: &[AbbreviatedRecord]) -> usize {
        let mut fresh: Vec<&AbbreviatedRecord> = Vec::new();
        for rec in records {
            if self.keys.contains(&rec.key) {
                debug!(key = %rec.key, "key already present, skipping");
                continue;
            }
            self.keys.insert(rec.key.clone());
            fresh.push(rec);
        }
        if fresh.is_empty() {
            return 0;
        }

        let at = self.insertion_point(section);
        let tail = self.lines.split_off(at);
        self.lines
            .extend(fresh.iter().map(|rec| format!("{}|{}", rec.key, rec.text)));
        self.lines.extend(tail);
        fresh.len()
    }

    /// End of the named section: just before the next section marker, or
    /// end-of-file for the last section. Appends a marker when the section
    /// is missing.
    fn insertion_point(&mut self, section: &str) -> usize {
        let markers: Vec<(usize, String)> = self
            .lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| match classify(line) {
                Ok(Some(line)) => line.section_name().map(|name| (idx, name.to_string())),
                _ => None,
            })
            .collect();

        if let Some(position) = markers.iter().position(|(_, name)| name == section) {
            match markers.get(position + 1) {
                Some((next_marker, _)) => *next_marker,
                None => self.lines.len(),
            }
        } else {
            self.lines.push(format!(";{SECTION_KEY}={section}"));
            self.lines.len()
        }
    }

    /// Writes the document back to the path it was opened from.
    pub fn save(&self) -> Result<()> {
        self.write_to(&self.path)
    }

    /// The path this document was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Serializer for MergeDocument {
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        let mut content = self.lines.join("\n");
        content.push('\n');
        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }

    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // No atomic rename here: reads happen entirely before write-back,
        // so a crash before this point leaves the original untouched.
        let file = fs::File::create(path)?;
        self.to_writer(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::tempdir;

    const EXISTING: &str = indoc! {"
        ;idspace=42
        ;section=menu
        menu_title|Mod Settings
        ;section=scripts
        greet|Hello
        ;section=bundle
        item_sword|Sword
    "};

    fn doc_with(content: &str) -> (tempfile::TempDir, MergeDocument) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("strings.en.csv");
        fs::write(&path, content).unwrap();
        let doc = MergeDocument::open(&path).unwrap();
        (dir, doc)
    }

    #[test]
    fn test_insert_into_middle_section() {
        let (_dir, mut doc) = doc_with(EXISTING);
        let inserted = doc.insert(
            "scripts",
            &[AbbreviatedRecord::placeholder("farewell")],
        );
        assert_eq!(inserted, 1);
        doc.save().unwrap();

        let text = fs::read_to_string(doc.path()).unwrap();
        assert_eq!(
            text,
            indoc! {"
                ;idspace=42
                ;section=menu
                menu_title|Mod Settings
                ;section=scripts
                greet|Hello
                farewell|MISSING_LOCALISATION
                ;section=bundle
                item_sword|Sword
            "}
        );
    }

    #[test]
    fn test_insert_into_last_section_lands_at_eof() {
        let (_dir, mut doc) = doc_with(EXISTING);
        doc.insert("bundle", &[AbbreviatedRecord::placeholder("item_axe")]);
        doc.save().unwrap();

        let text = fs::read_to_string(doc.path()).unwrap();
        assert!(text.ends_with("item_sword|Sword\nitem_axe|MISSING_LOCALISATION\n"));
    }

    #[test]
    fn test_missing_section_appended() {
        let (_dir, mut doc) = doc_with(EXISTING);
        doc.insert("quests", &[AbbreviatedRecord::placeholder("quest_intro")]);
        doc.save().unwrap();

        let text = fs::read_to_string(doc.path()).unwrap();
        assert!(text.ends_with(";section=quests\nquest_intro|MISSING_LOCALISATION\n"));
    }

    #[test]
    fn test_duplicate_keys_are_dropped() {
        let (_dir, mut doc) = doc_with(EXISTING);
        // `greet` is in scripts, `item_sword` in bundle; both suppressed no
        // matter which section the candidate targets.
        let inserted = doc.insert(
            "scripts",
            &[
                AbbreviatedRecord::placeholder("greet"),
                AbbreviatedRecord::placeholder("item_sword"),
                AbbreviatedRecord::placeholder("brand_new"),
            ],
        );
        assert_eq!(inserted, 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let (_dir, mut doc) = doc_with(EXISTING);
        let candidates = vec![
            AbbreviatedRecord::placeholder("farewell"),
            AbbreviatedRecord::placeholder("thanks"),
        ];
        doc.insert("scripts", &candidates);
        doc.save().unwrap();
        let once = fs::read_to_string(doc.path()).unwrap();

        // Same candidates again, both in-memory and from a reopened file.
        doc.insert("scripts", &candidates);
        doc.save().unwrap();
        let mut reopened = MergeDocument::open(doc.path()).unwrap();
        reopened.insert("scripts", &candidates);
        reopened.save().unwrap();

        let twice = fs::read_to_string(doc.path()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unrelated_sections_untouched() {
        let (_dir, mut doc) = doc_with(EXISTING);
        doc.insert("scripts", &[AbbreviatedRecord::placeholder("farewell")]);
        doc.save().unwrap();

        let text = fs::read_to_string(doc.path()).unwrap();
        let menu_at = text.find(";section=menu").unwrap();
        let scripts_at = text.find(";section=scripts").unwrap();
        let bundle_at = text.find(";section=bundle").unwrap();
        let inserted_at = text.find("farewell|").unwrap();

        assert!(menu_at < scripts_at);
        assert!(scripts_at < inserted_at);
        assert!(inserted_at < bundle_at);
        assert!(text.contains("menu_title|Mod Settings"));
        assert!(text.contains("item_sword|Sword"));
    }

    #[test]
    fn test_malformed_lines_preserved_verbatim() {
        let content = indoc! {"
            ;section=scripts
            greet|Hello
            this line | has | too | many | columns
        "};
        let (_dir, mut doc) = doc_with(content);
        doc.insert("scripts", &[AbbreviatedRecord::placeholder("farewell")]);
        doc.save().unwrap();

        let text = fs::read_to_string(doc.path()).unwrap();
        assert!(text.contains("this line | has | too | many | columns"));
    }

    #[test]
    fn test_fresh_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("strings.en.csv");
        let mut doc = MergeDocument::open(&path).unwrap();
        doc.insert("menu", &[AbbreviatedRecord::placeholder("menu_title")]);
        doc.insert("scripts", &[AbbreviatedRecord::placeholder("greet")]);
        doc.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            indoc! {"
                ;idspace=?
                ; pick your mod's id space before encoding
                ;section=menu
                menu_title|MISSING_LOCALISATION
                ;section=scripts
                greet|MISSING_LOCALISATION
            "}
        );
    }

    #[test]
    fn test_utf16_input_written_back_as_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("strings.en.csv");
        let mut bytes = vec![0xFF, 0xFE];
        for unit in ";section=scripts\ngreet|Witaj\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&path, &bytes).unwrap();

        let mut doc = MergeDocument::open(&path).unwrap();
        doc.insert("scripts", &[AbbreviatedRecord::placeholder("farewell")]);
        doc.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(";section=scripts\ngreet|Witaj\n"));
        assert!(doc.contains_key("greet"));
    }
}
