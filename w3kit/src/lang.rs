//! Supported game languages and their encoder metadata tags.
//!
//! The encoder keys each compiled table to a language-metadata tag written
//! into the document header. Most languages use their own code as the tag;
//! a few Latin-script additions share the `cleartext` variant.

use std::path::Path;

/// Every language the game ships string tables for.
pub const ALL_LANGS: [&str; 17] = [
    "an", "br", "cn", "cz", "de", "en", "es", "esmx", "fr", "hu", "it", "jp", "kr", "pl", "ru",
    "tr", "zh",
];

/// Shared metadata tag for languages without a dedicated encoder variant.
pub const CLEARTEXT: &str = "cleartext";

/// Fallback language and metadata tag when nothing can be deduced.
pub const DEFAULT_LANG: &str = "en";

/// Languages that collapse to the shared cleartext variant.
const CLEARTEXT_LANGS: [&str; 4] = ["an", "br", "esmx", "tr"];

/// Whether `lang` is one of the supported game languages.
pub fn is_supported(lang: &str) -> bool {
    ALL_LANGS.contains(&lang)
}

/// Language-metadata tag for a supported language, `None` otherwise.
pub fn meta_for(lang: &str) -> Option<&'static str> {
    if CLEARTEXT_LANGS.contains(&lang) {
        return Some(CLEARTEXT);
    }
    ALL_LANGS.iter().find(|&&l| l == lang).copied()
}

/// Whether `tag` is a legal language-metadata value.
pub fn is_valid_meta(tag: &str) -> bool {
    tag == CLEARTEXT || ALL_LANGS.iter().any(|&l| meta_for(l) == Some(tag))
}

/// All legal metadata tags, for error messages.
pub fn legal_metas() -> Vec<&'static str> {
    let mut tags = vec![CLEARTEXT];
    tags.extend(ALL_LANGS.iter().copied().filter(|l| meta_for(l) != Some(CLEARTEXT)));
    tags
}

/// Target language implied by a metadata tag. The tag doubles as a language
/// code except for the shared cleartext variant, which implies nothing.
pub fn lang_for_meta(tag: &str) -> Option<&'static str> {
    if tag == CLEARTEXT {
        return None;
    }
    ALL_LANGS.iter().find(|&&l| l == tag).copied()
}

/// Deduces the target language from a file name.
///
/// Scans dot-delimited name components left to right, excluding the
/// extension; the first component that is a known language code wins.
/// `mymod.pl.csv` deduces `pl`, `en.csv` deduces `en`, `strings.csv`
/// deduces nothing.
pub fn deduce_from_filename(path: &Path) -> Option<&'static str> {
    let name = path.file_name()?.to_str()?;
    let components: Vec<&str> = name.split('.').collect();
    let without_ext = if components.len() > 1 {
        &components[..components.len() - 1]
    } else {
        &components[..]
    };
    without_ext
        .iter()
        .find_map(|part| ALL_LANGS.iter().find(|&&l| l == *part).copied())
}
