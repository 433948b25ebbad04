//! Core record types for w3kit.
//! Parsers decode into these; the composer and merge engine consume them.

use serde::{Deserialize, Serialize};

/// First id reserved for mod strings, inclusive.
pub const MOD_ID_MIN: u32 = 2_110_000_000;
/// End of the reserved mod id range, exclusive.
pub const MOD_ID_MAX: u32 = 2_120_000_000;
/// Number of ids in one id space.
pub const SPACE_SIZE: u32 = 1_000;
/// Number of id spaces carved out of the mod range.
pub const SPACE_COUNT: u32 = 10_000;

/// Placeholder text for keys discovered by a scanner before anyone wrote
/// the actual string.
pub const MISSING_TEXT: &str = "MISSING_LOCALISATION";

/// Where an id lives relative to the reserved mod range.
///
/// Every id maps to exactly one classification: ids outside
/// `[MOD_ID_MIN, MOD_ID_MAX)` belong to the base game, ids inside belong to
/// one of [`SPACE_COUNT`] disjoint blocks of [`SPACE_SIZE`] ids each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IdSpace {
    /// A base-game id, outside the reserved mod range.
    Vanilla,
    /// A mod-owned id space number, in `0..SPACE_COUNT`.
    Mod(u32),
}

impl IdSpace {
    /// Classifies an id into its id space.
    pub fn classify(id: u32) -> IdSpace {
        if (MOD_ID_MIN..MOD_ID_MAX).contains(&id) {
            IdSpace::Mod((id - MOD_ID_MIN) / SPACE_SIZE)
        } else {
            IdSpace::Vanilla
        }
    }

    /// First id of the given id space.
    pub fn base_id(space: u32) -> u32 {
        MOD_ID_MIN + space * SPACE_SIZE
    }
}

/// A string whose final numeric id is not yet known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbbreviatedRecord {
    pub key: String,
    pub text: String,
}

impl AbbreviatedRecord {
    /// A scanner-discovered key with the placeholder text.
    pub fn placeholder(key: impl Into<String>) -> Self {
        AbbreviatedRecord {
            key: key.into(),
            text: MISSING_TEXT.to_string(),
        }
    }
}

/// A fully resolved string-table row.
///
/// `key_hex` is a secondary hash-like identifier column carried as opaque
/// pass-through text; it is empty when the row was synthesized from an
/// abbreviated record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteRecord {
    pub id: u32,
    pub key_hex: String,
    pub key: String,
    pub text: String,
}

impl CompleteRecord {
    pub fn space(&self) -> IdSpace {
        IdSpace::classify(self.id)
    }
}
