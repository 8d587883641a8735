//! Canonical lookup tables and the conclusion phrase policy.
//!
//! Lookup rows are small controlled vocabularies (category, status, region,
//! check conclusion) seeded ahead of time and referenced by foreign key from
//! persons and checks. Callers hold human-readable labels; the store
//! resolves them to row identifiers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// Which lookup table a label belongs to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LookupKind {
  Category,
  Status,
  Region,
  Conclusion,
}

impl LookupKind {
  pub const ALL: [LookupKind; 4] =
    [Self::Category, Self::Status, Self::Region, Self::Conclusion];
}

/// One row of a lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRow {
  pub id:    i64,
  pub label: String,
}

// ─── Conclusions ─────────────────────────────────────────────────────────────

/// The four canonical outcomes of a background check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
  Agreed,
  WithComment,
  Denied,
  Canceled,
}

impl Conclusion {
  pub const ALL: [Conclusion; 4] =
    [Self::Agreed, Self::WithComment, Self::Denied, Self::Canceled];

  /// The label stored in the `conclusions` table for this outcome.
  pub fn label(self) -> &'static str {
    match self {
      Self::Agreed => "СОГЛАСОВАНО",
      Self::WithComment => "СОГЛАСОВАНО С КОММЕНТАРИЕМ",
      Self::Denied => "ОТКАЗАНО В СОГЛАСОВАНИИ",
      Self::Canceled => "ОТМЕНЕНО",
    }
  }

  /// Match an operator-typed phrase against the recognised variants.
  ///
  /// The phrase is lower-cased and compared exactly; no trimming or other
  /// normalisation is applied. Returns `None` for anything unrecognised.
  pub fn match_phrase(phrase: &str) -> Option<Self> {
    match phrase.to_lowercase().as_str() {
      "согласовано" => Some(Self::Agreed),
      "с комментарием" => Some(Self::WithComment),
      "отказ" => Some(Self::Denied),
      _ => None,
    }
  }

  /// Map a free-text phrase onto a canonical outcome.
  ///
  /// Unrecognised text (including typos and the canonical labels of the
  /// longer outcomes) maps to [`Conclusion::Canceled`]. This fallback is
  /// intentional: a resolved conclusion is always one of the four outcomes,
  /// never "not found".
  pub fn from_phrase(phrase: &str) -> Self {
    Self::match_phrase(phrase).unwrap_or(Self::Canceled)
  }
}
