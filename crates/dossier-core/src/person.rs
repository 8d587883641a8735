//! Person, the aggregate root of the registry.
//!
//! A person owns nine dependent collections (see [`crate::dependent`]).
//! The collections are never materialised on the person itself; they are
//! queried by `person_id`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Column width of the SNILS insurance number, not counting the separators
/// of its printed form (`123-456-789 01`).
pub const SNILS_MAX_LEN: usize = 11;
/// Column width of the INN tax number.
pub const INN_MAX_LEN: usize = 12;

// ─── Input ───────────────────────────────────────────────────────────────────

/// The caller-editable fields of a person. Used both to create and to
/// replace a person's fields; timestamps are never part of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFields {
  /// Row id in the `categories` lookup table.
  pub category_id: Option<i64>,
  /// Row id in the `regions` lookup table.
  pub region_id:   Option<i64>,
  /// Row id in the `statuses` lookup table.
  pub status_id:   Option<i64>,
  pub fullname:    String,
  /// Former names, free text.
  pub previous:    Option<String>,
  pub birthday:    NaiveDate,
  pub birthplace:  Option<String>,
  pub country:     Option<String>,
  pub ext_country: Option<String>,
  pub snils:       Option<String>,
  pub inn:         Option<String>,
  pub education:   Option<String>,
  pub marital:     Option<String>,
  pub addition:    Option<String>,
  /// Location of the person's document folder.
  pub path:        Option<String>,
}

impl PersonFields {
  /// Convenience constructor with every optional field unset.
  pub fn new(fullname: impl Into<String>, birthday: NaiveDate) -> Self {
    Self {
      category_id: None,
      region_id: None,
      status_id: None,
      fullname: fullname.into(),
      previous: None,
      birthday,
      birthplace: None,
      country: None,
      ext_country: None,
      snils: None,
      inn: None,
      education: None,
      marital: None,
      addition: None,
      path: None,
    }
  }

  /// Reject values the schema cannot hold.
  pub fn validate(&self) -> Result<()> {
    if self.fullname.trim().is_empty() {
      return Err(Error::InvalidField {
        field:  "fullname",
        reason: "must not be blank".into(),
      });
    }
    let snils = self.snils.as_deref().map(|v| {
      v.chars().filter(|c| *c != '-' && !c.is_whitespace()).count()
    });
    check_width("snils", snils, SNILS_MAX_LEN)?;
    check_width("inn", self.inn.as_deref().map(|v| v.chars().count()), INN_MAX_LEN)?;
    Ok(())
  }
}

fn check_width(field: &'static str, width: Option<usize>, max: usize) -> Result<()> {
  match width {
    Some(w) if w > max => Err(Error::InvalidField {
      field,
      reason: format!("longer than {max} characters"),
    }),
    _ => Ok(()),
  }
}

// ─── Stored ──────────────────────────────────────────────────────────────────

/// A persisted person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:      i64,
  #[serde(flatten)]
  pub fields:  PersonFields,
  /// Server-assigned on insert; never changes afterwards.
  pub created: DateTime<Utc>,
  /// Server-assigned on every update; `None` until the first update.
  pub updated: Option<DateTime<Utc>>,
}
