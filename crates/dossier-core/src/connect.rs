//! The contact ledger: standalone entries with no relation to persons.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectFields {
  pub company:  Option<String>,
  pub city:     Option<String>,
  pub fullname: Option<String>,
  pub phone:    Option<String>,
  /// Extension number.
  pub adding:   Option<String>,
  pub mobile:   Option<String>,
  pub mail:     Option<String>,
  pub comment:  Option<String>,
}

/// A persisted ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connect {
  pub id:      i64,
  #[serde(flatten)]
  pub fields:  ConnectFields,
  /// Server-assigned on insert and on every update.
  pub updated: DateTime<Utc>,
}
