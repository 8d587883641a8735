//! Dependent records: everything a person owns.
//!
//! Every dependent row references exactly one person and cannot outlive it.
//! The record kinds are closed: [`DependentValue`] carries the typed payload
//! and its variant doubles as the [`DependentKind`] discriminant.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// The nine dependent collections of a person.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DependentKind {
  Staff,
  Document,
  Address,
  Workplace,
  Contact,
  Affiliation,
  Check,
  Robot,
  Inquiry,
}

impl DependentKind {
  pub const ALL: [DependentKind; 9] = [
    Self::Staff,
    Self::Document,
    Self::Address,
    Self::Workplace,
    Self::Contact,
    Self::Affiliation,
    Self::Check,
    Self::Robot,
    Self::Inquiry,
  ];
}

// ─── Payloads ────────────────────────────────────────────────────────────────

/// A staff position the person is being vetted for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
  pub position:   Option<String>,
  pub department: Option<String>,
}

/// An identity document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  /// Document type, e.g. "паспорт".
  pub view:   Option<String>,
  pub series: Option<String>,
  pub number: Option<String>,
  /// Issuing agency.
  pub agency: Option<String>,
  pub issue:  Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  /// Registration, residence, etc.
  pub view:    Option<String>,
  pub region:  Option<String>,
  pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  /// Phone, email, messenger, ...
  pub view:    Option<String>,
  pub contact: Option<String>,
}

/// A past or present employment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workplace {
  pub start_date: Option<NaiveDate>,
  pub end_date:   Option<NaiveDate>,
  pub workplace:  Option<String>,
  pub address:    Option<String>,
  pub position:   Option<String>,
  /// Reason for leaving.
  pub reason:     Option<String>,
}

/// Participation in an organisation (founder, director, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
  pub view:     Option<String>,
  pub name:     Option<String>,
  pub inn:      Option<String>,
  pub position: Option<String>,
  /// Defaults to the insert date when not supplied.
  pub deadline: Option<NaiveDate>,
}

/// The outcome of a manual background check.
///
/// Each free-text field holds the finding for one investigative category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
  pub workplace:     Option<String>,
  pub document:      Option<String>,
  pub inn:           Option<String>,
  pub debt:          Option<String>,
  pub bankruptcy:    Option<String>,
  /// Credit history bureau.
  pub bki:           Option<String>,
  pub courts:        Option<String>,
  pub affiliation:   Option<String>,
  pub terrorist:     Option<String>,
  /// Police records.
  pub mvd:           Option<String>,
  pub internet:      Option<String>,
  pub cronos:        Option<String>,
  pub cros:          Option<String>,
  pub addition:      Option<String>,
  /// Polygraph examination passed.
  pub pfo:           Option<bool>,
  pub comments:      Option<String>,
  /// Row id in the `conclusions` lookup table.
  pub conclusion_id: Option<i64>,
  pub officer:       Option<String>,
  /// Assigned by the store on insert and on every update; any value
  /// supplied by the caller is overwritten.
  pub deadline:      Option<DateTime<Utc>>,
}

/// The result of an automated check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
  pub employee:   Option<String>,
  pub inn:        Option<String>,
  pub bankruptcy: Option<String>,
  pub bki:        Option<String>,
  pub courts:     Option<String>,
  pub terrorist:  Option<String>,
  pub mvd:        Option<String>,
  /// Defaults to the insert date when not supplied.
  pub deadline:   Option<NaiveDate>,
}

/// An external inquiry about the person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
  pub info:      Option<String>,
  pub initiator: Option<String>,
  pub source:    Option<String>,
  pub officer:   Option<String>,
  /// Defaults to the insert date when not supplied.
  pub deadline:  Option<NaiveDate>,
}

// ─── DependentValue ──────────────────────────────────────────────────────────

/// The typed payload of a dependent record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum DependentValue {
  Staff(Staff),
  Document(Document),
  Address(Address),
  Workplace(Workplace),
  Contact(Contact),
  Affiliation(Affiliation),
  Check(Check),
  Robot(Robot),
  Inquiry(Inquiry),
}

/// Whether a write creates or modifies a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
  Insert,
  Update,
}

impl DependentValue {
  pub fn kind(&self) -> DependentKind {
    match self {
      Self::Staff(_) => DependentKind::Staff,
      Self::Document(_) => DependentKind::Document,
      Self::Address(_) => DependentKind::Address,
      Self::Workplace(_) => DependentKind::Workplace,
      Self::Contact(_) => DependentKind::Contact,
      Self::Affiliation(_) => DependentKind::Affiliation,
      Self::Check(_) => DependentKind::Check,
      Self::Robot(_) => DependentKind::Robot,
      Self::Inquiry(_) => DependentKind::Inquiry,
    }
  }

  /// Apply the write-time timestamp rules for a write happening at `now`.
  ///
  /// - a check's `deadline` is reassigned on every write;
  /// - affiliation, robot and inquiry deadlines default to the insert date
  ///   and are left as supplied on update.
  pub fn stamp(&mut self, write: WriteKind, now: DateTime<Utc>) {
    match self {
      Self::Check(c) => c.deadline = Some(now),
      Self::Affiliation(Affiliation { deadline, .. })
      | Self::Robot(Robot { deadline, .. })
      | Self::Inquiry(Inquiry { deadline, .. })
        if write == WriteKind::Insert =>
      {
        deadline.get_or_insert(now.date_naive());
      }
      _ => {}
    }
  }
}

/// A persisted dependent record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
  pub id:        i64,
  pub person_id: i64,
  pub value:     DependentValue,
}

impl Dependent {
  pub fn kind(&self) -> DependentKind { self.value.kind() }
}
