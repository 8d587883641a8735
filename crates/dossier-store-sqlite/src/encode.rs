//! Encoding and decoding helpers between Rust domain types and the plain
//! SQLite column values.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as
//! `YYYY-MM-DD`, flags as `0`/`1`. Column lists are positional: the encoder
//! and the decoder for a table walk the same list in the same order.

use chrono::{DateTime, NaiveDate, Utc};
use dossier_core::{
  connect::{Connect, ConnectFields},
  dependent::{
    Address, Affiliation, Check, Contact, Dependent, DependentKind,
    DependentValue, Document, Inquiry, Robot, Staff, Workplace,
  },
  lookup::LookupKind,
  person::{Person, PersonFields},
};
use rusqlite::types::Value;

use crate::{Error, Result};

// ─── Tables ──────────────────────────────────────────────────────────────────

pub fn lookup_table(kind: LookupKind) -> &'static str {
  match kind {
    LookupKind::Category => "categories",
    LookupKind::Status => "statuses",
    LookupKind::Region => "regions",
    LookupKind::Conclusion => "conclusions",
  }
}

pub fn dependent_table(kind: DependentKind) -> &'static str {
  match kind {
    DependentKind::Staff => "staffs",
    DependentKind::Document => "documents",
    DependentKind::Address => "addresses",
    DependentKind::Workplace => "workplaces",
    DependentKind::Contact => "contacts",
    DependentKind::Affiliation => "affiliations",
    DependentKind::Check => "checks",
    DependentKind::Robot => "robots",
    DependentKind::Inquiry => "inquiries",
  }
}

// ─── Columns ─────────────────────────────────────────────────────────────────

/// Caller-editable `persons` columns (excludes `id`, `created`, `updated`).
pub const PERSON_COLUMNS: &[&str] = &[
  "category_id",
  "region_id",
  "status_id",
  "fullname",
  "previous",
  "birthday",
  "birthplace",
  "country",
  "ext_country",
  "snils",
  "inn",
  "education",
  "marital",
  "addition",
  "path",
];

/// Caller-editable `connects` columns (excludes `id`, `updated`).
pub const CONNECT_COLUMNS: &[&str] = &[
  "company", "city", "fullname", "phone", "adding", "mobile", "mail", "comment",
];

/// Payload columns of a dependent table (excludes `id`, `person_id`).
pub fn dependent_columns(kind: DependentKind) -> &'static [&'static str] {
  match kind {
    DependentKind::Staff => &["position", "department"],
    DependentKind::Document => &["view", "series", "number", "agency", "issue"],
    DependentKind::Address => &["view", "region", "address"],
    DependentKind::Workplace => &[
      "start_date", "end_date", "workplace", "address", "position", "reason",
    ],
    DependentKind::Contact => &["view", "contact"],
    DependentKind::Affiliation => {
      &["view", "name", "inn", "position", "deadline"]
    }
    DependentKind::Check => &[
      "workplace",
      "document",
      "inn",
      "debt",
      "bankruptcy",
      "bki",
      "courts",
      "affiliation",
      "terrorist",
      "mvd",
      "internet",
      "cronos",
      "cros",
      "addition",
      "pfo",
      "comments",
      "conclusion_id",
      "officer",
      "deadline",
    ],
    DependentKind::Robot => &[
      "employee",
      "inn",
      "bankruptcy",
      "bki",
      "courts",
      "terrorist",
      "mvd",
      "deadline",
    ],
    DependentKind::Inquiry => {
      &["info", "initiator", "source", "officer", "deadline"]
    }
  }
}

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

fn text(v: &Option<String>) -> Value {
  v.clone().map_or(Value::Null, Value::Text)
}

fn int(v: Option<i64>) -> Value { v.map_or(Value::Null, Value::Integer) }

fn flag(v: Option<bool>) -> Value {
  v.map_or(Value::Null, |b| Value::Integer(i64::from(b)))
}

fn date(v: Option<NaiveDate>) -> Value {
  v.map_or(Value::Null, |d| Value::Text(encode_date(d)))
}

fn instant(v: Option<DateTime<Utc>>) -> Value {
  v.map_or(Value::Null, |dt| Value::Text(encode_dt(dt)))
}

// ─── Encoders ────────────────────────────────────────────────────────────────

/// Values for [`PERSON_COLUMNS`], in order.
pub fn encode_person(f: &PersonFields) -> Vec<Value> {
  vec![
    int(f.category_id),
    int(f.region_id),
    int(f.status_id),
    Value::Text(f.fullname.clone()),
    text(&f.previous),
    Value::Text(encode_date(f.birthday)),
    text(&f.birthplace),
    text(&f.country),
    text(&f.ext_country),
    text(&f.snils),
    text(&f.inn),
    text(&f.education),
    text(&f.marital),
    text(&f.addition),
    text(&f.path),
  ]
}

/// Values for [`CONNECT_COLUMNS`], in order.
pub fn encode_connect(f: &ConnectFields) -> Vec<Value> {
  vec![
    text(&f.company),
    text(&f.city),
    text(&f.fullname),
    text(&f.phone),
    text(&f.adding),
    text(&f.mobile),
    text(&f.mail),
    text(&f.comment),
  ]
}

/// Values for [`dependent_columns`] of the value's kind, in order.
pub fn encode_dependent(value: &DependentValue) -> Vec<Value> {
  match value {
    DependentValue::Staff(v) => vec![text(&v.position), text(&v.department)],
    DependentValue::Document(v) => vec![
      text(&v.view),
      text(&v.series),
      text(&v.number),
      text(&v.agency),
      date(v.issue),
    ],
    DependentValue::Address(v) => {
      vec![text(&v.view), text(&v.region), text(&v.address)]
    }
    DependentValue::Workplace(v) => vec![
      date(v.start_date),
      date(v.end_date),
      text(&v.workplace),
      text(&v.address),
      text(&v.position),
      text(&v.reason),
    ],
    DependentValue::Contact(v) => vec![text(&v.view), text(&v.contact)],
    DependentValue::Affiliation(v) => vec![
      text(&v.view),
      text(&v.name),
      text(&v.inn),
      text(&v.position),
      date(v.deadline),
    ],
    DependentValue::Check(v) => vec![
      text(&v.workplace),
      text(&v.document),
      text(&v.inn),
      text(&v.debt),
      text(&v.bankruptcy),
      text(&v.bki),
      text(&v.courts),
      text(&v.affiliation),
      text(&v.terrorist),
      text(&v.mvd),
      text(&v.internet),
      text(&v.cronos),
      text(&v.cros),
      text(&v.addition),
      flag(v.pfo),
      text(&v.comments),
      int(v.conclusion_id),
      text(&v.officer),
      instant(v.deadline),
    ],
    DependentValue::Robot(v) => vec![
      text(&v.employee),
      text(&v.inn),
      text(&v.bankruptcy),
      text(&v.bki),
      text(&v.courts),
      text(&v.terrorist),
      text(&v.mvd),
      date(v.deadline),
    ],
    DependentValue::Inquiry(v) => vec![
      text(&v.info),
      text(&v.initiator),
      text(&v.source),
      text(&v.officer),
      date(v.deadline),
    ],
  }
}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Read `n` consecutive columns starting at `offset` as raw values.
pub fn read_cells(
  row: &rusqlite::Row<'_>,
  offset: usize,
  n: usize,
) -> rusqlite::Result<Vec<Value>> {
  (offset..offset + n).map(|i| row.get::<_, Value>(i)).collect()
}

/// A positional cursor over the raw values of one row.
struct Cells(std::vec::IntoIter<Value>);

impl Cells {
  fn new(values: Vec<Value>) -> Self { Self(values.into_iter()) }

  fn next(&mut self) -> Value { self.0.next().unwrap_or(Value::Null) }

  fn text(&mut self) -> Result<Option<String>> {
    match self.next() {
      Value::Null => Ok(None),
      Value::Text(s) => Ok(Some(s)),
      other => Err(Error::Decode(format!("expected text, found {other:?}"))),
    }
  }

  fn required_text(&mut self) -> Result<String> {
    self
      .text()?
      .ok_or_else(|| Error::Decode("unexpected NULL in NOT NULL column".into()))
  }

  fn int(&mut self) -> Result<Option<i64>> {
    match self.next() {
      Value::Null => Ok(None),
      Value::Integer(i) => Ok(Some(i)),
      other => {
        Err(Error::Decode(format!("expected integer, found {other:?}")))
      }
    }
  }

  fn flag(&mut self) -> Result<Option<bool>> {
    Ok(self.int()?.map(|i| i != 0))
  }

  fn date(&mut self) -> Result<Option<NaiveDate>> {
    self.text()?.as_deref().map(decode_date).transpose()
  }

  fn instant(&mut self) -> Result<Option<DateTime<Utc>>> {
    self.text()?.as_deref().map(decode_dt).transpose()
  }
}

fn decode_person_fields(c: &mut Cells) -> Result<PersonFields> {
  Ok(PersonFields {
    category_id: c.int()?,
    region_id:   c.int()?,
    status_id:   c.int()?,
    fullname:    c.required_text()?,
    previous:    c.text()?,
    birthday:    decode_date(&c.required_text()?)?,
    birthplace:  c.text()?,
    country:     c.text()?,
    ext_country: c.text()?,
    snils:       c.text()?,
    inn:         c.text()?,
    education:   c.text()?,
    marital:     c.text()?,
    addition:    c.text()?,
    path:        c.text()?,
  })
}

fn decode_dependent(kind: DependentKind, c: &mut Cells) -> Result<DependentValue> {
  Ok(match kind {
    DependentKind::Staff => DependentValue::Staff(Staff {
      position:   c.text()?,
      department: c.text()?,
    }),
    DependentKind::Document => DependentValue::Document(Document {
      view:   c.text()?,
      series: c.text()?,
      number: c.text()?,
      agency: c.text()?,
      issue:  c.date()?,
    }),
    DependentKind::Address => DependentValue::Address(Address {
      view:    c.text()?,
      region:  c.text()?,
      address: c.text()?,
    }),
    DependentKind::Workplace => DependentValue::Workplace(Workplace {
      start_date: c.date()?,
      end_date:   c.date()?,
      workplace:  c.text()?,
      address:    c.text()?,
      position:   c.text()?,
      reason:     c.text()?,
    }),
    DependentKind::Contact => DependentValue::Contact(Contact {
      view:    c.text()?,
      contact: c.text()?,
    }),
    DependentKind::Affiliation => DependentValue::Affiliation(Affiliation {
      view:     c.text()?,
      name:     c.text()?,
      inn:      c.text()?,
      position: c.text()?,
      deadline: c.date()?,
    }),
    DependentKind::Check => DependentValue::Check(Check {
      workplace:     c.text()?,
      document:      c.text()?,
      inn:           c.text()?,
      debt:          c.text()?,
      bankruptcy:    c.text()?,
      bki:           c.text()?,
      courts:        c.text()?,
      affiliation:   c.text()?,
      terrorist:     c.text()?,
      mvd:           c.text()?,
      internet:      c.text()?,
      cronos:        c.text()?,
      cros:          c.text()?,
      addition:      c.text()?,
      pfo:           c.flag()?,
      comments:      c.text()?,
      conclusion_id: c.int()?,
      officer:       c.text()?,
      deadline:      c.instant()?,
    }),
    DependentKind::Robot => DependentValue::Robot(Robot {
      employee:   c.text()?,
      inn:        c.text()?,
      bankruptcy: c.text()?,
      bki:        c.text()?,
      courts:     c.text()?,
      terrorist:  c.text()?,
      mvd:        c.text()?,
      deadline:   c.date()?,
    }),
    DependentKind::Inquiry => DependentValue::Inquiry(Inquiry {
      info:      c.text()?,
      initiator: c.text()?,
      source:    c.text()?,
      officer:   c.text()?,
      deadline:  c.date()?,
    }),
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// A `persons` row: `id`, then [`PERSON_COLUMNS`], `created`, `updated`.
pub struct RawPerson {
  pub id:    i64,
  pub cells: Vec<Value>,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    let mut c = Cells::new(self.cells);
    let fields = decode_person_fields(&mut c)?;
    let created = decode_dt(&c.required_text()?)?;
    let updated = c.instant()?;
    Ok(Person { id: self.id, fields, created, updated })
  }
}

/// A dependent row: `id`, `person_id`, then [`dependent_columns`].
pub struct RawDependent {
  pub id:        i64,
  pub person_id: i64,
  pub cells:     Vec<Value>,
}

impl RawDependent {
  pub fn into_dependent(self, kind: DependentKind) -> Result<Dependent> {
    let value = decode_dependent(kind, &mut Cells::new(self.cells))?;
    Ok(Dependent { id: self.id, person_id: self.person_id, value })
  }
}

/// A `connects` row: `id`, then [`CONNECT_COLUMNS`], `updated`.
pub struct RawConnect {
  pub id:    i64,
  pub cells: Vec<Value>,
}

impl RawConnect {
  pub fn into_connect(self) -> Result<Connect> {
    let mut c = Cells::new(self.cells);
    let fields = ConnectFields {
      company:  c.text()?,
      city:     c.text()?,
      fullname: c.text()?,
      phone:    c.text()?,
      adding:   c.text()?,
      mobile:   c.text()?,
      mail:     c.text()?,
      comment:  c.text()?,
    };
    let updated = decode_dt(&c.required_text()?)?;
    Ok(Connect { id: self.id, fields, updated })
  }
}
