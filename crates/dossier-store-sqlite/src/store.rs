//! [`SqliteStore`], the SQLite implementation of [`RegistryStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use dossier_core::{
  connect::{Connect, ConnectFields},
  dependent::{Dependent, DependentKind, DependentValue, WriteKind},
  dossier::Dossier,
  lookup::{Conclusion, LookupKind, LookupRow},
  person::{Person, PersonFields},
  stamp::next_stamp,
  store::RegistryStore,
};
use rusqlite::{OptionalExtension as _, params_from_iter, types::Value};

use crate::{
  Error, Result,
  config::{Seed, StoreConfig},
  encode::{
    CONNECT_COLUMNS, PERSON_COLUMNS, RawConnect, RawDependent, RawPerson,
    decode_dt, dependent_columns, dependent_table, encode_connect,
    encode_dependent, encode_dt, encode_person, lookup_table, read_cells,
  },
  schema::SCHEMA,
};

// ─── SQL helpers ─────────────────────────────────────────────────────────────

/// `?{start}, ?{start+1}, ...` for `n` parameters.
fn placeholders(start: usize, n: usize) -> String {
  (start..start + n)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ")
}

/// `col_a = ?1, col_b = ?2, ...`
fn assignments(columns: &[&str]) -> String {
  columns
    .iter()
    .enumerate()
    .map(|(i, c)| format!("{c} = ?{}", i + 1))
    .collect::<Vec<_>>()
    .join(", ")
}

fn person_select() -> String {
  format!("SELECT id, {}, created, updated FROM persons", PERSON_COLUMNS.join(", "))
}

fn read_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPerson> {
  Ok(RawPerson {
    id:    row.get(0)?,
    cells: read_cells(row, 1, PERSON_COLUMNS.len() + 2)?,
  })
}

fn dependent_select(kind: DependentKind) -> String {
  format!(
    "SELECT id, person_id, {} FROM {}",
    dependent_columns(kind).join(", "),
    dependent_table(kind),
  )
}

fn read_dependent(
  kind: DependentKind,
) -> impl Fn(&rusqlite::Row<'_>) -> rusqlite::Result<RawDependent> {
  move |row| {
    Ok(RawDependent {
      id:        row.get(0)?,
      person_id: row.get(1)?,
      cells:     read_cells(row, 2, dependent_columns(kind).len())?,
    })
  }
}

fn connect_select() -> String {
  format!("SELECT id, {}, updated FROM connects", CONNECT_COLUMNS.join(", "))
}

fn read_connect(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawConnect> {
  Ok(RawConnect {
    id:    row.get(0)?,
    cells: read_cells(row, 1, CONNECT_COLUMNS.len() + 1)?,
  })
}

/// The next `updated` stamp for a row whose stored stamps are `previous`
/// and `floor`. A row that was never updated is ordered after `floor`.
fn next_update(previous: Option<&str>, floor: Option<&str>) -> Result<DateTime<Utc>> {
  let previous = previous.or(floor).map(decode_dt).transpose()?;
  Ok(next_stamp(previous, Utc::now()))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Dossier registry backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All calls
/// are serialised onto the connection's dedicated thread; multi-statement
/// writes run inside a transaction.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened dossier store");
    Ok(store)
  }

  /// Open a private in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open the store described by `config` and apply its seed data.
  pub async fn open_with_config(config: &StoreConfig) -> Result<Self> {
    let store = Self::open(config.store_path()).await?;
    store.seed_lookups(&config.seed).await?;
    if config.seed_conclusions {
      store.seed_conclusions().await?;
    }
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert every seed label that is not yet present, in one transaction.
  /// Returns the number of rows inserted.
  pub async fn seed_lookups(&self, seed: &Seed) -> Result<usize> {
    let plan: Vec<(&'static str, Vec<String>)> = LookupKind::ALL
      .into_iter()
      .map(|kind| (lookup_table(kind), seed.labels(kind).to_vec()))
      .filter(|(_, labels)| !labels.is_empty())
      .collect();
    self.insert_missing_labels(plan).await
  }

  /// Insert whichever of the four canonical conclusion rows are missing.
  /// Returns the number of rows inserted.
  pub async fn seed_conclusions(&self) -> Result<usize> {
    let labels: Vec<String> = Conclusion::ALL.iter().map(|c| c.label().to_owned()).collect();
    self
      .insert_missing_labels(vec![(lookup_table(LookupKind::Conclusion), labels)])
      .await
  }

  async fn insert_missing_labels(
    &self,
    plan: Vec<(&'static str, Vec<String>)>,
  ) -> Result<usize> {
    if plan.is_empty() {
      return Ok(0);
    }
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut inserted = 0;
        for (table, labels) in &plan {
          let sql = format!(
            "INSERT INTO {table} (label)
             SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM {table} WHERE label = ?1)"
          );
          for label in labels {
            inserted += tx.execute(&sql, rusqlite::params![label])?;
          }
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;
    tracing::info!(inserted, "seeded lookup tables");
    Ok(inserted)
  }

  /// Run raw SQL against the underlying connection.
  #[cfg(test)]
  pub(crate) async fn execute_batch(&self, sql: &str) -> Result<()> {
    let sql = sql.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RegistryStore impl ──────────────────────────────────────────────────────

impl RegistryStore for SqliteStore {
  type Error = Error;

  // ── Lookups ───────────────────────────────────────────────────────────────

  async fn add_lookup(&self, kind: LookupKind, label: String) -> Result<LookupRow> {
    let table = lookup_table(kind);
    let stored = label.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!("INSERT INTO {table} (label) VALUES (?1)"),
          rusqlite::params![stored],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(%kind, id, "lookup row added");
    Ok(LookupRow { id, label })
  }

  async fn get_lookup(&self, kind: LookupKind, id: i64) -> Result<Option<LookupRow>> {
    let table = lookup_table(kind);

    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT id, label FROM {table} WHERE id = ?1"),
              rusqlite::params![id],
              |row| Ok(LookupRow { id: row.get(0)?, label: row.get(1)? }),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn list_lookups(&self, kind: LookupKind) -> Result<Vec<LookupRow>> {
    let table = lookup_table(kind);

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT id, label FROM {table} ORDER BY id"))?;
        let rows = stmt
          .query_map([], |row| Ok(LookupRow { id: row.get(0)?, label: row.get(1)? }))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn resolve_lookup<'a>(
    &'a self,
    kind:  LookupKind,
    label: &'a str,
  ) -> Result<Option<i64>> {
    let table = lookup_table(kind);
    let needle = label.to_owned();

    // `=` under SQLite's default BINARY collation is an exact,
    // case-sensitive comparison.
    let id = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT id FROM {table} WHERE label = ?1 ORDER BY id LIMIT 1"),
              rusqlite::params![needle],
              |row| row.get::<_, i64>(0),
            )
            .optional()?,
        )
      })
      .await?;

    tracing::debug!(%kind, label, ?id, "resolved lookup label");
    Ok(id)
  }

  async fn resolve_conclusion<'a>(&'a self, phrase: &'a str) -> Result<i64> {
    let conclusion = match Conclusion::match_phrase(phrase) {
      Some(c) => c,
      None => {
        tracing::warn!(phrase, "unrecognised conclusion phrase; using canceled");
        Conclusion::Canceled
      }
    };
    let label = conclusion.label();

    self
      .resolve_lookup(LookupKind::Conclusion, label)
      .await?
      .ok_or(Error::MissingCanonicalRow(label))
  }

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn create_person(&self, fields: PersonFields) -> Result<Person> {
    fields.validate()?;

    let created = Utc::now();
    let mut values = encode_person(&fields);
    values.push(Value::Text(encode_dt(created)));

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO persons ({}, created) VALUES ({})",
            PERSON_COLUMNS.join(", "),
            placeholders(1, values.len()),
          ),
          params_from_iter(values),
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(person_id = id, "person created");
    Ok(Person { id, fields, created, updated: None })
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{} WHERE id = ?1", person_select()),
              rusqlite::params![id],
              read_person,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_persons(&self) -> Result<Vec<Person>> {
    let raws = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", person_select()))?;
        let rows = stmt
          .query_map([], read_person)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn update_person(&self, id: i64, fields: PersonFields) -> Result<Person> {
    fields.validate()?;

    let mut values = encode_person(&fields);

    // Read the previous stamps and write the new ones in one transaction so
    // successive updates stay strictly ordered.
    let stamps: Option<(String, DateTime<Utc>)> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let previous: Option<(String, Option<String>)> = tx
          .query_row(
            "SELECT created, updated FROM persons WHERE id = ?1",
            rusqlite::params![id],
            |row| Ok((row.get(0)?, row.get(1)?)),
          )
          .optional()?;
        let Some((created, previous)) = previous else {
          return Ok(Ok(None));
        };
        let updated = match next_update(previous.as_deref(), Some(created.as_str())) {
          Ok(updated) => updated,
          Err(e) => return Ok(Err(e)),
        };

        let n = values.len();
        values.push(Value::Text(encode_dt(updated)));
        values.push(Value::Integer(id));
        tx.execute(
          &format!(
            "UPDATE persons SET {}, updated = ?{} WHERE id = ?{}",
            assignments(PERSON_COLUMNS),
            n + 1,
            n + 2,
          ),
          params_from_iter(values),
        )?;
        tx.commit()?;
        Ok(Ok(Some((created, updated))))
      })
      .await??;

    let (created, updated) = stamps.ok_or(Error::PersonNotFound(id))?;
    tracing::debug!(person_id = id, "person updated");
    Ok(Person {
      id,
      fields,
      created: decode_dt(&created)?,
      updated: Some(updated),
    })
  }

  async fn delete_person(&self, id: i64) -> Result<()> {
    let removed: Option<usize> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut removed = 0;
        for kind in DependentKind::ALL {
          removed += tx.execute(
            &format!("DELETE FROM {} WHERE person_id = ?1", dependent_table(kind)),
            rusqlite::params![id],
          )?;
        }
        if tx.execute("DELETE FROM persons WHERE id = ?1", rusqlite::params![id])? == 0 {
          // Dropping the transaction rolls it back.
          return Ok(None);
        }
        tx.commit()?;
        Ok(Some(removed))
      })
      .await?;

    let removed = removed.ok_or(Error::PersonNotFound(id))?;
    tracing::info!(person_id = id, dependents = removed, "person deleted");
    Ok(())
  }

  async fn materialize(&self, id: i64) -> Result<Option<Dossier>> {
    let person = match self.get_person(id).await? {
      Some(p) => p,
      None => return Ok(None),
    };

    let category = match person.fields.category_id {
      Some(cid) => self.get_lookup(LookupKind::Category, cid).await?,
      None => None,
    };
    let region = match person.fields.region_id {
      Some(rid) => self.get_lookup(LookupKind::Region, rid).await?,
      None => None,
    };
    let status = match person.fields.status_id {
      Some(sid) => self.get_lookup(LookupKind::Status, sid).await?,
      None => None,
    };

    let mut dependents = Vec::new();
    for kind in DependentKind::ALL {
      dependents.extend(self.list_dependents(id, kind).await?);
    }

    Ok(Some(Dossier { person, category, region, status, dependents }))
  }

  // ── Dependents ────────────────────────────────────────────────────────────

  async fn add_dependent(
    &self,
    person_id: i64,
    mut value: DependentValue,
  ) -> Result<Dependent> {
    value.stamp(WriteKind::Insert, Utc::now());

    let kind = value.kind();
    let columns = dependent_columns(kind);
    let params: Vec<Value> = std::iter::once(Value::Integer(person_id))
      .chain(encode_dependent(&value))
      .collect();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO {} (person_id, {}) VALUES ({})",
            dependent_table(kind),
            columns.join(", "),
            placeholders(1, params.len()),
          ),
          params_from_iter(params),
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(person_id, %kind, id, "dependent added");
    Ok(Dependent { id, person_id, value })
  }

  async fn get_dependent(
    &self,
    person_id: i64,
    kind:      DependentKind,
    id:        i64,
  ) -> Result<Option<Dependent>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{} WHERE id = ?1 AND person_id = ?2", dependent_select(kind)),
              rusqlite::params![id, person_id],
              read_dependent(kind),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(|r| r.into_dependent(kind)).transpose()
  }

  async fn list_dependents(
    &self,
    person_id: i64,
    kind:      DependentKind,
  ) -> Result<Vec<Dependent>> {
    let raws = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "{} WHERE person_id = ?1 ORDER BY id",
          dependent_select(kind)
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![person_id], read_dependent(kind))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(|r| r.into_dependent(kind)).collect()
  }

  async fn update_dependent(
    &self,
    person_id: i64,
    id:        i64,
    mut value: DependentValue,
  ) -> Result<Dependent> {
    value.stamp(WriteKind::Update, Utc::now());

    let kind = value.kind();
    let columns = dependent_columns(kind);
    let mut params = encode_dependent(&value);
    let n = params.len();
    params.push(Value::Integer(id));
    params.push(Value::Integer(person_id));

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!(
            "UPDATE {} SET {} WHERE id = ?{} AND person_id = ?{}",
            dependent_table(kind),
            assignments(columns),
            n + 1,
            n + 2,
          ),
          params_from_iter(params),
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::DependentNotFound { kind, person_id, id });
    }
    tracing::debug!(person_id, %kind, id, "dependent updated");
    Ok(Dependent { id, person_id, value })
  }

  async fn delete_dependent(
    &self,
    person_id: i64,
    kind:      DependentKind,
    id:        i64,
  ) -> Result<()> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!(
            "DELETE FROM {} WHERE id = ?1 AND person_id = ?2",
            dependent_table(kind)
          ),
          rusqlite::params![id, person_id],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::DependentNotFound { kind, person_id, id });
    }
    tracing::debug!(person_id, %kind, id, "dependent deleted");
    Ok(())
  }

  // ── Contact ledger ────────────────────────────────────────────────────────

  async fn add_connect(&self, fields: ConnectFields) -> Result<Connect> {
    let updated = Utc::now();
    let mut values = encode_connect(&fields);
    values.push(Value::Text(encode_dt(updated)));

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO connects ({}, updated) VALUES ({})",
            CONNECT_COLUMNS.join(", "),
            placeholders(1, values.len()),
          ),
          params_from_iter(values),
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(connect_id = id, "connect entry added");
    Ok(Connect { id, fields, updated })
  }

  async fn get_connect(&self, id: i64) -> Result<Option<Connect>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{} WHERE id = ?1", connect_select()),
              rusqlite::params![id],
              read_connect,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawConnect::into_connect).transpose()
  }

  async fn list_connects(&self) -> Result<Vec<Connect>> {
    let raws = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", connect_select()))?;
        let rows = stmt
          .query_map([], read_connect)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawConnect::into_connect).collect()
  }

  async fn update_connect(&self, id: i64, fields: ConnectFields) -> Result<Connect> {
    let mut values = encode_connect(&fields);

    let updated: Option<DateTime<Utc>> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let previous: Option<String> = tx
          .query_row(
            "SELECT updated FROM connects WHERE id = ?1",
            rusqlite::params![id],
            |row| row.get(0),
          )
          .optional()?;
        let Some(previous) = previous else {
          return Ok(Ok(None));
        };
        let updated = match next_update(Some(previous.as_str()), None) {
          Ok(updated) => updated,
          Err(e) => return Ok(Err(e)),
        };

        let n = values.len();
        values.push(Value::Text(encode_dt(updated)));
        values.push(Value::Integer(id));
        tx.execute(
          &format!(
            "UPDATE connects SET {}, updated = ?{} WHERE id = ?{}",
            assignments(CONNECT_COLUMNS),
            n + 1,
            n + 2,
          ),
          params_from_iter(values),
        )?;
        tx.commit()?;
        Ok(Ok(Some(updated)))
      })
      .await??;

    let updated = updated.ok_or(Error::ConnectNotFound(id))?;
    tracing::debug!(connect_id = id, "connect entry updated");
    Ok(Connect { id, fields, updated })
  }

  async fn delete_connect(&self, id: i64) -> Result<()> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM connects WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::ConnectNotFound(id));
    }
    tracing::debug!(connect_id = id, "connect entry deleted");
    Ok(())
  }
}
