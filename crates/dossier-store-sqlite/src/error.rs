//! Error type for `dossier-store-sqlite`.

use dossier_core::dependent::DependentKind;
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] dossier_core::Error),

  /// A write referenced a person or lookup row that does not exist.
  #[error("referential integrity violation: {0}")]
  ReferentialIntegrity(String),

  #[error("person not found: {0}")]
  PersonNotFound(i64),

  #[error("{kind} {id} not found for person {person_id}")]
  DependentNotFound {
    kind:      DependentKind,
    person_id: i64,
    id:        i64,
  },

  #[error("connect entry not found: {0}")]
  ConnectNotFound(i64),

  /// The canonical conclusion label is absent from the `conclusions` table.
  /// Seed data is incomplete; this is never defaulted away.
  #[error("no conclusion row labelled {0:?}")]
  MissingCanonicalRow(&'static str),

  /// The database file cannot be opened, is held by another writer, is not
  /// a database, or the disk under it failed. A reachable store that refuses
  /// a statement (read-only, constraint) is a [`Error::Database`] instead.
  #[error("storage unavailable: {0}")]
  StorageUnavailable(String),

  #[error("database error: {0}")]
  Database(#[source] tokio_rusqlite::Error),

  #[error("decode error: {0}")]
  Decode(String),

  #[error("config error: {0}")]
  Config(#[from] ::config::ConfigError),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(err: tokio_rusqlite::Error) -> Self {
    match &err {
      tokio_rusqlite::Error::ConnectionClosed => {
        return Error::StorageUnavailable(err.to_string());
      }
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, msg)) => {
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY {
          return Error::ReferentialIntegrity(
            msg.clone().unwrap_or_else(|| e.to_string()),
          );
        }
        if matches!(
          e.code,
          ErrorCode::CannotOpen
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::NotADatabase
            | ErrorCode::SystemIoFailure
            | ErrorCode::DiskFull
        ) {
          return Error::StorageUnavailable(err.to_string());
        }
      }
      _ => {}
    }
    Error::Database(err)
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
