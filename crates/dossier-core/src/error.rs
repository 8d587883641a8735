//! Error types for `dossier-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid {field}: {reason}")]
  InvalidField {
    field:  &'static str,
    reason: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
