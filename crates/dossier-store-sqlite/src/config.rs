//! Store configuration, read from a TOML file and `DOSSIER_*` environment
//! variables.
//!
//! ```toml
//! path = "~/.local/share/dossier/persons.db"
//! seed_conclusions = true
//!
//! [seed]
//! categories = ["Кандидат", "Сотрудник"]
//! statuses   = ["Новый", "Проверка", "Окончено"]
//! regions    = ["Москва", "Санкт-Петербург"]
//! ```

use std::path::{Path, PathBuf};

use dossier_core::lookup::LookupKind;
use serde::Deserialize;

use crate::Result;

/// Runtime store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
  /// Database file. `~/` is expanded; `:memory:` opens a private in-memory
  /// database.
  pub path:             PathBuf,
  #[serde(default)]
  pub seed:             Seed,
  /// Insert the four canonical conclusion rows when missing.
  #[serde(default = "default_true")]
  pub seed_conclusions: bool,
}

/// Lookup labels inserted at open time when not already present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
  #[serde(default)]
  pub categories: Vec<String>,
  #[serde(default)]
  pub statuses:   Vec<String>,
  #[serde(default)]
  pub regions:    Vec<String>,
}

impl Seed {
  /// The configured labels for `kind`. Conclusion labels are fixed and
  /// never configured.
  pub fn labels(&self, kind: LookupKind) -> &[String] {
    match kind {
      LookupKind::Category => &self.categories,
      LookupKind::Status => &self.statuses,
      LookupKind::Region => &self.regions,
      LookupKind::Conclusion => &[],
    }
  }
}

fn default_true() -> bool { true }

impl StoreConfig {
  /// Layer an optional config file under `DOSSIER_*` environment variables.
  pub fn load(file: impl AsRef<Path>) -> Result<Self> {
    let settings = ::config::Config::builder()
      .add_source(::config::File::from(file.as_ref()).required(false))
      .add_source(::config::Environment::with_prefix("DOSSIER"))
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  /// The database path with a leading `~` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
