//! The materialised read model for one person.

use serde::{Deserialize, Serialize};

use crate::{
  dependent::{Dependent, DependentKind},
  lookup::LookupRow,
  person::Person,
};

/// A person with its lookup rows resolved and every dependent record
/// attached. Never stored, always derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dossier {
  pub person:     Person,
  pub category:   Option<LookupRow>,
  pub region:     Option<LookupRow>,
  pub status:     Option<LookupRow>,
  /// Ordered by kind, then by id.
  pub dependents: Vec<Dependent>,
}

impl Dossier {
  /// The dependents of a single kind, in id order.
  pub fn of_kind(&self, kind: DependentKind) -> impl Iterator<Item = &Dependent> {
    self.dependents.iter().filter(move |d| d.kind() == kind)
  }
}
