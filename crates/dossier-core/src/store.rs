//! The `RegistryStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `dossier-store-sqlite`). Callers depend on this abstraction, not on any
//! concrete backend, and own the backend's lifecycle.

use std::future::Future;

use crate::{
  connect::{Connect, ConnectFields},
  dependent::{Dependent, DependentKind, DependentValue},
  dossier::Dossier,
  lookup::{LookupKind, LookupRow},
  person::{Person, PersonFields},
};

/// Abstraction over a registry backend.
///
/// Every write is atomic: a failed call leaves previously committed state
/// unchanged. Timestamps are assigned by the backend, never by the caller.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait RegistryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Lookups ───────────────────────────────────────────────────────────

  /// Insert a lookup row. Labels are not required to be unique.
  fn add_lookup(
    &self,
    kind: LookupKind,
    label: String,
  ) -> impl Future<Output = Result<LookupRow, Self::Error>> + Send + '_;

  fn get_lookup(
    &self,
    kind: LookupKind,
    id: i64,
  ) -> impl Future<Output = Result<Option<LookupRow>, Self::Error>> + Send + '_;

  /// All rows of a lookup table in id order.
  fn list_lookups(
    &self,
    kind: LookupKind,
  ) -> impl Future<Output = Result<Vec<LookupRow>, Self::Error>> + Send + '_;

  /// Resolve a label to a row id by exact, case-sensitive match.
  ///
  /// Returns `None` when no row carries the label; when several do, the
  /// lowest id wins.
  fn resolve_lookup<'a>(
    &'a self,
    kind: LookupKind,
    label: &'a str,
  ) -> impl Future<Output = Result<Option<i64>, Self::Error>> + Send + 'a;

  /// Resolve an operator-typed conclusion phrase to a `conclusions` row id.
  ///
  /// The phrase is normalised with
  /// [`Conclusion::from_phrase`](crate::lookup::Conclusion::from_phrase), so
  /// unrecognised text resolves to the canceled row. Fails when the
  /// canonical row is missing from the table.
  fn resolve_conclusion<'a>(
    &'a self,
    phrase: &'a str,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + 'a;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Validate and persist a new person. `created` is set by the store.
  fn create_person(
    &self,
    fields: PersonFields,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Replace a person's fields. `updated` is reassigned; `created` is kept.
  fn update_person(
    &self,
    id: i64,
    fields: PersonFields,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Delete a person together with every dependent record it owns, as one
  /// atomic unit.
  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Materialise a [`Dossier`]. Returns `None` if the person does not
  /// exist.
  fn materialize(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Dossier>, Self::Error>> + Send + '_;

  // ── Dependents ────────────────────────────────────────────────────────

  /// Attach a new dependent record to `person_id`.
  fn add_dependent(
    &self,
    person_id: i64,
    value: DependentValue,
  ) -> impl Future<Output = Result<Dependent, Self::Error>> + Send + '_;

  fn get_dependent(
    &self,
    person_id: i64,
    kind: DependentKind,
    id: i64,
  ) -> impl Future<Output = Result<Option<Dependent>, Self::Error>> + Send + '_;

  /// One of a person's collections, in id order.
  fn list_dependents(
    &self,
    person_id: i64,
    kind: DependentKind,
  ) -> impl Future<Output = Result<Vec<Dependent>, Self::Error>> + Send + '_;

  /// Replace the payload of an existing dependent. The kind is taken from
  /// `value`.
  fn update_dependent(
    &self,
    person_id: i64,
    id: i64,
    value: DependentValue,
  ) -> impl Future<Output = Result<Dependent, Self::Error>> + Send + '_;

  fn delete_dependent(
    &self,
    person_id: i64,
    kind: DependentKind,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Contact ledger ────────────────────────────────────────────────────

  fn add_connect(
    &self,
    fields: ConnectFields,
  ) -> impl Future<Output = Result<Connect, Self::Error>> + Send + '_;

  fn get_connect(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Connect>, Self::Error>> + Send + '_;

  fn list_connects(
    &self,
  ) -> impl Future<Output = Result<Vec<Connect>, Self::Error>> + Send + '_;

  fn update_connect(
    &self,
    id: i64,
    fields: ConnectFields,
  ) -> impl Future<Output = Result<Connect, Self::Error>> + Send + '_;

  fn delete_connect(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
