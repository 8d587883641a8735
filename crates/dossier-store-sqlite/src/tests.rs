//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, Utc};
use dossier_core::{
  connect::ConnectFields,
  dependent::{
    Address, Affiliation, Check, Contact, DependentKind, DependentValue,
    Document, Inquiry, Robot, Staff, Workplace,
  },
  lookup::{Conclusion, LookupKind},
  person::PersonFields,
  store::RegistryStore,
};

use crate::{Error, Seed, SqliteStore, StoreConfig};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ivanov() -> PersonFields {
  PersonFields::new(
    "Иванов Иван Иванович",
    NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
  )
}

fn sample(kind: DependentKind) -> DependentValue {
  match kind {
    DependentKind::Staff => DependentValue::Staff(Staff {
      position:   Some("Инженер".into()),
      department: Some("ИТ".into()),
    }),
    DependentKind::Document => DependentValue::Document(Document {
      view:   Some("Паспорт".into()),
      series: Some("4510".into()),
      number: Some("123456".into()),
      agency: Some("ОВД Тверского района".into()),
      issue:  NaiveDate::from_ymd_opt(2005, 6, 1),
    }),
    DependentKind::Address => DependentValue::Address(Address {
      view:    Some("Регистрация".into()),
      region:  Some("Москва".into()),
      address: Some("ул. Тверская, 1".into()),
    }),
    DependentKind::Workplace => DependentValue::Workplace(Workplace {
      start_date: NaiveDate::from_ymd_opt(2010, 1, 11),
      end_date:   None,
      workplace:  Some("ООО Ромашка".into()),
      ..Workplace::default()
    }),
    DependentKind::Contact => DependentValue::Contact(Contact {
      view:    Some("Телефон".into()),
      contact: Some("+7 900 000-00-00".into()),
    }),
    DependentKind::Affiliation => DependentValue::Affiliation(Affiliation {
      view: Some("Учредитель".into()),
      name: Some("ООО Лютик".into()),
      ..Affiliation::default()
    }),
    DependentKind::Check => DependentValue::Check(Check {
      courts:  Some("Не найдено".into()),
      pfo:     Some(true),
      officer: Some("Петров".into()),
      ..Check::default()
    }),
    DependentKind::Robot => DependentValue::Robot(Robot {
      inn: Some("Действителен".into()),
      ..Robot::default()
    }),
    DependentKind::Inquiry => DependentValue::Inquiry(Inquiry {
      info:      Some("Запрос из кадров".into()),
      initiator: Some("Сидоров".into()),
      ..Inquiry::default()
    }),
  }
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_lookups() {
  let s = store().await;

  let a = s.add_lookup(LookupKind::Status, "Новый".into()).await.unwrap();
  let b = s.add_lookup(LookupKind::Status, "Окончено".into()).await.unwrap();

  let rows = s.list_lookups(LookupKind::Status).await.unwrap();
  assert_eq!(rows, vec![a.clone(), b]);
  assert_eq!(s.get_lookup(LookupKind::Status, a.id).await.unwrap(), Some(a));
  assert!(s.list_lookups(LookupKind::Region).await.unwrap().is_empty());
}

#[tokio::test]
async fn resolve_lookup_is_exact_and_case_sensitive() {
  let s = store().await;
  let moscow = s.add_lookup(LookupKind::Region, "Moscow".into()).await.unwrap();

  assert_eq!(
    s.resolve_lookup(LookupKind::Region, "Moscow").await.unwrap(),
    Some(moscow.id)
  );
  assert_eq!(s.resolve_lookup(LookupKind::Region, "moscow").await.unwrap(), None);
  assert_eq!(s.resolve_lookup(LookupKind::Region, "Moscow ").await.unwrap(), None);
  // Tables are independent.
  assert_eq!(s.resolve_lookup(LookupKind::Category, "Moscow").await.unwrap(), None);
}

#[tokio::test]
async fn resolve_lookup_prefers_lowest_id_on_duplicates() {
  let s = store().await;
  let first = s.add_lookup(LookupKind::Category, "Кандидат".into()).await.unwrap();
  s.add_lookup(LookupKind::Category, "Кандидат".into()).await.unwrap();

  assert_eq!(
    s.resolve_lookup(LookupKind::Category, "Кандидат").await.unwrap(),
    Some(first.id)
  );
}

#[tokio::test]
async fn seeding_is_idempotent() {
  let s = store().await;
  let seed = Seed {
    categories: vec!["Кандидат".into()],
    statuses:   vec!["Новый".into(), "Окончено".into()],
    regions:    vec![],
  };

  assert_eq!(s.seed_lookups(&seed).await.unwrap(), 3);
  assert_eq!(s.seed_lookups(&seed).await.unwrap(), 0);
  assert_eq!(s.seed_conclusions().await.unwrap(), 4);
  assert_eq!(s.seed_conclusions().await.unwrap(), 0);

  assert_eq!(s.list_lookups(LookupKind::Status).await.unwrap().len(), 2);
  assert_eq!(s.list_lookups(LookupKind::Conclusion).await.unwrap().len(), 4);
}

// ─── Conclusions ─────────────────────────────────────────────────────────────

async fn conclusion_id(s: &SqliteStore, c: Conclusion) -> i64 {
  s.resolve_lookup(LookupKind::Conclusion, c.label())
    .await
    .unwrap()
    .expect("seeded conclusion")
}

#[tokio::test]
async fn resolve_conclusion_recognised_phrases() {
  let s = store().await;
  s.seed_conclusions().await.unwrap();

  let agreed = conclusion_id(&s, Conclusion::Agreed).await;
  let with_comment = conclusion_id(&s, Conclusion::WithComment).await;
  let denied = conclusion_id(&s, Conclusion::Denied).await;

  assert_eq!(s.resolve_conclusion("СОГЛАСОВАНО").await.unwrap(), agreed);
  assert_eq!(s.resolve_conclusion("согласовано").await.unwrap(), agreed);
  assert_eq!(s.resolve_conclusion("С комментарием").await.unwrap(), with_comment);
  assert_eq!(s.resolve_conclusion("ОТКАЗ").await.unwrap(), denied);
}

#[tokio::test]
async fn resolve_conclusion_defaults_to_canceled() {
  let s = store().await;
  s.seed_conclusions().await.unwrap();
  let canceled = conclusion_id(&s, Conclusion::Canceled).await;

  assert_eq!(s.resolve_conclusion("qwerty").await.unwrap(), canceled);
  assert_eq!(s.resolve_conclusion("").await.unwrap(), canceled);
  assert_eq!(s.resolve_conclusion("согласовоно").await.unwrap(), canceled);
}

#[tokio::test]
async fn resolve_conclusion_without_seed_is_an_error() {
  let s = store().await;

  let err = s.resolve_conclusion("согласовано").await.unwrap_err();
  assert!(matches!(err, Error::MissingCanonicalRow(l) if l == Conclusion::Agreed.label()));

  // Partially seeded: the fallback row is missing too.
  s.add_lookup(LookupKind::Conclusion, Conclusion::Agreed.label().into())
    .await
    .unwrap();
  assert!(s.resolve_conclusion("согласовано").await.is_ok());
  assert!(matches!(
    s.resolve_conclusion("qwerty").await.unwrap_err(),
    Error::MissingCanonicalRow(_)
  ));
}

// ─── Persons ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_person() {
  let s = store().await;
  let region = s.add_lookup(LookupKind::Region, "Москва".into()).await.unwrap();

  let mut fields = ivanov();
  fields.region_id = Some(region.id);
  fields.snils = Some("12345678901".into());

  let person = s.create_person(fields.clone()).await.unwrap();
  assert_eq!(person.fields, fields);
  assert!(person.updated.is_none());

  let fetched = s.get_person(person.id).await.unwrap().unwrap();
  assert_eq!(fetched, person);
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let s = store().await;
  assert!(s.get_person(42).await.unwrap().is_none());
}

#[tokio::test]
async fn list_persons_in_id_order() {
  let s = store().await;
  let a = s.create_person(ivanov()).await.unwrap();
  let mut other = ivanov();
  other.fullname = "Петрова Анна Сергеевна".into();
  let b = s.create_person(other).await.unwrap();

  let ids: Vec<_> = s.list_persons().await.unwrap().iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![a.id, b.id]);
}

#[tokio::test]
async fn person_with_unknown_lookup_is_rejected() {
  let s = store().await;

  let mut fields = ivanov();
  fields.category_id = Some(999);

  let err = s.create_person(fields).await.unwrap_err();
  assert!(matches!(err, Error::ReferentialIntegrity(_)), "{err:?}");
  assert!(s.list_persons().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_person_fields_are_rejected() {
  let s = store().await;

  let mut fields = ivanov();
  fields.fullname = String::new();
  let err = s.create_person(fields).await.unwrap_err();
  assert!(matches!(err, Error::Core(_)));
  assert!(s.list_persons().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_person_stamps_strictly_increase() {
  let s = store().await;
  let person = s.create_person(ivanov()).await.unwrap();

  let mut fields = ivanov();
  fields.marital = Some("женат".into());
  let first = s.update_person(person.id, fields.clone()).await.unwrap();

  fields.education = Some("высшее".into());
  let second = s.update_person(person.id, fields.clone()).await.unwrap();

  assert_eq!(first.created, person.created);
  assert_eq!(second.created, person.created);
  assert!(first.updated.unwrap() >= person.created);
  assert!(second.updated.unwrap() > first.updated.unwrap());

  let fetched = s.get_person(person.id).await.unwrap().unwrap();
  assert_eq!(fetched, second);
  assert_eq!(fetched.fields.education.as_deref(), Some("высшее"));
}

#[tokio::test]
async fn update_missing_person_errors() {
  let s = store().await;
  let err = s.update_person(7, ivanov()).await.unwrap_err();
  assert!(matches!(err, Error::PersonNotFound(7)));
}

#[tokio::test]
async fn update_person_with_unknown_status_keeps_old_row() {
  let s = store().await;
  let person = s.create_person(ivanov()).await.unwrap();

  let mut fields = ivanov();
  fields.status_id = Some(31337);
  fields.addition = Some("не должно сохраниться".into());
  let err = s.update_person(person.id, fields).await.unwrap_err();
  assert!(matches!(err, Error::ReferentialIntegrity(_)));

  let fetched = s.get_person(person.id).await.unwrap().unwrap();
  assert_eq!(fetched, person);
}

#[tokio::test]
async fn first_update_is_never_before_created() {
  let s = store().await;
  let person = s.create_person(ivanov()).await.unwrap();
  s.execute_batch(&format!(
    "UPDATE persons SET created = '2999-01-01T00:00:00+00:00' WHERE id = {}",
    person.id
  ))
  .await
  .unwrap();

  let updated = s.update_person(person.id, ivanov()).await.unwrap();
  assert!(updated.updated.unwrap() > updated.created);
}

#[tokio::test]
async fn corrupt_stamp_fails_the_update() {
  let s = store().await;
  let person = s.create_person(ivanov()).await.unwrap();
  s.update_person(person.id, ivanov()).await.unwrap();
  s.execute_batch(&format!(
    "UPDATE persons SET updated = 'вчера' WHERE id = {}",
    person.id
  ))
  .await
  .unwrap();

  let mut fields = ivanov();
  fields.addition = Some("не должно сохраниться".into());
  let err = s.update_person(person.id, fields).await.unwrap_err();
  assert!(matches!(err, Error::Decode(_)), "{err:?}");

  s.execute_batch(&format!(
    "UPDATE persons SET updated = NULL WHERE id = {}",
    person.id
  ))
  .await
  .unwrap();
  let fetched = s.get_person(person.id).await.unwrap().unwrap();
  assert_eq!(fetched.fields.addition, None);
}

// ─── Cascade delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_person_cascades_to_every_collection() {
  let s = store().await;
  let doomed = s.create_person(ivanov()).await.unwrap();
  let kept = s.create_person(ivanov()).await.unwrap();

  for kind in DependentKind::ALL {
    s.add_dependent(doomed.id, sample(kind)).await.unwrap();
    s.add_dependent(doomed.id, sample(kind)).await.unwrap();
    s.add_dependent(kept.id, sample(kind)).await.unwrap();
  }

  s.delete_person(doomed.id).await.unwrap();

  assert!(s.get_person(doomed.id).await.unwrap().is_none());
  for kind in DependentKind::ALL {
    assert!(
      s.list_dependents(doomed.id, kind).await.unwrap().is_empty(),
      "{kind} left behind"
    );
    assert_eq!(s.list_dependents(kept.id, kind).await.unwrap().len(), 1, "{kind}");
  }
  assert!(s.get_person(kept.id).await.unwrap().is_some());
}

#[tokio::test]
async fn failed_cascade_leaves_everything_in_place() {
  let s = store().await;
  let person = s.create_person(ivanov()).await.unwrap();
  for kind in DependentKind::ALL {
    s.add_dependent(person.id, sample(kind)).await.unwrap();
  }

  // The last table in the cascade refuses, after eight have been cleared.
  s.execute_batch(
    "CREATE TRIGGER refuse_inquiry_delete BEFORE DELETE ON inquiries
     BEGIN SELECT RAISE(ABORT, 'inquiries are frozen'); END;",
  )
  .await
  .unwrap();

  let err = s.delete_person(person.id).await.unwrap_err();
  assert!(matches!(err, Error::Database(_)), "{err:?}");

  assert!(s.get_person(person.id).await.unwrap().is_some());
  for kind in DependentKind::ALL {
    assert_eq!(
      s.list_dependents(person.id, kind).await.unwrap().len(),
      1,
      "{kind} was deleted"
    );
  }
}

#[tokio::test]
async fn delete_missing_person_errors() {
  let s = store().await;
  let err = s.delete_person(5).await.unwrap_err();
  assert!(matches!(err, Error::PersonNotFound(5)));
}

#[tokio::test]
async fn concurrent_adds_then_delete_leave_no_orphans() {
  let s = store().await;
  let person = s.create_person(ivanov()).await.unwrap();

  let (a, b) = tokio::join!(
    s.add_dependent(person.id, sample(DependentKind::Contact)),
    s.add_dependent(person.id, sample(DependentKind::Contact)),
  );
  a.unwrap();
  b.unwrap();

  let other = s.clone();
  let pid = person.id;
  let spawned =
    tokio::spawn(async move { other.add_dependent(pid, sample(DependentKind::Staff)).await });
  spawned.await.unwrap().unwrap();

  s.delete_person(person.id).await.unwrap();

  for kind in DependentKind::ALL {
    assert!(s.list_dependents(person.id, kind).await.unwrap().is_empty());
  }
}

// ─── Dependents ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn dependent_round_trips_for_every_kind() {
  let s = store().await;
  let person = s.create_person(ivanov()).await.unwrap();

  for kind in DependentKind::ALL {
    let added = s.add_dependent(person.id, sample(kind)).await.unwrap();
    assert_eq!(added.kind(), kind);
    assert_eq!(added.person_id, person.id);

    let fetched = s.get_dependent(person.id, kind, added.id).await.unwrap();
    assert_eq!(fetched, Some(added), "{kind}");
  }
}

#[tokio::test]
async fn dependent_of_missing_person_is_rejected() {
  let s = store().await;

  for kind in DependentKind::ALL {
    let err = s.add_dependent(404, sample(kind)).await.unwrap_err();
    assert!(matches!(err, Error::ReferentialIntegrity(_)), "{kind}: {err:?}");
    assert!(s.list_dependents(404, kind).await.unwrap().is_empty());
  }
}

#[tokio::test]
async fn check_conclusion_must_exist() {
  let s = store().await;
  s.seed_conclusions().await.unwrap();
  let person = s.create_person(ivanov()).await.unwrap();

  let bogus = DependentValue::Check(Check {
    conclusion_id: Some(9_000),
    ..Check::default()
  });
  let err = s.add_dependent(person.id, bogus).await.unwrap_err();
  assert!(matches!(err, Error::ReferentialIntegrity(_)));

  let agreed = s.resolve_conclusion("Согласовано").await.unwrap();
  let check = DependentValue::Check(Check {
    conclusion_id: Some(agreed),
    ..Check::default()
  });
  let stored = s.add_dependent(person.id, check).await.unwrap();
  let DependentValue::Check(c) = stored.value else { unreachable!() };
  assert_eq!(c.conclusion_id, Some(agreed));
}

#[tokio::test]
async fn check_deadline_is_reassigned_on_update() {
  let s = store().await;
  let person = s.create_person(ivanov()).await.unwrap();

  let before = Utc::now();
  let added = s.add_dependent(person.id, sample(DependentKind::Check)).await.unwrap();
  let DependentValue::Check(first) = &added.value else { unreachable!() };
  let first_deadline = first.deadline.unwrap();
  assert!(first_deadline >= before);

  let mut edited = first.clone();
  edited.comments = Some("дополнено".into());
  edited.deadline = None;
  let updated = s
    .update_dependent(person.id, added.id, DependentValue::Check(edited))
    .await
    .unwrap();
  let DependentValue::Check(second) = &updated.value else { unreachable!() };
  assert!(second.deadline.unwrap() >= first_deadline);

  let fetched = s
    .get_dependent(person.id, DependentKind::Check, added.id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched, updated);
  let DependentValue::Check(c) = fetched.value else { unreachable!() };
  assert_eq!(c.pfo, Some(true));
  assert_eq!(c.comments.as_deref(), Some("дополнено"));
}

#[tokio::test]
async fn dated_records_default_to_insert_date() {
  let s = store().await;
  let person = s.create_person(ivanov()).await.unwrap();
  let today = Utc::now().date_naive();

  let added = s
    .add_dependent(person.id, sample(DependentKind::Affiliation))
    .await
    .unwrap();
  let DependentValue::Affiliation(a) = added.value else { unreachable!() };
  // Allow for a date rollover between `today` and the insert.
  assert!(a.deadline.unwrap() >= today);
}

#[tokio::test]
async fn dependents_are_scoped_to_their_person() {
  let s = store().await;
  let owner = s.create_person(ivanov()).await.unwrap();
  let stranger = s.create_person(ivanov()).await.unwrap();

  let doc = s
    .add_dependent(owner.id, sample(DependentKind::Document))
    .await
    .unwrap();

  assert!(
    s.get_dependent(stranger.id, DependentKind::Document, doc.id)
      .await
      .unwrap()
      .is_none()
  );
  let err = s
    .update_dependent(stranger.id, doc.id, sample(DependentKind::Document))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DependentNotFound { kind: DependentKind::Document, .. }));
  let err = s
    .delete_dependent(stranger.id, DependentKind::Document, doc.id)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DependentNotFound { .. }));

  // Wrong kind for the id is also not found.
  assert!(
    s.get_dependent(owner.id, DependentKind::Staff, doc.id)
      .await
      .unwrap()
      .is_none()
  );

  s.delete_dependent(owner.id, DependentKind::Document, doc.id)
    .await
    .unwrap();
  assert!(
    s.list_dependents(owner.id, DependentKind::Document)
      .await
      .unwrap()
      .is_empty()
  );
}

#[tokio::test]
async fn update_dependent_replaces_payload() {
  let s = store().await;
  let person = s.create_person(ivanov()).await.unwrap();
  let addr = s
    .add_dependent(person.id, sample(DependentKind::Address))
    .await
    .unwrap();

  let moved = DependentValue::Address(Address {
    view:    Some("Проживание".into()),
    region:  Some("Тверь".into()),
    address: None,
  });
  s.update_dependent(person.id, addr.id, moved.clone()).await.unwrap();

  let list = s.list_dependents(person.id, DependentKind::Address).await.unwrap();
  assert_eq!(list.len(), 1);
  assert_eq!(list[0].value, moved);
}

// ─── Materialize ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn materialize_returns_none_for_unknown_person() {
  let s = store().await;
  assert!(s.materialize(1).await.unwrap().is_none());
}

#[tokio::test]
async fn materialize_resolves_lookups_and_collections() {
  let s = store().await;
  let category = s.add_lookup(LookupKind::Category, "Кандидат".into()).await.unwrap();
  let status = s.add_lookup(LookupKind::Status, "Проверка".into()).await.unwrap();

  let mut fields = ivanov();
  fields.category_id = Some(category.id);
  fields.status_id = Some(status.id);
  let person = s.create_person(fields).await.unwrap();

  s.add_dependent(person.id, sample(DependentKind::Workplace)).await.unwrap();
  s.add_dependent(person.id, sample(DependentKind::Contact)).await.unwrap();
  s.add_dependent(person.id, sample(DependentKind::Contact)).await.unwrap();

  let dossier = s.materialize(person.id).await.unwrap().unwrap();
  assert_eq!(dossier.person, person);
  assert_eq!(dossier.category, Some(category));
  assert_eq!(dossier.status, Some(status));
  assert!(dossier.region.is_none());
  assert_eq!(dossier.dependents.len(), 3);
  assert_eq!(dossier.of_kind(DependentKind::Contact).count(), 2);
  assert_eq!(dossier.of_kind(DependentKind::Robot).count(), 0);
}

// ─── Contact ledger ──────────────────────────────────────────────────────────

#[tokio::test]
async fn connect_ledger_crud() {
  let s = store().await;

  let entry = s
    .add_connect(ConnectFields {
      company: Some("ООО Ромашка".into()),
      city: Some("Москва".into()),
      phone: Some("+7 495 000-00-00".into()),
      ..ConnectFields::default()
    })
    .await
    .unwrap();
  assert_eq!(s.get_connect(entry.id).await.unwrap(), Some(entry.clone()));

  let mut fields = entry.fields.clone();
  fields.mail = Some("office@example.com".into());
  let updated = s.update_connect(entry.id, fields).await.unwrap();
  assert!(updated.updated > entry.updated);
  assert_eq!(s.list_connects().await.unwrap(), vec![updated]);

  s.delete_connect(entry.id).await.unwrap();
  assert!(s.list_connects().await.unwrap().is_empty());
  assert!(matches!(
    s.delete_connect(entry.id).await.unwrap_err(),
    Error::ConnectNotFound(_)
  ));
  assert!(matches!(
    s.update_connect(entry.id, ConnectFields::default()).await.unwrap_err(),
    Error::ConnectNotFound(_)
  ));
}

#[tokio::test]
async fn corrupt_connect_stamp_fails_the_update() {
  let s = store().await;
  let entry = s.add_connect(ConnectFields::default()).await.unwrap();
  s.execute_batch(&format!(
    "UPDATE connects SET updated = 'never' WHERE id = {}",
    entry.id
  ))
  .await
  .unwrap();

  let err = s.update_connect(entry.id, ConnectFields::default()).await.unwrap_err();
  assert!(matches!(err, Error::Decode(_)), "{err:?}");
}

// ─── Files and configuration ─────────────────────────────────────────────────

#[tokio::test]
async fn file_store_persists_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("persons.db");

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create_person(ivanov()).await.unwrap().id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let person = s.get_person(id).await.unwrap().unwrap();
  assert_eq!(person.fields.fullname, "Иванов Иван Иванович");
}

#[tokio::test]
async fn unreachable_database_is_storage_unavailable() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("missing").join("nested").join("persons.db");

  let err = SqliteStore::open(&path).await.err().expect("open must fail");
  assert!(matches!(err, Error::StorageUnavailable(_)), "{err:?}");
}

#[tokio::test]
async fn read_only_store_is_a_database_error() {
  let s = store().await;
  s.execute_batch("PRAGMA query_only = ON").await.unwrap();

  let err = s
    .add_lookup(LookupKind::Region, "Москва".into())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Database(_)), "{err:?}");
}

#[tokio::test]
async fn open_with_config_seeds_lookups() {
  let dir = tempfile::tempdir().unwrap();
  let config = StoreConfig {
    path:             dir.path().join("persons.db"),
    seed:             Seed {
      regions: vec!["Москва".into(), "Тверь".into()],
      ..Seed::default()
    },
    seed_conclusions: true,
  };

  let s = SqliteStore::open_with_config(&config).await.unwrap();
  assert!(s.resolve_lookup(LookupKind::Region, "Тверь").await.unwrap().is_some());
  assert!(s.resolve_conclusion("отказ").await.is_ok());

  // Reopening does not duplicate seed rows.
  drop(s);
  let s = SqliteStore::open_with_config(&config).await.unwrap();
  assert_eq!(s.list_lookups(LookupKind::Region).await.unwrap().len(), 2);
  assert_eq!(s.list_lookups(LookupKind::Conclusion).await.unwrap().len(), 4);
}
