//! SQL schema for the Dossier SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Dependent tables reference `persons` without `ON DELETE CASCADE`: the
/// store removes dependents explicitly inside the person-delete
/// transaction, and a forgotten table surfaces as a constraint failure.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Lookup tables. Labels are not constrained unique; resolution picks the
-- lowest id.
CREATE TABLE IF NOT EXISTS categories (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS statuses (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS regions (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS conclusions (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    label TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS persons (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER REFERENCES categories(id),
    region_id   INTEGER REFERENCES regions(id),
    status_id   INTEGER REFERENCES statuses(id),
    fullname    TEXT NOT NULL,
    previous    TEXT,
    birthday    TEXT NOT NULL,   -- YYYY-MM-DD
    birthplace  TEXT,
    country     TEXT,
    ext_country TEXT,
    snils       TEXT,
    inn         TEXT,
    education   TEXT,
    marital     TEXT,
    addition    TEXT,
    path        TEXT,
    created     TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned once
    updated     TEXT             -- RFC 3339 UTC; server-assigned per update
);

CREATE TABLE IF NOT EXISTS staffs (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id  INTEGER NOT NULL REFERENCES persons(id),
    position   TEXT,
    department TEXT
);

CREATE TABLE IF NOT EXISTS documents (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES persons(id),
    view      TEXT,
    series    TEXT,
    number    TEXT,
    agency    TEXT,
    issue     TEXT
);

CREATE TABLE IF NOT EXISTS addresses (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES persons(id),
    view      TEXT,
    region    TEXT,
    address   TEXT
);

CREATE TABLE IF NOT EXISTS workplaces (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id  INTEGER NOT NULL REFERENCES persons(id),
    start_date TEXT,
    end_date   TEXT,
    workplace  TEXT,
    address    TEXT,
    position   TEXT,
    reason     TEXT
);

CREATE TABLE IF NOT EXISTS contacts (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES persons(id),
    view      TEXT,
    contact   TEXT
);

CREATE TABLE IF NOT EXISTS affiliations (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES persons(id),
    view      TEXT,
    name      TEXT,
    inn       TEXT,
    position  TEXT,
    deadline  TEXT
);

CREATE TABLE IF NOT EXISTS checks (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id     INTEGER NOT NULL REFERENCES persons(id),
    workplace     TEXT,
    document      TEXT,
    inn           TEXT,
    debt          TEXT,
    bankruptcy    TEXT,
    bki           TEXT,
    courts        TEXT,
    affiliation   TEXT,
    terrorist     TEXT,
    mvd           TEXT,
    internet      TEXT,
    cronos        TEXT,
    cros          TEXT,
    addition      TEXT,
    pfo           INTEGER,         -- 0 | 1 | NULL
    comments      TEXT,
    conclusion_id INTEGER REFERENCES conclusions(id),
    officer       TEXT,
    deadline      TEXT             -- RFC 3339 UTC; server-assigned per write
);

CREATE TABLE IF NOT EXISTS robots (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id  INTEGER NOT NULL REFERENCES persons(id),
    employee   TEXT,
    inn        TEXT,
    bankruptcy TEXT,
    bki        TEXT,
    courts     TEXT,
    terrorist  TEXT,
    mvd        TEXT,
    deadline   TEXT
);

CREATE TABLE IF NOT EXISTS inquiries (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES persons(id),
    info      TEXT,
    initiator TEXT,
    source    TEXT,
    officer   TEXT,
    deadline  TEXT
);

-- Standalone contact ledger; unrelated to persons.
CREATE TABLE IF NOT EXISTS connects (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    company  TEXT,
    city     TEXT,
    fullname TEXT,
    phone    TEXT,
    adding   TEXT,
    mobile   TEXT,
    mail     TEXT,
    comment  TEXT,
    updated  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS persons_fullname_idx   ON persons(fullname);
CREATE INDEX IF NOT EXISTS persons_birthday_idx   ON persons(birthday);
CREATE INDEX IF NOT EXISTS categories_label_idx   ON categories(label);
CREATE INDEX IF NOT EXISTS statuses_label_idx     ON statuses(label);
CREATE INDEX IF NOT EXISTS regions_label_idx      ON regions(label);
CREATE INDEX IF NOT EXISTS conclusions_label_idx  ON conclusions(label);
CREATE INDEX IF NOT EXISTS staffs_person_idx      ON staffs(person_id);
CREATE INDEX IF NOT EXISTS documents_person_idx   ON documents(person_id);
CREATE INDEX IF NOT EXISTS addresses_person_idx   ON addresses(person_id);
CREATE INDEX IF NOT EXISTS workplaces_person_idx  ON workplaces(person_id);
CREATE INDEX IF NOT EXISTS contacts_person_idx    ON contacts(person_id);
CREATE INDEX IF NOT EXISTS affiliations_person_idx ON affiliations(person_id);
CREATE INDEX IF NOT EXISTS checks_person_idx      ON checks(person_id);
CREATE INDEX IF NOT EXISTS robots_person_idx      ON robots(person_id);
CREATE INDEX IF NOT EXISTS inquiries_person_idx   ON inquiries(person_id);

PRAGMA user_version = 1;
";
