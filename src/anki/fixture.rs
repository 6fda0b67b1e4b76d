//! In-memory Anki collections for tests.

use std::path::Path;

use rusqlite::{
    params,
    Connection,
};

use super::collection::Collection;

pub const KANJI_MODEL_ID: i64 = 1_342_697_561_419;
pub const VOCAB_MODEL_ID: i64 = 1_342_697_561_420;

const SCHEMA: &str = r#"
CREATE TABLE col (
    id              integer primary key,
    crt             integer not null,
    mod             integer not null,
    scm             integer not null,
    ver             integer not null,
    dty             integer not null,
    usn             integer not null,
    ls              integer not null,
    conf            text not null,
    models          text not null,
    decks           text not null,
    dconf           text not null,
    tags            text not null
);
CREATE TABLE notes (
    id              integer primary key,
    guid            text not null,
    mid             integer not null,
    mod             integer not null,
    usn             integer not null,
    tags            text not null,
    flds            text not null,
    sfld            text not null,
    csum            integer not null,
    flags           integer not null,
    data            text not null
);
CREATE TABLE cards (
    id              integer primary key,
    nid             integer not null,
    did             integer not null,
    ord             integer not null,
    mod             integer not null,
    usn             integer not null,
    type            integer not null,
    queue           integer not null,
    due             integer not null,
    ivl             integer not null,
    factor          integer not null,
    reps            integer not null,
    lapses          integer not null,
    left            integer not null,
    odue            integer not null,
    odid            integer not null,
    flags           integer not null,
    data            text not null
);
CREATE TABLE revlog (
    id              integer primary key,
    cid             integer not null,
    usn             integer not null,
    ease            integer not null,
    ivl             integer not null,
    lastIvl         integer not null,
    factor          integer not null,
    time            integer not null,
    type            integer not null
);
CREATE INDEX ix_cards_nid on cards (nid);
"#;

const NOTETYPES_SCHEMA: &str = r#"
CREATE TABLE notetypes (
    id              integer primary key not null,
    name            text not null collate unicase,
    mtime_secs      integer not null,
    usn             integer not null,
    config          blob not null
);
CREATE TABLE fields (
    ntid            integer not null,
    ord             integer not null,
    name            text not null collate unicase,
    config          blob not null,
    PRIMARY KEY (ntid, ord)
);
"#;

struct FixtureModel {
    id: i64,
    name: String,
    fields: Vec<String>,
}

/// Builds a collection with a `Kanji` note type (`Kanji`, `Meaning`) and a `Vocab` note type
/// (`Expression`, `Reading`, `Meaning`). Cards are given as `(queue, ivl)` pairs.
pub struct CollectionBuilder {
    collection: Collection,
    models: Vec<FixtureModel>,
    notetypes_schema: bool,
    next_note_id: i64,
    next_card_id: i64,
}

impl CollectionBuilder {
    pub fn new() -> Self {
        Self::with_connection(Connection::open_in_memory().unwrap())
    }

    pub fn on_disk(path: &Path) -> Self {
        Self::with_connection(Connection::open(path).unwrap())
    }

    fn with_connection(conn: Connection) -> Self {
        let collection = Collection::from_connection(conn).unwrap();
        collection.connection().execute_batch(SCHEMA).unwrap();
        Self {
            collection,
            models: vec![
                FixtureModel {
                    id: KANJI_MODEL_ID,
                    name: "Kanji".to_string(),
                    fields: vec!["Kanji".to_string(), "Meaning".to_string()],
                },
                FixtureModel {
                    id: VOCAB_MODEL_ID,
                    name: "Vocab".to_string(),
                    fields: vec![
                        "Expression".to_string(),
                        "Reading".to_string(),
                        "Meaning".to_string(),
                    ],
                },
            ],
            notetypes_schema: false,
            next_note_id: 1_600_000_000_000,
            next_card_id: 1_600_000_000_000,
        }
    }

    /// Stores note types in the `notetypes`/`fields` tables and leaves `col.models` empty.
    pub fn with_notetypes_schema(mut self) -> Self {
        self.notetypes_schema = true;
        self
    }

    pub fn model(&mut self, id: i64, name: &str, fields: &[&str]) -> &mut Self {
        self.models.push(FixtureModel {
            id,
            name: name.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    pub fn kanji_note(&mut self, kanji: &str, cards: &[(i64, i64)]) -> i64 {
        self.note(KANJI_MODEL_ID, &[kanji, "meaning"], cards)
    }

    pub fn vocab_note(&mut self, expression: &str, cards: &[(i64, i64)]) -> i64 {
        self.note(VOCAB_MODEL_ID, &[expression, "よみ", "meaning"], cards)
    }

    pub fn note(&mut self, model_id: i64, fields: &[&str], cards: &[(i64, i64)]) -> i64 {
        let note_id = self.next_note_id;
        self.next_note_id += 1;

        let conn = self.collection.connection();
        conn.execute(
            "INSERT INTO notes (id, guid, mid, mod, usn, tags, flds, sfld, csum, flags, data)
             VALUES (?1, ?2, ?3, 0, 0, '', ?4, ?5, 0, 0, '')",
            params![
                note_id,
                format!("guid{}", note_id),
                model_id,
                fields.join("\u{1F}"),
                fields.first().copied().unwrap_or("")
            ],
        )
        .unwrap();

        for (ord, (queue, ivl)) in cards.iter().enumerate() {
            let card_id = self.next_card_id;
            self.next_card_id += 1;
            conn.execute(
                "INSERT INTO cards (id, nid, did, ord, mod, usn, type, queue, due, ivl, factor,
                                    reps, lapses, left, odue, odid, flags, data)
                 VALUES (?1, ?2, 1, ?3, 0, 0, 2, ?4, 0, ?5, 2500, 0, 0, 0, 0, 0, 0, '')",
                params![card_id, note_id, ord as i64, queue, ivl],
            )
            .unwrap();
        }
        note_id
    }

    pub fn build(self) -> Collection {
        let conn = self.collection.connection();
        if self.notetypes_schema {
            conn.execute_batch(NOTETYPES_SCHEMA).unwrap();
            for model in &self.models {
                conn.execute(
                    "INSERT INTO notetypes (id, name, mtime_secs, usn, config)
                     VALUES (?1, ?2, 0, 0, x'')",
                    params![model.id, model.name],
                )
                .unwrap();
                for (ord, field) in model.fields.iter().enumerate() {
                    conn.execute(
                        "INSERT INTO fields (ntid, ord, name, config) VALUES (?1, ?2, ?3, x'')",
                        params![model.id, ord as i64, field],
                    )
                    .unwrap();
                }
            }
            insert_col(conn, "{}");
        } else {
            let models: serde_json::Map<String, serde_json::Value> = self
                .models
                .iter()
                .map(|model| {
                    let flds: Vec<serde_json::Value> = model
                        .fields
                        .iter()
                        .enumerate()
                        .map(|(ord, name)| serde_json::json!({ "name": name, "ord": ord }))
                        .collect();
                    (
                        model.id.to_string(),
                        serde_json::json!({ "id": model.id, "name": model.name, "flds": flds }),
                    )
                })
                .collect();
            insert_col(conn, &serde_json::Value::Object(models).to_string());
        }
        self.collection
    }
}

fn insert_col(conn: &Connection, models: &str) {
    conn.execute(
        "INSERT INTO col (id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags)
         VALUES (1, 0, 0, 0, 11, 0, 0, 0, '{}', ?1, '{}', '{}', '{}')",
        params![models],
    )
    .unwrap();
}

/// Cards of the note as `(queue, mod)` pairs, read outside any transaction.
pub fn card_states(collection: &Collection, note_id: i64) -> Vec<(i64, i64)> {
    let mut stmt = collection
        .connection()
        .prepare("SELECT queue, mod FROM cards WHERE nid = ?1 ORDER BY id")
        .unwrap();
    stmt.query_map(params![note_id], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<rusqlite::Result<Vec<_>>>()
        .unwrap()
}
