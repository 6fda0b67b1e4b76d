use std::{
    collections::HashMap,
    path::Path,
    time::Duration,
};

use rusqlite::{
    params,
    Connection,
    OpenFlags,
    OptionalExtension,
    Transaction,
    TransactionBehavior,
};
use serde::Deserialize;

use super::types::{
    Card,
    FieldDef,
    Model,
    Note,
    QueueState,
    Review,
    USN_PENDING_SYNC,
};
use crate::core::SuspendError;

/// Read and update access to a collection, as used by the classifier and the suspension engine.
pub trait CardStore {
    fn models(&self) -> Result<Vec<Model>, SuspendError>;

    fn notes_for_model(&self, model_id: i64) -> Result<Vec<Note>, SuspendError>;

    fn cards_for_note(&self, note_id: i64) -> Result<Vec<Card>, SuspendError>;

    /// Suspends every card of the note that is not already suspended. Returns the number changed.
    fn suspend_cards(&self, note_id: i64, mod_time: i64) -> Result<usize, SuspendError>;

    /// Moves every suspended card of the note back to new. Returns the number changed.
    fn unsuspend_cards(&self, note_id: i64, mod_time: i64) -> Result<usize, SuspendError>;

    fn reviews_for_card(&self, card_id: i64) -> Result<Vec<Review>, SuspendError>;

    fn review_count(&self) -> Result<usize, SuspendError>;

    fn find_model(&self, name: &str) -> Result<Model, SuspendError> {
        self.models()?
            .into_iter()
            .find(|model| model.name == name)
            .ok_or_else(|| SuspendError::ModelNotFound(name.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct LegacyModel {
    name: String,
    flds: Vec<FieldDef>,
}

pub struct Collection {
    conn: Connection,
}

impl Collection {
    pub fn open(path: &Path) -> Result<Self, SuspendError> {
        if !path.exists() {
            return Err(SuspendError::DatabaseNotFound(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::debug!("Opened collection {}", path.display());
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, SuspendError> {
        // A lock held by Anki fails the run immediately instead of waiting
        conn.busy_timeout(Duration::ZERO)?;
        // Newer schemas declare note type and field names with Anki's unicase collation
        conn.create_collation("unicase", |a: &str, b: &str| {
            a.to_lowercase().cmp(&b.to_lowercase())
        })?;
        Ok(Self { conn })
    }

    /// Starts the write transaction the whole run happens in. Dropping it without
    /// [`CollectionTx::commit`] rolls everything back.
    pub fn transaction(&mut self) -> Result<CollectionTx<'_>, SuspendError> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        Ok(CollectionTx { tx })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

pub struct CollectionTx<'conn> {
    tx: Transaction<'conn>,
}

impl CollectionTx<'_> {
    pub fn commit(self) -> Result<(), SuspendError> {
        self.tx.commit()?;
        Ok(())
    }

    fn legacy_models(&self) -> Result<Vec<Model>, SuspendError> {
        let json: Option<String> = self
            .tx
            .query_row("SELECT models FROM col LIMIT 1", [], |row| row.get(0))
            .optional()?;
        let json = match json {
            Some(json) if !json.trim().is_empty() => json,
            _ => return Ok(Vec::new()),
        };

        let raw: HashMap<String, LegacyModel> = serde_json::from_str(&json)?;
        let mut models = raw
            .into_iter()
            .map(|(id, model)| {
                let id = id.parse::<i64>().map_err(|_| {
                    SuspendError::MalformedModels(format!("note type id {id:?} is not an integer"))
                })?;
                Ok(Model { id, name: model.name, fields: model.flds })
            })
            .collect::<Result<Vec<_>, SuspendError>>()?;
        models.sort_by_key(|model| model.id);
        Ok(models)
    }

    fn has_notetypes_table(&self) -> Result<bool, SuspendError> {
        let count: i64 = self.tx.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'notetypes'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn notetype_models(&self) -> Result<Vec<Model>, SuspendError> {
        let mut stmt = self.tx.prepare("SELECT id, name FROM notetypes ORDER BY id")?;
        let types = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut field_stmt =
            self.tx.prepare("SELECT name, ord FROM fields WHERE ntid = ?1 ORDER BY ord")?;
        let mut models = Vec::with_capacity(types.len());
        for (id, name) in types {
            let fields = field_stmt
                .query_map(params![id], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?
                .into_iter()
                .map(|(field_name, ord)| {
                    let ord = usize::try_from(ord).map_err(|_| {
                        SuspendError::MalformedModels(format!(
                            "field {field_name:?} of note type {name:?} has ordinal {ord}"
                        ))
                    })?;
                    Ok(FieldDef { name: field_name, ord })
                })
                .collect::<Result<Vec<_>, SuspendError>>()?;
            models.push(Model { id, name, fields });
        }
        Ok(models)
    }

    fn transition_cards(
        &self,
        note_id: i64,
        sql: &str,
        mod_time: i64,
    ) -> Result<usize, SuspendError> {
        let mut stmt = self.tx.prepare_cached(sql)?;
        let changed = stmt.execute(params![note_id, mod_time, USN_PENDING_SYNC])?;
        Ok(changed)
    }
}

impl CardStore for CollectionTx<'_> {
    fn models(&self) -> Result<Vec<Model>, SuspendError> {
        let models = self.legacy_models()?;
        if !models.is_empty() || !self.has_notetypes_table()? {
            return Ok(models);
        }
        self.notetype_models()
    }

    fn notes_for_model(&self, model_id: i64) -> Result<Vec<Note>, SuspendError> {
        let mut stmt =
            self.tx.prepare_cached("SELECT id, mid, flds FROM notes WHERE mid = ?1 ORDER BY id")?;
        let notes = stmt
            .query_map(params![model_id], |row| {
                let flds: String = row.get(2)?;
                Ok(Note::new(row.get(0)?, row.get(1)?, &flds))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn cards_for_note(&self, note_id: i64) -> Result<Vec<Card>, SuspendError> {
        let mut stmt = self.tx.prepare_cached(
            "SELECT id, nid, queue, ivl, mod, usn FROM cards WHERE nid = ?1 ORDER BY id",
        )?;
        let cards = stmt
            .query_map(params![note_id], |row| {
                Ok(Card {
                    id: row.get(0)?,
                    note_id: row.get(1)?,
                    queue: QueueState::from(row.get::<_, i64>(2)?),
                    interval: row.get(3)?,
                    modified: row.get(4)?,
                    usn: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    fn suspend_cards(&self, note_id: i64, mod_time: i64) -> Result<usize, SuspendError> {
        self.transition_cards(
            note_id,
            "UPDATE cards SET queue = -1, mod = ?2, usn = ?3 WHERE nid = ?1 AND queue != -1",
            mod_time,
        )
    }

    fn unsuspend_cards(&self, note_id: i64, mod_time: i64) -> Result<usize, SuspendError> {
        self.transition_cards(
            note_id,
            "UPDATE cards SET queue = 0, mod = ?2, usn = ?3 WHERE nid = ?1 AND queue = -1",
            mod_time,
        )
    }

    fn reviews_for_card(&self, card_id: i64) -> Result<Vec<Review>, SuspendError> {
        let mut stmt = self.tx.prepare_cached(
            "SELECT id, cid, ease, ivl, lastIvl FROM revlog WHERE cid = ?1 ORDER BY id",
        )?;
        let reviews = stmt
            .query_map(params![card_id], |row| {
                Ok(Review {
                    id: row.get(0)?,
                    card_id: row.get(1)?,
                    ease: row.get(2)?,
                    interval: row.get(3)?,
                    last_interval: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reviews)
    }

    fn review_count(&self) -> Result<usize, SuspendError> {
        let count: i64 = self.tx.query_row("SELECT COUNT(*) FROM revlog", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
