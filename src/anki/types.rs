use serde::Deserialize;

/// Separates field values inside a note's `flds` column.
pub const FIELD_SEPARATOR: char = '\u{1F}';

/// Usn marking a row as changed locally and pending sync.
pub const USN_PENDING_SYNC: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ord: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub id: i64,
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl Model {
    pub fn field_ord(&self, field_name: &str) -> Option<usize> {
        self.fields.iter().find(|field| field.name == field_name).map(|field| field.ord)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub model_id: i64,
    pub fields: Vec<String>,
}

impl Note {
    pub fn new(id: i64, model_id: i64, flds: &str) -> Self {
        Self { id, model_id, fields: flds.split(FIELD_SEPARATOR).map(str::to_string).collect() }
    }

    /// Field value by ordinal; a missing ordinal reads as empty.
    pub fn field(&self, ord: usize) -> &str {
        self.fields.get(ord).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    Suspended,
    New,
    /// Learning, review, buried and so on. Never touched here.
    Other(i64),
}

impl QueueState {
    pub const SUSPENDED: i64 = -1;
    pub const NEW: i64 = 0;

    pub fn code(self) -> i64 {
        match self {
            QueueState::Suspended => Self::SUSPENDED,
            QueueState::New => Self::NEW,
            QueueState::Other(code) => code,
        }
    }
}

impl From<i64> for QueueState {
    fn from(code: i64) -> Self {
        match code {
            Self::SUSPENDED => QueueState::Suspended,
            Self::NEW => QueueState::New,
            other => QueueState::Other(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: i64,
    pub note_id: i64,
    pub queue: QueueState,
    pub interval: i64, // Days
    pub modified: i64,
    pub usn: i64,
}

impl Card {
    pub fn is_suspended(&self) -> bool {
        self.queue == QueueState::Suspended
    }

    pub fn is_mature(&self, mature_days: u32) -> bool {
        self.interval >= i64::from(mature_days)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub card_id: i64,
    pub ease: i64,
    pub interval: i64,
    pub last_interval: i64,
}
