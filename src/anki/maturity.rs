use std::collections::HashSet;

use super::collection::CardStore;
use crate::core::{
    kanji_list::KanjiList,
    utils::NormalizeKanji,
    Config,
    SuspendError,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaturityReport {
    /// Kanji taken from mature notes of the kanji note type, normalized
    pub mature: HashSet<String>,
    /// Reference kanji that are not mature
    pub immature: HashSet<String>,
    /// Size of the reference list
    pub total: usize,
}

impl MaturityReport {
    /// How many reference kanji are mature.
    pub fn mature_count(&self) -> usize {
        self.total - self.immature.len()
    }

    pub fn is_immature(&self, kanji: &str) -> bool {
        self.immature.contains(kanji)
    }
}

pub struct MaturityClassifier<'a> {
    config: &'a Config,
}

impl<'a> MaturityClassifier<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Kanji whose notes have only cards at or above the maturity interval.
    pub fn mature_kanji(&self, store: &impl CardStore) -> Result<HashSet<String>, SuspendError> {
        let kanji_model = store.find_model(&self.config.kanji_model_name)?;
        let kanji_ord = kanji_model.field_ord(&self.config.kanji_field_name).ok_or_else(|| {
            SuspendError::FieldNotFound {
                model: kanji_model.name.clone(),
                field: self.config.kanji_field_name.clone(),
            }
        })?;

        let mut mature = HashSet::new();
        for note in store.notes_for_model(kanji_model.id)? {
            let cards = store.cards_for_note(note.id)?;
            // Notes without cards never count
            if cards.is_empty() {
                continue;
            }
            if !cards.iter().all(|card| card.is_mature(self.config.mature_days)) {
                continue;
            }
            if let Some(kanji) = note.field(kanji_ord).chars().next() {
                mature.insert(kanji.normalize_kanji());
            }
        }

        log::debug!("{} kanji notes are mature", mature.len());
        Ok(mature)
    }

    pub fn classify(
        &self,
        store: &impl CardStore,
        reference: &KanjiList,
    ) -> Result<MaturityReport, SuspendError> {
        let mature = self.mature_kanji(store)?;
        let immature: HashSet<String> =
            reference.iter().filter(|kanji| !mature.contains(*kanji)).cloned().collect();

        Ok(MaturityReport { mature, immature, total: reference.len() })
    }
}
