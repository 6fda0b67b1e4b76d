use super::{
    collection::CardStore,
    maturity::MaturityReport,
    types::Note,
};
use crate::core::{
    utils::NormalizeKanji,
    Config,
    SuspendError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Some character is still immature
    Suspend,
    /// Nothing immature, which includes an expression with no kanji at all
    Unsuspend,
}

/// Decides what happens to a note's cards given its raw expression.
pub fn decide(expression: &str, report: &MaturityReport) -> Transition {
    let expression = expression.normalize_kanji();
    let mut chars = expression.chars().map(|c| c.to_string());
    if chars.any(|c| report.is_immature(&c)) {
        Transition::Suspend
    } else {
        Transition::Unsuspend
    }
}

pub struct SuspensionEngine<'a> {
    config: &'a Config,
    report: &'a MaturityReport,
    mod_time: i64,
}

impl<'a> SuspensionEngine<'a> {
    pub fn new(config: &'a Config, report: &'a MaturityReport, mod_time: i64) -> Self {
        Self { config, report, mod_time }
    }

    /// Runs over every non-kanji note type that has an expression field and
    /// returns how many cards changed queue.
    pub fn run(&self, store: &impl CardStore) -> Result<usize, SuspendError> {
        let mut cards_changed = 0;

        for model in store.models()? {
            if model.name == self.config.kanji_model_name {
                continue;
            }
            let Some(expression_ord) = model.field_ord(&self.config.expression_field_name) else {
                log::debug!(
                    "Skipping note type {}: no {} field",
                    model.name,
                    self.config.expression_field_name
                );
                continue;
            };

            let mut model_changed = 0;
            for note in store.notes_for_model(model.id)? {
                model_changed += self.apply(store, &note, expression_ord)?;
            }
            log::info!("{}: {} cards changed", model.name, model_changed);
            cards_changed += model_changed;
        }

        Ok(cards_changed)
    }

    fn apply(
        &self,
        store: &impl CardStore,
        note: &Note,
        expression_ord: usize,
    ) -> Result<usize, SuspendError> {
        let expression = note.field(expression_ord);
        let transition = decide(expression, self.report);
        let changed = match transition {
            Transition::Suspend => store.suspend_cards(note.id, self.mod_time)?,
            Transition::Unsuspend => store.unsuspend_cards(note.id, self.mod_time)?,
        };
        if changed > 0 {
            log::debug!("{:?} {} cards of note {} ({})", transition, changed, note.id, expression);
        }
        Ok(changed)
    }
}
