use std::time::Instant;

use super::{
    Config,
    KanjiList,
    SuspendError,
};
use crate::anki::{
    CardStore,
    Collection,
    MaturityClassifier,
    SuspensionEngine,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub mature_kanji: usize,
    pub total_kanji: usize,
    pub cards_changed: usize,
}

/// Resolves the collection and kanji list from the settings and runs one pass.
pub fn run(config: &Config) -> Result<RunReport, SuspendError> {
    let collection_path = config.collection_path();
    log::info!("Using collection {}", collection_path.display());
    if !collection_path.exists() {
        return Err(SuspendError::DatabaseNotFound(collection_path));
    }

    let reference = KanjiList::load(&config.kanji_list_path())?;
    let mut collection = Collection::open(&collection_path)?;
    let mod_time = chrono::Utc::now().timestamp();

    process_collection(&mut collection, &reference, config, mod_time)
}

/// Classifies and suspends inside a single transaction. Nothing is written unless every
/// step succeeds.
pub fn process_collection(
    collection: &mut Collection,
    reference: &KanjiList,
    config: &Config,
    mod_time: i64,
) -> Result<RunReport, SuspendError> {
    let start = Instant::now();
    let tx = collection.transaction()?;
    log::debug!("{} reviews in collection", tx.review_count()?);

    let maturity = MaturityClassifier::new(config).classify(&tx, reference)?;
    println!("mature kanji count: {} / {}", maturity.mature_count(), maturity.total);

    println!("checking database (this could take a few minutes)");
    let cards_changed = SuspensionEngine::new(config, &maturity, mod_time).run(&tx)?;
    tx.commit()?;
    println!("updated card count: {}", cards_changed);

    log::info!("Finished in {:.1}s", start.elapsed().as_secs_f32());
    Ok(RunReport {
        mature_kanji: maturity.mature_count(),
        total_kanji: maturity.total,
        cards_changed,
    })
}
