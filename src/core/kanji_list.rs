use std::{
    collections::HashSet,
    fs,
    path::Path,
};

use wana_kana::IsJapaneseChar;

use super::{
    utils::NormalizeKanji,
    SuspendError,
};

/// The reference kanji, e.g. a curriculum list.
/// Order and duplicates in the source file are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanjiList {
    chars: HashSet<String>,
}

impl KanjiList {
    pub fn load(path: &Path) -> Result<Self, SuspendError> {
        if !path.exists() {
            return Err(SuspendError::KanjiListNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let list = Self::parse(&content);
        log::info!("Loaded {} reference kanji from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn parse(content: &str) -> Self {
        let mut chars = HashSet::new();
        for c in content.trim().chars().filter(|c| !c.is_whitespace()) {
            if !c.is_kanji() {
                log::warn!("Reference list entry {:?} is not a kanji", c);
            }
            chars.insert(c.normalize_kanji());
        }
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, kanji: &str) -> bool {
        self.chars.contains(kanji)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.chars.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KanjiList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::parse(&iter.into_iter().map(|s| s.as_ref().to_string()).collect::<String>())
    }
}
