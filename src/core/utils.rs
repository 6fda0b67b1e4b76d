use unicode_normalization::UnicodeNormalization;

/// Legacy or variant kanji paired with the form used by the kanji list.
pub const KANJI_VARIANTS: [(char, char); 7] = [
    ('填', '塡'),
    ('剥', '剝'),
    ('頬', '頰'),
    ('叱', '𠮟'),
    ('喻', '喩'),
    ('䇳', '箋'),
    ('篭', '籠'),
];

pub fn preferred_variant(c: char) -> char {
    KANJI_VARIANTS
        .iter()
        .find(|(legacy, _)| *legacy == c)
        .map(|(_, preferred)| *preferred)
        .unwrap_or(c)
}

/// NFC composition followed by the legacy variant remap.
pub trait NormalizeKanji {
    fn normalize_kanji(&self) -> String;
}

impl NormalizeKanji for str {
    fn normalize_kanji(&self) -> String {
        self.nfc().map(preferred_variant).collect()
    }
}

impl NormalizeKanji for String {
    fn normalize_kanji(&self) -> String {
        self.as_str().normalize_kanji()
    }
}

impl NormalizeKanji for char {
    fn normalize_kanji(&self) -> String {
        let mut buffer = [0; 4];
        self.encode_utf8(&mut buffer).normalize_kanji()
    }
}
