use std::{
    fs,
    path::PathBuf,
};

const APP_NAME: &str = "kanji-suspend";
const ANKI_DIR_NAME: &str = "Anki2";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

/// Where Anki keeps its profiles: `~/Library/Application Support/Anki2` on macOS,
/// `~/.local/share/Anki2` on Linux and `%APPDATA%\Anki2` on Windows.
pub fn get_anki_base_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join(ANKI_DIR_NAME),
        None => PathBuf::from(ANKI_DIR_NAME),
    }
}
