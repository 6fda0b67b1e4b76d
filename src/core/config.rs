use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use super::SuspendError;
use crate::persistence::{
    get_anki_base_dir,
    get_app_data_dir,
};

pub const CONFIG_FILE: &str = "config.json";
pub const KANJI_LIST_FILE: &str = "kanji_list.txt";
pub const COLLECTION_FILE: &str = "collection.anki2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Anki profile folder under the Anki2 base directory
    pub profile: String,
    /// Overrides the profile-based collection location
    pub collection_path: Option<PathBuf>,
    pub kanji_list_path: Option<PathBuf>,
    /// Minimum card interval, in days, for a card to count as mature
    pub mature_days: u32,
    pub kanji_model_name: String,
    pub kanji_field_name: String,
    pub expression_field_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: "User 1".to_string(),
            collection_path: None,
            kanji_list_path: None,
            mature_days: 21,
            kanji_model_name: "Kanji".to_string(),
            kanji_field_name: "Kanji".to_string(),
            expression_field_name: "Expression".to_string(),
        }
    }
}

impl Config {
    /// Settings from the app data dir. Defaults are written out on first run so they can be edited.
    pub fn load_or_create() -> Self {
        Self::load_or_create_at(&get_app_data_dir().join(CONFIG_FILE))
    }

    pub fn load_or_create_at(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                log::warn!("Could not write default {}: {}", path.display(), e);
            }
            return config;
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, SuspendError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        log::debug!("Settings loaded from: {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), SuspendError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved to: {}", path.display());
        Ok(())
    }

    pub fn collection_path(&self) -> PathBuf {
        match &self.collection_path {
            Some(path) => path.clone(),
            None => get_anki_base_dir().join(&self.profile).join(COLLECTION_FILE),
        }
    }

    pub fn kanji_list_path(&self) -> PathBuf {
        match &self.kanji_list_path {
            Some(path) => path.clone(),
            None => get_app_data_dir().join(KANJI_LIST_FILE),
        }
    }
}
