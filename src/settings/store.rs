//! INI-backed persistence for the settings record

use std::{
    fs,
    path::{Path, PathBuf},
};

use ini::{Ini, Properties};
use tracing::{debug, error, info, warn};

use super::record::{is_valid_color, FontSize, SettingsRecord};
use crate::error::SettingsError;

pub const SECTION: &str = "Settings";
pub const KEY_FONT: &str = "font";
pub const KEY_FONT_SIZE: &str = "font_size";
pub const KEY_TEXT_COLOR: &str = "text_color";
pub const KEY_BG_COLOR: &str = "bg_color";

/// Owns the in-memory settings record and its file on disk.
///
/// Every mutation is written through immediately. A failed write is returned
/// to the caller but the in-memory record keeps the new value.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    record: SettingsRecord,
}

impl SettingsStore {
    /// Create a store for `path` holding defaults until `load` is called
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            record: SettingsRecord::default(),
        }
    }

    /// Create a store and load it, logging a failed first-run write
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);
        if let Err(e) = store.load() {
            error!("{}", e);
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> &SettingsRecord {
        &self.record
    }

    /// Load the record from disk.
    ///
    /// A missing file is created with defaults. Unreadable files and missing
    /// or malformed keys fall back to defaults per key. The only error
    /// returned is a failure to write the defaults on first run.
    pub fn load(&mut self) -> Result<SettingsRecord, SettingsError> {
        if !self.path.exists() {
            info!(
                "No settings at {}, creating defaults",
                self.path.display()
            );
            self.record = SettingsRecord::default();
            self.persist()?;
            return Ok(self.record.clone());
        }

        self.record = match Ini::load_from_file(&self.path) {
            Ok(conf) => match conf.section(Some(SECTION)) {
                Some(section) => record_from_section(section),
                None => {
                    warn!(
                        "Settings file {} has no [{}] section, using defaults",
                        self.path.display(),
                        SECTION
                    );
                    SettingsRecord::default()
                }
            },
            Err(source) => {
                let e = SettingsError::Read {
                    path: self.path.clone(),
                    source,
                };
                warn!("{}, using defaults", e);
                SettingsRecord::default()
            }
        };

        debug!("Loaded settings: {:?}", self.record);
        Ok(self.record.clone())
    }

    /// Replace the whole record and persist it
    pub fn save(&mut self, record: SettingsRecord) -> Result<(), SettingsError> {
        self.record = record;
        self.persist()
    }

    pub fn set_font(&mut self, font: impl Into<String>) -> Result<(), SettingsError> {
        self.record.font_family = font.into();
        info!("Font set to {}", self.record.font_family);
        self.persist()
    }

    pub fn set_font_size(&mut self, size: FontSize) -> Result<(), SettingsError> {
        self.record.font_size = size;
        info!("Font size set to {}", size);
        self.persist()
    }

    pub fn set_text_color(&mut self, color: impl Into<String>) -> Result<(), SettingsError> {
        self.record.text_color = color.into();
        info!("Text color set to {}", self.record.text_color);
        self.persist()
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) -> Result<(), SettingsError> {
        self.record.background_color = color.into();
        info!("Background color set to {}", self.record.background_color);
        self.persist()
    }

    fn persist(&self) -> Result<(), SettingsError> {
        let write_error = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let mut conf = Ini::new();
        conf.with_section(Some(SECTION))
            .set(KEY_FONT, self.record.font_family.as_str())
            .set(KEY_FONT_SIZE, self.record.font_size.to_string())
            .set(KEY_TEXT_COLOR, self.record.text_color.as_str())
            .set(KEY_BG_COLOR, self.record.background_color.as_str());
        conf.write_to_file(&self.path).map_err(write_error)?;

        debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}

fn record_from_section(section: &Properties) -> SettingsRecord {
    let defaults = SettingsRecord::default();

    let font_family = section
        .get(KEY_FONT)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback(KEY_FONT, defaults.font_family.clone()));

    let font_size = section
        .get(KEY_FONT_SIZE)
        .and_then(|s| s.trim().parse::<u32>().ok())
        .and_then(|n| FontSize::try_from(n).ok())
        .unwrap_or_else(|| fallback(KEY_FONT_SIZE, defaults.font_size));

    let text_color = read_color(section, KEY_TEXT_COLOR)
        .unwrap_or_else(|| fallback(KEY_TEXT_COLOR, defaults.text_color.clone()));

    let background_color = read_color(section, KEY_BG_COLOR)
        .unwrap_or_else(|| fallback(KEY_BG_COLOR, defaults.background_color.clone()));

    SettingsRecord {
        font_family,
        font_size,
        text_color,
        background_color,
    }
}

fn read_color(section: &Properties, key: &str) -> Option<String> {
    section
        .get(key)
        .map(str::trim)
        .filter(|c| is_valid_color(c))
        .map(str::to_string)
}

fn fallback<T: std::fmt::Debug>(key: &str, default: T) -> T {
    warn!("Settings key '{}' missing or malformed, using {:?}", key, default);
    default
}
