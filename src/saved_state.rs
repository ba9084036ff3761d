use std::path::PathBuf;
use std::{fs, io};

use directories::ProjectDirs;
use thiserror::Error;

use crate::camera::CameraConfig;
use crate::slide::{default_sections, default_slides, Section, SlideData};

pub const SLIDES_KEY: &str = "radikal_slides";
pub const SECTIONS_KEY: &str = "radikal_sections";
pub const CAMERA_KEY: &str = "radikal_camera";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Keyed JSON-string storage, the device-local equivalent of browser local
/// storage. One value per key, no partial writes.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Stores each key as one JSON file under the per-user data directory.
pub struct DiskStorage {
    dir: PathBuf,
}

impl DiskStorage {
    pub fn new() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("fun", "radikals", "Radikal")
            .ok_or_else(|| StorageError::Unavailable("no home directory".to_string()))?;
        let dir = dirs.data_dir().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn at(dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for DiskStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for tests and headless sessions.
#[derive(Default)]
pub struct MemoryStorage {
    entries: std::collections::HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// The three persisted pieces of a document, loaded independently so one
/// corrupt key never takes the others down with it.
pub struct LoadedDocument {
    pub slides: Vec<SlideData>,
    pub sections: Vec<Section>,
    pub camera_config: CameraConfig,
}

/// Load the document, falling back to the built-in defaults per key on any
/// read or parse failure. Never errors: a broken store means a fresh deck,
/// not a crash.
pub fn load_document(storage: &dyn Storage) -> LoadedDocument {
    let slides = match storage.read(SLIDES_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<SlideData>>(&raw) {
            Ok(slides) => slides,
            Err(e) => {
                log::warn!("failed to parse saved slides, using defaults: {}", e);
                default_slides()
            }
        },
        Ok(None) => default_slides(),
        Err(e) => {
            log::warn!("failed to read saved slides, using defaults: {}", e);
            default_slides()
        }
    };

    let sections = match storage.read(SECTIONS_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<Section>>(&raw) {
            Ok(sections) => sections,
            Err(e) => {
                log::warn!("failed to parse saved sections, using defaults: {}", e);
                default_sections()
            }
        },
        Ok(None) => default_sections(),
        Err(e) => {
            log::warn!("failed to read saved sections, using defaults: {}", e);
            default_sections()
        }
    };

    let camera_config = match storage.read(CAMERA_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => CameraConfig::from_saved_value(&value),
            Err(e) => {
                log::warn!("failed to parse saved camera config, using defaults: {}", e);
                CameraConfig::default()
            }
        },
        Ok(None) => CameraConfig::default(),
        Err(e) => {
            log::warn!("failed to read saved camera config, using defaults: {}", e);
            CameraConfig::default()
        }
    };

    LoadedDocument {
        slides,
        sections,
        camera_config,
    }
}

/// Write all three keys. Failures are logged and dropped; persistence is
/// best-effort and must never interrupt editing.
pub fn persist_document(
    storage: &mut dyn Storage,
    slides: &[SlideData],
    sections: &[Section],
    camera_config: &CameraConfig,
) {
    match serde_json::to_string(slides) {
        Ok(json) => {
            if let Err(e) = storage.write(SLIDES_KEY, &json) {
                log::warn!("failed to save slides: {}", e);
            }
        }
        Err(e) => log::warn!("failed to serialize slides: {}", e),
    }

    match serde_json::to_string(sections) {
        Ok(json) => {
            if let Err(e) = storage.write(SECTIONS_KEY, &json) {
                log::warn!("failed to save sections: {}", e);
            }
        }
        Err(e) => log::warn!("failed to serialize sections: {}", e),
    }

    match serde_json::to_string(camera_config) {
        Ok(json) => {
            if let Err(e) = storage.write(CAMERA_KEY, &json) {
                log::warn!("failed to save camera config: {}", e);
            }
        }
        Err(e) => log::warn!("failed to serialize camera config: {}", e),
    }
}

/// Drop all three keys (used by reset).
pub fn clear_document(storage: &mut dyn Storage) {
    for key in [SLIDES_KEY, SECTIONS_KEY, CAMERA_KEY] {
        if let Err(e) = storage.remove(key) {
            log::warn!("failed to clear {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_empty_storage_uses_defaults() {
        let storage = MemoryStorage::new();
        let doc = load_document(&storage);
        assert_eq!(doc.slides, default_slides());
        assert_eq!(doc.sections, default_sections());
        assert_eq!(doc.camera_config, CameraConfig::default());
    }

    #[test]
    fn test_malformed_json_falls_back_per_key() {
        let mut storage = MemoryStorage::new();
        storage.write(SLIDES_KEY, "not json{{").unwrap();
        storage
            .write(SECTIONS_KEY, r#"[{"id":"sec9","title":"Kept"}]"#)
            .unwrap();

        let doc = load_document(&storage);
        assert_eq!(doc.slides, default_slides());
        assert_eq!(doc.sections[0].id, "sec9");
    }

    #[test]
    fn test_round_trip_through_storage() {
        let mut storage = MemoryStorage::new();
        let slides = default_slides();
        let sections = default_sections();
        let mut camera = CameraConfig::default();
        camera.radius = 11.0;

        persist_document(&mut storage, &slides, &sections, &camera);
        let doc = load_document(&storage);

        assert_eq!(doc.slides, slides);
        assert_eq!(doc.sections, sections);
        assert_eq!(doc.camera_config.radius, 11.0);
    }

    #[test]
    fn test_camera_legacy_fields_migrate_on_load() {
        let mut storage = MemoryStorage::new();
        storage
            .write(CAMERA_KEY, r#"{"distance": 22.0, "height": 4.0, "radius": 9.0}"#)
            .unwrap();

        let doc = load_document(&storage);
        assert_eq!(doc.camera_config.overview_distance, 22.0);
        assert_eq!(doc.camera_config.overview_height, 4.0);
        assert_eq!(doc.camera_config.radius, 9.0);
    }

    #[test]
    fn test_clear_removes_all_keys() {
        let mut storage = MemoryStorage::new();
        persist_document(
            &mut storage,
            &default_slides(),
            &default_sections(),
            &CameraConfig::default(),
        );
        clear_document(&mut storage);
        assert!(storage.read(SLIDES_KEY).unwrap().is_none());
        assert!(storage.read(SECTIONS_KEY).unwrap().is_none());
        assert!(storage.read(CAMERA_KEY).unwrap().is_none());
    }

    #[test]
    fn test_disk_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = DiskStorage::at(dir.path().to_path_buf()).unwrap();

        assert!(storage.read(SLIDES_KEY).unwrap().is_none());
        storage.write(SLIDES_KEY, "[]").unwrap();
        assert_eq!(storage.read(SLIDES_KEY).unwrap().as_deref(), Some("[]"));
        storage.remove(SLIDES_KEY).unwrap();
        assert!(storage.read(SLIDES_KEY).unwrap().is_none());
        // removing a missing key is fine
        storage.remove(SLIDES_KEY).unwrap();
    }
}
