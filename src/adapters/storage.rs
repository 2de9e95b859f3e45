use crate::domain::ports::DraftStore;
use crate::utils::error::{Result, StudioError};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed slot: `<base_path>/<key>.json`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
    key: String,
}

impl LocalStorage {
    pub fn new(base_path: String, key: String) -> Self {
        Self { base_path, key }
    }

    pub fn slot_path(&self) -> PathBuf {
        Path::new(&self.base_path).join(format!("{}.json", self.key))
    }
}

impl DraftStore for LocalStorage {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path()) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StudioError::IoError(e)),
        }
    }

    fn write(&self, payload: &str) -> Result<()> {
        let full_path = self.slot_path();

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write beside the slot and rename over it so readers never see a torn file.
        let staging = full_path.with_extension("json.tmp");
        fs::write(&staging, payload)?;
        if let Err(e) = fs::rename(&staging, &full_path) {
            let _ = fs::remove_file(&staging);
            return Err(StudioError::IoError(e));
        }

        tracing::debug!("Draft written to {}", full_path.display());
        Ok(())
    }
}

/// In-process slot for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<String>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(payload.into())),
            read_only: false,
        }
    }

    /// A slot that rejects every write.
    pub fn read_only(payload: Option<String>) -> Self {
        Self {
            slot: RefCell::new(payload),
            read_only: true,
        }
    }

    pub fn payload(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    pub fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

impl DraftStore for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn write(&self, payload: &str) -> Result<()> {
        if self.read_only {
            return Err(StudioError::StorageError {
                message: "slot is read-only".to_string(),
            });
        }
        *self.slot.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}
