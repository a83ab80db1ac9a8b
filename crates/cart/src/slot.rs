//! The durable local slot the cart persists to.
//!
//! A slot is a single named key-value entry surviving reloads on the same
//! device. [`FileSlot`] keeps it as one file in the app's data directory;
//! [`MemorySlot`] backs tests and reload simulations.
//!
//! Slots distinguish "absent" from "empty": after [`CartSlot::clear`] a
//! load reports no snapshot at all, which the store uses so a reload sees
//! "no cart" rather than "empty cart".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors from reading or writing a slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// The underlying storage failed (quota, permissions, disk).
    #[error("slot I/O error: {0}")]
    Io(#[from] io::Error),
    /// The slot lock was poisoned by a panicking writer.
    #[error("slot lock poisoned")]
    Poisoned,
}

/// A durable local key-value slot.
///
/// Implementations must treat a missing entry as `Ok(None)`, never as an
/// error: an absent cart is a normal first-visit state.
pub trait CartSlot {
    /// Read the persisted snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError`] if the storage itself fails; a missing entry
    /// is `Ok(None)`.
    fn load(&self) -> Result<Option<String>, SlotError>;

    /// Write the snapshot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError`] if the write fails (e.g. quota exceeded).
    fn save(&self, snapshot: &str) -> Result<(), SlotError>;

    /// Remove the entry entirely, so a later [`CartSlot::load`] reports
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError`] if the removal fails; clearing an already
    /// absent entry succeeds.
    fn clear(&self) -> Result<(), SlotError>;
}

/// A slot stored as one file under a data directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot for `key` inside `data_dir`.
    ///
    /// The file is `{data_dir}/{key}.json`; the directory is created on
    /// first write.
    #[must_use]
    pub fn new(data_dir: &Path, key: &str) -> Self {
        Self {
            path: data_dir.join(format!("{key}.json")),
        }
    }

    /// The file backing this slot.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartSlot for FileSlot {
    fn load(&self) -> Result<Option<String>, SlotError> {
        match fs::read_to_string(&self.path) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, snapshot: &str) -> Result<(), SlotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, snapshot)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SlotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// An in-memory slot, shared between clones.
///
/// Clones share the same entry, which lets a test hand one clone to a
/// store, drop the store, and open a fresh store on the other clone to
/// simulate a reload.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entry: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    /// Create an empty in-memory slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-populated with a snapshot.
    #[must_use]
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            entry: Arc::new(Mutex::new(Some(snapshot.into()))),
        }
    }
}

impl CartSlot for MemorySlot {
    fn load(&self) -> Result<Option<String>, SlotError> {
        let entry = self.entry.lock().map_err(|_| SlotError::Poisoned)?;
        Ok(entry.clone())
    }

    fn save(&self, snapshot: &str) -> Result<(), SlotError> {
        let mut entry = self.entry.lock().map_err(|_| SlotError::Poisoned)?;
        *entry = Some(snapshot.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SlotError> {
        let mut entry = self.entry.lock().map_err(|_| SlotError::Poisoned)?;
        *entry = None;
        Ok(())
    }
}
