//! Working session around one hotel
//!
//! Tracks the file the hotel belongs to and a fingerprint of the state last
//! saved or loaded, so callers can tell whether there are unsaved changes.

use std::path::{Path, PathBuf};

use crate::application::hash::hotel_hash;
use crate::application::ApplicationResult;
use crate::domain::Hotel;

#[derive(Debug, Clone)]
pub struct HotelSession {
    hotel: Hotel,
    file: Option<PathBuf>,
    baseline: String,
}

impl HotelSession {
    /// Fresh session with no associated file. An empty hotel is clean.
    pub fn new(hotel: Hotel) -> ApplicationResult<Self> {
        let baseline = hotel_hash(&hotel)?;
        Ok(Self {
            hotel,
            file: None,
            baseline,
        })
    }

    /// Clean session bound to `file`.
    pub fn open(hotel: Hotel, file: &Path) -> ApplicationResult<Self> {
        let mut session = Self::new(hotel)?;
        session.associate(file);
        Ok(session)
    }

    pub fn hotel(&self) -> &Hotel {
        &self.hotel
    }

    pub fn hotel_mut(&mut self) -> &mut Hotel {
        &mut self.hotel
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Whether the hotel differs from its last saved or loaded state.
    pub fn is_modified(&self) -> ApplicationResult<bool> {
        Ok(hotel_hash(&self.hotel)? != self.baseline)
    }

    /// Take the current state as the new baseline.
    pub fn mark_clean(&mut self) -> ApplicationResult<()> {
        self.baseline = hotel_hash(&self.hotel)?;
        Ok(())
    }

    pub(crate) fn associate(&mut self, file: &Path) {
        self.file = Some(file.to_path_buf());
    }
}
