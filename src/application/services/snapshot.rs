//! JSON snapshots of the whole hotel
//!
//! A snapshot is the serde rendition of [`Hotel`]; loading one restores an
//! equal hotel, including the current season and the vaccination registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::session::HotelSession;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::Hotel;
use crate::infrastructure::traits::FileSystem;

/// Service reading and writing hotel snapshots.
pub struct SnapshotService {
    fs: Arc<dyn FileSystem>,
    pretty: bool,
}

impl SnapshotService {
    pub fn new(fs: Arc<dyn FileSystem>, pretty: bool) -> Self {
        Self { fs, pretty }
    }

    /// Load the snapshot at `path` into a clean session bound to it.
    #[instrument(skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<HotelSession> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read snapshot", path)?;
        let hotel: Hotel =
            serde_json::from_str(&content).map_err(|source| ApplicationError::Snapshot {
                context: format!("parse {}", path.display()),
                source,
            })?;
        debug!("load: season={}", hotel.season());
        HotelSession::open(hotel, path)
    }

    /// Load `path` when it exists, otherwise start an empty hotel bound to it.
    pub fn load_or_new(&self, path: &Path) -> ApplicationResult<HotelSession> {
        if self.fs.exists(path) {
            self.load(path)
        } else {
            debug!("load_or_new: no snapshot at {}", path.display());
            HotelSession::open(Hotel::new(), path)
        }
    }

    /// Save to the session's associated file.
    pub fn save(&self, session: &mut HotelSession) -> ApplicationResult<()> {
        let path = session
            .file()
            .ok_or(ApplicationError::MissingFileAssociation)?
            .to_path_buf();
        self.write(session.hotel(), &path)?;
        session.mark_clean()
    }

    /// Save to `path` and associate the session with it.
    pub fn save_as(&self, session: &mut HotelSession, path: &Path) -> ApplicationResult<()> {
        self.write(session.hotel(), path)?;
        session.associate(path);
        session.mark_clean()
    }

    #[instrument(skip(self, hotel))]
    fn write(&self, hotel: &Hotel, path: &Path) -> ApplicationResult<()> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(hotel)
        } else {
            serde_json::to_string(hotel)
        }
        .map_err(|source| ApplicationError::Snapshot {
            context: format!("serialize {}", path.display()),
            source,
        })?;

        self.fs
            .ensure_parent(path)
            .with_path_context("create snapshot directory", path)?;
        // staging file, then rename over the target
        let staging = staging_path(path);
        self.fs
            .write(&staging, &rendered)
            .with_path_context("write snapshot", &staging)?;
        self.fs
            .rename(&staging, path)
            .with_path_context("replace snapshot", path)?;
        debug!("write: {} bytes", rendered.len());
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
