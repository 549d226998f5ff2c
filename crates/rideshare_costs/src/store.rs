use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{error::StoreError, metrics::RideMetrics};

/// Persistence of finalized rides.
pub trait RideStore: Send + Sync {
    /// Stores `ride`, replacing any ride with the same id.
    fn save(&self, ride: &RideMetrics) -> Result<(), StoreError>;

    /// All stored rides, most recent first.
    fn list(&self) -> Result<Vec<RideMetrics>, StoreError>;
}

fn sort_most_recent_first(rides: &mut [RideMetrics]) {
    rides.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[derive(Default)]
pub struct InMemoryRideStore {
    rides: RwLock<Vec<RideMetrics>>,
}

impl InMemoryRideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RideStore for InMemoryRideStore {
    fn save(&self, ride: &RideMetrics) -> Result<(), StoreError> {
        let mut rides = self.rides.write();
        rides.retain(|stored| stored.id != ride.id);
        rides.push(ride.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<RideMetrics>, StoreError> {
        let mut rides = self.rides.read().clone();
        sort_most_recent_first(&mut rides);
        Ok(rides)
    }
}

/// One `{id}.json` file per ride.
pub struct JsonFolderRideStore {
    folder: PathBuf,
}

impl JsonFolderRideStore {
    pub fn new<P: AsRef<Path>>(folder: P) -> Result<Self, StoreError> {
        let folder = folder.as_ref().to_path_buf();
        std::fs::create_dir_all(&folder)?;
        Ok(Self { folder })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn file_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        let is_valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !is_valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }

        Ok(self.folder.join(format!("{}.json", id)))
    }
}

impl RideStore for JsonFolderRideStore {
    fn save(&self, ride: &RideMetrics) -> Result<(), StoreError> {
        let path = self.file_path(&ride.id)?;

        let file = File::create(&path)?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        serde_json::to_writer_pretty(&mut writer, ride)?;
        writer.flush()?;

        debug!("Saved ride {} to {}", ride.id, path.display());
        Ok(())
    }

    fn list(&self) -> Result<Vec<RideMetrics>, StoreError> {
        let mut rides = vec![];

        for entry in std::fs::read_dir(&self.folder)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let reader = BufReader::new(File::open(&path)?);
            match serde_json::from_reader::<_, RideMetrics>(reader) {
                Ok(ride) => rides.push(ride),
                Err(err) => warn!("Skipping unreadable ride file {}: {}", path.display(), err),
            }
        }

        sort_most_recent_first(&mut rides);
        Ok(rides)
    }
}
