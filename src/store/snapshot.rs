use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{MemoryStore, StoreError};
use crate::types::identifiers::SnapshotVersion;

pub const SNAPSHOT_FORMAT: &str = "1";
const SNAPSHOT_FILE: &str = "snapshot.json";
const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotManifest {
    pub snapshot_version: SnapshotVersion,
    pub format: String,
    pub created_at: DateTime<Utc>, // informational only
    pub roster_entries: usize,
    pub posts: usize,
    pub engagement_records: usize,
}

/// A snapshot directory that has been written or loaded and verified.
#[derive(Debug)]
pub struct StoreSnapshot {
    pub root: PathBuf,
    pub manifest: SnapshotManifest,
}

impl StoreSnapshot {
    /// Read the store back, rejecting content whose hash differs from the manifest.
    pub fn load(root: &Path) -> Result<(Self, MemoryStore), StoreError> {
        let manifest: SnapshotManifest =
            serde_json::from_reader(fs::File::open(root.join(MANIFEST_FILE))?)?;

        let bytes = fs::read(root.join(SNAPSHOT_FILE))?;
        let actual = SnapshotVersion::from_content(&bytes);
        if actual != manifest.snapshot_version {
            return Err(StoreError::SnapshotMismatch {
                expected: manifest.snapshot_version.as_str().to_string(),
                actual: actual.as_str().to_string(),
            });
        }

        let store: MemoryStore = serde_json::from_slice(&bytes)?;
        Ok((
            StoreSnapshot {
                root: root.to_path_buf(),
                manifest,
            },
            store,
        ))
    }
}

/// Writes a [`MemoryStore`] to a fresh directory.
///
/// The directory appears atomically: content goes to a sibling temp dir which
/// is renamed into place once everything is synced.
pub struct SnapshotWriter;

impl SnapshotWriter {
    pub fn write(store: &MemoryStore, output_dir: &Path) -> Result<StoreSnapshot, StoreError> {
        if output_dir.exists() {
            return Err(StoreError::OutputExists(output_dir.to_path_buf()));
        }

        // BTreeMap keys make the encoding, and so the version, deterministic.
        let content = serde_json::to_vec(store)?;
        let version = SnapshotVersion::from_content(&content);

        let hash = version
            .as_str()
            .strip_prefix("sha256:")
            .ok_or_else(|| StoreError::InvalidVersionFormat(version.as_str().to_string()))?;

        let manifest = SnapshotManifest {
            snapshot_version: version.clone(),
            format: SNAPSHOT_FORMAT.to_string(),
            created_at: Utc::now(),
            roster_entries: store.rosters().values().map(Vec::len).sum(),
            posts: store.posts_len(),
            engagement_records: store.all_engagements().values().map(Vec::len).sum(),
        };

        let temp_dir = output_dir.with_extension(format!("tmp.{}", &hash[..12]));
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir)?;
        }
        publish_via_temp_dir(&temp_dir, output_dir, |dir| {
            let mut f_snap = fs::File::create(dir.join(SNAPSHOT_FILE))?;
            f_snap.write_all(&content)?;
            f_snap.sync_all()?;

            let f_man = fs::File::create(dir.join(MANIFEST_FILE))?;
            serde_json::to_writer_pretty(&f_man, &manifest)?;
            f_man.sync_all()?;
            Ok(())
        })?;
        info!(
            path = %output_dir.display(),
            version = version.as_str(),
            "store snapshot written"
        );

        Ok(StoreSnapshot {
            root: output_dir.to_path_buf(),
            manifest,
        })
    }
}

/// Fill `temp_dir` and rename it to `output_dir`. On any failure the temp
/// dir is removed so no partial snapshot is left next to the output.
fn publish_via_temp_dir(
    temp_dir: &Path,
    output_dir: &Path,
    fill: impl FnOnce(&Path) -> Result<(), StoreError>,
) -> Result<(), StoreError> {
    let result = fs::create_dir_all(temp_dir)
        .map_err(StoreError::from)
        .and_then(|()| fill(temp_dir))
        .and_then(|()| fs::rename(temp_dir, output_dir).map_err(StoreError::from));

    if result.is_err() {
        // Best effort, the fill/rename error is what gets returned.
        let _ = fs::remove_dir_all(temp_dir);
    }
    result
}
