//! Named backups of the managed settings documents.
//!
//! A backup is a directory under the backup root holding a byte-for-byte
//! snapshot of every document that existed at creation time, under fixed
//! filenames, plus a manifest recording when it was taken and a BLAKE3
//! digest per snapshot. Restore verifies digests and decodability before
//! any live file is replaced, then writes through the codec's atomic path.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::document::{codec, DocumentKind};
use crate::error::SettingsError;
use crate::paths::SettingsPaths;

pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Serialized metadata stored inside each backup directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BackupManifest {
    name: String,
    created_at: String,
    files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ManifestFile {
    kind: DocumentKind,
    file: String,
    blake3: String,
}

/// One backup as reported to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupRecord {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub documents: Vec<BackupDocument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackupDocument {
    pub kind: DocumentKind,
    pub file: String,
    /// Hex BLAKE3 digest of the snapshot bytes. Absent for backups whose
    /// manifest was lost.
    pub digest: Option<String>,
}

/// The backup store rooted at the configured backup directory.
pub struct BackupStore {
    paths: SettingsPaths,
}

impl BackupStore {
    pub fn new(paths: SettingsPaths) -> Self {
        BackupStore { paths }
    }

    pub fn root(&self) -> &Path {
        &self.paths.backup_root
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.paths.backup_root.join(name)
    }

    /// Creates a backup. An explicit name that already exists fails with
    /// `DuplicateBackup`; without a name a timestamped one is generated.
    pub fn create(&self, name: Option<&str>) -> Result<BackupRecord, SettingsError> {
        let name = match name {
            Some(raw) => {
                let normalized = normalize_name(raw)?;
                if self.backup_dir(&normalized).exists() {
                    return Err(SettingsError::DuplicateBackup(normalized));
                }
                normalized
            }
            None => {
                let base = format!("backup_{}", Local::now().format("%Y%m%d_%H%M%S"));
                self.first_free_name(&base)
            }
        };
        self.snapshot(&name)
    }

    /// Creates a backup named `base`, appending a numeric suffix when that
    /// name is taken. Used for automatic pre-apply snapshots.
    pub fn create_unique(&self, base: &str) -> Result<BackupRecord, SettingsError> {
        let base = normalize_name(base)?;
        let name = self.first_free_name(&base);
        self.snapshot(&name)
    }

    fn first_free_name(&self, base: &str) -> String {
        if !self.backup_dir(base).exists() {
            return base.to_string();
        }
        let mut counter = 2;
        loop {
            let candidate = format!("{}_{}", base, counter);
            if !self.backup_dir(&candidate).exists() {
                return candidate;
            }
            counter += 1;
        }
    }

    fn snapshot(&self, name: &str) -> Result<BackupRecord, SettingsError> {
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;

        let mut files = Vec::new();
        for kind in DocumentKind::ALL {
            let live = self.paths.path_for(kind);
            if !live.exists() {
                debug!("No {} file to back up at {:?}", kind, live);
                continue;
            }
            let bytes = fs::read(live)?;
            let digest = hex::encode(blake3::hash(&bytes).as_bytes());
            fs::write(dir.join(kind.snapshot_filename()), &bytes)?;
            files.push(ManifestFile {
                kind,
                file: kind.snapshot_filename().to_string(),
                blake3: digest,
            });
        }

        let manifest = BackupManifest {
            name: name.to_string(),
            created_at: Utc::now().to_rfc3339(),
            files,
        };
        let mut serialized = serde_json::to_string_pretty(&manifest)?;
        serialized.push('\n');
        codec::write_atomic(&dir.join(MANIFEST_FILENAME), serialized.as_bytes())?;

        info!(
            "Created backup '{}' with {} document(s)",
            name,
            manifest.files.len()
        );
        Ok(record_from_manifest(name, manifest))
    }

    /// Lists every backup, newest first. Directories that cannot be read
    /// are skipped with a warning rather than failing the whole listing.
    pub fn list(&self) -> Result<Vec<BackupRecord>, SettingsError> {
        let root = self.root();
        if !root.exists() {
            return Ok(Vec::new());
        }
        let mut records = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            match self.load_record(&name, &path) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable backup {:?}: {}", path, e),
            }
        }
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(records)
    }

    pub fn contains(&self, name: &str) -> bool {
        normalize_name(name)
            .map(|n| self.backup_dir(&n).is_dir())
            .unwrap_or(false)
    }

    /// Restores every document in a backup. Fails before touching any live
    /// file if a snapshot is missing, fails its digest, or does not decode.
    pub fn restore(&self, name: &str) -> Result<Vec<DocumentKind>, SettingsError> {
        let name = normalize_name(name)?;
        let dir = self.backup_dir(&name);
        if !dir.is_dir() {
            return Err(SettingsError::BackupNotFound(name));
        }
        let record = self.load_record(&name, &dir)?;

        let mut staged = Vec::new();
        for document in &record.documents {
            let snapshot_path = dir.join(&document.file);
            if !snapshot_path.exists() {
                return Err(SettingsError::Validation {
                    field: format!("backup {}", name),
                    reason: format!("snapshot file {} is missing", document.file),
                });
            }
            let bytes = fs::read(&snapshot_path)?;
            if let Some(expected) = &document.digest {
                let actual = hex::encode(blake3::hash(&bytes).as_bytes());
                if actual != *expected {
                    return Err(SettingsError::Validation {
                        field: format!("backup {}", name),
                        reason: format!("digest mismatch for {}", document.file),
                    });
                }
            }
            codec::decode(&snapshot_path, &bytes)?;
            staged.push((document.kind, bytes));
        }

        let mut restored = Vec::new();
        for (kind, bytes) in staged {
            codec::write_atomic(self.paths.path_for(kind), &bytes)?;
            restored.push(kind);
        }
        info!("Restored backup '{}' ({} document(s))", name, restored.len());
        Ok(restored)
    }

    pub fn delete(&self, name: &str) -> Result<(), SettingsError> {
        let name = normalize_name(name)?;
        let dir = self.backup_dir(&name);
        if !dir.is_dir() {
            return Err(SettingsError::BackupNotFound(name));
        }
        fs::remove_dir_all(&dir)?;
        info!("Deleted backup '{}'", name);
        Ok(())
    }

    fn load_record(&self, name: &str, dir: &Path) -> Result<BackupRecord, SettingsError> {
        let manifest_path = dir.join(MANIFEST_FILENAME);
        if manifest_path.exists() {
            let bytes = fs::read(&manifest_path)?;
            match serde_json::from_slice::<BackupManifest>(&bytes) {
                Ok(manifest) => return Ok(record_from_manifest(name, manifest)),
                Err(e) => warn!("Unreadable manifest in {:?}: {}", dir, e),
            }
        }

        // No usable manifest. Synthesize a record from the directory.
        let created_at = dir
            .metadata()?
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        let mut documents = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(kind) = DocumentKind::from_snapshot_filename(&file_name) {
                documents.push(BackupDocument {
                    kind,
                    file: file_name,
                    digest: None,
                });
            }
        }
        documents.sort_by_key(|d| kind_order(d.kind));
        Ok(BackupRecord {
            name: name.to_string(),
            created_at,
            documents,
        })
    }
}

fn record_from_manifest(name: &str, manifest: BackupManifest) -> BackupRecord {
    let created_at = DateTime::parse_from_rfc3339(&manifest.created_at)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            warn!(
                "Invalid created_at '{}' in backup '{}': {}",
                manifest.created_at, name, e
            );
            DateTime::<Utc>::UNIX_EPOCH
        });
    BackupRecord {
        name: name.to_string(),
        created_at,
        documents: manifest
            .files
            .into_iter()
            .map(|f| BackupDocument {
                kind: f.kind,
                file: f.file,
                digest: Some(f.blake3),
            })
            .collect(),
    }
}

fn kind_order(kind: DocumentKind) -> usize {
    DocumentKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(DocumentKind::ALL.len())
}

/// NFC-normalizes and validates a backup name.
fn normalize_name(raw: &str) -> Result<String, SettingsError> {
    let name: String = raw.trim().nfc().collect();
    if name.is_empty() {
        return Err(SettingsError::Validation {
            field: "backup name".to_string(),
            reason: "name is empty".to_string(),
        });
    }
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(SettingsError::Validation {
            field: "backup name".to_string(),
            reason: "name may not contain path separators or '..'".to_string(),
        });
    }
    Ok(name)
}
