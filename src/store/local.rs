use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::faculty::FacultyRecord;

/// Record store backed by a JSON array on disk.
///
/// Used for fixtures and for running the dashboard without network access
/// (`store.data_file` in config). Writes are atomic so an interrupted upsert
/// never corrupts the file.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<Vec<FacultyRecord>> {
        if !self.path.exists() {
            anyhow::bail!(
                "Faculty data file not found at {}. Create it with a JSON array of records.",
                self.path.display()
            );
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open faculty data file at {}", self.path.display()))?;

        serde_json::from_reader(file)
            .with_context(|| format!("Invalid JSON in faculty data file at {}", self.path.display()))
    }

    fn write_all(&self, records: &[FacultyRecord]) -> Result<()> {
        let mut file = AtomicWriteFile::open(&self.path).with_context(|| {
            format!("Failed to open atomic write file at {}", self.path.display())
        })?;

        serde_json::to_writer_pretty(&mut file, records)
            .context("Failed to serialize faculty records")?;

        file.commit().context("Failed to save faculty records")?;

        Ok(())
    }
}

impl crate::store::FacultyStore for LocalStore {
    async fn list(&self) -> Result<Vec<FacultyRecord>> {
        self.read_all()
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<FacultyRecord>> {
        Ok(self.read_all()?.into_iter().find(|r| r.id == id))
    }

    async fn upsert(&self, record: &FacultyRecord) -> Result<()> {
        let mut records = self.read_all()?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.write_all(&records)
    }
}
