//! Flat-file record store.
//!
//! Records live in a single CSV file with a fixed header. Every mutation is
//! a whole-file read-modify-write: load the full set, compute the new set,
//! rewrite the file. The rewrite goes through a temp file in the same
//! directory followed by an atomic rename, so a reader never observes a
//! torn file. A store-level mutex serializes mutations within the process;
//! the file itself stays unguarded against other processes.

use crate::{Error, Record, RecordUpdate, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Anything the averaging engine can snapshot records from.
///
/// The engine only ever reads: it takes one full snapshot per run and never
/// writes back. Mutations happen through the concrete store alone.
pub trait RecordSource {
    /// Returns a point-in-time copy of every stored record.
    fn list_all(&self) -> Result<Vec<Record>>;
}

/// CSV-backed record store with replace-by-key write semantics.
pub struct CsvStore {
    path: PathBuf,
    write_guard: Mutex<()>,
}

/// On-disk column order; must match the serde field order of [`Record`].
const HEADER: [&str; 5] = ["Rollno", "name", "english", "maths", "science"];

impl CsvStore {
    /// Opens the store at `path`, creating an empty record file (header
    /// only) if none exists yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_guard: Mutex::new(()),
        };
        if !store.path.exists() {
            store.save_all(&[])?;
            tracing::info!(path = %store.path.display(), "created record file");
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every stored record.
    pub fn list_all(&self) -> Result<Vec<Record>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader
            .deserialize()
            .collect::<core::result::Result<Vec<Record>, csv::Error>>()?;
        Ok(records)
    }

    /// Looks up one record by roll number.
    pub fn get(&self, roll_no: &str) -> Result<Record> {
        self.list_all()?
            .into_iter()
            .find(|record| record.roll_no == roll_no)
            .ok_or_else(|| Error::RecordNotFound {
                roll_no: roll_no.to_owned(),
            })
    }

    /// Inserts a record, replacing any existing record with the same roll
    /// number. Keys stay unique: a duplicate key removes the prior row
    /// rather than appending a second one.
    pub fn upsert(&self, record: Record) -> Result<()> {
        let _guard = self.write_guard.lock()?;
        let mut records = self.list_all()?;
        let roll_no = record.roll_no.clone();
        records.retain(|existing| existing.roll_no != record.roll_no);
        records.push(record);
        self.save_all(&records)?;
        tracing::info!(roll_no = %roll_no, "inserted or replaced record");
        Ok(())
    }

    /// Merges `update` into the record with the given roll number and
    /// returns the updated record.
    pub fn update(&self, roll_no: &str, update: RecordUpdate) -> Result<Record> {
        let _guard = self.write_guard.lock()?;
        let mut records = self.list_all()?;
        let record = records
            .iter_mut()
            .find(|record| record.roll_no == roll_no)
            .ok_or_else(|| Error::RecordNotFound {
                roll_no: roll_no.to_owned(),
            })?;
        update.apply(record);
        let updated = record.clone();
        self.save_all(&records)?;
        tracing::info!(roll_no, "updated record");
        Ok(updated)
    }

    /// Removes the record with the given roll number.
    pub fn delete(&self, roll_no: &str) -> Result<()> {
        let _guard = self.write_guard.lock()?;
        let mut records = self.list_all()?;
        let before = records.len();
        records.retain(|record| record.roll_no != roll_no);
        if records.len() == before {
            return Err(Error::RecordNotFound {
                roll_no: roll_no.to_owned(),
            });
        }
        self.save_all(&records)?;
        tracing::info!(roll_no, "deleted record");
        Ok(())
    }

    /// Rewrites the full record file. The temp file lands in the same
    /// directory as the target so the final rename stays on one filesystem.
    fn save_all(&self, records: &[Record]) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file());
            writer.write_record(HEADER)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|err| Error::Io(err.error))?;
        Ok(())
    }
}

impl RecordSource for CsvStore {
    fn list_all(&self) -> Result<Vec<Record>> {
        CsvStore::list_all(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store(dir: &tempfile::TempDir) -> CsvStore {
        CsvStore::open(dir.path().join("records.csv")).unwrap()
    }

    #[test]
    fn open_creates_a_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw.trim_end(), "Rollno,name,english,maths,science");
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let record = Record::new("R1", "Ada", "60", "70", "80");

        store.upsert(record.clone()).unwrap();

        assert_eq!(store.get("R1").unwrap(), record);
    }

    #[test]
    fn upsert_replaces_by_key_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        store.upsert(Record::new("R1", "Ada", "60", "70", "80")).unwrap();
        store.upsert(Record::new("R1", "Ada", "65", "75", "85")).unwrap();

        let records = store.list_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].english, "65");
    }

    #[test]
    fn update_merges_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store.upsert(Record::new("R1", "Ada", "60", "70", "80")).unwrap();

        let updated = store
            .update(
                "R1",
                RecordUpdate {
                    maths: Some("99".to_owned()),
                    ..RecordUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated, Record::new("R1", "Ada", "60", "99", "80"));
        assert_eq!(store.get("R1").unwrap(), updated);
    }

    #[test]
    fn update_of_missing_record_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);

        let err = store.update("R9", RecordUpdate::default()).unwrap_err();
        assert!(matches!(err, Error::RecordNotFound { roll_no } if roll_no == "R9"));
    }

    #[test]
    fn delete_removes_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store.upsert(Record::new("R1", "Ada", "60", "70", "80")).unwrap();
        store.upsert(Record::new("R2", "Grace", "50", "60", "70")).unwrap();

        store.delete("R1").unwrap();

        let remaining = store.list_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].roll_no, "R2");

        let err = store.delete("R1").unwrap_err();
        assert!(matches!(err, Error::RecordNotFound { .. }));
    }

    #[test]
    fn records_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");

        let store = CsvStore::open(&path).unwrap();
        store.upsert(Record::new("R1", "Ada", "60", "70", "80")).unwrap();
        drop(store);

        let reopened = CsvStore::open(&path).unwrap();
        assert_eq!(reopened.list_all().unwrap().len(), 1);
    }

    #[test]
    fn unparsable_scores_are_stored_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store.upsert(Record::new("R2", "Grace", "abc", "70", "80")).unwrap();

        assert_eq!(store.get("R2").unwrap().english, "abc");
    }
}
