//! Whole-document patient storage.
//!
//! The collection is persisted as a single JSON object mapping identifier to record:
//!
//! ```text
//! {
//!   "P001": { "name": "...", "city": "...", "age": 28, "gender": "female",
//!             "height": 1.7, "weight": 80.0 }
//! }
//! ```
//!
//! Only the six authoritative fields are written. Documents produced by older deployments may
//! also carry `bmi` and `verdict`; those keys are accepted and dropped on load, because both are
//! recomputed from height and weight.
//!
//! There is no partial I/O: [`RecordStore::load`] reads and validates the whole document and
//! [`RecordStore::save`] replaces it.

use crate::config::CoreConfig;
use crate::constants::STAGING_SUFFIX;
use crate::patient::{Gender, Patient, PatientFields, PatientId};
use crate::{PatientError, PatientResult};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Every patient keyed by identifier, in identifier order.
pub type PatientMap = BTreeMap<PatientId, Patient>;

/// Storage backend for the patient collection.
pub trait RecordStore: Send + Sync {
    /// Load the full collection.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the document is missing, unreadable or malformed, or if any
    /// stored record fails validation.
    fn load(&self) -> PatientResult<PatientMap>;

    /// Replace the full collection.
    ///
    /// A reader in the same process sees either the previous or the new document, never a
    /// partially written one.
    fn save(&self, patients: &PatientMap) -> PatientResult<()>;
}

/// On-disk shape of one record.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoredPatient {
    name: String,
    city: String,
    age: u32,
    gender: String,
    height: f64,
    weight: f64,
    // Legacy derived keys: accepted on load, never read, never written back.
    #[allow(dead_code)]
    #[serde(default, skip_serializing)]
    bmi: Option<IgnoredAny>,
    #[allow(dead_code)]
    #[serde(default, skip_serializing)]
    verdict: Option<IgnoredAny>,
}

impl StoredPatient {
    fn from_patient(patient: &Patient) -> Self {
        let fields = patient.fields();
        Self {
            name: fields.name.clone(),
            city: fields.city.clone(),
            age: fields.age,
            gender: fields.gender.to_string(),
            height: fields.height,
            weight: fields.weight,
            bmi: None,
            verdict: None,
        }
    }

    fn into_patient(self) -> PatientResult<Patient> {
        Patient::new(PatientFields {
            name: self.name,
            city: self.city,
            age: self.age,
            gender: self.gender.parse::<Gender>()?,
            height: self.height,
            weight: self.weight,
        })
    }
}

/// Patient store backed by one JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the configured document at startup.
    ///
    /// When the document does not exist and `cfg.create_if_missing()` is set, an empty
    /// collection is written first. The document is then loaded once so a malformed file stops
    /// the process before it starts serving.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - the document is missing and creation is not allowed ([`PatientError::StoreMissing`]),
    /// - the document or its parent directory cannot be created,
    /// - the existing document cannot be loaded.
    pub fn open(cfg: &CoreConfig) -> PatientResult<Self> {
        let store = Self::new(cfg.patient_data_file());

        if !store.path.exists() {
            if !cfg.create_if_missing() {
                return Err(PatientError::StoreMissing {
                    path: store.path.clone(),
                });
            }

            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(PatientError::StoreCreation)?;
            }
            fs::write(&store.path, "{}").map_err(PatientError::StoreCreation)?;
            tracing::info!("created empty patient data file: {}", store.path.display());
        }

        let patients = store.load()?;
        tracing::info!(
            "opened patient data file {} with {} patient(s)",
            store.path.display(),
            patients.len()
        );

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(STAGING_SUFFIX);
        self.path.with_file_name(name)
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> PatientResult<PatientMap> {
        let text = fs::read_to_string(&self.path).map_err(PatientError::FileRead)?;

        let mut deserializer = serde_json::Deserializer::from_str(&text);
        let stored: BTreeMap<String, StoredPatient> =
            serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                PatientError::Deserialization(format!(
                    "schema mismatch at {path}: {}",
                    err.into_inner()
                ))
            })?;
        deserializer
            .end()
            .map_err(|e| PatientError::Deserialization(e.to_string()))?;

        stored
            .into_iter()
            .map(|(id, record)| {
                let patient = record.into_patient().map_err(|e| {
                    PatientError::Deserialization(format!("stored patient '{id}' is invalid: {e}"))
                })?;
                let id = PatientId::new(id)
                    .map_err(|e| PatientError::Deserialization(format!("stored key: {e}")))?;
                Ok((id, patient))
            })
            .collect()
    }

    fn save(&self, patients: &PatientMap) -> PatientResult<()> {
        let stored: BTreeMap<&str, StoredPatient> = patients
            .iter()
            .map(|(id, patient)| (id.as_str(), StoredPatient::from_patient(patient)))
            .collect();
        let json = serde_json::to_string_pretty(&stored).map_err(PatientError::Serialization)?;

        let staging = self.staging_path();
        if let Err(e) = fs::write(&staging, json) {
            let _ = fs::remove_file(&staging);
            return Err(PatientError::FileWrite(e));
        }
        fs::rename(&staging, &self.path).map_err(PatientError::FileWrite)?;

        tracing::debug!(
            "saved {} patient(s) to {}",
            patients.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn patient(height: f64, weight: f64) -> Patient {
        Patient::new(PatientFields {
            name: "Rahul Mehta".into(),
            city: "Delhi".into(),
            age: 41,
            gender: Gender::Male,
            height,
            weight,
        })
        .expect("valid patient")
    }

    fn test_cfg(path: PathBuf, create_if_missing: bool) -> CoreConfig {
        CoreConfig::new(path, create_if_missing).expect("CoreConfig::new should succeed")
    }

    #[test]
    fn test_open_fails_when_missing_and_creation_disabled() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(temp_dir.path().join("patients.json"), false);

        let err = JsonFileStore::open(&cfg).expect_err("missing file should fail");
        assert!(matches!(err, PatientError::StoreMissing { .. }));
        assert!(err.is_storage());
    }

    #[test]
    fn test_open_creates_empty_document() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("patients.json");
        let cfg = test_cfg(path.clone(), true);

        let store = JsonFileStore::open(&cfg).expect("open should create the file");

        assert!(path.is_file());
        assert!(store.load().expect("load should succeed").is_empty());
    }

    #[test]
    fn test_save_then_load_recomputes_derived_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path().join("patients.json"));

        let mut patients = PatientMap::new();
        patients.insert(PatientId::new("P001").unwrap(), patient(1.7, 80.0));
        store.save(&patients).expect("save should succeed");

        let loaded = store.load().expect("load should succeed");
        let p = &loaded[&PatientId::new("P001").unwrap()];
        assert_eq!(p.bmi(), 27.68);
        assert_eq!(loaded, patients);
    }

    #[test]
    fn test_save_does_not_persist_derived_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFileStore::new(temp_dir.path().join("patients.json"));

        let mut patients = PatientMap::new();
        patients.insert(PatientId::new("P001").unwrap(), patient(1.7, 80.0));
        store.save(&patients).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let record = raw["P001"].as_object().expect("record should be an object");
        assert!(!record.contains_key("bmi"));
        assert!(!record.contains_key("verdict"));
        assert!(!record.contains_key("id"));
        assert_eq!(record["gender"], "male");
        assert!(!store.staging_path().exists(), "staging file should be renamed away");
    }

    #[test]
    fn test_load_ignores_stale_derived_fields() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("patients.json");
        fs::write(
            &path,
            r#"{"P001": {"name": "Rahul", "city": "Delhi", "age": 41, "gender": "others",
                "height": 1.7, "weight": 120, "bmi": 1.0, "verdict": "Underweight"}}"#,
        )
        .unwrap();

        let loaded = JsonFileStore::new(&path).load().expect("load should succeed");
        let p = &loaded[&PatientId::new("P001").unwrap()];
        assert_eq!(p.bmi(), 41.52);
        assert_eq!(p.verdict().as_str(), "Obese");
        assert_eq!(p.gender(), Gender::Other);
    }

    #[test]
    fn test_load_reports_path_of_bad_field() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("patients.json");
        fs::write(
            &path,
            r#"{"P001": {"name": "Rahul", "city": "Delhi", "age": "old", "gender": "male",
                "height": 1.7, "weight": 80}}"#,
        )
        .unwrap();

        let err = JsonFileStore::new(&path).load().expect_err("bad age type should fail");
        match err {
            PatientError::Deserialization(msg) => assert!(msg.contains("P001.age"), "{msg}"),
            other => panic!("expected Deserialization error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_record_failing_validation() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("patients.json");
        fs::write(
            &path,
            r#"{"P009": {"name": "Rahul", "city": "Delhi", "age": 41, "gender": "male",
                "height": 0, "weight": 80}}"#,
        )
        .unwrap();

        let err = JsonFileStore::new(&path).load().expect_err("zero height should fail");
        assert!(matches!(err, PatientError::Deserialization(msg) if msg.contains("P009")));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = JsonFileStore::new(temp_dir.path().join("absent.json"))
            .load()
            .expect_err("missing file should fail");
        assert!(matches!(err, PatientError::FileRead(_)));
    }
}
