//! Patient service.
//!
//! [`PatientService`] is the single entry point for patient operations. It owns an injected
//! [`RecordStore`] and runs every operation as a transform of the freshly loaded document:
//!
//! - reads (`list`, `get`, `sort`) load the document and return a view of it,
//! - writes (`create`, `update`, `delete`) load, mutate and save while holding the service's
//!   write lock, so two writers in the same process cannot lose each other's changes.
//!
//! Writers in other processes are not coordinated with.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations. HTTP status mapping and request extraction
//! belong in `api-rest`.

use crate::patient::{Patient, PatientId};
use crate::query::{sort_patients, SortField, SortOrder};
use crate::store::{PatientMap, RecordStore};
use crate::update::apply_update;
use crate::{PatientError, PatientResult};
use api_shared::{CreatePatientReq, UpdatePatientReq};
use std::collections::btree_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard};

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn RecordStore>,
    write_lock: Arc<Mutex<()>>,
}

impl PatientService {
    /// Creates a new `PatientService` over `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Every patient keyed by identifier.
    pub fn list(&self) -> PatientResult<PatientMap> {
        self.store.load()
    }

    /// One patient by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::NotFound`] if no patient has this identifier.
    pub fn get(&self, id: &str) -> PatientResult<Patient> {
        let mut patients = self.store.load()?;
        patients
            .remove(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))
    }

    /// Every patient, ordered by `sort_by` in `order` (ascending when `None`).
    ///
    /// Parameters are checked before the document is read.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidQuery`] if `sort_by` is not one of `height`, `weight`,
    /// `bmi`, or if `order` is given and is not `asc` or `desc`.
    pub fn sort(&self, sort_by: &str, order: Option<&str>) -> PatientResult<Vec<Patient>> {
        let field: SortField = sort_by.parse()?;
        let order = SortOrder::parse_optional(order)?;

        let patients = self.store.load()?;
        Ok(sort_patients(&patients, field, order)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Validate and store a new patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - the request fails validation ([`PatientError::InvalidInput`]),
    /// - the identifier is already taken ([`PatientError::AlreadyExists`]),
    /// - the document cannot be loaded or saved.
    pub fn create(&self, req: CreatePatientReq) -> PatientResult<PatientId> {
        let (id, patient) = Patient::from_create(req)?;

        let _guard = self.lock_writes();
        let mut patients = self.store.load()?;

        match patients.entry(id.clone()) {
            Entry::Occupied(_) => return Err(PatientError::AlreadyExists(id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(patient);
            }
        }

        self.store.save(&patients)?;
        tracing::info!("created patient {}", id);
        Ok(id)
    }

    /// Apply a sparse update to an existing patient and return the revalidated record.
    ///
    /// The stored record is replaced only if the merged record passes validation.
    ///
    /// # Errors
    ///
    /// Returns `PatientError` if:
    /// - no patient has this identifier ([`PatientError::NotFound`]),
    /// - the merged record fails validation ([`PatientError::InvalidInput`]),
    /// - the document cannot be loaded or saved.
    pub fn update(&self, id: &str, req: UpdatePatientReq) -> PatientResult<Patient> {
        let _guard = self.lock_writes();
        let mut patients = self.store.load()?;

        let existing = patients
            .get_mut(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))?;
        let updated = apply_update(existing, req)?;
        *existing = updated.clone();

        self.store.save(&patients)?;
        tracing::info!("updated patient {}", id);
        Ok(updated)
    }

    /// Remove a patient.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::NotFound`] if no patient has this identifier, or a storage error
    /// if the document cannot be loaded or saved.
    pub fn delete(&self, id: &str) -> PatientResult<()> {
        let _guard = self.lock_writes();
        let mut patients = self.store.load()?;

        if patients.remove(id).is_none() {
            return Err(PatientError::NotFound(id.to_string()));
        }

        self.store.save(&patients)?;
        tracing::info!("deleted patient {}", id);
        Ok(())
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a panic in another writer leaves nothing inconsistent.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
