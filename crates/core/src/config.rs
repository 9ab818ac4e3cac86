//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables,
//! which keeps behaviour consistent across multi-threaded runtimes and test harnesses.

use crate::constants::DEFAULT_PATIENT_DATA_FILE;
use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patient_data_file: PathBuf,
    create_if_missing: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if `patient_data_file` is empty or names a directory.
    pub fn new(patient_data_file: PathBuf, create_if_missing: bool) -> PatientResult<Self> {
        if patient_data_file.as_os_str().is_empty() {
            return Err(PatientError::InvalidInput(
                "patient data file path cannot be empty".into(),
            ));
        }

        if patient_data_file.is_dir() {
            return Err(PatientError::InvalidInput(format!(
                "patient data file path is a directory: {}",
                patient_data_file.display()
            )));
        }

        Ok(Self {
            patient_data_file,
            create_if_missing,
        })
    }

    pub fn patient_data_file(&self) -> &Path {
        &self.patient_data_file
    }

    pub fn create_if_missing(&self) -> bool {
        self.create_if_missing
    }
}

/// Resolve the patient document path from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PATIENT_DATA_FILE`].
pub fn patient_data_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PATIENT_DATA_FILE))
}

/// Parse the create-if-missing flag from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `false`.
pub fn create_if_missing_from_env_value(value: Option<String>) -> PatientResult<bool> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value.as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(PatientError::InvalidInput(format!(
            "PATIENT_DATA_CREATE must be a boolean, got '{other}'"
        ))),
    }
}
