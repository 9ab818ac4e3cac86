//! # PMS Core
//!
//! Core business logic for the patient management system.
//!
//! This crate contains pure data operations:
//! - BMI and verdict derivation ([`bmi`])
//! - Validated patient records ([`patient`])
//! - Sparse update reconciliation ([`update`])
//! - Whole-document JSON storage ([`store`])
//! - Sorted listings ([`query`])
//! - The [`PatientService`] tying them together
//!
//! **No API concerns**: HTTP servers, status codes and request extraction belong in `api-rest`.

pub mod bmi;
pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod query;
pub mod service;
pub mod store;
pub mod update;

// Use the shared api-shared crate for wire types.
pub use api_shared as wire;

pub use bmi::{BodyMassIndex, Verdict};
pub use config::CoreConfig;
pub use constants::DEFAULT_PATIENT_DATA_FILE;
pub use error::{PatientError, PatientResult};
pub use patient::{Gender, Patient, PatientFields, PatientId};
pub use query::{SortField, SortOrder};
pub use service::PatientService;
pub use store::{JsonFileStore, PatientMap, RecordStore};
