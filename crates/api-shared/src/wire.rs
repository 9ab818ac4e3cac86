//! Request and response bodies for the patient management API.
//!
//! These are plain wire shapes. Validation (ranges, enum membership, derived fields) lives in
//! `pms-core`, which converts to and from these types.

use crate::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Health check response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Generic acknowledgement body used by static and mutating endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body returned for every non-2xx response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

/// Full patient record as submitted on create.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreatePatientReq {
    /// Identifier of the patient, used as the document key.
    #[schema(example = "P001")]
    pub id: String,
    pub name: String,
    pub city: String,
    /// Age in whole years, 1 to 99 inclusive.
    pub age: u32,
    /// One of `male`, `female`, `other`.
    #[schema(example = "female")]
    pub gender: String,
    /// Height in metres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
}

/// Sparse set of field changes for an existing patient.
///
/// Keys that are not sent are left untouched. The identifier cannot be changed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct UpdatePatientReq {
    #[schema(value_type = Option<String>)]
    pub name: Field<String>,
    #[schema(value_type = Option<String>)]
    pub city: Field<String>,
    #[schema(value_type = Option<u32>)]
    pub age: Field<u32>,
    #[schema(value_type = Option<String>)]
    pub gender: Field<String>,
    #[schema(value_type = Option<f64>)]
    pub height: Field<f64>,
    #[schema(value_type = Option<f64>)]
    pub weight: Field<f64>,
}

/// Patient record as served, including the derived BMI and verdict.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    /// weight / height², rounded to two decimals.
    pub bmi: f64,
    /// `Underweight`, `Normal` or `Obese`.
    pub verdict: String,
}

/// Every patient keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PatientDirectoryRes(pub BTreeMap<String, PatientRes>);
