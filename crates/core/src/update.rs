//! Sparse updates of existing patient records.
//!
//! An update runs in three steps:
//!
//! 1. copy the fields of the existing, already validated record,
//! 2. overwrite only the fields the request actually carried,
//! 3. rebuild the record through [`Patient::new`], which revalidates every field and derives
//!    the BMI and verdict from the merged height and weight.
//!
//! The old derived values are never carried over, so a changed weight can never be served with
//! a stale BMI.

use crate::patient::{Gender, Patient};
use crate::{PatientError, PatientResult};
use api_shared::{Field, UpdatePatientReq};

/// Merge `update` onto `existing` and return the revalidated record.
///
/// `existing` is not modified; on error the caller still holds the previous record.
///
/// # Errors
///
/// Returns `PatientError::InvalidInput` if:
/// - a field was sent as an explicit `null`,
/// - `gender` is not a known value,
/// - the merged record fails validation.
pub fn apply_update(existing: &Patient, update: UpdatePatientReq) -> PatientResult<Patient> {
    let mut fields = existing.fields().clone();

    if let Some(name) = provided("name", update.name)? {
        fields.name = name;
    }
    if let Some(city) = provided("city", update.city)? {
        fields.city = city;
    }
    if let Some(age) = provided("age", update.age)? {
        fields.age = age;
    }
    if let Some(gender) = provided("gender", update.gender)? {
        fields.gender = gender.parse::<Gender>()?;
    }
    if let Some(height) = provided("height", update.height)? {
        fields.height = height;
    }
    if let Some(weight) = provided("weight", update.weight)? {
        fields.weight = weight;
    }

    Patient::new(fields)
}

fn provided<T>(field: &str, value: Field<T>) -> PatientResult<Option<T>> {
    match value {
        Field::Absent => Ok(None),
        Field::Null => Err(PatientError::InvalidInput(format!(
            "{field} cannot be null"
        ))),
        Field::Value(v) => Ok(Some(v)),
    }
}
