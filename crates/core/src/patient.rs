//! Patient record types.
//!
//! [`Patient`] is the validated record: it can only be built through [`Patient::new`], which
//! checks every field and derives the BMI and verdict. There is no way to hold a `Patient`
//! whose derived fields disagree with its height and weight.
//!
//! [`PatientFields`] is the unvalidated carrier used while a record is being assembled (on
//! create, on load, and while a sparse update is being merged).

use crate::bmi::{BodyMassIndex, Verdict};
use crate::constants::{MAX_AGE, MIN_AGE};
use crate::{PatientError, PatientResult};
use api_shared::{CreatePatientReq, PatientRes};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Gender of a patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = PatientError;

    /// Parse a wire gender. `others` is accepted as a legacy spelling of `other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" | "others" => Ok(Gender::Other),
            _ => Err(PatientError::InvalidInput(format!(
                "gender must be one of 'male', 'female', 'other', got '{s}'"
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally supplied patient identifier, used as the document key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new `PatientId`.
    ///
    /// The identifier is kept exactly as given; it is only rejected when blank.
    pub fn new(id: impl Into<String>) -> PatientResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PatientError::InvalidInput("id cannot be empty".into()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PatientId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unvalidated patient fields, excluding the identifier and derived values.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientFields {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    /// Height in metres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
}

/// A validated patient record with its derived BMI.
#[derive(Clone, Debug, PartialEq)]
pub struct Patient {
    fields: PatientFields,
    bmi: BodyMassIndex,
}

impl Patient {
    /// Validate `fields` and derive the BMI and verdict.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if:
    /// - `name` or `city` is blank,
    /// - `age` is outside 1 to 99 inclusive,
    /// - `height` or `weight` is not a finite number greater than zero.
    pub fn new(fields: PatientFields) -> PatientResult<Self> {
        ensure_not_blank("name", &fields.name)?;
        ensure_not_blank("city", &fields.city)?;

        if !(MIN_AGE..=MAX_AGE).contains(&fields.age) {
            return Err(PatientError::InvalidInput(format!(
                "age must be between {MIN_AGE} and {MAX_AGE}, got {}",
                fields.age
            )));
        }

        let bmi = BodyMassIndex::compute(fields.height, fields.weight)?;

        Ok(Self { fields, bmi })
    }

    /// Build an identifier and validated record from a create request.
    pub fn from_create(req: CreatePatientReq) -> PatientResult<(PatientId, Self)> {
        let id = PatientId::new(req.id)?;
        let patient = Patient::new(PatientFields {
            name: req.name,
            city: req.city,
            age: req.age,
            gender: req.gender.parse()?,
            height: req.height,
            weight: req.weight,
        })?;
        Ok((id, patient))
    }

    pub fn fields(&self) -> &PatientFields {
        &self.fields
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn city(&self) -> &str {
        &self.fields.city
    }

    pub fn age(&self) -> u32 {
        self.fields.age
    }

    pub fn gender(&self) -> Gender {
        self.fields.gender
    }

    pub fn height(&self) -> f64 {
        self.fields.height
    }

    pub fn weight(&self) -> f64 {
        self.fields.weight
    }

    pub fn bmi(&self) -> f64 {
        self.bmi.value()
    }

    pub fn verdict(&self) -> Verdict {
        self.bmi.verdict()
    }

    /// Render the record as served, including the derived fields.
    pub fn to_res(&self) -> PatientRes {
        PatientRes {
            name: self.fields.name.clone(),
            city: self.fields.city.clone(),
            age: self.fields.age,
            gender: self.fields.gender.to_string(),
            height: self.fields.height,
            weight: self.fields.weight,
            bmi: self.bmi(),
            verdict: self.verdict().to_string(),
        }
    }
}

fn ensure_not_blank(field: &str, value: &str) -> PatientResult<()> {
    if value.trim().is_empty() {
        return Err(PatientError::InvalidInput(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> PatientFields {
        PatientFields {
            name: "Ananya Verma".into(),
            city: "Guwahati".into(),
            age: 28,
            gender: Gender::Female,
            height: 1.7,
            weight: 80.0,
        }
    }

    #[test]
    fn test_new_derives_bmi_and_verdict() {
        let patient = Patient::new(sample_fields()).expect("valid patient");
        assert_eq!(patient.bmi(), 27.68);
        assert_eq!(patient.verdict(), Verdict::Normal);

        let res = patient.to_res();
        assert_eq!(res.gender, "female");
        assert_eq!(res.verdict, "Normal");
        assert_eq!(res.bmi, 27.68);
    }

    #[test]
    fn test_new_accepts_age_bounds() {
        for age in [1, 99] {
            let fields = PatientFields {
                age,
                ..sample_fields()
            };
            assert!(Patient::new(fields).is_ok(), "age {age} should be accepted");
        }
    }

    #[test]
    fn test_new_rejects_age_out_of_range() {
        for age in [0, 100] {
            let fields = PatientFields {
                age,
                ..sample_fields()
            };
            let err = Patient::new(fields).expect_err("age should be rejected");
            assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("age")));
        }
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let fields = PatientFields {
            name: "   ".into(),
            ..sample_fields()
        };
        let err = Patient::new(fields).expect_err("blank name should be rejected");
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("name")));
    }

    #[test]
    fn test_new_rejects_zero_height() {
        let fields = PatientFields {
            height: 0.0,
            ..sample_fields()
        };
        let err = Patient::new(fields).expect_err("zero height should be rejected");
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("height")));
    }

    #[test]
    fn test_gender_parses_wire_values() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("other".parse::<Gender>().unwrap(), Gender::Other);
        assert_eq!("others".parse::<Gender>().unwrap(), Gender::Other);
        assert!("Male".parse::<Gender>().is_err());
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn test_patient_id_rejects_blank() {
        assert!(PatientId::new("").is_err());
        assert!(PatientId::new("  ").is_err());
        assert_eq!(PatientId::new("P001").unwrap().as_str(), "P001");
    }

    #[test]
    fn test_from_create_validates_gender() {
        let req = CreatePatientReq {
            id: "P001".into(),
            name: "Ananya Verma".into(),
            city: "Guwahati".into(),
            age: 28,
            gender: "robot".into(),
            height: 1.7,
            weight: 80.0,
        };
        let err = Patient::from_create(req).expect_err("invalid gender");
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("gender")));
    }
}
