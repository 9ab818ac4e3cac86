//! Constants used throughout the patient management core crate.

/// Default path of the patient document when no explicit path is configured.
pub const DEFAULT_PATIENT_DATA_FILE: &str = "patients.json";

/// Suffix of the sibling file used to stage a save before it is renamed into place.
pub const STAGING_SUFFIX: &str = "tmp";

/// Lowest accepted age, in years.
pub const MIN_AGE: u32 = 1;

/// Highest accepted age, in years.
pub const MAX_AGE: u32 = 99;

/// BMI at and above which a patient is no longer underweight.
pub const UNDERWEIGHT_BELOW: f64 = 18.5;

/// BMI at and above which a patient is obese.
pub const OBESE_FROM: f64 = 35.0;
