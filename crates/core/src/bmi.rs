//! Body-mass-index calculation.
//!
//! BMI is `weight / height²`, rounded to two decimals. The verdict is taken from the rounded
//! value, so the thresholds below apply to what the caller actually sees:
//!
//! | BMI          | Verdict       |
//! |--------------|---------------|
//! | `[0, 18.5)`  | `Underweight` |
//! | `[18.5, 35)` | `Normal`      |
//! | `[35, ∞)`    | `Obese`       |

use crate::constants::{OBESE_FROM, UNDERWEIGHT_BELOW};
use crate::{PatientError, PatientResult};
use std::fmt;

/// Qualitative classification of a BMI value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Underweight,
    Normal,
    Obese,
}

impl Verdict {
    /// Classify an already rounded BMI.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            Verdict::Underweight
        } else if bmi < OBESE_FROM {
            Verdict::Normal
        } else {
            Verdict::Obese
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Underweight => "Underweight",
            Verdict::Normal => "Normal",
            Verdict::Obese => "Obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rounded BMI together with its verdict.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyMassIndex {
    value: f64,
    verdict: Verdict,
}

impl BodyMassIndex {
    /// Compute the BMI for a height in metres and a weight in kilograms.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if either measurement is not a finite number
    /// greater than zero. This keeps infinities and NaN out of served records even if a caller
    /// skipped record validation.
    pub fn compute(height: f64, weight: f64) -> PatientResult<Self> {
        ensure_positive("height", height)?;
        ensure_positive("weight", weight)?;

        let raw = weight / (height * height);
        if !raw.is_finite() {
            return Err(PatientError::InvalidInput(format!(
                "BMI is not representable for height {height} and weight {weight}"
            )));
        }

        let value = round_to_hundredths(raw)?;
        Ok(Self {
            value,
            verdict: Verdict::from_bmi(value),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }
}

fn ensure_positive(field: &str, value: f64) -> PatientResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PatientError::InvalidInput(format!(
            "{field} must be a finite number greater than 0, got {value}"
        )))
    }
}

/// Round through the exact decimal expansion, so ties go to the even hundredth.
fn round_to_hundredths(value: f64) -> PatientResult<f64> {
    format!("{value:.2}").parse().map_err(|err| {
        PatientError::InvalidInput(format!("BMI {value} could not be rounded: {err}"))
    })
}
