//! Ordering of the patient collection.

use crate::patient::Patient;
use crate::store::PatientMap;
use crate::{PatientError, PatientResult};
use std::str::FromStr;

/// Field a listing can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    pub const ALLOWED: [&'static str; 3] = ["height", "weight", "bmi"];

    /// Sort key of `patient` for this field.
    ///
    /// Every validated record carries all three values; a record without one would sort as 0.
    pub fn key(self, patient: &Patient) -> f64 {
        match self {
            SortField::Height => patient.height(),
            SortField::Weight => patient.weight(),
            SortField::Bmi => patient.bmi(),
        }
    }
}

impl FromStr for SortField {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            _ => Err(PatientError::InvalidQuery(format!(
                "invalid sort field '{s}', select one of {}",
                Self::ALLOWED.join(", ")
            ))),
        }
    }
}

/// Direction of a sorted listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse an optional order; `None` means ascending.
    pub fn parse_optional(value: Option<&str>) -> PatientResult<Self> {
        value.map(str::parse::<Self>).transpose().map(Option::unwrap_or_default)
    }
}

impl FromStr for SortOrder {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(PatientError::InvalidQuery(format!(
                "invalid sort order '{s}', select one of asc, desc"
            ))),
        }
    }
}

/// Return every patient ordered by `field` in `order`.
///
/// The sort is stable in both directions: patients with equal keys keep the identifier order of
/// the collection.
pub fn sort_patients(patients: &PatientMap, field: SortField, order: SortOrder) -> Vec<&Patient> {
    let mut sorted: Vec<&Patient> = patients.values().collect();
    match order {
        SortOrder::Asc => sorted.sort_by(|a, b| field.key(a).total_cmp(&field.key(b))),
        SortOrder::Desc => sorted.sort_by(|a, b| field.key(b).total_cmp(&field.key(a))),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{Gender, PatientFields, PatientId};

    fn patient(name: &str, height: f64, weight: f64) -> Patient {
        Patient::new(PatientFields {
            name: name.into(),
            city: "Mumbai".into(),
            age: 35,
            gender: Gender::Other,
            height,
            weight,
        })
        .expect("valid patient")
    }

    fn sample() -> PatientMap {
        let mut map = PatientMap::new();
        map.insert(PatientId::new("P001").unwrap(), patient("a", 1.7, 80.0));
        map.insert(PatientId::new("P002").unwrap(), patient("b", 1.6, 45.0));
        map.insert(PatientId::new("P003").unwrap(), patient("c", 1.8, 130.0));
        map.insert(PatientId::new("P004").unwrap(), patient("d", 1.6, 80.0));
        map
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!("bmi".parse::<SortField>().unwrap(), SortField::Bmi);
        assert_eq!("height".parse::<SortField>().unwrap(), SortField::Height);
        let err = "name".parse::<SortField>().expect_err("name is not sortable");
        assert!(matches!(err, PatientError::InvalidQuery(msg) if msg.contains("name")));
    }

    #[test]
    fn test_parse_sort_order_defaults_to_asc() {
        assert_eq!(SortOrder::parse_optional(None).unwrap(), SortOrder::Asc);
        assert_eq!(
            SortOrder::parse_optional(Some("desc")).unwrap(),
            SortOrder::Desc
        );
        let err = SortOrder::parse_optional(Some("DESC")).expect_err("order is case sensitive");
        assert!(matches!(err, PatientError::InvalidQuery(_)));
    }

    #[test]
    fn test_sort_by_bmi_desc_is_non_increasing() {
        let patients = sample();
        let sorted = sort_patients(&patients, SortField::Bmi, SortOrder::Desc);

        assert_eq!(sorted.len(), 4);
        assert!(sorted.windows(2).all(|w| w[0].bmi() >= w[1].bmi()));
        assert_eq!(sorted[0].name(), "c");
        assert_eq!(sorted[3].name(), "b");
    }

    #[test]
    fn test_sort_by_height_asc() {
        let patients = sample();
        let sorted = sort_patients(&patients, SortField::Height, SortOrder::Asc);
        let heights: Vec<f64> = sorted.iter().map(|p| p.height()).collect();
        assert_eq!(heights, vec![1.6, 1.6, 1.7, 1.8]);
    }

    #[test]
    fn test_ties_keep_collection_order_in_both_directions() {
        let patients = sample();

        let asc = sort_patients(&patients, SortField::Weight, SortOrder::Asc);
        let names: Vec<&str> = asc.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["b", "a", "d", "c"]);

        let desc = sort_patients(&patients, SortField::Weight, SortOrder::Desc);
        let names: Vec<&str> = desc.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_sort_empty_collection() {
        let patients = PatientMap::new();
        assert!(sort_patients(&patients, SortField::Bmi, SortOrder::Asc).is_empty());
    }
}
