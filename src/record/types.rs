use std::fmt;

use serde::{Serialize, Serializer};

/// Sentinel recorded when an optional field is absent from the document.
pub const UNKNOWN: &str = "Unknown";

/// Reference year for age derivation; the document carries only a birth date.
pub const REFERENCE_YEAR: i32 = 2024;

/// Patient age in years, or unknown when the record has no usable birth date.
///
/// Serializes as a bare number or the string `"Unknown"`, the shape downstream
/// consumers of the profile already expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Age {
    Known(i32),
    Unknown,
}

impl Age {
    /// Derive an age from a `birthTime` date-time value (`YYYYMMDD…`).
    ///
    /// Only the leading 4-digit year participates. A value too short or
    /// non-numeric degrades to `Unknown`.
    pub fn from_birth_value(value: &str, reference_year: i32) -> Self {
        match value.get(..4).and_then(|year| year.parse::<i32>().ok()) {
            Some(year) => Age::Known(reference_year - year),
            None => Age::Unknown,
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Known(years) => write!(f, "{years}"),
            Age::Unknown => write!(f, "{UNKNOWN}"),
        }
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Age::Known(years) => serializer.serialize_i32(*years),
            Age::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

/// Administrative gender as coded in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Female,
    Male,
    Unknown,
}

impl Gender {
    /// Map an administrative gender code; anything but `F`/`M` is unknown.
    pub fn from_code(code: &str) -> Self {
        match code {
            "F" => Gender::Female,
            "M" => Gender::Male,
            _ => Gender::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flat profile of one patient, as read from the clinical document.
///
/// `conditions` is populated from medication names: the source documents carry
/// no separate problem list, so administered substances stand in for the
/// conditions they treat. The two lists are identical by construction.
#[derive(Debug, Clone, Serialize)]
pub struct PatientProfile {
    pub patient_id: String,
    pub age: Age,
    pub gender: Gender,
    pub conditions: Vec<String>,
    pub medications: Vec<String>,
}
