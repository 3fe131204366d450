//! The fixed set of fields read from an Aadhaar letter.

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A field the matcher knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    EnrolmentNo,
    Name,
    AddressLocal,
    AddressEnglish,
    AadhaarNumber,
    Vid,
    DateOfBirthLocal,
    DateOfBirthEnglish,
    GenderLocal,
    GenderEnglish,
    Mobile,
    IssuedDate,
    DetailsAsOn,
}

impl Field {
    /// Number of fields.
    pub const COUNT: usize = 13;

    /// All fields, in output order.
    pub const ALL: [Field; Self::COUNT] = [
        Field::EnrolmentNo,
        Field::Name,
        Field::AddressLocal,
        Field::AddressEnglish,
        Field::AadhaarNumber,
        Field::Vid,
        Field::DateOfBirthLocal,
        Field::DateOfBirthEnglish,
        Field::GenderLocal,
        Field::GenderEnglish,
        Field::Mobile,
        Field::IssuedDate,
        Field::DetailsAsOn,
    ];

    /// Key used for this field in the JSON response.
    pub fn label(self) -> &'static str {
        match self {
            Field::EnrolmentNo => "Enrolment No.",
            Field::Name => "Name",
            Field::AddressLocal => "Address (Hindi)",
            Field::AddressEnglish => "Address (English)",
            Field::AadhaarNumber => "Aadhaar Number",
            Field::Vid => "VID",
            Field::DateOfBirthLocal => "Date of Birth(Local)",
            Field::DateOfBirthEnglish => "Date of Birth (English)",
            Field::GenderLocal => "Gender (Hindi)",
            Field::GenderEnglish => "Gender (English)",
            Field::Mobile => "Mobile",
            Field::IssuedDate => "Aadhaar Issued Date",
            Field::DetailsAsOn => "Details as on",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Extracted values keyed by [`Field`].
///
/// Every field is always present; `None` means the pattern did not match,
/// which is distinct from an empty match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    values: [Option<String>; Field::COUNT],
}

impl FieldSet {
    /// Create a set with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, `None` if it was not found.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    /// Set or clear a field.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        self.values[field.index()] = value;
    }

    /// Iterate over all fields in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> + '_ {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// Number of fields that matched.
    pub fn matched_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Date of birth as a calendar date.
    ///
    /// Prefers the English `DOB:` value and falls back to the localized one.
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        [Field::DateOfBirthEnglish, Field::DateOfBirthLocal]
            .into_iter()
            .filter_map(|field| self.get(field))
            .find_map(|value| NaiveDate::parse_from_str(value, "%d/%m/%Y").ok())
    }
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.label(), &value)?;
        }
        map.end()
    }
}
