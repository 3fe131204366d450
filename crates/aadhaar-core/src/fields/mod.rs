//! Rule-based field matching for Aadhaar letters.
//!
//! Each field has exactly one rule. Rules run independently against the
//! full text and the first match wins. A rule yields capture group 1 when
//! its pattern has a capture group, otherwise the whole match.

pub mod patterns;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::models::fields::{Field, FieldSet};
use patterns::*;

/// A single extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Field this rule fills.
    pub field: Field,
    pattern: &'static Regex,
}

impl Rule {
    pub fn new(field: Field, pattern: &'static Regex) -> Self {
        Self { field, pattern }
    }

    /// Apply the rule, returning the selected text of the first match.
    pub fn apply(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let group = if self.pattern.captures_len() > 1 { 1 } else { 0 };
        caps.get(group).map(|m| m.as_str().to_string())
    }
}

lazy_static! {
    /// The rule table, one entry per [`Field`] in output order.
    pub static ref RULES: [Rule; Field::COUNT] = [
        Rule::new(Field::EnrolmentNo, &ENROLMENT_NO),
        Rule::new(Field::Name, &NAME),
        Rule::new(Field::AddressLocal, &ADDRESS_LOCAL),
        Rule::new(Field::AddressEnglish, &ADDRESS_ENGLISH),
        Rule::new(Field::AadhaarNumber, &AADHAAR_NUMBER),
        Rule::new(Field::Vid, &VID),
        Rule::new(Field::DateOfBirthLocal, &DATE_OF_BIRTH_LOCAL),
        Rule::new(Field::DateOfBirthEnglish, &DATE_OF_BIRTH_ENGLISH),
        Rule::new(Field::GenderLocal, &GENDER_LOCAL),
        Rule::new(Field::GenderEnglish, &GENDER_ENGLISH),
        Rule::new(Field::Mobile, &MOBILE),
        Rule::new(Field::IssuedDate, &ISSUED_DATE),
        Rule::new(Field::DetailsAsOn, &DETAILS_AS_ON),
    ];
}

/// Look up the rule for a field.
pub fn rule_for(field: Field) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| rule.field == field)
        .unwrap_or_else(|| unreachable!("every field has a rule"))
}

/// Match every field against the text.
pub fn match_fields(text: &str) -> FieldSet {
    let mut fields = FieldSet::new();

    for rule in RULES.iter() {
        let value = rule.apply(text);
        trace!("{}: {:?}", rule.field, value);
        fields.set(rule.field, value);
    }

    debug!(
        "Matched {}/{} fields from {} chars of text",
        fields.matched_count(),
        Field::COUNT,
        text.len()
    );
    fields
}
