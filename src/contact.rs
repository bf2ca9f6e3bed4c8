// 🏷️ Contact Classifier - Labels as Data
// Maps raw contact captions ("Cell", "Téléphone (bureau)", "Res/Bus") to a
// canonical contact type and note, then normalizes the value for that type.
//
// In Newmarket, for example, there are both "Phone" and "Business" numbers,
// which is why the note table exists alongside the type table.

use crate::address::normalize_address;
use crate::phone::normalize_phone_in_area;
use crate::sanitize::sanitize;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// LOOKUP TABLES
// ============================================================================

/// Raw label → canonical type
pub const CONTACT_TYPE_TABLE: &[(&str, ContactType)] = &[
    ("Address", ContactType::Address),
    ("bb", ContactType::Cell),
    ("bus", ContactType::Voice),
    ("Bus", ContactType::Voice),
    ("Bus.", ContactType::Voice),
    ("Business", ContactType::Voice),
    ("Cell", ContactType::Cell),
    ("Cell Phone", ContactType::Cell),
    ("Email", ContactType::Email),
    ("Fax", ContactType::Fax),
    ("Home", ContactType::Voice),
    ("Home Phone", ContactType::Voice),
    ("Home Phone*", ContactType::Voice),
    ("Office", ContactType::Voice),
    ("ph", ContactType::Voice),
    ("Phone", ContactType::Voice),
    ("Res", ContactType::Voice),
    ("Res/Bus", ContactType::Voice),
    ("Residence", ContactType::Voice),
    ("Téléphone (bureau)", ContactType::Voice),
    ("Téléphone (cellulaire)", ContactType::Cell),
    ("Téléphone (résidence)", ContactType::Voice),
    ("Téléphone (résidence et bureau)", ContactType::Voice),
    ("Voice Mail", ContactType::Voice),
    ("Work", ContactType::Voice),
];

/// Raw label → canonical note (`None` means the label carries no context)
pub const CONTACT_NOTE_TABLE: &[(&str, Option<ContactNote>)] = &[
    ("Address", Some(ContactNote::Legislature)),
    ("bb", Some(ContactNote::Legislature)),
    ("bus", Some(ContactNote::Office)),
    ("Bus", Some(ContactNote::Office)),
    ("Bus.", Some(ContactNote::Office)),
    ("Business", Some(ContactNote::Office)),
    ("Cell", Some(ContactNote::Legislature)),
    ("Cell Phone", Some(ContactNote::Legislature)),
    ("Email", None),
    ("Fax", Some(ContactNote::Legislature)),
    ("Home", Some(ContactNote::Residence)),
    ("Home Phone", Some(ContactNote::Residence)),
    ("Home Phone*", Some(ContactNote::Residence)),
    ("ph", Some(ContactNote::Legislature)),
    ("Phone", Some(ContactNote::Legislature)),
    ("Office", Some(ContactNote::Legislature)),
    ("Res", Some(ContactNote::Residence)),
    ("Res/Bus", Some(ContactNote::Office)),
    ("Residence", Some(ContactNote::Residence)),
    ("Téléphone (bureau)", Some(ContactNote::Legislature)),
    ("Téléphone (cellulaire)", Some(ContactNote::Legislature)),
    ("Téléphone (résidence)", Some(ContactNote::Residence)),
    ("Téléphone (résidence et bureau)", Some(ContactNote::Legislature)),
    ("Voice Mail", Some(ContactNote::Legislature)),
    ("Work", Some(ContactNote::Legislature)),
];

/// Is this raw label a key of the type table?
pub fn is_known_label(label: &str) -> bool {
    CONTACT_TYPE_TABLE.iter().any(|(raw, _)| *raw == label)
}

fn lookup_type(label: &str) -> Option<ContactType> {
    CONTACT_TYPE_TABLE
        .iter()
        .find(|(raw, _)| *raw == label)
        .map(|(_, kind)| kind.clone())
}

fn lookup_note(note: &str) -> Option<Option<ContactNote>> {
    CONTACT_NOTE_TABLE
        .iter()
        .find(|(raw, _)| *raw == note)
        .map(|(_, canonical)| canonical.clone())
}

// ============================================================================
// CONTACT TYPE
// ============================================================================

/// Canonical contact method
///
/// Labels missing from the type table survive as `Other`, lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContactType {
    Voice,
    Fax,
    Cell,
    Text,
    Video,
    Pager,
    Email,
    Address,
    Other(String),
}

impl ContactType {
    pub fn as_str(&self) -> &str {
        match self {
            ContactType::Voice => "voice",
            ContactType::Fax => "fax",
            ContactType::Cell => "cell",
            ContactType::Text => "text",
            ContactType::Video => "video",
            ContactType::Pager => "pager",
            ContactType::Email => "email",
            ContactType::Address => "address",
            ContactType::Other(other) => other,
        }
    }

    /// Types whose values are telephone numbers
    pub fn is_phone(&self) -> bool {
        matches!(
            self,
            ContactType::Voice
                | ContactType::Fax
                | ContactType::Cell
                | ContactType::Text
                | ContactType::Video
                | ContactType::Pager
        )
    }

    /// Normalize a raw value the way this type requires
    pub fn normalize_value(&self, value: &str) -> String {
        self.normalize_value_in_area(value, None)
    }

    /// As [`ContactType::normalize_value`], completing seven-digit phone
    /// numbers with `area_code`
    pub fn normalize_value_in_area(&self, value: &str, area_code: Option<u16>) -> String {
        if self.is_phone() {
            normalize_phone_in_area(value, area_code)
        } else if *self == ContactType::Address {
            normalize_address(value)
        } else {
            sanitize(value)
        }
    }
}

impl From<String> for ContactType {
    fn from(raw: String) -> Self {
        let lowered = raw.to_lowercase();
        match lowered.as_str() {
            "voice" => ContactType::Voice,
            "fax" => ContactType::Fax,
            "cell" => ContactType::Cell,
            "text" => ContactType::Text,
            "video" => ContactType::Video,
            "pager" => ContactType::Pager,
            "email" => ContactType::Email,
            "address" => ContactType::Address,
            _ => ContactType::Other(lowered),
        }
    }
}

impl From<ContactType> for String {
    fn from(kind: ContactType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CONTACT NOTE
// ============================================================================

/// Context of a contact method. Notes missing from the note table survive
/// verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContactNote {
    Legislature,
    Office,
    Residence,
    Other(String),
}

impl ContactNote {
    pub fn as_str(&self) -> &str {
        match self {
            ContactNote::Legislature => "legislature",
            ContactNote::Office => "office",
            ContactNote::Residence => "residence",
            ContactNote::Other(other) => other,
        }
    }
}

impl From<String> for ContactNote {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "legislature" => ContactNote::Legislature,
            "office" => ContactNote::Office,
            "residence" => ContactNote::Residence,
            _ => ContactNote::Other(raw),
        }
    }
}

impl From<ContactNote> for String {
    fn from(note: ContactNote) -> Self {
        note.as_str().to_string()
    }
}

impl fmt::Display for ContactNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CONTACT DETAIL
// ============================================================================

/// A classified contact; `value` has already been normalized for `kind`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetail {
    #[serde(rename = "type")]
    pub kind: ContactType,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<ContactNote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("contact label {label:?} does not resolve to a contact type")]
    EmptyType { label: String },
}

/// Classify a raw contact
///
/// `label` and `note` are looked up independently (exact, case-sensitive)
/// after sanitizing. Fails only when the label is empty.
pub fn classify(label: &str, value: &str, note: &str) -> Result<ContactDetail, ClassificationError> {
    classify_in_area(label, value, note, None)
}

/// Classify a raw contact whose phone numbers may omit the area code
pub fn classify_in_area(
    label: &str,
    value: &str,
    note: &str,
    area_code: Option<u16>,
) -> Result<ContactDetail, ClassificationError> {
    let label = sanitize(label);
    if label.is_empty() {
        return Err(ClassificationError::EmptyType { label });
    }

    let kind = lookup_type(&label).unwrap_or_else(|| ContactType::from(label.clone()));

    let note = sanitize(note);
    let note = match lookup_note(&note) {
        Some(canonical) => canonical,
        None if note.is_empty() => None,
        None => Some(ContactNote::from(note)),
    };

    let value = kind.normalize_value_in_area(value, area_code);

    Ok(ContactDetail { kind, value, note })
}

// ============================================================================
// TESTS
// ============================================================================
