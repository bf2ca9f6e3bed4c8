// Civic Normalize - Core Library
// Normalization pipeline for elected-official records scraped from Canadian
// government sites: names, phone numbers, addresses and contact labels.

pub mod sanitize;      // String Sanitizer
pub mod name;          // Name Normalizer
pub mod phone;         // Telephone Normalizer
pub mod address;       // Address Normalizer
pub mod contact;       // Contact Classifier
pub mod person;        // Person Record Builder
pub mod jurisdiction;  // Jurisdictions + extractor registry
pub mod roster;        // CSV roster extractor

// Re-export commonly used types
pub use sanitize::sanitize;
pub use name::normalize_name;
pub use phone::{normalize_phone, normalize_phone_in_area};
pub use address::{normalize_address, province_abbreviation};
pub use contact::{
    classify, classify_in_area,
    ClassificationError, ContactDetail, ContactNote, ContactType,
};
pub use person::{Link, PersonField, PersonRecord};
pub use jurisdiction::{
    Classification, Jurisdiction, JurisdictionRegistry, Organization, PersonExtractor, Post,
    RegistryError,
};
pub use roster::RosterExtractor;
