// 👤 Person Record Builder
// One canonical record per elected official, built up by a site extractor.
//
// Every string assigned to a record is sanitized exactly once, at
// assignment. Contacts, links and sources only ever grow, in discovery order.

use crate::contact::{classify_in_area, ClassificationError, ContactDetail};
use crate::name::normalize_name;
use crate::sanitize::{sanitize, sanitize_opt};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

static HANDLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A@[A-Za-z]+\z").expect("valid handle regex"));

// ============================================================================
// LINK
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub note: String,
}

impl Link {
    /// Coerce `www.` domains to `http://` and `@handle` tokens to Twitter URLs
    pub fn new(url: &str, note: &str) -> Self {
        let url = sanitize(url);
        let url = if url.starts_with("www.") {
            format!("http://{}", url)
        } else if HANDLE_RE.is_match(&url) {
            format!("https://twitter.com/{}", &url[1..])
        } else {
            url
        };

        Link {
            url,
            note: sanitize(note),
        }
    }
}

// ============================================================================
// FIELDS
// ============================================================================

/// Optional fields assignable after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    Party,
    Image,
    Gender,
    BirthDate,
    Summary,
    Biography,
}

impl PersonField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonField::Party => "party",
            PersonField::Image => "image",
            PersonField::Gender => "gender",
            PersonField::BirthDate => "birth_date",
            PersonField::Summary => "summary",
            PersonField::Biography => "biography",
        }
    }
}

impl FromStr for PersonField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "party" => Ok(PersonField::Party),
            "image" => Ok(PersonField::Image),
            "gender" => Ok(PersonField::Gender),
            "birth_date" => Ok(PersonField::BirthDate),
            "summary" => Ok(PersonField::Summary),
            "biography" => Ok(PersonField::Biography),
            other => Err(format!("unknown person field: {}", other)),
        }
    }
}

/// "M"/"F" spell out; anything else is kept as given
fn expand_gender(value: String) -> String {
    match value.as_str() {
        "M" => "male".to_string(),
        "F" => "female".to_string(),
        _ => value,
    }
}

// ============================================================================
// PERSON RECORD
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Random identity given at construction
    pub id: String,

    pub name: String,
    pub post_id: String,
    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,

    /// Keyword fields without a dedicated slot
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,

    #[serde(default)]
    pub contacts: Vec<ContactDetail>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl PersonRecord {
    /// Start a record; the name loses its honorifics, the rest is sanitized
    pub fn new(name: &str, post_id: &str, role: &str) -> Self {
        PersonRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: normalize_name(name),
            post_id: sanitize(post_id),
            role: sanitize(role),
            party: None,
            image: None,
            gender: None,
            birth_date: None,
            summary: None,
            biography: None,
            extras: BTreeMap::new(),
            contacts: Vec::new(),
            links: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Builder pattern: add party
    pub fn with_party(mut self, party: &str) -> Self {
        self.set(PersonField::Party, party);
        self
    }

    /// Builder pattern: add image URL
    pub fn with_image(mut self, image: &str) -> Self {
        self.set(PersonField::Image, image);
        self
    }

    /// Builder pattern: add gender
    pub fn with_gender(mut self, gender: &str) -> Self {
        self.set(PersonField::Gender, gender);
        self
    }

    /// Assign an optional field: sanitize, then apply the field's rewrite.
    /// A value that sanitizes to nothing leaves the field absent.
    pub fn set(&mut self, field: PersonField, value: &str) {
        let value = sanitize_opt(Some(value));
        let slot = match field {
            PersonField::Party => &mut self.party,
            PersonField::Image => &mut self.image,
            PersonField::Gender => &mut self.gender,
            PersonField::BirthDate => &mut self.birth_date,
            PersonField::Summary => &mut self.summary,
            PersonField::Biography => &mut self.biography,
        };
        *slot = match field {
            PersonField::Gender => value.map(expand_gender),
            _ => value,
        };
    }

    /// Assign a field by name; names without a dedicated slot go to `extras`
    pub fn set_named(&mut self, name: &str, value: &str) {
        match name.parse::<PersonField>() {
            Ok(field) => self.set(field, value),
            Err(_) => {
                if let Some(value) = sanitize_opt(Some(value)) {
                    self.extras.insert(name.to_string(), value);
                }
            }
        }
    }

    /// Read an optional field back
    pub fn get(&self, field: PersonField) -> Option<&str> {
        match field {
            PersonField::Party => self.party.as_deref(),
            PersonField::Image => self.image.as_deref(),
            PersonField::Gender => self.gender.as_deref(),
            PersonField::BirthDate => self.birth_date.as_deref(),
            PersonField::Summary => self.summary.as_deref(),
            PersonField::Biography => self.biography.as_deref(),
        }
    }

    /// Classify and append a contact
    pub fn add_contact(&mut self, label: &str, value: &str, note: &str) -> Result<&ContactDetail, ClassificationError> {
        self.add_contact_in_area(label, value, note, None)
    }

    /// Classify and append a contact, completing local phone numbers
    pub fn add_contact_in_area(
        &mut self,
        label: &str,
        value: &str,
        note: &str,
        area_code: Option<u16>,
    ) -> Result<&ContactDetail, ClassificationError> {
        let detail = classify_in_area(label, value, note, area_code)?;
        self.contacts.push(detail);
        Ok(&self.contacts[self.contacts.len() - 1])
    }

    pub fn add_link(&mut self, url: &str, note: &str) {
        self.links.push(Link::new(url, note));
    }

    /// Sources are kept verbatim
    pub fn add_source(&mut self, url: &str) {
        self.sources.push(url.to_string());
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{ContactNote, ContactType};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_construction_normalizes() {
        let person = PersonRecord::new("  Councillor Jane  Smith ", " Ward\u{00A0}3 ", " Councillor ");
        assert_eq!(person.name, "Jane Smith");
        assert_eq!(person.post_id, "Ward 3");
        assert_eq!(person.role, "Councillor");
        assert!(!person.id.is_empty());
        assert!(person.contacts.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = PersonRecord::new("A", "B", "C");
        let b = PersonRecord::new("A", "B", "C");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_gender_rewrite() {
        let mut person = PersonRecord::new("Jane Smith", "Ward 3", "Councillor");
        person.set(PersonField::Gender, "F");
        assert_eq!(person.gender.as_deref(), Some("female"));

        person.set(PersonField::Gender, " M ");
        assert_eq!(person.gender.as_deref(), Some("male"));

        person.set(PersonField::Gender, "non-binary");
        assert_eq!(person.gender.as_deref(), Some("non-binary"));
    }

    #[test]
    fn test_only_gender_is_rewritten() {
        let person = PersonRecord::new("Jane Smith", "Ward 3", "Councillor").with_party("M");
        assert_eq!(person.party.as_deref(), Some("M"));
    }

    #[test]
    fn test_builder_fields_are_sanitized() {
        let person = PersonRecord::new("Bob Lee", "Toronto Centre", "MPP")
            .with_party("  Ontario   NDP ")
            .with_image(" http://example.ca/bob.jpg ")
            .with_gender("M");
        assert_eq!(person.get(PersonField::Party), Some("Ontario NDP"));
        assert_eq!(person.get(PersonField::Image), Some("http://example.ca/bob.jpg"));
        assert_eq!(person.get(PersonField::Gender), Some("male"));
    }

    #[test]
    fn test_empty_optional_values_stay_absent() {
        let mut person = PersonRecord::new("Bob Lee", "Coquitlam", "Mayor").with_image("");
        person.set_named("party", "   ");
        person.set_named("twitter_followers", "");
        assert_eq!(person.image, None);
        assert_eq!(person.party, None);
        assert!(person.extras.is_empty());
    }

    #[test]
    fn test_set_named() {
        let mut person = PersonRecord::new("Bob Lee", "Coquitlam", "Mayor");
        person.set_named("gender", "F");
        person.set_named("birth_date", "1970-01-01");
        person.set_named("constituency_office", " 12  Main St ");
        assert_eq!(person.gender.as_deref(), Some("female"));
        assert_eq!(person.birth_date.as_deref(), Some("1970-01-01"));
        assert_eq!(person.extras.get("constituency_office").map(String::as_str), Some("12 Main St"));
    }

    #[test]
    fn test_person_field_round_trip() {
        for field in [
            PersonField::Party,
            PersonField::Image,
            PersonField::Gender,
            PersonField::BirthDate,
            PersonField::Summary,
            PersonField::Biography,
        ] {
            assert_eq!(field.as_str().parse::<PersonField>(), Ok(field));
        }
        assert!("email".parse::<PersonField>().is_err());
    }

    #[test]
    fn test_contacts_keep_insertion_order() {
        let mut person = PersonRecord::new("Jane Smith", "Ward 3", "Councillor");
        person.add_contact("Phone", "604 555 1212", "Phone").unwrap();
        person.add_contact("Email", "jane@example.ca", "").unwrap();
        person.add_contact("Fax", "604-555-1213", "Fax").unwrap();
        person.add_contact("Cell", "604.555.1214", "").unwrap();

        assert_eq!(person.contacts.len(), 4);
        let kinds: Vec<&ContactType> = person.contacts.iter().map(|c| &c.kind).collect();
        assert_eq!(
            kinds,
            vec![&ContactType::Voice, &ContactType::Email, &ContactType::Fax, &ContactType::Cell]
        );
        assert_eq!(person.contacts[0].note, Some(ContactNote::Legislature));
        assert_eq!(person.contacts[3].value, "1-604-555-1214");
    }

    #[test]
    fn test_add_contact_returns_appended_detail() {
        let mut person = PersonRecord::new("Jane Smith", "Ward 3", "Councillor");
        let detail = person.add_contact("Cell", "604 555 1212", "").unwrap();
        assert_eq!(detail.value, "1-604-555-1212");
    }

    #[test]
    fn test_add_contact_in_area() {
        let mut person = PersonRecord::new("Adam Lightstone", "Iqaluit-Manirajak", "MLA");
        person.add_contact_in_area("voice", "975-5000", "legislature", Some(867)).unwrap();
        assert_eq!(person.contacts[0].value, "1-867-975-5000");
    }

    #[test]
    fn test_failed_contact_is_not_appended() {
        let mut person = PersonRecord::new("Jane Smith", "Ward 3", "Councillor");
        assert!(person.add_contact("", "604 555 1212", "").is_err());
        assert!(person.contacts.is_empty());
    }

    #[test]
    fn test_add_link_coercions() {
        let mut person = PersonRecord::new("Jane Smith", "Ward 3", "Councillor");
        person.add_link("www.example.ca", "");
        person.add_link("@exampleuser", "twitter");
        person.add_link("https://facebook.com/jane", "facebook");
        person.add_link("@example_user", "");

        let urls: Vec<&str> = person.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://www.example.ca",
                "https://twitter.com/exampleuser",
                "https://facebook.com/jane",
                "@example_user",
            ]
        );
        assert_eq!(person.links[1].note, "twitter");
    }

    #[test]
    fn test_sources_are_verbatim() {
        let mut person = PersonRecord::new("Jane Smith", "Ward 3", "Councillor");
        person.add_source("http://www.coquitlam.ca/council.aspx ");
        person.add_source("http://www.coquitlam.ca/council.aspx ");
        assert_eq!(person.sources, vec!["http://www.coquitlam.ca/council.aspx "; 2]);
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let mut person = PersonRecord::new("Jane Smith", "Ward 3", "Councillor").with_party("Liberal");
        person.add_contact("Cell", "604 555 1212", "").unwrap();
        let json = serde_json::to_value(&person).unwrap();

        assert_eq!(json["name"], "Jane Smith");
        assert_eq!(json["party"], "Liberal");
        assert!(json.get("image").is_none());
        assert!(json.get("extras").is_none());
        assert_eq!(json["contacts"][0]["type"], "cell");
    }
}
