// 📋 CSV Roster Extractor
// Some councils publish their members as an open-data CSV rather than a web
// page. Each row becomes one PersonRecord; headers decide what a cell is.

use crate::contact::is_known_label;
use crate::jurisdiction::{Jurisdiction, PersonExtractor};
use crate::person::{PersonField, PersonRecord};
use crate::sanitize::sanitize;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::io::Read;
use tracing::{debug, warn};

const POST_HEADERS: &[&str] = &["District", "Post", "Ward", "Riding"];
const ROLE_HEADERS: &[&str] = &["Role", "Title"];
const LINK_HEADERS: &[&str] = &["Website", "Twitter", "Facebook"];

// ============================================================================
// COLUMNS
// ============================================================================

/// What a roster column holds, decided once from its header
#[derive(Debug, Clone, PartialEq, Eq)]
enum Column {
    Name,
    Post,
    Role,
    Field(PersonField),
    Contact(String),
    Link(String),
    Extra(String),
}

impl Column {
    fn from_header(header: &str, post_taken: bool, role_taken: bool) -> Self {
        let header = sanitize(header);

        if header == "Name" {
            return Column::Name;
        }
        if !post_taken && POST_HEADERS.contains(&header.as_str()) {
            return Column::Post;
        }
        if !role_taken && ROLE_HEADERS.contains(&header.as_str()) {
            return Column::Role;
        }
        match header.as_str() {
            "Party" => return Column::Field(PersonField::Party),
            "Gender" => return Column::Field(PersonField::Gender),
            "Image" | "Photo URL" => return Column::Field(PersonField::Image),
            _ => {}
        }
        if is_known_label(&header) {
            return Column::Contact(header);
        }
        if LINK_HEADERS.contains(&header.as_str()) {
            return Column::Link(header.to_lowercase());
        }

        Column::Extra(header.to_lowercase().replace(' ', "_"))
    }
}

fn columns_for(headers: &csv::StringRecord) -> Vec<Column> {
    let mut post_taken = false;
    let mut role_taken = false;

    headers
        .iter()
        .map(|header| {
            let column = Column::from_header(header, post_taken, role_taken);
            post_taken |= column == Column::Post;
            role_taken |= column == Column::Role;
            column
        })
        .collect()
}

// ============================================================================
// EXTRACTOR
// ============================================================================

pub struct RosterExtractor {
    jurisdiction: Jurisdiction,
    source_url: String,
    default_role: String,
}

impl RosterExtractor {
    pub fn new(jurisdiction: Jurisdiction, source_url: impl Into<String>) -> Self {
        RosterExtractor {
            jurisdiction,
            source_url: source_url.into(),
            default_role: "Councillor".to_string(),
        }
    }

    /// Builder pattern: role for rows without a role column
    pub fn with_default_role(mut self, role: impl Into<String>) -> Self {
        self.default_role = role.into();
        self
    }

    /// Parse a roster from any reader
    pub fn extract_from_reader<R: Read>(&self, reader: R) -> Result<Vec<PersonRecord>> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read roster header from {}", self.source_url))?
            .clone();
        let columns = columns_for(&headers);
        if !columns.contains(&Column::Name) {
            anyhow::bail!("Roster {} has no Name column", self.source_url);
        }

        let mut people = Vec::new();

        for (row_num, result) in reader.records().enumerate() {
            let record = result.with_context(|| {
                format!("Failed to parse roster row {} in {}", row_num + 2, self.source_url)
            })?;

            match self.person_from_row(&columns, &record) {
                Some(person) => people.push(person),
                None => warn!(row = row_num + 2, source = %self.source_url, "roster row has no name, skipped"),
            }
        }

        debug!(
            jurisdiction = %self.jurisdiction.id,
            count = people.len(),
            "roster extracted"
        );
        Ok(people)
    }

    fn person_from_row(&self, columns: &[Column], record: &csv::StringRecord) -> Option<PersonRecord> {
        let cell = |wanted: &Column| {
            columns
                .iter()
                .position(|c| c == wanted)
                .and_then(|i| record.get(i))
                .map(sanitize)
                .filter(|v| !v.is_empty())
        };

        let name = cell(&Column::Name)?;
        let post_id = cell(&Column::Post).unwrap_or_else(|| self.jurisdiction.division_name.clone());
        let role = cell(&Column::Role).unwrap_or_else(|| self.default_role.clone());

        let mut person = PersonRecord::new(&name, &post_id, &role);
        person.add_source(&self.source_url);

        for (column, value) in columns.iter().zip(record.iter()) {
            if sanitize(value).is_empty() {
                continue;
            }
            match column {
                Column::Name | Column::Post | Column::Role => {}
                Column::Field(field) => person.set(*field, value),
                Column::Contact(label) => {
                    let added = person
                        .add_contact_in_area(label, value, label, self.jurisdiction.area_code)
                        .map(|_| ());
                    if let Err(err) = added {
                        warn!(name = %person.name, error = %err, "contact skipped");
                    }
                }
                Column::Link(note) => person.add_link(value, note),
                Column::Extra(key) => person.set_named(key, value),
            }
        }

        Some(person)
    }
}

impl PersonExtractor for RosterExtractor {
    fn jurisdiction_id(&self) -> &str {
        &self.jurisdiction.id
    }

    fn extract(&self, document: &str) -> Result<Vec<PersonRecord>> {
        self.extract_from_reader(document.as_bytes())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{ContactNote, ContactType};
    use crate::jurisdiction::JurisdictionRegistry;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "http://opendata.example.ca/council.csv";

    fn saskatoon() -> Jurisdiction {
        JurisdictionRegistry::new().get("ca_sk_saskatoon").unwrap().clone()
    }

    #[test]
    fn test_columns_from_headers() {
        let headers = csv::StringRecord::from(vec![
            "Name", "Ward", "District", "Title", "Party", "Photo URL", "Phone", "Website", "Birth Date",
        ]);
        assert_eq!(
            columns_for(&headers),
            vec![
                Column::Name,
                Column::Post,
                Column::Extra("district".to_string()),
                Column::Role,
                Column::Field(PersonField::Party),
                Column::Field(PersonField::Image),
                Column::Contact("Phone".to_string()),
                Column::Link("website".to_string()),
                Column::Extra("birth_date".to_string()),
            ]
        );
    }

    #[test]
    fn test_extract_roster() {
        let csv = "\
Name,Ward,Role,Gender,Phone,Fax,Email,Address,Twitter
Councillor Cynthia Block,Ward 6,Councillor,F,306 975 3202,306-975-2784,cynthia.block@saskatoon.ca,\"222 3rd Ave N, Saskatoon, Saskatchewan, S7K 0J5\",@CynthiaBlock
Charlie Clark,,Mayor,M,(306) 975-3202 ext. 12,,,,
";
        let extractor = RosterExtractor::new(saskatoon(), SOURCE);
        let people = extractor.extract(csv).unwrap();
        assert_eq!(people.len(), 2);

        let block = &people[0];
        assert_eq!(block.name, "Cynthia Block");
        assert_eq!(block.post_id, "Ward 6");
        assert_eq!(block.gender.as_deref(), Some("female"));
        assert_eq!(block.sources, vec![SOURCE.to_string()]);
        assert_eq!(block.contacts.len(), 4);
        assert_eq!(block.contacts[0].kind, ContactType::Voice);
        assert_eq!(block.contacts[0].value, "1-306-975-3202");
        assert_eq!(block.contacts[0].note, Some(ContactNote::Legislature));
        assert_eq!(block.contacts[2].kind, ContactType::Email);
        assert_eq!(block.contacts[2].note, None);
        assert_eq!(block.contacts[3].value, "222 3rd Ave N, Saskatoon SK  S7K 0J5");
        assert_eq!(block.links[0].url, "https://twitter.com/CynthiaBlock");
        assert_eq!(block.links[0].note, "twitter");

        let clark = &people[1];
        assert_eq!(clark.post_id, "Saskatoon");
        assert_eq!(clark.role, "Mayor");
        assert_eq!(clark.gender.as_deref(), Some("male"));
        assert_eq!(clark.contacts.len(), 1);
        assert_eq!(clark.contacts[0].value, "1-306-975-3202 x12");
    }

    #[test]
    fn test_default_role_and_nameless_rows() {
        let csv = "Name,Cell\n,604 555 1212\nJane Doe,604 555 1213\n";
        let extractor = RosterExtractor::new(saskatoon(), SOURCE).with_default_role("Conseiller");
        let people = extractor.extract(csv).unwrap();

        assert_eq!(people.len(), 1);
        assert_eq!(people[0].role, "Conseiller");
        assert_eq!(people[0].contacts[0].kind, ContactType::Cell);
    }

    #[test]
    fn test_local_numbers_use_jurisdiction_area_code() {
        let nunavut = JurisdictionRegistry::new().get("ca_nu").unwrap().clone();
        let csv = "Name,Riding,Phone\nAdam Lightstone,Iqaluit-Manirajak,975-5000\n";
        let people = RosterExtractor::new(nunavut, SOURCE).extract(csv).unwrap();
        assert_eq!(people[0].contacts[0].value, "1-867-975-5000");
    }

    #[test]
    fn test_missing_name_column_fails() {
        let csv = "Ward,Phone\nWard 1,604 555 1212\n";
        let err = RosterExtractor::new(saskatoon(), SOURCE).extract(csv).unwrap_err();
        assert!(err.to_string().contains("no Name column"));
    }

    #[test]
    fn test_ragged_row_fails_with_row_number() {
        let csv = "Name,Phone\nJane Doe,604 555 1212,extra\n";
        let err = RosterExtractor::new(saskatoon(), SOURCE).extract(csv).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_extract_via_registry() {
        let mut registry = JurisdictionRegistry::new();
        let extractor = RosterExtractor::new(saskatoon(), SOURCE);
        registry.register_extractor(Box::new(extractor)).unwrap();

        let people = registry.extract("ca_sk_saskatoon", "Name\nMayor Charlie Clark\n").unwrap();
        assert_eq!(people[0].name, "Charlie Clark");
        assert_eq!(people[0].post_id, "Saskatoon");
    }
}
