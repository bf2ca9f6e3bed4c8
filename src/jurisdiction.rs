// 🏛️ Jurisdictions & Extractor Registry
// Static table of jurisdictions and the extractors that produce their people.
//
// Extractors are looked up by jurisdiction id at startup, never by building a
// type name out of strings.

use crate::person::PersonRecord;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// CORE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Legislature,
    Executive,
    Council,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Legislature => "legislature",
            Classification::Executive => "executive",
            Classification::Council => "council",
        }
    }
}

/// A seat that exists whether or not anyone currently holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub role: String,
    pub label: String,
}

impl Post {
    pub fn new(role: impl Into<String>, label: impl Into<String>) -> Self {
        Post {
            role: role.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub classification: Classification,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<Post>,
}

/// A government whose officials are extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jurisdiction {
    /// Module-style identifier, e.g. "ca_on_north_dumfries"
    pub id: String,
    pub classification: Classification,
    /// Open Civic Data division identifier
    pub division_id: String,
    pub division_name: String,
    pub name: String,
    pub url: String,
    /// Area code assumed for local (seven-digit) phone numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<Post>,
}

impl Jurisdiction {
    pub fn new(
        id: impl Into<String>,
        division_id: impl Into<String>,
        division_name: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Jurisdiction {
            id: id.into(),
            classification: Classification::Legislature,
            division_id: division_id.into(),
            division_name: division_name.into(),
            name: name.into(),
            url: url.into(),
            area_code: None,
            posts: Vec::new(),
        }
    }

    /// Builder pattern: local area code
    pub fn with_area_code(mut self, area_code: u16) -> Self {
        self.area_code = Some(area_code);
        self
    }

    /// Builder pattern: declare a seat
    pub fn with_post(mut self, role: &str, label: &str) -> Self {
        self.posts.push(Post::new(role, label));
        self
    }

    /// The single governing body of this jurisdiction
    pub fn organizations(&self) -> Vec<Organization> {
        vec![Organization {
            name: self.name.clone(),
            classification: self.classification,
            posts: self.posts.clone(),
        }]
    }
}

// ============================================================================
// EXTRACTOR TRAIT
// ============================================================================

/// PersonExtractor - turns one already-fetched document into people
///
/// Site-specific extractors implement this; fetching and markup traversal
/// happen before `extract` is called.
pub trait PersonExtractor: Send + Sync {
    /// Jurisdiction this extractor serves
    fn jurisdiction_id(&self) -> &str;

    /// Extract every official found in `document`
    fn extract(&self, document: &str) -> Result<Vec<PersonRecord>>;

    /// Extractor version (for provenance tracking)
    fn version(&self) -> &str {
        "1.0.0"
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown jurisdiction: {0}")]
    UnknownJurisdiction(String),
    #[error("no extractor registered for jurisdiction: {0}")]
    NoExtractor(String),
}

// ============================================================================
// REGISTRY
// ============================================================================

/// JurisdictionRegistry - every known jurisdiction plus its extractor
pub struct JurisdictionRegistry {
    jurisdictions: BTreeMap<String, Jurisdiction>,
    extractors: BTreeMap<String, Box<dyn PersonExtractor>>,
}

impl JurisdictionRegistry {
    /// Create a registry holding the built-in jurisdictions
    pub fn new() -> Self {
        let mut registry = JurisdictionRegistry::empty();
        registry.register_default_jurisdictions();
        registry
    }

    /// Create a registry with nothing in it
    pub fn empty() -> Self {
        JurisdictionRegistry {
            jurisdictions: BTreeMap::new(),
            extractors: BTreeMap::new(),
        }
    }

    fn register_default_jurisdictions(&mut self) {
        self.register(Jurisdiction::new(
            "ca_on",
            "ocd-division/country:ca/province:on",
            "Ontario",
            "Legislative Assembly of Ontario",
            "http://www.ontla.on.ca",
        ));

        self.register(
            Jurisdiction::new(
                "ca_nu",
                "ocd-division/country:ca/territory:nu",
                "Nunavut",
                "Legislative Assembly of Nunavut",
                "https://www.assembly.nu.ca",
            )
            .with_area_code(867),
        );

        self.register(Jurisdiction::new(
            "ca_on_north_dumfries",
            "ocd-division/country:ca/csd:3530004",
            "North Dumfries",
            "North Dumfries Township Council",
            "http://www.township.northdumfries.on.ca",
        ));

        self.register(Jurisdiction::new(
            "ca_on_wellesley",
            "ocd-division/country:ca/csd:3530027",
            "Wellesley",
            "Wellesley Township Council",
            "http://www.township.wellesley.on.ca",
        ));

        self.register(Jurisdiction::new(
            "ca_pe_charlottetown",
            "ocd-division/country:ca/csd:1102075",
            "Charlottetown",
            "Charlottetown City Council",
            "http://www.city.charlottetown.pe.ca",
        ));

        self.register(Jurisdiction::new(
            "ca_sk_saskatoon",
            "ocd-division/country:ca/csd:4711066",
            "Saskatoon",
            "Saskatoon City Council",
            "http://www.saskatoon.ca",
        ));

        let mut lasalle = Jurisdiction::new(
            "ca_on_lasalle",
            "ocd-division/country:ca/csd:3537034",
            "LaSalle",
            "LaSalle Town Council",
            "http://www.town.lasalle.on.ca",
        )
        .with_post("Mayor", "LaSalle")
        .with_post("Deputy Mayor", "LaSalle");
        for seat in 1..=5 {
            lasalle = lasalle.with_post("Councillor", &format!("LaSalle (seat {})", seat));
        }
        self.register(lasalle);
    }

    /// Register (or replace) a jurisdiction
    pub fn register(&mut self, jurisdiction: Jurisdiction) {
        self.jurisdictions.insert(jurisdiction.id.clone(), jurisdiction);
    }

    /// Attach an extractor to a known jurisdiction
    pub fn register_extractor(&mut self, extractor: Box<dyn PersonExtractor>) -> Result<(), RegistryError> {
        let id = extractor.jurisdiction_id().to_string();
        if !self.jurisdictions.contains_key(&id) {
            return Err(RegistryError::UnknownJurisdiction(id));
        }
        debug!(jurisdiction = %id, version = extractor.version(), "extractor registered");
        self.extractors.insert(id, extractor);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Jurisdiction> {
        self.jurisdictions.get(id)
    }

    /// All jurisdictions, ordered by id
    pub fn all(&self) -> Vec<&Jurisdiction> {
        self.jurisdictions.values().collect()
    }

    pub fn count(&self) -> usize {
        self.jurisdictions.len()
    }

    pub fn extractor(&self, id: &str) -> Option<&dyn PersonExtractor> {
        self.extractors.get(id).map(|e| e.as_ref())
    }

    /// Run the extractor registered for `id` over `document`
    pub fn extract(&self, id: &str, document: &str) -> Result<Vec<PersonRecord>> {
        if !self.jurisdictions.contains_key(id) {
            return Err(RegistryError::UnknownJurisdiction(id.to_string()).into());
        }
        let extractor = self
            .extractor(id)
            .ok_or_else(|| RegistryError::NoExtractor(id.to_string()))?;
        extractor.extract(document)
    }
}

impl Default for JurisdictionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
