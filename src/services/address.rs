//! Address suggestion and geocoding collaborators.
//!
//! Both lookups are advisory. Failures are logged and degrade to "no
//! suggestions" or "no coordinates"; they never reach the wizard controller.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::{self, WizardError};
use crate::reference::{self, Country};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    #[error("lookup service unavailable: {0}")]
    Unavailable(String),
    #[error("request denied: {0}")]
    Denied(String),
    #[error("no results")]
    ZeroResults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressCandidate {
    pub place_id: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

pub trait AddressSuggester {
    /// Candidates for free text, restricted to one country id.
    fn suggest(
        &self,
        query: &str,
        country_id: &str,
    ) -> Result<Vec<AddressCandidate>, LookupFailure>;
}

pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Coordinates, LookupFailure>;
}

/// Suggester for environments without a lookup service.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSuggestions;

impl AddressSuggester for NoSuggestions {
    fn suggest(
        &self,
        _query: &str,
        _country_id: &str,
    ) -> Result<Vec<AddressCandidate>, LookupFailure> {
        Ok(Vec::new())
    }
}

impl Geocoder for NoSuggestions {
    fn geocode(&self, _address: &str) -> Result<Coordinates, LookupFailure> {
        Err(LookupFailure::Unavailable("geocoding disabled".into()))
    }
}

/// In-memory catalogue of known addresses, matched by substring.
#[derive(Debug, Default, Clone)]
pub struct StaticCatalogue {
    entries: Vec<(String, AddressCandidate, Option<Coordinates>)>,
}

impl StaticCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(
        mut self,
        country_id: &str,
        description: &str,
        coordinates: Option<Coordinates>,
    ) -> Self {
        let place_id = format!("{}-{}", country_id, self.entries.len() + 1);
        self.entries.push((
            country_id.to_ascii_lowercase(),
            AddressCandidate {
                place_id,
                description: description.to_string(),
            },
            coordinates,
        ));
        self
    }
}

impl AddressSuggester for StaticCatalogue {
    fn suggest(
        &self,
        query: &str,
        country_id: &str,
    ) -> Result<Vec<AddressCandidate>, LookupFailure> {
        let needle = query.to_lowercase();
        let country = country_id.to_ascii_lowercase();
        Ok(self
            .entries
            .iter()
            .filter(|(entry_country, candidate, _)| {
                *entry_country == country && candidate.description.to_lowercase().contains(&needle)
            })
            .map(|(_, candidate, _)| candidate.clone())
            .collect())
    }
}

impl Geocoder for StaticCatalogue {
    fn geocode(&self, address: &str) -> Result<Coordinates, LookupFailure> {
        self.entries
            .iter()
            .find(|(_, candidate, _)| candidate.description == address)
            .and_then(|(_, _, coordinates)| *coordinates)
            .ok_or(LookupFailure::ZeroResults)
    }
}

/// One entry of a JSON address catalogue file.
#[derive(Debug, Deserialize)]
struct CatalogueEntry {
    country: String,
    description: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
}

impl StaticCatalogue {
    /// Loads a JSON array of `{ country, description, lat?, lng? }` entries.
    ///
    /// `country` accepts a country id or display name; coordinates are kept
    /// only when both `lat` and `lng` are present.
    pub fn from_path(path: &Path) -> errors::Result<Self> {
        let data = fs::read_to_string(path)?;
        let entries: Vec<CatalogueEntry> = serde_json::from_str(&data)
            .map_err(|err| WizardError::Config(format!("{}: {}", path.display(), err)))?;
        let catalogue = entries.iter().fold(Self::new(), |catalogue, entry| {
            let country_id = reference::find_country(&entry.country)
                .map(|country| country.id)
                .unwrap_or(entry.country.as_str());
            let coordinates = match (entry.lat, entry.lng) {
                (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
                _ => None,
            };
            catalogue.with_address(country_id, &entry.description, coordinates)
        });
        debug!(
            path = %path.display(),
            entries = catalogue.entries.len(),
            "Address catalogue loaded"
        );
        Ok(catalogue)
    }
}

/// Address picked from the suggestion list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressSelection {
    pub address: String,
    pub coordinates: Option<Coordinates>,
}

/// Front for the address collaborators used by the business-info step.
pub struct AddressLookup {
    suggester: Box<dyn AddressSuggester>,
    geocoder: Box<dyn Geocoder>,
}

impl AddressLookup {
    pub fn new(suggester: Box<dyn AddressSuggester>, geocoder: Box<dyn Geocoder>) -> Self {
        Self {
            suggester,
            geocoder,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Box::new(NoSuggestions), Box::new(NoSuggestions))
    }

    /// Suggestions for `query` in `country`; empty on blank input or failure.
    pub fn suggestions(&self, query: &str, country: &Country) -> Vec<AddressCandidate> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        match self.suggester.suggest(query, country.id) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, "Address suggestions unavailable");
                Vec::new()
            }
        }
    }

    /// Accepts a candidate; coordinates are resolved when possible.
    pub fn select(&self, candidate: &AddressCandidate) -> AddressSelection {
        let coordinates = match self.geocoder.geocode(&candidate.description) {
            Ok(coordinates) => Some(coordinates),
            Err(err) => {
                warn!(error = %err, "Geocoding failed");
                None
            }
        };
        AddressSelection {
            address: candidate.description.clone(),
            coordinates,
        }
    }
}
