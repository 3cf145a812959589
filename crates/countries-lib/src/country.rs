use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Currency entry attached to a country, keyed by ISO 4217 code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Regional trade or political block a country belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalBlock {
    pub acronym: String,
    pub name: String,
}

/// A single country record as held in the in-memory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Three-letter code (`cca3`), kept as delivered by the source.
    pub code: String,
    pub name: String,
    pub official_name: Option<String>,
    pub population: u64,
    pub capital: Option<String>,
    pub languages: BTreeMap<String, String>,
    pub currencies: BTreeMap<String, Currency>,
    /// Codes of bordering countries, in source order. Entries may be dangling
    /// or point back at this country.
    pub borders: Vec<String>,
    pub flag_url: Option<String>,
    pub timezones: Vec<String>,
    pub regional_blocks: Vec<RegionalBlock>,
}

impl Country {
    /// Minimal record with only a code, a name, and its borders.
    pub fn new(code: impl Into<String>, name: impl Into<String>, borders: &[&str]) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            official_name: None,
            population: 0,
            capital: None,
            languages: BTreeMap::new(),
            currencies: BTreeMap::new(),
            borders: borders.iter().map(|b| b.to_string()).collect(),
            flag_url: None,
            timezones: Vec::new(),
            regional_blocks: Vec::new(),
        }
    }

    /// Normalized lookup key for this country's code.
    pub fn key(&self) -> String {
        normalize_code(&self.code)
    }
}

/// Normalize a country code for case-insensitive comparison.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

// Upstream (restcountries v3.1) wire shapes.

#[derive(Debug, Deserialize)]
struct RawCountry {
    name: RawName,
    cca3: String,
    #[serde(default)]
    population: u64,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    languages: BTreeMap<String, String>,
    #[serde(default)]
    currencies: BTreeMap<String, Currency>,
    #[serde(default)]
    borders: Vec<String>,
    #[serde(default)]
    flags: RawFlags,
    #[serde(default)]
    timezones: Vec<String>,
    #[serde(default, rename = "regionalBlocs")]
    regional_blocs: Vec<RawRegionalBloc>,
}

#[derive(Debug, Deserialize)]
struct RawName {
    common: String,
    #[serde(default)]
    official: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFlags {
    #[serde(default)]
    svg: Option<String>,
    #[serde(default)]
    png: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRegionalBloc {
    acronym: String,
    name: String,
}

impl From<RawCountry> for Country {
    fn from(raw: RawCountry) -> Self {
        Self {
            code: raw.cca3,
            name: raw.name.common,
            official_name: raw.name.official,
            population: raw.population,
            capital: raw.capital.into_iter().next(),
            languages: raw.languages,
            currencies: raw.currencies,
            borders: raw.borders,
            flag_url: raw.flags.svg.or(raw.flags.png),
            timezones: raw.timezones,
            regional_blocks: raw
                .regional_blocs
                .into_iter()
                .map(|bloc| RegionalBlock {
                    acronym: bloc.acronym,
                    name: bloc.name,
                })
                .collect(),
        }
    }
}

/// Decode the upstream JSON array into country records.
pub fn parse_countries(bytes: &[u8]) -> Result<Vec<Country>, FetchError> {
    let raw: Vec<RawCountry> = serde_json::from_slice(bytes)?;
    Ok(raw.into_iter().map(Country::from).collect())
}
