//! JSON projections of library records returned by the HTTP endpoints.

use serde::{Deserialize, Serialize};

use countries_lib::{Country, RouteOutcome};

const NOT_AVAILABLE: &str = "N/A";

fn joined_or_na<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    if parts.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        parts.join(", ")
    }
}

/// One entry of a `/countries` search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub code: String,
    /// Currency codes, or "N/A".
    pub currency: String,
    pub flag: Option<String>,
    /// Regional block acronyms, or "N/A".
    pub regional_blocks: String,
}

impl From<&Country> for SearchResult {
    fn from(country: &Country) -> Self {
        Self {
            name: country.name.clone(),
            code: country.code.clone(),
            currency: joined_or_na(country.currencies.keys()),
            flag: country.flag_url.clone(),
            regional_blocks: joined_or_na(country.regional_blocks.iter().map(|b| &b.acronym)),
        }
    }
}

/// Body of `/country/{code}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDetail {
    pub name: String,
    pub population: u64,
    pub timezone: Vec<String>,
    /// "Name (symbol)" per currency, or "N/A".
    pub currencies: String,
    pub languages: String,
    pub capital: String,
    /// Regional block names, or "N/A".
    pub regional_blocks: String,
    pub borders: Vec<String>,
}

impl From<&Country> for CountryDetail {
    fn from(country: &Country) -> Self {
        let currencies = country.currencies.values().map(|currency| {
            format!(
                "{} ({})",
                currency.name.as_deref().unwrap_or(NOT_AVAILABLE),
                currency.symbol.as_deref().unwrap_or(NOT_AVAILABLE)
            )
        });

        Self {
            name: country.name.clone(),
            population: country.population,
            timezone: country.timezones.clone(),
            currencies: joined_or_na(currencies),
            languages: joined_or_na(country.languages.values()),
            capital: country
                .capital
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            regional_blocks: joined_or_na(country.regional_blocks.iter().map(|b| &b.name)),
            borders: country.borders.clone(),
        }
    }
}

/// Body of `/route`.
///
/// `status` is `found` or `no_route`; the latter carries an empty route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hops: Option<usize>,
    /// Country names from start to end.
    pub route: Vec<String>,
    pub codes: Vec<String>,
}

impl From<&RouteOutcome> for RouteResponse {
    fn from(outcome: &RouteOutcome) -> Self {
        let status = if outcome.is_found() { "found" } else { "no_route" };
        Self {
            status: status.to_string(),
            hops: outcome.hop_count(),
            route: outcome.steps().iter().map(|c| c.name.clone()).collect(),
            codes: outcome.steps().iter().map(|c| c.code.clone()).collect(),
        }
    }
}
