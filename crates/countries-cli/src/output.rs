//! Output formatting for the `countries` subcommands.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde_json::to_string_pretty;

use countries_lib::{Country, RouteOutcome};

/// Message printed when two known countries are not connected by land.
pub const NO_ROUTE_MESSAGE: &str = "No route available";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON of the library records.
    Json,
}

fn joined_or_na<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    let parts: Vec<&str> = items.into_iter().collect();
    if parts.is_empty() {
        "N/A".to_string()
    } else {
        parts.join(", ")
    }
}

pub fn render_search(query: &str, countries: &[Country], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(to_string_pretty(countries)?);
    }

    if countries.is_empty() {
        return Ok(format!("No countries match '{query}'"));
    }

    let mut out = String::new();
    for country in countries {
        let currencies = joined_or_na(country.currencies.keys().map(String::as_str));
        writeln!(out, "{}  {}  [{}]", country.code, country.name, currencies)?;
    }
    Ok(out.trim_end().to_string())
}

pub fn render_detail(country: &Country, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(to_string_pretty(country)?);
    }

    let currencies: Vec<String> = country
        .currencies
        .iter()
        .map(|(code, currency)| match &currency.symbol {
            Some(symbol) => format!(
                "{} ({symbol})",
                currency.name.as_deref().unwrap_or(code.as_str())
            ),
            None => currency.name.clone().unwrap_or_else(|| code.clone()),
        })
        .collect();

    let mut out = String::new();
    writeln!(out, "{} ({})", country.name, country.code)?;
    if let Some(official) = &country.official_name {
        writeln!(out, "  Official name: {official}")?;
    }
    writeln!(
        out,
        "  Capital:       {}",
        country.capital.as_deref().unwrap_or("N/A")
    )?;
    writeln!(out, "  Population:    {}", country.population)?;
    writeln!(
        out,
        "  Currencies:    {}",
        joined_or_na(currencies.iter().map(String::as_str))
    )?;
    writeln!(
        out,
        "  Languages:     {}",
        joined_or_na(country.languages.values().map(String::as_str))
    )?;
    writeln!(
        out,
        "  Timezones:     {}",
        joined_or_na(country.timezones.iter().map(String::as_str))
    )?;
    writeln!(
        out,
        "  Blocks:        {}",
        joined_or_na(country.regional_blocks.iter().map(|b| b.acronym.as_str()))
    )?;
    write!(
        out,
        "  Borders:       {}",
        joined_or_na(country.borders.iter().map(String::as_str))
    )?;
    Ok(out)
}

pub fn render_route(outcome: &RouteOutcome, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(to_string_pretty(outcome)?);
    }

    let RouteOutcome::Found { steps } = outcome else {
        return Ok(NO_ROUTE_MESSAGE.to_string());
    };

    let hops = outcome.hop_count().unwrap_or_default();
    let mut out = String::new();
    writeln!(
        out,
        "Route ({hops} border crossing{}):",
        if hops == 1 { "" } else { "s" }
    )?;
    for country in steps {
        writeln!(out, "- {} ({})", country.name, country.code)?;
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use countries_lib::Currency;

    fn france() -> Country {
        let mut country = Country::new("FRA", "France", &["BEL", "DEU"]);
        country.capital = Some("Paris".to_string());
        country.population = 67_391_582;
        country.currencies.insert(
            "EUR".to_string(),
            Currency {
                name: Some("Euro".to_string()),
                symbol: Some("€".to_string()),
            },
        );
        country
    }

    #[test]
    fn search_lists_code_name_and_currency() {
        let text = render_search("fra", &[france()], OutputFormat::Text).unwrap();
        assert_eq!(text, "FRA  France  [EUR]");
    }

    #[test]
    fn empty_search_says_so() {
        let text = render_search("zz", &[], OutputFormat::Text).unwrap();
        assert_eq!(text, "No countries match 'zz'");
    }

    #[test]
    fn detail_text_has_na_for_missing_fields() {
        let text = render_detail(&france(), OutputFormat::Text).unwrap();
        assert!(text.starts_with("France (FRA)"));
        assert!(text.contains("Capital:       Paris"));
        assert!(text.contains("Currencies:    Euro (€)"));
        assert!(text.contains("Languages:     N/A"));
        assert!(text.contains("Borders:       BEL, DEU"));
    }

    #[test]
    fn detail_json_is_the_record() {
        let json = render_detail(&france(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["code"], "FRA");
        assert_eq!(value["capital"], "Paris");
    }

    #[test]
    fn route_text_lists_each_step() {
        let outcome = RouteOutcome::Found {
            steps: vec![france(), Country::new("DEU", "Germany", &[])],
        };
        let text = render_route(&outcome, OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "Route (1 border crossing):\n- France (FRA)\n- Germany (DEU)"
        );
    }

    #[test]
    fn no_route_message() {
        let text = render_route(&RouteOutcome::NoRoute, OutputFormat::Text).unwrap();
        assert_eq!(text, NO_ROUTE_MESSAGE);

        let json = render_route(&RouteOutcome::NoRoute, OutputFormat::Json).unwrap();
        assert!(json.contains("\"no_route\""));
    }
}
