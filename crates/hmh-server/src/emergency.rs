//! Emergency-number lookup by location
//!
//! Coordinates are reverse-geocoded to an ISO country code, which is mapped
//! through a small static table. Any failure yields the fixed fallback.

use crate::config::GeocodeConfig;
use hmh_domain::traits::{FetchRequest, PageFetcher};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Emergency numbers by upper-case ISO 3166-1 alpha-2 code
pub const EMERGENCY_BY_COUNTRY: &[(&str, &str)] = &[
    ("US", "911"),
    ("CA", "911"),
    ("MX", "911"),
    ("GB", "999 or 112"),
    ("IE", "999 or 112"),
    ("AU", "000 or 112"),
    ("NZ", "111"),
    ("IN", "112"),
    ("ZA", "10111 or 112"),
    ("FR", "112"),
    ("DE", "112"),
    ("ES", "112"),
    ("IT", "112"),
    ("NL", "112"),
    ("SE", "112"),
    ("NO", "112"),
    ("DK", "112"),
    ("FI", "112"),
    ("BR", "190 (Police) / 192 (Ambulance) / 193 (Fire)"),
    ("JP", "110 (Police) / 119 (Ambulance/Fire)"),
    ("KR", "112 (Police) / 119 (Ambulance/Fire)"),
];

const FALLBACK_NUMBER: &str = "911 (US) or 112 (international)";
const FALLBACK_NOTE: &str =
    "Could not confidently determine location — showing common emergency numbers.";
const KNOWN_NOTE: &str = "If you are in immediate danger, call your local emergency number now.";

/// Body of `GET /api/emergency`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyInfo {
    /// Upper-case country code, when the location resolved
    pub country_code: Option<String>,
    /// Country name, when the location resolved
    pub country: Option<String>,
    /// Number(s) to call
    pub number: String,
    /// Short advice shown with the number
    pub note: String,
}

/// Where a pair of coordinates resolved to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCountry {
    /// Upper-case ISO code
    pub code: Option<String>,
    /// Display name
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: ReverseAddress,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseAddress {
    country_code: Option<String>,
    country: Option<String>,
}

/// Emergency number for a resolved location, or the fallback
pub fn lookup_number(resolved: ResolvedCountry) -> EmergencyInfo {
    let number = resolved.code.as_deref().and_then(|code| {
        EMERGENCY_BY_COUNTRY
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, n)| *n)
    });

    match number {
        Some(number) => EmergencyInfo {
            country_code: resolved.code,
            country: resolved.name,
            number: number.to_string(),
            note: KNOWN_NOTE.to_string(),
        },
        None => EmergencyInfo {
            country_code: resolved.code,
            country: resolved.name,
            number: FALLBACK_NUMBER.to_string(),
            note: FALLBACK_NOTE.to_string(),
        },
    }
}

/// Country for a reverse-geocoding response body
pub fn parse_reverse(json: &str) -> Result<ResolvedCountry, serde_json::Error> {
    let response: ReverseResponse = serde_json::from_str(json)?;
    let code = response
        .address
        .country_code
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty());
    let name = response.address.country.filter(|c| !c.is_empty());
    Ok(ResolvedCountry { code, name })
}

/// Reverse-geocoding request for a pair of coordinates
pub fn reverse_request(config: &GeocodeConfig, lat: f64, lon: f64) -> FetchRequest {
    FetchRequest::get(&config.reverse_url, config.timeout())
        .param("format", "jsonv2")
        .param("lat", lat.to_string())
        .param("lon", lon.to_string())
        .param("zoom", "3")
        .param("addressdetails", "1")
        .header("User-Agent", &config.user_agent)
}

/// Resolve coordinates to a country; empty on any failure
pub async fn resolve_country<F: PageFetcher>(
    fetcher: &F,
    config: &GeocodeConfig,
    lat: f64,
    lon: f64,
) -> ResolvedCountry {
    let body = match fetcher.fetch(reverse_request(config, lat, lon)).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Reverse geocoding failed: {}", e);
            return ResolvedCountry::default();
        }
    };
    match parse_reverse(&body) {
        Ok(resolved) => {
            debug!(code = ?resolved.code, "Location resolved");
            resolved
        }
        Err(e) => {
            warn!("Reverse geocoding response unreadable: {}", e);
            ResolvedCountry::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(code: &str, name: &str) -> ResolvedCountry {
        ResolvedCountry {
            code: Some(code.to_string()),
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_table_has_unique_upper_case_codes() {
        assert_eq!(EMERGENCY_BY_COUNTRY.len(), 21);
        let mut codes: Vec<_> = EMERGENCY_BY_COUNTRY.iter().map(|(c, _)| *c).collect();
        assert!(codes.iter().all(|c| c.len() == 2 && c.chars().all(|ch| ch.is_ascii_uppercase())));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 21);
    }

    #[test]
    fn test_known_country() {
        let info = lookup_number(resolved("GB", "United Kingdom"));
        assert_eq!(info.number, "999 or 112");
        assert_eq!(info.country.as_deref(), Some("United Kingdom"));
        assert_eq!(info.note, KNOWN_NOTE);
    }

    #[test]
    fn test_unknown_country_and_failure_fall_back() {
        let info = lookup_number(resolved("AQ", "Antarctica"));
        assert_eq!(info.number, FALLBACK_NUMBER);
        assert_eq!(info.country_code.as_deref(), Some("AQ"));
        assert_eq!(info.note, FALLBACK_NOTE);

        let info = lookup_number(ResolvedCountry::default());
        assert_eq!(info.number, FALLBACK_NUMBER);
        assert!(info.country_code.is_none());
    }

    #[test]
    fn test_parse_reverse() {
        let body = r#"{"place_id":1,"address":{"country":"Japan","country_code":"jp"}}"#;
        assert_eq!(parse_reverse(body).unwrap(), resolved("JP", "Japan"));
        assert_eq!(
            parse_reverse(r#"{"error":"Unable to geocode"}"#).unwrap(),
            ResolvedCountry::default()
        );
        assert!(parse_reverse("<html>").is_err());
    }

    #[test]
    fn test_reverse_request() {
        let req = reverse_request(&GeocodeConfig::default(), 51.5, -0.12);
        assert_eq!(req.url, "https://nominatim.openstreetmap.org/reverse");
        assert_eq!(req.param_value("format"), Some("jsonv2"));
        assert_eq!(req.param_value("lat"), Some("51.5"));
        assert_eq!(req.param_value("lon"), Some("-0.12"));
        assert_eq!(req.param_value("zoom"), Some("3"));
        assert_eq!(req.param_value("addressdetails"), Some("1"));
    }
}
