use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::client::HttpClient;
use super::endpoints::segment;
use crate::config::Config;
use crate::error::{ApiError, ConfigError};

const KEY_HEADER: &str = "x-cscapi-key";

/// State or province entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateEntry {
    pub id: i64,
    pub name: String,
    pub iso2: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CityEntry {
    pub id: i64,
    pub name: String,
}

/// Country/state/city lookup used by the location filter
#[derive(Debug, Clone)]
pub struct LocationClient {
    http: HttpClient,
}

impl LocationClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let key = config
            .csc_api_key
            .as_deref()
            .ok_or(ConfigError::Missing("PROPDESK_CSC_API_KEY"))?;
        let value = HeaderValue::from_str(key).map_err(|_| ConfigError::Missing("PROPDESK_CSC_API_KEY"))?;

        let mut headers = HeaderMap::new();
        headers.insert(KEY_HEADER, value);

        let http = HttpClient::with_headers(&config.csc_base_url, config.request_timeout, headers)
            .map_err(|_| ConfigError::Missing("PROPDESK_CSC_BASE_URL"))?;
        Ok(Self { http })
    }

    /// States of a country, sorted by name
    pub async fn states(&self, country_iso: &str) -> Result<Vec<StateEntry>, ApiError> {
        let mut states: Vec<StateEntry> = self
            .http
            .get_json(&format!("/countries/{}/states", segment(country_iso)), &[])
            .await?;
        states.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(states)
    }

    /// Cities of a state, sorted by name
    pub async fn cities(&self, country_iso: &str, state_iso: &str) -> Result<Vec<CityEntry>, ApiError> {
        let mut cities: Vec<CityEntry> = self
            .http
            .get_json(
                &format!(
                    "/countries/{}/states/{}/cities",
                    segment(country_iso),
                    segment(state_iso)
                ),
                &[],
            )
            .await?;
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(cities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_a_config_error() {
        let config = Config::default();
        assert_eq!(
            LocationClient::new(&config).err(),
            Some(ConfigError::Missing("PROPDESK_CSC_API_KEY"))
        );
    }
}
