//! Filter-to-query mapping and the local equivalent for unfiltered endpoints.

use reqwest::Url;

use super::types::{Availability, Category, Filters, Furnishing, Preference};
use crate::models::PropertyResponse;

/// Ordered query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    pub fn with_pagination(mut self, page: usize, size: usize) -> Self {
        self.push("page", page.to_string());
        self.push("size", size.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.pairs.iter().map(|(k, _)| *k).collect()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-encoded `a=1&b=2`
    pub fn to_query_string(&self) -> String {
        let Ok(mut url) = Url::parse("http://localhost/") else {
            return String::new();
        };
        url.query_pairs_mut()
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())));
        url.query().unwrap_or_default().to_string()
    }
}

fn push_text(params: &mut QueryParams, key: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        params.push(key, value);
    }
}

fn push_list(params: &mut QueryParams, key: &'static str, values: &[String]) {
    let values: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if !values.is_empty() {
        params.push(key, values.join(","));
    }
}

fn push_number(params: &mut QueryParams, key: &'static str, value: Option<u64>) {
    if let Some(n) = value {
        params.push(key, n.to_string());
    }
}

impl Filters {
    /// Query parameters for the listing search endpoints
    ///
    /// Defaults are omitted, inverted ranges are swapped and lists are
    /// comma-joined.
    pub fn to_query(&self) -> QueryParams {
        let f = self.normalized();
        let mut params = QueryParams::new();

        if f.category != Category::All {
            params.push("category", f.category.as_str());
        }
        push_list(&mut params, "propertyTypes", &f.property_types);
        if f.preference != Preference::All {
            params.push("preference", f.preference.as_str());
        }
        push_number(&mut params, "priceMin", f.price_min);
        push_number(&mut params, "priceMax", f.price_max);
        if f.furnishing != Furnishing::All {
            params.push("furnishing", f.furnishing.as_str());
        }
        push_text(&mut params, "state", &f.state_name);
        push_text(&mut params, "city", &f.city);
        push_list(&mut params, "amenities", &f.amenities);
        if f.availability != Availability::All {
            params.push("availability", f.availability.as_str());
        }
        push_number(&mut params, "areaMin", f.area_min);
        push_number(&mut params, "areaMax", f.area_max);
        push_list(&mut params, "ageRanges", &f.age_ranges);

        params
    }

    /// Whether a listing satisfies these filters
    ///
    /// Used for endpoints that return everything unfiltered. A filter set on
    /// a field the listing lacks does not match.
    pub fn matches(&self, property: &PropertyResponse) -> bool {
        let f = self.normalized();

        let same = |wanted: &str, actual: &Option<String>| {
            actual
                .as_deref()
                .is_some_and(|a| a.trim().eq_ignore_ascii_case(wanted.trim()))
        };
        let one_of = |wanted: &[String], actual: &Option<String>| {
            wanted.is_empty() || wanted.iter().any(|w| same(w.as_str(), actual))
        };
        let within = |min: Option<u64>, max: Option<u64>, actual: Option<f64>| {
            if min.is_none() && max.is_none() {
                return true;
            }
            let Some(value) = actual else {
                return false;
            };
            min.map_or(true, |lo| value >= lo as f64) && max.map_or(true, |hi| value <= hi as f64)
        };

        (f.category == Category::All || same(f.category.as_str(), &property.category))
            && one_of(f.property_types.as_slice(), &property.property_type)
            && (f.preference == Preference::All || same(f.preference.as_str(), &property.preference))
            && within(f.price_min, f.price_max, property.price)
            && (f.furnishing == Furnishing::All || same(f.furnishing.as_str(), &property.furnishing))
            && (f.state_name.trim().is_empty() || same(f.state_name.as_str(), &property.state))
            && (f.city.trim().is_empty() || same(f.city.as_str(), &property.city))
            && f.amenities.iter().all(|a| property.has_amenity(a.trim()))
            && (f.availability == Availability::All
                || same(f.availability.as_str(), &property.availability))
            && within(f.area_min, f.area_max, property.area)
            && one_of(f.age_ranges.as_slice(), &property.age)
    }
}
