use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const RESIDENTIAL_TYPES: &[&str] = &[
    "Apartment",
    "Independent House",
    "Villa",
    "Builder Floor",
    "Penthouse",
    "Studio Apartment",
    "Plot",
];

pub const COMMERCIAL_TYPES: &[&str] = &[
    "Office Space",
    "Shop",
    "Showroom",
    "Warehouse",
    "Industrial Shed",
    "Co-working Space",
    "Commercial Plot",
];

/// Amenity flag names as they appear on the property record
pub const AMENITIES: &[&str] = &[
    "parking",
    "lift",
    "powerBackup",
    "security",
    "gym",
    "swimmingPool",
    "clubHouse",
    "garden",
    "playArea",
    "gatedCommunity",
];

pub const AGE_RANGES: &[&str] = &["0-1 years", "1-5 years", "5-10 years", "10+ years"];

fn parse_choice<T: Copy>(raw: &str, choices: &[T], label: fn(&T) -> &'static str) -> Option<T> {
    let raw = raw.trim();
    choices.iter().copied().find(|choice| {
        let name = label(choice);
        name.eq_ignore_ascii_case(raw) || name.replace([' ', '-'], "").eq_ignore_ascii_case(&raw.replace([' ', '-', '_'], ""))
    })
}

/// Residential or commercial, `All` leaves the field out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    All,
    Residential,
    Commercial,
}

impl Category {
    pub const CHOICES: [Category; 3] = [Category::All, Category::Residential, Category::Commercial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Residential => "Residential",
            Category::Commercial => "Commercial",
        }
    }

    /// Preferences offered for this category. Commercial has no PG.
    pub fn preferences(&self) -> Vec<Preference> {
        Preference::CHOICES
            .into_iter()
            .filter(|p| !(*self == Category::Commercial && *p == Preference::Pg))
            .collect()
    }

    /// Property types offered for this category
    pub fn property_types(&self) -> Vec<&'static str> {
        match self {
            Category::All => RESIDENTIAL_TYPES.iter().chain(COMMERCIAL_TYPES).copied().collect(),
            Category::Residential => RESIDENTIAL_TYPES.to_vec(),
            Category::Commercial => COMMERCIAL_TYPES.to_vec(),
        }
    }
}

/// Transaction type of a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    #[default]
    All,
    Rent,
    Sale,
    Pg,
}

impl Preference {
    pub const CHOICES: [Preference; 4] = [Preference::All, Preference::Rent, Preference::Sale, Preference::Pg];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::All => "All",
            Preference::Rent => "Rent",
            Preference::Sale => "Sale",
            Preference::Pg => "PG",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Furnishing {
    #[default]
    All,
    Furnished,
    SemiFurnished,
    Unfurnished,
}

impl Furnishing {
    pub const CHOICES: [Furnishing; 4] = [
        Furnishing::All,
        Furnishing::Furnished,
        Furnishing::SemiFurnished,
        Furnishing::Unfurnished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Furnishing::All => "All",
            Furnishing::Furnished => "Furnished",
            Furnishing::SemiFurnished => "Semi-Furnished",
            Furnishing::Unfurnished => "Unfurnished",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    All,
    ReadyToMove,
    UnderConstruction,
}

impl Availability {
    pub const CHOICES: [Availability; 3] = [
        Availability::All,
        Availability::ReadyToMove,
        Availability::UnderConstruction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::All => "All",
            Availability::ReadyToMove => "Ready to Move",
            Availability::UnderConstruction => "Under Construction",
        }
    }
}

macro_rules! choice_traits {
    ($($ty:ident),*) => {$(
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_choice(s, &$ty::CHOICES, $ty::as_str).ok_or_else(|| {
                    let names: Vec<&str> = $ty::CHOICES.iter().map($ty::as_str).collect();
                    format!("unknown {} {:?}, expected one of: {}", stringify!($ty).to_lowercase(), s, names.join(", "))
                })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

choice_traits!(Category, Preference, Furnishing, Availability);

/// Parse a numeric bound typed by the user; anything unparseable is `None`
pub fn parse_bound(raw: &str) -> Option<u64> {
    raw.trim().replace(',', "").parse().ok()
}

/// Listing search filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub category: Category,
    pub property_types: Vec<String>,
    pub preference: Preference,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    pub furnishing: Furnishing,
    /// ISO code of the selected state, used only to look up its cities
    pub state_iso: String,
    pub state_name: String,
    pub city: String,
    pub amenities: Vec<String>,
    pub availability: Availability,
    /// Square feet
    pub area_min: Option<u64>,
    pub area_max: Option<u64>,
    pub age_ranges: Vec<String>,
}

impl Filters {
    /// Switch category and drop selections the new category does not offer
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        if !category.preferences().contains(&self.preference) {
            self.preference = Preference::All;
        }
        let allowed = category.property_types();
        self.property_types
            .retain(|t| allowed.iter().any(|a| a.eq_ignore_ascii_case(t)));
    }

    /// Change state; the city belongs to the old state so it is cleared
    pub fn set_state(&mut self, iso: impl Into<String>, name: impl Into<String>) {
        self.state_iso = iso.into();
        self.state_name = name.into();
        self.city.clear();
    }

    /// Swap range pairs whose bounds are inverted
    pub fn normalize_ranges(&mut self) {
        swap_inverted(&mut self.price_min, &mut self.price_max);
        swap_inverted(&mut self.area_min, &mut self.area_max);
    }

    pub fn normalized(&self) -> Filters {
        let mut copy = self.clone();
        copy.normalize_ranges();
        copy
    }

    pub fn is_default(&self) -> bool {
        *self == Filters::default()
    }
}

fn swap_inverted(min: &mut Option<u64>, max: &mut Option<u64>) {
    if let (Some(lo), Some(hi)) = (*min, *max) {
        if lo > hi {
            *min = Some(hi);
            *max = Some(lo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commercial_has_no_pg() {
        assert_eq!(
            Category::Commercial.preferences(),
            vec![Preference::All, Preference::Rent, Preference::Sale]
        );
        assert!(Category::Residential.preferences().contains(&Preference::Pg));
        assert!(!Category::Commercial.property_types().contains(&"Villa"));
        assert_eq!(
            Category::All.property_types().len(),
            RESIDENTIAL_TYPES.len() + COMMERCIAL_TYPES.len()
        );
    }

    #[test]
    fn test_set_category_prunes_selections() {
        // given: a residential PG search for villas and shops
        let mut filters = Filters {
            category: Category::Residential,
            preference: Preference::Pg,
            property_types: vec!["Villa".to_string(), "shop".to_string()],
            ..Default::default()
        };

        // when: switching to commercial
        filters.set_category(Category::Commercial);

        // then: PG and villa no longer apply
        assert_eq!(filters.preference, Preference::All);
        assert_eq!(filters.property_types, vec!["shop".to_string()]);
    }

    #[test]
    fn test_set_state_clears_city() {
        let mut filters = Filters {
            city: "Pune".to_string(),
            ..Default::default()
        };
        filters.set_state("KA", "Karnataka");
        assert_eq!(filters.state_iso, "KA");
        assert!(filters.city.is_empty());
    }

    #[test]
    fn test_normalize_swaps_only_inverted_pairs() {
        let mut filters = Filters {
            price_min: Some(5_000_000),
            price_max: Some(1_000_000),
            area_min: Some(500),
            area_max: None,
            ..Default::default()
        };
        filters.normalize_ranges();
        assert_eq!(filters.price_min, Some(1_000_000));
        assert_eq!(filters.price_max, Some(5_000_000));
        assert_eq!(filters.area_min, Some(500));
        assert_eq!(filters.area_max, None);
    }

    #[test]
    fn test_parse_bound_and_choices() {
        assert_eq!(parse_bound(" 25,00,000 "), Some(2_500_000));
        assert_eq!(parse_bound("abc"), None);
        assert_eq!(parse_bound(""), None);

        assert_eq!("commercial".parse::<Category>(), Ok(Category::Commercial));
        assert_eq!("pg".parse::<Preference>(), Ok(Preference::Pg));
        assert_eq!("semi_furnished".parse::<Furnishing>(), Ok(Furnishing::SemiFurnished));
        assert_eq!("ready-to-move".parse::<Availability>(), Ok(Availability::ReadyToMove));
        assert!("castle".parse::<Category>().is_err());
    }
}
