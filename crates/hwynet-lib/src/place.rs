use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// A vertex of the highway graph: a city/region pair with geographic
/// coordinates.
///
/// Identity is the case-insensitive `(city, region)` pair. Coordinates are
/// descriptive only and never participate in equality checks used for
/// graph keying; see [`crate::graph::Graph`] for the interning rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub city: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn new(
        city: impl Into<String>,
        region: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            city: city.into(),
            region: region.into(),
            latitude,
            longitude,
        }
    }

    /// `City,Region` form accepted by the CLI and the geocoding seam.
    pub fn name(&self) -> String {
        format!("{},{}", self.city, self.region)
    }

    /// Whether the coordinates have been set. The zero value for both
    /// fields denotes "unset" (a place awaiting geocoding).
    pub fn has_location(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }

    /// Normalized identity key for interning and lookups.
    pub(crate) fn key(&self) -> PlaceKey {
        PlaceKey::new(&self.city, &self.region)
    }

    /// Lexicographic, case-sensitive ordering by city then region.
    pub fn by_city_then_region(a: &Place, b: &Place) -> Ordering {
        a.city.cmp(&b.city).then_with(|| a.region.cmp(&b.region))
    }

    /// Lexicographic, case-sensitive ordering by region then city.
    pub fn by_region_then_city(a: &Place, b: &Place) -> Ordering {
        a.region.cmp(&b.region).then_with(|| a.city.cmp(&b.city))
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.region)
    }
}

/// Case-normalized `(city, region)` pair. Lower-casing happens once, at
/// construction, so map lookups stay allocation-free afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PlaceKey {
    city: String,
    region: String,
}

impl PlaceKey {
    pub(crate) fn new(city: &str, region: &str) -> Self {
        Self {
            city: city.to_lowercase(),
            region: region.to_lowercase(),
        }
    }
}
