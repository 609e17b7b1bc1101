use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::error::{DashboardError, Result};

/// A fixed monitoring location with a known geographic coordinate.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StationSite {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl StationSite {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Name-keyed lookup of station coordinates.
///
/// Built from configuration at startup; every site is validated before the
/// registry is usable, so a bad coordinate fails the load rather than a map
/// render later on. Looking up a station the registry does not know is an
/// explicit error, never a silent skip.
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    sites: BTreeMap<String, StationSite>,
}

impl StationRegistry {
    pub fn from_sites(sites: Vec<StationSite>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for site in sites {
            site.validate()?;
            if map.insert(site.name.clone(), site.clone()).is_some() {
                return Err(DashboardError::Config(format!(
                    "duplicate station entry: '{}'",
                    site.name
                )));
            }
        }
        Ok(Self { sites: map })
    }

    pub fn get(&self, station: &str) -> Result<&StationSite> {
        self.sites
            .get(station)
            .ok_or_else(|| DashboardError::StationNotFound {
                station: station.to_string(),
            })
    }

    pub fn contains(&self, station: &str) -> bool {
        self.sites.contains_key(station)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Sites in name order.
    pub fn iter(&self) -> impl Iterator<Item = &StationSite> {
        self.sites.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_validation() {
        let site = StationSite::new("Dongsi", 39.929, 116.417);
        assert!(site.validate().is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        let site = StationSite::new("Nowhere", 91.0, 116.417);
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_registry_rejects_invalid_site() {
        let sites = vec![
            StationSite::new("Dongsi", 39.929, 116.417),
            StationSite::new("Broken", 39.9, 200.0),
        ];
        assert!(StationRegistry::from_sites(sites).is_err());
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let sites = vec![
            StationSite::new("Dongsi", 39.929, 116.417),
            StationSite::new("Dongsi", 39.930, 116.418),
        ];
        assert!(StationRegistry::from_sites(sites).is_err());
    }

    #[test]
    fn test_unknown_station_is_an_error() {
        let registry =
            StationRegistry::from_sites(vec![StationSite::new("Dongsi", 39.929, 116.417)])
                .unwrap();

        assert!(registry.get("Dongsi").is_ok());
        let err = registry.get("Atlantis").unwrap_err();
        assert!(matches!(
            err,
            DashboardError::StationNotFound { station } if station == "Atlantis"
        ));
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let registry = StationRegistry::from_sites(vec![
            StationSite::new("Wanliu", 39.987, 116.287),
            StationSite::new("Changping", 40.217, 116.230),
        ])
        .unwrap();

        let names: Vec<&str> = registry.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Changping", "Wanliu"]);
    }
}
