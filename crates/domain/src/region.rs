//! Service region membership
//!
//! The planner only resolves and routes locations inside one metropolitan
//! area: a fixed set of localities plus the administrative region that
//! contains them. Membership is decided purely from the locality and region
//! fields a provider attaches to a place, so the check needs no network access.

use serde::{Deserialize, Serialize};

/// Anything carrying the locality/region labels a provider attached to a place
pub trait Place {
    /// Local administrative area (municipality), possibly empty
    fn local_admin_area(&self) -> &str;

    /// Containing administrative region, possibly empty
    fn region_name(&self) -> &str;
}

/// Outcome of a membership check, computed fresh for every place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMembership {
    /// Whether the place lies inside the service region
    pub inside: bool,
    /// The locality or region label that matched, lower-cased
    pub matched: Option<String>,
}

impl RegionMembership {
    const fn outside() -> Self {
        Self {
            inside: false,
            matched: None,
        }
    }

    fn inside(matched: String) -> Self {
        Self {
            inside: true,
            matched: Some(matched),
        }
    }
}

/// The fixed metropolitan area served by the planner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRegion {
    localities: Vec<String>,
    region_name: String,
}

impl ServiceRegion {
    /// Create a region from an allow-list of localities and the containing region name
    ///
    /// Labels are trimmed and lower-cased; empty labels are dropped so they
    /// can never match an empty provider field.
    pub fn new<I, S>(localities: I, region_name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            localities: localities
                .into_iter()
                .map(|l| normalize(l.as_ref()))
                .filter(|l| !l.is_empty())
                .collect(),
            region_name: normalize(&region_name.into()),
        }
    }

    /// The Helsinki capital area
    #[must_use]
    pub fn capital_area() -> Self {
        Self::new(["Helsinki", "Espoo", "Vantaa", "Kauniainen"], "Uusimaa")
    }

    /// Normalized locality allow-list
    #[must_use]
    pub fn localities(&self) -> &[String] {
        &self.localities
    }

    /// Normalized containing region name
    #[must_use]
    pub fn region_name(&self) -> &str {
        &self.region_name
    }

    /// Check membership and report which label matched
    ///
    /// Fails closed: a place with both fields empty is outside.
    pub fn membership<P: Place + ?Sized>(&self, place: &P) -> RegionMembership {
        let locality = normalize(place.local_admin_area());
        if !locality.is_empty() && self.localities.iter().any(|l| *l == locality) {
            return RegionMembership::inside(locality);
        }

        let region = normalize(place.region_name());
        if !region.is_empty() && region == self.region_name {
            return RegionMembership::inside(region);
        }

        RegionMembership::outside()
    }

    /// Whether the place lies inside the service region
    pub fn contains<P: Place + ?Sized>(&self, place: &P) -> bool {
        self.membership(place).inside
    }

    /// Keep only the places inside the region, preserving their order
    pub fn retain_members<P: Place>(&self, places: Vec<P>) -> Vec<P> {
        places.into_iter().filter(|p| self.contains(p)).collect()
    }
}

impl Default for ServiceRegion {
    fn default() -> Self {
        Self::capital_area()
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}
