// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::str::FromStr;

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Formats as `lat,lon`, the form the points endpoint takes.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Built-in locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// New York, NY.
    NewYork,
    /// St. Louis, MO.
    StLouis,
    /// Lee's Summit, MO.
    LeesSummit,
}

impl Location {
    /// Every preset, in display order.
    pub const ALL: [Self; 3] = [Self::NewYork, Self::StLouis, Self::LeesSummit];

    /// The preset's coordinates.
    pub const fn coordinates(self) -> Coordinates {
        match self {
            Self::NewYork => Coordinates::new(40.71303, -74.0064),
            Self::StLouis => Coordinates::new(38.62708133446166, -90.19934537440395),
            Self::LeesSummit => Coordinates::new(38.91099, -94.38277),
        }
    }

    /// The command-line name of the preset.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewYork => "new-york",
            Self::StLouis => "st-louis",
            Self::LeesSummit => "lees-summit",
        }
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|l| l.name()).collect();
                format!("unknown location `{s}` (expected one of: {})", names.join(", "))
            })
    }
}

impl From<Location> for Coordinates {
    fn from(location: Location) -> Self {
        location.coordinates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_format_like_the_points_path() {
        assert_eq!(Location::NewYork.coordinates().to_string(), "40.71303,-74.0064");
        assert_eq!(
            Location::StLouis.coordinates().to_string(),
            "38.62708133446166,-90.19934537440395"
        );
        assert_eq!(Location::LeesSummit.coordinates().to_string(), "38.91099,-94.38277");
    }

    #[test]
    fn names_round_trip() {
        for l in Location::ALL {
            assert_eq!(l.name().parse::<Location>(), Ok(l));
        }
        assert!("atlantis".parse::<Location>().is_err());
    }
}
