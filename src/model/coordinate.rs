use std::fmt;

use super::open_notify_api_model::IssPosition;

/// A point on the globe in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Checks that latitude is within [-90, 90] and longitude within [-180, 180]
    pub fn validate(self) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!("latitude {} is outside [-90, 90]", self.latitude));
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "longitude {} is outside [-180, 180]",
                self.longitude
            ));
        }

        Ok(self)
    }
}

impl From<IssPosition> for Coordinate {
    fn from(value: IssPosition) -> Self {
        Coordinate::new(value.latitude, value.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat={:.2} lon={:.2}", self.latitude, self.longitude)
    }
}
