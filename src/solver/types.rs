use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::solver::error::SolverError;

/// An angle written as degrees, minutes and seconds.
///
/// `negative` carries the sign for the whole value so that southern and
/// western positions below one degree (`-0g30m0s`) keep their sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub negative: bool,
    pub deg: u32,
    pub min: u32,
    pub sec: f64,
}

impl GeoCoordinate {
    pub fn new(deg: u32, min: u32, sec: f64) -> Self {
        Self {
            negative: false,
            deg,
            min,
            sec,
        }
    }

    pub fn negated(self) -> Self {
        Self {
            negative: !self.negative,
            ..self
        }
    }

    pub fn to_degrees(&self) -> f64 {
        let value = self.deg as f64 + self.min as f64 / 60.0 + self.sec / 3600.0;
        if self.negative {
            -value
        } else {
            value
        }
    }

    fn validate(&self, axis: &str) -> Result<(), SolverError> {
        if self.min >= 60 {
            return Err(SolverError::InvalidCoordinate(format!(
                "{} minutes must be below 60, got {}",
                axis, self.min
            )));
        }
        if !self.sec.is_finite() || !(0.0..60.0).contains(&self.sec) {
            return Err(SolverError::InvalidCoordinate(format!(
                "{} seconds must be within [0, 60), got {}",
                axis, self.sec
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub latitude: GeoCoordinate,
    pub longitude: GeoCoordinate,
    pub altitude_m: f64,
}

impl GeoPosition {
    /// Validated decimal (latitude, longitude) in degrees.
    pub fn decimal_degrees(&self) -> Result<(f64, f64), SolverError> {
        self.latitude.validate("latitude")?;
        self.longitude.validate("longitude")?;

        let lat = self.latitude.to_degrees();
        let lon = self.longitude.to_degrees();
        if !(-90.0..=90.0).contains(&lat) {
            return Err(SolverError::InvalidCoordinate(format!(
                "latitude {} is outside [-90, 90]",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(SolverError::InvalidCoordinate(format!(
                "longitude {} is outside [-180, 180]",
                lon
            )));
        }
        if !self.altitude_m.is_finite() {
            return Err(SolverError::InvalidCoordinate(format!(
                "altitude {} is not a finite number",
                self.altitude_m
            )));
        }
        Ok((lat, lon))
    }
}

/// Antenna cone: boresight direction plus the full opening angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntennaPointing {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub aspect_angle_deg: f64,
}

impl AntennaPointing {
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.azimuth_deg.is_finite() || !self.elevation_deg.is_finite() {
            return Err(SolverError::InvalidPointing(format!(
                "azimuth {} / elevation {} must be finite",
                self.azimuth_deg, self.elevation_deg
            )));
        }
        if !self.aspect_angle_deg.is_finite() || !(0.0..=360.0).contains(&self.aspect_angle_deg) {
            return Err(SolverError::InvalidPointing(format!(
                "aspect angle must be within [0, 360], got {}",
                self.aspect_angle_deg
            )));
        }
        Ok(())
    }

    /// Cosine of the half-angle. A sample is in the cone when the cosine of its
    /// separation from boresight is at least this value.
    pub fn cos_limit(&self) -> f64 {
        (self.aspect_angle_deg / 2.0).to_radians().cos()
    }
}

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub observer: GeoPosition,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub antenna: AntennaPointing,
    /// Sampling step in seconds.
    pub time_step: f64,
    pub find_nearest: bool,
    /// Turn an empty nearest-approach search into an error.
    pub require_nearest: bool,
}

/// A catalogued object together with whatever yields its positions.
#[derive(Debug, Clone)]
pub struct TrackedObject<S> {
    pub norad_id: u64,
    pub name: String,
    pub source: S,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleObject {
    pub index: usize,
    pub norad_id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestApproach {
    pub object_index: usize,
    pub time_index: usize,
    pub norad_id: u64,
    pub name: String,
    pub time: DateTime<Utc>,
    pub distance_km: f64,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub visible: Vec<VisibleObject>,
    pub nearest: Option<NearestApproach>,
}
