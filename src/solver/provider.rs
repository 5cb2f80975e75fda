//! Capabilities the solver borrows from the ephemeris/geodesy side.
//!
//! All position vectors share one Cartesian frame (kilometres). With the SGP4
//! backed implementations that frame is TEME.

use chrono::{DateTime, Utc};

use crate::solver::error::SolverError;
use crate::solver::vector::Vec3;

/// Something that can tell where an orbiting object is.
pub trait OrbitSource {
    /// Positions for every instant, in the same order.
    fn positions_km(&self, instants: &[DateTime<Utc>]) -> Result<Vec<Vec3>, SolverError>;
}

/// Local horizon angles of a target as seen by the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAngles {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
}

/// A fixed ground point bound to a geodetic model.
pub trait ObserverFrame {
    fn position_km(&self, at: DateTime<Utc>) -> Vec3;

    /// Direction of (azimuth, elevation) in the local horizon frame.
    fn direction(&self, azimuth_deg: f64, elevation_deg: f64, at: DateTime<Utc>) -> Vec3;

    fn look_angles(&self, target_km: &Vec3, at: DateTime<Utc>) -> LookAngles;
}

pub trait Geodesy {
    type Frame: ObserverFrame;

    fn resolve_observer(
        &self,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
    ) -> Result<Self::Frame, SolverError>;
}
