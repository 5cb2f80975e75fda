//! Synthetic orbit sources and a flat observer frame for exact geometry in tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::solver::error::SolverError;
use crate::solver::provider::{Geodesy, LookAngles, ObserverFrame, OrbitSource};
use crate::solver::time_grid::TimeGrid;
use crate::solver::types::TrackedObject;
use crate::solver::vector::{norm, Vec3};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// `points` samples, one second apart, starting at `epoch()`.
pub fn grid(points: i64) -> TimeGrid {
    TimeGrid::build(epoch(), epoch() + Duration::seconds(points - 1), 1.0).unwrap()
}

pub fn object<S>(norad_id: u64, name: &str, source: S) -> TrackedObject<S> {
    TrackedObject {
        norad_id,
        name: name.to_string(),
        source,
    }
}

/// One position per whole second after `epoch()`.
#[derive(Debug, Clone)]
pub struct FixedTrack {
    positions: Option<Vec<Vec3>>,
}

impl FixedTrack {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions: Some(positions),
        }
    }

    pub fn failing() -> Self {
        Self { positions: None }
    }
}

impl OrbitSource for FixedTrack {
    fn positions_km(&self, instants: &[DateTime<Utc>]) -> Result<Vec<Vec3>, SolverError> {
        let positions = self
            .positions
            .as_ref()
            .ok_or_else(|| SolverError::Propagation("decayed".into()))?;
        instants
            .iter()
            .map(|t| {
                let index = (*t - epoch()).num_seconds();
                usize::try_from(index)
                    .ok()
                    .and_then(|i| positions.get(i).copied())
                    .ok_or_else(|| SolverError::Propagation(format!("no sample at {}", t)))
            })
            .collect()
    }
}

/// Unit direction for (azimuth, elevation) with x = east, y = north, z = up.
pub fn flat_direction(azimuth_deg: f64, elevation_deg: f64) -> Vec3 {
    let az = azimuth_deg.to_radians();
    let el = elevation_deg.to_radians();
    [az.sin() * el.cos(), az.cos() * el.cos(), el.sin()]
}

/// `range` km from the origin along (azimuth, elevation).
pub fn at_range(azimuth_deg: f64, elevation_deg: f64, range: f64) -> Vec3 {
    let d = flat_direction(azimuth_deg, elevation_deg);
    [d[0] * range, d[1] * range, d[2] * range]
}

/// Observer at the origin of a non-rotating east/north/up frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatEarth;

#[derive(Debug, Clone, Copy)]
pub struct FlatFrame;

impl Geodesy for FlatEarth {
    type Frame = FlatFrame;

    fn resolve_observer(&self, _: f64, _: f64, _: f64) -> Result<FlatFrame, SolverError> {
        Ok(FlatFrame)
    }
}

impl ObserverFrame for FlatFrame {
    fn position_km(&self, _: DateTime<Utc>) -> Vec3 {
        [0.0, 0.0, 0.0]
    }

    fn direction(&self, azimuth_deg: f64, elevation_deg: f64, _: DateTime<Utc>) -> Vec3 {
        flat_direction(azimuth_deg, elevation_deg)
    }

    fn look_angles(&self, target_km: &Vec3, _: DateTime<Utc>) -> LookAngles {
        let range_km = norm(target_km);
        LookAngles {
            elevation_deg: (target_km[2] / range_km).asin().to_degrees(),
            azimuth_deg: target_km[0].atan2(target_km[1]).to_degrees().rem_euclid(360.0),
            range_km,
        }
    }
}
