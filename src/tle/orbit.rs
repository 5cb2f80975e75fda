use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::solver::{OrbitSource, SolverError, Vec3};

/// SGP4/SDP4 propagator for one element set. Positions come out in TEME, km.
pub struct Sgp4Orbit {
    elements: Elements,
    constants: Constants,
}

impl Sgp4Orbit {
    pub fn new(elements: Elements) -> Result<Self, SolverError> {
        let constants = Constants::from_elements(&elements)
            .map_err(|e| SolverError::Propagation(e.to_string()))?;
        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn position_km(&self, at: DateTime<Utc>) -> Result<Vec3, SolverError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| SolverError::Propagation(e.to_string()))?;
        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| SolverError::Propagation(format!("{} at {}", e, at)))?;
        Ok(prediction.position)
    }
}

impl std::fmt::Debug for Sgp4Orbit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sgp4Orbit")
            .field("norad_id", &self.elements.norad_id)
            .field("epoch", &self.elements.datetime)
            .finish()
    }
}

impl OrbitSource for Sgp4Orbit {
    fn positions_km(&self, instants: &[DateTime<Utc>]) -> Result<Vec<Vec3>, SolverError> {
        instants.iter().map(|&t| self.position_km(t)).collect()
    }
}
