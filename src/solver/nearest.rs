use crate::solver::error::SolverError;
use crate::solver::provider::{ObserverFrame, OrbitSource};
use crate::solver::time_grid::TimeGrid;
use crate::solver::types::{NearestApproach, TrackedObject};
use crate::solver::visibility::{DistanceMatrix, VisibilityMask};

/// Smallest in-cone distance as (object, time, km).
///
/// Out-of-cone cells count as infinitely far, as do cells the mask does not
/// cover. Ties keep the first cell in object-major, time-minor order.
pub fn masked_minimum(
    distances: &DistanceMatrix,
    mask: &VisibilityMask,
) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (i, j, &distance) in distances.cells() {
        let masked = match mask.try_get(i, j) {
            Some(&true) => distance,
            _ => f64::INFINITY,
        };
        if !masked.is_finite() {
            continue;
        }
        match best {
            Some((_, _, current)) if masked >= current => {}
            _ => best = Some((i, j, masked)),
        }
    }
    best
}

/// Closest in-cone approach, with look angles recomputed at that instant.
pub fn find_nearest<S: OrbitSource, F: ObserverFrame>(
    objects: &[TrackedObject<S>],
    grid: &TimeGrid,
    distances: &DistanceMatrix,
    mask: &VisibilityMask,
    frame: &F,
) -> Result<Option<NearestApproach>, SolverError> {
    let shape = (distances.n_objects(), distances.n_time());
    if (mask.n_objects(), mask.n_time()) != shape || (objects.len(), grid.len()) != shape {
        return Err(SolverError::InvalidRange(format!(
            "distances are {} x {}, mask {} x {}, catalog and grid {} x {}",
            shape.0,
            shape.1,
            mask.n_objects(),
            mask.n_time(),
            objects.len(),
            grid.len()
        )));
    }

    let Some((object_index, time_index, distance_km)) = masked_minimum(distances, mask) else {
        return Ok(None);
    };

    let (Some(object), Some(time)) = (objects.get(object_index), grid.get(time_index)) else {
        return Err(SolverError::InvalidRange(format!(
            "cell ({}, {}) outside the catalog or grid",
            object_index, time_index
        )));
    };

    let position = object
        .source
        .positions_km(&[time])?
        .into_iter()
        .next()
        .ok_or_else(|| {
            SolverError::Propagation(format!("NORAD {}: no position at {}", object.norad_id, time))
        })?;
    let look = frame.look_angles(&position, time);

    Ok(Some(NearestApproach {
        object_index,
        time_index,
        norad_id: object.norad_id,
        name: object.name.clone(),
        time,
        distance_km,
        elevation_deg: look.elevation_deg,
        azimuth_deg: look.azimuth_deg,
    }))
}
