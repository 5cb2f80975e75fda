mod error;
mod matrix;
mod nearest;
mod provider;
mod sampler;
mod station;
mod time_grid;
mod types;
pub mod vector;
mod visibility;

#[cfg(test)]
pub(crate) mod testing;

pub use error::SolverError;
pub use matrix::Matrix;
pub use nearest::{find_nearest, masked_minimum};
pub use provider::{Geodesy, LookAngles, ObserverFrame, OrbitSource};
pub use sampler::{sample_orbits, PositionMatrix};
pub use station::{GroundStation, Wgs84};
pub use time_grid::{TimeGrid, MAX_SAMPLES};
pub use types::{
    AntennaPointing, GeoCoordinate, GeoPosition, NearestApproach, Solution, SolverConfig,
    TrackedObject, VisibleObject,
};
pub use vector::Vec3;
pub use visibility::{compute_visibility, DistanceMatrix, Visibility, VisibilityMask};

/// Which objects pass through the antenna cone, and optionally the closest pass.
pub fn solve<S, G>(
    objects: &[TrackedObject<S>],
    config: &SolverConfig,
    geodesy: &G,
) -> Result<Solution, SolverError>
where
    S: OrbitSource,
    G: Geodesy,
{
    config.antenna.validate()?;
    let grid = TimeGrid::build(config.start_time, config.end_time, config.time_step)?;

    let (lat, lon) = config.observer.decimal_degrees()?;
    let frame = geodesy.resolve_observer(lat, lon, config.observer.altitude_m)?;

    log::info!(
        "Checking {} objects over {} samples from ({:.4}, {:.4})",
        objects.len(),
        grid.len(),
        lat,
        lon
    );

    let positions = sample_orbits(objects, &grid)?;
    let visibility = compute_visibility(&grid, &positions, &frame, &config.antenna)?;

    let visible: Vec<VisibleObject> = visibility
        .visible_indices()
        .into_iter()
        .map(|index| VisibleObject {
            index,
            norad_id: objects[index].norad_id,
            name: objects[index].name.clone(),
        })
        .collect();
    log::info!("{} of {} objects entered the cone", visible.len(), objects.len());

    let nearest = if config.find_nearest {
        let nearest = find_nearest(
            objects,
            &grid,
            &visibility.distances,
            &visibility.mask,
            &frame,
        )?;
        match &nearest {
            Some(n) => log::debug!(
                "Nearest approach: NORAD {} at {} ({:.2} km)",
                n.norad_id,
                n.time,
                n.distance_km
            ),
            None if config.require_nearest => return Err(SolverError::EmptyResult),
            None => log::warn!("No in-cone sample, nearest approach not available"),
        }
        nearest
    } else {
        None
    };

    Ok(Solution { visible, nearest })
}
