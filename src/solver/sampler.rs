use crate::solver::error::SolverError;
use crate::solver::matrix::{cell_count, Matrix};
use crate::solver::provider::OrbitSource;
use crate::solver::time_grid::TimeGrid;
use crate::solver::types::TrackedObject;
use crate::solver::vector::Vec3;

/// Object-major, time-minor positions in km.
pub type PositionMatrix = Matrix<Vec3>;

/// Propagate every object across the whole grid.
///
/// A single failing object aborts the batch.
pub fn sample_orbits<S: OrbitSource>(
    objects: &[TrackedObject<S>],
    grid: &TimeGrid,
) -> Result<PositionMatrix, SolverError> {
    let n_time = grid.len();
    let mut data = Vec::with_capacity(cell_count(objects.len(), n_time)?);

    for object in objects {
        let positions = object.source.positions_km(grid.instants()).map_err(|e| {
            SolverError::Propagation(format!("NORAD {} ({}): {}", object.norad_id, object.name, e))
        })?;
        if positions.len() != n_time {
            return Err(SolverError::Propagation(format!(
                "NORAD {} ({}): expected {} positions, got {}",
                object.norad_id,
                object.name,
                n_time,
                positions.len()
            )));
        }
        data.extend(positions);
    }

    log::debug!(
        "Sampled {} objects over {} instants",
        objects.len(),
        n_time
    );

    Matrix::from_vec(objects.len(), n_time, data)
}
