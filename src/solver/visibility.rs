use crate::solver::error::SolverError;
use crate::solver::matrix::{cell_count, Matrix};
use crate::solver::provider::ObserverFrame;
use crate::solver::sampler::PositionMatrix;
use crate::solver::time_grid::TimeGrid;
use crate::solver::types::AntennaPointing;
use crate::solver::vector::{dot, norm, normalize, sub, Vec3};

pub type VisibilityMask = Matrix<bool>;
pub type DistanceMatrix = Matrix<f64>;

/// Per-sample cone test results for one observation window.
#[derive(Debug, Clone, PartialEq)]
pub struct Visibility {
    pub mask: VisibilityMask,
    /// Observer to object range, km.
    pub distances: DistanceMatrix,
}

impl Visibility {
    /// True when the object was in the cone at any sampled instant.
    pub fn is_visible(&self, object: usize) -> bool {
        self.mask.row(object).iter().any(|&inside| inside)
    }

    /// Indices of visible objects, in input order.
    pub fn visible_indices(&self) -> Vec<usize> {
        (0..self.mask.n_objects())
            .filter(|&i| self.is_visible(i))
            .collect()
    }
}

pub fn compute_visibility<F: ObserverFrame>(
    grid: &TimeGrid,
    positions: &PositionMatrix,
    frame: &F,
    antenna: &AntennaPointing,
) -> Result<Visibility, SolverError> {
    antenna.validate()?;

    let n_time = grid.len();
    let n_objects = positions.n_objects();
    if positions.n_time() != n_time {
        return Err(SolverError::InvalidRange(format!(
            "position matrix covers {} instants but the grid has {}",
            positions.n_time(),
            n_time
        )));
    }

    let observer: Vec<Vec3> = grid
        .instants()
        .iter()
        .map(|&t| frame.position_km(t))
        .collect();
    let boresight: Vec<Vec3> = grid
        .instants()
        .iter()
        .map(|&t| normalize(&frame.direction(antenna.azimuth_deg, antenna.elevation_deg, t)))
        .collect();
    let cos_limit = antenna.cos_limit();

    let cells = cell_count(n_objects, n_time)?;
    let mut mask = Vec::with_capacity(cells);
    let mut distances = Vec::with_capacity(cells);

    for row in positions.rows() {
        for (j, position) in row.iter().enumerate() {
            let los = sub(position, &observer[j]);
            let cos = dot(&normalize(&los), &boresight[j]);
            mask.push(cos >= cos_limit);
            distances.push(norm(&los));
        }
    }

    Ok(Visibility {
        mask: Matrix::from_vec(n_objects, n_time, mask)?,
        distances: Matrix::from_vec(n_objects, n_time, distances)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::sampler::sample_orbits;
    use crate::solver::testing::{at_range, flat_direction, grid, object, FixedTrack, FlatFrame};

    fn antenna(aspect: f64) -> AntennaPointing {
        AntennaPointing {
            azimuth_deg: 90.0,
            elevation_deg: 30.0,
            aspect_angle_deg: aspect,
        }
    }

    fn run(tracks: Vec<Vec<Vec3>>, aspect: f64) -> Visibility {
        let n = tracks[0].len() as i64;
        let objects: Vec<_> = tracks
            .into_iter()
            .enumerate()
            .map(|(i, t)| object(i as u64 + 1, "SAT", FixedTrack::new(t)))
            .collect();
        let grid = grid(n);
        let positions = sample_orbits(&objects, &grid).unwrap();
        compute_visibility(&grid, &positions, &FlatFrame, &antenna(aspect)).unwrap()
    }

    #[test]
    fn mask_shape_matches_objects_and_grid() {
        let vis = run(
            vec![
                vec![at_range(90.0, 30.0, 500.0); 4],
                vec![at_range(0.0, 30.0, 500.0); 4],
                vec![at_range(270.0, 10.0, 900.0); 4],
            ],
            10.0,
        );
        assert_eq!(vis.mask.n_objects(), 3);
        assert_eq!(vis.mask.n_time(), 4);
        assert!(vis.mask.rows().all(|r| r.len() == 4));
        assert_eq!(vis.distances.n_time(), 4);
    }

    #[test]
    fn object_on_boresight_is_visible() {
        let vis = run(vec![vec![at_range(90.0, 30.0, 1200.0)]], 10.0);
        assert!(*vis.mask.get(0, 0));
        assert!((vis.distances.get(0, 0) - 1200.0).abs() < 1e-9);
        assert_eq!(vis.visible_indices(), vec![0]);
    }

    #[test]
    fn object_at_right_angle_is_not_visible() {
        let vis = run(vec![vec![at_range(0.0, 30.0, 1200.0)]], 10.0);
        assert!(!*vis.mask.get(0, 0));
        assert!(vis.visible_indices().is_empty());
    }

    #[test]
    fn cone_boundary_is_inclusive() {
        // A 180 degree cone around due east puts due north exactly on the edge.
        let edge = AntennaPointing {
            azimuth_deg: 90.0,
            elevation_deg: 0.0,
            aspect_angle_deg: 180.0,
        };
        let grid = grid(1);
        let objects = vec![
            object(1, "EDGE", FixedTrack::new(vec![[0.0, 1.0, 0.0]])),
            object(2, "OUTSIDE", FixedTrack::new(vec![[-1e-3, 1.0, 0.0]])),
        ];
        let positions = sample_orbits(&objects, &grid).unwrap();
        let vis = compute_visibility(&grid, &positions, &FlatFrame, &edge).unwrap();
        let boresight = normalize(&flat_direction(90.0, 0.0));
        assert_eq!(dot(&[0.0, 1.0, 0.0], &boresight), edge.cos_limit());
        assert!(*vis.mask.get(0, 0));
        assert!(!*vis.mask.get(1, 0));
    }

    #[test]
    fn visible_at_any_single_sample_counts() {
        let vis = run(
            vec![
                vec![at_range(0.0, 30.0, 800.0); 3],
                vec![
                    at_range(0.0, 30.0, 800.0),
                    at_range(90.0, 31.0, 800.0),
                    at_range(180.0, 30.0, 800.0),
                ],
            ],
            10.0,
        );
        assert_eq!(vis.mask.row(1), &[false, true, false]);
        assert_eq!(vis.visible_indices(), vec![1]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let tracks = vec![
            vec![at_range(85.0, 28.0, 700.0), at_range(120.0, 50.0, 900.0)],
            vec![at_range(93.0, 33.0, 650.0), at_range(10.0, 5.0, 2000.0)],
        ];
        assert_eq!(run(tracks.clone(), 12.0), run(tracks, 12.0));
    }

    #[test]
    fn widening_the_cone_never_hides_an_object() {
        let tracks = vec![
            vec![at_range(80.0, 30.0, 700.0), at_range(60.0, 30.0, 700.0)],
            vec![at_range(90.0, 70.0, 700.0), at_range(200.0, 30.0, 700.0)],
            vec![at_range(270.0, -20.0, 700.0), at_range(270.0, -20.0, 700.0)],
            vec![at_range(91.0, 30.0, 700.0), at_range(92.0, 29.0, 700.0)],
        ];
        let mut previous: Vec<usize> = Vec::new();
        for aspect in [0.0, 5.0, 20.0, 45.0, 90.0, 120.0, 180.0, 270.0, 360.0] {
            let visible = run(tracks.clone(), aspect).visible_indices();
            assert!(previous.iter().all(|i| visible.contains(i)), "aspect {aspect}");
            previous = visible;
        }
        assert_eq!(previous, vec![0, 1, 2, 3]);
    }

    #[test]
    fn invalid_aspect_angle_is_rejected() {
        let grid = grid(1);
        let positions = Matrix::from_vec(1, 1, vec![[1.0, 0.0, 0.0]]).unwrap();
        let err = compute_visibility(&grid, &positions, &FlatFrame, &antenna(-1.0)).unwrap_err();
        assert!(matches!(err, SolverError::InvalidPointing(_)));
    }

    #[test]
    fn mismatched_matrix_is_rejected() {
        let positions = Matrix::from_vec(1, 2, vec![[1.0, 0.0, 0.0]; 2]).unwrap();
        assert!(compute_visibility(&grid(3), &positions, &FlatFrame, &antenna(10.0)).is_err());
    }
}
