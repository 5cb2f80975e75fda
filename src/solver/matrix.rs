use crate::solver::error::SolverError;

/// Dense object x time table, stored object-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    n_objects: usize,
    n_time: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// `data` must hold exactly `n_objects * n_time` cells.
    pub fn from_vec(n_objects: usize, n_time: usize, data: Vec<T>) -> Result<Self, SolverError> {
        let cells = cell_count(n_objects, n_time)?;
        if data.len() != cells {
            return Err(SolverError::InvalidRange(format!(
                "matrix shape mismatch: {} x {} needs {} cells, got {}",
                n_objects,
                n_time,
                cells,
                data.len()
            )));
        }
        Ok(Self {
            n_objects,
            n_time,
            data,
        })
    }

    pub fn n_objects(&self) -> usize {
        self.n_objects
    }

    pub fn n_time(&self) -> usize {
        self.n_time
    }

    pub fn get(&self, object: usize, time: usize) -> &T {
        &self.data[object * self.n_time + time]
    }

    /// `None` outside the table.
    pub fn try_get(&self, object: usize, time: usize) -> Option<&T> {
        if object < self.n_objects && time < self.n_time {
            self.data.get(object * self.n_time + time)
        } else {
            None
        }
    }

    pub fn row(&self, object: usize) -> &[T] {
        let start = object * self.n_time;
        &self.data[start..start + self.n_time]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.n_objects).map(move |i| self.row(i))
    }

    /// Cells in scan order: object index, then time index.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let n_time = self.n_time;
        self.data
            .iter()
            .enumerate()
            .map(move |(k, v)| (k / n_time, k % n_time, v))
    }
}

/// Number of cells in an `n_objects x n_time` table, or an error on overflow.
pub(crate) fn cell_count(n_objects: usize, n_time: usize) -> Result<usize, SolverError> {
    n_objects.checked_mul(n_time).ok_or_else(|| {
        SolverError::InvalidRange(format!(
            "{} objects x {} instants does not fit in memory",
            n_objects, n_time
        ))
    })
}
