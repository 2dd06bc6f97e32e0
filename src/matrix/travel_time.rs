//! Dense travel time matrix.

/// A dense n×n travel time matrix in integer minutes, stored row-major.
///
/// Entries need not be symmetric (one-way streets, turn penalties), but the
/// diagonal is always zero and every entry is non-negative by construction.
///
/// # Examples
///
/// ```
/// use fleetsim::matrix::TravelTimeMatrix;
///
/// let m = TravelTimeMatrix::from_rows(vec![
///     vec![0, 10, 20],
///     vec![10, 0, 15],
///     vec![20, 15, 0],
/// ]).unwrap();
/// assert_eq!(m.get(0, 1), 10);
/// assert_eq!(m.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct TravelTimeMatrix {
    data: Vec<u32>,
    size: usize,
}

impl TravelTimeMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit grid of rows.
    ///
    /// Returns `None` if the grid is not square or any diagonal entry is
    /// non-zero.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Option<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size || row[i] != 0 {
                return None;
            }
            data.extend_from_slice(row);
        }
        Some(Self { data, size })
    }

    /// Creates a matrix from a flat row-major vector.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<u32>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the travel time in minutes from location `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> u32 {
        self.data[from * self.size + to]
    }

    /// Sets the travel time from location `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, minutes: u32) {
        self.data[from * self.size + to] = minutes;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}
