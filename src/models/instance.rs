//! Problem instance aggregating locations, travel times, and fleet parameters.

use thiserror::Error;

use super::Location;
use crate::matrix::TravelTimeMatrix;

/// Error raised when a [`ProblemInstance`] is constructed from inconsistent
/// inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstanceError {
    /// The location list is empty or location 0 is not a depot.
    #[error("location 0 must be a depot")]
    MissingDepot,
    /// A location's index does not match its position in the list.
    #[error("location at position {position} has index {index}")]
    IndexMismatch {
        /// Position in the location list.
        position: usize,
        /// Index carried by the location.
        index: usize,
    },
    /// The travel time matrix size does not match the number of locations.
    #[error("matrix covers {matrix} locations, instance has {locations}")]
    MatrixSizeMismatch {
        /// Matrix dimension.
        matrix: usize,
        /// Number of locations.
        locations: usize,
    },
    /// The fleet is empty.
    #[error("num_vehicles must be at least 1")]
    EmptyFleet,
}

/// A complete routing problem: locations, travel times, and a homogeneous
/// fleet with a shift deadline.
///
/// Total fleet capacity need not cover total demand; residual demand is a
/// reportable outcome of solving, not a construction error.
///
/// # Examples
///
/// ```
/// use fleetsim::models::{Location, ProblemInstance, TimeWindow};
/// use fleetsim::matrix::TravelTimeMatrix;
///
/// let shift = TimeWindow::new(0, 480).unwrap();
/// let instance = ProblemInstance::new(
///     vec![
///         Location::depot(shift),
///         Location::new(1, 5, shift),
///         Location::new(2, 5, shift),
///     ],
///     TravelTimeMatrix::from_rows(vec![
///         vec![0, 10, 20],
///         vec![10, 0, 15],
///         vec![20, 15, 0],
///     ]).unwrap(),
///     1,
///     50,
///     10,
///     480,
/// ).unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    locations: Vec<Location>,
    matrix: TravelTimeMatrix,
    num_vehicles: usize,
    vehicle_capacity: u32,
    service_minutes: u32,
    max_time_minutes: u32,
}

impl ProblemInstance {
    /// Creates a problem instance, validating structural consistency.
    pub fn new(
        locations: Vec<Location>,
        matrix: TravelTimeMatrix,
        num_vehicles: usize,
        vehicle_capacity: u32,
        service_minutes: u32,
        max_time_minutes: u32,
    ) -> Result<Self, InstanceError> {
        if !locations.first().is_some_and(Location::is_depot) {
            return Err(InstanceError::MissingDepot);
        }
        for (position, loc) in locations.iter().enumerate() {
            if loc.index() != position {
                return Err(InstanceError::IndexMismatch {
                    position,
                    index: loc.index(),
                });
            }
        }
        if matrix.size() != locations.len() {
            return Err(InstanceError::MatrixSizeMismatch {
                matrix: matrix.size(),
                locations: locations.len(),
            });
        }
        if num_vehicles == 0 {
            return Err(InstanceError::EmptyFleet);
        }
        Ok(Self {
            locations,
            matrix,
            num_vehicles,
            vehicle_capacity,
            service_minutes,
            max_time_minutes,
        })
    }

    /// All locations (index 0 = depot).
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The location at the given index.
    pub fn location(&self, index: usize) -> &Location {
        &self.locations[index]
    }

    /// Number of customers (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.locations.len() - 1
    }

    /// Travel time in minutes from location `from` to `to`.
    pub fn travel_time(&self, from: usize, to: usize) -> u32 {
        self.matrix.get(from, to)
    }

    /// Number of vehicles the plan should target.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Uniform per-vehicle load capacity.
    pub fn vehicle_capacity(&self) -> u32 {
        self.vehicle_capacity
    }

    /// Fixed unloading duration at each customer, in minutes.
    ///
    /// The depot has no service time.
    pub fn service_minutes(&self) -> u32 {
        self.service_minutes
    }

    /// Shift deadline in minutes from shift start.
    pub fn max_time_minutes(&self) -> u32 {
        self.max_time_minutes
    }

    /// Service time attributed to departing from the given location.
    pub fn service_at(&self, location: usize) -> u32 {
        if location == 0 {
            0
        } else {
            self.service_minutes
        }
    }
}
