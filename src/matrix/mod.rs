//! Travel time matrix.

mod travel_time;

pub use travel_time::TravelTimeMatrix;
