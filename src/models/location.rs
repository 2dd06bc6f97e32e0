//! Location and time window types.

/// An allowed arrival window at a location, in minutes from shift start.
///
/// The vehicle must arrive no later than `latest` and may arrive as early as
/// `earliest` (waiting is allowed if early).
///
/// # Examples
///
/// ```
/// use fleetsim::models::TimeWindow;
///
/// let tw = TimeWindow::new(60, 240).unwrap();
/// assert!(tw.contains(120));
/// assert!(tw.is_missed(241));
/// assert_eq!(tw.waiting_before(30), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    earliest: u32,
    latest: u32,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest`.
    pub fn new(earliest: u32, latest: u32) -> Option<Self> {
        if earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest allowable arrival time.
    pub fn earliest(&self) -> u32 {
        self.earliest
    }

    /// Latest allowable arrival time.
    pub fn latest(&self) -> u32 {
        self.latest
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: u32) -> bool {
        time >= self.earliest && time <= self.latest
    }

    /// Returns `true` if arriving at the given time misses this window.
    pub fn is_missed(&self, arrival: u32) -> bool {
        arrival > self.latest
    }

    /// Minutes a vehicle arriving at the given time must wait before service.
    ///
    /// Zero if the vehicle arrives within or after the window.
    pub fn waiting_before(&self, arrival: u32) -> u32 {
        self.earliest.saturating_sub(arrival)
    }
}

/// A delivery location (or the depot) in a problem instance.
///
/// Location 0 is always the depot: zero demand, window spanning the whole
/// shift. Locations are immutable once the instance is built.
///
/// # Examples
///
/// ```
/// use fleetsim::models::{Location, TimeWindow};
///
/// let depot = Location::depot(TimeWindow::new(0, 480).unwrap());
/// assert!(depot.is_depot());
/// assert_eq!(depot.demand(), 0);
///
/// let stop = Location::new(1, 12, TimeWindow::new(60, 240).unwrap());
/// assert_eq!(stop.index(), 1);
/// assert_eq!(stop.demand(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct Location {
    index: usize,
    demand: u32,
    window: TimeWindow,
    is_depot: bool,
}

impl Location {
    /// Creates a customer location with the given demand and window.
    pub fn new(index: usize, demand: u32, window: TimeWindow) -> Self {
        Self {
            index,
            demand,
            window,
            is_depot: false,
        }
    }

    /// Creates the depot (index 0, demand 0) with the given operating window.
    pub fn depot(window: TimeWindow) -> Self {
        Self {
            index: 0,
            demand: 0,
            window,
            is_depot: true,
        }
    }

    /// Location index (0 = depot).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Units demanded at this location.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Allowed arrival window.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Returns `true` for the depot.
    pub fn is_depot(&self) -> bool {
        self.is_depot
    }
}
