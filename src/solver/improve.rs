//! Local search operators used by the constraint-search strategy.
//!
//! Both operators apply the single best improving move per step and leave the
//! sequences untouched when nothing improves, so repeated stepping is a
//! deterministic descent. Every candidate move is re-checked against the hard
//! constraints (windows, capacity, horizon) before being considered.

use super::FIXED_VEHICLE_COST;
use crate::evaluation::ScheduleEvaluator;
use crate::models::ProblemInstance;

/// A relocate move: move one customer from one route to another.
#[derive(Debug, Clone)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: f64,
}

/// Baseline travel minutes of a stop sequence, including depot legs.
pub(crate) fn route_travel(sequence: &[usize], instance: &ProblemInstance) -> u64 {
    let mut total: u64 = 0;
    let mut prev = 0;
    for &loc in sequence {
        total += u64::from(instance.travel_time(prev, loc));
        prev = loc;
    }
    if !sequence.is_empty() {
        total += u64::from(instance.travel_time(prev, 0));
    }
    total
}

/// Travel delta of inserting `location` at `pos` in `sequence`.
pub(crate) fn insertion_travel_delta(
    sequence: &[usize],
    pos: usize,
    location: usize,
    instance: &ProblemInstance,
) -> i64 {
    let prev = if pos == 0 { 0 } else { sequence[pos - 1] };
    let next = if pos == sequence.len() {
        0
    } else {
        sequence[pos]
    };

    // Old: prev → next.  New: prev → location → next.
    i64::from(instance.travel_time(prev, location)) + i64::from(instance.travel_time(location, next))
        - i64::from(instance.travel_time(prev, next))
}

/// Travel delta of removing the stop at `pos` from `sequence`.
pub(crate) fn removal_travel_delta(
    sequence: &[usize],
    pos: usize,
    instance: &ProblemInstance,
) -> i64 {
    let prev = if pos == 0 { 0 } else { sequence[pos - 1] };
    let next = if pos == sequence.len() - 1 {
        0
    } else {
        sequence[pos + 1]
    };
    let loc = sequence[pos];

    // Old: prev → loc → next.  New: prev → next.
    i64::from(instance.travel_time(prev, next))
        - i64::from(instance.travel_time(prev, loc))
        - i64::from(instance.travel_time(loc, next))
}

/// Applies the best improving inter-route relocate, if any.
///
/// The objective counts travel plus the fixed vehicle cost, so emptying a
/// route is strongly rewarded and activating an idle vehicle strongly
/// penalized. Returns `true` if a move was applied.
pub(crate) fn relocate_step(routes: &mut [Vec<usize>], instance: &ProblemInstance) -> bool {
    let evaluator = ScheduleEvaluator::new(instance);
    let capacity = instance.vehicle_capacity();
    let mut best: Option<RelocateMove> = None;

    for from_route in 0..routes.len() {
        for from_pos in 0..routes[from_route].len() {
            let loc = routes[from_route][from_pos];
            let removal = removal_travel_delta(&routes[from_route], from_pos, instance);
            let frees_vehicle = routes[from_route].len() == 1;

            for to_route in 0..routes.len() {
                if to_route == from_route {
                    continue;
                }

                let to_load: u32 = routes[to_route]
                    .iter()
                    .map(|&c| instance.location(c).demand())
                    .sum();
                if to_load + instance.location(loc).demand() > capacity {
                    continue;
                }

                for to_pos in 0..=routes[to_route].len() {
                    let insertion =
                        insertion_travel_delta(&routes[to_route], to_pos, loc, instance);
                    let mut delta = (removal + insertion) as f64;
                    if frees_vehicle {
                        delta -= FIXED_VEHICLE_COST;
                    }
                    if routes[to_route].is_empty() {
                        delta += FIXED_VEHICLE_COST;
                    }

                    if delta >= -1e-9 {
                        continue;
                    }
                    if best.as_ref().is_some_and(|b| delta >= b.delta) {
                        continue;
                    }

                    let mut source = routes[from_route].clone();
                    source.remove(from_pos);
                    let mut dest = routes[to_route].clone();
                    dest.insert(to_pos, loc);
                    if evaluator.is_feasible(&source) && evaluator.is_feasible(&dest) {
                        best = Some(RelocateMove {
                            from_route,
                            from_pos,
                            to_route,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }

    match best {
        Some(mv) => {
            let loc = routes[mv.from_route].remove(mv.from_pos);
            routes[mv.to_route].insert(mv.to_pos, loc);
            true
        }
        None => false,
    }
}

/// Applies the best improving intra-route 2-opt segment reversal, if any.
///
/// Deltas are computed by re-summing the candidate route's travel, since the
/// matrix may be asymmetric and a reversal changes leg directions. Returns
/// `true` if a move was applied.
pub(crate) fn two_opt_step(routes: &mut [Vec<usize>], instance: &ProblemInstance) -> bool {
    let evaluator = ScheduleEvaluator::new(instance);
    let mut best: Option<(usize, usize, usize, i64)> = None;

    for (route_idx, sequence) in routes.iter().enumerate() {
        if sequence.len() < 2 {
            continue;
        }
        let current = route_travel(sequence, instance) as i64;

        for i in 0..sequence.len() - 1 {
            for j in i + 1..sequence.len() {
                let mut candidate = sequence.clone();
                candidate[i..=j].reverse();
                let delta = route_travel(&candidate, instance) as i64 - current;

                if delta >= 0 {
                    continue;
                }
                if best.is_some_and(|(_, _, _, d)| delta >= d) {
                    continue;
                }
                if evaluator.is_feasible(&candidate) {
                    best = Some((route_idx, i, j, delta));
                }
            }
        }
    }

    match best {
        Some((route_idx, i, j, _)) => {
            routes[route_idx][i..=j].reverse();
            true
        }
        None => false,
    }
}
