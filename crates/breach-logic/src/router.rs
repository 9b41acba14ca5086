//! Budgeted routing over a mission.
//!
//! Cost is not edge weight. Entering a division applies its impact (items
//! picked up minus enemy power) to the agent's points, and a step is only
//! taken while the running total stays positive. The search is a BFS where the
//! first discovery of a division fixes its arrival points and predecessor;
//! later, possibly cheaper, routes to it are never considered.
//!
//! The budget is a parameter of each search, not mission state.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::building::Division;
use crate::config::RouterConfig;
use crate::sources::{ImpactSource, Topology};

/// A route found by [`Router::plan_path`], with the points left after
/// entering its last division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPath {
    pub divisions: Vec<Division>,
    pub points_on_arrival: i32,
}

/// Outcome of simulating a round trip from one entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundTripReport {
    pub entry: Division,
    pub outbound: Vec<Division>,
    pub inbound: Vec<Division>,
    /// Sum of impacts along the outbound leg, starting from zero.
    pub outbound_points: i32,
    pub inbound_points: i32,
    pub feasible: bool,
}

pub struct Router<'a, M> {
    mission: &'a M,
    config: RouterConfig,
}

impl<'a, M: Topology + ImpactSource> Router<'a, M> {
    pub fn new(mission: &'a M, config: RouterConfig) -> Self {
        Self { mission, config }
    }

    /// Best path from `from` to `to` starting with the configured points.
    /// Empty if either division is unknown or the budget runs out first.
    pub fn find_best_path(&self, from: &Division, to: &Division) -> Vec<Division> {
        self.plan_path(from, to, self.config.starting_points)
            .map(|p| p.divisions)
            .unwrap_or_default()
    }

    /// Budgeted BFS from `from` to `to`. The origin's own impact is not
    /// applied; each step applies the impact of the division it enters.
    pub fn plan_path(&self, from: &Division, to: &Division, budget: i32) -> Option<PlannedPath> {
        if !self.mission.contains(to) {
            log::debug!("path {} -> {}: unknown target", from, to);
            return None;
        }
        let planned = self.search(from, budget, |d| d == to);
        match &planned {
            Some(p) => log::debug!(
                "path {} -> {}: {} divisions, {} points on arrival",
                from,
                to,
                p.divisions.len(),
                p.points_on_arrival
            ),
            None => log::debug!("path {} -> {}: unreachable with {} points", from, to, budget),
        }
        planned
    }

    /// Path to the nearest division holding any item, life kit or not.
    pub fn find_best_path_to_life_kit(&self, from: &Division) -> Vec<Division> {
        let planned = self.search(from, self.config.starting_points, |d| {
            !self.mission.items_in(d).is_empty()
        });
        match planned {
            Some(p) => {
                log::debug!(
                    "item search from {}: found in {:?}",
                    from,
                    p.divisions.last().map(|d| d.name.as_str())
                );
                p.divisions
            }
            None => {
                log::debug!("item search from {}: nothing within reach", from);
                Vec::new()
            }
        }
    }

    /// Pick the best-scoring outbound leg (entry to target) and the
    /// best-scoring inbound leg (target to entry) over all entry points, and
    /// join them. The two legs are chosen independently and may use
    /// different entries. `None` if either leg has no viable candidate.
    pub fn find_best_route_from_multiple_entry_points(
        &self,
        entry_points: &[Division],
        target: &Division,
    ) -> Option<Vec<Division>> {
        let mut best_outbound: Option<(i32, Vec<Division>)> = None;
        let mut best_inbound: Option<(i32, Vec<Division>)> = None;

        for entry in entry_points {
            let outbound = self.find_best_path(entry, target);
            consider(&mut best_outbound, self.score(outbound));
            let inbound = self.find_best_path(target, entry);
            consider(&mut best_inbound, self.score(inbound));
        }

        let (Some((out_score, mut route)), Some((in_score, inbound))) = (best_outbound, best_inbound)
        else {
            log::debug!("round trip to {}: no viable leg", target);
            return None;
        };
        log::debug!(
            "round trip to {}: outbound scores {}, inbound scores {}",
            target,
            out_score,
            in_score
        );
        route.extend(inbound);
        Some(route)
    }

    /// Walk `path` from `initial_points`, stopping before a division that is
    /// already walked or that would take the points to zero or below.
    /// `None` if not even the first division can be walked.
    pub fn verify_path_to_entry(
        &self,
        path: &[Division],
        initial_points: i32,
    ) -> Option<Vec<Division>> {
        let mut points = initial_points;
        let mut seen = HashSet::new();
        let mut walked = Vec::new();

        for division in path {
            if !seen.insert(division) {
                break;
            }
            points = points.saturating_add(self.mission.impact(division));
            if points <= 0 {
                break;
            }
            walked.push(division.clone());
        }

        log::debug!(
            "verified {} of {} divisions, {} points left",
            walked.len(),
            path.len(),
            points
        );
        if walked.is_empty() {
            None
        } else {
            Some(walked)
        }
    }

    /// Replay `path` from the configured scoring points, origin included.
    /// `None` if the running total ever reaches zero or below.
    pub fn calculate_path_points(&self, path: &[Division]) -> Option<i32> {
        let mut points = self.config.scoring_points;
        for division in path {
            points = points.saturating_add(self.mission.impact(division));
            if points <= 0 {
                return None;
            }
        }
        Some(points)
    }

    /// Outbound and inbound best paths for every entry point. Legs are summed
    /// from zero; a trip is feasible when both legs exist and neither sum is
    /// negative.
    pub fn simulate_round_trips(
        &self,
        entry_points: &[Division],
        target: &Division,
    ) -> Vec<RoundTripReport> {
        entry_points
            .iter()
            .map(|entry| {
                let outbound = self.find_best_path(entry, target);
                let inbound = self.find_best_path(target, entry);
                let outbound_points = self.path_impact(&outbound);
                let inbound_points = self.path_impact(&inbound);
                let feasible = !outbound.is_empty()
                    && !inbound.is_empty()
                    && outbound_points >= 0
                    && inbound_points >= 0;
                RoundTripReport {
                    entry: entry.clone(),
                    outbound,
                    inbound,
                    outbound_points,
                    inbound_points,
                    feasible,
                }
            })
            .collect()
    }

    fn path_impact(&self, path: &[Division]) -> i32 {
        path.iter()
            .fold(0i32, |acc, d| acc.saturating_add(self.mission.impact(d)))
    }

    fn score(&self, path: Vec<Division>) -> Option<(i32, Vec<Division>)> {
        if path.is_empty() {
            return None;
        }
        let points = self.calculate_path_points(&path)?;
        Some((points, path))
    }

    fn search<F>(&self, from: &Division, budget: i32, is_goal: F) -> Option<PlannedPath>
    where
        F: Fn(&Division) -> bool,
    {
        if !self.mission.contains(from) {
            return None;
        }

        // Points on arrival are fixed by the first discovery.
        let mut visited: HashSet<Division> = HashSet::new();
        let mut predecessor: HashMap<Division, Division> = HashMap::new();
        let mut queue = VecDeque::new();
        visited.insert(from.clone());
        queue.push_back((from.clone(), budget));

        while let Some((current, points)) = queue.pop_front() {
            if is_goal(&current) {
                let divisions = unwind(&predecessor, current);
                return Some(PlannedPath {
                    divisions,
                    points_on_arrival: points,
                });
            }
            for next in self.mission.neighbors(&current) {
                if visited.contains(&next) {
                    continue;
                }
                let remaining = points.saturating_add(self.mission.impact(&next));
                if remaining > 0 {
                    visited.insert(next.clone());
                    predecessor.insert(next.clone(), current.clone());
                    queue.push_back((next, remaining));
                }
            }
        }
        None
    }
}

/// Keep the first candidate with the strictly highest score.
fn consider(best: &mut Option<(i32, Vec<Division>)>, candidate: Option<(i32, Vec<Division>)>) {
    if let Some((score, path)) = candidate {
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            *best = Some((score, path));
        }
    }
}

fn unwind(predecessor: &HashMap<Division, Division>, goal: Division) -> Vec<Division> {
    let mut path = vec![goal];
    while let Some(prev) = path.last().and_then(|d| predecessor.get(d)) {
        path.push(prev.clone());
    }
    path.reverse();
    path
}
