//! The building: divisions (rooms) connected by doorways.
//!
//! `Building` is a [`Network`] specialised to [`Division`] vertices. All
//! connections are zero-weight; route cost lives in division impact, not in
//! edges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::network::Network;
use crate::sources::Topology;

/// A room or area of the building, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Division {
    pub name: String,
}

impl Division {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Building {
    network: Network<Division>,
}

impl Building {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a division. Returns `false` (and leaves the building unchanged)
    /// if a division with the same name already exists.
    pub fn add_division(&mut self, division: Division) -> bool {
        if self.network.contains(&division) {
            log::warn!("division '{}' already in building, ignoring", division);
            return false;
        }
        self.network.add_vertex(division);
        true
    }

    /// Connect two divisions with a doorway. No-op if either is unknown.
    pub fn connect(&mut self, a: &Division, b: &Division) {
        self.network.add_unweighted_edge(a, b);
    }

    pub fn disconnect(&mut self, a: &Division, b: &Division) {
        self.network.remove_edge(a, b);
    }

    pub fn contains(&self, division: &Division) -> bool {
        self.network.contains(division)
    }

    /// Look a division up by name.
    pub fn division(&self, name: &str) -> Option<&Division> {
        self.network.vertices().iter().find(|d| d.name == name)
    }

    pub fn divisions(&self) -> &[Division] {
        self.network.vertices()
    }

    pub fn division_count(&self) -> usize {
        self.network.size()
    }

    /// Adjacent divisions in index order; empty for an unknown division.
    pub fn neighbors(&self, division: &Division) -> Vec<Division> {
        self.network.neighbors(division).into_iter().cloned().collect()
    }

    /// Read-only access to the underlying engine for traversal queries.
    pub fn network(&self) -> &Network<Division> {
        &self.network
    }
}

impl Topology for Building {
    fn contains(&self, division: &Division) -> bool {
        Building::contains(self, division)
    }

    fn neighbors(&self, division: &Division) -> Vec<Division> {
        Building::neighbors(self, division)
    }
}

impl fmt::Display for Building {
    /// One line per division: `name -> neighbour neighbour ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for division in self.divisions() {
            write!(f, "{} ->", division)?;
            for n in self.network.neighbors(division) {
                write!(f, " {}", n)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
