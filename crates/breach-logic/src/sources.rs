//! Capabilities the router reads from the game layer.

use crate::building::Division;
use crate::mission::{Enemy, Item};

/// Which divisions can be walked to from a given one.
pub trait Topology {
    fn contains(&self, division: &Division) -> bool;
    fn neighbors(&self, division: &Division) -> Vec<Division>;
}

/// Where items and enemies currently sit.
pub trait ImpactSource {
    fn items_in(&self, division: &Division) -> Vec<&Item>;
    fn enemies_in(&self, division: &Division) -> Vec<&Enemy>;

    /// Net point change for entering `division`: item points minus enemy
    /// power, summed over everything currently placed there. Saturates at
    /// the `i32` bounds.
    fn impact(&self, division: &Division) -> i32 {
        let gained = self
            .items_in(division)
            .iter()
            .fold(0i32, |acc, i| acc.saturating_add(i.points));
        let lost = self
            .enemies_in(division)
            .iter()
            .fold(0i32, |acc, e| acc.saturating_add(e.power));
        gained.saturating_sub(lost)
    }
}
