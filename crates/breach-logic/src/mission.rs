//! Mission state: the building plus everything placed in it.
//!
//! Impact is never cached. Every query reads the current placement of items
//! and enemies, so pickups and enemy moves between queries are reflected in
//! the next route.

use serde::{Deserialize, Serialize};

use crate::building::{Building, Division};
use crate::sources::{ImpactSource, Topology};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Restores health when used.
    LifeKit,
    /// Bulletproof vest: adds extra points on top of health.
    Vest,
}

/// An item lying in a division. `points` is the recovery amount for a life
/// kit or the extra amount for a vest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub division: Division,
    pub kind: ItemKind,
    pub points: i32,
}

impl Item {
    pub fn life_kit(division: Division, recovery_points: i32) -> Self {
        Self {
            division,
            kind: ItemKind::LifeKit,
            points: recovery_points,
        }
    }

    pub fn vest(division: Division, extra_points: i32) -> Self {
        Self {
            division,
            kind: ItemKind::Vest,
            points: extra_points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub power: i32,
    pub division: Division,
}

impl Enemy {
    pub fn new(name: impl Into<String>, power: i32, division: Division) -> Self {
        Self {
            name: name.into(),
            power,
            division,
        }
    }
}

/// What the agent has been sent to retrieve, and where it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub division: Division,
    pub kind: String,
}

#[derive(Debug, Clone)]
pub struct Mission {
    pub code: String,
    pub version: u32,
    pub building: Building,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub entry_points: Vec<Division>,
    pub target: Target,
}

impl Mission {
    /// Mission over `building` with nothing placed in it yet.
    pub fn new(code: impl Into<String>, version: u32, building: Building, target: Target) -> Self {
        Self {
            code: code.into(),
            version,
            building,
            enemies: Vec::new(),
            items: Vec::new(),
            entry_points: Vec::new(),
            target,
        }
    }

    pub fn is_entry_point(&self, division: &Division) -> bool {
        self.entry_points.contains(division)
    }

    /// Remove and return every item lying in `division`.
    pub fn take_items(&mut self, division: &Division) -> Vec<Item> {
        let (taken, kept): (Vec<Item>, Vec<Item>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| &item.division == division);
        self.items = kept;
        taken
    }

    /// Move the named enemy to `to`. Returns `false` if there is no such
    /// enemy or `to` is not part of the building.
    pub fn relocate_enemy(&mut self, name: &str, to: &Division) -> bool {
        if !self.building.contains(to) {
            return false;
        }
        match self.enemies.iter_mut().find(|e| e.name == name) {
            Some(enemy) => {
                enemy.division = to.clone();
                true
            }
            None => false,
        }
    }

    /// Remove a defeated enemy from the mission.
    pub fn remove_enemy(&mut self, name: &str) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.name == name)?;
        Some(self.enemies.remove(index))
    }
}

impl Topology for Mission {
    fn contains(&self, division: &Division) -> bool {
        self.building.contains(division)
    }

    fn neighbors(&self, division: &Division) -> Vec<Division> {
        self.building.neighbors(division)
    }
}

impl ImpactSource for Mission {
    fn items_in(&self, division: &Division) -> Vec<&Item> {
        self.items.iter().filter(|i| &i.division == division).collect()
    }

    fn enemies_in(&self, division: &Division) -> Vec<&Enemy> {
        self.enemies
            .iter()
            .filter(|e| &e.division == division)
            .collect()
    }
}
