//! Graph engines and budgeted routing for building-breach missions.
//!
//! A mission is a building of divisions connected by doorways, with enemies
//! and items placed in them. The engines answer the usual graph questions;
//! the router answers the mission's: how to reach the target, and get back
//! out, without running out of points.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`building`] | Divisions and their doorway connections |
//! | [`config`] | Router budgets and their validation |
//! | [`engine`] | Vertex list plus adjacency matrix shared by both graph types |
//! | [`error`] | Errors raised while loading a mission |
//! | [`graph`] | Unweighted undirected graph over an adjacency matrix |
//! | [`loader`] | Mission documents (JSON) into [`Mission`] values |
//! | [`matrix`] | Growable symmetric adjacency matrix and its edge values |
//! | [`mission`] | Enemies, items, entry points, target; per-division impact |
//! | [`network`] | Weighted graph with Dijkstra and Prim |
//! | [`router`] | Budgeted BFS routing, round-trip scoring, path replay |
//! | [`sources`] | Topology and impact capabilities the router reads |
//! | [`traversal`] | DFS/BFS over anything with an adjacency relation |

pub mod building;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod loader;
pub mod matrix;
pub mod mission;
pub mod network;
pub mod router;
pub mod sources;
pub mod traversal;

pub use building::{Building, Division};
pub use config::{ConfigError, RouterConfig};
pub use engine::Engine;
pub use error::{MissionError, Result};
pub use graph::Graph;
pub use loader::{load_mission_reader, load_mission_str};
pub use mission::{Enemy, Item, ItemKind, Mission, Target};
pub use network::Network;
pub use router::{PlannedPath, RoundTripReport, Router};
pub use sources::{ImpactSource, Topology};
