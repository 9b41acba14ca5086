//! Breach Headless Mission Harness
//!
//! Loads a mission document, runs every route query against it and checks
//! the answers for consistency. Runs entirely in-process, no menus.
//!
//! Usage:
//!   cargo run -p breach-simtest
//!   cargo run -p breach-simtest -- --verbose
//!   cargo run -p breach-simtest -- --mission path/to/mission.json --json

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use breach_logic::config::DEFAULT_STARTING_POINTS;
use breach_logic::{
    load_mission_reader, load_mission_str, Division, ImpactSource, Mission, RoundTripReport,
    Router, RouterConfig, Topology,
};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Bundled mission (used when --mission is not given) ──────────────────
const SAMPLE_MISSION_JSON: &str = include_str!("../../../data/sample_mission.json");

const EXIT_CHECK_FAILED: u8 = 1;
const EXIT_LOAD_FAILED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "breach-simtest", version, about = "Validate route queries on a mission")]
struct Cli {
    /// Mission document to load instead of the bundled sample
    #[arg(long, value_name = "PATH")]
    mission: Option<PathBuf>,

    /// Print every check, not only failures
    #[arg(short, long)]
    verbose: bool,

    /// Log filter, e.g. `debug` or `breach_logic::router=trace`
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Points an agent enters the building with
    #[arg(long, default_value_t = DEFAULT_STARTING_POINTS, allow_negative_numbers = true)]
    starting_points: i32,

    /// Budget used when scoring round-trip legs
    #[arg(long, default_value_t = DEFAULT_STARTING_POINTS, allow_negative_numbers = true)]
    scoring_points: i32,

    /// Emit checks and round trips as one JSON document on stdout
    #[arg(long)]
    json: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    mission: &'a str,
    version: u32,
    results: &'a [TestResult],
    round_trips: &'a [RoundTripReport],
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.log_level.as_deref()) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let mission = match load(&cli) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: failed to load mission: {}", e);
            return ExitCode::from(EXIT_LOAD_FAILED);
        }
    };
    log::info!("mission {} v{} loaded", mission.code, mission.version);

    let config = RouterConfig {
        starting_points: cli.starting_points,
        scoring_points: cli.scoring_points,
    };
    let human = !cli.json;
    let verbose = cli.verbose && human;

    if human {
        println!("=== Breach Mission Harness: {} ===\n", mission.code);
    }

    let mut results = Vec::new();

    // 1. Router configuration
    results.extend(validate_config(&config, human));

    // 2. Building structure
    results.extend(validate_building(&mission, human, verbose));

    // 3. Best paths from every entry point
    results.extend(validate_entry_paths(&mission, config, human, verbose));

    // 4. Round trip and simulation
    let (round_trip_results, reports) = validate_round_trips(&mission, config, human);
    results.extend(round_trip_results);

    // 5. Life kit searches
    results.extend(validate_life_kits(&mission, config, human));

    // 6. Placement changes between queries
    results.extend(validate_requery(&mission, config, human));

    let failed = results.iter().filter(|r| !r.passed).count();

    if cli.json {
        let report = JsonReport {
            mission: &mission.code,
            version: mission.version,
            results: &results,
            round_trips: &reports,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("error: failed to encode report: {}", e);
                return ExitCode::from(EXIT_CHECK_FAILED);
            }
        }
    } else {
        // ── Summary ──
        println!();
        let passed = results.len() - failed;
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed,
            results.len(),
            failed
        );
    }

    if failed > 0 {
        ExitCode::from(EXIT_CHECK_FAILED)
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(
    verbose: bool,
    log_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => level.to_string(),
        (true, None) => "debug".to_string(),
        (false, None) => "warn".to_string(),
    };
    // BREACH_LOG overrides the command line.
    let filter = EnvFilter::try_from_env("BREACH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if level.contains('=') {
            level
        } else {
            format!("breach_logic={0},breach_simtest={0}", level)
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn load(cli: &Cli) -> breach_logic::Result<Mission> {
    match &cli.mission {
        Some(path) => {
            let file = File::open(path)?;
            load_mission_reader(BufReader::new(file))
        }
        None => load_mission_str(SAMPLE_MISSION_JSON),
    }
}

fn names(path: &[Division]) -> String {
    path.iter()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Consecutive divisions are connected by a doorway.
fn is_walkable(mission: &Mission, path: &[Division]) -> bool {
    path.windows(2)
        .all(|pair| mission.neighbors(&pair[0]).contains(&pair[1]))
}

/// Points stay positive entering each division after the first.
fn stays_positive(mission: &Mission, path: &[Division], budget: i32) -> bool {
    let mut points = budget;
    for division in path.iter().skip(1) {
        points = points.saturating_add(mission.impact(division));
        if points <= 0 {
            return false;
        }
    }
    true
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn validate_config(config: &RouterConfig, human: bool) -> Vec<TestResult> {
    if human {
        println!("--- Router Config ---");
    }
    let errors = config.validate();
    let detail = if errors.is_empty() {
        format!(
            "starting {} / scoring {}",
            config.starting_points, config.scoring_points
        )
    } else {
        errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    };
    vec![TestResult::new("config_valid", errors.is_empty(), detail)]
}

// ── 2. Building ─────────────────────────────────────────────────────────

fn validate_building(mission: &Mission, human: bool, verbose: bool) -> Vec<TestResult> {
    if human {
        println!("--- Building ---");
    }
    let mut results = Vec::new();
    let building = &mission.building;
    let network = building.network();
    let count = building.division_count();

    if verbose {
        print!("{}", building);
    }

    results.push(TestResult::new(
        "building_not_empty",
        count > 0,
        format!("{} divisions", count),
    ));

    results.push(TestResult::new(
        "mission_has_entries",
        !mission.entry_points.is_empty(),
        format!("{} entry points", mission.entry_points.len()),
    ));

    results.push(TestResult::new(
        "target_in_building",
        building.contains(&mission.target.division),
        format!("target {} ({})", mission.target.division, mission.target.kind),
    ));

    // Every doorway must be listed from both sides
    let mut one_sided = Vec::new();
    for division in building.divisions() {
        for n in building.neighbors(division) {
            if !building.neighbors(&n).contains(division) {
                one_sided.push(format!("{}→{}", division, n));
            }
        }
    }
    results.push(TestResult::new(
        "doorways_symmetric",
        one_sided.is_empty(),
        if one_sided.is_empty() {
            "all doorways two-way".to_string()
        } else {
            format!("one-sided: {}", one_sided.join(", "))
        },
    ));

    let connected = network.is_connected();
    results.push(TestResult::new(
        "building_connected",
        connected,
        if connected {
            "every division reachable".to_string()
        } else {
            format!(
                "only {} of {} divisions reachable from {}",
                network.bfs_from(0).len(),
                count,
                building
                    .divisions()
                    .first()
                    .map(|d| d.name.as_str())
                    .unwrap_or("-")
            )
        },
    ));

    // Traversal orders agree on what they reach
    if let Some(entry) = mission.entry_points.first() {
        let dfs = network.dfs(entry).len();
        let bfs = network.bfs(entry).len();
        results.push(TestResult::new(
            "traversals_agree",
            dfs == bfs,
            format!("DFS {} / BFS {} divisions from {}", dfs, bfs, entry),
        ));
    }

    // Spanning tree keeps every division and has n-1 doorways
    if connected {
        let tree = network.minimum_spanning_tree();
        let edges: usize = (0..tree.size())
            .map(|i| tree.neighbor_indices(i).len())
            .sum::<usize>()
            / 2;
        results.push(TestResult::new(
            "spanning_tree_shape",
            tree.size() == count && edges + 1 == count && tree.is_connected(),
            format!("{} divisions, {} doorways", tree.size(), edges),
        ));
    }

    results
}

// ── 3. Entry paths ──────────────────────────────────────────────────────

fn validate_entry_paths(
    mission: &Mission,
    config: RouterConfig,
    human: bool,
    verbose: bool,
) -> Vec<TestResult> {
    if human {
        println!("--- Entry Paths ---");
    }
    let mut results = Vec::new();
    let router = Router::new(mission, config);
    let target = &mission.target.division;

    for entry in &mission.entry_points {
        let Some(planned) = router.plan_path(entry, target, config.starting_points) else {
            results.push(TestResult::new(
                format!("path_{}", entry),
                true,
                format!("{} → {}: unreachable with {} points", entry, target, config.starting_points),
            ));
            continue;
        };
        let path = &planned.divisions;
        if verbose {
            println!("  {} → {}: {}", entry, target, names(path));
        }

        let well_formed = path.first() == Some(entry)
            && path.last() == Some(target)
            && is_walkable(mission, path)
            && stays_positive(mission, path, config.starting_points);
        results.push(TestResult::new(
            format!("path_{}", entry),
            well_formed && planned.points_on_arrival > 0,
            format!(
                "{} divisions, {} points on arrival",
                path.len(),
                planned.points_on_arrival
            ),
        ));

        // Replaying the found path must not be cut short before the target
        let verified = router
            .verify_path_to_entry(&path[1..], config.starting_points)
            .map(|walked| walked.len())
            .unwrap_or(0);
        results.push(TestResult::new(
            format!("verify_{}", entry),
            verified + 1 == path.len(),
            format!("{} of {} steps replayed", verified, path.len() - 1),
        ));
    }

    results
}

// ── 4. Round trips ──────────────────────────────────────────────────────

fn validate_round_trips(
    mission: &Mission,
    config: RouterConfig,
    human: bool,
) -> (Vec<TestResult>, Vec<RoundTripReport>) {
    if human {
        println!("--- Round Trips ---");
    }
    let mut results = Vec::new();
    let router = Router::new(mission, config);
    let target = &mission.target.division;

    match router.find_best_route_from_multiple_entry_points(&mission.entry_points, target) {
        Some(route) => {
            let starts = route.first().is_some_and(|d| mission.is_entry_point(d));
            let ends = route.last().is_some_and(|d| mission.is_entry_point(d));
            results.push(TestResult::new(
                "round_trip_shape",
                starts && ends && route.contains(target),
                names(&route),
            ));
        }
        None => {
            results.push(TestResult::new(
                "round_trip_shape",
                true,
                "no viable round trip",
            ));
        }
    }

    let reports = router.simulate_round_trips(&mission.entry_points, target);
    if human {
        for r in &reports {
            println!(
                "  {} {}: out {} ({}), back {} ({})",
                if r.feasible { "✓" } else { "·" },
                r.entry,
                r.outbound.len(),
                r.outbound_points,
                r.inbound.len(),
                r.inbound_points
            );
        }
    }
    results.push(TestResult::new(
        "simulation_covers_entries",
        reports.len() == mission.entry_points.len(),
        format!(
            "{} of {} trips feasible",
            reports.iter().filter(|r| r.feasible).count(),
            reports.len()
        ),
    ));

    (results, reports)
}

// ── 5. Life kits ────────────────────────────────────────────────────────

fn validate_life_kits(mission: &Mission, config: RouterConfig, human: bool) -> Vec<TestResult> {
    if human {
        println!("--- Life Kits ---");
    }
    let mut results = Vec::new();
    let router = Router::new(mission, config);

    for entry in &mission.entry_points {
        let path = router.find_best_path_to_life_kit(entry);
        let passed = match path.last() {
            Some(found) => {
                !mission.items_in(found).is_empty()
                    && path.first() == Some(entry)
                    && is_walkable(mission, &path)
            }
            None => true,
        };
        results.push(TestResult::new(
            format!("life_kit_{}", entry),
            passed,
            if path.is_empty() {
                "no item within reach".to_string()
            } else {
                names(&path)
            },
        ));
    }

    results
}

// ── 6. Re-query ─────────────────────────────────────────────────────────

fn validate_requery(mission: &Mission, config: RouterConfig, human: bool) -> Vec<TestResult> {
    if human {
        println!("--- Re-query ---");
    }
    let mut results = Vec::new();
    let target = mission.target.division.clone();

    // With every enemy gone and no negative items, each entry in a
    // connected building reaches the target.
    let mut cleared = mission.clone();
    cleared.enemies.clear();
    if cleared.building.network().is_connected()
        && cleared.items.iter().all(|i| i.points >= 0)
        && config.starting_points > 0
    {
        let router = Router::new(&cleared, config);
        let blocked: Vec<_> = cleared
            .entry_points
            .iter()
            .filter(|e| router.find_best_path(e, &target).is_empty())
            .map(|e| e.name.clone())
            .collect();
        results.push(TestResult::new(
            "cleared_building_reachable",
            blocked.is_empty(),
            if blocked.is_empty() {
                "every entry reaches the target".to_string()
            } else {
                format!("blocked from {}", blocked.join(", "))
            },
        ));
    }

    // After looting the first route, a re-query still ends at the target or finds nothing.
    if let Some(entry) = mission.entry_points.first() {
        let before = Router::new(mission, config).find_best_path(entry, &target);
        if !before.is_empty() {
            let mut looted = mission.clone();
            let mut taken = 0;
            for division in &before {
                taken += looted.take_items(division).len();
            }
            let after = Router::new(&looted, config).find_best_path(entry, &target);
            results.push(TestResult::new(
                "requery_after_pickup",
                after.is_empty() || (is_walkable(&looted, &after) && after.last() == Some(&target)),
                format!(
                    "{} items taken, route now {}",
                    taken,
                    if after.is_empty() {
                        "unreachable".to_string()
                    } else {
                        names(&after)
                    }
                ),
            ));
        }
    }

    results
}
