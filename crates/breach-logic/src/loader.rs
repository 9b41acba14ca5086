//! Mission documents.
//!
//! The document keeps the field names of the game's mission files:
//!
//! ```json
//! {
//!   "cod-missao": "pt-npo-2024", "versao": 1,
//!   "edificio": ["Heliporto", "Escadas", "Laboratorio"],
//!   "ligacoes": [["Heliporto", "Escadas"], ["Escadas", "Laboratorio"]],
//!   "inimigos": [{ "nome": "Guarda", "poder": 30, "divisao": "Escadas" }],
//!   "entradas-saidas": ["Heliporto"],
//!   "alvo": { "divisao": "Laboratorio", "tipo": "quimico" },
//!   "itens": [{ "divisao": "Escadas", "tipo": "kit de vida", "pontos-recuperados": 20 }]
//! }
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::building::{Building, Division};
use crate::error::{MissionError, Result};
use crate::mission::{Enemy, Item, Mission, Target};

const LIFE_KIT_TYPE: &str = "kit de vida";
const VEST_TYPE: &str = "colete";

#[derive(Debug, Deserialize)]
struct MissionDoc {
    #[serde(rename = "cod-missao")]
    code: String,
    #[serde(rename = "versao", default)]
    version: u32,
    #[serde(rename = "edificio")]
    divisions: Vec<String>,
    #[serde(rename = "ligacoes", default)]
    connections: Vec<(String, String)>,
    #[serde(rename = "inimigos", default)]
    enemies: Vec<EnemyDoc>,
    #[serde(rename = "entradas-saidas", default)]
    entry_points: Vec<String>,
    #[serde(rename = "alvo")]
    target: TargetDoc,
    #[serde(rename = "itens", default)]
    items: Vec<ItemDoc>,
}

#[derive(Debug, Deserialize)]
struct EnemyDoc {
    #[serde(rename = "nome")]
    name: String,
    #[serde(rename = "poder")]
    power: i32,
    #[serde(rename = "divisao")]
    division: String,
}

#[derive(Debug, Deserialize)]
struct TargetDoc {
    #[serde(rename = "divisao")]
    division: String,
    #[serde(rename = "tipo")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ItemDoc {
    #[serde(rename = "divisao")]
    division: String,
    #[serde(rename = "tipo")]
    kind: String,
    #[serde(rename = "pontos-recuperados")]
    recovery_points: Option<i32>,
    #[serde(rename = "pontos-extra")]
    extra_points: Option<i32>,
}

pub fn load_mission_str(json: &str) -> Result<Mission> {
    let doc: MissionDoc = serde_json::from_str(json)?;
    build_mission(doc)
}

pub fn load_mission_reader<R: Read>(reader: R) -> Result<Mission> {
    let doc: MissionDoc = serde_json::from_reader(reader)?;
    build_mission(doc)
}

fn build_mission(doc: MissionDoc) -> Result<Mission> {
    let mut building = Building::new();
    for name in doc.divisions {
        if !building.add_division(Division::new(name.clone())) {
            return Err(MissionError::DuplicateDivision(name));
        }
    }

    let known = |context: &str, name: String| -> Result<Division> {
        if building.division(&name).is_some() {
            Ok(Division::new(name))
        } else {
            Err(MissionError::UnknownDivision {
                context: context.to_string(),
                name,
            })
        }
    };

    let mut connections = Vec::with_capacity(doc.connections.len());
    for (from, to) in doc.connections {
        connections.push((known("connection", from)?, known("connection", to)?));
    }

    let mut enemies = Vec::with_capacity(doc.enemies.len());
    for e in doc.enemies {
        let context = format!("enemy {}", e.name);
        let division = known(&context, e.division)?;
        enemies.push(Enemy::new(e.name, e.power, division));
    }

    let mut entry_points = Vec::with_capacity(doc.entry_points.len());
    for name in doc.entry_points {
        entry_points.push(known("entry point", name)?);
    }

    let target = Target {
        division: known("target", doc.target.division)?,
        kind: doc.target.kind,
    };

    let mut items = Vec::with_capacity(doc.items.len());
    for item in doc.items {
        let division = known("item", item.division)?;
        let missing = |field: &'static str| MissionError::MissingItemPoints {
            kind: item.kind.clone(),
            division: division.name.clone(),
            field,
        };
        match item.kind.as_str() {
            LIFE_KIT_TYPE => {
                let points = item.recovery_points.ok_or_else(|| missing("pontos-recuperados"))?;
                items.push(Item::life_kit(division, points));
            }
            VEST_TYPE => {
                let points = item.extra_points.ok_or_else(|| missing("pontos-extra"))?;
                items.push(Item::vest(division, points));
            }
            other => {
                log::warn!("skipping item of unknown type '{}' in {}", other, division);
            }
        }
    }

    for (from, to) in &connections {
        building.connect(from, to);
    }

    log::debug!(
        "loaded mission {} v{}: {} divisions, {} enemies, {} items",
        doc.code,
        doc.version,
        building.division_count(),
        enemies.len(),
        items.len()
    );

    let mut mission = Mission::new(doc.code, doc.version, building, target);
    mission.enemies = enemies;
    mission.items = items;
    mission.entry_points = entry_points;
    Ok(mission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::ImpactSource;

    const DOC: &str = r#"{
        "cod-missao": "pt-npo-2024",
        "versao": 2,
        "edificio": ["Heliporto", "Escadas", "Laboratorio"],
        "ligacoes": [["Heliporto", "Escadas"], ["Escadas", "Laboratorio"]],
        "inimigos": [{ "nome": "Guarda", "poder": 30, "divisao": "Escadas" }],
        "entradas-saidas": ["Heliporto"],
        "alvo": { "divisao": "Laboratorio", "tipo": "quimico" },
        "itens": [
            { "divisao": "Escadas", "tipo": "kit de vida", "pontos-recuperados": 20 },
            { "divisao": "Laboratorio", "tipo": "colete", "pontos-extra": 15 }
        ]
    }"#;

    #[test]
    fn test_load_full_document() {
        let m = load_mission_str(DOC).unwrap();
        assert_eq!(m.code, "pt-npo-2024");
        assert_eq!(m.version, 2);
        assert_eq!(m.building.division_count(), 3);
        assert_eq!(m.entry_points, vec![Division::new("Heliporto")]);
        assert_eq!(m.target.division, Division::new("Laboratorio"));
        assert_eq!(m.impact(&Division::new("Escadas")), -10);
        assert_eq!(m.impact(&Division::new("Laboratorio")), 15);
        assert_eq!(
            m.building.neighbors(&Division::new("Escadas")),
            vec![Division::new("Heliporto"), Division::new("Laboratorio")]
        );
    }

    #[test]
    fn test_load_from_reader() {
        let m = load_mission_reader(DOC.as_bytes()).unwrap();
        assert_eq!(m.enemies.len(), 1);
    }

    #[test]
    fn test_unknown_connection_division() {
        let doc = DOC.replace(r#"["Escadas", "Laboratorio"]]"#, r#"["Escadas", "Cave"]]"#);
        match load_mission_str(&doc) {
            Err(MissionError::UnknownDivision { context, name }) => {
                assert_eq!(context, "connection");
                assert_eq!(name, "Cave");
            }
            other => panic!("expected UnknownDivision, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_division() {
        let doc = DOC.replace(r#""Laboratorio"],"#, r#""Laboratorio", "Escadas"],"#);
        assert!(matches!(
            load_mission_str(&doc),
            Err(MissionError::DuplicateDivision(name)) if name == "Escadas"
        ));
    }

    #[test]
    fn test_missing_item_points() {
        let doc = DOC.replace(r#", "pontos-extra": 15"#, "");
        assert!(matches!(
            load_mission_str(&doc),
            Err(MissionError::MissingItemPoints { field: "pontos-extra", .. })
        ));
    }

    #[test]
    fn test_unknown_item_type_is_skipped() {
        let doc = DOC.replace(r#""tipo": "colete""#, r#""tipo": "granada""#);
        let m = load_mission_str(&doc).unwrap();
        assert_eq!(m.items.len(), 1);
    }

    #[test]
    fn test_extreme_enemy_power_loads_and_saturates() {
        let doc = DOC.replace(
            r#"[{ "nome": "Guarda", "poder": 30, "divisao": "Escadas" }]"#,
            r#"[
                { "nome": "Guarda", "poder": 2147483647, "divisao": "Escadas" },
                { "nome": "Sentinela", "poder": 2147483647, "divisao": "Escadas" }
            ]"#,
        );
        let m = load_mission_str(&doc).unwrap();
        assert_eq!(m.enemies.len(), 2);
        assert_eq!(m.impact(&Division::new("Escadas")), 20 - i32::MAX);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(load_mission_str("{"), Err(MissionError::Json(_))));
    }
}
