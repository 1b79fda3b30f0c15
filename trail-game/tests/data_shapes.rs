use std::hash::Hasher;

use serde_json::{Map, Value};
use trail_game::{
    Activity, GameState, Graveyard, HighScoreTable, Profession, SimulationContext, Tombstone,
    TrailPolicy, advance_day,
};
use twox_hash::XxHash64;

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_value).collect()),
        Value::Object(map) => {
            let mut result = Map::with_capacity(map.len());
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, value) in entries {
                result.insert(key, canonicalize_value(value));
            }
            Value::Object(result)
        }
        other => other,
    }
}

fn fingerprint(policy: &TrailPolicy) -> u64 {
    let value = canonicalize_value(serde_json::to_value(policy).unwrap());
    let canonical = serde_json::to_string_pretty(&value).unwrap();
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(canonical.as_bytes());
    hasher.finish()
}

#[test]
fn policy_fingerprint_survives_a_json_round_trip() {
    let policy = TrailPolicy::default();
    let json = serde_json::to_string(&policy).unwrap();
    let reloaded = TrailPolicy::from_json(&json).unwrap();
    assert_eq!(reloaded, policy);
    assert_eq!(fingerprint(&reloaded), fingerprint(&policy));

    let mut tuned = policy.clone();
    tuned.hunt.ticks_per_hunt += 1;
    assert_ne!(fingerprint(&tuned), fingerprint(&policy));
}

#[test]
fn policy_documents_use_snake_case_keys() {
    let value = serde_json::to_value(TrailPolicy::default()).unwrap();
    let object = value.as_object().unwrap();
    for key in ["party_size", "start_year", "professions", "store", "river", "hunt", "score"] {
        assert!(object.contains_key(key), "missing {key}");
    }
    let professions = object["professions"].as_array().unwrap();
    assert_eq!(professions[0]["profession"], "banker");
}

#[test]
fn save_games_round_trip_mid_journey() {
    let mut ctx = SimulationContext::new(0xFACE_B00C, TrailPolicy::default());
    ctx.new_game("Ezra", Profession::Carpenter, ["Mary", "Jed"], 5);
    let inventory = &mut ctx.state.vehicle.inventory;
    inventory.oxen = 6;
    inventory.food_lbs = 600;
    inventory.clothing = 4;
    for _ in 0..5 {
        advance_day(&mut ctx, Activity::Travelling);
    }
    assert_eq!(ctx.state.days_elapsed, 5);

    let saved = serde_json::to_string(&ctx.state).unwrap();
    let restored: GameState = serde_json::from_str(&saved).unwrap();
    assert_eq!(restored, ctx.state);
    assert_eq!(restored.log, ctx.state.log);
}

#[test]
fn older_saves_fill_missing_fields_with_defaults() {
    let restored: GameState = serde_json::from_str(r#"{ "seed": 12, "days_elapsed": 3 }"#).unwrap();
    assert_eq!(restored.seed, 12);
    assert_eq!(restored.days_elapsed, 3);
    assert!(restored.party.members.is_empty());
    assert!(restored.outcome.is_none());
}

#[test]
fn tables_serialize_for_storage() {
    let table = HighScoreTable::default();
    let json = serde_json::to_string(&table).unwrap();
    let back: HighScoreTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, table);
    assert!(
        json.contains("\"rating\":\"trail_guide\"")
            || json.contains("\"rating\":\"adventurer\"")
    );

    let mut graveyard = Graveyard::default();
    graveyard.add(Tombstone::new(304, "Abe", "Gone to see the elephant"));
    let json = serde_json::to_string(&graveyard).unwrap();
    let back: Graveyard = serde_json::from_str(&json).unwrap();
    assert_eq!(back.at(304).map(|stone| stone.epitaph.as_str()), Some("Gone to see the elephant"));
}
