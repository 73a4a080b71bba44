use scope_model::*;

const ROSTER_JSON: &str = r#"{
    "troops": [
        { "id": "echo-1", "name": "ECHO-1", "status": "active", "lastPing": "00:04 ago",
          "lat": 34.05, "lon": -118.24, "altitude": 1200, "heading": 7 },
        { "id": "echo-2", "name": "ECHO-2", "status": "compromised", "lastPing": "03:00 ago",
          "lat": 34.06, "lon": -118.25 }
    ],
    "targets": [
        { "id": "t-1", "name": "RIDGE", "type": "poi", "status": "active",
          "priority": "low", "lat": 34.07, "lon": -118.26 }
    ]
}"#;

#[test]
fn test_roster_from_json() {
    let roster = Roster::from_json(ROSTER_JSON).unwrap();
    assert_eq!(roster.troops.len(), 2);
    assert_eq!(roster.troops[0].entity.heading_degrees, Some(7));
    assert_eq!(roster.troops[0].entity.altitude_meters, Some(1200));
    assert_eq!(roster.troops[1].status, TroopStatus::Unknown);
    assert_eq!(roster.targets[0].target_type, TargetType::Poi);
    assert_eq!(roster.active_target_count(), 1);
}

#[test]
fn test_roster_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.json");
    std::fs::write(&path, ROSTER_JSON).unwrap();

    let roster = Roster::load(&path).unwrap();
    assert_eq!(roster.find_troop("echo-1").unwrap().name(), "ECHO-1");
}

#[test]
fn test_roster_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Roster::load(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(ModelError::Io(_))));
}

#[test]
fn test_roster_malformed_json() {
    assert!(matches!(Roster::from_json("{ troops: "), Err(ModelError::Parse(_))));
}

#[test]
fn test_roster_rejects_out_of_range_coordinates() {
    let json = r#"{ "troops": [
        { "id": "x", "name": "X", "status": "active", "lat": 120.0, "lon": 0.0 }
    ] }"#;
    assert!(matches!(
        Roster::from_json(json),
        Err(ModelError::InvalidCoordinate { .. })
    ));
}

#[test]
fn test_roster_rejects_heading_outside_compass() {
    let json = r#"{ "troops": [
        { "id": "x", "name": "X", "status": "active", "lat": 34.0, "lon": -118.0, "heading": 400 }
    ] }"#;
    let err = Roster::from_json(json).unwrap_err();
    assert!(matches!(
        &err,
        ModelError::InvalidHeading { id, heading: 400 } if id == "x"
    ));
    assert_eq!(err.to_string(), "invalid heading for x: 400 (expected 0-359)");
}

#[test]
fn test_active_troops_keep_roster_order() {
    let roster = Roster::mock();
    let ids: Vec<&str> = roster.active_troops().iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec!["alpha-1", "alpha-2", "bravo-1", "bravo-3", "charlie-2"]);
}
