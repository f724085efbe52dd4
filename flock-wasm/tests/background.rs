#![cfg(target_arch = "wasm32")]

use flock_wasm::{FlockBackground, STRIDE};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn test_positions_cover_every_agent() {
    let mut background = FlockBackground::new(25, 640.0, 480.0, None).unwrap();
    background.step();

    let positions = background.positions().to_vec();
    assert_eq!(positions.len(), 25 * STRIDE);
    assert_eq!(background.count(), 25);
    assert_eq!(background.frame(), 1);

    for agent in positions.chunks(STRIDE) {
        assert!(agent[0] >= 0.0 && agent[0] <= 640.0);
        assert!(agent[1] >= 0.0 && agent[1] <= 480.0);
    }
}

#[wasm_bindgen_test]
fn test_settings_json_round_trips_through_constructor() {
    let background =
        FlockBackground::new(3, 300.0, 300.0, Some(r#"{"maxSpeed": 4.0}"#.to_string())).unwrap();
    let json = background.settings_json().unwrap();
    assert!(json.contains("\"maxSpeed\":4.0"));
}

#[wasm_bindgen_test]
fn test_rejects_bad_dimensions_and_settings() {
    assert!(FlockBackground::new(3, 0.0, 300.0, None).is_err());
    assert!(FlockBackground::new(3, 300.0, 300.0, Some("{\"maxSpeed\": -1}".to_string())).is_err());
}

#[wasm_bindgen_test]
fn test_setters_validate() {
    let mut background = FlockBackground::new(5, 300.0, 300.0, None).unwrap();
    assert!(background.set_cohesion_weight(2.0).is_ok());
    assert!(background.set_max_force(0.0).is_err());
    assert!(background.resize(1024.0, 768.0).is_ok());
    assert!(background.resize(-5.0, 768.0).is_err());
}

#[wasm_bindgen_test]
fn test_index_accessors() {
    let background = FlockBackground::new(2, 300.0, 300.0, None).unwrap();
    assert!(background.x(1).is_some());
    assert!(background.heading(0).is_some());
    assert!(background.y(2).is_none());
}
