//! Browser binding for the flocking background.
//!
//! The page owns the render surface and the animation frame loop. It calls
//! [`FlockBackground::step`] from `requestAnimationFrame`, then reads
//! [`FlockBackground::positions`] and moves the DOM node whose index matches
//! each agent.

use flock_core::{Bounds, FlockConfig, FlockSimulation};
use flock_shared::FlockSettings;
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&JsValue::from_str(&format_args!($($t)*).to_string())))
}

/// Floats per agent in [`FlockBackground::positions`]: x, y, heading.
pub const STRIDE: usize = 3;

#[wasm_bindgen]
pub struct FlockBackground {
    flock: FlockSimulation<usize>,
    frame: u32,
}

#[wasm_bindgen]
impl FlockBackground {
    /// `settings_json` uses the camelCase option names (`maxSpeed`,
    /// `perceptionRadius`, ...); omitted keys keep their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        count: usize,
        width: f32,
        height: f32,
        settings_json: Option<String>,
    ) -> Result<FlockBackground, JsValue> {
        let config = parse_settings(settings_json.as_deref()).map_err(to_js)?;
        let bounds = Bounds::new(width, height).map_err(to_js)?;
        let flock = FlockSimulation::with_count(count, bounds, config).map_err(to_js)?;

        console_log!("Flock background: {} agents in {}x{}", count, width, height);

        Ok(FlockBackground { flock, frame: 0 })
    }

    pub fn step(&mut self) {
        self.flock.step();
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.flock.resize(width, height).map_err(to_js)?;
        console_log!("Flock background resized to {}x{}", width, height);
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.flock.len()
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// `[x, y, heading]` per agent, in handle order.
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(packed_states(&self.flock).as_slice())
    }

    pub fn x(&self, index: usize) -> Option<f32> {
        self.flock.boids().get(index).map(|boid| boid.position.x)
    }

    pub fn y(&self, index: usize) -> Option<f32> {
        self.flock.boids().get(index).map(|boid| boid.position.y)
    }

    pub fn heading(&self, index: usize) -> Option<f32> {
        self.flock.boids().get(index).map(|boid| boid.heading())
    }

    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&FlockSettings::from(*self.flock.config())).map_err(to_js)
    }

    pub fn set_separation_weight(&mut self, weight: f32) -> Result<(), JsValue> {
        self.update_config(|config| config.separation_weight = weight)
    }

    pub fn set_alignment_weight(&mut self, weight: f32) -> Result<(), JsValue> {
        self.update_config(|config| config.alignment_weight = weight)
    }

    pub fn set_cohesion_weight(&mut self, weight: f32) -> Result<(), JsValue> {
        self.update_config(|config| config.cohesion_weight = weight)
    }

    pub fn set_max_speed(&mut self, speed: f32) -> Result<(), JsValue> {
        self.update_config(|config| config.max_speed = speed)
    }

    pub fn set_max_force(&mut self, force: f32) -> Result<(), JsValue> {
        self.update_config(|config| config.max_force = force)
    }

    pub fn set_perception_radius(&mut self, radius: f32) -> Result<(), JsValue> {
        self.update_config(|config| config.perception_radius = radius)
    }
}

impl FlockBackground {
    fn update_config(&mut self, edit: impl FnOnce(&mut FlockConfig)) -> Result<(), JsValue> {
        let mut config = *self.flock.config();
        edit(&mut config);
        self.flock.set_config(config).map_err(to_js)
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_settings(json: Option<&str>) -> Result<FlockConfig, String> {
    match json {
        Some(json) if !json.trim().is_empty() => FlockSettings::from_json(json)
            .map(FlockConfig::from)
            .map_err(|err| format!("invalid flock settings: {}", err)),
        _ => Ok(FlockConfig::default()),
    }
}

fn packed_states(flock: &FlockSimulation<usize>) -> Vec<f32> {
    let mut out = vec![0.0; flock.len() * STRIDE];
    for view in flock.views() {
        let base = *view.handle * STRIDE;
        out[base] = view.position.x;
        out[base + 1] = view.position.y;
        out[base + 2] = view.heading;
    }
    out
}
