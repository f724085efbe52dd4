#![cfg_attr(not(feature = "std"), no_std)]

//! Serializable types shared by the flock host drivers.

extern crate alloc;

use alloc::vec::Vec;
use flock_core::{FlockConfig, FlockSimulation, Vector2D};
use serde::{Deserialize, Serialize};

/// Tuning options as hosts write them in JSON.
///
/// Keys follow the browser script's option names (`maxSpeed`,
/// `perceptionRadius`, ...). Missing keys fall back to the defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FlockSettings {
    pub max_speed: f32,
    pub max_force: f32,
    pub perception_radius: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
}

impl Default for FlockSettings {
    fn default() -> Self {
        FlockConfig::default().into()
    }
}

impl From<FlockConfig> for FlockSettings {
    fn from(config: FlockConfig) -> Self {
        Self {
            max_speed: config.max_speed,
            max_force: config.max_force,
            perception_radius: config.perception_radius,
            separation_weight: config.separation_weight,
            alignment_weight: config.alignment_weight,
            cohesion_weight: config.cohesion_weight,
        }
    }
}

impl From<FlockSettings> for FlockConfig {
    fn from(settings: FlockSettings) -> Self {
        Self {
            max_speed: settings.max_speed,
            max_force: settings.max_force,
            perception_radius: settings.perception_radius,
            separation_weight: settings.separation_weight,
            alignment_weight: settings.alignment_weight,
            cohesion_weight: settings.cohesion_weight,
        }
    }
}

#[cfg(feature = "std")]
impl FlockSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Render state of one agent, keyed by its index handle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentState {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

/// All agents after a given frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub agents: Vec<AgentState>,
}

impl FrameSnapshot {
    pub fn capture(frame: u64, flock: &FlockSimulation<usize>) -> Self {
        let agents = flock
            .views()
            .map(|view| AgentState {
                id: *view.handle,
                x: view.position.x,
                y: view.position.y,
                heading: view.heading,
            })
            .collect();

        Self { frame, agents }
    }
}

/// Aggregate motion of a flock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FlockStats {
    pub agent_count: usize,
    pub mean_speed: f32,
    pub top_speed: f32,
    /// Length of the mean unit heading: 1.0 when every agent flies the same
    /// way, near 0.0 when headings cancel out.
    pub polarization: f32,
}

impl FlockStats {
    pub fn measure<H>(flock: &FlockSimulation<H>) -> Self {
        let boids = flock.boids();
        if boids.is_empty() {
            return Self {
                agent_count: 0,
                mean_speed: 0.0,
                top_speed: 0.0,
                polarization: 0.0,
            };
        }

        let mut speed_sum = 0.0;
        let mut top_speed: f32 = 0.0;
        let mut heading_sum = Vector2D::zero();

        for boid in boids {
            let speed = boid.velocity.magnitude();
            speed_sum += speed;
            top_speed = top_speed.max(speed);
            heading_sum += boid.velocity.normalize();
        }

        let count = boids.len() as f32;
        Self {
            agent_count: boids.len(),
            mean_speed: speed_sum / count,
            top_speed,
            polarization: (heading_sum / count).magnitude(),
        }
    }
}
