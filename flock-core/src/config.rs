use crate::ConfigError;

/// Tuning for the flocking rules.
///
/// Every field must be finite and strictly positive; see [`FlockConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    pub max_speed: f32,
    pub max_force: f32,
    pub perception_radius: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            max_speed: 2.0,
            max_force: 0.05,
            perception_radius: 50.0,
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
        }
    }
}

impl FlockConfig {
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_max_force(mut self, max_force: f32) -> Self {
        self.max_force = max_force;
        self
    }

    pub fn with_perception_radius(mut self, perception_radius: f32) -> Self {
        self.perception_radius = perception_radius;
        self
    }

    pub fn with_weights(mut self, separation: f32, alignment: f32, cohesion: f32) -> Self {
        self.separation_weight = separation;
        self.alignment_weight = alignment;
        self.cohesion_weight = cohesion;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("perception_radius", self.perception_radius),
            ("separation_weight", self.separation_weight),
            ("alignment_weight", self.alignment_weight),
            ("cohesion_weight", self.cohesion_weight),
        ];

        for (name, value) in fields {
            if !is_positive(value) {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}

/// Size of the toroidal domain agents wrap around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    width: f32,
    height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !is_positive(width) {
            return Err(ConfigError::InvalidDimension {
                name: "width",
                value: width,
            });
        }
        if !is_positive(height) {
            return Err(ConfigError::InvalidDimension {
                name: "height",
                value: height,
            });
        }

        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FlockConfig::default();
        assert_eq!(config.max_speed, 2.0);
        assert_eq!(config.max_force, 0.05);
        assert_eq!(config.perception_radius, 50.0);
        assert_eq!(config.separation_weight, 1.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_parameters() {
        let config = FlockConfig::default().with_max_force(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "max_force",
                value: 0.0
            })
        );

        let config = FlockConfig::default().with_weights(1.0, -1.0, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "alignment_weight",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_radius() {
        let config = FlockConfig::default().with_perception_radius(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn bounds_reject_bad_dimensions() {
        assert!(Bounds::new(800.0, 600.0).is_ok());
        assert!(matches!(
            Bounds::new(0.0, 600.0),
            Err(ConfigError::InvalidDimension { name: "width", .. })
        ));
        assert!(matches!(
            Bounds::new(800.0, f32::INFINITY),
            Err(ConfigError::InvalidDimension { name: "height", .. })
        ));
    }
}
