use alloc::vec::Vec;
use rand::Rng;

use crate::behavior::Steering;
use crate::{Boid, Bounds, ConfigError, FlockConfig, Vector2D};

/// Read-only per-agent state handed back to the host after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView<'a, H> {
    pub handle: &'a H,
    pub position: Vector2D,
    pub heading: f32,
}

/// A fixed-size flock on a toroidal domain.
///
/// Each [`step`](Self::step) scans every pair of agents, so a step costs
/// O(N²). That is fine for a background of a hundred or so agents; larger
/// flocks need a spatial index in front of the neighbor search.
#[derive(Debug, Clone)]
pub struct FlockSimulation<H = usize> {
    boids: Vec<Boid<H>>,
    forces: Vec<Vector2D>,
    config: FlockConfig,
    bounds: Bounds,
}

impl<H> FlockSimulation<H> {
    /// One randomly placed agent per handle.
    pub fn with_rng<I, R>(
        handles: I,
        bounds: Bounds,
        config: FlockConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = H>,
        R: Rng + ?Sized,
    {
        config.validate()?;
        let boids = handles
            .into_iter()
            .map(|handle| Boid::random(handle, &bounds, config.max_speed, rng))
            .collect();
        Self::from_boids(boids, bounds, config)
    }

    #[cfg(feature = "std")]
    pub fn new<I>(handles: I, bounds: Bounds, config: FlockConfig) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = H>,
    {
        Self::with_rng(handles, bounds, config, &mut rand::thread_rng())
    }

    /// Starts from explicit agent state. Pending accelerations are discarded.
    pub fn from_boids(
        mut boids: Vec<Boid<H>>,
        bounds: Bounds,
        config: FlockConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        for boid in boids.iter_mut() {
            boid.acceleration = Vector2D::zero();
        }

        log::debug!(
            "flock created: {} agents in {}x{}",
            boids.len(),
            bounds.width(),
            bounds.height()
        );

        let forces = Vec::with_capacity(boids.len());
        Ok(Self {
            boids,
            forces,
            config,
            bounds,
        })
    }

    /// Advances every agent by one frame.
    ///
    /// Forces are computed for all agents from the pre-step state before any
    /// agent moves, so results do not depend on agent order.
    pub fn step(&mut self) {
        let boids = &self.boids;
        let config = &self.config;

        self.forces.clear();
        self.forces.extend(
            (0..boids.len()).map(|index| Steering::compute(boids, index, config).weighted(config)),
        );

        for (boid, force) in self.boids.iter_mut().zip(self.forces.iter()) {
            boid.apply_force(*force);
            boid.update(self.config.max_speed);
            boid.wrap_edges(&self.bounds);
        }
    }

    /// Position and heading of every agent, in construction order.
    pub fn views(&self) -> impl Iterator<Item = AgentView<'_, H>> + '_ {
        self.boids.iter().map(|boid| AgentView {
            handle: &boid.handle,
            position: boid.position,
            heading: boid.heading(),
        })
    }

    /// Unweighted rule outputs for agent `index` against the current state.
    pub fn steering(&self, index: usize) -> Option<Steering> {
        (index < self.boids.len()).then(|| Steering::compute(&self.boids, index, &self.config))
    }

    /// Takes the host's new viewport size. Agents keep their positions; any
    /// outside the new domain wrap on the next step.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        self.bounds = Bounds::new(width, height)?;
        log::debug!("flock resized to {}x{}", width, height);
        Ok(())
    }

    pub fn set_config(&mut self, config: FlockConfig) -> Result<(), ConfigError> {
        config.validate()?;
        log::debug!("flock config updated: {:?}", config);
        self.config = config;
        Ok(())
    }

    pub fn boids(&self) -> &[Boid<H>] {
        &self.boids
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }
}

#[cfg(feature = "std")]
impl FlockSimulation<usize> {
    /// `count` random agents whose handles are their indices.
    pub fn with_count(
        count: usize,
        bounds: Bounds,
        config: FlockConfig,
    ) -> Result<Self, ConfigError> {
        Self::new(0..count, bounds, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn test_flock_creation() {
        let flock = FlockSimulation::with_count(50, bounds(), FlockConfig::default()).unwrap();
        assert_eq!(flock.len(), 50);
        assert_eq!(flock.bounds().width(), 800.0);
        assert_eq!(flock.bounds().height(), 600.0);

        let handles: Vec<usize> = flock.views().map(|view| *view.handle).collect();
        assert_eq!(handles, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_flock_rejects_invalid_config() {
        let config = FlockConfig::default().with_max_speed(-1.0);
        let result = FlockSimulation::with_count(5, bounds(), config);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "max_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_flock_step_is_noop() {
        let mut flock =
            FlockSimulation::<usize>::from_boids(vec![], bounds(), FlockConfig::default()).unwrap();
        flock.step();
        assert!(flock.is_empty());
        assert_eq!(flock.views().count(), 0);
    }

    #[test]
    fn test_flock_update() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut flock =
            FlockSimulation::with_rng(0..10, bounds(), FlockConfig::default(), &mut rng).unwrap();
        let initial_positions: Vec<_> = flock.boids().iter().map(|b| b.position).collect();

        flock.step();

        let changed = flock
            .boids()
            .iter()
            .zip(initial_positions.iter())
            .any(|(b, &initial)| b.position != initial);

        assert!(changed);
        assert_eq!(flock.len(), 10);
    }

    #[test]
    fn test_from_boids_clears_acceleration() {
        let mut boid = Boid::new(0, Vector2D::new(10.0, 10.0), Vector2D::new(1.0, 0.0));
        boid.acceleration = Vector2D::new(5.0, 5.0);

        let mut flock =
            FlockSimulation::from_boids(vec![boid], bounds(), FlockConfig::default()).unwrap();
        flock.step();

        assert_eq!(flock.boids()[0].velocity, Vector2D::new(1.0, 0.0));
        assert_eq!(flock.boids()[0].position, Vector2D::new(11.0, 10.0));
    }

    #[test]
    fn test_resize() {
        let mut flock = FlockSimulation::with_count(3, bounds(), FlockConfig::default()).unwrap();

        flock.resize(1024.0, 768.0).unwrap();
        assert_eq!(flock.bounds().width(), 1024.0);

        assert!(flock.resize(0.0, 768.0).is_err());
        assert_eq!(flock.bounds().width(), 1024.0);
    }

    #[test]
    fn test_set_config() {
        let mut flock = FlockSimulation::with_count(3, bounds(), FlockConfig::default()).unwrap();

        flock
            .set_config(FlockConfig::default().with_max_speed(4.0))
            .unwrap();
        assert_eq!(flock.config().max_speed, 4.0);

        assert!(flock
            .set_config(FlockConfig::default().with_max_force(f32::NAN))
            .is_err());
        assert_eq!(flock.config().max_speed, 4.0);
    }

    #[test]
    fn test_resize_keeps_positions_until_next_step() {
        let boids = vec![Boid::new(
            0,
            Vector2D::new(700.0, 50.0),
            Vector2D::new(1.0, 0.0),
        )];
        let mut flock =
            FlockSimulation::from_boids(boids, bounds(), FlockConfig::default()).unwrap();

        flock.resize(400.0, 300.0).unwrap();
        assert_eq!(flock.boids()[0].position, Vector2D::new(700.0, 50.0));

        flock.step();
        assert_eq!(flock.boids()[0].position, Vector2D::new(0.0, 50.0));
        assert_eq!(flock.boids()[0].velocity, Vector2D::new(1.0, 0.0));
    }

    #[test]
    fn test_new_max_speed_bounds_next_step() {
        let boids = vec![Boid::new(
            0,
            Vector2D::new(100.0, 100.0),
            Vector2D::new(1.5, 0.0),
        )];
        let mut flock =
            FlockSimulation::from_boids(boids, bounds(), FlockConfig::default()).unwrap();

        flock.step();
        assert_eq!(flock.boids()[0].velocity, Vector2D::new(1.5, 0.0));

        flock
            .set_config(FlockConfig::default().with_max_speed(1.0))
            .unwrap();
        flock.step();

        assert_eq!(flock.boids()[0].velocity, Vector2D::new(1.0, 0.0));
        assert_eq!(flock.boids()[0].position, Vector2D::new(102.5, 100.0));
    }

    #[test]
    fn test_new_perception_radius_drives_next_step() {
        // 60 apart: out of range at the default radius of 50.
        let boids = vec![
            Boid::new(0, Vector2D::new(100.0, 100.0), Vector2D::new(1.0, 0.0)),
            Boid::new(1, Vector2D::new(160.0, 100.0), Vector2D::new(1.0, 0.0)),
        ];
        let mut flock =
            FlockSimulation::from_boids(boids, bounds(), FlockConfig::default()).unwrap();

        flock.step();
        for boid in flock.boids() {
            assert_eq!(boid.velocity, Vector2D::new(1.0, 0.0));
        }

        flock
            .set_config(FlockConfig::default().with_perception_radius(100.0))
            .unwrap();
        flock.step();

        for boid in flock.boids() {
            assert_ne!(boid.velocity, Vector2D::new(1.0, 0.0));
        }
    }

    #[test]
    fn test_views_report_heading() {
        let boids = vec![
            Boid::new("a", Vector2D::new(1.0, 1.0), Vector2D::new(0.0, 1.0)),
            Boid::new("b", Vector2D::new(400.0, 300.0), Vector2D::new(-1.0, 0.0)),
        ];
        let flock = FlockSimulation::from_boids(boids, bounds(), FlockConfig::default()).unwrap();

        let views: Vec<_> = flock.views().collect();
        assert_eq!(*views[0].handle, "a");
        assert!((views[0].heading - core::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(*views[1].handle, "b");
        assert_eq!(views[1].position, Vector2D::new(400.0, 300.0));
    }

    #[test]
    fn test_steering_out_of_range() {
        let flock = FlockSimulation::with_count(2, bounds(), FlockConfig::default()).unwrap();
        assert!(flock.steering(1).is_some());
        assert!(flock.steering(2).is_none());
    }
}
