//! Steering rules.
//!
//! Every rule reads a neighbor set drawn from an immutable snapshot of the
//! flock and returns a steering force already limited to `max_force`.

use crate::{Boid, FlockConfig, Vector2D};

/// Another agent inside the perception radius, with its distance.
#[derive(Debug)]
pub struct Neighbor<'a, H> {
    pub boid: &'a Boid<H>,
    pub distance: f32,
}

// Manual impls: a derive would require `H: Clone`.
impl<H> Clone for Neighbor<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Neighbor<'_, H> {}

/// All agents other than `flock[index]` strictly closer than `radius`.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn neighbors<H>(
    flock: &[Boid<H>],
    index: usize,
    radius: f32,
) -> impl Iterator<Item = Neighbor<'_, H>> + Clone {
    let origin = flock[index].position;
    flock
        .iter()
        .enumerate()
        .filter(move |(i, _)| *i != index)
        .filter_map(move |(_, other)| {
            let distance = origin.distance(&other.position);
            (distance < radius).then_some(Neighbor {
                boid: other,
                distance,
            })
        })
}

/// Unweighted rule outputs for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub separation: Vector2D,
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
}

impl Steering {
    pub fn compute<H>(flock: &[Boid<H>], index: usize, config: &FlockConfig) -> Self {
        let boid = &flock[index];
        let near = neighbors(flock, index, config.perception_radius);

        Self {
            separation: separation(boid, near.clone(), config),
            alignment: alignment(boid, near.clone(), config),
            cohesion: cohesion(boid, near, config),
        }
    }

    pub fn weighted(&self, config: &FlockConfig) -> Vector2D {
        self.separation * config.separation_weight
            + self.alignment * config.alignment_weight
            + self.cohesion * config.cohesion_weight
    }
}

/// Push away from neighbors, each offset divided by its raw distance.
///
/// Coincident neighbors have no direction to push along and are skipped.
pub fn separation<'a, H: 'a, I>(boid: &Boid<H>, neighbors: I, config: &FlockConfig) -> Vector2D
where
    I: Iterator<Item = Neighbor<'a, H>>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for neighbor in neighbors {
        if neighbor.distance > 0.0 {
            sum += (boid.position - neighbor.boid.position) / neighbor.distance;
            count += 1;
        }
    }

    if count == 0 {
        return Vector2D::zero();
    }

    let desired = (sum / count as f32).set_magnitude(config.max_speed);
    (desired - boid.velocity).limit(config.max_force)
}

pub fn alignment<'a, H: 'a, I>(boid: &Boid<H>, neighbors: I, config: &FlockConfig) -> Vector2D
where
    I: Iterator<Item = Neighbor<'a, H>>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for neighbor in neighbors {
        sum += neighbor.boid.velocity;
        count += 1;
    }

    if count > 0 {
        let desired = (sum / count as f32).set_magnitude(config.max_speed);
        (desired - boid.velocity).limit(config.max_force)
    } else {
        Vector2D::zero()
    }
}

pub fn cohesion<'a, H: 'a, I>(boid: &Boid<H>, neighbors: I, config: &FlockConfig) -> Vector2D
where
    I: Iterator<Item = Neighbor<'a, H>>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for neighbor in neighbors {
        sum += neighbor.boid.position;
        count += 1;
    }

    if count > 0 {
        seek(boid, sum / count as f32, config)
    } else {
        Vector2D::zero()
    }
}

pub fn seek<H>(boid: &Boid<H>, target: Vector2D, config: &FlockConfig) -> Vector2D {
    let desired = (target - boid.position).set_magnitude(config.max_speed);
    (desired - boid.velocity).limit(config.max_force)
}
