//! The 2D particle field.
//!
//! A bounded swarm of point-mass particles that bounce off the viewport
//! edges, scatter away from the pointer, and exchange elastic impulses when
//! they touch. Pairing is brute force over the full population; the
//! population is capped small enough that no spatial structure is needed.
//!
//! The step uses a unit timestep per frame with no delta-time scaling, so
//! the motion is frame-rate dependent on purpose: the field is a decoration
//! paced by the compositor, not a physics integration.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Tunable parameters for the field.
#[derive(Debug, Clone)]
pub struct FieldParams {
    /// Particles per square unit of viewport area.
    pub density: f64,
    /// Hard cap on the population regardless of viewport size.
    pub max_particles: usize,
    /// Disc radius; twice this is the collision distance.
    pub particle_radius: f32,
    /// Pointer influence radius.
    pub avoidance_radius: f32,
    /// Velocity added per frame while inside the avoidance radius.
    pub avoidance_strength: f32,
    /// Maximum distance at which two particles get a connecting line.
    pub link_distance: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            density: 5e-6,
            max_particles: 1024,
            particle_radius: 2.0,
            avoidance_radius: 48.0,
            avoidance_strength: 0.5,
            link_distance: 1020.0,
        }
    }
}

/// A single point mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// The particle swarm for one viewport.
pub struct ParticleField {
    params: FieldParams,
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    rng: SmallRng,
}

impl ParticleField {
    /// Build a field for the given viewport, spawning the full population.
    pub fn new(width: f32, height: f32, params: FieldParams) -> Self {
        let mut field = Self {
            params,
            width,
            height,
            particles: Vec::new(),
            rng: SmallRng::from_entropy(),
        };
        field.respawn();
        field
    }

    /// Population for a viewport: `min(floor(density × area), cap)`.
    pub fn target_population(width: f32, height: f32, params: &FieldParams) -> usize {
        let area = f64::from(width) * f64::from(height);
        let count = (params.density * area).floor().max(0.0) as usize;
        count.min(params.max_particles)
    }

    /// Rebuild the population wholesale for a new viewport size.
    ///
    /// The count is always recomputed from scratch, never adjusted
    /// incrementally.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.respawn();
    }

    fn respawn(&mut self) {
        let count = Self::target_population(self.width, self.height, &self.params);
        log::debug!(
            "spawning {} particles for {}x{}",
            count,
            self.width,
            self.height
        );
        self.particles.clear();
        for _ in 0..count {
            let particle = spawn(&mut self.rng, self.width, self.height);
            self.particles.push(particle);
        }
    }

    /// Advance every particle by one frame.
    ///
    /// Per particle, in order: boundary reflection, pointer avoidance,
    /// pairwise collision against the whole collection, then integration.
    /// `pointer` is the last known pointer position; `None` (no pointer
    /// event yet) skips the avoidance term entirely.
    pub fn step(&mut self, pointer: Option<Vec2>) {
        let min_dist = 2.0 * self.params.particle_radius;
        for i in 0..self.particles.len() {
            let (head, tail) = self.particles.split_at_mut(i);
            let Some((p, rest)) = tail.split_first_mut() else {
                break;
            };

            reflect_into_bounds(p, self.width, self.height);

            if let Some(pointer) = pointer {
                let away = p.position - pointer;
                let distance = away.length();
                if distance > 0.0 && distance < self.params.avoidance_radius {
                    p.velocity += away / distance * self.params.avoidance_strength;
                }
            }

            for q in head.iter_mut().chain(rest.iter_mut()) {
                collide(p, q, min_dist);
            }

            p.position += p.velocity;
        }
    }

    /// Endpoint pairs for the proximity connecting lines, each unordered
    /// pair at most once.
    pub fn links(&self) -> Vec<[Vec2; 2]> {
        let mut segments = Vec::new();
        for (i, p) in self.particles.iter().enumerate() {
            for q in &self.particles[i + 1..] {
                if p.position.distance(q.position) < self.params.link_distance {
                    segments.push([p.position, q.position]);
                }
            }
        }
        segments
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

fn spawn(rng: &mut SmallRng, width: f32, height: f32) -> Particle {
    Particle {
        position: Vec2::new(rng.gen::<f32>() * width, rng.gen::<f32>() * height),
        velocity: Vec2::new(
            (rng.gen::<f32>() - 0.5) * 2.0,
            (rng.gen::<f32>() - 0.5) * 2.0,
        ),
    }
}

/// Reflect the velocity component whose position coordinate left the
/// viewport, and clamp the position back into bounds.
fn reflect_into_bounds(p: &mut Particle, width: f32, height: f32) {
    if p.position.x <= 0.0 || p.position.x >= width {
        p.velocity.x = -p.velocity.x;
        p.position.x = p.position.x.clamp(0.0, width);
    }
    if p.position.y <= 0.0 || p.position.y >= height {
        p.velocity.y = -p.velocity.y;
        p.position.y = p.position.y.clamp(0.0, height);
    }
}

/// Equal-mass elastic impulse between two touching particles.
///
/// `normal` points from `p` toward `q`; the approach speed is the relative
/// velocity projected onto it, negative while the pair closes in. Only a
/// closing pair gets the impulse, so a pair already pushed apart earlier in
/// the same frame is left alone.
fn collide(p: &mut Particle, q: &mut Particle, min_dist: f32) {
    let delta = q.position - p.position;
    let distance = delta.length();
    if distance <= 0.0 || distance >= min_dist {
        return;
    }
    let normal = delta / distance;
    let approach = (q.velocity - p.velocity).dot(normal);
    if approach >= 0.0 {
        return;
    }
    p.velocity += approach * normal;
    q.velocity -= approach * normal;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_particle_field() -> ParticleField {
        let mut field = ParticleField::new(1000.0, 1000.0, FieldParams::default());
        field.particles_mut().copy_from_slice(&[
            Particle {
                position: Vec2::new(100.0, 100.0),
                velocity: Vec2::ZERO,
            },
            Particle {
                position: Vec2::new(500.0, 500.0),
                velocity: Vec2::ZERO,
            },
            Particle {
                position: Vec2::new(600.0, 500.0),
                velocity: Vec2::ZERO,
            },
            Particle {
                position: Vec2::new(700.0, 500.0),
                velocity: Vec2::ZERO,
            },
            Particle {
                position: Vec2::new(800.0, 500.0),
                velocity: Vec2::ZERO,
            },
        ]);
        field
    }

    #[test]
    fn population_follows_density_and_cap() {
        let params = FieldParams::default();
        assert_eq!(ParticleField::target_population(1000.0, 1000.0, &params), 5);
        assert_eq!(
            ParticleField::target_population(20000.0, 20000.0, &params),
            1024
        );
        assert_eq!(ParticleField::target_population(0.0, 0.0, &params), 0);
    }

    #[test]
    fn resize_rebuilds_population_wholesale() {
        let mut field = ParticleField::new(1000.0, 1000.0, FieldParams::default());
        assert_eq!(field.particles().len(), 5);

        field.resize(2000.0, 1000.0);
        assert_eq!(field.particles().len(), 10);

        field.resize(100.0, 100.0);
        assert_eq!(field.particles().len(), 0);
    }

    #[test]
    fn boundary_handling_puts_positions_in_bounds() {
        let (w, h) = (1000.0, 800.0);
        for &x in &[-250.0, -0.1, 0.0, 12.5, 999.9, 1000.0, 1730.0] {
            for &y in &[-90.0, 0.0, 400.0, 800.0, 2000.0] {
                let mut p = Particle {
                    position: Vec2::new(x, y),
                    velocity: Vec2::new(-3.0, 7.0),
                };
                reflect_into_bounds(&mut p, w, h);
                assert!(p.position.x >= 0.0 && p.position.x <= w);
                assert!(p.position.y >= 0.0 && p.position.y <= h);
            }
        }
    }

    #[test]
    fn boundary_reflection_clamps_and_negates() {
        let mut p = Particle {
            position: Vec2::new(-5.0, 30.0),
            velocity: Vec2::new(-2.0, 1.0),
        };
        reflect_into_bounds(&mut p, 100.0, 100.0);
        assert_eq!(p.position, Vec2::new(0.0, 30.0));
        assert_eq!(p.velocity, Vec2::new(2.0, 1.0));

        let mut q = Particle {
            position: Vec2::new(50.0, 120.0),
            velocity: Vec2::new(0.5, 3.0),
        };
        reflect_into_bounds(&mut q, 100.0, 100.0);
        assert_eq!(q.position, Vec2::new(50.0, 100.0));
        assert_eq!(q.velocity, Vec2::new(0.5, -3.0));
    }

    #[test]
    fn collision_conserves_momentum() {
        let mut p = Particle {
            position: Vec2::new(0.0, 0.0),
            velocity: Vec2::new(1.5, 0.2),
        };
        let mut q = Particle {
            position: Vec2::new(3.0, 0.0),
            velocity: Vec2::new(-0.5, -0.1),
        };
        let before = p.velocity + q.velocity;
        collide(&mut p, &mut q, 4.0);
        let after = p.velocity + q.velocity;
        assert!((before - after).length() < 1e-6);
        // The pair actually exchanged something.
        assert!(p.velocity.x < 1.5);
        assert!(q.velocity.x > -0.5);
    }

    #[test]
    fn head_on_equal_mass_collision_swaps_normal_velocities() {
        let mut p = Particle {
            position: Vec2::new(0.0, 0.0),
            velocity: Vec2::new(1.0, 0.0),
        };
        let mut q = Particle {
            position: Vec2::new(2.0, 0.0),
            velocity: Vec2::new(-1.0, 0.0),
        };
        collide(&mut p, &mut q, 4.0);
        assert!((p.velocity.x - -1.0).abs() < 1e-6);
        assert!((q.velocity.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn receding_pairs_are_unaffected() {
        let mut p = Particle {
            position: Vec2::new(0.0, 0.0),
            velocity: Vec2::new(-1.0, 0.0),
        };
        let mut q = Particle {
            position: Vec2::new(2.0, 0.0),
            velocity: Vec2::new(1.0, 0.0),
        };
        collide(&mut p, &mut q, 4.0);
        assert_eq!(p.velocity, Vec2::new(-1.0, 0.0));
        assert_eq!(q.velocity, Vec2::new(1.0, 0.0));

        // Stationary overlap is also left alone.
        let mut a = Particle {
            position: Vec2::new(0.0, 0.0),
            velocity: Vec2::ZERO,
        };
        let mut b = Particle {
            position: Vec2::new(1.0, 0.0),
            velocity: Vec2::ZERO,
        };
        collide(&mut a, &mut b, 4.0);
        assert_eq!(a.velocity, Vec2::ZERO);
        assert_eq!(b.velocity, Vec2::ZERO);
    }

    #[test]
    fn coincident_particles_do_not_produce_nan() {
        let mut p = Particle {
            position: Vec2::new(5.0, 5.0),
            velocity: Vec2::new(1.0, 0.0),
        };
        let mut q = p;
        collide(&mut p, &mut q, 4.0);
        assert!(p.velocity.is_finite());
        assert!(q.velocity.is_finite());
    }

    #[test]
    fn avoidance_pushes_away_from_pointer() {
        let mut field = five_particle_field();
        field.particles_mut()[0] = Particle {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::ZERO,
        };
        field.step(Some(Vec2::new(110.0, 100.0)));
        // Pointer sits to the right within the avoidance radius, so the
        // particle picks up leftward velocity.
        assert!(field.particles()[0].velocity.x < 0.0);
    }

    #[test]
    fn no_pointer_means_no_avoidance_and_no_nan() {
        let mut field = five_particle_field();
        field.step(None);
        for p in field.particles() {
            assert!(p.position.is_finite());
            assert!(p.velocity.is_finite());
        }
        assert_eq!(field.particles()[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let mut field = five_particle_field();
        field.step(Some(Vec2::new(100.0 + 48.0, 100.0)));
        assert_eq!(field.particles()[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn links_pair_each_close_pair_once() {
        let mut field = ParticleField::new(1000.0, 1000.0, FieldParams::default());
        let n = field.particles().len();
        // Default viewport keeps everything within the link distance.
        for p in field.particles_mut().iter_mut() {
            p.position = Vec2::new(500.0, 500.0);
        }
        assert_eq!(field.links().len(), n * (n - 1) / 2);
    }
}
