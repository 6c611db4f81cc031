//! Integration tests for the particle field and theme flow, exercised
//! through the public API.

use backdrop::field::{FieldParams, Particle, ParticleField};
use backdrop::theme::{resolve_initial_theme, MemoryThemeStore, Theme, ThemeController};
use backdrop::time::RestartableLoop;
use backdrop::Vec2;

#[test]
fn population_matches_density_and_cap() {
    let params = FieldParams::default();
    // 5e-6 particles per square unit over a megapixel viewport.
    assert_eq!(
        ParticleField::target_population(1000.0, 1000.0, &params),
        5
    );
    // A huge viewport is capped, not two million particles.
    assert_eq!(
        ParticleField::target_population(20000.0, 20000.0, &params),
        1024
    );

    let field = ParticleField::new(20000.0, 20000.0, params);
    assert_eq!(field.particles().len(), 1024);
}

#[test]
fn spawned_particles_start_inside_the_viewport() {
    let field = ParticleField::new(4000.0, 3000.0, FieldParams::default());
    assert_eq!(field.particles().len(), 60);
    for p in field.particles() {
        assert!(p.position.x >= 0.0 && p.position.x <= 4000.0);
        assert!(p.position.y >= 0.0 && p.position.y <= 3000.0);
        assert!(p.velocity.x >= -1.0 && p.velocity.x <= 1.0);
        assert!(p.velocity.y >= -1.0 && p.velocity.y <= 1.0);
    }
}

#[test]
fn out_of_bounds_particle_reflects_back_in() {
    let mut field = ParticleField::new(1000.0, 1000.0, FieldParams::default());
    park_all(&mut field);
    field.particles_mut()[0] = Particle {
        position: Vec2::new(-10.0, 500.0),
        velocity: Vec2::new(-1.0, 0.0),
    };

    field.step(None);

    let p = field.particles()[0];
    assert_eq!(p.velocity, Vec2::new(1.0, 0.0));
    // Clamped to the edge, then integrated one frame inward.
    assert_eq!(p.position, Vec2::new(1.0, 500.0));
}

#[test]
fn colliding_pair_conserves_momentum_through_a_step() {
    let mut field = ParticleField::new(1000.0, 1000.0, FieldParams::default());
    park_all(&mut field);
    field.particles_mut()[0] = Particle {
        position: Vec2::new(500.0, 500.0),
        velocity: Vec2::new(0.8, 0.1),
    };
    field.particles_mut()[1] = Particle {
        position: Vec2::new(503.0, 500.0),
        velocity: Vec2::new(-0.6, 0.0),
    };

    let before: Vec2 = field.particles()[..2]
        .iter()
        .map(|p| p.velocity)
        .sum();
    field.step(None);
    let after: Vec2 = field.particles()[..2]
        .iter()
        .map(|p| p.velocity)
        .sum();

    assert!((before - after).length() < 1e-5);
}

#[test]
fn receding_pair_passes_through_a_step_untouched() {
    let mut field = ParticleField::new(1000.0, 1000.0, FieldParams::default());
    park_all(&mut field);
    field.particles_mut()[0] = Particle {
        position: Vec2::new(500.0, 500.0),
        velocity: Vec2::new(-0.5, 0.0),
    };
    field.particles_mut()[1] = Particle {
        position: Vec2::new(503.0, 500.0),
        velocity: Vec2::new(0.5, 0.0),
    };

    field.step(None);

    assert_eq!(field.particles()[0].velocity, Vec2::new(-0.5, 0.0));
    assert_eq!(field.particles()[1].velocity, Vec2::new(0.5, 0.0));
}

#[test]
fn theme_resolution_truth_table() {
    assert_eq!(resolve_initial_theme(Some(Theme::Dark), false), Theme::Dark);
    assert_eq!(resolve_initial_theme(Some(Theme::Dark), true), Theme::Dark);
    assert_eq!(resolve_initial_theme(None, true), Theme::Dark);
    assert_eq!(resolve_initial_theme(None, false), Theme::Light);
}

#[test]
fn toggle_round_trips_through_the_store() {
    let mut controller = ThemeController::new(Box::new(MemoryThemeStore::default()), true);
    assert_eq!(controller.current(), Theme::Dark);
    assert_eq!(controller.toggle().unwrap(), Theme::Light);
    assert_eq!(controller.toggle().unwrap(), Theme::Dark);
}

#[test]
fn resize_restart_leaves_one_live_loop() {
    let mut frame_loop = RestartableLoop::new();
    let initial = frame_loop.start();

    // Simulated debounced resize: restart before rebuilding the field.
    let after_resize = frame_loop.start();

    assert!(!frame_loop.is_current(initial));
    assert!(frame_loop.is_current(after_resize));
}

/// Scatter every particle far apart with zero velocity so individual tests
/// can stage exactly the interactions they want.
fn park_all(field: &mut ParticleField) {
    for (i, p) in field.particles_mut().iter_mut().enumerate() {
        p.position = Vec2::new(100.0 + 150.0 * i as f32, 100.0);
        p.velocity = Vec2::ZERO;
    }
}
