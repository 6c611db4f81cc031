//! Demo scene state.
//!
//! Both demo scenes are a handful of transform values advanced by fixed
//! per-frame increments; everything here is plain math over glam types so
//! the motion can be tested without a window or a GPU. Drawing lives in
//! [`crate::gpu::mesh`].

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// Per-frame rotation increment shared by both crate-cube axes.
pub const CRATE_SPIN: f32 = 0.01;

/// Per-frame yaw increments for the orrery: whole system, earth mount,
/// moon mount.
pub const SYSTEM_SPIN: f32 = 0.01;
pub const EARTH_SPIN: f32 = 0.02;
pub const MOON_SPIN: f32 = 0.03;

/// Orbital offsets and body radii.
pub const SUN_RADIUS: f32 = 5.0;
pub const EARTH_RADIUS: f32 = 2.0;
pub const MOON_RADIUS: f32 = 1.0;
pub const EARTH_OFFSET: f32 = 10.0;
pub const MOON_OFFSET: f32 = 4.0;

/// Shared projection for both demo cameras.
pub fn projection(aspect: f32) -> Mat4 {
    Mat4::perspective_rh(75.0_f32.to_radians(), aspect, 0.1, 1000.0)
}

/// A cube slowly tumbling on two axes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinningCrate {
    pub pitch: f32,
    pub yaw: f32,
}

impl SpinningCrate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame.
    pub fn advance(&mut self) {
        self.pitch += CRATE_SPIN;
        self.yaw += CRATE_SPIN;
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }

    /// Fixed camera five units back on the z axis.
    pub fn view() -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0))
    }
}

/// World transforms for the three orrery bodies, unscaled.
#[derive(Debug, Clone, Copy)]
pub struct BodyTransforms {
    pub sun: Mat4,
    pub earth: Mat4,
    pub moon: Mat4,
}

/// Sun, earth, and moon on nested spinning mounts, with a pointer-drag
/// orientation applied outermost.
///
/// The earth sits on a mount offset from the sun; spinning that mount
/// carries the moon's mount (offset from the earth) around it. The moon's
/// own mount spin turns it in place.
#[derive(Debug, Clone, Copy)]
pub struct Orrery {
    /// Accumulated pointer-drag orientation, applied outside everything.
    drag: Quat,
    system_yaw: f32,
    earth_yaw: f32,
    moon_yaw: f32,
}

impl Default for Orrery {
    fn default() -> Self {
        Self {
            drag: Quat::IDENTITY,
            system_yaw: 0.0,
            earth_yaw: 0.0,
            moon_yaw: 0.0,
        }
    }
}

impl Orrery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame.
    pub fn advance(&mut self) {
        self.system_yaw += SYSTEM_SPIN;
        self.earth_yaw += EARTH_SPIN;
        self.moon_yaw += MOON_SPIN;
    }

    /// Fold a pointer drag into the accumulated orientation.
    ///
    /// Pixel deltas map to degrees: vertical movement pitches, horizontal
    /// movement yaws. The new rotation is premultiplied so the drag always
    /// acts in view space, not in the already-rotated system frame.
    pub fn drag(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            delta.y.to_radians(),
            delta.x.to_radians(),
            0.0,
        );
        self.drag = rotation * self.drag;
    }

    pub fn orientation(&self) -> Quat {
        self.drag
    }

    /// World transforms of all bodies, before per-body radius scaling.
    pub fn body_transforms(&self) -> BodyTransforms {
        let root = Mat4::from_quat(self.drag) * Mat4::from_rotation_y(self.system_yaw);
        let sun = root;
        let earth = root
            * Mat4::from_translation(Vec3::new(EARTH_OFFSET, 0.0, 0.0))
            * Mat4::from_rotation_y(self.earth_yaw);
        let moon = earth
            * Mat4::from_translation(Vec3::new(MOON_OFFSET, 0.0, 0.0))
            * Mat4::from_rotation_y(self.moon_yaw);
        BodyTransforms { sun, earth, moon }
    }

    /// Fixed camera slightly left of center, thirty units back.
    pub fn view() -> Mat4 {
        Mat4::from_translation(Vec3::new(3.0, 0.0, -30.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translation(m: Mat4) -> Vec3 {
        m.w_axis.truncate()
    }

    #[test]
    fn crate_advance_accumulates_both_axes() {
        let mut cube = SpinningCrate::new();
        for _ in 0..10 {
            cube.advance();
        }
        assert!((cube.pitch - 0.1).abs() < 1e-6);
        assert!((cube.yaw - 0.1).abs() < 1e-6);
    }

    #[test]
    fn orrery_spins_at_fixed_rates() {
        let mut orrery = Orrery::new();
        for _ in 0..100 {
            orrery.advance();
        }
        assert!((orrery.system_yaw - 1.0).abs() < 1e-4);
        assert!((orrery.earth_yaw - 2.0).abs() < 1e-4);
        assert!((orrery.moon_yaw - 3.0).abs() < 1e-4);
    }

    #[test]
    fn sun_stays_at_origin() {
        let mut orrery = Orrery::new();
        orrery.advance();
        orrery.drag(Vec2::new(40.0, -25.0));
        let transforms = orrery.body_transforms();
        assert!(translation(transforms.sun).length() < 1e-5);
    }

    #[test]
    fn earth_keeps_its_orbital_distance() {
        let mut orrery = Orrery::new();
        for _ in 0..50 {
            orrery.advance();
        }
        orrery.drag(Vec2::new(15.0, 75.0));
        let transforms = orrery.body_transforms();
        let earth = translation(transforms.earth);
        assert!((earth.length() - EARTH_OFFSET).abs() < 1e-4);
    }

    #[test]
    fn moon_orbits_the_earth() {
        let mut orrery = Orrery::new();
        let mut previous = None;
        for _ in 0..30 {
            orrery.advance();
            let transforms = orrery.body_transforms();
            let earth = translation(transforms.earth);
            let moon = translation(transforms.moon);
            assert!((moon.distance(earth) - MOON_OFFSET).abs() < 1e-4);
            // The earth's mount spin actually moves the moon around it.
            let relative = moon - earth;
            if let Some(prev) = previous {
                assert!(relative.distance(prev) > 1e-4);
            }
            previous = Some(relative);
        }
    }

    #[test]
    fn zero_drag_is_identity() {
        let mut orrery = Orrery::new();
        orrery.drag(Vec2::ZERO);
        assert_eq!(orrery.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn drags_compose_with_the_newest_outermost() {
        let mut orrery = Orrery::new();
        orrery.drag(Vec2::new(90.0, 0.0));
        orrery.drag(Vec2::new(0.0, 90.0));

        let first = Quat::from_euler(EulerRot::XYZ, 0.0, 90.0_f32.to_radians(), 0.0);
        let second = Quat::from_euler(EulerRot::XYZ, 90.0_f32.to_radians(), 0.0, 0.0);
        let expected = second * first;
        assert!(orrery.orientation().abs_diff_eq(expected, 1e-5));
    }
}
