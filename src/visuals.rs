//! Per-theme rendering palettes.
//!
//! The particle field is purely decorative, but its colors follow the active
//! theme. Renderers take a [`Palette`] explicitly each frame instead of
//! reading theme state from anywhere global.

use glam::Vec4;

use crate::theme::Theme;

/// Colors used by the particle backdrop, RGBA in linear 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Surface clear color.
    pub background: Vec4,
    /// Particle disc fill.
    pub particle: Vec4,
    /// Proximity connecting lines. Alpha carries the line opacity.
    pub link: Vec4,
}

impl Palette {
    /// White discs and faint white lines on near-black.
    pub fn dark() -> Self {
        Self {
            background: Vec4::new(0.02, 0.02, 0.05, 1.0),
            particle: Vec4::new(1.0, 1.0, 1.0, 1.0),
            link: Vec4::new(1.0, 1.0, 1.0, 0.2),
        }
    }

    /// Red discs and fainter red lines on near-white.
    pub fn light() -> Self {
        Self {
            background: Vec4::new(0.97, 0.97, 0.95, 1.0),
            particle: Vec4::new(1.0, 0.0, 0.0, 1.0),
            link: Vec4::new(1.0, 0.0, 0.0, 0.1),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_lines_are_fainter_than_discs() {
        for palette in [Palette::dark(), Palette::light()] {
            assert!(palette.link.w < palette.particle.w);
        }
    }

    #[test]
    fn palettes_follow_theme() {
        assert_eq!(Palette::for_theme(Theme::Dark), Palette::dark());
        assert_eq!(Palette::for_theme(Theme::Light), Palette::light());
    }
}
