//! # Backdrop
//!
//! Ambient desktop visuals: a themed particle backdrop plus two small 3D
//! scene demos (a spinning textured cube and a draggable sun/earth/moon
//! orrery).
//!
//! The backdrop keeps a bounded swarm of 2D particles bouncing around the
//! window, scattering away from the pointer and linking nearby pairs with
//! faint lines. Colors follow a dark/light theme persisted across runs;
//! press `T` to toggle it.
//!
//! ## Quick start
//!
//! ```ignore
//! use backdrop::theme::FileThemeStore;
//!
//! fn main() -> Result<(), backdrop::BackdropError> {
//!     env_logger::init();
//!     let store = FileThemeStore::new(FileThemeStore::default_path());
//!     backdrop::window::run(Box::new(store))
//! }
//! ```
//!
//! ## Structure
//!
//! - [`field`] - the particle swarm: spawning, per-frame stepping, link
//!   pairing. Pure math, no GPU types.
//! - [`theme`] / [`visuals`] - theme resolution, persistence, and the
//!   per-theme palettes renderers consume.
//! - [`scene`] - transform state for the demo scenes, also pure math.
//! - [`gpu`] - wgpu plumbing: context setup and the disc, line, and mesh
//!   pipelines.
//! - [`input`] / [`time`] - pointer/key tracking, frame timing, the resize
//!   debounce, and the restartable loop guard.
//! - [`window`] - winit wiring for the backdrop itself; the demo scenes
//!   have their own launchers under `demos/`.

pub mod error;
pub mod field;
pub mod gpu;
pub mod input;
pub mod scene;
pub mod textures;
pub mod theme;
pub mod time;
pub mod visuals;
pub mod window;

pub use error::BackdropError;

// Math types used throughout the public API.
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::error::{BackdropError, GpuError, StorageError, TextureError};
    pub use crate::field::{FieldParams, Particle, ParticleField};
    pub use crate::gpu::{GpuContext, LinkPipeline, MeshPipeline, ParticlePipeline};
    pub use crate::input::Input;
    pub use crate::scene::{Orrery, SpinningCrate};
    pub use crate::textures::{AddressMode, FilterMode, TextureConfig};
    pub use crate::theme::{
        resolve_initial_theme, FileThemeStore, MemoryThemeStore, Theme, ThemeController,
        ThemeStore,
    };
    pub use crate::time::{Debounce, RestartableLoop, Time};
    pub use crate::visuals::Palette;
    pub use crate::{Mat4, Quat, Vec2, Vec3, Vec4};
}
