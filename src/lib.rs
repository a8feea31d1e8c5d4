//! Ambient "light orb" background for the portfolio page: translucent
//! gradient discs drifting over a canvas, bouncing off its edges and
//! shying away from the pointer.
//!
//! The physics lives in [`ParticleField`], which only needs a
//! [`DrawingSurface`]. [`AuroraCanvas`] and [`start_aurora`] bind it to a
//! browser canvas and the window's resize, pointer and animation-frame
//! signals.

mod app;
mod color;
mod config;
mod error;
mod field;
mod particle;
mod surface;
mod utils;

use wasm_bindgen::prelude::*;

pub use app::{start_aurora, AuroraCanvas, CONFIG_ATTRIBUTE};
pub use color::{default_palette, Color};
pub use config::FieldConfig;
pub use error::FieldError;
pub use field::{Bounds, ParticleField};
pub use particle::Particle;
pub use surface::{ColorStop, DrawingSurface};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Installs the panic hook and routes `log` output to the browser console.
/// Safe to call more than once.
#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    console_log::init_with_level(log::Level::Info).ok();
}
