// Animated particle backdrop for a canvas element.
//
// Particles drift across the canvas, bounce off its edges, shy away from the
// pointer, and are joined by faint lines when close to each other. The
// simulation (`ParticleAnimator`) is plain Rust drawing onto any `Surface`;
// the exports here bind it to a page's `<canvas>` via wasm-bindgen.

mod utils;

pub mod animation;
pub mod animator;
pub mod color;
pub mod config;
pub mod dom_helpers;
pub mod error;
pub mod particle;
pub mod pointer;
pub mod renderer;

use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

pub use animation::{AnimationHandle, LoopControl};
pub use animator::ParticleAnimator;
pub use config::AnimatorConfig;
pub use error::{Error, Result};
pub use particle::Particle;
pub use pointer::PointerState;
pub use renderer::{DrawCommand, RecordingSurface, Surface};

/// Id of the optional `<script type="application/json">` holding overrides.
pub const CONFIG_SCRIPT_ID: &str = "particle-config";

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging();
}

/// Start the backdrop on the canvas with id `canvas_id`, using the page's
/// `particle-config` script if there is one.
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> std::result::Result<AnimationHandle, JsValue> {
    let window = dom_helpers::window()?;
    let document = dom_helpers::document(&window)?;
    let config = match dom_helpers::config_from_script(&document, CONFIG_SCRIPT_ID) {
        Ok(Some(config)) => config,
        Ok(None) => AnimatorConfig::default(),
        Err(e) => {
            warn!("particles: {}; using defaults", e);
            AnimatorConfig::default()
        }
    };
    Ok(start_on(&window, &document, canvas_id, config)?)
}

#[wasm_bindgen]
pub fn start_with_config(
    canvas_id: &str,
    config_json: &str,
) -> std::result::Result<AnimationHandle, JsValue> {
    let config = AnimatorConfig::from_json(config_json)?;
    let window = dom_helpers::window()?;
    let document = dom_helpers::document(&window)?;
    Ok(start_on(&window, &document, canvas_id, config)?)
}

fn start_on(
    window: &Window,
    document: &Document,
    canvas_id: &str,
    config: AnimatorConfig,
) -> Result<AnimationHandle> {
    for warning in config.validate() {
        warn!("particles: config: {}", warning);
    }

    let canvas = dom_helpers::canvas_by_id(document, canvas_id)?;
    // size first, the population is derived from it
    let (width, height) = dom_helpers::fit_canvas_to_window(window, &canvas)?;
    let ctx = dom_helpers::context_2d(&canvas)?;

    let animator = ParticleAnimator::new(config, width, height, &mut rand::thread_rng());
    info!(
        "particles: spawned {} particles on {}x{} canvas '{}'",
        animator.particle_count(),
        width,
        height,
        canvas_id
    );

    animation::run(window.clone(), canvas, ctx, animator)
}
