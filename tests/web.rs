// Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;

use particle_backdrop::{
    dom_helpers, start, start_with_config, AnimatorConfig, Error, ParticleAnimator,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent};

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> HtmlCanvasElement {
    let document = dom_helpers::document(&dom_helpers::window().unwrap()).unwrap();
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn missing_canvas_is_reported() {
    let document = dom_helpers::document(&dom_helpers::window().unwrap()).unwrap();
    match dom_helpers::canvas_by_id(&document, "no-such-canvas") {
        Err(Error::ElementNotFound(id)) => assert_eq!(id, "no-such-canvas"),
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
    assert!(start("no-such-canvas").is_err());
}

#[wasm_bindgen_test]
fn draws_on_a_real_context() {
    let canvas = add_canvas("particles-draw");
    canvas.set_width(300);
    canvas.set_height(200);
    let mut ctx = dom_helpers::context_2d(&canvas).unwrap();
    let mut animator = ParticleAnimator::new(
        AnimatorConfig {
            density: 600.0,
            ..AnimatorConfig::default()
        },
        300.0,
        200.0,
        &mut rand::thread_rng(),
    );
    assert_eq!(animator.particle_count(), 100);
    animator.frame(&mut ctx).unwrap();
}

#[wasm_bindgen_test]
fn start_then_stop() {
    add_canvas("particles-run");
    let mut handle = start_with_config("particles-run", r#"{ "density": 50000 }"#).unwrap();
    assert!(handle.is_running());
    assert!(handle.is_listening());
    handle.stop();
    assert!(!handle.is_running());
    assert!(!handle.is_listening());
    // second stop is a no-op
    handle.stop();
    assert!(!handle.is_running());
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    add_canvas("particles-bad");
    assert!(start_with_config("particles-bad", "{ nope").is_err());
}

#[wasm_bindgen_test]
fn dropped_handle_keeps_listeners_alive() {
    let canvas = add_canvas("particles-dropped");
    let handle = start_with_config("particles-dropped", r#"{ "density": 50000 }"#).unwrap();
    assert!(handle.is_listening());
    drop(handle);

    // the resize listener must still run and refit the canvas
    let window = dom_helpers::window().unwrap();
    canvas.set_width(1);
    canvas.set_height(1);
    window
        .dispatch_event(&Event::new("resize").unwrap())
        .unwrap();
    let (width, height) = dom_helpers::window_size(&window).unwrap();
    assert_eq!(canvas.width(), width as u32);
    assert_eq!(canvas.height(), height as u32);

    canvas
        .dispatch_event(&MouseEvent::new("mousemove").unwrap())
        .unwrap();
}
