// Helper functions for finding the canvas, sizing it, and wiring browser callbacks

use js_sys::Function;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, EventTarget, HtmlCanvasElement, HtmlScriptElement, Window,
};

use crate::config::AnimatorConfig;
use crate::error::{Error, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(Error::NoWindow)
}

pub fn document(window: &Window) -> Result<Document> {
    window.document().ok_or(Error::NoDocument)
}

pub fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| Error::ElementNotFound(id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| Error::NotACanvas(id.to_owned()))
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")?
        .ok_or(Error::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| Error::ContextUnavailable)
}

pub fn window_size(window: &Window) -> Result<(f64, f64)> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| Error::Js("innerWidth is not a number".into()))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| Error::Js("innerHeight is not a number".into()))?;
    Ok((width, height))
}

/// Match the canvas backing store to the window, returning the size actually set.
pub fn fit_canvas_to_window(window: &Window, canvas: &HtmlCanvasElement) -> Result<(f64, f64)> {
    let (width, height) = window_size(window)?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    Ok((canvas.width() as f64, canvas.height() as f64))
}

pub fn request_animation_frame(window: &Window, callback: &Function) -> Result<i32> {
    Ok(window.request_animation_frame(callback)?)
}

pub fn listen(target: &EventTarget, event: &str, callback: &Function) -> Result<()> {
    Ok(target.add_event_listener_with_callback(event, callback)?)
}

pub fn unlisten(target: &EventTarget, event: &str, callback: &Function) -> Result<()> {
    Ok(target.remove_event_listener_with_callback(event, callback)?)
}

/// Read a JSON config from a `<script type="application/json">` element.
/// A missing element is not an error; the caller falls back to defaults.
pub fn config_from_script(document: &Document, id: &str) -> Result<Option<AnimatorConfig>> {
    let element = match document.get_element_by_id(id) {
        Some(element) => element,
        None => return Ok(None),
    };
    let script: HtmlScriptElement = element
        .dyn_into()
        .map_err(|_| Error::Js(format!("element '{}' is not a script", id)))?;
    let text = script.text()?;
    AnimatorConfig::from_json(&text).map(Some)
}
