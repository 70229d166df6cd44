// Frame loop for the animator.
//
// `LoopControl` owns the run flag that every tick checks, so the loop can be
// torn down from outside instead of rescheduling forever. In the browser,
// `AnimationHandle` drives ticks from `requestAnimationFrame` and shares
// the resize and pointer listeners feeding the animator.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::animator::ParticleAnimator;
use crate::dom_helpers;
use crate::error::Result;
use crate::renderer::Surface;
use crate::utils::Timer;

/// Shared run flag and frame counter. Clones observe the same loop.
#[derive(Clone, Debug)]
pub struct LoopControl {
    running: Rc<Cell<bool>>,
    frames: Rc<Cell<u64>>,
}

impl Default for LoopControl {
    fn default() -> Self {
        LoopControl::new()
    }
}

impl LoopControl {
    pub fn new() -> Self {
        LoopControl {
            running: Rc::new(Cell::new(true)),
            frames: Rc::new(Cell::new(0)),
        }
    }

    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn frames(&self) -> u64 {
        self.frames.get()
    }

    /// Run one frame if the loop is still live.
    ///
    /// Returns whether the host should schedule another tick.
    pub fn tick<S: Surface + ?Sized>(
        &self,
        animator: &mut ParticleAnimator,
        surface: &mut S,
    ) -> Result<bool> {
        if !self.is_running() {
            return Ok(false);
        }
        animator.frame(surface)?;
        self.frames.set(self.frames.get() + 1);
        Ok(true)
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct Listeners {
    resize: Closure<dyn FnMut()>,
    pointer: Closure<dyn FnMut(MouseEvent)>,
}

// Held by the handle and by the frame closure, so the listeners live exactly
// as long as the loop, whether or not the handle is still around
type SharedListeners = Rc<RefCell<Option<Listeners>>>;

fn detach(window: &Window, canvas: &HtmlCanvasElement, listeners: &SharedListeners) {
    let listeners = match listeners.borrow_mut().take() {
        Some(listeners) => listeners,
        None => return,
    };
    if let Err(e) = dom_helpers::unlisten(
        window,
        "resize",
        listeners.resize.as_ref().unchecked_ref(),
    ) {
        warn!("particles: {}", e);
    }
    if let Err(e) = dom_helpers::unlisten(
        canvas,
        "mousemove",
        listeners.pointer.as_ref().unchecked_ref(),
    ) {
        warn!("particles: {}", e);
    }
}

/// A running backdrop. Call `stop()` to cancel the pending frame and detach
/// every listener. Dropping the handle without stopping leaves the animation,
/// resize and pointer tracking included, running for the life of the page.
#[wasm_bindgen]
pub struct AnimationHandle {
    control: LoopControl,
    animator: Rc<RefCell<ParticleAnimator>>,
    window: Window,
    canvas: HtmlCanvasElement,
    frame: FrameCallback,
    frame_id: Rc<Cell<Option<i32>>>,
    listeners: SharedListeners,
}

#[wasm_bindgen]
impl AnimationHandle {
    pub fn stop(&mut self) {
        if self.frame.borrow().is_none() {
            return;
        }
        self.control.stop();

        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                warn!("particles: cancelAnimationFrame failed: {:?}", e);
            }
        }
        detach(&self.window, &self.canvas, &self.listeners);
        // breaks the frame closure's reference to itself
        self.frame.borrow_mut().take();

        info!("particles: stopped after {} frames", self.control.frames());
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Whether the resize and pointer listeners are still attached.
    pub fn is_listening(&self) -> bool {
        self.listeners.borrow().is_some()
    }

    pub fn frames(&self) -> f64 {
        self.control.frames() as f64
    }

    pub fn particle_count(&self) -> usize {
        self.animator.borrow().particle_count()
    }
}

pub(crate) fn run(
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    animator: ParticleAnimator,
) -> Result<AnimationHandle> {
    let profile = animator.config().profile_frames;
    let animator = Rc::new(RefCell::new(animator));
    let control = LoopControl::new();
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let (animator_resize, canvas_resize, window_resize) =
        (animator.clone(), canvas.clone(), window.clone());
    let resize: Closure<dyn FnMut()> = Closure::new(move || {
        match dom_helpers::fit_canvas_to_window(&window_resize, &canvas_resize) {
            Ok((width, height)) => {
                animator_resize.borrow_mut().resize(width, height);
                debug!("particles: resized to {}x{}", width, height);
            }
            Err(e) => warn!("particles: resize ignored: {}", e),
        }
    });
    dom_helpers::listen(&window, "resize", resize.as_ref().unchecked_ref())?;

    let animator_pointer = animator.clone();
    let pointer: Closure<dyn FnMut(MouseEvent)> = Closure::new(move |ev: MouseEvent| {
        animator_pointer
            .borrow_mut()
            .pointer_moved(ev.client_x() as f64, ev.client_y() as f64);
    });
    dom_helpers::listen(&canvas, "mousemove", pointer.as_ref().unchecked_ref())?;

    let listeners: SharedListeners = Rc::new(RefCell::new(Some(Listeners { resize, pointer })));

    let (animator_anim, control_anim, frame_inner, frame_id_anim) = (
        animator.clone(),
        control.clone(),
        frame.clone(),
        frame_id.clone(),
    );
    let (window_anim, canvas_anim, listeners_anim) =
        (window.clone(), canvas.clone(), listeners.clone());
    let mut ctx = ctx;
    *frame.borrow_mut() = Some(Closure::new(move || {
        frame_id_anim.set(None);
        let ticked = {
            let _timer = if profile {
                Some(Timer::new("ParticleAnimator::frame"))
            } else {
                None
            };
            control_anim.tick(&mut animator_anim.borrow_mut(), &mut ctx)
        };
        match ticked {
            Ok(true) => {
                if let Some(ref cb) = *frame_inner.borrow() {
                    match dom_helpers::request_animation_frame(
                        &window_anim,
                        cb.as_ref().unchecked_ref(),
                    ) {
                        Ok(id) => frame_id_anim.set(Some(id)),
                        Err(e) => {
                            error!("particles: could not schedule next frame: {}", e);
                            control_anim.stop();
                            detach(&window_anim, &canvas_anim, &listeners_anim);
                        }
                    }
                }
            }
            Ok(false) => detach(&window_anim, &canvas_anim, &listeners_anim),
            Err(e) => {
                error!("particles: frame failed, stopping: {}", e);
                control_anim.stop();
                detach(&window_anim, &canvas_anim, &listeners_anim);
            }
        }
    }));
    if let Some(ref cb) = *frame.borrow() {
        frame_id.set(Some(dom_helpers::request_animation_frame(
            &window,
            cb.as_ref().unchecked_ref(),
        )?));
    }

    Ok(AnimationHandle {
        control,
        animator,
        window,
        canvas,
        frame,
        frame_id,
        listeners,
    })
}
