// Last known pointer position, in canvas coordinates.
// Written by pointer-move events, read once per frame by the animator.

use vecmath::{vec2_len, vec2_sub};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    pub pos: [f64; 2],
}

impl PointerState {
    pub fn at(x: f64, y: f64) -> Self {
        PointerState { pos: [x, y] }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pos = [x, y];
    }

    pub fn distance_to(&self, point: [f64; 2]) -> f64 {
        vec2_len(vec2_sub(point, self.pos))
    }
}
