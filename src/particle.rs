// Simple particle struct to keep track of individual position, velocity, and look

use rand::Rng;
use vecmath::{vec2_add, vec2_len, vec2_sub};

use crate::color::Hsl;
use crate::config::SpawnConfig;
use crate::pointer::PointerState;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub size: f64,
    pub opacity: f64,
    pub hue: f64,
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], size: f64, opacity: f64, hue: f64) -> Particle {
        Particle {
            pos,
            vel,
            size,
            opacity,
            hue,
        }
    }

    // Uniform position over the canvas, everything else from the spawn ranges
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        spawn: &SpawnConfig,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * spawn.velocity_spread;
        let vel_y = (rng.gen::<f64>() - 0.5) * spawn.velocity_spread;
        let size = spawn.size.sample(rng);
        let opacity = spawn.opacity.sample(rng);
        let hue = spawn.hue.sample(rng);
        Particle::new([pos_x, pos_y], [vel_x, vel_y], size, opacity, hue)
    }

    pub fn integrate(&mut self) {
        self.pos = vec2_add(self.pos, self.vel);
    }

    /// Push the particle away from the pointer, harder the closer it is.
    ///
    /// Nothing happens outside `radius`, or when the pointer sits exactly on
    /// the particle (there is no direction to push in).
    pub fn repel_from(&mut self, pointer: &PointerState, radius: f64, strength: f64) {
        let to_pointer = vec2_sub(pointer.pos, self.pos);
        let distance = pointer.distance_to(self.pos);
        if distance >= radius || distance <= 0.0 {
            return;
        }
        let force = (radius - distance) / radius;
        self.vel[0] -= (to_pointer[0] / distance) * force * strength;
        self.vel[1] -= (to_pointer[1] / distance) * force * strength;
    }

    // Inverts velocity only; the position is left where it is
    pub fn reflect(&mut self, width: f64, height: f64) {
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] *= -1.0;
        }
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vec2_len(vec2_sub(self.pos, other.pos))
    }

    pub fn fill_style(&self, spawn: &SpawnConfig) -> String {
        Hsl::new(self.hue, spawn.saturation, spawn.lightness).to_css_with_alpha(self.opacity)
    }
}
