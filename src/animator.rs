// The particle field: spawning, per-frame kinematics, and drawing.
//
// Population is fixed when the animator is created. Resizing only moves the
// bounds used for reflection; particles already outside the new bounds drift
// back on their own.

use rand::Rng;

use crate::config::AnimatorConfig;
use crate::error::Result;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::renderer::Surface;

/// `floor(width * height / density)`, zero for an empty canvas and never
/// more than `max`.
pub fn particle_count_for(width: f64, height: f64, density: f64, max: usize) -> usize {
    if width <= 0.0 || height <= 0.0 || density <= 0.0 {
        return 0;
    }
    let count = (width * height / density).floor();
    if count.is_nan() || count >= max as f64 {
        return max;
    }
    count as usize
}

pub struct ParticleAnimator {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: PointerState,
    config: AnimatorConfig,
}

impl ParticleAnimator {
    pub fn new<R: Rng + ?Sized>(
        config: AnimatorConfig,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> ParticleAnimator {
        let count = particle_count_for(width, height, config.density, config.max_particles);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::spawn(rng, width, height, &config.spawn));
        }
        ParticleAnimator::with_particles(config, width, height, particles)
    }

    /// Build from an explicit population, bypassing the density rule.
    pub fn with_particles(
        config: AnimatorConfig,
        width: f64,
        height: f64,
        particles: Vec<Particle>,
    ) -> ParticleAnimator {
        ParticleAnimator {
            width,
            height,
            particles,
            pointer: PointerState::default(),
            config,
        }
    }

    /// Advance every particle one step and draw the frame.
    ///
    /// Particles are processed in order; each one is moved, pushed by the
    /// pointer, reflected, drawn, and then linked to every later particle
    /// within range. Later particles have not moved yet when those links are
    /// measured.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<()> {
        surface.clear_rect(0.0, 0.0, self.width, self.height)?;

        let pointer = self.pointer;
        let repulsion = &self.config.repulsion;
        let links = &self.config.links;
        for i in 0..self.particles.len() {
            {
                let particle = &mut self.particles[i];
                particle.integrate();
                particle.repel_from(&pointer, repulsion.radius, repulsion.strength);
                particle.reflect(self.width, self.height);
            }

            let particle = &self.particles[i];
            surface.fill_circle(
                particle.pos,
                particle.size,
                &particle.fill_style(&self.config.spawn),
            )?;

            for other in &self.particles[i + 1..] {
                let distance = particle.distance_to(other);
                if distance < links.distance {
                    let style = links.color.to_css_with_alpha(links.alpha_at(distance));
                    surface.stroke_line(particle.pos, other.pos, &style, links.line_width)?;
                }
            }
        }
        Ok(())
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.move_to(x, y);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }
}
