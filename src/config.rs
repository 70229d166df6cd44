// Tunables for the particle backdrop.
//
// Every field has a default matching the stock look of the page, so an empty
// JSON object (or no config at all) reproduces it exactly.

use rand::Rng;
use serde::Deserialize;

use crate::color::Color;
use crate::error::Result;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

impl SpawnRange<f64> {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen::<f64>() * (self.max - self.min) + self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Velocity components are `(rand - 0.5) * velocity_spread`.
    pub velocity_spread: f64,
    pub size: SpawnRange<f64>,
    pub opacity: SpawnRange<f64>,
    pub hue: SpawnRange<f64>,
    pub saturation: f64,
    pub lightness: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            velocity_spread: 0.8,
            size: SpawnRange::new(1.0, 4.0),
            opacity: SpawnRange::new(0.2, 0.8),
            hue: SpawnRange::new(180.0, 240.0),
            saturation: 70.0,
            lightness: 60.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RepulsionConfig {
    pub radius: f64,
    pub strength: f64,
}

impl Default for RepulsionConfig {
    fn default() -> Self {
        Self {
            radius: 120.0,
            strength: 0.02,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LinkConfig {
    pub distance: f64,
    pub max_alpha: f64,
    pub color: Color,
    pub line_width: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            distance: 120.0,
            max_alpha: 0.15,
            color: Color::from_u32(0x00f5ffff),
            line_width: 1.0,
        }
    }
}

impl LinkConfig {
    /// Stroke alpha for a pair `distance` apart; linear falloff reaching zero
    /// at the threshold.
    pub fn alpha_at(&self, distance: f64) -> f64 {
        self.max_alpha * (1.0 - distance / self.distance)
    }
}

// Below this a full-HD canvas already asks for thousands of particles
const MIN_SANE_DENSITY: f64 = 500.0;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Canvas area (in square drawing units) per spawned particle.
    pub density: f64,
    /// Hard ceiling on the population whatever the density works out to.
    pub max_particles: usize,
    pub spawn: SpawnConfig,
    pub repulsion: RepulsionConfig,
    pub links: LinkConfig,
    /// Wrap every frame in a `console.time` label.
    pub profile_frames: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            density: 12000.0,
            max_particles: 5000,
            spawn: SpawnConfig::default(),
            repulsion: RepulsionConfig::default(),
            links: LinkConfig::default(),
            profile_frames: false,
        }
    }
}

impl AnimatorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Suspicious values that are still usable. Logged with `warn!` on start.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.density <= 0.0 {
            w.push(format!(
                "density {} must be > 0; no particles will spawn",
                self.density
            ));
        } else if self.density < MIN_SANE_DENSITY {
            w.push(format!(
                "density {} very small; population capped at max_particles ({})",
                self.density, self.max_particles
            ));
        }
        if self.max_particles == 0 {
            w.push("max_particles is 0; nothing will spawn".into());
        } else if self.max_particles > 20_000 {
            w.push(format!(
                "max_particles {} very large; links are checked pairwise every frame",
                self.max_particles
            ));
        }
        if self.spawn.velocity_spread < 0.0 {
            w.push(format!(
                "spawn.velocity_spread {} negative; behaves like its absolute value",
                self.spawn.velocity_spread
            ));
        }
        let ranges = [
            ("spawn.size", &self.spawn.size),
            ("spawn.opacity", &self.spawn.opacity),
            ("spawn.hue", &self.spawn.hue),
        ];
        for (name, range) in ranges.iter() {
            if range.min > range.max {
                w.push(format!(
                    "{} inverted ({} > {})",
                    name, range.min, range.max
                ));
            }
        }
        if self.spawn.size.min <= 0.0 {
            w.push(format!(
                "spawn.size.min {} should be > 0; canvas rejects negative radii",
                self.spawn.size.min
            ));
        }
        if self.spawn.opacity.min <= 0.0 || self.spawn.opacity.max > 1.0 {
            w.push(format!(
                "spawn.opacity {}..{} outside (0, 1]",
                self.spawn.opacity.min, self.spawn.opacity.max
            ));
        }
        if self.repulsion.radius <= 0.0 {
            w.push("repulsion.radius <= 0; pointer has no effect".into());
        }
        if self.links.distance <= 0.0 {
            w.push("links.distance <= 0; no connections will be drawn".into());
        }
        if !(0.0..=1.0).contains(&self.links.max_alpha) {
            w.push(format!(
                "links.max_alpha {} outside 0..1",
                self.links.max_alpha
            ));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults_match_stock_look() {
        let cfg = AnimatorConfig::default();
        assert_eq!(cfg.density, 12000.0);
        assert_eq!(cfg.max_particles, 5000);
        assert_eq!(cfg.spawn.velocity_spread, 0.8);
        assert_eq!(cfg.spawn.size, SpawnRange::new(1.0, 4.0));
        assert_eq!(cfg.spawn.opacity, SpawnRange::new(0.2, 0.8));
        assert_eq!(cfg.spawn.hue, SpawnRange::new(180.0, 240.0));
        assert_eq!(cfg.repulsion.radius, 120.0);
        assert_eq!(cfg.repulsion.strength, 0.02);
        assert_eq!(cfg.links.distance, 120.0);
        assert_eq!(cfg.links.max_alpha, 0.15);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn empty_json_is_default() {
        let cfg = AnimatorConfig::from_json("{}").unwrap();
        assert_eq!(cfg, AnimatorConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let cfg = AnimatorConfig::from_json(
            r#"{ "density": 6000, "repulsion": { "radius": 80 }, "profile_frames": true }"#,
        )
        .unwrap();
        assert_eq!(cfg.density, 6000.0);
        assert_eq!(cfg.repulsion.radius, 80.0);
        assert_eq!(cfg.repulsion.strength, 0.02);
        assert!(cfg.profile_frames);
        assert_eq!(cfg.links, LinkConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AnimatorConfig::from_json("{ density: }").is_err());
    }

    #[test]
    fn link_alpha_falls_off_linearly() {
        let links = LinkConfig::default();
        assert!((links.alpha_at(0.0) - 0.15).abs() < 1e-12);
        assert!((links.alpha_at(60.0) - 0.075).abs() < 1e-12);
        assert_eq!(links.alpha_at(120.0), 0.0);
    }

    #[test]
    fn samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = SpawnRange::new(180.0, 240.0);
        for _ in 0..1000 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn validate_flags_tiny_density_and_huge_cap() {
        let cfg = AnimatorConfig {
            density: 1e-12,
            max_particles: 1_000_000,
            ..AnimatorConfig::default()
        };
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.starts_with("density 0.000000000001 very small")));
        assert!(warnings.iter().any(|w| w.starts_with("max_particles 1000000 very large")));
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn validate_detects_warnings() {
        let bad = AnimatorConfig {
            density: 0.0,
            max_particles: 0,
            spawn: SpawnConfig {
                velocity_spread: -1.0,
                size: SpawnRange::new(0.0, 4.0),
                opacity: SpawnRange::new(0.9, 0.1),
                hue: SpawnRange::new(240.0, 180.0),
                saturation: 70.0,
                lightness: 60.0,
            },
            repulsion: RepulsionConfig {
                radius: 0.0,
                strength: 0.02,
            },
            links: LinkConfig {
                distance: -1.0,
                max_alpha: 2.0,
                ..LinkConfig::default()
            },
            profile_frames: false,
        };
        let warnings = bad.validate();
        assert!(warnings.iter().any(|w| w.starts_with("density")));
        assert!(warnings.iter().any(|w| w.starts_with("max_particles is 0")));
        assert!(warnings.iter().any(|w| w.starts_with("spawn.velocity_spread")));
        assert!(warnings.iter().any(|w| w.starts_with("spawn.opacity inverted")));
        assert!(warnings.iter().any(|w| w.starts_with("spawn.hue inverted")));
        assert!(warnings.iter().any(|w| w.starts_with("spawn.size.min")));
        assert!(warnings.iter().any(|w| w.starts_with("repulsion.radius")));
        assert!(warnings.iter().any(|w| w.starts_with("links.distance")));
        assert!(warnings.iter().any(|w| w.starts_with("links.max_alpha")));
    }
}
