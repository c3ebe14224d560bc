//! Animation controller driving one or more Fourier loops.
//!
//! Owns the spectra and their discretized paths (built once at construction),
//! advances a normalized phase each frame, and issues the per-frame drawing
//! calls. All the old per-variant controllers collapse into this one type
//! plus a `ControllerConfig` preset.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;

use crate::params::{ControllerConfig, MarkerShape, OrientationSource};
use crate::spectrum::Spectrum;
use crate::surface::DrawSurface;

struct Entity {
    spectrum: Spectrum,
    path: Vec<Vec2>,
    /// Phase-0 position, used when re-anchoring the path to the local origin.
    start: Vec2,
    /// Orientation of the phase-0 velocity, in radians.
    start_angle: f32,
}

impl Entity {
    fn build(config: &ControllerConfig, rng: &mut impl Rng) -> Self {
        let spectrum = Spectrum::generate(&config.spectrum, rng);
        let path = spectrum.path(config.style.path_samples);
        let start = spectrum.sample(0.0);
        Self {
            spectrum,
            path,
            start: start.position,
            start_angle: start.velocity.y.atan2(start.velocity.x),
        }
    }
}

/// Time-driven controller animating markers along generated loops.
pub struct LoopController {
    config: ControllerConfig,
    entities: Vec<Entity>,
    /// Normalized phase in [0, 1), advanced by dt / period each update.
    anim_amt: f32,
}

impl LoopController {
    /// Build spectra and paths for every entity. Fails fast on an invalid
    /// configuration; spectra are deterministic given the rng seed.
    pub fn new(config: ControllerConfig, rng: &mut impl Rng) -> Result<Self, String> {
        config.validate()?;
        let entities = (0..config.animation.num_entities)
            .map(|_| Entity::build(&config, rng))
            .collect();
        Ok(Self {
            config,
            entities,
            anim_amt: 0.0,
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Current normalized animation phase.
    pub fn anim_amt(&self) -> f32 {
        self.anim_amt
    }

    /// Advance the animation by `dt` seconds, wrapping at one period.
    pub fn update(&mut self, dt: f32) {
        self.anim_amt = (self.anim_amt + dt / self.config.animation.period_s) % 1.0;
    }

    /// Draw every entity: its loop outline, then an oriented marker at the
    /// current sample point. Each entity's transforms run inside a balanced
    /// save/restore scope so no state leaks to the next one.
    pub fn render(&self, surface: &mut impl DrawSurface) {
        let n = self.entities.len();
        for (i, entity) in self.entities.iter().enumerate() {
            surface.scoped(|s| {
                if n > 1 {
                    s.rotate(i as f32 / n as f32 * TAU);
                    s.translate(Vec2::new(self.config.animation.arrangement_radius, 0.0));
                }
                if self.config.animation.reanchor_start {
                    // Rotate, then translate: puts the phase-0 sample at the
                    // local origin with its start direction pointing up.
                    s.rotate(-entity.start_angle + FRAC_PI_2);
                    s.translate(-entity.start);
                }

                self.render_path(s, &entity.path);

                let offset = i as f32 / n as f32;
                let amt = self
                    .config
                    .animation
                    .easing
                    .apply((self.anim_amt + offset) % 1.0);
                let sample = entity.spectrum.sample(amt);
                let grad = match self.config.animation.orientation {
                    OrientationSource::Velocity => sample.velocity,
                    OrientationSource::Acceleration => sample.acceleration,
                };
                // atan2(0, 0) == 0 covers the degenerate all-zero spectrum.
                let angle = grad.y.atan2(grad.x);

                s.scoped(|s| {
                    s.translate(sample.position);
                    s.rotate(angle);
                    self.draw_marker(s);
                });
            });
        }
    }

    fn render_path(&self, surface: &mut impl DrawSurface, path: &[Vec2]) {
        surface.begin_path();
        for (i, point) in path.iter().enumerate() {
            if i == 0 {
                surface.move_to(*point);
            } else {
                surface.line_to(*point);
            }
        }
        surface.close_path();
        surface.stroke(self.config.style.stroke_color, self.config.style.stroke_width);
    }

    fn draw_marker(&self, surface: &mut impl DrawSurface) {
        match self.config.animation.marker {
            MarkerShape::Triangle { radius } => {
                surface.begin_path();
                surface.move_to(Vec2::new(radius, 0.0));
                surface.line_to(Vec2::new(-radius, radius));
                surface.line_to(Vec2::new(-radius, -radius));
                surface.close_path();
                surface.fill(self.config.style.marker_color);
            }
            MarkerShape::Disc { radius } => {
                surface.fill_circle(Vec2::ZERO, radius, self.config.style.marker_color);
            }
        }
    }
}
