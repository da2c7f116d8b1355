use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::analysis::Snapshot;
use crate::config::ParticleConfig;
use crate::render::{Canvas, Hsla};

/// A single drifting particle in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub r: f32,
}

/// Owner of the particle collection and the only writer of the backdrop
/// canvas.
///
/// Particle count tracks viewport area; resizing updates the surface
/// immediately but regeneration of the collection waits for a quiet period
/// so a drag-resize does not thrash allocations. Movement is elastic: a
/// particle leaving `[0, dim]` on an axis has that velocity component
/// sign-flipped rather than its position clamped, so it may render out of
/// bounds for a frame by at most its speed.
#[derive(Debug)]
pub struct ParticleField {
    config: ParticleConfig,
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    regen_deadline: Option<f64>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: ParticleConfig, width: f32, height: f32) -> Self {
        Self::seeded(config, width, height, rand::random())
    }

    pub fn seeded(config: ParticleConfig, width: f32, height: f32, seed: u64) -> Self {
        let mut field = Self {
            config,
            width,
            height,
            particles: Vec::new(),
            regen_deadline: None,
            rng: StdRng::seed_from_u64(seed),
        };
        field.regenerate();
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn regen_pending(&self) -> bool {
        self.regen_deadline.is_some()
    }

    /// Particle count for the current surface area.
    pub fn target_count(&self) -> usize {
        let by_area = (self.width * self.height / self.config.density_divisor).floor();
        self.config.min_count.max(by_area.max(0.0) as usize)
    }

    /// Applies new surface dimensions immediately and schedules collection
    /// regeneration after the trailing-edge debounce window.
    pub fn resize(&mut self, width: f32, height: f32, now: f64) {
        self.width = width;
        self.height = height;
        self.regen_deadline = Some(now + self.config.resize_debounce as f64);
    }

    /// Amplitude factor for this frame: exactly 1 without audio, otherwise
    /// grown by the combined energy of three fixed low/mid/high bins.
    pub fn amplitude(&self, snapshot: Option<Snapshot>) -> f32 {
        match snapshot {
            Some(snapshot) => {
                let [a, b, c] = self.config.amp_bins;
                let combined = snapshot.bin(a) as f32
                    + snapshot.bin(b) as f32
                    + snapshot.bin(c) as f32;
                1.0 + combined / 255.0 * self.config.amp_gain
            }
            None => 1.0,
        }
    }

    /// Advances and draws the whole field for one frame.
    ///
    /// The canvas is fully cleared first and every circle is drawn at low
    /// alpha; the trail-like look comes from that flicker, not from any
    /// accumulation buffer, and the clear-then-draw order must stay.
    pub fn tick(&mut self, now: f64, amplitude: f32, canvas: &mut dyn Canvas) {
        if let Some(deadline) = self.regen_deadline {
            if now >= deadline {
                self.regen_deadline = None;
                self.regenerate();
            }
        }

        canvas.clear();
        let hue = (now as f32 * self.config.hue_rate).sin() * self.config.hue_swing
            + self.config.hue_base;
        let color = Hsla::new(hue, 0.8, 0.6, self.config.alpha);

        for particle in &mut self.particles {
            particle.x += particle.vx;
            particle.y += particle.vy;
            if particle.x < 0.0 || particle.x > self.width {
                particle.vx = -particle.vx;
            }
            if particle.y < 0.0 || particle.y > self.height {
                particle.vy = -particle.vy;
            }

            canvas.fill_circle(particle.x, particle.y, particle.r * amplitude, color);
        }
    }

    /// Rebuilds the collection from scratch for the current dimensions.
    fn regenerate(&mut self) {
        let count = self.target_count();
        let config = &self.config;
        let width = self.width;
        let height = self.height;
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| Particle {
                x: rng.gen::<f32>() * width,
                y: rng.gen::<f32>() * height,
                vx: (rng.gen::<f32>() - 0.5) * config.speed,
                vy: (rng.gen::<f32>() - 0.5) * config.speed,
                r: rng.gen::<f32>() * config.radius_range + config.radius_min,
            })
            .collect();
    }
}
