//! Floating collaborator names joined by faint lines when close together.

use rand::Rng;

use crate::presentation::ports::capabilities::ParticleCanvas;

pub const LINK_DISTANCE: f64 = 100.0;
const LINK_MAX_ALPHA: f64 = 0.4;
const LINE_OFFSET_Y: f64 = 5.0;
const MAX_SPEED: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
}

impl Particle {
    fn spawn(text: String, (width, height): (f64, f64), rng: &mut impl Rng) -> Self {
        Self {
            text,
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            vx: rng.gen_range(-MAX_SPEED..MAX_SPEED),
            vy: rng.gen_range(-MAX_SPEED..MAX_SPEED),
            size: rng.gen_range(12.0..20.0),
        }
    }

    /// One step of drift; a particle past an edge reverses on that axis.
    fn update(&mut self, (width, height): (f64, f64)) {
        self.x += self.vx;
        self.y += self.vy;
        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
        }
    }
}

/// Opacity of the line between two particles `distance` apart, if any.
pub fn link_alpha(distance: f64) -> Option<f64> {
    (distance < LINK_DISTANCE).then(|| (1.0 - distance / LINK_DISTANCE) * LINK_MAX_ALPHA)
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: (f64, f64),
}

impl ParticleField {
    pub fn new(names: &[String], bounds: (f64, f64), rng: &mut impl Rng) -> Self {
        let particles = names
            .iter()
            .map(|name| Particle::spawn(name.clone(), bounds, rng))
            .collect();
        Self { particles, bounds }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn resize(&mut self, bounds: (f64, f64)) {
        self.bounds = bounds;
    }

    pub fn step(&mut self) {
        let bounds = self.bounds;
        for particle in &mut self.particles {
            particle.update(bounds);
        }
    }

    /// Advances one step and redraws. The host calls this every frame for
    /// as long as the page lives.
    pub fn frame(&mut self, canvas: &mut dyn ParticleCanvas) {
        let size = canvas.size();
        if size != self.bounds {
            self.resize(size);
        }
        canvas.clear();
        self.step();
        for p in &self.particles {
            canvas.fill_text(&p.text, p.x, p.y, p.size);
        }

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if let Some(alpha) = link_alpha(distance) {
                    canvas.stroke_line(
                        (a.x, a.y - LINE_OFFSET_Y),
                        (b.x, b.y - LINE_OFFSET_Y),
                        alpha,
                    );
                }
            }
        }
    }
}
