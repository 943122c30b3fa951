use ggez::graphics::{Color, DrawMode, Mesh, MeshBuilder, Rect};
use ggez::Context;
use rand::Rng;

use crate::basic::Point;
use crate::error::{ErrorConversion, Result};

const PARTICLE_COUNT: usize = 120;
const PARTICLE_SIZE: f32 = 3.;
const GRAVITY: f32 = 0.05;
/// Frames over which a particle's alpha runs down to zero
const FADE_FRAMES: f32 = 80.;

struct Particle {
    pos: Point,
    vel: Point,
    life: f32,
}

/// Post-death particle burst. Purely visual: advanced once per
/// display frame, on its own lifecycle independent of the
/// simulation clock.
pub struct Burst {
    particles: Vec<Particle>,
    color: Color,
}

impl Burst {
    pub fn new(origin: Point, color: Color, rng: &mut impl Rng) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                pos: origin,
                vel: Point {
                    x: rng.gen_range(-4.0..4.0),
                    y: rng.gen_range(-4.0..4.0),
                },
                life: rng.gen_range(40.0..70.0),
            })
            .collect();
        Self { particles, color }
    }

    /// One display frame of movement
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel.y += GRAVITY;
            particle.life -= 1.;
        }
        self.particles.retain(|particle| particle.life > 0.);
    }

    pub fn finished(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn mesh(&self, ctx: &Context) -> Result<Mesh> {
        let mut builder = MeshBuilder::new();

        let res: Result = (|| {
            for particle in &self.particles {
                let mut color = self.color;
                color.a = ezing::quad_out((particle.life / FADE_FRAMES).clamp(0., 1.));

                builder.rectangle(
                    DrawMode::fill(),
                    Rect::new(particle.pos.x, particle.pos.y, PARTICLE_SIZE, PARTICLE_SIZE),
                    color,
                )?;
            }
            Ok(())
        })();

        res.map(|_| Mesh::from_data(ctx, builder.build()))
            .with_trace_step("Burst::mesh")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn burst_dies_out() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut burst = Burst::new(Point::square(100.), Color::WHITE, &mut rng);

        assert!(!burst.finished());
        for _ in 0..70 {
            burst.advance();
        }
        assert!(burst.finished());
    }

    #[test]
    fn particles_fall() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut burst = Burst::new(Point::ZERO, Color::WHITE, &mut rng);

        let initial_vy: Vec<_> = burst.particles.iter().map(|p| p.vel.y).collect();
        burst.advance();
        for (particle, vy) in burst.particles.iter().zip(initial_vy) {
            assert!(particle.vel.y > vy);
        }
    }
}
