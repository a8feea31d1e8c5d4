// The orb field: a fixed set of particles advanced and drawn once per frame,
// nudged by the pointer and bounded by the surface size.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::color::Color;
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::particle::Particle;
use crate::surface::DrawingSurface;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

pub struct ParticleField {
    bounds: Bounds,
    particles: Vec<Particle>,
    repulsion_radius: f64,
    repulsion_strength: f64,
}

impl ParticleField {
    pub fn new(width: u32, height: u32, config: &FieldConfig) -> Result<ParticleField, FieldError> {
        Self::with_rng(width, height, config, &mut rand::thread_rng())
    }

    /// Scatters `config.count` particles uniformly over the surface.
    pub fn with_rng<R: Rng + ?Sized>(
        width: u32,
        height: u32,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Result<ParticleField, FieldError> {
        let bounds = checked_bounds(width as f64, height as f64)?;
        config.validate()?;

        let mut particles = Vec::with_capacity(config.count);
        for _ in 0..config.count {
            let pos_x = rng.gen::<f64>() * bounds.width;
            let pos_y = rng.gen::<f64>() * bounds.height;
            let radius = rng.gen_range(config.min_radius, config.max_radius);
            let vel_x = (rng.gen::<f64>() * 2.0 - 1.0) * config.max_speed;
            let vel_y = (rng.gen::<f64>() * 2.0 - 1.0) * config.max_speed;
            let color = *config
                .palette
                .choose(rng)
                .ok_or(FieldError::EmptyPalette)?;
            particles.push(Particle::new(pos_x, pos_y, vel_x, vel_y, radius, color));
        }

        log::info!(
            "orb field ready: {} particles on {}x{}",
            particles.len(),
            width,
            height
        );
        Ok(ParticleField {
            bounds,
            particles,
            repulsion_radius: config.repulsion_radius,
            repulsion_strength: config.repulsion_strength,
        })
    }

    /// Builds a field around explicit particles. Count, palette and radius
    /// range in `config` are ignored; its repulsion settings apply.
    pub fn from_particles(
        width: u32,
        height: u32,
        particles: Vec<Particle>,
        config: &FieldConfig,
    ) -> Result<ParticleField, FieldError> {
        let bounds = checked_bounds(width as f64, height as f64)?;
        config.validate_physics()?;
        if particles.is_empty() {
            return Err(FieldError::NoParticles);
        }
        if let Some(p) = particles.iter().find(|p| !(p.radius > 0.0)) {
            return Err(FieldError::InvalidRadius {
                min: p.radius,
                max: p.radius,
            });
        }
        Ok(ParticleField {
            bounds,
            particles,
            repulsion_radius: config.repulsion_radius,
            repulsion_strength: config.repulsion_strength,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn advance(&mut self) {
        let Bounds { width, height } = self.bounds;
        for particle in &mut self.particles {
            particle.step(width, height);
        }
    }

    /// Pushes every particle within the repulsion radius away from the
    /// pointer. Applied per pointer event, so strength scales with event rate.
    pub fn repel(&mut self, pointer_x: f64, pointer_y: f64) {
        let pointer = [pointer_x, pointer_y];
        for particle in &mut self.particles {
            particle.push_away(pointer, self.repulsion_radius, self.repulsion_strength);
        }
    }

    /// Particles are left where they are, even outside the new bounds.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.bounds = Bounds {
            width: width as f64,
            height: height as f64,
        };
    }

    pub fn render<S: DrawingSurface>(&self, surface: &mut S) {
        surface.clear(0.0, 0.0, self.bounds.width, self.bounds.height);
        for particle in &self.particles {
            let stops = [(0.0, particle.color), (1.0, Color::TRANSPARENT)];
            if let Some(gradient) = surface.radial_gradient(particle.pos, particle.radius, &stops) {
                surface.fill_disc(particle.pos, particle.radius, &gradient);
            }
        }
    }

    /// One animation frame: move first, then draw the new positions.
    pub fn frame<S: DrawingSurface>(&mut self, surface: &mut S) {
        self.advance();
        self.render(surface);
    }
}

fn checked_bounds(width: f64, height: f64) -> Result<Bounds, FieldError> {
    if width > 0.0 && height > 0.0 {
        Ok(Bounds { width, height })
    } else {
        Err(FieldError::InvalidDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use vecmath::{vec2_len, vec2_sub, Vector2};

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(f64, f64, f64, f64),
        Gradient(Vector2<f64>, f64, Vec<(f32, Color)>),
        Fill(Vector2<f64>, f64, usize),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
        gradients: usize,
        refuse_gradients: bool,
    }

    impl DrawingSurface for RecordingSurface {
        type Gradient = usize;

        fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
            self.ops.push(Op::Clear(x, y, width, height));
        }

        fn radial_gradient(&mut self, center: Vector2<f64>, radius: f64, stops: &[(f32, Color)]) -> Option<usize> {
            if self.refuse_gradients {
                return None;
            }
            self.ops.push(Op::Gradient(center, radius, stops.to_vec()));
            self.gradients += 1;
            Some(self.gradients)
        }

        fn fill_disc(&mut self, center: Vector2<f64>, radius: f64, gradient: &usize) {
            self.ops.push(Op::Fill(center, radius, *gradient));
        }
    }

    const SKY: Color = Color::rgba(56, 189, 248, 0.15);
    const AMBER: Color = Color::rgba(245, 158, 11, 0.10);

    fn single(x: f64, y: f64, vx: f64, vy: f64) -> ParticleField {
        let p = Particle::new(x, y, vx, vy, 150.0, SKY);
        ParticleField::from_particles(200, 200, vec![p], &FieldConfig::default()).unwrap()
    }

    fn seeded(width: u32, height: u32, config: &FieldConfig) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(7);
        ParticleField::with_rng(width, height, config, &mut rng).unwrap()
    }

    #[test]
    fn initial_particles_respect_config() {
        let config = FieldConfig::default();
        let field = seeded(800, 600, &config);
        assert_eq!(field.len(), 20);
        assert_eq!(field.bounds(), Bounds { width: 800.0, height: 600.0 });
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 800.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 600.0);
            assert!(p.radius >= 100.0 && p.radius < 300.0);
            assert!(p.vel[0].abs() <= 0.15 && p.vel[1].abs() <= 0.15);
            assert!(config.palette.contains(&p.color));
        }
    }

    #[test]
    fn construction_preconditions() {
        let config = FieldConfig::default();
        assert_eq!(
            ParticleField::new(0, 600, &config).err(),
            Some(FieldError::InvalidDimensions { width: 0.0, height: 600.0 })
        );
        let no_colors = FieldConfig {
            palette: Vec::new(),
            ..FieldConfig::default()
        };
        assert_eq!(
            ParticleField::new(800, 600, &no_colors).err(),
            Some(FieldError::EmptyPalette)
        );
        let no_particles = FieldConfig {
            count: 0,
            ..FieldConfig::default()
        };
        assert_eq!(
            ParticleField::new(800, 600, &no_particles).err(),
            Some(FieldError::NoParticles)
        );
        assert_eq!(
            ParticleField::from_particles(10, 10, Vec::new(), &config).err(),
            Some(FieldError::NoParticles)
        );
        let flat = Particle::new(1.0, 1.0, 0.0, 0.0, 0.0, SKY);
        assert!(matches!(
            ParticleField::from_particles(10, 10, vec![flat], &config),
            Err(FieldError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn far_edge_is_closed() {
        let mut field = single(199.0, 100.0, 0.5, 0.0);

        field.advance();
        assert_eq!(field.particles()[0].pos[0], 199.5);
        assert_eq!(field.particles()[0].vel[0], 0.5);

        // x == width counts as outside
        field.advance();
        assert_eq!(field.particles()[0].pos[0], 200.0);
        assert_eq!(field.particles()[0].vel[0], -0.5);

        field.advance();
        assert_eq!(field.particles()[0].pos[0], 199.5);
    }

    #[test]
    fn crossing_out_flips_sign() {
        let config = FieldConfig::default();
        let mut field = seeded(300, 300, &config);
        for _ in 0..5000 {
            let before: Vec<Particle> = field.particles().to_vec();
            field.advance();
            for (old, new) in before.iter().zip(field.particles()) {
                let x = old.pos[0] + old.vel[0];
                let inside_before = old.pos[0] >= 0.0 && old.pos[0] < 300.0;
                let outside_after = x < 0.0 || x >= 300.0;
                if inside_before && outside_after {
                    assert_eq!(new.vel[0], -old.vel[0]);
                }
            }
        }
    }

    #[test]
    fn count_is_fixed() {
        let config = FieldConfig {
            count: 7,
            ..FieldConfig::default()
        };
        let mut field = seeded(640, 480, &config);
        for i in 0..100 {
            field.advance();
            field.repel((i * 6) as f64, (i * 4) as f64);
            if i % 10 == 0 {
                field.resize(320 + i, 240 + i);
            }
            assert_eq!(field.len(), 7);
        }
    }

    #[test]
    fn repel_pushes_particle_away() {
        let mut field = single(100.0, 0.0, 0.0, 0.0);
        field.repel(0.0, 0.0);
        let p = field.particles()[0];
        assert!((p.pos[0] - 102.0).abs() < 1e-9);
        assert_eq!(p.pos[1], 0.0);
        assert_eq!(p.vel, [0.0, 0.0]);
    }

    #[test]
    fn repel_grows_distance_inside_radius_only() {
        let near = Particle::new(120.0, 130.0, 0.1, 0.0, 150.0, SKY);
        let far = Particle::new(500.0, 500.0, 0.1, 0.0, 150.0, AMBER);
        let mut field =
            ParticleField::from_particles(800, 800, vec![near, far], &FieldConfig::default()).unwrap();
        let pointer = [100.0, 100.0];

        field.repel(pointer[0], pointer[1]);

        let before = vec2_len(vec2_sub(near.pos, pointer));
        let after = vec2_len(vec2_sub(field.particles()[0].pos, pointer));
        assert!(after > before);
        assert_eq!(field.particles()[1].pos, far.pos);
    }

    #[test]
    fn repel_on_center_is_noop() {
        let mut field = single(42.0, 24.0, 0.1, 0.1);
        field.repel(42.0, 24.0);
        assert_eq!(field.particles()[0].pos, [42.0, 24.0]);
    }

    #[test]
    fn repel_uses_config_settings() {
        let config = FieldConfig {
            repulsion_radius: 50.0,
            repulsion_strength: 0.5,
            ..FieldConfig::default()
        };
        let p = Particle::new(10.0, 0.0, 0.0, 0.0, 150.0, SKY);
        let mut field = ParticleField::from_particles(100, 100, vec![p], &config).unwrap();
        field.repel(0.0, 0.0);
        assert_eq!(field.particles()[0].pos, [15.0, 0.0]);
        field.repel(-60.0, 0.0);
        assert_eq!(field.particles()[0].pos, [15.0, 0.0]);
    }

    #[test]
    fn resize_only_touches_bounds() {
        let config = FieldConfig::default();
        let mut field = seeded(1024, 768, &config);
        let before: Vec<Particle> = field.particles().to_vec();

        field.resize(300, 200);
        let once = field.bounds();
        field.resize(300, 200);

        assert_eq!(field.bounds(), once);
        assert_eq!(once, Bounds { width: 300.0, height: 200.0 });
        assert_eq!(field.particles(), &before[..]);
    }

    #[test]
    fn render_clears_then_draws_in_order() {
        let a = Particle::new(10.0, 20.0, 0.0, 0.0, 100.0, SKY);
        let b = Particle::new(30.0, 40.0, 0.0, 0.0, 250.0, AMBER);
        let field = ParticleField::from_particles(640, 480, vec![a, b], &FieldConfig::default()).unwrap();
        let mut surface = RecordingSurface::default();

        field.render(&mut surface);

        assert_eq!(
            surface.ops,
            vec![
                Op::Clear(0.0, 0.0, 640.0, 480.0),
                Op::Gradient([10.0, 20.0], 100.0, vec![(0.0, SKY), (1.0, Color::TRANSPARENT)]),
                Op::Fill([10.0, 20.0], 100.0, 1),
                Op::Gradient([30.0, 40.0], 250.0, vec![(0.0, AMBER), (1.0, Color::TRANSPARENT)]),
                Op::Fill([30.0, 40.0], 250.0, 2),
            ]
        );
    }

    #[test]
    fn render_skips_refused_gradients() {
        let field = single(10.0, 10.0, 0.0, 0.0);
        let mut surface = RecordingSurface {
            refuse_gradients: true,
            ..RecordingSurface::default()
        };
        field.render(&mut surface);
        assert_eq!(surface.ops, vec![Op::Clear(0.0, 0.0, 200.0, 200.0)]);
    }

    #[test]
    fn frame_advances_before_drawing() {
        let mut field = single(50.0, 60.0, 0.5, -0.5);
        let mut surface = RecordingSurface::default();

        field.frame(&mut surface);

        assert_eq!(surface.ops[0], Op::Clear(0.0, 0.0, 200.0, 200.0));
        assert_eq!(surface.ops[2], Op::Fill([50.5, 59.5], 150.0, 1));
    }
}
