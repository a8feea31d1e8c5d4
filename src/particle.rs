// Simple particle struct to keep track of individual position, velocity, size and color

use crate::color::Color;
use vecmath::{vec2_add, vec2_len, vec2_scale, vec2_sub, Vector2};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(
        pos_x: f64,
        pos_y: f64,
        vel_x: f64,
        vel_y: f64,
        radius: f64,
        color: Color,
    ) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            color,
        }
    }

    /// Moves by one frame of velocity, then flips any axis that has left
    /// `[0, extent)` while still heading outward. Position is never clamped.
    pub fn step(&mut self, width: f64, height: f64) {
        self.pos = vec2_add(self.pos, self.vel);
        bounce_axis(self.pos[0], &mut self.vel[0], width);
        bounce_axis(self.pos[1], &mut self.vel[1], height);
    }

    /// Pushes the particle away from `pointer` by `strength` times their
    /// separation when it lies strictly inside `radius`. Returns whether it moved.
    pub fn push_away(&mut self, pointer: Vector2<f64>, radius: f64, strength: f64) -> bool {
        let offset = vec2_sub(self.pos, pointer);
        let distance = vec2_len(offset);
        if distance == 0.0 || distance >= radius {
            return false;
        }
        self.pos = vec2_add(self.pos, vec2_scale(offset, strength));
        true
    }
}

fn bounce_axis(pos: f64, vel: &mut f64, extent: f64) {
    if (pos < 0.0 && *vel < 0.0) || (pos >= extent && *vel > 0.0) {
        *vel = -*vel;
    }
}
