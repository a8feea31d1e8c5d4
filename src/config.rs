// Tunable constants for the orb field. Hosts may override any subset of them
// with a JSON object; missing keys keep their defaults.

use serde::Deserialize;

use crate::color::{self, Color};
use crate::error::FieldError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub count: usize,
    pub palette: Vec<Color>,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Upper bound on each velocity component, in pixels per frame.
    pub max_speed: f64,
    pub repulsion_radius: f64,
    /// Fraction of the pointer distance applied per pointer-move.
    pub repulsion_strength: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            count: 20,
            palette: color::default_palette(),
            min_radius: 100.0,
            max_radius: 300.0,
            max_speed: 0.15,
            repulsion_radius: 200.0,
            repulsion_strength: 0.02,
        }
    }
}

impl FieldConfig {
    pub fn from_json(json: &str) -> Result<FieldConfig, FieldError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.count == 0 {
            return Err(FieldError::NoParticles);
        }
        if self.palette.is_empty() {
            return Err(FieldError::EmptyPalette);
        }
        if let Some(color) = self.palette.iter().find(|c| !c.has_valid_alpha()) {
            return Err(FieldError::InvalidColor(color.to_css()));
        }
        self.validate_physics()
    }

    // Checks that do not depend on how particles are sourced.
    pub(crate) fn validate_physics(&self) -> Result<(), FieldError> {
        if !(self.min_radius > 0.0 && self.min_radius < self.max_radius)
            || !self.max_radius.is_finite()
        {
            return Err(FieldError::InvalidRadius {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(FieldError::InvalidSpeed(self.max_speed));
        }
        if !(self.repulsion_radius > 0.0)
            || !(self.repulsion_strength > 0.0)
            || !self.repulsion_strength.is_finite()
        {
            return Err(FieldError::InvalidRepulsion {
                radius: self.repulsion_radius,
                strength: self.repulsion_strength,
            });
        }
        Ok(())
    }
}
