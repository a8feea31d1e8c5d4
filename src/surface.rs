// The drawing capability the orb field needs from its host, and its
// implementation on top of a canvas 2D context.

use crate::color::Color;
use vecmath::Vector2;
use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

/// Offset in `[0, 1]` along the gradient radius, paired with its color.
pub type ColorStop = (f32, Color);

pub trait DrawingSurface {
    type Gradient;

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Radial gradient from `center` (radius 0) out to `radius`. `None` when
    /// the surface refuses it; callers skip that shape.
    fn radial_gradient(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        stops: &[ColorStop],
    ) -> Option<Self::Gradient>;

    /// Fills a full circle with a gradient built by this surface.
    fn fill_disc(&mut self, center: Vector2<f64>, radius: f64, gradient: &Self::Gradient);
}

impl DrawingSurface for CanvasRenderingContext2d {
    type Gradient = CanvasGradient;

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.clear_rect(x, y, width, height);
    }

    fn radial_gradient(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        stops: &[ColorStop],
    ) -> Option<CanvasGradient> {
        let [x, y] = center;
        let gradient = match self.create_radial_gradient(x, y, 0.0, x, y, radius) {
            Ok(gradient) => gradient,
            Err(err) => {
                log::warn!("createRadialGradient failed: {:?}", err);
                return None;
            }
        };
        for (offset, color) in stops {
            if let Err(err) = gradient.add_color_stop(*offset, &color.to_css()) {
                log::warn!("addColorStop({}) failed: {:?}", offset, err);
                return None;
            }
        }
        Some(gradient)
    }

    fn fill_disc(&mut self, center: Vector2<f64>, radius: f64, gradient: &CanvasGradient) {
        let fill: &JsValue = gradient.as_ref();
        self.begin_path();
        #[allow(deprecated)]
        self.set_fill_style(fill);
        if let Err(err) = self.arc(center[0], center[1], radius, 0.0, std::f64::consts::PI * 2.0) {
            log::warn!("arc failed: {:?}", err);
            return;
        }
        self.fill();
    }
}
