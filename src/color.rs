// Translucent color used for orb gradients. Channels are bytes, alpha is a
// fraction in [0, 1] so it maps directly onto a CSS rgba() string.

use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Color {
        Color { r, g, b, a }
    }

    // Created from an unsigned 32 representing RRGGBBAA
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color {
            r,
            g,
            b,
            a: a as f64 / 255.0,
        }
    }

    pub fn has_valid_alpha(&self) -> bool {
        (0.0..=1.0).contains(&self.a)
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Sky, emerald and amber glows used by the page background.
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::rgba(56, 189, 248, 0.15),
        Color::rgba(52, 211, 153, 0.12),
        Color::rgba(245, 158, 11, 0.10),
    ]
}
