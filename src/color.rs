//! Colors and Color Models

use crate::Color;

use serde::Deserialize;
use serde::Serialize;

use std::fmt;
use std::str::FromStr;

/// Color components as produced by a color function
///
/// Only the first [`ColorModel::arity`] components are meaningful
pub type ColorTuple = [f64; 4];

/// Convert an f64 [0,1] component to a u8 [0,255] component
pub fn cu8(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}

/// Clamp and round an f64 [0,255] component to a u8
fn clamp_u8(v: f64) -> u8 {
    v.max(0.0).min(255.0).round() as u8
}

fn color_u8_to_f64(x: u8) -> f64 {
    f64::from(x) / 255.0
}

/// Color as Red, Green, Blue, and Alpha
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0,0,0,255)
    }
    /// Fully transparent (0,0,0,0)
    pub fn transparent() -> Self {
        Self::new(0,0,0,0)
    }
    /// Opaque gray of value `g`
    pub fn gray(g: u8) -> Self {
        Self::new(g,g,g,255)
    }
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    /// Create a color from the first four bytes of `p`
    pub fn from_slice(p: &[u8]) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }
    /// Components as an array
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
    /// Create a color from any other [Color]
    ///
    /// [Color]: ../trait.Color.html
    pub fn from_trait<C: Color>(c: C) -> Self {
        Self::new(c.red8(), c.green8(), c.blue8(), c.alpha8())
    }
}

impl Color for Rgba8 {
    fn   red(&self) -> f64 { color_u8_to_f64(self.r) }
    fn green(&self) -> f64 { color_u8_to_f64(self.g) }
    fn  blue(&self) -> f64 { color_u8_to_f64(self.b) }
    fn alpha(&self) -> f64 { color_u8_to_f64(self.a) }
    fn alpha8(&self) -> u8 { self.a }
    fn red8(&self) -> u8 { self.r }
    fn green8(&self) -> u8 { self.g }
    fn blue8(&self) -> u8 { self.b }
}

impl<'a, C> Color for &'a C where C: Color {
    fn   red(&self) -> f64 { (*self).red() }
    fn green(&self) -> f64 { (*self).green() }
    fn  blue(&self) -> f64 { (*self).blue() }
    fn alpha(&self) -> f64 { (*self).alpha() }
    fn alpha8(&self) -> u8 { (*self).alpha8() }
    fn red8(&self) -> u8 { (*self).red8() }
    fn green8(&self) -> u8 { (*self).green8() }
    fn blue8(&self) -> u8 { (*self).blue8() }
}

/// Convert hue [0,360), saturation and lightness [0,1] to red, green, blue [0,1]
///
/// See <https://en.wikipedia.org/wiki/HSL_and_HSV#HSL_to_RGB>
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = h.rem_euclid(360.0);
    let s = s.max(0.0).min(1.0);
    let l = l.max(0.0).min(1.0);
    let f = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let a = s * l.min(1.0 - l);
        l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
    };
    (f(0.0), f(8.0), f(4.0))
}

/// Interpretation of the components of a color tuple
///
///   | Model     | Components   | Native range                   |
///   |-----------|--------------|--------------------------------|
///   | `rgb`     | r, g, b      | [0,255] each                   |
///   | `rgba`    | r, g, b, a   | [0,255], alpha [0,1]           |
///   | `rgba256` | r, g, b, a   | painted as `rgba`              |
///   | `hsl`     | h, s, l      | h [0,360], s and l [0,100]     |
///   | `hsla`    | h, s, l, a   | as `hsl`, alpha [0,1]          |
///
/// `rgba256` differs from `rgba` only in the default input range of the
///   alpha channel ([0,255]), which is what decoded images carry.
#[derive(Debug,Copy,Clone,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    Rgb,
    Rgba,
    Rgba256,
    Hsl,
    Hsla,
}

impl Default for ColorModel {
    fn default() -> Self {
        ColorModel::Rgb
    }
}

impl ColorModel {
    /// Number of meaningful components
    pub fn arity(&self) -> usize {
        match self {
            ColorModel::Rgb | ColorModel::Hsl => 3,
            ColorModel::Rgba | ColorModel::Rgba256 | ColorModel::Hsla => 4,
        }
    }
    /// Model used when painting
    pub fn paint_model(&self) -> ColorModel {
        match self {
            ColorModel::Rgba256 => ColorModel::Rgba,
            m => *m,
        }
    }
    /// Lower bound of each painted component
    pub fn min(&self) -> ColorTuple {
        [0.0, 0.0, 0.0, 0.0]
    }
    /// Upper bound of each painted component
    pub fn max(&self) -> ColorTuple {
        match self {
            ColorModel::Rgb => [255.0, 255.0, 255.0, 0.0],
            ColorModel::Rgba | ColorModel::Rgba256 => [255.0, 255.0, 255.0, 1.0],
            ColorModel::Hsl => [360.0, 100.0, 100.0, 0.0],
            ColorModel::Hsla => [360.0, 100.0, 100.0, 1.0],
        }
    }
    /// Default lower bound of the values fed to the color function
    pub fn zmin_default(&self) -> ColorTuple {
        self.min()
    }
    /// Default upper bound of the values fed to the color function
    pub fn zmax_default(&self) -> ColorTuple {
        match self {
            ColorModel::Rgba256 => [255.0, 255.0, 255.0, 255.0],
            m => m.max(),
        }
    }
    /// Paint value of `c` in this model, e.g. `rgba(10,20,30,0.5)`
    ///
    ///     use imtrace::ColorModel;
    ///
    ///     let c = [120.0, 50.0, 25.0, 1.0];
    ///     assert_eq!(ColorModel::Hsl.fill_style(&c), "hsl(120,50%,25%)");
    ///     assert_eq!(ColorModel::Rgba256.fill_style(&c), "rgba(120,50,25,1)");
    ///
    pub fn fill_style(&self, c: &ColorTuple) -> String {
        let m = self.paint_model();
        let parts: Vec<String> = c[..m.arity()].iter().enumerate()
            .map(|(k, v)| match (m, k) {
                (ColorModel::Hsl, 1) | (ColorModel::Hsl, 2) |
                (ColorModel::Hsla, 1) | (ColorModel::Hsla, 2) => format!("{}%", v),
                _ => format!("{}", v),
            })
            .collect();
        format!("{}({})", m, parts.join(","))
    }
    /// Convert a color tuple in this model to an 8-bit RGBA color
    ///
    ///     use imtrace::{ColorModel,Rgba8};
    ///
    ///     let c = ColorModel::Rgba.to_rgba8(&[255.0, 0.0, 0.0, 0.5]);
    ///     assert_eq!(c, Rgba8::new(255, 0, 0, 128));
    ///     let c = ColorModel::Hsl.to_rgba8(&[240.0, 100.0, 50.0, 0.0]);
    ///     assert_eq!(c, Rgba8::new(0, 0, 255, 255));
    ///
    pub fn to_rgba8(&self, c: &ColorTuple) -> Rgba8 {
        match self.paint_model() {
            ColorModel::Rgb => Rgba8::new(clamp_u8(c[0]), clamp_u8(c[1]), clamp_u8(c[2]), 255),
            ColorModel::Hsl | ColorModel::Hsla => {
                let (r, g, b) = hsl_to_rgb(c[0], c[1] / 100.0, c[2] / 100.0);
                let a = if self.arity() == 4 { cu8(c[3]) } else { 255 };
                Rgba8::new(cu8(r), cu8(g), cu8(b), a)
            }
            _ => Rgba8::new(clamp_u8(c[0]), clamp_u8(c[1]), clamp_u8(c[2]), cu8(c[3])),
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ColorModel::Rgb => "rgb",
            ColorModel::Rgba => "rgba",
            ColorModel::Rgba256 => "rgba256",
            ColorModel::Hsl => "hsl",
            ColorModel::Hsla => "hsla",
        };
        f.write_str(s)
    }
}

impl FromStr for ColorModel {
    type Err = crate::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rgb" => Ok(ColorModel::Rgb),
            "rgba" => Ok(ColorModel::Rgba),
            "rgba256" => Ok(ColorModel::Rgba256),
            "hsl" => Ok(ColorModel::Hsl),
            "hsla" => Ok(ColorModel::Hsla),
            _ => Err(crate::Error::Config(format!("unknown color model {:?}", s))),
        }
    }
}
