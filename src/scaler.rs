//! Color functions
//!
//! A scaler turns the raw value of a cell into the color tuple that is
//!   painted, or into nothing for a cell that must stay transparent.

use crate::color::ColorModel;
use crate::color::ColorTuple;
use crate::grid::CellValue;

/// Map a cell value to a color tuple
pub trait Scaler {
    /// Color of `v`, `None` paints a transparent block
    fn scale(&self, v: &CellValue) -> Option<ColorTuple>;
}

impl<F> Scaler for F where F: Fn(&CellValue) -> Option<ColorTuple> {
    fn scale(&self, v: &CellValue) -> Option<ColorTuple> {
        self(v)
    }
}

/// Per component linear map from `[zmin, zmax]` onto the native range of
///   a color model, clamped to that range
///
///     use imtrace::{CellValue,ColorModel,LinearScaler,Scaler};
///
///     let s = LinearScaler::new(ColorModel::Rgba256);
///     let c = s.scale(&CellValue::Color([10.0, 20.0, 30.0, 255.0]));
///     assert_eq!(c, Some([10.0, 20.0, 30.0, 1.0]));
///
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct LinearScaler {
    pub model: ColorModel,
    pub zmin: ColorTuple,
    pub zmax: ColorTuple,
}

impl LinearScaler {
    /// Scaler with the default input range of `model`
    pub fn new(model: ColorModel) -> Self {
        Self::with_range(model, model.zmin_default(), model.zmax_default())
    }
    /// Scaler with an explicit input range
    pub fn with_range(model: ColorModel, zmin: ColorTuple, zmax: ColorTuple) -> Self {
        Self { model, zmin, zmax }
    }
}

impl Scaler for LinearScaler {
    fn scale(&self, v: &CellValue) -> Option<ColorTuple> {
        let c = match v {
            CellValue::Color(c) => c,
            CellValue::Scalar(_) => return None,
        };
        let (min, max) = (self.model.min(), self.model.max());
        let mut out = [0.0; 4];
        for k in 0 .. self.model.arity() {
            let ck = c[k];
            if !ck.is_finite() {
                return None;
            }
            let (z0, z1) = (self.zmin[k], self.zmax[k]);
            let lo = min[k].min(max[k]);
            let hi = min[k].max(max[k]);
            out[k] = if z0 == min[k] && z1 == max[k] {
                ck
            } else {
                min[k] + (ck - z0) * (max[k] - min[k]) / (z1 - z0)
            }.max(lo).min(hi);
        }
        Some(out)
    }
}
