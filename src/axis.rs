//! Axis coordinate transforms
//!
//! An axis maps a data coordinate onto a device pixel coordinate along
//!   one direction of the plot area. Transforms may be undefined for some
//!   data values (the logarithm of a non-positive number), in which case
//!   `c2p` returns `None`.

/// Data coordinate to pixel coordinate transform of a single axis
pub trait Axis {
    /// Pixel position of data value `v`, `None` where undefined
    fn c2p(&self, v: f64) -> Option<f64>;
    /// Length of the axis in pixels (the viewport extent)
    fn length(&self) -> f64;
}

impl<'a, A> Axis for &'a A where A: Axis + ?Sized {
    fn c2p(&self, v: f64) -> Option<f64> {
        (**self).c2p(v)
    }
    fn length(&self) -> f64 {
        (**self).length()
    }
}

/// Linear axis
///
/// Maps `range[0]` to pixel 0 and `range[1]` to pixel `length`. A range
///   with `range[0] > range[1]` gives a reversed axis, which is how y axes
///   are usually drawn (larger values towards the top).
///
/// Date axes are linear on milliseconds, category axes linear on the
///   category index.
///
///     use imtrace::{Axis,LinearAxis};
///
///     let xa = LinearAxis::new([0.0, 10.0], 100.0);
///     assert_eq!(xa.c2p(2.5), Some(25.0));
///     let ya = LinearAxis::new([10.0, 0.0], 100.0);
///     assert_eq!(ya.c2p(2.5), Some(75.0));
///
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct LinearAxis {
    pub range: [f64; 2],
    pub length: f64,
}

impl LinearAxis {
    /// Create a new linear axis
    pub fn new(range: [f64; 2], length: f64) -> Self {
        Self { range, length }
    }
    /// Axis where one data unit spans `scale` pixels, starting at `offset`
    pub fn with_scale(scale: f64, offset: f64, length: f64) -> Self {
        let r0 = -offset / scale;
        Self::new([r0, r0 + length / scale], length)
    }
    fn scale(&self) -> f64 {
        self.length / (self.range[1] - self.range[0])
    }
}

impl Axis for LinearAxis {
    fn c2p(&self, v: f64) -> Option<f64> {
        let p = (v - self.range[0]) * self.scale();
        if p.is_finite() { Some(p) } else { None }
    }
    fn length(&self) -> f64 {
        self.length
    }
}

/// Logarithmic axis
///
/// The range is given in log10 units, as a log axis stores it.
///   Non-positive data values have no position.
///
///     use imtrace::{Axis,LogAxis};
///
///     let xa = LogAxis::new([0.0, 2.0], 200.0);
///     assert_eq!(xa.c2p(10.0), Some(100.0));
///     assert_eq!(xa.c2p(0.0), None);
///     assert_eq!(xa.c2p(-1.0), None);
///
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct LogAxis {
    pub range: [f64; 2],
    pub length: f64,
}

impl LogAxis {
    /// Create a new log axis, `range` in log10 units
    pub fn new(range: [f64; 2], length: f64) -> Self {
        Self { range, length }
    }
}

impl Axis for LogAxis {
    fn c2p(&self, v: f64) -> Option<f64> {
        if v <= 0.0 || !v.is_finite() {
            return None;
        }
        let s = self.length / (self.range[1] - self.range[0]);
        let p = (v.log10() - self.range[0]) * s;
        if p.is_finite() { Some(p) } else { None }
    }
    fn length(&self) -> f64 {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_with_scale() {
        let xa = LinearAxis::with_scale(10.0, 0.0, 100.0);
        assert_eq!(xa.c2p(0.0), Some(0.0));
        assert_eq!(xa.c2p(2.0), Some(20.0));
        assert_eq!(xa.length(), 100.0);
        let xa = LinearAxis::with_scale(10.0, 5.0, 100.0);
        assert!((xa.c2p(1.0).unwrap() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_range() {
        let xa = LinearAxis::new([1.0, 1.0], 100.0);
        assert_eq!(xa.c2p(2.0), None);
    }

    #[test]
    fn by_reference() {
        let xa = LinearAxis::new([0.0, 1.0], 10.0);
        let r: &dyn Axis = &xa;
        assert_eq!((&r).c2p(0.5), Some(5.0));
    }
}
