//! Placement of a grid in device pixels

use crate::axis::Axis;
use crate::grid::Grid;

/// Fraction of the axis length kept beyond each side of the viewport when
///   cropping
pub const VIEWPORT_MARGIN: f64 = 0.5;

/// Bounding box of a trace in device pixels
///
/// `right >= left` and `bottom >= top`
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct DeviceRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl DeviceRect {
    /// Create a rectangle, swapping edges so that it is normalized
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let (left, right) = if right < left { (right, left) } else { (left, right) };
        let (top, bottom) = if bottom < top { (bottom, top) } else { (top, bottom) };
        Self { left, top, right, bottom }
    }
    /// Width of the raster, rounded to whole pixels
    pub fn width(&self) -> i64 {
        (self.right - self.left).round() as i64
    }
    /// Height of the raster, rounded to whole pixels
    pub fn height(&self) -> i64 {
        (self.bottom - self.top).round() as i64
    }
    /// Raster has no pixels
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
    /// Restrict the rectangle to the viewport plus a margin of half the
    ///   axis length on every side
    ///
    ///     use imtrace::DeviceRect;
    ///
    ///     let r = DeviceRect::new(-1000.0, 2.0, 1000.0, 8.0).crop(10.0, 10.0);
    ///     assert_eq!(r, DeviceRect::new(-5.0, 2.0, 15.0, 8.0));
    ///
    pub fn crop(&self, xlen: f64, ylen: f64) -> Self {
        Self {
            left:   self.left.max(-VIEWPORT_MARGIN * xlen),
            right:  self.right.min((1.0 + VIEWPORT_MARGIN) * xlen),
            top:    self.top.max(-VIEWPORT_MARGIN * ylen),
            bottom: self.bottom.min((1.0 + VIEWPORT_MARGIN) * ylen),
        }
    }
}

/// First defined pixel position of the data coordinates produced by
///   `coord` over `indices`
fn first_valid<A, I, F>(axis: &A, indices: I, coord: F) -> Option<f64>
    where A: Axis + ?Sized,
          I: Iterator<Item = usize>,
          F: Fn(usize) -> f64,
{
    indices
        .filter_map(|i| axis.c2p(coord(i)))
        .find(|p| !p.is_nan())
}

/// Compute the device rectangle of `grid`
///
/// Edges are taken from the first column (row) whose transformed
///   coordinate is defined, scanning inwards from each side; this skips
///   e.g. the non-positive part of a grid on a log axis. When `crop` is set
///   the rectangle is limited to the viewport plus margin (see
///   [DeviceRect::crop]) so a deep zoom never allocates a raster the size
///   of the whole grid.
///
/// Returns `None` when the trace is off-screen: the rectangle is empty or
///   some edge has no defined position at all.
///
/// [DeviceRect::crop]: struct.DeviceRect.html#method.crop
pub fn resolve<X, Y>(grid: &Grid, xa: &X, ya: &Y, crop: bool) -> Option<DeviceRect>
    where X: Axis + ?Sized,
          Y: Axis + ?Sized,
{
    let (w, h) = (grid.w, grid.h);
    let left   = first_valid(xa, 0 .. w, |i| grid.x_at(i));
    let right  = first_valid(xa, (1 ..= w).rev(), |i| grid.x_at(i));
    let top    = first_valid(ya, 0 .. h, |j| grid.y_at(j));
    let bottom = first_valid(ya, (1 ..= h).rev(), |j| grid.y_at(j));

    let rect = match (left, top, right, bottom) {
        (Some(l), Some(t), Some(r), Some(b)) => DeviceRect::new(l, t, r, b),
        _ => {
            log::debug!("image trace has an edge without a defined position");
            return None;
        }
    };
    let rect = if crop {
        rect.crop(xa.length(), ya.length())
    } else {
        rect
    };
    if rect.is_empty() {
        log::debug!("image trace off-screen: {:?}", rect);
        return None;
    }
    Some(rect)
}
