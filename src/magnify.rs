//! Magnified pixel rendering
//!
//! Every data cell becomes one solid block of device pixels. Block edges
//!   follow the axis transforms, so cells on a log or otherwise non-linear
//!   axis get blocks of different sizes; a single scale factor for the
//!   whole image would misplace them.

use crate::axis::Axis;
use crate::base::RenderingBase;
use crate::color::ColorModel;
use crate::color::Rgba8;
use crate::grid::CellValue;
use crate::grid::Grid;
use crate::pixfmt::Pixfmt;
use crate::resolver::DeviceRect;
use crate::scaler::Scaler;

use crate::Render;

/// Pixel boundaries of the cells of a grid inside a device rectangle
#[derive(Debug,Clone,PartialEq)]
pub struct Magnifier {
    /// Column boundaries, `w + 1` entries, `None` where undefined
    ipx: Vec<Option<i64>>,
    /// Row boundaries, `h + 1` entries
    jpx: Vec<Option<i64>>,
    width: i64,
    height: i64,
}

/// Pixel offset of data coordinate `v` from `origin`, clamped to `[0,len]`
fn boundary<A: Axis + ?Sized>(axis: &A, v: f64, origin: f64, len: i64) -> Option<i64> {
    let p = axis.c2p(v)?;
    let p = (p - origin).round();
    if p.is_nan() {
        return None;
    }
    Some((p.max(0.0) as i64).min(len))
}

impl Magnifier {
    /// Compute cell boundaries of `grid` for a raster covering `rect`
    pub fn new<X, Y>(grid: &Grid, xa: &X, ya: &Y, rect: &DeviceRect) -> Self
        where X: Axis + ?Sized,
              Y: Axis + ?Sized,
    {
        let (width, height) = (rect.width().max(0), rect.height().max(0));
        let ipx = (0 ..= grid.w)
            .map(|i| boundary(xa, grid.x_at(i), rect.left, width))
            .collect();
        let jpx = (0 ..= grid.h)
            .map(|j| boundary(ya, grid.y_at(j), rect.top, height))
            .collect();
        Self { ipx, jpx, width, height }
    }
    /// Width of the raster in pixels
    pub fn width(&self) -> usize {
        self.width as usize
    }
    /// Height of the raster in pixels
    pub fn height(&self) -> usize {
        self.height as usize
    }
    /// Pixel span of column `i`, `None` if empty or undefined
    pub fn column(&self, i: usize) -> Option<(i64, i64)> {
        span(&self.ipx, i)
    }
    /// Pixel span of row `j`, `None` if empty or undefined
    pub fn row(&self, j: usize) -> Option<(i64, i64)> {
        span(&self.jpx, j)
    }
    /// Paint one block per cell into `ren`
    ///
    /// `ren` is cleared first. Columns and rows with an empty or undefined
    ///   span are skipped, as are cells for which `read_cell` has no value.
    ///   A cell whose value `scaler` maps to no color is painted fully
    ///   transparent. Colors are interpreted in `model`.
    ///
    /// Returns the number of blocks painted
    pub fn draw<R, F, S>(&self, ren: &mut R, read_cell: F, model: ColorModel, scaler: &S) -> usize
        where R: Render,
              F: Fn(usize, usize) -> Option<CellValue>,
              S: Scaler + ?Sized,
    {
        ren.clear();
        let rows: Vec<(usize, (i64, i64))> = (0 .. self.jpx.len().saturating_sub(1))
            .filter_map(|j| self.row(j).map(|s| (j, s)))
            .collect();
        let mut n = 0;
        for i in 0 .. self.ipx.len().saturating_sub(1) {
            let (ipx0, ipx1) = match self.column(i) {
                Some(s) => s,
                None => continue,
            };
            for &(j, (jpx0, jpx1)) in &rows {
                let v = match read_cell(i, j) {
                    Some(v) => v,
                    None => continue,
                };
                match scaler.scale(&v) {
                    Some(c) => {
                        log::trace!("cell ({},{}) {}", i, j, model.fill_style(&c));
                        ren.color(model.to_rgba8(&c));
                    }
                    None => ren.color(Rgba8::transparent()),
                }
                ren.fill_rect(ipx0, jpx0, ipx1, jpx1);
                n += 1;
            }
        }
        n
    }
    /// Paint the grid into a new transparent RGBA raster of the size of
    ///   the device rectangle
    pub fn rasterize<F, S>(&self, read_cell: F, model: ColorModel, scaler: &S) -> RenderingBase<Pixfmt<Rgba8>>
        where F: Fn(usize, usize) -> Option<CellValue>,
              S: Scaler + ?Sized,
    {
        let mut ren = RenderingBase::with_rgba(self.width(), self.height());
        let n = self.draw(&mut ren, read_cell, model, scaler);
        log::debug!("magnified {} cells onto {}x{} raster", n, self.width, self.height);
        ren
    }
}

fn span(px: &[Option<i64>], k: usize) -> Option<(i64, i64)> {
    let p0 = (*px.get(k)?)?;
    let p1 = (*px.get(k + 1)?)?;
    if p0 == p1 {
        None
    } else {
        Some((p0, p1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearAxis;
    use crate::LogAxis;

    #[test]
    fn boundaries_are_clamped() {
        let g = Grid::new(-1.0, 0.0, 1.0, 1.0, 4, 1);
        let xa = LinearAxis::with_scale(10.0, 0.0, 100.0);
        let rect = DeviceRect::new(0.0, 0.0, 20.0, 10.0);
        let m = Magnifier::new(&g, &xa, &xa, &rect);
        // Column 0 spans -10..0, clamped to nothing
        assert_eq!(m.column(0), None);
        assert_eq!(m.column(1), Some((0, 10)));
        assert_eq!(m.column(2), Some((10, 20)));
        // Column 3 spans 20..30, clamped to nothing
        assert_eq!(m.column(3), None);
        assert_eq!(m.row(0), Some((0, 10)));
    }

    #[test]
    fn undefined_boundaries() {
        let g = Grid::new(0.0, 1.0, 1.0, 1.0, 3, 1);
        let xa = LogAxis::new([0.0, 1.0], 100.0);
        let ya = LinearAxis::with_scale(10.0, 0.0, 100.0);
        let rect = DeviceRect::new(0.0, 10.0, 48.0, 20.0);
        let m = Magnifier::new(&g, &xa, &ya, &rect);
        // log(0) is undefined, so column 0 has no span
        assert_eq!(m.column(0), None);
        assert_eq!(m.column(1), Some((0, 30)));
        assert_eq!(m.column(2), Some((30, 48)));
        assert_eq!(m.column(3), None);
    }
}
