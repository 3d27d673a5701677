//! Data grid
//!
//! Three coordinate spaces meet in an image trace:
//!
//!  - grid indices `(i, j)`: column and row of a cell
//!  - data coordinates: position along the axes, `x0 + i * dx`
//!  - device pixels: the result of an [Axis] transform of a data coordinate
//!
//! Conversions between indices and data live here; data to pixels is the
//!   job of the axes.
//!
//! [Axis]: ../axis/trait.Axis.html

use crate::color::ColorTuple;
use crate::color::Rgba8;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Regular grid of data cells
///
/// Cell `(i,j)` spans `[x0+i*dx, x0+(i+1)*dx) x [y0+j*dy, y0+(j+1)*dy)`;
///   `dx` and `dy` may be negative.
#[derive(Debug,Copy,Clone,PartialEq,Serialize,Deserialize)]
pub struct Grid {
    pub x0: f64,
    pub y0: f64,
    pub dx: f64,
    pub dy: f64,
    /// Number of columns
    pub w: usize,
    /// Number of rows
    pub h: usize,
}

impl Grid {
    /// Create a new grid
    pub fn new(x0: f64, y0: f64, dx: f64, dy: f64, w: usize, h: usize) -> Self {
        Self { x0, y0, dx, dy, w, h }
    }
    /// Data coordinate of the left edge of column `i`
    ///
    /// `i == w` is the right edge of the last column
    pub fn x_at(&self, i: usize) -> f64 {
        self.x0 + i as f64 * self.dx
    }
    /// Data coordinate of the top edge of row `j`
    pub fn y_at(&self, j: usize) -> f64 {
        self.y0 + j as f64 * self.dy
    }
    /// Grid has no cells
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    /// Cell containing the data point (`x`,`y`)
    ///
    ///     use imtrace::Grid;
    ///
    ///     let g = Grid::new(0.0, 0.0, 2.0, -1.0, 3, 2);
    ///     assert_eq!(g.cell_at(4.5, -0.5), Some((2,0)));
    ///     assert_eq!(g.cell_at(6.0, -0.5), None);
    ///     assert_eq!(g.cell_at(1.0, 0.5), None);
    ///
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let i = ((x - self.x0) / self.dx).floor();
        let j = ((y - self.y0) / self.dy).floor();
        if !i.is_finite() || !j.is_finite() || i < 0.0 || j < 0.0 {
            return None;
        }
        let (i, j) = (i as usize, j as usize);
        if i < self.w && j < self.h {
            Some((i, j))
        } else {
            None
        }
    }
}

/// Raw value of a single cell
#[derive(Debug,Copy,Clone,PartialEq,Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Single number, colored by a scale
    Scalar(f64),
    /// Color components, interpreted through a color model
    Color(ColorTuple),
}

impl CellValue {
    /// Color from the components of a slice, missing components are 0
    pub fn from_components(c: &[f64]) -> Self {
        let mut t = [0.0; 4];
        for (dst, src) in t.iter_mut().zip(c) {
            *dst = *src;
        }
        CellValue::Color(t)
    }
    /// Value carries a usable number
    pub fn is_defined(&self) -> bool {
        match self {
            CellValue::Scalar(v) => !v.is_nan(),
            CellValue::Color(_) => true,
        }
    }
}

impl From<Rgba8> for CellValue {
    fn from(c: Rgba8) -> Self {
        CellValue::Color([f64::from(c.r), f64::from(c.g), f64::from(c.b), f64::from(c.a)])
    }
}

/// Cell values stored row by row, `z[j][i]`
///
/// Rows may be ragged; absent entries are missing cells.
#[derive(Debug,Default,Clone,PartialEq)]
pub struct CellValues {
    rows: Vec<Vec<Option<CellValue>>>,
}

impl CellValues {
    /// Wrap rows of cells
    pub fn new(rows: Vec<Vec<Option<CellValue>>>) -> Self {
        Self { rows }
    }
    /// Rows of plain numbers
    pub fn from_scalars(rows: Vec<Vec<f64>>) -> Self {
        let rows = rows.into_iter()
            .map(|r| r.into_iter().map(|v| Some(CellValue::Scalar(v))).collect())
            .collect();
        Self { rows }
    }
    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows.len()
    }
    /// Length of the longest row
    pub fn columns(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }
    /// Has no values at all
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.columns() == 0
    }
    /// Value of column `i`, row `j`; `None` for missing cells
    pub fn get(&self, i: usize, j: usize) -> Option<CellValue> {
        self.rows.get(j)
            .and_then(|r| r.get(i))
            .and_then(|v| *v)
            .filter(|v| v.is_defined())
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        // Tuples arrive with 3 or 4 components
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Scalar(f64),
            Color(Vec<f64>),
        }
        Ok(match Raw::deserialize(d)? {
            Raw::Scalar(v) => CellValue::Scalar(v),
            Raw::Color(c) => CellValue::from_components(&c),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_to_data() {
        let g = Grid::new(1.0, 10.0, 0.5, -2.0, 4, 3);
        assert_eq!(g.x_at(0), 1.0);
        assert_eq!(g.x_at(4), 3.0);
        assert_eq!(g.y_at(3), 4.0);
        assert!(!g.is_empty());
        assert!(Grid::new(0.0, 0.0, 1.0, 1.0, 0, 3).is_empty());
    }

    #[test]
    fn missing_cells() {
        let z = CellValues::new(vec![
            vec![Some(CellValue::Scalar(1.0)), None],
            vec![Some(CellValue::Scalar(f64::NAN))],
        ]);
        assert_eq!(z.rows(), 2);
        assert_eq!(z.columns(), 2);
        assert_eq!(z.get(0, 0), Some(CellValue::Scalar(1.0)));
        assert_eq!(z.get(1, 0), None);
        assert_eq!(z.get(0, 1), None);
        assert_eq!(z.get(1, 1), None);
        assert_eq!(z.get(5, 5), None);
    }

    #[test]
    fn untagged_values() {
        let v: Vec<Option<CellValue>> = serde_json::from_str("[1.5, [1, 2, 3, 0.5], null]").unwrap();
        assert_eq!(v[0], Some(CellValue::Scalar(1.5)));
        assert_eq!(v[1], Some(CellValue::Color([1.0, 2.0, 3.0, 0.5])));
        assert_eq!(v[2], None);
        let c: CellValue = serde_json::from_str("[7, 8, 9]").unwrap();
        assert_eq!(c, CellValue::Color([7.0, 8.0, 9.0, 0.0]));
        assert_eq!(CellValue::from_components(&[7.0, 8.0, 9.0]),
                   CellValue::Color([7.0, 8.0, 9.0, 0.0]));
    }
}
