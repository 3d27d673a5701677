//! Trace configuration
//!
//! Traces are described in JSON, in the shape charting libraries use:
//!
//!     use imtrace::{ColorModel,TraceConfig};
//!
//!     let cfg = TraceConfig::from_json(r#"{
//!         "z": [[[255, 0, 0], [0, 255, 0]]],
//!         "x0": 10, "dx": 2
//!     }"#).unwrap();
//!     assert_eq!(cfg.colormodel(), ColorModel::Rgb);
//!     let grid = cfg.grid().unwrap();
//!     assert_eq!((grid.w, grid.h), (2, 1));
//!     assert_eq!(grid.x_at(1), 12.0);
//!

use crate::codec;
use crate::color::ColorModel;
use crate::color::ColorTuple;
use crate::error::Error;
use crate::error::Result;
use crate::grid::CellValue;
use crate::grid::CellValues;
use crate::grid::Grid;
use crate::scaler::LinearScaler;

use serde::Deserialize;
use serde::Serialize;

/// Description of one image trace
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Data coordinate of the left edge of the first column
    pub x0: f64,
    /// Data coordinate of the top edge of the first row
    pub y0: f64,
    /// Cell width in data units
    pub dx: f64,
    /// Cell height in data units
    pub dy: f64,
    /// Cell values, row by row
    pub z: Option<Vec<Vec<Option<CellValue>>>>,
    /// Encoded image, as `data:` URL or path
    pub source: Option<String>,
    /// Interpretation of color tuples; defaults to `rgb`, or `rgba256` for
    ///   a trace given only by its source
    pub colormodel: Option<ColorModel>,
    /// Lower bound of each component fed to the color function
    pub zmin: Option<Vec<f64>>,
    /// Upper bound of each component fed to the color function
    pub zmax: Option<Vec<f64>>,
    /// Number of columns of a source-only trace
    pub w: Option<usize>,
    /// Number of rows of a source-only trace
    pub h: Option<usize>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            x0: 0.0, y0: 0.0, dx: 1.0, dy: 1.0,
            z: None, source: None, colormodel: None,
            zmin: None, zmax: None, w: None, h: None,
        }
    }
}

/// Capabilities of the environment the chart is drawn in
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Serialize,Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Display layer can upscale images without smoothing
    pub pixelated_images: bool,
    /// Drawing for export or print rather than on screen
    pub exported: bool,
}

impl Capabilities {
    /// Native pixelated upscaling is usable
    pub fn supports_pixelated_image(&self) -> bool {
        self.pixelated_images && !self.exported
    }
}

impl TraceConfig {
    /// Parse and validate a trace description
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: TraceConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
    /// Check cell sizes and color ranges
    pub fn validate(&self) -> Result<()> {
        for (name, v) in &[("x0", self.x0), ("y0", self.y0)] {
            if !v.is_finite() {
                return Err(Error::Config(format!("{} must be finite, got {}", name, v)));
            }
        }
        for (name, v) in &[("dx", self.dx), ("dy", self.dy)] {
            if !v.is_finite() || *v == 0.0 {
                return Err(Error::Config(format!("{} must be finite and non-zero, got {}", name, v)));
            }
        }
        for (name, r) in &[("zmin", &self.zmin), ("zmax", &self.zmax)] {
            if let Some(r) = r {
                if r.len() > 4 {
                    return Err(Error::Config(format!("{} has {} components, at most 4 allowed", name, r.len())));
                }
            }
        }
        Ok(())
    }
    /// No cell values given
    pub fn is_z_empty(&self) -> bool {
        self.z.as_ref().map(|z| z.iter().all(|r| r.is_empty())).unwrap_or(true)
    }
    /// No source given
    pub fn is_source_empty(&self) -> bool {
        self.source.as_ref().map(|s| s.is_empty()).unwrap_or(true)
    }
    /// Color model in effect
    pub fn colormodel(&self) -> ColorModel {
        match self.colormodel {
            Some(m) => m,
            None if self.is_z_empty() && !self.is_source_empty() => ColorModel::Rgba256,
            None => ColorModel::Rgb,
        }
    }
    /// Cell values, if any
    pub fn values(&self) -> Option<CellValues> {
        if self.is_z_empty() {
            return None;
        }
        self.z.clone().map(CellValues::new)
    }
    /// Grid covered by the trace
    ///
    /// Its size comes from the cell values when present; a source-only
    ///   trace takes explicit `w` and `h` or the size in the source's image
    ///   header.
    pub fn grid(&self) -> Result<Grid> {
        let (w, h) = match (self.values(), self.w, self.h) {
            (Some(z), _, _) => (z.columns(), z.rows()),
            (None, Some(w), Some(h)) => (w, h),
            (None, _, _) => match &self.source {
                Some(s) if codec::is_data_url(s) => {
                    codec::header_dimensions(&codec::parse_data_url(s)?)?
                }
                Some(_) => {
                    return Err(Error::Config("w and h are required for a source that is not a data url".into()));
                }
                None => (0, 0),
            },
        };
        Ok(Grid::new(self.x0, self.y0, self.dx, self.dy, w, h))
    }
    /// Default color function: linear from `zmin..zmax` onto the color model
    pub fn scaler(&self) -> LinearScaler {
        let m = self.colormodel();
        let pad = |given: &Option<Vec<f64>>, dflt: ColorTuple| {
            let mut t = dflt;
            if let Some(v) = given {
                for (d, s) in t.iter_mut().zip(v) {
                    *d = *s;
                }
            }
            t
        };
        LinearScaler::with_range(m,
                                 pad(&self.zmin, m.zmin_default()),
                                 pad(&self.zmax, m.zmax_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = TraceConfig::from_json("{}").unwrap();
        assert_eq!(cfg, TraceConfig::default());
        assert!(cfg.is_z_empty());
        assert!(cfg.is_source_empty());
        let g = cfg.grid().unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn source_defaults_to_rgba256() {
        let cfg = TraceConfig::from_json(r#"{"source": "img.png", "w": 3, "h": 2}"#).unwrap();
        assert_eq!(cfg.colormodel(), ColorModel::Rgba256);
        assert_eq!(cfg.grid().unwrap(), Grid::new(0.0, 0.0, 1.0, 1.0, 3, 2));

        let cfg = TraceConfig::from_json(r#"{"source": "img.png"}"#).unwrap();
        assert!(matches!(cfg.grid(), Err(Error::Config(_))));
    }

    #[test]
    fn source_size_from_header() {
        let png = codec::encode_png(&[0u8; 5 * 4 * 4], 5, 4).unwrap();
        let cfg = TraceConfig {
            source: Some(codec::png_data_url(&png)),
            ..TraceConfig::default()
        };
        let g = cfg.grid().unwrap();
        assert_eq!((g.w, g.h), (5, 4));
    }

    #[test]
    fn ragged_rows() {
        let cfg = TraceConfig::from_json(r#"{"z": [[1, 2, 3], [4]], "colormodel": "hsl"}"#).unwrap();
        let g = cfg.grid().unwrap();
        assert_eq!((g.w, g.h), (3, 2));
        assert_eq!(cfg.colormodel(), ColorModel::Hsl);
        assert_eq!(cfg.values().unwrap().get(2, 1), None);
    }

    #[test]
    fn invalid() {
        assert!(matches!(TraceConfig::from_json(r#"{"dx": 0}"#), Err(Error::Config(_))));
        assert!(matches!(TraceConfig::from_json(r#"{"zmin": [0,0,0,0,0]}"#), Err(Error::Config(_))));
        assert!(matches!(TraceConfig::from_json(r#"{"colormodel": "cmyk"}"#), Err(Error::Json(_))));
    }

    #[test]
    fn partial_ranges() {
        let cfg = TraceConfig::from_json(r#"{"z": [[[1,2,3]]], "zmax": [1, 1]}"#).unwrap();
        let s = cfg.scaler();
        assert_eq!(s.zmax, [1.0, 1.0, 255.0, 0.0]);
        assert_eq!(s.zmin, [0.0; 4]);
    }

    #[test]
    fn long_ranges_are_cut() {
        let cfg = TraceConfig { zmax: Some(vec![1.0; 6]), ..TraceConfig::default() };
        assert_eq!(cfg.scaler().zmax, [1.0; 4]);
    }

    #[test]
    fn capabilities() {
        let caps: Capabilities = serde_json::from_str(r#"{"pixelated_images": true}"#).unwrap();
        assert!(caps.supports_pixelated_image());
        let caps = Capabilities { exported: true, ..caps };
        assert!(!caps.supports_pixelated_image());
    }
}
