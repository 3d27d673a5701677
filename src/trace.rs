//! Per trace state

use crate::cache::DecodedPixelCache;
use crate::color::ColorModel;
use crate::color::Rgba8;
use crate::config::TraceConfig;
use crate::error::Result;
use crate::grid::CellValue;
use crate::grid::CellValues;
use crate::grid::Grid;
use crate::resolver::DeviceRect;
use crate::scaler::Scaler;

use std::cell::Cell;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Content of a displayed image
#[derive(Debug,Clone,PartialEq)]
pub enum Href {
    /// The trace's source, scaled by the display layer without smoothing
    Source(String),
    /// Encoded raster produced by magnified rendering
    DataUrl(String),
}

/// Image handed to the display layer
///
/// The image is stretched to `width` x `height` at (`x`,`y`) without
///   preserving its aspect ratio, using pixelated (nearest neighbour)
///   rendering.
#[derive(Debug,Clone,PartialEq)]
pub struct ImageElement {
    pub x: f64,
    pub y: f64,
    pub width: i64,
    pub height: i64,
    /// `None` until the content of the current draw is ready
    pub href: Option<Href>,
}

struct TraceData {
    grid: Grid,
    values: Option<CellValues>,
    source: Option<String>,
    model: ColorModel,
    scaler: Box<dyn Scaler>,
}

#[derive(Default)]
struct TraceState {
    cache: DecodedPixelCache,
    element: Option<ImageElement>,
}

/// Handle to one image trace
///
/// Clones share the same cache, displayed element and draw counter, so a
///   pending draw can hold on to its trace while a newer draw starts.
#[derive(Clone)]
pub struct ImageTrace {
    data: Rc<TraceData>,
    state: Rc<RefCell<TraceState>>,
    render_id: Rc<Cell<u32>>,
}

impl fmt::Debug for ImageTrace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ImageTrace")
            .field("grid", &self.data.grid)
            .field("model", &self.data.model)
            .field("has_values", &self.data.values.is_some())
            .field("has_source", &self.data.source.is_some())
            .field("render_id", &self.render_id.get())
            .finish()
    }
}

impl ImageTrace {
    /// Trace using the default color function of its configuration
    pub fn new(config: &TraceConfig) -> Result<Self> {
        config.validate()?;
        let scaler = config.scaler();
        Self::with_scaler(config, scaler)
    }
    /// Trace with an explicit color function
    pub fn with_scaler<S: Scaler + 'static>(config: &TraceConfig, scaler: S) -> Result<Self> {
        config.validate()?;
        let data = TraceData {
            grid: config.grid()?,
            values: config.values(),
            source: if config.is_source_empty() { None } else { config.source.clone() },
            model: config.colormodel(),
            scaler: Box::new(scaler),
        };
        log::debug!("new image trace {}x{} {}", data.grid.w, data.grid.h, data.model);
        Ok(Self {
            data: Rc::new(data),
            state: Rc::new(RefCell::new(TraceState::default())),
            render_id: Rc::new(Cell::new(0)),
        })
    }
    /// Grid covered by the trace
    pub fn grid(&self) -> &Grid {
        &self.data.grid
    }
    /// Cell values, if given directly
    pub fn values(&self) -> Option<&CellValues> {
        self.data.values.as_ref()
    }
    /// Encoded image source, if any
    pub fn source(&self) -> Option<&str> {
        self.data.source.as_deref()
    }
    /// Color model of the trace
    pub fn colormodel(&self) -> ColorModel {
        self.data.model
    }
    /// Color function of the trace
    pub fn scaler(&self) -> &dyn Scaler {
        &*self.data.scaler
    }
    /// No source to decode
    pub fn is_source_empty(&self) -> bool {
        self.data.source.is_none()
    }
    /// Currently displayed image, if any
    pub fn element(&self) -> Option<ImageElement> {
        self.state.borrow().element.clone()
    }
    /// Decoded source pixel at column `i`, row `j`
    ///
    /// `None` until the decode of the latest draw has completed
    pub fn read_cached_pixel(&self, i: usize, j: usize) -> Option<Rgba8> {
        self.state.borrow().cache.read(i, j)
    }
    /// Decoded source pixels are available
    pub fn is_cache_ready(&self) -> bool {
        self.state.borrow().cache.is_ready()
    }
    /// Value under the data point (`x`,`y`), for hover labels
    ///
    /// Direct cell values take precedence; otherwise the decoded source
    ///   pixel is returned as an RGBA tuple.
    pub fn value_at(&self, x: f64, y: f64) -> Option<CellValue> {
        let (i, j) = self.grid().cell_at(x, y)?;
        if let Some(z) = self.values() {
            return z.get(i, j);
        }
        self.read_cached_pixel(i, j).map(CellValue::from)
    }
    /// Abandon any draw in progress; it will neither attach nor fill the
    ///   cache when it completes
    pub fn cancel(&self) {
        self.render_id.set(self.render_id.get().wrapping_add(1));
    }

    /// Start a new draw, superseding any pending one
    pub(crate) fn begin_draw(&self) -> u32 {
        self.cancel();
        self.render_id.get()
    }
    /// Draw `id` is the latest one
    pub(crate) fn is_current(&self, id: u32) -> bool {
        self.render_id.get() == id
    }
    /// Move the displayed image to `rect`, keeping its content
    pub(crate) fn place(&self, rect: &DeviceRect) {
        let mut state = self.state.borrow_mut();
        let href = state.element.take().and_then(|e| e.href);
        state.element = Some(ImageElement {
            x: rect.left,
            y: rect.top,
            width: rect.width(),
            height: rect.height(),
            href,
        });
    }
    /// Set the content of the displayed image
    pub(crate) fn attach(&self, href: Href) -> Option<ImageElement> {
        let mut state = self.state.borrow_mut();
        let element = state.element.as_mut()?;
        element.href = Some(href);
        Some(element.clone())
    }
    /// Remove the displayed image
    pub(crate) fn clear_element(&self) {
        self.state.borrow_mut().element = None;
    }
    /// Size the cache to the grid, invalidating it
    pub(crate) fn prepare_cache(&self) {
        let g = self.data.grid;
        self.state.borrow_mut().cache.prepare(g.w, g.h);
    }
    /// Store decoded pixels
    pub(crate) fn store_decoded(&self, data: &[u8], width: usize, height: usize) {
        self.state.borrow_mut().cache.store(data, width, height);
    }
    /// Run `f` with the decoded pixel cache
    pub(crate) fn with_cache<T, F: FnOnce(&DecodedPixelCache) -> T>(&self, f: F) -> T {
        f(&self.state.borrow().cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_supersede() {
        let t = ImageTrace::new(&TraceConfig::default()).unwrap();
        let a = t.begin_draw();
        assert!(t.is_current(a));
        let b = t.clone().begin_draw();
        assert!(!t.is_current(a));
        assert!(t.is_current(b));
        t.cancel();
        assert!(!t.is_current(b));
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let cfg = TraceConfig {
            z: Some(vec![vec![Some(CellValue::Scalar(1.0))]]),
            zmin: Some(vec![0.0; 5]),
            ..TraceConfig::default()
        };
        assert!(matches!(ImageTrace::new(&cfg), Err(crate::Error::Config(_))));
        let cfg = TraceConfig { dy: 0.0, ..TraceConfig::default() };
        assert!(matches!(ImageTrace::new(&cfg), Err(crate::Error::Config(_))));
    }

    #[test]
    fn place_keeps_content() {
        let t = ImageTrace::new(&TraceConfig::default()).unwrap();
        assert_eq!(t.attach(Href::Source("a.png".into())), None);
        t.place(&DeviceRect::new(1.0, 2.0, 11.0, 7.0));
        t.attach(Href::Source("a.png".into()));
        t.place(&DeviceRect::new(0.0, 0.0, 4.0, 4.0));
        let e = t.element().unwrap();
        assert_eq!((e.x, e.y, e.width, e.height), (0.0, 0.0, 4, 4));
        assert_eq!(e.href, Some(Href::Source("a.png".into())));
        t.clear_element();
        assert_eq!(t.element(), None);
    }

    #[test]
    fn hover_values() {
        let cfg = TraceConfig::from_json(r#"{"z": [[1, 2], [3, null]], "x0": 10}"#).unwrap();
        let t = ImageTrace::new(&cfg).unwrap();
        assert_eq!(t.value_at(11.5, 0.5), Some(CellValue::Scalar(2.0)));
        assert_eq!(t.value_at(10.0, 1.0), Some(CellValue::Scalar(3.0)));
        assert_eq!(t.value_at(11.0, 1.0), None);
        assert_eq!(t.value_at(9.0, 0.0), None);
    }

    #[test]
    fn hover_on_source() {
        let cfg = TraceConfig {
            source: Some("img.png".into()),
            w: Some(1),
            h: Some(1),
            ..TraceConfig::default()
        };
        let t = ImageTrace::new(&cfg).unwrap();
        t.prepare_cache();
        assert_eq!(t.value_at(0.5, 0.5), None);
        t.store_decoded(&[10, 20, 30, 255], 1, 1);
        assert_eq!(t.value_at(0.5, 0.5), Some(CellValue::Color([10.0, 20.0, 30.0, 255.0])));
        assert_eq!(t.read_cached_pixel(0, 0), Some(Rgba8::new(10, 20, 30, 255)));
    }
}
