//! Drawing of image traces
//!
//! A draw places the trace's image in device space and attaches its
//!   content. There are two ways to produce that content:
//!
//! - **fast**: the display layer can upscale without smoothing, so the
//!   source itself is attached and stretched over the whole, uncropped
//!   rectangle. The source is decoded into the pixel cache in the
//!   background for hover lookups.
//! - **slow**: every cell is painted as a block of device pixels onto a
//!   raster limited to the viewport, which is encoded as PNG. A source is
//!   decoded first and painted from the pixel cache, unless the trace has
//!   values of its own; then the source fills the cache in the background
//!   as on the fast path.
//!
//! Draws may overlap when a load suspends. Each draw takes a new id from
//!   its trace; a draw that is no longer the latest when its load
//!   completes neither fills the cache nor attaches anything.

use crate::axis::Axis;
use crate::codec;
use crate::config::Capabilities;
use crate::error::Result;
use crate::grid::CellValue;
use crate::loader::ResourceLoader;
use crate::magnify::Magnifier;
use crate::resolver;
use crate::resolver::DeviceRect;
use crate::trace::Href;
use crate::trace::ImageElement;
use crate::trace::ImageTrace;

use crate::PixelData;

use futures::task::LocalSpawn;
use futures::task::LocalSpawnExt;

/// Result of a draw
#[derive(Debug,Clone,PartialEq)]
pub enum DrawOutcome {
    /// Nothing of the trace is visible; any displayed image was removed
    OffScreen,
    /// The trace has neither values nor a source
    Empty,
    /// Image now on display
    Attached(ImageElement),
    /// A newer draw started while this one was loading
    Superseded,
}

/// Draws image traces
///
/// `loader` fetches sources, `spawner` runs background cache fills for
///   sources that are not painted.
#[derive(Debug)]
pub struct Plotter<L, S> {
    loader: L,
    spawner: S,
    caps: Capabilities,
}

impl<L, S> Plotter<L, S> where L: ResourceLoader, S: LocalSpawn {
    /// Create a plotter for an environment with capabilities `caps`
    pub fn new(loader: L, spawner: S, caps: Capabilities) -> Self {
        Self { loader, spawner, caps }
    }
    /// Capabilities of the environment
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }
    /// `trace` is drawn by attaching its source directly
    pub fn is_fast(&self, trace: &ImageTrace) -> bool {
        self.caps.supports_pixelated_image() && !trace.is_source_empty()
    }
    /// Draw `trace` against the axes `xa` and `ya`
    ///
    /// Errors from loading or decoding a source that is painted remove
    ///   the displayed image; the next draw tries again.
    pub async fn plot<X, Y>(&self, trace: &ImageTrace, xa: &X, ya: &Y) -> Result<DrawOutcome>
        where X: Axis + ?Sized,
              Y: Axis + ?Sized,
    {
        if trace.values().is_none() && trace.is_source_empty() {
            trace.cancel();
            trace.clear_element();
            return Ok(DrawOutcome::Empty);
        }
        let fast = self.is_fast(trace);
        let rect = match resolver::resolve(trace.grid(), xa, ya, !fast) {
            Some(rect) => rect,
            None => {
                trace.cancel();
                trace.clear_element();
                return Ok(DrawOutcome::OffScreen);
            }
        };
        let id = trace.begin_draw();
        trace.place(&rect);
        log::debug!("draw {} of {:?} at {:?} fast: {}", id, trace, rect, fast);

        if let Some(source) = trace.source() {
            trace.prepare_cache();
            let load = self.loader.load(source);
            if fast {
                self.spawn_cache_fill(trace, id, load);
                return Ok(self.attach(trace, id, Href::Source(source.to_string())));
            }
            if trace.values().is_some() {
                // Painted from z; the cache only serves hover lookups
                self.spawn_cache_fill(trace, id, load);
                return self.paint(trace, id, xa, ya, &rect);
            }
            let decoded = load.await.and_then(|bytes| codec::decode_rgba(&bytes));
            if !trace.is_current(id) {
                log::debug!("draw {} superseded while loading", id);
                return Ok(DrawOutcome::Superseded);
            }
            match decoded {
                Ok((data, w, h)) => trace.store_decoded(&data, w, h),
                Err(e) => {
                    log::warn!("draw {} of {} failed: {}", id, codec::truncate(source), e);
                    trace.clear_element();
                    return Err(e);
                }
            }
        }
        self.paint(trace, id, xa, ya, &rect)
    }

    fn paint<X, Y>(&self, trace: &ImageTrace, id: u32, xa: &X, ya: &Y, rect: &DeviceRect)
                   -> Result<DrawOutcome>
        where X: Axis + ?Sized,
              Y: Axis + ?Sized,
    {
        let mag = Magnifier::new(trace.grid(), xa, ya, rect);
        let model = trace.colormodel();
        let ren = match trace.values() {
            Some(z) => mag.rasterize(|i, j| z.get(i, j), model, trace.scaler()),
            None => trace.with_cache(|cache| {
                mag.rasterize(|i, j| cache.read(i, j).map(CellValue::from), model, trace.scaler())
            }),
        };
        let png = codec::encode_png(ren.pixeldata(), ren.width(), ren.height())?;
        Ok(self.attach(trace, id, Href::DataUrl(codec::png_data_url(&png))))
    }

    fn attach(&self, trace: &ImageTrace, id: u32, href: Href) -> DrawOutcome {
        if !trace.is_current(id) {
            return DrawOutcome::Superseded;
        }
        match trace.attach(href) {
            Some(e) => DrawOutcome::Attached(e),
            None => DrawOutcome::OffScreen,
        }
    }

    fn spawn_cache_fill(&self, trace: &ImageTrace, id: u32,
                        load: futures::future::LocalBoxFuture<'static, Result<Vec<u8>>>) {
        let trace = trace.clone();
        let fill = async move {
            match load.await.and_then(|bytes| codec::decode_rgba(&bytes)) {
                Ok((data, w, h)) if trace.is_current(id) => {
                    trace.store_decoded(&data, w, h);
                    log::debug!("draw {} filled pixel cache {}x{}", id, w, h);
                }
                Ok(_) => log::debug!("draw {} superseded, decode dropped", id),
                Err(e) => log::warn!("draw {} could not fill pixel cache: {}", id, e),
            }
        };
        if let Err(e) = self.spawner.spawn_local(fill) {
            log::warn!("draw {} could not start cache fill: {}", id, e);
        }
    }
}
