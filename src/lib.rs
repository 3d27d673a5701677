//! Image trace rendering
//!
//! Draws a grid of cell values, or an encoded image, into the device space
//!   of a chart as a pixelated image.
//!
//! How does this work
//!
//! ```text
//! plotter.plot(trace, xa, ya)
//!   resolve()                  -- grid corners -> DeviceRect, crop on slow path
//!   trace.begin_draw()         -- newer draws supersede pending ones
//!   fast path
//!     attach(Source)           -- display layer upscales, no smoothing
//!     spawn(load, decode)      -- fills DecodedPixelCache for hover
//!   slow path
//!     load().await, decode     -- only for a source without values
//!     Magnifier::new()         -- cell boundaries in device pixels
//!     rasterize()              -- one RenderingBase::fill_rect per cell
//!       scaler.scale(value)    -- None -> transparent block
//!     encode_png(), attach(DataUrl)
//! ```
//!
//! A minimal slow path draw:
//!
//!     use imtrace::*;
//!     use futures::executor::{block_on,LocalPool};
//!
//!     let trace = ImageTrace::new(&TraceConfig::from_json(r#"{
//!         "z": [[[255,0,0], [0,0,255]]]
//!     }"#).unwrap()).unwrap();
//!     let pool = LocalPool::new();
//!     let plotter = Plotter::new(DefaultLoader::new(), pool.spawner(),
//!                                Capabilities::default());
//!     let xa = LinearAxis::with_scale(10.0, 0.0, 100.0);
//!     let ya = LinearAxis::with_scale(10.0, 0.0, 100.0);
//!     match block_on(plotter.plot(&trace, &xa, &ya)).unwrap() {
//!         DrawOutcome::Attached(e) => {
//!             assert_eq!((e.width, e.height), (20, 10));
//!             assert!(matches!(e.href, Some(Href::DataUrl(_))));
//!         }
//!         other => panic!("unexpected {:?}", other),
//!     }
//!

pub mod axis;
pub mod base;
pub mod buffer;
pub mod cache;
pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod loader;
pub mod magnify;
pub mod pixfmt;
pub mod plot;
pub mod resolver;
pub mod scaler;
pub mod trace;

pub use axis::*;
pub use base::*;
pub use buffer::*;
pub use cache::*;
pub use color::*;
pub use config::*;
pub use error::*;
pub use grid::*;
pub use loader::*;
pub use magnify::*;
pub use pixfmt::*;
pub use plot::*;
pub use resolver::*;
pub use scaler::*;
pub use trace::*;

/// Access to the raw bytes of an image
pub trait PixelData {
    fn pixeldata(&self) -> &[u8];
}

/// Access Color properties and components
pub trait Color: std::fmt::Debug + Copy {
    /// Get red value [0,1] as f64
    fn red(&self) -> f64;
    /// Get green value [0,1] as f64
    fn green(&self) -> f64;
    /// Get blue value [0,1] as f64
    fn blue(&self) -> f64;
    /// Get alpha value [0,1] as f64
    fn alpha(&self) -> f64;
    /// Get red value [0,255] as u8
    fn red8(&self) -> u8;
    /// Get green value [0,255] as u8
    fn green8(&self) -> u8;
    /// Get blue value [0,255] as u8
    fn blue8(&self) -> u8;
    /// Get alpha value [0,255] as u8
    fn alpha8(&self) -> u8;
}

/// Read pixels of an image
pub trait Source {
    fn get(&self, id: (usize, usize)) -> Rgba8;
}

/// Write pixels of an image
pub trait Pixel {
    /// Bytes per pixel
    fn bpp() -> usize;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn set<C: Color>(&mut self, id: (usize, usize), c: C);
}

/// Fill solid rectangles
pub trait Render {
    /// Set the fill color
    fn color<C: Color>(&mut self, color: C);
    /// Fill the pixels from (`x1`,`y1`) up to, not including, (`x2`,`y2`)
    fn fill_rect(&mut self, x1: i64, y1: i64, x2: i64, y2: i64);
    /// Reset every pixel to transparent
    fn clear(&mut self);
}
