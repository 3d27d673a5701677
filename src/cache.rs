//! Decoded pixel cache
//!
//! Each source backed trace keeps the decoded pixels of its source at
//!   native resolution, independent of whatever cropped or scaled raster
//!   is on display. Hover lookups read from here.

use crate::buffer::RenderingBuffer;
use crate::color::Rgba8;

/// RGBA pixels of a decoded source, `w` x `h`
///
/// The buffer is created once per trace and resized in place on every
///   draw. Until a decode has been stored after the latest resize, reads
///   return `None`.
#[derive(Debug,Clone)]
pub struct DecodedPixelCache {
    rbuf: RenderingBuffer,
    ready: bool,
}

impl Default for DecodedPixelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodedPixelCache {
    /// Create an empty, not ready cache
    pub fn new() -> Self {
        Self { rbuf: RenderingBuffer::new(0, 0, 4), ready: false }
    }
    /// Width in pixels
    pub fn width(&self) -> usize {
        self.rbuf.width
    }
    /// Height in pixels
    pub fn height(&self) -> usize {
        self.rbuf.height
    }
    /// A decode has been stored since the last `prepare`
    pub fn is_ready(&self) -> bool {
        self.ready
    }
    /// Resize to `width` x `height`, clearing the pixels
    ///
    /// The cache is no longer ready afterwards
    pub fn prepare(&mut self, width: usize, height: usize) {
        self.rbuf.resize(width, height);
        self.ready = false;
    }
    /// Store decoded RGBA pixels of an image of `width` x `height`
    ///
    /// The image is placed at the origin: parts beyond the cache are
    ///   dropped, parts of the cache beyond the image stay transparent.
    pub fn store(&mut self, data: &[u8], width: usize, height: usize) {
        debug_assert!(data.len() >= width * height * 4);
        self.rbuf.clear();
        let w = width.min(self.rbuf.width);
        for j in 0 .. height.min(self.rbuf.height) {
            let src = &data[j * width * 4 .. (j * width + w) * 4];
            self.rbuf.row_mut(j)[.. w * 4].copy_from_slice(src);
        }
        self.ready = true;
    }
    /// Pixel at column `i`, row `j`; `None` when not ready or outside
    ///
    ///     use imtrace::{DecodedPixelCache,Rgba8};
    ///
    ///     let mut cache = DecodedPixelCache::new();
    ///     cache.prepare(1, 1);
    ///     assert_eq!(cache.read(0, 0), None);
    ///     cache.store(&[1, 2, 3, 4], 1, 1);
    ///     assert_eq!(cache.read(0, 0), Some(Rgba8::new(1, 2, 3, 4)));
    ///
    pub fn read(&self, i: usize, j: usize) -> Option<Rgba8> {
        if !self.ready || i >= self.rbuf.width || j >= self.rbuf.height {
            return None;
        }
        Some(Rgba8::from_slice(&self.rbuf[(i,j)]))
    }
}
