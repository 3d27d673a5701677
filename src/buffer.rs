//! Rendering buffer

use std::ops::Index;
use std::ops::IndexMut;

/// Rendering Buffer
///
/// Data is stored as row-major order (C-format)
#[derive(Debug,Default,Clone,PartialEq)]
pub struct RenderingBuffer {
    /// Pixel / Component level data of Image
    pub data: Vec<u8>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
    /// Bytes per pixel or number of color components
    pub bpp: usize,
}

impl RenderingBuffer {
    /// Create a new buffer of width, height, and bpp
    ///
    /// Data for the Image is allocated and zeroed (fully transparent)
    pub fn new(width: usize, height: usize, bpp: usize) -> Self {
        RenderingBuffer {
            width, height, bpp, data: vec![0u8; width * height * bpp]
        }
    }
    /// Size of underlying Rendering Buffer in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }
    /// Buffer holds no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Bytes of row `j`
    pub fn row(&self, j: usize) -> &[u8] {
        debug_assert!(j < self.height);
        let stride = self.width * self.bpp;
        &self.data[j * stride .. (j + 1) * stride]
    }
    /// Mutable bytes of row `j`
    pub fn row_mut(&mut self, j: usize) -> &mut [u8] {
        debug_assert!(j < self.height);
        let stride = self.width * self.bpp;
        &mut self.data[j * stride .. (j + 1) * stride]
    }
    /// Clear an image, all components set to 0
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|v| *v = 0);
    }
    /// Change the dimensions of the buffer and clear it
    ///
    /// The existing allocation is reused; memory is only requested when
    ///   the new size exceeds the current capacity.
    ///
    ///     use imtrace::RenderingBuffer;
    ///
    ///     let mut rbuf = RenderingBuffer::new(4, 4, 4);
    ///     let cap = rbuf.data.capacity();
    ///     rbuf.resize(2, 3);
    ///     assert_eq!(rbuf.len(), 2 * 3 * 4);
    ///     assert_eq!(rbuf.data.capacity(), cap);
    ///
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width * height * self.bpp, 0);
    }
}

impl Index<(usize,usize)> for RenderingBuffer {
    type Output = [u8];
    fn index(&self, index: (usize, usize)) -> &[u8] {
        assert!(index.0 < self.width, "request {} >= {} width :: index", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index", index.1, self.height);
        let i = ((index.1 * self.width) + index.0) * self.bpp;
        &self.data[i..i + self.bpp]
    }
}
impl IndexMut<(usize,usize)> for RenderingBuffer {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut [u8] {
        assert!(index.0 < self.width, "request {} >= {} width :: index_mut", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index_mut", index.1, self.height);
        let i = ((index.1 * self.width) + index.0) * self.bpp;
        &mut self.data[i..i + self.bpp]
    }
}

#[cfg(test)]
mod tests {
    use super::RenderingBuffer;

    #[test]
    fn index_pixel() {
        let mut rbuf = RenderingBuffer::new(3, 2, 4);
        rbuf[(2,1)].copy_from_slice(&[1,2,3,4]);
        assert_eq!(&rbuf[(2,1)], &[1,2,3,4]);
        assert_eq!(&rbuf.row(1)[8..], &[1,2,3,4]);
        assert_eq!(rbuf.row(0), &[0u8; 12][..]);
    }

    #[test]
    fn resize_clears() {
        let mut rbuf = RenderingBuffer::new(2, 2, 4);
        rbuf.data.iter_mut().for_each(|v| *v = 9);
        rbuf.resize(2, 2);
        assert!(rbuf.data.iter().all(|&v| v == 0));
        rbuf.resize(0, 5);
        assert!(rbuf.is_empty());
    }
}
