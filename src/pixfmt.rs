//! Pixel Format

use crate::buffer::RenderingBuffer;
use crate::color::Rgba8;

use crate::Color;
use crate::Pixel;
use crate::PixelData;
use crate::Source;

use std::marker::PhantomData;

/// Pixel Format Wrapper around raw pixel component data
///
#[derive(Debug,Clone,PartialEq)]
pub struct Pixfmt<T> {
    rbuf: RenderingBuffer,
    phantom: PhantomData<T>,
}

impl<T> Pixfmt<T> where Pixfmt<T>: Pixel {
    /// Create new Pixel Format of width * height * bpp
    ///
    /// Allocates memory of width * height * bpp, all pixels transparent
    pub fn new(width: usize, height: usize) -> Self {
        Self { rbuf: RenderingBuffer::new(width, height, Self::bpp()),
               phantom: PhantomData
        }
    }
    /// Size of Rendering Buffer in bytes; width * height * bpp
    pub fn size(&self) -> usize {
        self.rbuf.len()
    }
    /// Clear the Image
    ///
    /// All color components are set to 0, including `alpha`
    ///
    ///     use imtrace::{Source,Pixfmt,Rgba8};
    ///
    ///     let mut pix = Pixfmt::<Rgba8>::new(2,2);
    ///     pix.copy_pixel(1,1, Rgba8::black());
    ///     pix.clear();
    ///     assert_eq!(pix.get((1,1)), Rgba8::transparent());
    ///
    pub fn clear(&mut self) {
        self.rbuf.clear();
    }
    /// Copies the [Color] `c` to pixel at (`x`,`y`)
    ///
    /// Locations outside of the region are ignored
    ///
    ///     use imtrace::{Source,Pixfmt,Rgba8};
    ///
    ///     let mut pix = Pixfmt::<Rgba8>::new(1,2);
    ///     let black = Rgba8::black();
    ///     pix.copy_pixel(0,1, black);
    ///     assert_eq!(pix.get((0,0)), Rgba8{r:0, g:0, b:0, a:0});
    ///     assert_eq!(pix.get((0,1)), black);
    ///
    ///     pix.copy_pixel(10,10, black); // Ignored, outside of range
    ///
    /// [Color]: ../trait.Color.html
    pub fn copy_pixel<C: Color>(&mut self, x: usize, y: usize, c: C) {
        if x >= self.rbuf.width || y >= self.rbuf.height {
            return;
        }
        self.set((x,y), c);
    }
    /// Copies the [Color] `c` to pixels from (`x`,`y`) to (`x+n-1`,y)
    ///
    /// Locations outside of the region are ignored
    ///
    /// [Color]: ../trait.Color.html
    pub fn copy_hline<C: Color>(&mut self, x: usize, y: usize, n: usize, c: C) {
        if y >= self.rbuf.height || x >= self.rbuf.width || n == 0 {
            return;
        }
        let n = if x+n >= self.rbuf.width { self.rbuf.width - x } else { n };
        let c = Rgba8::from_trait(c);
        let bpp = Self::bpp();
        let row = self.rbuf.row_mut(y);
        for px in row[x * bpp .. (x + n) * bpp].chunks_exact_mut(bpp) {
            px.copy_from_slice(&c.to_array()[..bpp]);
        }
    }
    /// Copies the [Color] `c` to the rectangle from (`x1`,`y1`) to
    ///   (`x2-1`,`y2-1`)
    ///
    /// Pixels are overwritten, not blended; copying a transparent color
    ///   leaves the rectangle fully transparent. Parts of the rectangle
    ///   outside of the region are ignored.
    ///
    ///     use imtrace::{Source,Pixfmt,Rgba8};
    ///
    ///     let mut pix = Pixfmt::<Rgba8>::new(4,4);
    ///     let red = Rgba8::new(255,0,0,255);
    ///     pix.copy_bar(1,1,3,5, red);
    ///     assert_eq!(pix.get((0,0)), Rgba8::transparent());
    ///     assert_eq!(pix.get((1,1)), red);
    ///     assert_eq!(pix.get((2,3)), red);
    ///     assert_eq!(pix.get((3,3)), Rgba8::transparent());
    ///
    pub fn copy_bar<C: Color>(&mut self, x1: usize, y1: usize, x2: usize, y2: usize, c: C) {
        let x2 = x2.min(self.rbuf.width);
        let y2 = y2.min(self.rbuf.height);
        if x1 >= x2 || y1 >= y2 {
            return;
        }
        let c = Rgba8::from_trait(c);
        for y in y1 .. y2 {
            self.copy_hline(x1, y, x2 - x1, c);
        }
    }
}

/// Access Pixeldata from a Pixfmt<T>
///
impl<T> PixelData for Pixfmt<T> {
    fn pixeldata(&self) -> &[u8] {
        & self.rbuf.data
    }
}

impl Source for Pixfmt<Rgba8> {
    fn get(&self, id: (usize, usize)) -> Rgba8 {
        Rgba8::from_slice(&self.rbuf[id])
    }
}

impl Pixel for Pixfmt<Rgba8> {
    fn bpp() -> usize { 4 }
    /// Height of rendering buffer in pixels
    fn height(&self) -> usize {
        self.rbuf.height
    }
    /// Width of rendering buffer in pixels
    fn width(&self) -> usize {
        self.rbuf.width
    }
    fn set<C: Color>(&mut self, id: (usize, usize), c: C) {
        let c = Rgba8::from_trait(c);
        self.rbuf[id].copy_from_slice(&c.to_array());
    }
}

#[cfg(test)]
mod tests {
    use super::Pixfmt;
    use crate::Rgba8;
    use crate::Source;
    use crate::Pixel;

    #[test]
    fn pixfmt_test() {
        let mut p = Pixfmt::<Rgba8>::new(10,10);
        assert_eq!(p.size(), 400);

        p.copy_pixel(0,0, Rgba8::black());
        assert_eq!(p.get((0,0)), Rgba8::black());
        assert_eq!(p.get((1,0)), Rgba8::transparent());

        let red = Rgba8::new(255,0,0,128);
        p.copy_hline(0,1,10,red);
        for i in 0 .. 10 {
            assert_eq!(p.get((i,1)), red);
        }
        p.clear();
        assert_eq!(p.get((0,1)), Rgba8::transparent());

        p.copy_pixel(11,11,Rgba8::black());
        for i in 0 .. 10 {
            for j in 0 .. 10 {
                assert_eq!(p.get((i,j)), Rgba8::transparent());
            }
        }
        p.copy_hline(5,1,20,Rgba8::black());
        for i in 0 .. 5 {
            assert_eq!(p.get((i,1)), Rgba8::transparent());
        }
        for i in 5 .. 10 {
            assert_eq!(p.get((i,1)), Rgba8::black());
        }
    }

    #[test]
    fn copy_bar_overwrites() {
        let mut p = Pixfmt::<Rgba8>::new(4,4);
        p.copy_bar(0,0,4,4, Rgba8::white());
        p.copy_bar(1,1,3,3, Rgba8::transparent());
        assert_eq!(p.get((0,0)), Rgba8::white());
        assert_eq!(p.get((1,1)), Rgba8::transparent());
        assert_eq!(p.get((2,2)), Rgba8::transparent());
        assert_eq!(p.get((3,3)), Rgba8::white());

        // Empty and inverted rectangles draw nothing
        p.copy_bar(2,2,2,4, Rgba8::black());
        p.copy_bar(3,3,1,1, Rgba8::black());
        assert_eq!(p.get((2,2)), Rgba8::transparent());
        assert_eq!(p.width(), 4);
        assert_eq!(p.height(), 4);
    }
}
