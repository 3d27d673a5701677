//! Rendering Base

use crate::color::Rgba8;
use crate::pixfmt::Pixfmt;

use crate::Color;
use crate::Pixel;
use crate::PixelData;
use crate::Render;
use crate::Source;

/// Solid rectangle renderer over a pixel format
///
/// Holds the current fill color, rectangles are clipped to the limits
///   of the underlying image.
#[derive(Debug,Clone)]
pub struct RenderingBase<T> {
    pub pixf: T,
    fill: Rgba8,
}

impl<T> RenderingBase<T> where T: Pixel {
    /// Create a new Rendering Base from a pixel format
    pub fn new(pixf: T) -> RenderingBase<T> {
        RenderingBase { pixf, fill: Rgba8::transparent() }
    }
    /// Inclusive pixel limits (xmin, xmax, ymin, ymax)
    pub fn limits(&self) -> (i64,i64,i64,i64) {
        let w = self.pixf.width() as i64;
        let h = self.pixf.height() as i64;
        (0, w-1, 0, h-1)
    }
}

impl RenderingBase<Pixfmt<Rgba8>> {
    /// New base over a transparent RGBA image of `width` x `height`
    pub fn with_rgba(width: usize, height: usize) -> Self {
        Self::new(Pixfmt::<Rgba8>::new(width, height))
    }
    /// Width of the image
    pub fn width(&self) -> usize {
        self.pixf.width()
    }
    /// Height of the image
    pub fn height(&self) -> usize {
        self.pixf.height()
    }
    /// Color at (`x`,`y`)
    pub fn get(&self, x: usize, y: usize) -> Rgba8 {
        self.pixf.get((x,y))
    }
}

impl Render for RenderingBase<Pixfmt<Rgba8>> {
    fn color<C: Color>(&mut self, color: C) {
        self.fill = Rgba8::from_trait(color);
    }
    fn fill_rect(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        let (xmin,xmax,ymin,ymax) = self.limits();
        let (x1,x2) = if x2 > x1 { (x1,x2) } else { (x2,x1) };
        let (y1,y2) = if y2 > y1 { (y1,y2) } else { (y2,y1) };
        if x1 > xmax || x2 <= xmin || y1 > ymax || y2 <= ymin {
            return;
        }
        let x1 = x1.max(xmin) as usize;
        let y1 = y1.max(ymin) as usize;
        let x2 = x2.min(xmax + 1) as usize;
        let y2 = y2.min(ymax + 1) as usize;
        self.pixf.copy_bar(x1, y1, x2, y2, self.fill);
    }
    fn clear(&mut self) {
        self.pixf.clear();
    }
}

impl<T> PixelData for RenderingBase<T> where T: PixelData {
    fn pixeldata(&self) -> &[u8] {
        self.pixf.pixeldata()
    }
}
