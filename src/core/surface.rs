//=========================================================================
// Surface
//=========================================================================
//
// In-memory RGBA framebuffer used as the render target, for scene
// screenshots and for the pause overlay composite.
//
// Only what the scene lifecycle needs lives here: fill, rectangle fill,
// whole-surface blending and copying. Drawing primitives belong to the
// game.
//
//=========================================================================

//=== Rgba ================================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Source-over blend of `self` onto an opaque `dst`.
    pub fn over(self, dst: Rgba) -> Rgba {
        let a = u16::from(self.a);
        let mix = |src: u8, dst: u8| -> u8 {
            ((u16::from(src) * a + u16::from(dst) * (255 - a) + 127) / 255) as u8
        };
        Rgba::new(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), dst.a)
    }
}

//=== Surface =============================================================

/// A `width × height` grid of [`Rgba`] pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    //--- Construction -----------------------------------------------------

    /// Creates an opaque black surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::BLACK)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    //--- Inspection -------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    //--- Drawing ----------------------------------------------------------

    /// Sets one pixel; out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Fills a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y.min(y_end)..y_end {
            let start = (row * self.width + x.min(x_end)) as usize;
            let end = (row * self.width + x_end) as usize;
            self.pixels[start..end].fill(color);
        }
    }

    /// Blends `overlay` over every pixel (source-over).
    pub fn blend(&mut self, overlay: Rgba) {
        for pixel in &mut self.pixels {
            *pixel = overlay.over(*pixel);
        }
    }

    /// Copies `source` onto this surface at the origin, clipped to the
    /// overlapping area.
    pub fn blit(&mut self, source: &Surface) {
        let width = self.width.min(source.width) as usize;
        let height = self.height.min(source.height);
        for row in 0..height {
            let dst = (row * self.width) as usize;
            let src = (row * source.width) as usize;
            self.pixels[dst..dst + width].copy_from_slice(&source.pixels[src..src + width]);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_black() {
        let surface = Surface::new(4, 3);
        assert_eq!(surface.size(), (4, 3));
        assert_eq!(surface.pixels().len(), 12);
        assert!(surface.pixels().iter().all(|p| *p == Rgba::BLACK));
    }

    #[test]
    fn pixel_out_of_bounds_is_none() {
        let surface = Surface::new(2, 2);
        assert_eq!(surface.pixel(2, 0), None);
        assert_eq!(surface.pixel(0, 2), None);
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut surface = Surface::new(4, 4);
        surface.fill_rect(2, 2, 10, 10, Rgba::WHITE);

        assert_eq!(surface.pixel(1, 1), Some(Rgba::BLACK));
        assert_eq!(surface.pixel(2, 2), Some(Rgba::WHITE));
        assert_eq!(surface.pixel(3, 3), Some(Rgba::WHITE));
    }

    #[test]
    fn fill_rect_outside_surface_is_noop() {
        let mut surface = Surface::new(4, 4);
        surface.fill_rect(10, 10, 2, 2, Rgba::WHITE);
        assert_eq!(surface, Surface::new(4, 4));
    }

    #[test]
    fn half_black_overlay_halves_brightness() {
        let mut surface = Surface::filled(1, 1, Rgba::rgb(200, 100, 0));
        surface.blend(Rgba::new(0, 0, 0, 128));

        let p = surface.pixel(0, 0).unwrap();
        assert_eq!((p.r, p.g, p.b, p.a), (100, 50, 0, 255));
    }

    #[test]
    fn opaque_overlay_replaces_color() {
        assert_eq!(Rgba::WHITE.over(Rgba::BLACK), Rgba::WHITE);
        assert_eq!(Rgba::TRANSPARENT.over(Rgba::WHITE), Rgba::WHITE);
    }

    #[test]
    fn blit_copies_overlap() {
        let mut dst = Surface::new(3, 3);
        let src = Surface::filled(2, 2, Rgba::WHITE);
        dst.blit(&src);

        assert_eq!(dst.pixel(1, 1), Some(Rgba::WHITE));
        assert_eq!(dst.pixel(2, 2), Some(Rgba::BLACK));
    }
}
