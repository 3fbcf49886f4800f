//! Headless rendering canvas for watch-face UI tests.
//!
//! [`TestCanvas`] is an in-memory RGB frame that implements
//! `embedded_graphics::DrawTarget`, so anything that renders to a real
//! surface renders to it unchanged. On top of that it offers pixel and region
//! assertions plus PNG screenshot capture for eyeballing failures.
//!
//! # Quick start
//!
//! ```
//! use face_testing::TestCanvas;
//! use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::{PrimitiveStyle, Rectangle}};
//!
//! let mut canvas = TestCanvas::new(100, 100);
//!
//! Rectangle::new(Point::new(10, 10), Size::new(40, 20))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb888::new(200, 40, 40)))
//!     .draw(&mut canvas)
//!     .unwrap();
//!
//! canvas.assert_pixel(20, 15, Rgb888::new(200, 40, 40)).unwrap();
//! ```

use std::path::Path;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Pixel;

/// In-memory RGB canvas with a bounds-checked pixel store.
///
/// Out-of-bounds draws are silently clipped, matching how a window surface
/// behaves; a zero-sized canvas accepts draws and stores nothing.
pub struct TestCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl TestCanvas {
    /// Create a canvas of exactly `width × height` pixels, cleared to black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb888::new(0, 0, 0); (width as usize) * (height as usize)],
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The color at `(x, y)`, or `None` when out of bounds.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x < self.width && y < self.height {
            self.pixels.get((y * self.width + x) as usize).copied()
        } else {
            None
        }
    }

    /// Assert that pixel `(x, y)` has exactly the expected color.
    ///
    /// Returns `Err` with a descriptive message on mismatch.
    pub fn assert_pixel(&self, x: u32, y: u32, expected: Rgb888) -> Result<(), String> {
        let actual = self
            .pixel_at(x, y)
            .ok_or_else(|| format!("Pixel ({x}, {y}) is out of bounds"))?;
        if actual != expected {
            Err(format!(
                "assert_pixel({x}, {y}): expected ({}, {}, {}), got ({}, {}, {})",
                expected.r(),
                expected.g(),
                expected.b(),
                actual.r(),
                actual.g(),
                actual.b()
            ))
        } else {
            Ok(())
        }
    }

    /// Assert that every pixel inside `rect` has the given color.
    pub fn assert_region_uniform(&self, rect: Rectangle, color: Rgb888) -> Result<(), String> {
        let tl = rect.top_left;
        for dy in 0..rect.size.height {
            for dx in 0..rect.size.width {
                let x = (tl.x as u32).wrapping_add(dx);
                let y = (tl.y as u32).wrapping_add(dy);
                self.assert_pixel(x, y, color)
                    .map_err(|e| format!("assert_region_uniform failed in {rect:?}: {e}"))?;
            }
        }
        Ok(())
    }

    /// Assert that `rect` contains **at least one** pixel with the given color.
    pub fn assert_region_contains(&self, rect: Rectangle, color: Rgb888) -> Result<(), String> {
        if self.pixel_count_of_color(rect, color) > 0 {
            Ok(())
        } else {
            Err(format!(
                "assert_region_contains: no pixel with color ({}, {}, {}) found in {rect:?}",
                color.r(),
                color.g(),
                color.b()
            ))
        }
    }

    /// Count how many pixels in `rect` match `color` exactly.
    pub fn pixel_count_of_color(&self, rect: Rectangle, color: Rgb888) -> usize {
        let tl = rect.top_left;
        let mut count = 0;
        for dy in 0..rect.size.height {
            for dx in 0..rect.size.width {
                let x = (tl.x as u32).wrapping_add(dx);
                let y = (tl.y as u32).wrapping_add(dy);
                if self.pixel_at(x, y) == Some(color) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Save the current frame as a PNG, creating parent directories as
    /// needed. Handy for inspecting a failing render.
    pub fn screenshot(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = image::RgbImage::new(self.width.max(1), self.height.max(1));
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(p) = self.pixel_at(x, y) {
                    out.put_pixel(x, y, image::Rgb([p.r(), p.g(), p.b()]));
                }
            }
        }
        out.save(path)?;
        Ok(())
    }
}

impl DrawTarget for TestCanvas {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && point.y >= 0
                && (point.x as u32) < self.width
                && (point.y as u32) < self.height
            {
                let idx = (point.y as u32 * self.width + point.x as u32) as usize;
                if let Some(slot) = self.pixels.get_mut(idx) {
                    *slot = color;
                }
            }
        }
        Ok(())
    }
}

impl OriginDimensions for TestCanvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
