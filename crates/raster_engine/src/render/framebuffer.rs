//! Color and depth buffers for one software-rendered frame
//!
//! The framebuffer is owned exclusively by a single render call; nothing else
//! writes to it concurrently. Pixel writes go through [`Framebuffer::put_pixel`],
//! which owns the bounds check, the NDC depth-range check, and the depth test.

use std::io::{self, Write};

/// A width × height RGB color buffer plus a matching depth buffer
///
/// Pixel coordinates handed to [`put_pixel`](Self::put_pixel) are y-up, with
/// (0, 0) the bottom-left pixel; the byte buffer itself is stored top row
/// first, the order PPM wants.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    color: Vec<u8>,
    depth: Vec<f64>,
}

impl Framebuffer {
    /// Create a buffer cleared to `background`, with all depths at +infinity
    #[must_use]
    pub fn new(width: usize, height: usize, background: [u8; 3]) -> Self {
        let mut color = vec![0u8; width * height * 3];
        for px in color.chunks_exact_mut(3) {
            px.copy_from_slice(&background);
        }
        Self {
            width,
            height,
            color,
            depth: vec![f64::INFINITY; width * height],
        }
    }

    /// Width in pixels
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read back one pixel, y-up coordinates
    ///
    /// # Panics
    /// Panics when (x, y) is outside the buffer; this is a test/debug
    /// accessor, not a rendering path.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = self.index(x, y) * 3;
        [self.color[i], self.color[i + 1], self.color[i + 2]]
    }

    /// Depth-tested, coverage-blended pixel write
    ///
    /// Out-of-bounds coordinates and z outside [-1, 1] are silently
    /// discarded. The depth test is a strict less-than: a write at exactly
    /// the stored depth loses, so ties keep the incumbent regardless of
    /// draw order. On a passing test the new color is blended over the
    /// existing one with weight `coverage` and the depth is overwritten.
    pub fn put_pixel(&mut self, x: i64, y: i64, z: f64, color: [u8; 3], coverage: f64) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        if !(-1.0..=1.0).contains(&z) {
            return;
        }
        let i = self.index(x as usize, y as usize);
        if z >= self.depth[i] {
            return;
        }
        let px = &mut self.color[i * 3..i * 3 + 3];
        for (old, new) in px.iter_mut().zip(color) {
            *old = ((1.0 - coverage) * f64::from(*old) + coverage * f64::from(new)) as u8;
        }
        self.depth[i] = z;
    }

    /// Write the color buffer as a plain-text PPM (`P3`) image
    ///
    /// # Errors
    /// Propagates any IO error from `out`.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P3\n{} {}\n255", self.width, self.height)?;
        for px in self.color.chunks_exact(3) {
            writeln!(out, "{} {} {}", px[0], px[1], px[2])?;
        }
        Ok(())
    }

    /// Buffer index of the y-up coordinate pair; row 0 of storage is the top
    fn index(&self, x: usize, y: usize) -> usize {
        (self.height - 1 - y) * self.width + x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [255, 0, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    #[test]
    fn out_of_bounds_writes_are_discarded() {
        let mut fb = Framebuffer::new(2, 2, [0, 0, 0]);
        fb.put_pixel(-1, 0, 0.0, RED, 1.0);
        fb.put_pixel(0, 2, 0.0, RED, 1.0);
        fb.put_pixel(2, 0, 0.0, RED, 1.0);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(fb.pixel(x, y), [0, 0, 0]);
            }
        }
    }

    #[test]
    fn depth_outside_ndc_range_is_discarded() {
        let mut fb = Framebuffer::new(1, 1, [0, 0, 0]);
        fb.put_pixel(0, 0, 1.5, RED, 1.0);
        fb.put_pixel(0, 0, -1.5, RED, 1.0);
        assert_eq!(fb.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn nearer_write_wins_farther_write_loses() {
        let mut fb = Framebuffer::new(1, 1, [0, 0, 0]);
        fb.put_pixel(0, 0, 0.5, RED, 1.0);
        fb.put_pixel(0, 0, 0.8, BLUE, 1.0);
        assert_eq!(fb.pixel(0, 0), RED);
        fb.put_pixel(0, 0, 0.2, BLUE, 1.0);
        assert_eq!(fb.pixel(0, 0), BLUE);
    }

    #[test]
    fn depth_ties_keep_the_incumbent() {
        let mut fb = Framebuffer::new(1, 1, [0, 0, 0]);
        fb.put_pixel(0, 0, 0.5, RED, 1.0);
        fb.put_pixel(0, 0, 0.5, BLUE, 1.0);
        assert_eq!(fb.pixel(0, 0), RED);
    }

    #[test]
    fn repeated_write_is_idempotent() {
        let mut once = Framebuffer::new(1, 1, [0, 0, 0]);
        once.put_pixel(0, 0, 0.5, RED, 1.0);
        let mut twice = Framebuffer::new(1, 1, [0, 0, 0]);
        twice.put_pixel(0, 0, 0.5, RED, 1.0);
        twice.put_pixel(0, 0, 0.5, RED, 1.0);
        assert_eq!(once.pixel(0, 0), twice.pixel(0, 0));
    }

    #[test]
    fn fractional_coverage_blends_with_existing() {
        let mut fb = Framebuffer::new(1, 1, [100, 100, 100]);
        fb.put_pixel(0, 0, 0.0, [200, 200, 200], 0.5);
        assert_eq!(fb.pixel(0, 0), [150, 150, 150]);
    }

    #[test]
    fn y_is_flipped_into_storage() {
        let mut fb = Framebuffer::new(2, 2, [0, 0, 0]);
        fb.put_pixel(0, 1, 0.0, RED, 1.0); // top-left in image terms
        let mut ppm = Vec::new();
        fb.write_ppm(&mut ppm).unwrap();
        let text = String::from_utf8(ppm).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "P3");
        assert_eq!(lines[1], "2 2");
        assert_eq!(lines[2], "255");
        // First pixel row written is the top row.
        assert_eq!(lines[3], "255 0 0");
        assert_eq!(lines[4], "0 0 0");
    }
}
