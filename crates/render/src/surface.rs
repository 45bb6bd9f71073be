use glam::Vec2;
use planetfall_common::angle::rotate_deg;

use crate::error::RenderError;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise product, as if `self` were a mask over `other`.
    pub fn multiply(self, other: Rgb) -> Rgb {
        let mul = |a: u8, b: u8| ((a as u16 * b as u16 + 127) / 255) as u8;
        Rgb::new(mul(self.r, other.r), mul(self.g, other.g), mul(self.b, other.b))
    }
}

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const DARK_BLUE: Rgb = Rgb::new(24, 43, 102);

/// A CPU pixel buffer, row-major, origin top-left, y down.
///
/// Drawing is clipped: anything outside the buffer is silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Surface {
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, RenderError> {
        if pixels.len() != width as usize * height as usize {
            return Err(RenderError::PixelCount {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill every pixel whose center lies within `radius` of `center`.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        if radius <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) =
            self.clip(center - Vec2::splat(radius), center + Vec2::splat(radius))
        else {
            return;
        };
        let r2 = radius * radius;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if p.distance_squared(center) <= r2 {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Axis-aligned rectangle from `min` (inclusive) to `max` (exclusive).
    pub fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgb) {
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    /// Fill a convex quad, asking `shader` for the color at each covered
    /// pixel center. Returns the number of pixels written.
    pub fn fill_quad_with<F>(&mut self, corners: &[Vec2; 4], mut shader: F) -> usize
    where
        F: FnMut(Vec2) -> Rgb,
    {
        let min = corners.iter().copied().reduce(Vec2::min).unwrap_or(Vec2::ZERO);
        let max = corners.iter().copied().reduce(Vec2::max).unwrap_or(Vec2::ZERO);
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return 0;
        };
        let mut written = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if quad_contains(corners, p) {
                    let color = shader(p);
                    self.put(x, y, color);
                    written += 1;
                }
            }
        }
        written
    }

    /// Draw `self` onto `dst` rotated by `angle` degrees so that `pivot`
    /// (in `self`'s pixels) lands on the center of `dst`.
    ///
    /// Every destination pixel `q` samples `pivot + rotate(q - half, angle)`;
    /// samples falling outside `self` become black.
    pub fn compose_rotated(&self, dst: &mut Surface, pivot: Vec2, angle: f32) {
        let half = dst.size() * 0.5;
        // One output column is one rotated unit step in the scene.
        let step_x = rotate_deg(Vec2::X, angle);
        for y in 0..dst.height {
            let row = pivot + rotate_deg(Vec2::new(0.5, y as f32 + 0.5) - half, angle);
            for x in 0..dst.width {
                let s = row + step_x * x as f32;
                let color = self
                    .get(s.x.floor() as i64, s.y.floor() as i64)
                    .unwrap_or(BLACK);
                dst.pixels[(y * dst.width + x) as usize] = color;
            }
        }
    }

    /// Pixels as tightly packed RGBA8, opaque.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, 255])
            .collect()
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Pixel range covering `[min, max]`, clipped to the surface.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(i64, i64, i64, i64)> {
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }
        let x0 = (min.x.floor() as i64).max(0);
        let y0 = (min.y.floor() as i64).max(0);
        let x1 = (max.x.ceil() as i64).min(self.width as i64);
        let y1 = (max.y.ceil() as i64).min(self.height as i64);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

/// Point-in-convex-quad test; corners may wind either way.
pub fn quad_contains(corners: &[Vec2; 4], p: Vec2) -> bool {
    let mut positive = false;
    let mut negative = false;
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let cross = (b - a).perp_dot(p - a);
        positive |= cross > 0.0;
        negative |= cross < 0.0;
        if positive && negative {
            return false;
        }
    }
    true
}
