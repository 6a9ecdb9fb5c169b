//! Software rasterizer for low-resolution surfaces
//!
//! Samples each cell at its center and alpha-blends triangles in submission
//! order. Good enough for terminal cells; not meant for full-size output.

use glam::Vec2;

use super::Frame;

/// RGB grid, one entry per output cell
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 3]>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 3]; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell color as 8-bit RGB; out-of-range cells read as black
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        if x >= self.width || y >= self.height {
            return [0; 3];
        }
        let [r, g, b] = self.pixels[y * self.width + x];
        [to_byte(r), to_byte(g), to_byte(b)]
    }

    /// Rasterize a whole frame, scaled to cover the canvas
    pub fn draw_frame(&mut self, frame: &Frame) {
        self.pixels.fill([0.0; 3]);
        if frame.size.x <= 0.0 || frame.size.y <= 0.0 || self.pixels.is_empty() {
            return;
        }
        let scale = Vec2::new(
            self.width as f32 / frame.size.x,
            self.height as f32 / frame.size.y,
        );
        for tri in frame.vertices.chunks_exact(3) {
            let p = [
                Vec2::from(tri[0].position) * scale,
                Vec2::from(tri[1].position) * scale,
                Vec2::from(tri[2].position) * scale,
            ];
            let c = [tri[0].color, tri[1].color, tri[2].color];
            self.fill_triangle(p, c);
        }
    }

    fn fill_triangle(&mut self, p: [Vec2; 3], c: [[f32; 4]; 3]) {
        let area = edge(p[0], p[1], p[2]);
        if area.abs() < f32::EPSILON {
            return;
        }

        let min = p[0].min(p[1]).min(p[2]).max(Vec2::ZERO);
        let max = p[0]
            .max(p[1])
            .max(p[2])
            .min(Vec2::new(self.width as f32, self.height as f32));
        if min.x >= max.x || min.y >= max.y {
            return;
        }

        let x0 = min.x.floor() as usize;
        let y0 = min.y.floor() as usize;
        let x1 = (max.x.ceil() as usize).min(self.width);
        let y1 = (max.y.ceil() as usize).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let sample = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                // Normalized by area so both windings give positive weights inside
                let w0 = edge(p[1], p[2], sample) / area;
                let w1 = edge(p[2], p[0], sample) / area;
                let w2 = edge(p[0], p[1], sample) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let mut src = [0.0; 4];
                for (i, channel) in src.iter_mut().enumerate() {
                    *channel = c[0][i] * w0 + c[1][i] * w1 + c[2][i] * w2;
                }
                let alpha = src[3].clamp(0.0, 1.0);

                let dst = &mut self.pixels[y * self.width + x];
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = s * alpha + *d * (1.0 - alpha);
                }
            }
        }
    }
}

#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
