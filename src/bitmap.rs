use crate::vector::Vector;

/// RGBA8 with premultiplied alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const CLEAR: Color = Color::new(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// 0RGB, the layout softbuffer expects. Alpha is dropped.
    #[inline]
    pub fn to_0rgb(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }
}

/// Row-major pixel buffer. Out-of-range writes are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Texel at normalized coordinates; `u` and `v` are clamped into the
    /// last row/column so 1.0 stays in range.
    #[inline]
    pub fn sample(&self, u: f64, v: f64) -> Color {
        let x = ((u * self.width as f64) as usize).min(self.width.saturating_sub(1));
        let y = ((v * self.height as f64) as usize).min(self.height.saturating_sub(1));
        self.get(x, y).unwrap_or(Color::CLEAR)
    }

    /// Premultiplied "over": `dst * (1 - srcA) + src`.
    #[inline]
    pub fn blend(&mut self, x: usize, y: usize, color: Color) {
        match color.a {
            0 => {}
            255 => self.set(x, y, color),
            _ => {
                let Some(old) = self.get(x, y) else {
                    return;
                };
                let inverse = 1.0 - color.a as f64 / 255.0;
                let mix = |d: u8, s: u8| ((d as f64 * inverse) as u32 + s as u32).min(255) as u8;
                self.pixels[y * self.width + x] = Color::new(
                    mix(old.r, color.r),
                    mix(old.g, color.g),
                    mix(old.b, color.b),
                    mix(old.a, color.a),
                );
            }
        }
    }

    /// Stretch one source column over `height` pixels, top at `start.y`,
    /// blending each texel.
    pub fn draw_column(&mut self, source_x: usize, source: &Bitmap, start: Vector, height: f64) {
        if start.x < 0.0 || height <= 0.0 {
            return;
        }
        let x = start.x as usize;
        if x >= self.width {
            return;
        }
        let first = start.y.max(0.0) as usize;
        let last = ((start.y + height).ceil().max(0.0) as usize).min(self.height);
        let step = source.height as f64 / height;
        for y in first..last {
            let source_y = ((y as f64 - start.y).max(0.0) * step) as usize;
            let Some(texel) = source.get(source_x, source_y.min(source.height.saturating_sub(1)))
            else {
                continue;
            };
            self.blend(x, y, texel);
        }
    }

    /// Blend a translucent wash of `color` over the whole bitmap.
    pub fn tint(&mut self, color: Color, opacity: f64) {
        let alpha = (color.a as f64 / 255.0 * opacity).clamp(0.0, 1.0);
        let wash = Color::new(
            (color.r as f64 * alpha) as u8,
            (color.g as f64 * alpha) as u8,
            (color.b as f64 * alpha) as u8,
            (255.0 * alpha) as u8,
        );
        for y in 0..self.height {
            for x in 0..self.width {
                self.blend(x, y, wash);
            }
        }
    }
}
