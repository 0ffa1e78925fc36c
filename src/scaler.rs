use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::bitmap::Bitmap;

/// Precomputed mapping from dest pixels to src neighbors + weights
pub struct ScaleLut {
    x0: Vec<usize>,
    x1: Vec<usize>,
    wx: Vec<u16>,
    y0: Vec<usize>,
    y1: Vec<usize>,
    wy: Vec<u16>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            x0: Vec::new(),
            x1: Vec::new(),
            wx: Vec::new(),
            y0: Vec::new(),
            y1: Vec::new(),
            wy: Vec::new(),
        }
    }

    #[inline]
    pub fn dst_size(&self) -> (usize, usize) {
        (self.x0.len(), self.y0.len())
    }
}

fn axis_lut(dst: usize, src: usize) -> (Vec<usize>, Vec<usize>, Vec<u16>) {
    let mut i0 = vec![0; dst];
    let mut i1 = vec![0; dst];
    let mut w = vec![0; dst];
    let scale = src as f32 / dst as f32;
    let last = src.saturating_sub(1);
    for d in 0..dst {
        let f = d as f32 * scale;
        let lo = (f.floor() as usize).min(last);
        i0[d] = lo;
        i1[d] = (lo + 1).min(last);
        w[d] = ((f - lo as f32).clamp(0.0, 1.0) * 256.0).round() as u16; // fixed-point 8.8
    }
    (i0, i1, w)
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let (x0, x1, wx) = axis_lut(dst_w, src_w);
    let (y0, y1, wy) = axis_lut(dst_h, src_h);
    ScaleLut {
        x0,
        x1,
        wx,
        y0,
        y1,
        wy,
    }
}

#[inline]
fn lerp_color_u32(a: u32, b: u32, w256: u32) -> u32 {
    // w256 in [0, 256]; inv = 256 - w256
    let inv = 256 - w256;
    // Interpolate R and B together (00RR00BB), with mask 0x00FF00FF,
    let rb = ((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w256) >> 8 & 0x00FF00FF;
    // Interpolate G separately (0000GG00), with mask 0x0000FF00
    let g = ((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w256) >> 8 & 0x0000FF00;
    rb | g // alpha stays 0
}

/// Stretch the rendered frame onto a 0RGB window surface `dw` pixels wide.
/// Rows are processed in parallel for cache friendly writes.
pub fn blit_bilinear_stretch(dst: &mut [u32], dw: usize, src: &Bitmap, lut: &ScaleLut) {
    let sw = src.width();
    let pixels = src.pixels();
    if dw == 0 || pixels.is_empty() {
        return;
    }
    dst.par_chunks_mut(dw)
        .enumerate()
        .take(lut.y0.len())
        .for_each(|(y, dst_row)| {
            let wy = lut.wy[y] as u32;
            let row0 = lut.y0[y] * sw;
            let row1 = lut.y1[y] * sw;

            for (x, out) in dst_row.iter_mut().enumerate().take(lut.x0.len()) {
                let x0 = lut.x0[x];
                let x1 = lut.x1[x];
                let wx = lut.wx[x] as u32;

                // read 4 neighbors
                let c00 = pixels[row0 + x0].to_0rgb();
                let c10 = pixels[row0 + x1].to_0rgb();
                let c01 = pixels[row1 + x0].to_0rgb();
                let c11 = pixels[row1 + x1].to_0rgb();

                // horizontal lerp
                let top = lerp_color_u32(c00, c10, wx);
                let bot = lerp_color_u32(c01, c11, wx);
                // vertical lerp
                *out = lerp_color_u32(top, bot, wy);
            }
        });
}
