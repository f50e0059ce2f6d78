//! SIMD executor using 8-wide f32 lanes for the tone stage.
//!
//! The tone curve in [`darkroom_kernel::tone_curve_x8`] performs the
//! exact operation sequence of the scalar curve, so lanes and the
//! scalar remainder produce identical bits. The color and monochrome
//! stages stay scalar per lane.

use darkroom_core::{BYTES_PER_PIXEL, PixelBuffer};
use darkroom_kernel::{normalize, quantize, tone_curve, tone_curve_x8};
use darkroom_sidecar::{ResolvedAdjustments, Stages};
use wide::f32x8;

use super::{PixelExecutor, shade_bgr};
use crate::error::RenderResult;

/// SIMD lane count per block.
pub(crate) const LANES: usize = 8;

/// Single-threaded SIMD backend.
pub struct VectorExecutor;

impl PixelExecutor for VectorExecutor {
    fn name(&self) -> &'static str {
        "vectorized"
    }

    fn execute(
        &self,
        buffer: &mut PixelBuffer,
        resolved: &ResolvedAdjustments,
    ) -> RenderResult<()> {
        let stages = resolved.stages();
        let mut view = buffer.try_view_mut()?;
        let width = view.width();
        let height = view.height();
        for (y, row) in view.rows_mut().into_iter().enumerate() {
            process_row_simd(row, y as u32, width, height, resolved, stages);
        }
        Ok(())
    }
}

/// Apply all enabled stages to one row, SIMD tone in 8-pixel blocks.
///
/// Shared with the row-parallel executor.
pub(crate) fn process_row_simd(
    row: &mut [u8],
    y: u32,
    width: u32,
    height: u32,
    resolved: &ResolvedAdjustments,
    stages: Stages,
) {
    let w = width as usize;
    let blocks = w / LANES;
    for blk in 0..blocks {
        let base = blk * LANES * BYTES_PER_PIXEL;
        let px = &mut row[base..base + LANES * BYTES_PER_PIXEL];
        let mut b = [0.0f32; LANES];
        let mut g = [0.0f32; LANES];
        let mut r = [0.0f32; LANES];
        for i in 0..LANES {
            b[i] = normalize(px[i * BYTES_PER_PIXEL]);
            g[i] = normalize(px[i * BYTES_PER_PIXEL + 1]);
            r[i] = normalize(px[i * BYTES_PER_PIXEL + 2]);
        }
        if stages.tone {
            b = tone_curve_x8(f32x8::from(b), &resolved.tone).to_array();
            g = tone_curve_x8(f32x8::from(g), &resolved.tone).to_array();
            r = tone_curve_x8(f32x8::from(r), &resolved.tone).to_array();
        }
        for i in 0..LANES {
            let x = (blk * LANES + i) as u32;
            let (mut bv, mut gv, mut rv) = (b[i], g[i], r[i]);
            shade_bgr(&mut bv, &mut gv, &mut rv, x, y, width, height, resolved, stages);
            px[i * BYTES_PER_PIXEL] = quantize(bv);
            px[i * BYTES_PER_PIXEL + 1] = quantize(gv);
            px[i * BYTES_PER_PIXEL + 2] = quantize(rv);
        }
    }
    // Scalar tail for widths not divisible by the lane count.
    let tail_start = blocks * LANES;
    for (i, px) in row[tail_start * BYTES_PER_PIXEL..w * BYTES_PER_PIXEL]
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .enumerate()
    {
        let x = (tail_start + i) as u32;
        let mut b = normalize(px[0]);
        let mut g = normalize(px[1]);
        let mut r = normalize(px[2]);
        if stages.tone {
            b = tone_curve(b, &resolved.tone);
            g = tone_curve(g, &resolved.tone);
            r = tone_curve(r, &resolved.tone);
        }
        shade_bgr(&mut b, &mut g, &mut r, x, y, width, height, resolved, stages);
        px[0] = quantize(b);
        px[1] = quantize(g);
        px[2] = quantize(r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::scalar::ScalarExecutor;
    use darkroom_kernel::ToneCoeffs;

    #[test]
    fn test_matches_scalar_bit_for_bit() {
        let mut simd = PixelBuffer::new(13, 5).unwrap();
        for y in 0..5 {
            for x in 0..13 {
                let v = ((x * 19 + y * 53) % 256) as u8;
                simd.set_pixel(x, y, [v, v.wrapping_add(40), v.wrapping_add(90), 255])
                    .unwrap();
            }
        }
        let mut scalar = simd.detached_copy();

        let mut resolved = ResolvedAdjustments::identity();
        resolved.tone = ToneCoeffs::new(0.4, -0.2, 0.3, 0.5, -0.4, 1.25, 0.1);
        VectorExecutor.execute(&mut simd, &resolved).unwrap();
        ScalarExecutor.execute(&mut scalar, &resolved).unwrap();
        assert_eq!(simd.data(), scalar.data());
    }
}
