//! Table-specialized executor.
//!
//! Bakes the tone curve into a 256-entry f32 table once per call and
//! replaces the per-pixel curve evaluation with an indexed load. The
//! table entry for byte `v` is exactly `tone_curve(normalize(v))`, so
//! output bytes match the scalar tier exactly.

use darkroom_core::{BYTES_PER_PIXEL, PixelBuffer};
use darkroom_kernel::{bake_tone_table, normalize, quantize};
use darkroom_sidecar::ResolvedAdjustments;

use super::{PixelExecutor, shade_bgr};
use crate::error::RenderResult;

/// Backend with the tone stage pre-evaluated per input byte.
pub struct SpecializedExecutor;

impl PixelExecutor for SpecializedExecutor {
    fn name(&self) -> &'static str {
        "specialized"
    }

    fn execute(
        &self,
        buffer: &mut PixelBuffer,
        resolved: &ResolvedAdjustments,
    ) -> RenderResult<()> {
        let stages = resolved.stages();
        let table = stages.tone.then(|| bake_tone_table(&resolved.tone));
        let mut view = buffer.try_view_mut()?;
        let width = view.width();
        let height = view.height();
        for (y, row) in view.rows_mut().into_iter().enumerate() {
            for (x, px) in row
                .chunks_exact_mut(BYTES_PER_PIXEL)
                .take(width as usize)
                .enumerate()
            {
                let (mut b, mut g, mut r) = match &table {
                    Some(t) => (t[px[0] as usize], t[px[1] as usize], t[px[2] as usize]),
                    None => (normalize(px[0]), normalize(px[1]), normalize(px[2])),
                };
                shade_bgr(
                    &mut b, &mut g, &mut r, x as u32, y as u32, width, height, resolved, stages,
                );
                px[0] = quantize(b);
                px[1] = quantize(g);
                px[2] = quantize(r);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::scalar::ScalarExecutor;
    use darkroom_kernel::{ColorCoeffs, ToneCoeffs};

    #[test]
    fn test_matches_scalar_bit_for_bit() {
        let mut baked = PixelBuffer::new(16, 16).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                let v = (x * 16 + y) as u8;
                baked.set_pixel(x, y, [v, 255 - v, v ^ 0xAA, 255]).unwrap();
            }
        }
        let mut scalar = baked.detached_copy();

        let mut resolved = ResolvedAdjustments::identity();
        resolved.tone = ToneCoeffs::new(-0.3, 0.2, 0.0, 0.4, -0.2, 0.8, -0.1);
        resolved.color = ColorCoeffs {
            saturation: 0.4,
            vibrance: -0.2,
            cast: 0.5,
            gain_b: 1.1,
            gain_g: 1.0,
            gain_r: 0.9,
        };
        SpecializedExecutor.execute(&mut baked, &resolved).unwrap();
        ScalarExecutor.execute(&mut scalar, &resolved).unwrap();
        assert_eq!(baked.data(), scalar.data());
    }
}
