//! Row-parallel executor. Highest tier.
//!
//! Splits the buffer into independent row slices and shades them on
//! the rayon pool with the same SIMD row routine the vectorized tier
//! uses, so the two tiers are bit-identical.

use darkroom_core::PixelBuffer;
use darkroom_sidecar::ResolvedAdjustments;
use rayon::prelude::*;

use super::vector::process_row_simd;
use super::PixelExecutor;
use crate::error::RenderResult;

/// Multi-threaded SIMD backend.
pub struct CompiledExecutor;

impl PixelExecutor for CompiledExecutor {
    fn name(&self) -> &'static str {
        "compiled"
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
        view.rows_mut()
            .into_par_iter()
            .enumerate()
            .for_each(|(y, row)| {
                process_row_simd(row, y as u32, width, height, resolved, stages);
            });
        Ok(())
    }
}
