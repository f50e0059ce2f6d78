//! Plain per-pixel executor. Always available.

use darkroom_core::PixelBuffer;
use darkroom_sidecar::ResolvedAdjustments;

use super::{PixelExecutor, process_row};
use crate::error::RenderResult;

/// Single-threaded scalar backend, the final fallback tier.
pub struct ScalarExecutor;

impl PixelExecutor for ScalarExecutor {
    fn name(&self) -> &'static str {
        "scalar"
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
            process_row(row, y as u32, width, height, resolved, stages);
        }
        Ok(())
    }
}
