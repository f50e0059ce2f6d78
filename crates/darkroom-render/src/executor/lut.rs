//! Byte-LUT application.
//!
//! The fastest rendering path: when a render reduces to independent
//! per-channel byte mappings (tone only, or user curves), the whole
//! image is shaded with indexed loads and no float math per pixel.

use darkroom_core::{BYTES_PER_PIXEL, PixelBuffer};
use darkroom_kernel::LUT_SIZE;

use crate::error::RenderResult;

/// Applies one LUT to the B, G and R channels of every pixel.
///
/// Alpha is never touched.
pub fn apply_lut(buffer: &mut PixelBuffer, lut: &[u8; LUT_SIZE]) -> RenderResult<()> {
    apply_channel_luts(buffer, lut, lut, lut)
}

/// Applies separate LUTs to the blue, green and red channels.
pub fn apply_channel_luts(
    buffer: &mut PixelBuffer,
    blue: &[u8; LUT_SIZE],
    green: &[u8; LUT_SIZE],
    red: &[u8; LUT_SIZE],
) -> RenderResult<()> {
    let mut view = buffer.try_view_mut()?;
    let width = view.width();
    for row in view.rows_mut() {
        for px in row.chunks_exact_mut(BYTES_PER_PIXEL).take(width as usize) {
            px[0] = blue[px[0] as usize];
            px[1] = green[px[1] as usize];
            px[2] = red[px[2] as usize];
        }
    }
    Ok(())
}
