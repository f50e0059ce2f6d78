//! Stride-aware pixel buffer in BGRA byte order.
//!
//! [`PixelBuffer`] is the single pixel container the engine operates
//! on: 4 bytes per pixel (channel 0 = B, 1 = G, 2 = R, 3 = A), row
//! stride that may exceed `width * 4` due to padding, and exclusive
//! ownership semantics — exactly one mutator at a time.
//!
//! # Mutability capability
//!
//! Executors never touch raw memory directly. They call
//! [`PixelBuffer::try_view_mut`], which either hands back a
//! [`MutableView`] (geometry validated, mutation allowed) or a
//! [`BufferError`] the render facade treats as a soft failure.
//!
//! # Example
//!
//! ```rust
//! use darkroom_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::new(64, 64).unwrap();
//! buf.set_pixel(3, 5, [10, 20, 30, 255]).unwrap();
//! assert_eq!(buf.pixel(3, 5).unwrap(), [10, 20, 30, 255]);
//!
//! let mut view = buf.try_view_mut().unwrap();
//! view.row_mut(5)[0] = 99;
//! ```

use crate::error::{BufferError, BufferResult};

/// Bytes per pixel (B, G, R, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// Owned, stride-aware BGRA8 pixel buffer.
///
/// Buffers created by the engine are tightly packed; buffers adopted
/// from collaborators via [`from_vec`](Self::from_vec) may carry row
/// padding. A buffer marked shared ([`mark_shared`](Self::mark_shared))
/// refuses mutable views, which the render facade uses to fall back
/// to a detached copy.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
    shared: bool,
}

impl PixelBuffer {
    /// Creates a zeroed, tightly packed buffer.
    ///
    /// Returns [`BufferError::InvalidDimensions`] for zero extents or
    /// a byte size that overflows `usize`.
    pub fn new(width: u32, height: u32) -> BufferResult<Self> {
        if width == 0 || height == 0 {
            return Err(BufferError::invalid_dimensions(
                width,
                height,
                "width and height must be non-zero",
            ));
        }
        let stride = width as usize * BYTES_PER_PIXEL;
        let len = stride
            .checked_mul(height as usize)
            .ok_or_else(|| BufferError::invalid_dimensions(width, height, "byte size overflow"))?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
            stride,
            shared: false,
        })
    }

    /// Adopts an existing byte vector with explicit geometry.
    ///
    /// `stride` must be at least `width * 4` and `data` must hold at
    /// least `stride * height` bytes.
    pub fn from_vec(data: Vec<u8>, width: u32, height: u32, stride: usize) -> BufferResult<Self> {
        if width == 0 || height == 0 {
            return Err(BufferError::invalid_dimensions(
                width,
                height,
                "width and height must be non-zero",
            ));
        }
        let min_stride = width as usize * BYTES_PER_PIXEL;
        if stride < min_stride {
            return Err(BufferError::invalid_stride(stride, min_stride, width));
        }
        let expected = stride
            .checked_mul(height as usize)
            .ok_or_else(|| BufferError::invalid_dimensions(width, height, "byte size overflow"))?;
        if data.len() < expected {
            return Err(BufferError::size_mismatch(expected, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            shared: false,
        })
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including any padding.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether the buffer has been marked shared/read-only.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Marks the buffer as shared: mutable views are refused from now on.
    pub fn mark_shared(&mut self) {
        self.shared = true;
    }

    /// Immutable access to the raw bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw byte access for collaborators that fill the buffer themselves.
    ///
    /// Bypasses the shared flag; renders go through
    /// [`try_view_mut`](Self::try_view_mut) instead.
    #[inline]
    pub fn data_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Returns a mutable, geometry-checked view, or the reason the
    /// buffer cannot be mutated.
    pub fn try_view_mut(&mut self) -> BufferResult<MutableView<'_>> {
        if self.shared {
            return Err(BufferError::ReadOnly);
        }
        let expected = self.stride * self.height as usize;
        if self.data.len() < expected {
            return Err(BufferError::size_mismatch(expected, self.data.len()));
        }
        Ok(MutableView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: &mut self.data,
        })
    }

    /// Deep copy that is never shared, regardless of the source flag.
    pub fn detached_copy(&self) -> Self {
        Self {
            data: self.data.clone(),
            width: self.width,
            height: self.height,
            stride: self.stride,
            shared: false,
        }
    }

    /// Reads one pixel as `[b, g, r, a]`.
    pub fn pixel(&self, x: u32, y: u32) -> BufferResult<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return Err(BufferError::out_of_bounds(x, y, self.width, self.height));
        }
        let off = y as usize * self.stride + x as usize * BYTES_PER_PIXEL;
        Ok([
            self.data[off],
            self.data[off + 1],
            self.data[off + 2],
            self.data[off + 3],
        ])
    }

    /// Writes one pixel as `[b, g, r, a]`.
    pub fn set_pixel(&mut self, x: u32, y: u32, bgra: [u8; 4]) -> BufferResult<()> {
        if x >= self.width || y >= self.height {
            return Err(BufferError::out_of_bounds(x, y, self.width, self.height));
        }
        let off = y as usize * self.stride + x as usize * BYTES_PER_PIXEL;
        self.data[off..off + BYTES_PER_PIXEL].copy_from_slice(&bgra);
        Ok(())
    }

    /// Fills every pixel with the same `[b, g, r, a]` value.
    pub fn fill(&mut self, bgra: [u8; 4]) {
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        for y in 0..self.height as usize {
            let start = y * self.stride;
            for px in self.data[start..start + row_bytes].chunks_exact_mut(BYTES_PER_PIXEL) {
                px.copy_from_slice(&bgra);
            }
        }
    }
}

/// Mutable, geometry-validated window over a [`PixelBuffer`].
///
/// Holding a `MutableView` is the proof that the buffer passed the
/// mutability/size checks; executors take it by `&mut`.
#[derive(Debug)]
pub struct MutableView<'a> {
    width: u32,
    height: u32,
    stride: usize,
    data: &'a mut Vec<u8>,
}

impl MutableView<'_> {
    /// View width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// View height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including padding.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Mutable access to the pixel bytes of row `y` (exactly `width * 4` bytes).
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        &mut self.data[start..start + row_bytes]
    }

    /// Splits the view into per-row mutable slices, padding excluded.
    ///
    /// Row order is preserved; used by the row-parallel executor. The
    /// backing vec may be longer than `stride * height`; slack bytes
    /// past the last row are never handed out.
    pub fn rows_mut(&mut self) -> Vec<&mut [u8]> {
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;
        let stride = self.stride;
        self.data
            .chunks_exact_mut(stride)
            .take(self.height as usize)
            .map(|chunk| &mut chunk[..row_bytes])
            .collect()
    }
}
