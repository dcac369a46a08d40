//! Provides the raster types that the pixel analysis reads and writes.

use alloc::vec::Vec;

use crate::{SleuthError, SleuthResult, RGBA8};

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// Rasters are stored row-major, top row first, which is the same "scan
/// order" that the PNG format itself uses.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

#[inline]
fn checked_pixel_count(width: u32, height: u32) -> SleuthResult<usize> {
  usize::try_from(width)?.checked_mul(usize::try_from(height)?).ok_or(SleuthError::DimensionsMismatch)
}

/// A borrowed RGBA8 raster, such as the output buffer of an image decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbaBitmapRef<'a> {
  width: u32,
  height: u32,
  pixels: &'a [RGBA8],
}
impl<'a> RgbaBitmapRef<'a> {
  /// Wraps a pixel slice.
  ///
  /// ## Failure
  /// * If `pixels.len()` isn't exactly `width * height`.
  #[inline]
  pub fn new(width: u32, height: u32, pixels: &'a [RGBA8]) -> SleuthResult<Self> {
    if checked_pixel_count(width, height)? == pixels.len() {
      Ok(Self { width, height, pixels })
    } else {
      Err(SleuthError::DimensionsMismatch)
    }
  }

  /// Views interleaved `r,g,b,a` bytes as a raster.
  ///
  /// ## Failure
  /// * If `bytes.len()` isn't exactly `width * height * 4`.
  #[inline]
  pub fn from_rgba_bytes(width: u32, height: u32, bytes: &'a [u8]) -> SleuthResult<Self> {
    let pixels: &[RGBA8] = bytemuck::try_cast_slice(bytes)?;
    Self::new(width, height, pixels)
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }
  #[inline]
  #[must_use]
  pub const fn pixels(&self) -> &'a [RGBA8] {
    self.pixels
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<RGBA8> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width)).copied()
    } else {
      None
    }
  }

  /// Makes a new raster of the same size by running `op` on every pixel.
  #[inline]
  #[must_use]
  pub fn map_pixels<F: FnMut(RGBA8) -> RGBA8>(&self, op: F) -> RgbaBitmap {
    RgbaBitmap {
      width: self.width,
      height: self.height,
      pixels: self.pixels.iter().copied().map(op).collect(),
    }
  }

  /// Copies the pixels into an owned raster.
  #[inline]
  #[must_use]
  pub fn to_bitmap(&self) -> RgbaBitmap {
    RgbaBitmap { width: self.width, height: self.height, pixels: self.pixels.to_vec() }
  }
}

/// An owned RGBA8 raster.
///
/// Every derived view that this crate produces is one of these, freshly
/// allocated, so handing one off to a presentation layer never affects any
/// other view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RgbaBitmap {
  width: u32,
  height: u32,
  pixels: Vec<RGBA8>,
}
impl RgbaBitmap {
  /// Takes ownership of a pixel vec.
  ///
  /// ## Failure
  /// * If `pixels.len()` isn't exactly `width * height`.
  #[inline]
  pub fn new(width: u32, height: u32, pixels: Vec<RGBA8>) -> SleuthResult<Self> {
    if checked_pixel_count(width, height)? == pixels.len() {
      Ok(Self { width, height, pixels })
    } else {
      Err(SleuthError::DimensionsMismatch)
    }
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }
  #[inline]
  #[must_use]
  pub fn pixels(&self) -> &[RGBA8] {
    &self.pixels
  }

  /// The pixel data as interleaved `r,g,b,a` bytes, ready for display.
  #[inline]
  #[must_use]
  pub fn as_rgba_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.pixels)
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<RGBA8> {
    self.as_bitmap_ref().get(x, y)
  }

  /// Borrows this raster.
  #[inline]
  #[must_use]
  pub fn as_bitmap_ref(&self) -> RgbaBitmapRef<'_> {
    RgbaBitmapRef { width: self.width, height: self.height, pixels: &self.pixels }
  }

  /// Unwraps into the pixel vec.
  #[inline]
  #[must_use]
  pub fn into_pixels(self) -> Vec<RGBA8> {
    self.pixels
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::vec;

  #[test]
  fn test_bitmap_ref_checks_length() {
    let pixels = [RGBA8::BLACK; 6];
    assert!(RgbaBitmapRef::new(3, 2, &pixels).is_ok());
    assert_eq!(RgbaBitmapRef::new(3, 3, &pixels), Err(SleuthError::DimensionsMismatch));
    assert_eq!(RgbaBitmapRef::new(0, 0, &[]).map(|r| r.pixels().len()), Ok(0));
  }

  #[test]
  fn test_from_rgba_bytes_rejects_partial_pixels() {
    let bytes = [0_u8; 7];
    assert_eq!(
      RgbaBitmapRef::from_rgba_bytes(1, 2, &bytes),
      Err(SleuthError::DimensionsMismatch)
    );
    let bytes = [0_u8; 8];
    assert!(RgbaBitmapRef::from_rgba_bytes(1, 2, &bytes).is_ok());
    assert_eq!(
      RgbaBitmapRef::from_rgba_bytes(2, 2, &bytes),
      Err(SleuthError::DimensionsMismatch)
    );
  }

  #[test]
  fn test_get_is_row_major() {
    let pixels: Vec<RGBA8> = (0..6_u8).map(|i| RGBA8::new(i, 0, 0, 255)).collect();
    let bitmap = RgbaBitmap::new(3, 2, pixels).unwrap();
    assert_eq!(bitmap.get(0, 0).map(|p| p.r), Some(0));
    assert_eq!(bitmap.get(2, 0).map(|p| p.r), Some(2));
    assert_eq!(bitmap.get(0, 1).map(|p| p.r), Some(3));
    assert_eq!(bitmap.get(3, 0), None);
    assert_eq!(bitmap.get(0, 2), None);
    assert_eq!(bitmap.as_rgba_bytes()[12..16], [3, 0, 0, 255]);
  }

  #[test]
  fn test_map_pixels_leaves_source_alone() {
    let source = vec![RGBA8::new(1, 2, 3, 4); 4];
    let view = RgbaBitmapRef::new(2, 2, &source).unwrap();
    let mapped = view.map_pixels(|_| RGBA8::WHITE);
    assert!(mapped.pixels().iter().all(|p| *p == RGBA8::WHITE));
    assert!(source.iter().all(|p| *p == RGBA8::new(1, 2, 3, 4)));
  }
}
