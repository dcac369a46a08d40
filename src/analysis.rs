//! Runs every check on a file (or on a batch of files).
//!
//! The byte level checks and the pixel level checks are split because they
//! need different inputs: [`analyze_png`] only needs the file bytes, while
//! [`analyze_pixels`] needs a raster that something else has already decoded.

use alloc::vec::Vec;

use crate::{
  bit_planes::BitPlaneSet,
  lsb::ChannelBitStreams,
  png::{
    png_find_trailing_data, png_get_metadata, png_get_text_payloads_with, FileIdentity,
    ImageMetadata, TextDecodeOptions, TextPayloads, TrailingData,
  },
  RgbaBitmapRef, SleuthResult,
};

/// Everything found in a PNG's bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PngReport<'b> {
  pub metadata: ImageMetadata,
  pub text: TextPayloads,
  /// `None` when there's nothing after the `IEND` chunk.
  pub trailing: Option<TrailingData<'b>>,
}

/// Everything found in a PNG's pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelReport {
  pub lsb: ChannelBitStreams,
  pub planes: BitPlaneSet,
}

/// One file of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFile<'b> {
  pub identity: FileIdentity,
  pub bytes: &'b [u8],
}

/// Runs the byte level checks with the default options.
#[inline]
pub fn analyze_png(bytes: &[u8], identity: FileIdentity) -> SleuthResult<PngReport<'_>> {
  analyze_png_with(bytes, identity, &TextDecodeOptions::default())
}

/// Runs the byte level checks.
///
/// ## Failure
/// * [`InvalidFormat`](crate::SleuthError::InvalidFormat) if the PNG signature
///   is wrong.
/// * [`InvalidHeader`](crate::SleuthError::InvalidHeader) if the first chunk
///   isn't a full `IHDR`.
pub fn analyze_png_with<'b>(
  bytes: &'b [u8], identity: FileIdentity, options: &TextDecodeOptions,
) -> SleuthResult<PngReport<'b>> {
  let metadata = png_get_metadata(bytes, identity)?;
  let text = png_get_text_payloads_with(bytes, options)?;
  let trailing = png_find_trailing_data(bytes)?;
  Ok(PngReport { metadata, text, trailing })
}

/// Runs the pixel level checks.
#[must_use]
pub fn analyze_pixels(raster: RgbaBitmapRef<'_>) -> PixelReport {
  PixelReport { lsb: ChannelBitStreams::from_bitmap(raster), planes: BitPlaneSet::decompose(raster) }
}

/// Runs the byte level checks on every file.
///
/// Each file gets its own result, in the same order as the input, so a bad
/// file can't stop the files after it from being checked. With the `rayon`
/// feature the files are checked in parallel.
pub fn analyze_batch<'b>(
  files: &[BatchFile<'b>], options: &TextDecodeOptions,
) -> Vec<SleuthResult<PngReport<'b>>> {
  let check = |file: &BatchFile<'b>| {
    let result = analyze_png_with(file.bytes, file.identity.clone(), options);
    if let Err(e) = &result {
      log::warn!("{}: {e}", file.identity.file_name.as_deref().unwrap_or("<unnamed>"));
    }
    result
  };
  #[cfg(feature = "rayon")]
  let results: Vec<_> = {
    use rayon::prelude::*;
    files.par_iter().map(check).collect()
  };
  #[cfg(not(feature = "rayon"))]
  let results: Vec<_> = files.iter().map(check).collect();
  results
}
