use super::*;

use alloc::format;

/// Info about where a file came from, passed straight through into the
/// [`ImageMetadata`].
///
/// The crate never computes these itself; the caller already read the file
/// and is in a better position to name and hash it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileIdentity {
  pub file_name: Option<String>,
  /// Usually a hex encoded SHA-256 of the file bytes.
  pub sha256: Option<String>,
}
impl FileIdentity {
  #[inline]
  #[must_use]
  pub fn new(file_name: impl Into<String>, sha256: impl Into<String>) -> Self {
    Self { file_name: Some(file_name.into()), sha256: Some(sha256.into()) }
  }
}

/// Structural info about a PNG file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageMetadata {
  #[cfg_attr(feature = "serde", serde(flatten))]
  pub identity: FileIdentity,
  /// Total bytes in the file.
  pub file_size: usize,
  /// The signature bytes as lowercase hex, space separated.
  pub signature_hex: String,
  pub width: u32,
  pub height: u32,
  pub bit_depth: u8,
  pub color_type: PngColorType,
  pub compression_method: u8,
  pub filter_method: u8,
  pub interlace_method: u8,
  /// If `interlace_method` is non-zero.
  pub interlaced: bool,
  /// Chunks found walking from the signature to the end of the file.
  pub chunk_count: u32,
  /// If any `IDAT` chunk was found.
  pub has_image_data: bool,
  /// Every ancillary chunk's type, in file order, duplicates included.
  pub ancillary_chunks: Vec<PngChunkType>,
  /// If the walk hit a chunk that ran off the end of the file.
  pub truncated: bool,
}
impl ImageMetadata {
  #[inline]
  #[must_use]
  pub const fn is_interlaced(&self) -> bool {
    self.interlaced
  }

  /// `"Adam7"` or `"None"`.
  #[inline]
  #[must_use]
  pub const fn interlace_description(&self) -> &'static str {
    interlace_method_name(self.interlace_method)
  }

  /// The ancillary chunk list as `"tEXt, zTXt"`, or `"None"` when empty.
  #[must_use]
  pub fn ancillary_chunks_description(&self) -> String {
    if self.ancillary_chunks.is_empty() {
      return "None".to_string();
    }
    let mut out = String::new();
    for (i, ty) in self.ancillary_chunks.iter().enumerate() {
      if i > 0 {
        out.push_str(", ");
      }
      // writing into a String can't fail
      let _ = write!(out, "{ty}");
    }
    out
  }
}

/// Formats a byte count the way the tool shows file sizes.
#[must_use]
pub fn human_file_size(bytes: usize) -> String {
  const KB: usize = 1024;
  const MB: usize = 1024 * 1024;
  if bytes < KB {
    format!("{bytes} bytes")
  } else if bytes < MB {
    format!("{:.2} KB", bytes as f64 / KB as f64)
  } else {
    format!("{:.2} MB", bytes as f64 / MB as f64)
  }
}

fn signature_hex(bytes: &[u8]) -> String {
  let mut out = String::with_capacity(PNG_SIGNATURE.len() * 3);
  for (i, b) in bytes.iter().take(PNG_SIGNATURE.len()).enumerate() {
    if i > 0 {
      out.push(' ');
    }
    let _ = write!(out, "{b:02x}");
  }
  out
}

/// Running totals gathered during the metadata walk.
#[derive(Debug, Default)]
struct ChunkTally {
  chunk_count: u32,
  has_image_data: bool,
  ancillary_chunks: Vec<PngChunkType>,
}
impl ChunkTally {
  #[inline]
  fn add(&mut self, ty: PngChunkType) {
    self.chunk_count = self.chunk_count.saturating_add(1);
    self.has_image_data |= ty == PngChunkType::IDAT;
    if ty.is_ancillary() {
      self.ancillary_chunks.push(ty);
    }
  }
}

/// Reads the header and walks the whole chunk stream, all in a single pass.
///
/// ## Failure
/// * [`SleuthError::InvalidFormat`] if the PNG signature is wrong.
/// * [`SleuthError::InvalidHeader`] if the first chunk isn't a full `IHDR`.
///
/// A truncated chunk stream is not an error, the counts cover every complete
/// chunk and [`ImageMetadata::truncated`] is set.
pub fn png_get_metadata(bytes: &[u8], identity: FileIdentity) -> SleuthResult<ImageMetadata> {
  let mut it = png_chunks(bytes)?;
  let first = it.next().ok_or(SleuthError::InvalidHeader)?;
  let ihdr = IHDR::try_from(first)?;
  let mut tally = ChunkTally::default();
  tally.add(first.chunk_type());
  for chunk in it.by_ref() {
    tally.add(chunk.chunk_type());
  }
  let truncated = it.is_truncated();
  if truncated {
    log::debug!("png: chunk stream truncated at offset {}", it.offset());
  }
  log::debug!(
    "png: {}x{} {}, {} chunks, {} ancillary",
    ihdr.width,
    ihdr.height,
    ihdr.color_type,
    tally.chunk_count,
    tally.ancillary_chunks.len()
  );
  Ok(ImageMetadata {
    identity,
    file_size: bytes.len(),
    signature_hex: signature_hex(bytes),
    width: ihdr.width,
    height: ihdr.height,
    bit_depth: ihdr.bit_depth,
    color_type: ihdr.color_type,
    compression_method: ihdr.compression_method,
    filter_method: ihdr.filter_method,
    interlace_method: ihdr.interlace_method,
    interlaced: ihdr.is_interlaced(),
    chunk_count: tally.chunk_count,
    has_image_data: tally.has_image_data,
    ancillary_chunks: tally.ancillary_chunks,
    truncated,
  })
}
